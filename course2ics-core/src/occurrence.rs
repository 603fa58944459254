//! Resolve the first concrete meeting of a pattern inside a date range.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::{Course2IcsError, Course2IcsResult};
use crate::schedule::MeetingPattern;

/// Upper bound on the day-by-day search; every weekday is hit within a week.
const MAX_SEARCH_DAYS: usize = 7;

/// Find the first date after `from` falling on the pattern's first listed
/// weekday, at the pattern's start time.
///
/// The search begins at `from + 1 day`: `from` itself is never returned, even
/// when its weekday matches. Callers who want same-day matches pass the day
/// before.
pub fn first_occurrence(from: NaiveDate, pattern: &MeetingPattern) -> Course2IcsResult<NaiveDateTime> {
    let unresolvable = || Course2IcsError::UnresolvableOccurrence(pattern.raw_days.clone(), from);

    let target = pattern.first_day().ok_or_else(unresolvable)?;
    let mut candidate = from.and_time(pattern.time.start);

    for _ in 0..MAX_SEARCH_DAYS {
        candidate += TimeDelta::days(1);
        if candidate.weekday() == target {
            return Ok(candidate);
        }
    }

    Err(unresolvable())
}
