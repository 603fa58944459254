//! Weekly RRULE construction and expansion for course meetings.
//!
//! A meeting pattern recurs every week on its weekdays, starting at the
//! resolved first occurrence and ending (inclusively) on the last day of the
//! date range.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use rrule::RRuleSet;

use crate::error::{Course2IcsError, Course2IcsResult};
use crate::schedule::MeetingPattern;

/// A weekly recurrence anchored at a concrete first meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub dtstart: NaiveDateTime,
    /// Weekdays the rule is active on, deduplicated in listed order
    pub weekdays: Vec<Weekday>,
    /// Last day (inclusive) an occurrence may fall on
    pub until: NaiveDate,
    /// Zone the floating `dtstart` is expressed in, if any
    pub timezone: Option<Tz>,
}

/// Build the weekly rule for a pattern whose first meeting is `occurrence`.
///
/// An `until` before the first meeting still yields a well-formed rule; it
/// simply has no occurrences.
pub fn build_recurrence(
    occurrence: NaiveDateTime,
    pattern: &MeetingPattern,
    until: NaiveDate,
    timezone: Option<Tz>,
) -> RecurrenceRule {
    let mut weekdays = Vec::with_capacity(pattern.days.len());
    for day in &pattern.days {
        if !weekdays.contains(day) {
            weekdays.push(*day);
        }
    }

    if until < occurrence.date() {
        tracing::warn!(
            "Range ends on {} before the first meeting on {}; '{}' will not recur",
            until,
            occurrence.date(),
            pattern.raw_days
        );
    }

    RecurrenceRule {
        dtstart: occurrence,
        weekdays,
        until,
        timezone,
    }
}

/// Two-letter RFC 5545 weekday code.
fn byday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

impl RecurrenceRule {
    /// The local end of the range: the last second of `until`.
    fn until_local(&self) -> NaiveDateTime {
        self.until.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
    }

    /// UNTIL value. Floating rules keep a floating UNTIL; zoned rules must use
    /// UTC per RFC 5545.
    fn until_value(&self) -> String {
        let local = self.until_local();
        match self.timezone {
            None => local.format("%Y%m%dT%H%M%S").to_string(),
            Some(tz) => tz
                .from_local_datetime(&local)
                .latest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| local.and_utc())
                .format("%Y%m%dT%H%M%SZ")
                .to_string(),
        }
    }

    /// Whether the rule can produce any occurrence at all.
    pub fn is_empty(&self) -> bool {
        self.until_local() < self.dtstart
    }

    /// Expand the rule into concrete local start times, at most `limit` of them.
    pub fn occurrences(&self, limit: u16) -> Course2IcsResult<Vec<NaiveDateTime>> {
        if self.is_empty() || self.weekdays.is_empty() {
            return Ok(Vec::new());
        }

        // The rrule crate needs an anchored DTSTART, so floating rules are
        // expanded as UTC.
        let (dtstart, until) = match self.timezone {
            None => (
                format!("DTSTART:{}Z", self.dtstart.format("%Y%m%dT%H%M%S")),
                format!("{}Z", self.until_value()),
            ),
            Some(tz) => (
                format!(
                    "DTSTART;TZID={}:{}",
                    tz.name(),
                    self.dtstart.format("%Y%m%dT%H%M%S")
                ),
                self.until_value(),
            ),
        };

        let rrule_str = format!(
            "{}\nRRULE:FREQ=WEEKLY;BYDAY={};UNTIL={}",
            dtstart,
            self.byday_value(),
            until
        );

        let rrule_set: RRuleSet = rrule_str.parse().map_err(|e| {
            Course2IcsError::IcsGenerate(format!("Failed to parse RRULE '{}': {}", rrule_str, e))
        })?;

        Ok(rrule_set
            .all(limit)
            .dates
            .iter()
            .map(|dt| dt.naive_local())
            .collect())
    }

    fn byday_value(&self) -> String {
        self.weekdays
            .iter()
            .map(|d| byday_code(*d))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// RRULE value text (without the `RRULE:` prefix).
impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "FREQ=WEEKLY;BYDAY={};UNTIL={}",
            self.byday_value(),
            self.until_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::first_occurrence;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule_for(days: &str, times: &str, from: NaiveDate, to: NaiveDate) -> RecurrenceRule {
        let pattern = MeetingPattern::parse(days, times).unwrap();
        let first = first_occurrence(from, &pattern).unwrap();
        build_recurrence(first, &pattern, to, None)
    }

    #[test]
    fn renders_weekly_rule_text() {
        let rule = rule_for("M,W,F", "09:00-10:00", date(2020, 1, 1), date(2020, 3, 1));
        assert_eq!(rule.to_string(), "FREQ=WEEKLY;BYDAY=MO,WE,FR;UNTIL=20200301T235959");
    }

    #[test]
    fn zoned_rule_uses_utc_until() {
        let pattern = MeetingPattern::parse("T,R", "14:00-15:15").unwrap();
        let first = first_occurrence(date(2020, 1, 1), &pattern).unwrap();
        let rule = build_recurrence(first, &pattern, date(2020, 3, 1), Some(chrono_tz::America::New_York));

        // 23:59:59 EST is 04:59:59 UTC the next day
        assert_eq!(rule.to_string(), "FREQ=WEEKLY;BYDAY=TU,TH;UNTIL=20200302T045959Z");
    }

    #[test]
    fn duplicate_days_are_collapsed() {
        let rule = rule_for("M,W,M", "09:00-10:00", date(2020, 1, 1), date(2020, 3, 1));
        assert_eq!(rule.weekdays, vec![Weekday::Mon, Weekday::Wed]);
    }

    #[test]
    fn expands_mon_wed_fri_through_range_end() {
        let rule = rule_for("M,W,F", "09:00-10:00", date(2020, 1, 1), date(2020, 3, 1));
        let dates = rule.occurrences(365).unwrap();

        assert_eq!(dates.len(), 24);
        assert_eq!(dates.first().unwrap().date(), date(2020, 1, 6));
        assert_eq!(dates.last().unwrap().date(), date(2020, 2, 28));
        assert!(dates.iter().all(|d| matches!(
            d.weekday(),
            Weekday::Mon | Weekday::Wed | Weekday::Fri
        )));
        assert!(dates.iter().all(|d| d.date() <= date(2020, 3, 1)));
    }

    #[test]
    fn range_end_is_inclusive() {
        // 2020-02-28 is a Friday
        let rule = rule_for("M,W,F", "09:00-10:00", date(2020, 1, 1), date(2020, 2, 28));
        let dates = rule.occurrences(365).unwrap();

        assert_eq!(dates.last().unwrap().date(), date(2020, 2, 28));
    }

    #[test]
    fn zoned_rule_expands_in_local_time() {
        let pattern = MeetingPattern::parse("T,R", "14:00-15:15").unwrap();
        let first = first_occurrence(date(2020, 1, 1), &pattern).unwrap();
        let rule = build_recurrence(first, &pattern, date(2020, 1, 31), Some(chrono_tz::America::New_York));
        let dates = rule.occurrences(365).unwrap();

        // Anchored on the first listed day, so Thursday Jan 2 is not included
        assert_eq!(dates.first().unwrap().date(), date(2020, 1, 7));
        assert_eq!(dates.len(), 8);
        assert!(dates.iter().all(|d| d.time() == NaiveTime::from_hms_opt(14, 0, 0).unwrap()));
    }

    #[test]
    fn until_before_first_meeting_recurs_zero_times() {
        let rule = rule_for("M", "09:00-10:00", date(2020, 3, 1), date(2020, 1, 1));

        assert!(rule.is_empty());
        assert!(rule.occurrences(365).unwrap().is_empty());
        assert!(rule.to_string().starts_with("FREQ=WEEKLY;BYDAY=MO;UNTIL=20200101"));
    }
}
