//! Day-code and time-range parsing for meeting patterns.
//!
//! Course tables describe when a section meets with two compact strings:
//! a comma delimited list of day codes (`M,W,F`) and a 24 hour time range
//! (`09:00 - 10:15`).

use std::fmt;

use chrono::{NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Course2IcsError, Course2IcsResult};

/// Day codes accepted in the days columns, with the weekday they stand for.
const DAY_CODES: [(&str, Weekday); 10] = [
    ("U", Weekday::Sun),
    ("Su", Weekday::Sun),
    ("M", Weekday::Mon),
    ("T", Weekday::Tue),
    ("W", Weekday::Wed),
    ("R", Weekday::Thu),
    ("Th", Weekday::Thu),
    ("F", Weekday::Fri),
    ("S", Weekday::Sat),
    ("Sa", Weekday::Sat),
];

/// Map a single day code to its weekday.
pub fn day_from_code(code: &str) -> Option<Weekday> {
    DAY_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, day)| *day)
}

/// Parse a comma delimited day-code string, preserving the listed order.
///
/// `"M,Th,F"` becomes `[Mon, Thu, Fri]`.
pub fn parse_days(raw: &str) -> Course2IcsResult<Vec<Weekday>> {
    raw.split(',')
        .map(str::trim)
        .map(|token| {
            day_from_code(token).ok_or_else(|| Course2IcsError::InvalidDayCode(token.to_string()))
        })
        .collect()
}

/// Start and end time-of-day of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Length of the meeting. An end before the start is taken to fall on
    /// the next day, so the result is never negative.
    pub fn duration(&self) -> EventDuration {
        let mut delta = self.end - self.start;
        if delta < TimeDelta::zero() {
            delta += TimeDelta::days(1);
        }
        EventDuration::from_delta(delta)
    }
}

/// Parse a time range such as `"12:00 - 14:00"`.
pub fn parse_time_range(raw: &str) -> Course2IcsResult<TimeRange> {
    let invalid = || Course2IcsError::InvalidTimeFormat(raw.to_string());

    let parts: Vec<&str> = raw.split('-').map(str::trim).collect();
    let [start, end] = parts.as_slice() else {
        return Err(invalid());
    };

    Ok(TimeRange {
        start: parse_clock(start).ok_or_else(invalid)?,
        end: parse_clock(end).ok_or_else(invalid)?,
    })
}

/// Parse `H:MM` or `HH:MM` (24 hours).
fn parse_clock(token: &str) -> Option<NaiveTime> {
    let (hours, minutes) = token.split_once(':')?;

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || hours.len() > 2 || !digits(minutes) || minutes.len() != 2 {
        return None;
    }

    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

/// An event length broken down the way calendar durations are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDuration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl EventDuration {
    pub fn from_delta(delta: TimeDelta) -> Self {
        let total = delta.num_seconds().max(0);
        EventDuration {
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
        }
    }

    pub fn to_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds)
    }
}

/// RFC 5545 duration value, e.g. `PT1H15M` or `P1DT2H`.
impl fmt::Display for EventDuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "P")?;
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }

        let parts = [(self.hours, 'H'), (self.minutes, 'M'), (self.seconds, 'S')];
        let first = parts.iter().position(|(v, _)| *v > 0);
        let last = parts.iter().rposition(|(v, _)| *v > 0);

        match (first, last) {
            (Some(first), Some(last)) => {
                write!(f, "T")?;
                // Hour, minute and second must be contiguous in a dur-time
                for (value, unit) in &parts[first..=last] {
                    write!(f, "{}{}", value, unit)?;
                }
                Ok(())
            }
            _ if self.days == 0 => write!(f, "T0S"),
            _ => Ok(()),
        }
    }
}

/// One weekday-set plus time-range combination of a course section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingPattern {
    /// Weekdays in the order they were listed
    pub days: Vec<Weekday>,
    pub time: TimeRange,
    /// Day codes as written in the table (used for naming and indexing)
    pub raw_days: String,
    /// Time range as written in the table
    pub raw_times: String,
}

impl MeetingPattern {
    pub fn parse(days: &str, times: &str) -> Course2IcsResult<Self> {
        Ok(MeetingPattern {
            days: parse_days(days)?,
            time: parse_time_range(times)?,
            raw_days: days.to_string(),
            raw_times: times.to_string(),
        })
    }

    /// The weekday the first occurrence is anchored on.
    pub fn first_day(&self) -> Option<Weekday> {
        self.days.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parse_days_preserves_order() {
        assert_eq!(
            parse_days("M,Th,F").unwrap(),
            vec![Weekday::Mon, Weekday::Thu, Weekday::Fri]
        );
        assert_eq!(parse_days("W,M").unwrap(), vec![Weekday::Wed, Weekday::Mon]);
    }

    #[test]
    fn parse_days_accepts_both_code_styles() {
        assert_eq!(parse_days("U,R,S").unwrap(), parse_days("Su,Th,Sa").unwrap());
        assert_eq!(
            parse_days("T, W ").unwrap(),
            vec![Weekday::Tue, Weekday::Wed]
        );
    }

    #[test]
    fn parse_days_rejects_unknown_codes() {
        match parse_days("M,X,F") {
            Err(Course2IcsError::InvalidDayCode(code)) => assert_eq!(code, "X"),
            other => panic!("expected InvalidDayCode, got {:?}", other),
        }
        assert!(parse_days("M,,W").is_err());
        assert!(parse_days("m").is_err());
        assert!(parse_days("Mon").is_err());
    }

    #[test]
    fn parse_time_range_trims_tokens() {
        let range = parse_time_range("12:00 - 14:00").unwrap();
        assert_eq!(range.start, time(12, 0));
        assert_eq!(range.end, time(14, 0));

        let range = parse_time_range("9:05-10:15").unwrap();
        assert_eq!(range.start, time(9, 5));
        assert_eq!(range.end, time(10, 15));
    }

    #[test]
    fn parse_time_range_rejects_bad_input() {
        for bad in [
            "",
            "09:00",
            "09:00-10:00-11:00",
            "24:00-25:00",
            "09:60-10:00",
            "9am-10am",
            "09:0-10:00",
            "123:00-10:00",
        ] {
            assert!(
                matches!(parse_time_range(bad), Err(Course2IcsError::InvalidTimeFormat(_))),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn duration_of_daytime_range() {
        let d = parse_time_range("09:00-10:00").unwrap().duration();
        assert_eq!(
            d,
            EventDuration { days: 0, hours: 1, minutes: 0, seconds: 0 }
        );

        let d = parse_time_range("13:10-14:25").unwrap().duration();
        assert_eq!((d.hours, d.minutes), (1, 15));
    }

    #[test]
    fn duration_wraps_past_midnight() {
        let d = parse_time_range("21:00-05:00").unwrap().duration();
        assert_eq!(
            d,
            EventDuration { days: 0, hours: 8, minutes: 0, seconds: 0 }
        );
    }

    #[test]
    fn duration_is_never_negative() {
        for raw in ["00:00-23:59", "23:59-00:00", "12:00-12:00", "18:30-06:15"] {
            let d = parse_time_range(raw).unwrap().duration();
            assert!(d.to_delta() >= TimeDelta::zero(), "{} gave {:?}", raw, d);
        }
    }

    #[test]
    fn duration_renders_as_ics_value() {
        let d = |days, hours, minutes, seconds| EventDuration { days, hours, minutes, seconds };
        assert_eq!(d(0, 1, 0, 0).to_string(), "PT1H");
        assert_eq!(d(0, 1, 15, 0).to_string(), "PT1H15M");
        assert_eq!(d(0, 0, 50, 0).to_string(), "PT50M");
        assert_eq!(d(0, 2, 0, 30).to_string(), "PT2H0M30S");
        assert_eq!(d(1, 0, 0, 0).to_string(), "P1D");
        assert_eq!(d(1, 2, 0, 0).to_string(), "P1DT2H");
        assert_eq!(d(0, 0, 0, 0).to_string(), "PT0S");
    }

    #[test]
    fn meeting_pattern_keeps_raw_strings() {
        let pattern = MeetingPattern::parse("W,M", "08:00 - 09:15").unwrap();
        assert_eq!(pattern.first_day(), Some(Weekday::Wed));
        assert_eq!(pattern.raw_days, "W,M");
        assert_eq!(pattern.raw_times, "08:00 - 09:15");
    }
}
