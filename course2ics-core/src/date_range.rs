//! Date range a run schedules meetings in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Course2IcsError, Course2IcsResult};

/// Shared by every row and pattern of a run. Both ends are calendar dates;
/// `to` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Parse `from` and `to` given as YYYY-MM-DD.
    pub fn from_args(from: &str, to: &str) -> Course2IcsResult<Self> {
        let range = DateRange {
            from: parse_date(from)?,
            to: parse_date(to)?,
        };

        if range.to < range.from {
            tracing::warn!(
                "Range ends ({}) before it starts ({}); events will not recur",
                range.to,
                range.from
            );
        }

        Ok(range)
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> Course2IcsResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Course2IcsError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let range = DateRange::from_args("2020-01-01", "2020-03-01").unwrap();
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
    }

    #[test]
    fn rejects_other_formats() {
        for bad in ["01/01/2020", "2020-13-01", "2020-02-30", "tomorrow", ""] {
            assert!(
                matches!(parse_date(bad), Err(Course2IcsError::InvalidDate(_))),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn reversed_range_is_allowed() {
        assert!(DateRange::from_args("2020-03-01", "2020-01-01").is_ok());
    }
}
