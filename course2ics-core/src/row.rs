//! Course rows as read from the input table.

use serde::{Deserialize, Serialize};

use crate::error::{Course2IcsError, Course2IcsResult};

/// Column order of the input table.
pub const COLUMNS: [&str; 12] = [
    "title",
    "subject",
    "course",
    "instructor1",
    "instructor2",
    "email1",
    "email2",
    "days1",
    "days2",
    "time1",
    "time2",
    "section",
];

/// One course section. Optional columns are empty strings when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRow {
    pub title: String,
    pub subject: String,
    pub course: String,
    pub instructor1: String,
    pub instructor2: String,
    pub email1: String,
    pub email2: String,
    pub days1: String,
    pub days2: String,
    pub time1: String,
    pub time2: String,
    pub section: String,
}

/// The day and time columns of one meeting pattern of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSlot<'a> {
    /// 1 for days1/time1, 2 for days2/time2
    pub index: u8,
    pub days: &'a str,
    pub times: &'a str,
}

impl CourseRow {
    /// Build a row from positional fields. Missing trailing fields are empty,
    /// extra fields are ignored, every field is trimmed.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut it = fields.into_iter().map(|f| f.trim().to_string());
        let mut next = || it.next().unwrap_or_default();

        CourseRow {
            title: next(),
            subject: next(),
            course: next(),
            instructor1: next(),
            instructor2: next(),
            email1: next(),
            email2: next(),
            days1: next(),
            days2: next(),
            time1: next(),
            time2: next(),
            section: next(),
        }
    }

    /// Check that every field needed to build an event is present.
    pub fn validate(&self) -> Course2IcsResult<()> {
        let required = [
            ("title", &self.title),
            ("email1", &self.email1),
            ("days1", &self.days1),
            ("time1", &self.time1),
            ("section", &self.section),
        ];

        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Course2IcsError::Validation { missing })
        }
    }

    /// The meeting patterns to build: always the first, and the second only
    /// when both its days and time are filled in.
    pub fn pattern_slots(&self) -> Vec<PatternSlot<'_>> {
        let mut slots = vec![PatternSlot {
            index: 1,
            days: &self.days1,
            times: &self.time1,
        }];

        if !self.days2.is_empty() && !self.time2.is_empty() {
            slots.push(PatternSlot {
                index: 2,
                days: &self.days2,
                times: &self.time2,
            });
        }

        slots
    }
}
