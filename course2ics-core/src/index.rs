//! The run index: which row produced which file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Course2IcsError, Course2IcsResult};
use crate::row::{CourseRow, PatternSlot};

/// File name of the index written into the output directory.
pub const INDEX_FILE_NAME: &str = "index.json";

/// One successfully written event file and the row data it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    pub subject: String,
    pub course: String,
    pub section: String,
    pub instructor: String,
    pub email: String,
    pub days: String,
    pub times: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// 1 for the primary meeting pattern, 2 for the secondary one
    pub pattern: u8,
    pub filename: String,
}

impl IndexEntry {
    pub fn new(
        row: &CourseRow,
        slot: &PatternSlot<'_>,
        from: NaiveDate,
        to: NaiveDate,
        filename: &str,
    ) -> Self {
        IndexEntry {
            title: row.title.clone(),
            subject: row.subject.clone(),
            course: row.course.clone(),
            section: row.section.clone(),
            instructor: row.instructor1.clone(),
            email: row.email1.clone(),
            days: slot.days.to_string(),
            times: slot.times.to_string(),
            from,
            to,
            pattern: slot.index,
            filename: filename.to_string(),
        }
    }
}

/// Append-only manifest of a run, serialized once at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunIndex {
    entries: Vec<IndexEntry>,
}

impl RunIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: IndexEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Course2IcsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| Course2IcsError::Serialization(e.to_string()))
    }
}
