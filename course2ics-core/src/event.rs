//! Event records assembled from course rows.
//!
//! An `EventRecord` is everything the calendar serializer needs for one
//! meeting pattern: the first meeting, its length, the weekly rule and the
//! people involved.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use uuid::Uuid;

use crate::error::{Course2IcsError, Course2IcsResult};
use crate::naming;
use crate::recurrence::RecurrenceRule;
use crate::row::CourseRow;
use crate::schedule::{EventDuration, MeetingPattern};

/// A single weekly-recurring course event
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub uid: String,
    /// First meeting (year, month, day, hour, minute), local to `timezone`
    pub start: NaiveDateTime,
    /// Zone of `start`; floating time when None
    pub timezone: Option<Tz>,
    pub duration: EventDuration,
    /// RRULE value, without the `RRULE:` prefix
    pub recurrence_rule: String,
    pub title: String,
    pub description: String,
    pub status: EventStatus,
    pub organizer: Organizer,
}

/// The instructor running the event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organizer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "CONFIRMED",
            EventStatus::Tentative => "TENTATIVE",
            EventStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Turn a `Last, First` name into `First Last`.
pub fn flip_name(name: &str) -> Course2IcsResult<String> {
    let (last, first) = name
        .split_once(',')
        .ok_or_else(|| Course2IcsError::MalformedName(name.to_string()))?;

    Ok(format!("{} {}", first.trim(), last.trim()))
}

/// Event title shown in calendars: `{subject} {course} {section}`.
pub fn event_title(row: &CourseRow) -> String {
    format!("{} {} {}", row.subject, row.course, row.section)
}

/// Stable UID derived from the event's file name, so re-running a table
/// updates events in place instead of duplicating them.
fn event_uid(file_name: &str) -> String {
    format!("{}@course2ics", Uuid::new_v5(&Uuid::NAMESPACE_URL, file_name.as_bytes()))
}

/// Combine a row, one of its patterns and the resolved schedule into an event.
///
/// Both patterns of a row are organized by the primary instructor.
pub fn assemble(
    row: &CourseRow,
    pattern: &MeetingPattern,
    occurrence: NaiveDateTime,
    rule: &RecurrenceRule,
) -> Course2IcsResult<EventRecord> {
    let organizer = Organizer {
        name: flip_name(&row.instructor1)?,
        email: row.email1.clone(),
    };

    let file_name = naming::file_name(row, &pattern.raw_days, &pattern.raw_times);

    Ok(EventRecord {
        uid: event_uid(&file_name),
        start: occurrence,
        timezone: rule.timezone,
        duration: pattern.time.duration(),
        recurrence_rule: rule.to_string(),
        title: event_title(row),
        description: row.title.clone(),
        status: EventStatus::Confirmed,
        organizer,
    })
}
