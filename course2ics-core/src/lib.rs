//! Core pipeline for course2ics.
//!
//! Turns course-schedule rows into standalone `.ics` files, one weekly
//! recurring event per meeting pattern:
//! - `schedule`, `occurrence` and `recurrence` work out when a pattern meets
//! - `event` and `naming` assemble the event and its file name
//! - `pipeline` drives a whole table and writes the run index

pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod ics;
pub mod index;
pub mod naming;
pub mod occurrence;
pub mod output;
pub mod pipeline;
pub mod recurrence;
pub mod row;
pub mod schedule;
pub mod source;

pub use error::{Course2IcsError, Course2IcsResult};
