//! ICS file generation.
//!
//! Course events are written as standalone RFC 5545 calendars, one event each.

mod generate;

pub use generate::generate_ics;
