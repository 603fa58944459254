//! ICS file generation.

use crate::error::Course2IcsResult;
use crate::event::EventRecord;
use icalendar::{Calendar, Component, EventLike, Property};

/// Generate .ics content for a single course event
pub fn generate_ics(event: &EventRecord) -> Course2IcsResult<String> {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.title);
    ics_event.description(&event.description);

    // DTSTAMP - required by RFC 5545
    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    // DTSTART is floating unless a zone is configured
    let start = event.start.format("%Y%m%dT%H%M%S").to_string();
    match event.timezone {
        Some(tz) => {
            let mut prop = Property::new("DTSTART", start);
            prop.add_parameter("TZID", tz.name());
            ics_event.append_property(prop);
        }
        None => {
            ics_event.add_property("DTSTART", &start);
        }
    }

    ics_event.add_property("DURATION", event.duration.to_string());
    ics_event.add_property("RRULE", &event.recurrence_rule);
    ics_event.add_property("STATUS", event.status.as_ics_str());

    // ORGANIZER with CN as a parameter
    let mut organizer = Property::new("ORGANIZER", format!("mailto:{}", event.organizer.email));
    organizer.add_parameter("CN", &event.organizer.name);
    ics_event.append_property(organizer);

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with COURSE2ICS
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:COURSE2ICS\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
