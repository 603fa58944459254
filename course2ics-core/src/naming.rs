//! Output file names for generated events.

use crate::row::CourseRow;

/// Extension of every generated event file.
pub const EXTENSION: &str = "ics";

/// Characters that cannot safely appear in a file name on common filesystems.
const UNSAFE_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Replace filesystem-unsafe characters and whitespace with `-`.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if UNSAFE_CHARS.contains(&c) || c.is_whitespace() {
                '-'
            } else {
                c
            }
        })
        .collect()
}

/// File name for one meeting pattern of a row:
/// `{title}__{section}_{days}__{times}.ics`.
///
/// Days lose their commas and times lose `:`, `-` and whitespace, so the two
/// patterns of a row never share a name. The same row processed twice in one
/// run maps to the same name.
pub fn file_name(row: &CourseRow, days: &str, times: &str) -> String {
    let days: String = days.chars().filter(|c| *c != ',').collect();
    let times: String = times
        .chars()
        .filter(|c| *c != ':' && *c != '-' && !c.is_whitespace())
        .collect();

    format!(
        "{}__{}_{}__{}.{}",
        sanitize(&row.title),
        sanitize(&row.section),
        days,
        times,
        EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, section: &str) -> CourseRow {
        CourseRow {
            title: title.to_string(),
            section: section.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_name_from_title_section_days_and_times() {
        let name = file_name(&row("Intro to Databases", "001"), "M,W,F", "09:00 - 10:00");
        assert_eq!(name, "Intro-to-Databases__001_MWF__09001000.ics");
    }

    #[test]
    fn unsafe_title_characters_are_replaced() {
        let name = file_name(&row("I/O: \"Systems\" <Lab>?", "A1"), "T", "08:00-09:00");
        assert_eq!(name, "I-O---Systems---Lab--__A1_T__08000900.ics");
    }

    #[test]
    fn section_is_sanitized_too() {
        let name = file_name(&row("Calc", "01/02"), "M", "08:00-09:00");
        assert_eq!(name, "Calc__01-02_M__08000900.ics");
    }

    #[test]
    fn patterns_of_one_row_get_distinct_names() {
        let r = row("Physics", "002");
        let first = file_name(&r, "M,W", "10:00-11:00");
        let second = file_name(&r, "R", "14:00-16:00");
        assert_ne!(first, second);
    }

    #[test]
    fn names_are_deterministic() {
        let r = row("Physics", "002");
        assert_eq!(
            file_name(&r, "M,W", "10:00-11:00"),
            file_name(&r.clone(), "M,W", "10:00-11:00")
        );
    }
}
