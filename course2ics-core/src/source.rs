//! Reading course rows from a CSV table.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{Course2IcsError, Course2IcsResult};
use crate::row::{COLUMNS, CourseRow};

/// Read every data row of the CSV at `path`. The header row is discarded.
pub async fn read_rows(path: &Path) -> Course2IcsResult<Vec<CourseRow>> {
    let bytes = tokio::fs::read(path).await?;
    let rows = parse_rows(bytes.as_slice())?;

    if rows.is_empty() {
        return Err(Course2IcsError::EmptyInput(path.display().to_string()));
    }

    Ok(rows)
}

/// Parse CSV data into rows. Records may be shorter or longer than the
/// expected column count.
pub fn parse_rows<R: Read>(input: R) -> Course2IcsResult<Vec<CourseRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    tracing::debug!("Header: {:?}", headers);
    if headers.len() != COLUMNS.len() {
        tracing::warn!(
            "Expected {} columns ({}), found {}",
            COLUMNS.len(),
            COLUMNS.join(", "),
            headers.len()
        );
    }

    reader
        .records()
        .map(|record| -> Course2IcsResult<CourseRow> {
            Ok(CourseRow::from_fields(record?.iter()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "TITLE,SUBJ,CRSE,INSTR1,INSTR2,INSTR1_EMAIL,INSTR2_EMAIL,DAYS1,DAYS2,TIME1,TIME2,SECTION\n";

    #[test]
    fn header_is_discarded() {
        let csv = format!(
            "{}{}",
            HEADER,
            "Databases,CS,4400,\"Smith, Jane\",,js@example.edu,,\"M,W,F\",,09:00-10:00,,001\n"
        );
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Databases");
        assert_eq!(rows[0].instructor1, "Smith, Jane");
        assert_eq!(rows[0].days1, "M,W,F");
        assert_eq!(rows[0].section, "001");
    }

    #[test]
    fn short_records_are_padded() {
        let csv = format!("{}{}", HEADER, "Databases,CS\n");
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].subject, "CS");
        assert!(rows[0].section.is_empty());
    }

    #[test]
    fn fields_are_trimmed() {
        let csv = format!(
            "{}{}",
            HEADER,
            " Databases , CS ,4400,\"Smith, Jane\",,js@example.edu,,M,,09:00-10:00,, 001 \n"
        );
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].title, "Databases");
        assert_eq!(rows[0].section, "001");
    }

    #[test]
    fn header_only_has_no_rows() {
        assert!(parse_rows(HEADER.as_bytes()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, HEADER).unwrap();

        assert!(matches!(read_rows(&path).await, Err(Course2IcsError::EmptyInput(_))));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_rows(&dir.path().join("missing.csv")).await;

        assert!(matches!(result, Err(Course2IcsError::Io(_))));
    }
}
