//! Terminal rendering for run results.
//!
//! Extension traits that add colored output to course2ics-core types using
//! owo_colors.

use course2ics_core::pipeline::{PatternOutcome, RowOutcome, RowReport, RowStatus, RunSummary};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for RowReport {
    fn render(&self) -> String {
        let label = format!("Row {}", self.row);
        match &self.outcome {
            RowOutcome::Rejected(e) => format!("   {} {}", label.yellow(), e.to_string().dimmed()),
            RowOutcome::Processed(patterns) => patterns
                .iter()
                .map(|p| match p {
                    PatternOutcome::Written(file) => {
                        format!("   {} {}", label.green(), file.file_name.dimmed())
                    }
                    PatternOutcome::Failed { pattern, error } => format!(
                        "   {} {}",
                        format!("{} pattern {}", label, pattern).red(),
                        error.to_string().dimmed()
                    ),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Render for RunSummary {
    fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .reports
            .iter()
            .filter(|r| r.status() != RowStatus::Indexed)
            .map(|r| r.render())
            .collect();

        if !lines.is_empty() {
            lines.push(String::new());
        }

        let written = self.files_written();
        let headline = format!("Wrote {} {}", written, pluralize("file", written));
        lines.push(if written > 0 {
            headline.green().to_string()
        } else {
            headline.yellow().to_string()
        });

        let rejected = self.count(RowStatus::Rejected);
        let failed = self.count(RowStatus::Failed);
        lines.push(
            format!(
                "   {} {}, {} skipped, {} failed",
                self.rows(),
                pluralize("row", self.rows()),
                rejected,
                failed
            )
            .dimmed()
            .to_string(),
        );
        lines.push(format!("   Index: {}", self.index_path.display()).dimmed().to_string());

        lines.join("\n")
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
