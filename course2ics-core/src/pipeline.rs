//! Row pipeline and batch orchestration.
//!
//! Rows are processed one at a time in table order. Each row is validated,
//! then each of its one or two meeting patterns is built into an event and
//! written. Problems with a row are logged and recorded in its report; they
//! never stop the batch. Only reading the table and writing the final index
//! can fail a run.

use std::path::PathBuf;

use tracing::{debug, error, warn};

use crate::config::RunConfig;
use crate::error::{Course2IcsError, Course2IcsResult};
use crate::event::{EventRecord, assemble};
use crate::ics::generate_ics;
use crate::index::{IndexEntry, RunIndex};
use crate::naming;
use crate::occurrence::first_occurrence;
use crate::output::{OutputDir, OutputSink};
use crate::recurrence::build_recurrence;
use crate::row::{CourseRow, PatternSlot};
use crate::schedule::MeetingPattern;
use crate::source;

/// Cap on sessions expanded for verbose logging.
const SESSION_PREVIEW_LIMIT: u16 = 500;

/// Final state of a row after the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// Missing a required field; nothing was attempted
    Rejected,
    /// At least one pattern could not be built or written
    Failed,
    /// Every attempted pattern was written and indexed
    Indexed,
}

/// A written event file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub row: usize,
    pub pattern: u8,
    pub file_name: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum PatternOutcome {
    Written(GeneratedFile),
    Failed { pattern: u8, error: Course2IcsError },
}

#[derive(Debug)]
pub enum RowOutcome {
    Rejected(Course2IcsError),
    Processed(Vec<PatternOutcome>),
}

/// What happened to one row.
#[derive(Debug)]
pub struct RowReport {
    /// 1-based position among the data rows
    pub row: usize,
    pub outcome: RowOutcome,
}

impl RowReport {
    pub fn status(&self) -> RowStatus {
        match &self.outcome {
            RowOutcome::Rejected(_) => RowStatus::Rejected,
            RowOutcome::Processed(patterns) => {
                if patterns
                    .iter()
                    .any(|p| matches!(p, PatternOutcome::Failed { .. }))
                {
                    RowStatus::Failed
                } else {
                    RowStatus::Indexed
                }
            }
        }
    }

    pub fn written(&self) -> impl Iterator<Item = &GeneratedFile> {
        let patterns: &[PatternOutcome] = match &self.outcome {
            RowOutcome::Processed(patterns) => patterns,
            RowOutcome::Rejected(_) => &[],
        };
        patterns.iter().filter_map(|p| match p {
            PatternOutcome::Written(file) => Some(file),
            PatternOutcome::Failed { .. } => None,
        })
    }

    /// Number of patterns that were attempted (0 for rejected rows).
    pub fn attempted(&self) -> usize {
        match &self.outcome {
            RowOutcome::Processed(patterns) => patterns.len(),
            RowOutcome::Rejected(_) => 0,
        }
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<RowReport>,
    pub index: RunIndex,
    pub index_path: PathBuf,
}

impl RunSummary {
    pub fn rows(&self) -> usize {
        self.reports.len()
    }

    pub fn count(&self, status: RowStatus) -> usize {
        self.reports.iter().filter(|r| r.status() == status).count()
    }

    pub fn files_written(&self) -> usize {
        self.reports.iter().map(|r| r.written().count()).sum()
    }
}

/// Build the event for one pattern of a row, with the file name it goes to.
pub fn build_event(
    row: &CourseRow,
    slot: &PatternSlot<'_>,
    config: &RunConfig,
) -> Course2IcsResult<(String, EventRecord)> {
    let pattern = MeetingPattern::parse(slot.days, slot.times)?;
    let first = first_occurrence(config.range.from, &pattern)?;
    let rule = build_recurrence(first, &pattern, config.range.to, config.timezone);

    if tracing::enabled!(tracing::Level::DEBUG) {
        match rule.occurrences(SESSION_PREVIEW_LIMIT) {
            Ok(sessions) => debug!(
                "Pattern {} ({} {}) starts {} with {} sessions",
                slot.index,
                slot.days,
                slot.times,
                first,
                sessions.len()
            ),
            Err(e) => debug!("Could not expand pattern {}: {}", slot.index, e),
        }
    }

    let event = assemble(row, &pattern, first, &rule)?;
    Ok((naming::file_name(row, slot.days, slot.times), event))
}

async fn write_pattern<S: OutputSink>(
    row_number: usize,
    row: &CourseRow,
    slot: &PatternSlot<'_>,
    config: &RunConfig,
    sink: &mut S,
) -> Course2IcsResult<GeneratedFile> {
    let (file_name, event) = build_event(row, slot, config)?;
    let contents = generate_ics(&event)?;

    debug!("Writing event for {}", slot.times);
    let path = sink.write_event(&file_name, &contents).await?;
    debug!("Created {}", path.display());

    Ok(GeneratedFile {
        row: row_number,
        pattern: slot.index,
        file_name,
        path,
    })
}

/// Validate a row and write each of its patterns, recording every written
/// file in `index`.
pub async fn process_row<S: OutputSink>(
    row_number: usize,
    row: &CourseRow,
    config: &RunConfig,
    sink: &mut S,
    index: &mut RunIndex,
) -> RowReport {
    debug!("-------------------------------------------");
    debug!("Processing row {}", row_number);
    debug!("{:?}", row);

    if let Err(e) = row.validate() {
        warn!("Skipping row {}: {}", row_number, e);
        return RowReport {
            row: row_number,
            outcome: RowOutcome::Rejected(e),
        };
    }

    let mut outcomes = Vec::with_capacity(2);

    for slot in row.pattern_slots() {
        match write_pattern(row_number, row, &slot, config, sink).await {
            Ok(file) => {
                index.push(IndexEntry::new(
                    row,
                    &slot,
                    config.range.from,
                    config.range.to,
                    &file.file_name,
                ));
                outcomes.push(PatternOutcome::Written(file));
            }
            Err(e) => {
                error!(
                    "Row {} ({}) pattern {}: {}",
                    row_number, row.title, slot.index, e
                );
                outcomes.push(PatternOutcome::Failed {
                    pattern: slot.index,
                    error: e,
                });
            }
        }
    }

    RowReport {
        row: row_number,
        outcome: RowOutcome::Processed(outcomes),
    }
}

/// Process every row in order, then write the run index once.
///
/// Fails only if the index cannot be written.
pub async fn run<S: OutputSink>(
    rows: &[CourseRow],
    config: &RunConfig,
    sink: &mut S,
) -> Course2IcsResult<RunSummary> {
    let mut index = RunIndex::new();
    let mut reports = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        reports.push(process_row(i + 1, row, config, sink, &mut index).await);
    }

    let index_path = sink.write_index(&index).await?;
    debug!("Wrote index of {} files to {}", index.len(), index_path.display());

    Ok(RunSummary {
        reports,
        index,
        index_path,
    })
}

/// Read the input table, then run it into the output directory.
pub async fn run_file(config: &RunConfig) -> Course2IcsResult<RunSummary> {
    debug!("Input file: {}", config.input_file.display());
    debug!("Output dir: {}", config.output_dir.display());

    let mut output = OutputDir::open(&config.output_dir).await?;
    let rows = source::read_rows(&config.input_file).await?;

    run(&rows, config, &mut output).await
}
