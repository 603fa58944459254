mod render;

use anyhow::{Context, Result};
use clap::Parser;
use course2ics_core::config::{RunArgs, RunConfig, Settings};
use course2ics_core::pipeline;
use render::Render;
use tracing_subscriber::EnvFilter;

const CSV_FORMAT: &str = "\
CSV FORMAT
    The input csv MUST have a header row followed by rows in this column order:

    TITLE, SUBJ, CRSE, INSTR1, INSTR2, INSTR1_EMAIL, INSTR2_EMAIL, DAYS1, DAYS2, TIME1, TIME2, SECTION

    TITLE           The title of the course (used as the event description)
    SUBJ            The course subject
    CRSE            The course number
    INSTR1          The primary instructor, in the format Last, First
    INSTR2          The secondary instructor (may be blank)
    INSTR1_EMAIL    The email address of the primary instructor
    INSTR2_EMAIL    The email address of the secondary instructor (may be blank)
    DAYS1           Comma delimited days the course meets, e.g. M,W,F
                    U/Su = Sunday, M = Monday, T = Tuesday, W = Wednesday,
                    R/Th = Thursday, F = Friday, S/Sa = Saturday
    DAYS2           A second set of days (optional)
    TIME1           The meeting time for DAYS1, HH:MM - HH:MM (24 hours)
    TIME2           The meeting time for DAYS2 (optional)
    SECTION         The section number

    TITLE, INSTR1_EMAIL, DAYS1, TIME1 and SECTION are required; rows missing
    any of them are skipped.

EXAMPLE
    course2ics --input schedule.csv --output ./ics --from 2020-01-01 --to 2020-03-01

    The first meeting of each event is the first matching day after --from.
    Events repeat weekly up to and including --to. An index.json listing every
    generated file is written to the output directory.";

#[derive(Parser)]
#[command(name = "course2ics", version)]
#[command(about = "Generate weekly recurring iCalendar (.ics) files from a course schedule CSV")]
#[command(after_long_help = CSV_FORMAT)]
struct Cli {
    /// The path to the input csv
    #[arg(short, long)]
    input: String,

    /// Directory to save the .ics files to (must already exist)
    #[arg(short, long)]
    output: Option<String>,

    /// The starting date (YYYY-MM-DD)
    #[arg(long)]
    from: String,

    /// The ending date (YYYY-MM-DD), inclusive
    #[arg(long)]
    to: String,

    /// IANA timezone for event times, e.g. America/New_York (floating when omitted)
    #[arg(long)]
    timezone: Option<String>,

    /// Run with verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().context("Failed to load settings")?;
    init_tracing(cli.verbose || settings.verbose);

    let args = RunArgs {
        input: cli.input,
        output: cli.output,
        from: cli.from,
        to: cli.to,
        timezone: cli.timezone,
        verbose: cli.verbose,
    };
    let config = RunConfig::resolve(&args, &settings)?;

    let summary = pipeline::run_file(&config)
        .await
        .with_context(|| format!("Failed to convert {}", config.input_file.display()))?;

    println!("{}", summary.render());

    Ok(())
}

/// Warnings only by default; `--verbose` shows per-row progress. RUST_LOG
/// overrides both.
fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "course2ics=debug,course2ics_core=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
