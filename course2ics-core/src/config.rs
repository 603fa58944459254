//! Run configuration.
//!
//! Defaults come from an optional `~/.config/course2ics/config.toml`, then
//! `COURSE2ICS_*` environment variables; explicit run arguments win over both.
//! The resolved `RunConfig` is passed to the pipeline; nothing reads settings
//! from global state.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::date_range::DateRange;
use crate::error::{Course2IcsError, Course2IcsResult};

/// Persistent defaults, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub output_dir: Option<PathBuf>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub verbose: bool,
}

impl Settings {
    pub fn config_path() -> Course2IcsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Course2IcsError::Config("Could not determine config directory".into()))?
            .join("course2ics");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from the default config path and the environment.
    pub fn load() -> Course2IcsResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load settings from `path` (which may not exist) and the environment.
    pub fn load_from(path: &Path) -> Course2IcsResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("COURSE2ICS").try_parsing(true))
            .build()
            .map_err(|e| Course2IcsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| Course2IcsError::Config(e.to_string()))
    }
}

/// Run parameters as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub input: String,
    pub output: Option<String>,
    pub from: String,
    pub to: String,
    pub timezone: Option<String>,
    pub verbose: bool,
}

/// Everything a run needs, resolved and validated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub range: DateRange,
    /// Single zone all event times are expressed in; floating when None
    pub timezone: Option<Tz>,
    pub verbose: bool,
}

impl RunConfig {
    pub fn new(input_file: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, range: DateRange) -> Self {
        RunConfig {
            input_file: input_file.into(),
            output_dir: output_dir.into(),
            range,
            timezone: None,
            verbose: false,
        }
    }

    /// Merge run arguments over persistent settings.
    pub fn resolve(args: &RunArgs, settings: &Settings) -> Course2IcsResult<Self> {
        let output = match (&args.output, &settings.output_dir) {
            (Some(dir), _) => PathBuf::from(dir),
            (None, Some(dir)) => dir.clone(),
            (None, None) => {
                return Err(Course2IcsError::Config(
                    "--output is missing and no output_dir is configured".into(),
                ));
            }
        };

        let timezone = args
            .timezone
            .as_deref()
            .or(settings.timezone.as_deref())
            .map(parse_timezone)
            .transpose()?;

        Ok(RunConfig {
            input_file: expand_path(Path::new(&args.input)),
            output_dir: expand_path(&output),
            range: DateRange::from_args(&args.from, &args.to)?,
            timezone,
            verbose: args.verbose || settings.verbose,
        })
    }
}

/// Parse an IANA zone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Course2IcsResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| Course2IcsError::Config(format!("Unknown timezone '{}': {}", name, e)))
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
