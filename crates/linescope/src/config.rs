//! Configuration for the linescope command line
//!
//! This module provides the argument parser, the log level derived from the
//! verbosity flags, and validation of the input log path.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default log file, as written by the line-count exporter
pub const DEFAULT_INPUT: &str = "loc.csv";

/// linescope - explore a repository's line-level change history
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "linescope")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to `summary`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the line log (CSV)
    ///
    /// Defaults to ./loc.csv.
    #[arg(short, long, global = true, env = "LINESCOPE_INPUT")]
    pub input: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout stays machine-readable.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Reject malformed log rows instead of skipping them
    #[arg(long, global = true, default_value = "false")]
    pub strict: bool,

    /// Repository web URL used to link commits
    ///
    /// Example: https://github.com/owner/repo
    #[arg(long, global = true, env = "LINESCOPE_REPO_URL")]
    pub repo_url: Option<String>,
}

/// Available subcommands
///
/// Every command writes newline-delimited JSON to stdout.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Repository totals
    Summary,

    /// Commit dots as of a point in history
    Scatter {
        /// Slider position in percent of the full time range
        #[arg(short, long, default_value_t = 100.0)]
        progress: f64,
    },

    /// Per-file line view as of a point in history
    Files {
        /// Slider position in percent of the full time range
        #[arg(short, long, default_value_t = 100.0)]
        progress: f64,
    },

    /// Brush a plot-space rectangle and break the selection down by language
    Select {
        /// Left edge
        #[arg(long, allow_negative_numbers = true)]
        x0: f64,
        /// Top edge
        #[arg(long, allow_negative_numbers = true)]
        y0: f64,
        /// Right edge
        #[arg(long, allow_negative_numbers = true)]
        x1: f64,
        /// Bottom edge
        #[arg(long, allow_negative_numbers = true)]
        y1: f64,
        /// Slider position in percent of the full time range
        #[arg(short, long, default_value_t = 100.0)]
        progress: f64,
    },

    /// Narrative steps, optionally entering one
    Narrative {
        /// Step to enter
        #[arg(short, long)]
        step: Option<usize>,
    },

    /// Replay interaction events from stdin
    ///
    /// Reads one JSON event per line and writes every frame rendered in
    /// response.
    ///
    /// Example:
    ///   echo '{"event":"progress","value":50}' | linescope replay
    Replay,

    /// Query the project gallery
    Projects {
        /// Path to projects.json
        #[arg(short, long)]
        projects: PathBuf,

        /// Case-insensitive text filter
        #[arg(short, long)]
        search: Option<String>,

        /// Only projects from this year
        #[arg(short, long)]
        year: Option<String>,

        /// Keep only the first N projects
        #[arg(short, long)]
        latest: Option<usize>,
    },
}

impl Command {
    /// Check whether the command reads the line log
    #[must_use]
    pub fn needs_log(&self) -> bool {
        !matches!(self, Command::Projects { .. })
    }
}

impl Config {
    /// The command to run
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Summary)
    }

    /// Get the input path, using `loc.csv` as default
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the command reads the line log and the input path
    /// does not exist or is not a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.command().needs_log() {
            return Ok(());
        }

        let input = self.input_path();
        if !input.exists() {
            return Err(ConfigError::InputNotFound(input));
        }
        if !input.is_file() {
            return Err(ConfigError::InputNotFile(input));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input log not found
    #[error("Input log not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.command.is_none());
        assert!(config.input.is_none());
        assert!(!config.verbose);
        assert!(!config.quiet);
        assert!(!config.strict);
        assert_eq!(config.command(), Command::Summary);
    }

    #[test]
    fn test_input_path_default() {
        let config = Config::default();
        assert_eq!(config.input_path(), PathBuf::from("loc.csv"));
    }

    #[test]
    fn test_input_path_custom() {
        let custom = PathBuf::from("/custom/path/loc.csv");
        let config = Config {
            input: Some(custom.clone()),
            ..Default::default()
        };
        assert_eq!(config.input_path(), custom);
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose_wins() {
        let config = Config {
            verbose: true,
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_input() {
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/path/12345/loc.csv")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_validate_directory_input() {
        let config = Config {
            input: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InputNotFile(_))));
    }

    #[test]
    fn test_validate_skips_input_for_projects() {
        let config = Config {
            command: Some(Command::Projects {
                projects: PathBuf::from("projects.json"),
                search: None,
                year: None,
                latest: None,
            }),
            input: Some(PathBuf::from("/nonexistent/path/12345/loc.csv")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
