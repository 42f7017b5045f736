/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable parameter errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Parameter '{param}' accepts at most {max} entries, got {given}")]
    #[diagnostic(
        code(config::too_many_entries),
        help("Shorten the comma separated list.")
    )]
    TooManyEntries {
        param: String,
        max: usize,
        given: usize,
    },

    #[error("Parameter '{param}' has an invalid entry '{value}'")]
    #[diagnostic(
        code(config::invalid_entry),
        help("Entries must be integers separated by commas, e.g. \"0,8\".")
    )]
    InvalidEntry { param: String, value: String },

    #[error("Parameter '{param}' entry {value} is outside {min}..={max}")]
    #[diagnostic(code(config::out_of_range))]
    OutOfRange {
        param: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Unknown pressure mode '{0}'")]
    #[diagnostic(
        code(config::unknown_mode),
        help("Use 'combined' or 'split'.")
    )]
    UnknownPressureMode(String),

    #[error("Failed to read configuration: {0}")]
    #[diagnostic(code(config::io))]
    Io(String),

    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(code(config::parse))]
    Parse(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors reported by host collaborators. The evaluator logs and drops them
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Process {0} not found")]
    NoSuchProcess(Pid),

    #[error("Kill of process {pid} failed: {reason}")]
    KillFailed { pid: Pid, reason: String },

    #[error("Compaction request failed: {0}")]
    CompactionFailed(String),
}

pub type HostResult<T> = Result<T, HostError>;
