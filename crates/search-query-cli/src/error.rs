//! Error types for the command-line front end.
//!
//! Configuration problems get their own type so the binary can map them to
//! a distinct exit status; command failures travel as `eyre` reports.

use thiserror::Error;

/// Errors raised before any command runs.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
