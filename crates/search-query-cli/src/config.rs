//! Command-line configuration parsed from environment variables.
//!
//! Every setting can be supplied through a variable prefixed with
//! `SEARCH_QUERY_`; command-line flags take precedence.

use std::env;
use std::str::FromStr;

use search_query::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

use crate::error::CliError;

const LOG_LEVEL_VAR: &str = "SEARCH_QUERY_LOG_LEVEL";
const MAX_DEPTH_VAR: &str = "SEARCH_QUERY_MAX_DEPTH";
const DIALECT_VAR: &str = "SEARCH_QUERY_DIALECT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so diagnostics stay out of piped output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes every operator match.
    Trace,
    /// Per-stage summaries.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warnings such as truncated nesting.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// String-literal escaping used by the `compose` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Standard SQL: embedded single quotes are doubled.
    #[default]
    Ansi,
    /// MySQL: backslash escapes.
    MySql,
}

impl FromStr for Dialect {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ansi" => Ok(Self::Ansi),
            "mysql" => Ok(Self::MySql),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown dialect '{s}', expected one of: ansi, mysql"
            ))),
        }
    }
}

/// Configuration shared by every subcommand.
///
/// # Environment Variables
///
/// - `SEARCH_QUERY_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `SEARCH_QUERY_MAX_DEPTH`: deepest parenthesis nesting expanded into
///   groups, at most [`MAX_DEPTH_LIMIT`]
/// - `SEARCH_QUERY_DIALECT`: literal escaping for `compose` (ansi, mysql)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Nesting limit handed to the tokeniser.
    pub max_depth: usize,
    /// Escaping dialect for composed literals.
    pub dialect: Dialect,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            dialect: Dialect::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a value cannot be parsed or is
    /// out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => defaults.log_level,
        };

        let max_depth = match lookup(MAX_DEPTH_VAR) {
            Some(val) => val.trim().parse().map_err(|_| {
                CliError::InvalidConfig(format!(
                    "invalid max depth '{val}', expected a non-negative integer"
                ))
            })?,
            None => defaults.max_depth,
        };

        let dialect = match lookup(DIALECT_VAR) {
            Some(val) => val.parse()?,
            None => defaults.dialect,
        };

        Self {
            log_level,
            max_depth,
            dialect,
        }
        .validate()
    }

    /// Check settings that parse but are out of range.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` when `max_depth` exceeds
    /// [`MAX_DEPTH_LIMIT`].
    pub fn validate(self) -> Result<Self, CliError> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(CliError::InvalidConfig(format!(
                "max depth {} exceeds the limit of {MAX_DEPTH_LIMIT}",
                self.max_depth
            )));
        }
        Ok(self)
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// This is intended for CLI overrides that should take precedence over
    /// environment-based defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        max_depth: Option<usize>,
        dialect: Option<Dialect>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(depth) = max_depth {
            self.max_depth = depth;
        }

        if let Some(dialect) = dialect {
            self.dialect = dialect;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
