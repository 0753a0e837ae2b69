//! Command-line front end for the `search-query` library.
//!
//! The `search-query` binary exposes each pipeline stage as a subcommand:
//!
//! - `tokenize` prints the token tree exactly as scanned
//! - `filter` prints the normalised tree
//! - `reconstruct` rebuilds search syntax from the tree
//! - `compose` renders `LIKE` comparisons for a column or template
//!
//! # Configuration
//!
//! - `SEARCH_QUERY_LOG_LEVEL`: log verbosity (trace, debug, info, warn,
//!   error)
//! - `SEARCH_QUERY_MAX_DEPTH`: deepest nesting expanded into groups
//! - `SEARCH_QUERY_DIALECT`: literal escaping for `compose` (ansi, mysql)
//!
//! Command-line flags override the environment.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
mod output;
