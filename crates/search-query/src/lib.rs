//! Free-text boolean search expressions for filter generation.
//!
//! A search expression such as `rust AND NOT (draft OR "work in progress")`
//! passes through three stages:
//!
//! 1. [`tokenize`] scans the text into a tree of [`Token`]s. It never fails;
//!    unbalanced quotes and parentheses are closed at end of input.
//! 2. [`filter`] repairs the tree so values and operators strictly alternate.
//! 3. [`compose`] renders the normalised tree, delegating each search term to
//!    a [`ValueFormatter`] such as [`LikeFormatter`].
//!
//! [`make`] and [`SearchQuery`] run the whole pipeline; [`reconstruct`]
//! turns a tree back into search syntax.
//!
//! ```
//! use search_query::{make, LikeFormatter};
//!
//! let formatter = LikeFormatter::column("title");
//! assert_eq!(
//!     make("rust NOT draft", &formatter)?,
//!     "title LIKE '%rust%' AND NOT title LIKE '%draft%'"
//! );
//! # Ok::<(), search_query::FormattingError>(())
//! ```

mod errors;
mod formatter;
mod query;
mod quote;
mod token;

pub use errors::{FormattingError, UnknownOperator};
pub use formatter::{DataSource, LikeFormatter, ValueFormatter};
pub use query::{
    DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, SearchQuery, Tokenizer, compose, filter, is_normalised, make,
    reconstruct, tokenize, tokenize_and_compose,
};
pub use quote::{AnsiQuoter, MySqlQuoter, Quoter};
pub use token::{Operator, Token};
