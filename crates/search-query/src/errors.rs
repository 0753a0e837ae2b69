//! Error types surfaced by the search-query crate.
//!
//! Tokenisation and normalisation are total, so the only runtime failures
//! come from rendering values through a formatter and from parsing operator
//! keywords supplied by callers.

use thiserror::Error;

/// Errors raised while rendering a search term into a filter fragment.
///
/// The composer never inspects or recovers from these; whatever the
/// formatter returns is handed back to the caller unchanged.
///
/// # Examples
/// ```
/// use search_query::FormattingError;
/// let err = FormattingError::custom("backend unavailable");
/// assert_eq!(err.to_string(), "backend unavailable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormattingError {
    /// The quoting primitive refused the literal.
    #[error("cannot quote value `{value}`: {reason}")]
    Quote {
        /// The literal handed to the quoter.
        value: String,
        /// Why the quoter rejected it.
        reason: &'static str,
    },
    /// A data-source template does not contain its placeholder marker.
    #[error("placeholder `{placeholder}` does not occur in data source template `{template}`")]
    MissingPlaceholder {
        /// The marker that was expected.
        placeholder: String,
        /// The template that was searched.
        template: String,
    },
    /// A data-source template was configured with an empty marker.
    #[error("placeholder marker must not be empty")]
    EmptyPlaceholder,
    /// Failure reported by a caller-supplied formatter.
    #[error("{0}")]
    Custom(String),
}

impl FormattingError {
    /// Wrap an arbitrary message from a custom formatter.
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Returned when text does not name one of the five search operators.
///
/// Matching is exact and case-sensitive, mirroring the tokeniser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search operator `{0}`")]
pub struct UnknownOperator(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_quote_failure() {
        let err = FormattingError::Quote {
            value: "%a\0%".into(),
            reason: "literal contains a NUL character",
        };
        assert_eq!(
            err.to_string(),
            "cannot quote value `%a\0%`: literal contains a NUL character"
        );
    }

    #[test]
    fn formats_missing_placeholder() {
        let err = FormattingError::MissingPlaceholder {
            placeholder: "{v}".into(),
            template: "name LIKE ?".into(),
        };
        assert_eq!(
            err.to_string(),
            "placeholder `{v}` does not occur in data source template `name LIKE ?`"
        );
    }

    #[test]
    fn formats_unknown_operator() {
        let err = UnknownOperator("and".into());
        assert_eq!(err.to_string(), "unknown search operator `and`");
    }
}
