//! Search-expression pipeline: tokenise, normalise, compose.

mod composer;
mod lexer;
mod normaliser;
mod reconstruct;
#[cfg(test)]
pub(crate) mod test_support;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::errors::FormattingError;
use crate::formatter::{LikeFormatter, ValueFormatter};
use crate::token::Token;

pub use composer::compose;
pub use lexer::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, Tokenizer, tokenize};
pub use normaliser::{filter, is_normalised};
pub use reconstruct::reconstruct;

/// Tokenise, normalise, and compose `query` in one call.
///
/// Empty or all-operator input composes to the empty string.
///
/// # Errors
/// Returns the [`FormattingError`] reported by `formatter`, unchanged.
///
/// # Examples
/// ```
/// use search_query::{make, LikeFormatter};
///
/// let formatter = LikeFormatter::column("`field`");
/// assert_eq!(
///     make("a AND NOT (b OR c)", &formatter)?,
///     "`field` LIKE '%a%' AND NOT (`field` LIKE '%b%' OR `field` LIKE '%c%')"
/// );
/// assert_eq!(make("", &formatter)?, "");
/// # Ok::<(), search_query::FormattingError>(())
/// ```
pub fn make<F>(query: &str, formatter: &F) -> Result<String, FormattingError>
where
    F: ValueFormatter + ?Sized,
{
    SearchQuery::parse(query).compose(formatter)
}

/// Compose `query` into `LIKE` comparisons against `data_source`.
///
/// Without a placeholder, `data_source` is the expression placed before
/// `LIKE`. With one, `data_source` is a template and every occurrence of the
/// marker receives the escaped literal. Literals are quoted with
/// [`AnsiQuoter`](crate::AnsiQuoter).
///
/// # Errors
/// Returns [`FormattingError`] when the template is invalid or a literal
/// cannot be quoted.
///
/// # Examples
/// ```
/// use search_query::tokenize_and_compose;
///
/// assert_eq!(
///     tokenize_and_compose("a OR b", "name", None)?,
///     "name LIKE '%a%' OR name LIKE '%b%'"
/// );
/// assert_eq!(
///     tokenize_and_compose("NOT a", "name NOT LIKE ':v'", Some(":v"))?,
///     " NOT name NOT LIKE '%a%'"
/// );
/// # Ok::<(), search_query::FormattingError>(())
/// ```
pub fn tokenize_and_compose(
    query: &str,
    data_source: &str,
    placeholder: Option<&str>,
) -> Result<String, FormattingError> {
    let query = SearchQuery::parse(query);
    if query.is_empty() {
        return Ok(String::new());
    }
    let Some(marker) = placeholder else {
        return query.compose(&LikeFormatter::column(data_source));
    };
    query.compose(&LikeFormatter::template(data_source, marker)?)
}

/// A tokenised and normalised search expression.
///
/// Holding a `SearchQuery` guarantees its tokens satisfy
/// [`is_normalised`], so it can be composed any number of times with
/// different formatters. `Display` renders the normalised syntax.
///
/// # Examples
/// ```
/// use search_query::SearchQuery;
///
/// let query: SearchQuery = "AND NOT a OR  OR b".parse().unwrap_or_default();
/// assert_eq!(query.to_string(), "NOT a OR b");
///
/// let query = SearchQuery::parse("x NOT \"y z\"");
/// assert_eq!(query.to_string(), "x AND NOT \"y z\"");
/// assert_eq!(query.terms(), vec![("x", false), ("y z", true)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    tokens: Vec<Token>,
}

impl SearchQuery {
    /// Parse `text` with the default [`Tokenizer`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, &Tokenizer::new())
    }

    /// Parse `text` with a caller-configured [`Tokenizer`].
    #[must_use]
    pub fn parse_with(text: &str, tokenizer: &Tokenizer) -> Self {
        Self::from_tokens(&tokenizer.tokenize(text))
    }

    /// Normalise an arbitrary token tree.
    #[must_use]
    pub fn from_tokens(tokens: &[Token]) -> Self {
        Self {
            tokens: filter(tokens),
        }
    }

    /// The normalised tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consume the query, returning its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Returns `true` when nothing survived normalisation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Leaf search terms in reading order, each with its exact-phrase flag.
    #[must_use]
    pub fn terms(&self) -> Vec<(&str, bool)> {
        let mut terms = Vec::new();
        collect_terms(&self.tokens, &mut terms);
        terms
    }

    /// Render the query through `formatter`.
    ///
    /// # Errors
    /// Returns the [`FormattingError`] reported by `formatter`, unchanged.
    pub fn compose<F>(&self, formatter: &F) -> Result<String, FormattingError>
    where
        F: ValueFormatter + ?Sized,
    {
        compose(&self.tokens, formatter)
    }
}

fn collect_terms<'a>(tokens: &'a [Token], terms: &mut Vec<(&'a str, bool)>) {
    for token in tokens {
        match token {
            Token::Value(text) => terms.push((text, false)),
            Token::ExactValue(text) => terms.push((text, true)),
            Token::SubExpr(children) => collect_terms(children, terms),
            Token::Operator(_) => {}
        }
    }
}

impl FromStr for SearchQuery {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(text))
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&reconstruct(&self.tokens))
    }
}

impl From<SearchQuery> for Vec<Token> {
    fn from(query: SearchQuery) -> Self {
        query.tokens
    }
}
