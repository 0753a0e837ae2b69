//! Turn token trees back into search-expression syntax.

use crate::query::lexer::trim_delimiters;
use crate::token::Token;

/// Render `tokens` as search-expression text.
///
/// This inverts tokenisation, not composition: exact phrases regain their
/// double quotes, groups their parentheses, and operators a single space on
/// either side. Works on raw and normalised trees alike; the result is
/// trimmed.
///
/// # Examples
/// ```
/// use search_query::{reconstruct, tokenize};
///
/// let text = "NOT a AND NOT (b OR (c AND \"d AND e\")) AND (x OR y AND NOT y)";
/// assert_eq!(reconstruct(&tokenize(text)), text);
/// ```
#[must_use]
pub fn reconstruct(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Value(text) => out.push_str(text),
            Token::ExactValue(text) => {
                out.push('"');
                out.push_str(text);
                out.push('"');
            }
            Token::Operator(op) => {
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
            }
            Token::SubExpr(children) => {
                out.push('(');
                out.push_str(&reconstruct(children));
                out.push(')');
            }
        }
    }
    trim_delimiters(&out).to_string()
}
