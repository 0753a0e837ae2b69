//! Render normalised token trees into filter fragments.

use crate::errors::FormattingError;
use crate::formatter::ValueFormatter;
use crate::token::Token;

/// Render a normalised token sequence through `formatter`.
///
/// Values and exact phrases are handed to the formatter, operators are
/// padded with one space on each side, and groups are wrapped in
/// parentheses. The composer neither quotes nor escapes anything itself.
///
/// The input is expected to come from [`filter`](crate::filter); composing a
/// raw tree produces syntactically meaningless output rather than an error.
///
/// # Errors
/// Returns the first [`FormattingError`] reported by `formatter`, unchanged.
///
/// # Examples
/// ```
/// use search_query::{compose, filter, tokenize, FormattingError};
///
/// let tokens = filter(&tokenize("a OR \"b c\""));
/// let sql = compose(&tokens, &|value: &str, exact: bool| {
///     Ok::<_, FormattingError>(if exact {
///         format!("name = '{value}'")
///     } else {
///         format!("name LIKE '%{value}%'")
///     })
/// })?;
/// assert_eq!(sql, "name LIKE '%a%' OR name = 'b c'");
/// # Ok::<(), FormattingError>(())
/// ```
pub fn compose<F>(tokens: &[Token], formatter: &F) -> Result<String, FormattingError>
where
    F: ValueFormatter + ?Sized,
{
    let mut out = String::new();
    compose_into(&mut out, tokens, formatter)?;
    log::debug!("composed {} tokens into {} bytes", tokens.len(), out.len());
    Ok(out)
}

fn compose_into<F>(
    out: &mut String,
    tokens: &[Token],
    formatter: &F,
) -> Result<(), FormattingError>
where
    F: ValueFormatter + ?Sized,
{
    for token in tokens {
        match token {
            Token::Value(text) => out.push_str(&formatter.format(text, false)?),
            Token::ExactValue(text) => out.push_str(&formatter.format(text, true)?),
            Token::Operator(op) => {
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
            }
            Token::SubExpr(children) => {
                out.push('(');
                compose_into(out, children, formatter)?;
                out.push(')');
            }
        }
    }
    Ok(())
}
