//! Grammar repair pass enforcing strict value/operator alternation.
//!
//! The tokeniser accepts anything, so its output may start or end with an
//! operator, repeat operators, or juxtapose terms. The normaliser rewrites
//! such trees into a canonical form the composer can render without
//! further checks.

use crate::token::{Operator, Token};

/// Normalise a token sequence, recursing into every group.
///
/// The result alternates value-class tokens and operators, never ends with
/// an operator, and carries at most one leading unary `NOT`. Any other `NOT`
/// becomes `AND NOT`. Groups that normalise to nothing are removed before
/// alternation is checked. The input is never modified.
///
/// Adjacency is judged against the token's predecessor in the input, so in a
/// run of same-class tokens the first one wins and the rest are discarded.
///
/// # Examples
///
/// ```
/// use search_query::{filter, Operator, Token};
///
/// let raw = vec![
///     Token::operator(Operator::And),
///     Token::value("a"),
///     Token::value("b"),
///     Token::operator(Operator::Not),
///     Token::value("c"),
///     Token::operator(Operator::Or),
/// ];
/// assert_eq!(
///     filter(&raw),
///     vec![
///         Token::value("a"),
///         Token::operator(Operator::AndNot),
///         Token::value("c"),
///     ]
/// );
/// ```
#[must_use]
pub fn filter(tokens: &[Token]) -> Vec<Token> {
    let original: Vec<Token> = tokens.iter().filter_map(normalise_group).collect();

    let rest = skip_leading_operators(&original);
    let Some((first, tail)) = rest.split_first() else {
        return Vec::new();
    };
    let tail = match tail.split_last() {
        Some((last, body)) if last.is_operator() => body,
        _ => tail,
    };

    let mut result = Vec::with_capacity(rest.len());
    result.push(leading_form(first));
    let mut prev = first;
    for current in tail {
        if prev.is_operator() != current.is_operator() {
            result.push(inner_form(current));
        }
        prev = current;
    }

    // An operator run that ended on a dropped group can still leave one
    // dangling, as can a lone leading `NOT`.
    while result.last().is_some_and(Token::is_operator) {
        log::trace!("discarding dangling operator");
        result.pop();
    }
    result
}

/// Returns `true` when `tokens` already satisfies the normalised form at
/// every nesting level.
///
/// # Examples
///
/// ```
/// use search_query::{is_normalised, Operator, Token};
///
/// assert!(is_normalised(&[Token::operator(Operator::Not), Token::value("a")]));
/// assert!(!is_normalised(&[Token::value("a"), Token::operator(Operator::Or)]));
/// ```
#[must_use]
pub fn is_normalised(tokens: &[Token]) -> bool {
    let Some((first, tail)) = tokens.split_first() else {
        return true;
    };
    let leading_ok = match first {
        Token::Operator(op) => *op == Operator::Not && !tail.is_empty(),
        _ => true,
    };
    let alternates = tokens
        .windows(2)
        .all(|pair| matches!(pair, [a, b] if a.is_operator() != b.is_operator()));
    let no_trailing = !tokens.last().is_some_and(Token::is_operator);
    let no_inner_not = tail
        .iter()
        .all(|token| token.as_operator() != Some(Operator::Not));
    let groups_ok = tokens.iter().all(|token| match token {
        Token::SubExpr(children) => !children.is_empty() && is_normalised(children),
        _ => true,
    });
    leading_ok && alternates && no_trailing && no_inner_not && groups_ok
}

fn normalise_group(token: &Token) -> Option<Token> {
    match token {
        Token::SubExpr(children) => {
            let children = filter(children);
            (!children.is_empty()).then_some(Token::SubExpr(children))
        }
        other => Some(other.clone()),
    }
}

/// Drop leading binary operators. `NOT` and `AND NOT` stop the scan; the
/// latter is rewritten by [`leading_form`].
fn skip_leading_operators(tokens: &[Token]) -> &[Token] {
    let start = tokens
        .iter()
        .position(|token| {
            !matches!(
                token,
                Token::Operator(Operator::And | Operator::Or | Operator::OrNot)
            )
        })
        .unwrap_or(tokens.len());
    if start > 0 {
        log::trace!("dropping {start} leading operator(s)");
    }
    tokens.get(start..).unwrap_or_default()
}

fn leading_form(token: &Token) -> Token {
    match token {
        Token::Operator(Operator::AndNot) => Token::Operator(Operator::Not),
        other => other.clone(),
    }
}

fn inner_form(token: &Token) -> Token {
    match token {
        Token::Operator(Operator::Not) => Token::Operator(Operator::AndNot),
        other => other.clone(),
    }
}
