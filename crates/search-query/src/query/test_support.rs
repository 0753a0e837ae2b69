//! Terse token constructors for unit tests.
use crate::token::{Operator, Token};

pub(crate) fn val(text: &str) -> Token {
    Token::value(text)
}

pub(crate) fn exact(text: &str) -> Token {
    Token::exact(text)
}

pub(crate) fn op(op: Operator) -> Token {
    Token::operator(op)
}

pub(crate) fn sub(children: Vec<Token>) -> Token {
    Token::sub_expr(children)
}

/// Formatter rendering values as a MySQL-style `LIKE` on a quoted column.
pub(crate) fn like_field(value: &str, _exact: bool) -> Result<String, crate::FormattingError> {
    Ok(format!("`field` LIKE '%{value}%'"))
}
