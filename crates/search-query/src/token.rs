//! Token tree shared by the tokeniser, normaliser, composer, and
//! reconstructor.

use std::fmt;
use std::str::FromStr;

use crate::errors::UnknownOperator;

/// Boolean operator recognised between search terms.
///
/// Variants are declared in matching priority: the two-word operators come
/// first because `AND`, `OR`, and `NOT` are prefixes of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    /// `AND NOT`: conjunction with a negated right-hand side.
    #[cfg_attr(feature = "serde", serde(rename = "AND NOT"))]
    AndNot,
    /// `OR NOT`: disjunction with a negated right-hand side.
    #[cfg_attr(feature = "serde", serde(rename = "OR NOT"))]
    OrNot,
    /// `AND`: conjunction.
    #[cfg_attr(feature = "serde", serde(rename = "AND"))]
    And,
    /// `OR`: disjunction.
    #[cfg_attr(feature = "serde", serde(rename = "OR"))]
    Or,
    /// `NOT`: unary negation when leading, otherwise read as `AND NOT`.
    #[cfg_attr(feature = "serde", serde(rename = "NOT"))]
    Not,
}

impl Operator {
    /// Every operator in matching priority order.
    pub const ALL: [Self; 5] = [Self::AndNot, Self::OrNot, Self::And, Self::Or, Self::Not];

    /// Return the upper-case keyword for the operator.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_query::Operator;
    ///
    /// assert_eq!(Operator::AndNot.as_str(), "AND NOT");
    /// assert_eq!(Operator::Or.as_str(), "OR");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AndNot => "AND NOT",
            Self::OrNot => "OR NOT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }

    /// Returns `true` when the operator negates its operand.
    #[must_use]
    pub const fn is_negation(self) -> bool {
        matches!(self, Self::AndNot | Self::OrNot | Self::Not)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == value)
            .ok_or_else(|| UnknownOperator(value.to_string()))
    }
}

impl TryFrom<&str> for Operator {
    type Error = UnknownOperator;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A classified fragment of a search expression.
///
/// `SubExpr` owns its children outright, so a tree is always acyclic and
/// can be cloned or dropped without coordination.
///
/// # Examples
///
/// ```
/// use search_query::{Operator, Token};
///
/// let tree = vec![
///     Token::value("a"),
///     Token::operator(Operator::Or),
///     Token::sub_expr(vec![Token::exact("b c")]),
/// ];
/// assert!(tree[1].is_operator());
/// assert!(tree[2].is_value_class());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "value", rename_all = "snake_case")
)]
pub enum Token {
    /// A bare search term.
    Value(String),
    /// A double-quoted phrase, kept verbatim.
    ExactValue(String),
    /// A boolean operator.
    Operator(Operator),
    /// A parenthesised group.
    SubExpr(Vec<Token>),
}

impl Token {
    /// Build a bare search term.
    #[must_use]
    pub fn value(text: impl Into<String>) -> Self {
        Self::Value(text.into())
    }

    /// Build an exact phrase.
    #[must_use]
    pub fn exact(text: impl Into<String>) -> Self {
        Self::ExactValue(text.into())
    }

    /// Build an operator token.
    #[must_use]
    pub const fn operator(op: Operator) -> Self {
        Self::Operator(op)
    }

    /// Build a parenthesised group.
    #[must_use]
    pub fn sub_expr(children: Vec<Self>) -> Self {
        Self::SubExpr(children)
    }

    /// Returns `true` for [`Token::Operator`].
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns `true` for values, exact phrases, and groups: anything that
    /// may stand on either side of an operator.
    #[must_use]
    pub const fn is_value_class(&self) -> bool {
        !self.is_operator()
    }

    /// Children of a group, or `None` for every other token.
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        match self {
            Self::SubExpr(children) => Some(children),
            _ => None,
        }
    }

    /// The operator carried by this token, if any.
    #[must_use]
    pub const fn as_operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AND NOT", Operator::AndNot)]
    #[case("OR NOT", Operator::OrNot)]
    #[case("AND", Operator::And)]
    #[case("OR", Operator::Or)]
    #[case("NOT", Operator::Not)]
    fn parses_keywords(#[case] input: &str, #[case] expected: Operator) {
        assert_eq!(input.parse::<Operator>(), Ok(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    #[case("and")]
    #[case("Not")]
    #[case(" AND")]
    #[case("XOR")]
    fn rejects_unknown_keywords(#[case] input: &str) {
        assert_eq!(
            Operator::try_from(input),
            Err(UnknownOperator(input.to_string()))
        );
    }

    #[test]
    fn priority_lists_compound_operators_first() {
        let keywords: Vec<_> = Operator::ALL.iter().map(|op| op.as_str()).collect();
        assert_eq!(keywords, ["AND NOT", "OR NOT", "AND", "OR", "NOT"]);
    }

    #[test]
    fn classifies_negations() {
        assert!(Operator::AndNot.is_negation());
        assert!(Operator::OrNot.is_negation());
        assert!(Operator::Not.is_negation());
        assert!(!Operator::And.is_negation());
        assert!(!Operator::Or.is_negation());
    }

    #[test]
    fn classifies_tokens() {
        assert!(Token::value("a").is_value_class());
        assert!(Token::exact("a b").is_value_class());
        assert!(Token::sub_expr(vec![Token::value("a")]).is_value_class());
        assert!(Token::from(Operator::And).is_operator());
        assert_eq!(Token::from(Operator::Or).as_operator(), Some(Operator::Or));
        assert_eq!(Token::value("a").as_operator(), None);
    }

    #[test]
    fn exposes_group_children() {
        let group = Token::sub_expr(vec![Token::value("x")]);
        assert_eq!(group.children(), Some(&[Token::value("x")][..]));
        assert_eq!(Token::value("x").children(), None);
    }
}
