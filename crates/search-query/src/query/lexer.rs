//! Search-expression lexer converting raw text into a token tree.
//!
//! The lexer is a three-state character scanner. Operators are only
//! recognised while reading a bare value, exact phrases swallow everything up
//! to the next double quote, and parenthesised groups are buffered whole and
//! re-scanned recursively once their closing parenthesis is found.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::{Operator, Token};

/// Deepest parenthesis nesting the default tokeniser expands into groups.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Ceiling for [`Tokenizer::with_max_depth`]; larger limits are clamped so
/// recursion stays bounded whatever the caller asks for.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Characters that delimit operators and are trimmed from terms. Only ASCII
/// whitespace counts; no-break and ideographic spaces are term text.
const DELIMITER_CLASS: &str = r"[\t\n\x0B\x0C\r ]";

#[expect(
    clippy::expect_used,
    reason = "the operator alternation is built from fixed keywords"
)]
static OPERATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = Operator::ALL
        .iter()
        .map(|op| regex::escape(op.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("^{DELIMITER_CLASS}({alternation}){DELIMITER_CLASS}"))
        .expect("operator pattern should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Value,
    ExactValue,
    SubQuery,
}

/// Configurable search-expression tokeniser.
///
/// Tokenisation never fails: unbalanced quotes and parentheses are closed
/// implicitly at the end of input. The only knob is the nesting guard, which
/// bounds recursion for untrusted input.
///
/// # Examples
///
/// ```
/// use search_query::{Operator, Token, Tokenizer};
///
/// let tokens = Tokenizer::new().tokenize("a OR \"b c\"");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::value("a"),
///         Token::operator(Operator::Or),
///         Token::exact("b c"),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    max_depth: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokeniser using [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how many levels of parentheses are expanded into groups.
    ///
    /// A group that would sit deeper than `max_depth` is kept as a single
    /// bare value holding its bracketed text. Zero disables groups
    /// altogether. Values above [`MAX_DEPTH_LIMIT`] are clamped to it.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = if max_depth > MAX_DEPTH_LIMIT {
            MAX_DEPTH_LIMIT
        } else {
            max_depth
        };
        self
    }

    /// The configured nesting limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Scan `text` into a token tree.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let tokens = self.scan(text, 0);
        log::debug!("tokenised {} top-level tokens", tokens.len());
        tokens
    }

    fn scan(&self, text: &str, depth: usize) -> Vec<Token> {
        // The leading space lets the operator pattern see an operator at
        // position zero.
        let source = format!(" {}", trim_delimiters(text));
        let mut scan = Scan::new(self, depth);
        let mut state = State::Value;
        let mut nesting = 0usize;
        let mut rest = source.as_str();

        while !rest.is_empty() {
            if state == State::Value {
                if let Some((op, consumed)) = match_operator(rest) {
                    scan.flush_value();
                    log::trace!("matched operator `{op}` at depth {depth}");
                    scan.tokens.push(Token::Operator(op));
                    rest = rest.get(consumed..).unwrap_or_default();
                    continue;
                }
            }

            let mut chars = rest.chars();
            let Some(ch) = chars.next() else {
                break;
            };
            rest = chars.as_str();

            match (state, ch) {
                (State::Value, '"') => {
                    scan.flush_value();
                    state = State::ExactValue;
                }
                (State::ExactValue, '"') => {
                    scan.flush_exact();
                    state = State::Value;
                }
                (State::Value, '(') => {
                    scan.flush_value();
                    nesting = 0;
                    state = State::SubQuery;
                }
                (State::SubQuery, '(') => {
                    nesting += 1;
                    scan.buffer.push(ch);
                }
                (State::SubQuery, ')') if nesting == 0 => {
                    scan.flush_group();
                    state = State::Value;
                }
                (State::SubQuery, ')') => {
                    nesting -= 1;
                    scan.buffer.push(ch);
                }
                _ => scan.buffer.push(ch),
            }
        }

        match state {
            State::Value => scan.flush_value(),
            State::ExactValue => scan.flush_exact(),
            State::SubQuery => scan.flush_group(),
        }
        scan.tokens
    }
}

/// Scan `text` with the default [`Tokenizer`].
///
/// # Examples
///
/// ```
/// use search_query::{tokenize, Operator, Token};
///
/// assert_eq!(
///     tokenize("NOT draft"),
///     vec![Token::operator(Operator::Not), Token::value("draft")]
/// );
/// assert!(tokenize("   ").is_empty());
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new().tokenize(text)
}

/// Strip leading and trailing ASCII whitespace.
pub(crate) fn trim_delimiters(text: &str) -> &str {
    text.trim_matches(is_delimiter)
}

const fn is_delimiter(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\x0B' | '\x0C' | '\r' | ' ')
}

/// Match an operator delimited by whitespace at the start of `input`,
/// returning it with the byte length of the whole match.
fn match_operator(input: &str) -> Option<(Operator, usize)> {
    let caps = OPERATOR_RE.captures(input)?;
    let whole = caps.get(0)?;
    let op = caps.get(1)?.as_str().parse().ok()?;
    Some((op, whole.end()))
}

struct Scan<'t> {
    tokenizer: &'t Tokenizer,
    depth: usize,
    tokens: Vec<Token>,
    buffer: String,
}

impl<'t> Scan<'t> {
    fn new(tokenizer: &'t Tokenizer, depth: usize) -> Self {
        Self {
            tokenizer,
            depth,
            tokens: Vec::new(),
            buffer: String::new(),
        }
    }

    fn flush_value(&mut self) {
        let text = std::mem::take(&mut self.buffer);
        let trimmed = trim_delimiters(&text);
        if !trimmed.is_empty() {
            self.tokens.push(Token::Value(trimmed.to_string()));
        }
    }

    fn flush_exact(&mut self) {
        let text = std::mem::take(&mut self.buffer);
        if !trim_delimiters(&text).is_empty() {
            self.tokens.push(Token::ExactValue(text));
        }
    }

    fn flush_group(&mut self) {
        let text = std::mem::take(&mut self.buffer);
        let inner = trim_delimiters(&text);
        if inner.is_empty() {
            return;
        }
        let child_depth = self.depth + 1;
        if child_depth > self.tokenizer.max_depth {
            log::warn!(
                "sub-expression nested deeper than {} levels; keeping it as a plain term",
                self.tokenizer.max_depth
            );
            self.tokens.push(Token::Value(format!("({inner})")));
            return;
        }
        let children = self.tokenizer.scan(inner, child_depth);
        if !children.is_empty() {
            self.tokens.push(Token::SubExpr(children));
        }
    }
}
