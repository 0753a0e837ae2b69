//! Literal quoting primitives used by [`LikeFormatter`](crate::LikeFormatter).
//!
//! Escaping belongs to whatever data store consumes the composed fragment,
//! so it sits behind the [`Quoter`] trait. Two stock dialects are provided.

use crate::errors::FormattingError;

/// Quotes a literal for inclusion in a textual filter.
pub trait Quoter {
    /// Escape `literal` and wrap it in the dialect's delimiters.
    ///
    /// # Errors
    /// Returns [`FormattingError::Quote`] when the literal cannot be
    /// represented in the target dialect.
    fn quote(&self, literal: &str) -> Result<String, FormattingError>;

    /// The delimiter [`quote`](Self::quote) wraps literals in.
    fn delimiter(&self) -> char {
        '\''
    }

    /// Strip exactly one leading and one trailing delimiter, when both are
    /// present. Escapes inside the literal are preserved.
    ///
    /// # Examples
    /// ```
    /// use search_query::{AnsiQuoter, Quoter};
    ///
    /// assert_eq!(AnsiQuoter.unquote("'%it''s%'"), "%it''s%");
    /// assert_eq!(AnsiQuoter.unquote("bare"), "bare");
    /// ```
    fn unquote<'a>(&self, quoted: &'a str) -> &'a str {
        let delimiter = self.delimiter();
        quoted
            .strip_prefix(delimiter)
            .and_then(|inner| inner.strip_suffix(delimiter))
            .unwrap_or(quoted)
    }
}

impl<Q: Quoter + ?Sized> Quoter for &Q {
    fn quote(&self, literal: &str) -> Result<String, FormattingError> {
        (**self).quote(literal)
    }

    fn delimiter(&self) -> char {
        (**self).delimiter()
    }
}

/// Standard SQL quoting: single quotes, embedded quotes doubled.
///
/// # Examples
/// ```
/// use search_query::{AnsiQuoter, Quoter};
///
/// assert_eq!(AnsiQuoter.quote("it's").as_deref(), Ok("'it''s'"));
/// assert!(AnsiQuoter.quote("nul\0").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiQuoter;

impl Quoter for AnsiQuoter {
    fn quote(&self, literal: &str) -> Result<String, FormattingError> {
        if literal.contains('\0') {
            return Err(FormattingError::Quote {
                value: literal.to_string(),
                reason: "literal contains a NUL character",
            });
        }
        let mut out = String::with_capacity(literal.len() + 2);
        out.push('\'');
        for ch in literal.chars() {
            if ch == '\'' {
                out.push('\'');
            }
            out.push(ch);
        }
        out.push('\'');
        Ok(out)
    }
}

/// MySQL string-literal quoting with backslash escapes.
///
/// Escapes the same characters as the client library's
/// `real_escape_string`: NUL, line feed, carriage return, backslash, both
/// quote characters, and Ctrl-Z.
///
/// # Examples
/// ```
/// use search_query::{MySqlQuoter, Quoter};
///
/// assert_eq!(MySqlQuoter.quote("it's\n").as_deref(), Ok(r"'it\'s\n'"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySqlQuoter;

impl Quoter for MySqlQuoter {
    fn quote(&self, literal: &str) -> Result<String, FormattingError> {
        let mut out = String::with_capacity(literal.len() + 2);
        out.push('\'');
        for ch in literal.chars() {
            match ch {
                '\0' => out.push_str(r"\0"),
                '\n' => out.push_str(r"\n"),
                '\r' => out.push_str(r"\r"),
                '\\' => out.push_str(r"\\"),
                '\'' => out.push_str(r"\'"),
                '"' => out.push_str("\\\""),
                '\u{1a}' => out.push_str(r"\Z"),
                other => out.push(other),
            }
        }
        out.push('\'');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "'plain'")]
    #[case("%a%", "'%a%'")]
    #[case("O'Brien", "'O''Brien'")]
    #[case("''", "''''''")]
    #[case("back\\slash", "'back\\slash'")]
    fn ansi_doubles_single_quotes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(AnsiQuoter.quote(input).as_deref(), Ok(expected));
    }

    #[test]
    fn ansi_rejects_nul() {
        assert_eq!(
            AnsiQuoter.quote("a\0b"),
            Err(FormattingError::Quote {
                value: "a\0b".into(),
                reason: "literal contains a NUL character",
            })
        );
    }

    #[rstest]
    #[case("plain", r"'plain'")]
    #[case("O'Brien", r"'O\'Brien'")]
    #[case("say \"hi\"", r#"'say \"hi\"'"#)]
    #[case("a\\b", r"'a\\b'")]
    #[case("line\r\nbreak", r"'line\r\nbreak'")]
    #[case("nul\0", r"'nul\0'")]
    #[case("eof\u{1a}", r"'eof\Z'")]
    fn mysql_backslash_escapes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(MySqlQuoter.quote(input).as_deref(), Ok(expected));
    }

    #[rstest]
    #[case("'x'", "x")]
    #[case("''", "")]
    #[case("'x", "'x")]
    #[case("x'", "x'")]
    #[case("'", "'")]
    fn unquote_strips_one_delimiter_pair(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(AnsiQuoter.unquote(input), expected);
    }

    #[test]
    fn references_forward_to_the_quoter() {
        let quoter = &MySqlQuoter;
        assert_eq!(Quoter::quote(&quoter, "'").as_deref(), Ok(r"'\''"));
        assert_eq!(Quoter::delimiter(&quoter), '\'');
    }
}
