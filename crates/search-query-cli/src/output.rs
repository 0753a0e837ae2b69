//! Helpers for rendering command output.

use std::io::Write;

use eyre::{Context, Result};
use search_query::Token;

const INDENT: &str = "  ";

/// Write `tokens` as an indented outline, one token per line.
///
/// Groups print as `group` with their children indented beneath them.
/// Payloads are shown with Rust string escaping so surrounding whitespace
/// stays visible.
pub(crate) fn write_tree(writer: &mut dyn Write, tokens: &[Token]) -> Result<()> {
    write_level(writer, tokens, 0)
}

fn write_level(writer: &mut dyn Write, tokens: &[Token], depth: usize) -> Result<()> {
    let indent = INDENT.repeat(depth);
    for token in tokens {
        let line = match token {
            Token::Value(text) => format!("value {text:?}"),
            Token::ExactValue(text) => format!("exact {text:?}"),
            Token::Operator(op) => format!("operator {op}"),
            Token::SubExpr(_) => "group".to_string(),
        };
        writeln!(writer, "{indent}{line}").wrap_err("failed to write token tree")?;
        if let Some(children) = token.children() {
            write_level(writer, children, depth + 1)?;
        }
    }
    Ok(())
}

/// Write `tokens` as a single line of JSON.
pub(crate) fn write_json(writer: &mut dyn Write, tokens: &[Token]) -> Result<()> {
    serde_json::to_writer(&mut *writer, tokens).wrap_err("failed to serialize tokens to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}

/// Write a single line of text.
pub(crate) fn write_line(writer: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(writer, "{text}").wrap_err("failed to write command output")
}
