//! Command definitions and dispatch for the `search-query` binary.

use std::io::{Read, Write};

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use search_query::{LikeFormatter, MySqlQuoter, SearchQuery, Token, Tokenizer, filter, reconstruct};

use crate::config::{CliConfig, Dialect, LogLevel};
use crate::output::{write_json, write_line, write_tree};

/// Tokenise, normalise, and compose free-text search expressions.
#[derive(Parser, Debug)]
#[command(name = "search-query", version, about)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
    /// Deepest parenthesis nesting expanded into groups (at most 256).
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The dialect requested on the command line, if any.
    #[must_use]
    pub fn dialect(&self) -> Option<Dialect> {
        match &self.command {
            Command::Compose(args) => args.dialect,
            _ => None,
        }
    }
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token tree exactly as scanned.
    Tokenize(TreeArgs),
    /// Print the normalised token tree.
    Filter(TreeArgs),
    /// Print search syntax rebuilt from the token tree.
    Reconstruct(ReconstructArgs),
    /// Compose the query into `LIKE` comparisons.
    Compose(ComposeArgs),
}

/// Arguments for commands that print a token tree.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Search expression; read from stdin when omitted.
    pub query: Option<String>,
    /// Emit JSON instead of an indented outline.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `reconstruct`.
#[derive(Args, Debug)]
pub struct ReconstructArgs {
    /// Search expression; read from stdin when omitted.
    pub query: Option<String>,
    /// Normalise the tree before rebuilding the text.
    #[arg(long)]
    pub normalised: bool,
}

/// Arguments for `compose`.
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Search expression; read from stdin when omitted.
    pub query: Option<String>,
    /// Column expression, or a template when `--placeholder` is given.
    #[arg(long)]
    pub data_source: String,
    /// Marker in the data source replaced by each escaped literal.
    #[arg(long)]
    pub placeholder: Option<String>,
    /// Literal escaping (ansi, mysql).
    #[arg(long)]
    pub dialect: Option<Dialect>,
}

/// Execute `command`, reading the query from `input` when it was not given
/// as an argument and writing results to `output`.
///
/// # Errors
///
/// Returns an error when input cannot be read, output cannot be written, or
/// composition fails.
pub fn run(
    command: &Command,
    config: &CliConfig,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<()> {
    dispatch(command, config, input, output)?;
    output.flush().wrap_err("failed to flush command output")
}

fn dispatch(
    command: &Command,
    config: &CliConfig,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<()> {
    let tokenizer = Tokenizer::new().with_max_depth(config.max_depth);
    match command {
        Command::Tokenize(args) => {
            let tokens = tokenizer.tokenize(&read_query(args.query.as_deref(), input)?);
            write_tokens(output, &tokens, args.json)
        }
        Command::Filter(args) => {
            let raw = tokenizer.tokenize(&read_query(args.query.as_deref(), input)?);
            write_tokens(output, &filter(&raw), args.json)
        }
        Command::Reconstruct(args) => {
            let tokens = tokenizer.tokenize(&read_query(args.query.as_deref(), input)?);
            let text = if args.normalised {
                SearchQuery::from_tokens(&tokens).to_string()
            } else {
                reconstruct(&tokens)
            };
            write_line(output, &text)
        }
        Command::Compose(args) => {
            let text = read_query(args.query.as_deref(), input)?;
            let query = SearchQuery::parse_with(&text, &tokenizer);
            write_line(output, &compose(&query, args, config)?)
        }
    }
}

fn read_query(arg: Option<&str>, input: &mut dyn Read) -> Result<String> {
    if let Some(query) = arg {
        return Ok(query.to_string());
    }
    let mut query = String::new();
    input
        .read_to_string(&mut query)
        .wrap_err("failed to read query from stdin")?;
    Ok(query)
}

fn write_tokens(output: &mut dyn Write, tokens: &[Token], json: bool) -> Result<()> {
    if json {
        write_json(output, tokens)
    } else {
        write_tree(output, tokens)
    }
}

fn compose(query: &SearchQuery, args: &ComposeArgs, config: &CliConfig) -> Result<String> {
    let formatter = match &args.placeholder {
        Some(marker) => LikeFormatter::template(args.data_source.as_str(), marker.as_str())
            .wrap_err("invalid data source template")?,
        None => LikeFormatter::column(args.data_source.as_str()),
    };
    let dialect = config.dialect;
    tracing::debug!(?dialect, terms = query.terms().len(), "composing query");
    let composed = match dialect {
        Dialect::Ansi => query.compose(&formatter),
        Dialect::MySql => query.compose(&formatter.with_quoter(MySqlQuoter)),
    };
    composed.wrap_err("failed to compose query")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run_with(args: &[&str], stdin: &str) -> Result<String> {
        let argv = std::iter::once("search-query").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        let config =
            CliConfig::default().apply_overrides(cli.log_level, cli.max_depth, cli.dialect());
        let mut output = Vec::new();
        run(&cli.command, &config, &mut stdin.as_bytes(), &mut output)?;
        Ok(String::from_utf8(output)?)
    }

    #[rstest]
    #[case(&["reconstruct", "a  AND (b)"], "a AND (b)\n")]
    #[case(&["reconstruct", "--normalised", "OR a NOT b"], "a AND NOT b\n")]
    #[case(&["compose", "--data-source", "t", "a OR b"], "t LIKE '%a%' OR t LIKE '%b%'\n")]
    #[case(&["compose", "--data-source", "t", "--dialect", "mysql", "it's"], "t LIKE '%it\\'s%'\n")]
    #[case(&["--max-depth", "0", "tokenize", "(a OR b)"], "value \"(a OR b)\"\n")]
    #[case(&["filter", "AND a b"], "value \"a b\"\n")]
    fn runs_commands(#[case] args: &[&str], #[case] expected: &str) -> Result<()> {
        assert_eq!(run_with(args, "")?, expected);
        Ok(())
    }

    #[test]
    fn reads_query_from_stdin_when_omitted() -> Result<()> {
        assert_eq!(
            run_with(&["compose", "--data-source", "c"], "x NOT y\n")?,
            "c LIKE '%x%' AND NOT c LIKE '%y%'\n"
        );
        Ok(())
    }

    #[test]
    fn reports_invalid_template() {
        let args = ["compose", "--data-source", "c", "--placeholder", "?", "x"];
        let result = run_with(&args, "");
        assert!(
            result
                .as_ref()
                .is_err_and(|err| format!("{err:#}").contains("does not occur")),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn compose_uses_configured_dialect() -> Result<()> {
        let args = ["search-query", "compose", "--data-source", "c", "it's"];
        let cli = Cli::try_parse_from(args)?;
        let config = CliConfig {
            dialect: Dialect::MySql,
            ..CliConfig::default()
        };
        let mut output = Vec::new();
        run(&cli.command, &config, &mut "".as_bytes(), &mut output)?;
        assert_eq!(String::from_utf8(output)?, "c LIKE '%it\\'s%'\n");
        Ok(())
    }

    #[test]
    fn command_line_dialect_overrides_configuration() {
        let args = ["search-query", "compose", "--data-source", "c", "--dialect", "mysql"];
        let cli = Cli::try_parse_from(args);
        assert!(matches!(
            cli.map(|cli| cli.dialect()),
            Ok(Some(Dialect::MySql))
        ));
    }
}
