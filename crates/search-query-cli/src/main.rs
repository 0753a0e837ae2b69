//! `search-query` binary: inspect and compose free-text search expressions.

use std::io;

use clap::Parser;

use search_query_cli::cli::{Cli, run};
use search_query_cli::config::CliConfig;
use search_query_cli::error::CliError;
use search_query_cli::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);
    tracing::debug!(?config, "configuration loaded");

    let result = run(
        &cli.command,
        &config,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    );
    if let Err(e) = result {
        tracing::error!("command failed: {e:#}");
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<CliConfig, CliError> {
    CliConfig::from_env()?
        .apply_overrides(cli.log_level, cli.max_depth, cli.dialect())
        .validate()
}
