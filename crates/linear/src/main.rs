mod cli;
mod color;
mod commands;
mod config;
mod context;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use context::GitBranch;
use output::output_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);
    setup_logging(cli.verbose);

    let format = cli.format;
    if let Err(e) = run(cli) {
        let code = error::exit_code(&e);
        output_error(&e, code, format);
        return ExitCode::from(code);
    }

    ExitCode::SUCCESS
}

fn setup_logging(verbose: bool) {
    let mut log_builder = env_logger::builder();
    if verbose {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        log_builder.filter(None, log::LevelFilter::Warn);
    }
    log_builder.format_timestamp(None);
    log_builder.init();
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Issue { action } => {
            commands::issue::handle_issue(action, &GitBranch, cli.format, || {
                let config = Config::load(cli.config.clone())?;
                log::debug!("using endpoint {}", config.graphql_endpoint);
                Ok(config)
            })
        }
    }
}
