//! Paygate CLI entry point.

mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use paygate_client::GatewayClient;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::LinkArgs;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliResult;
use crate::output::OutputFormat;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format: OutputFormat = cli.format.into();
    match run(cli, format).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if let Some(hint) = e.suggestion() {
                eprintln!("{} {}", "Hint:".yellow(), hint);
            }
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,paygate=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, format: OutputFormat) -> CliResult<String> {
    let config_path = cli.config.unwrap_or_else(default_config_path);

    match cli.command {
        Commands::Init { force } => commands::init(&config_path, force, format),
        Commands::RequestCode { length } => commands::request_code(length, format),
        Commands::Link {
            order,
            amount,
            return_url,
            transaction_type,
            request_code,
            data,
            gateway_data,
            host,
            scheme,
            client_ip,
        } => {
            let (config, client) = connect(&config_path)?;
            let args = LinkArgs {
                order,
                amount,
                return_url,
                transaction_type,
                request_code,
                data,
                gateway_data,
                host,
                scheme,
                client_ip,
            };
            commands::link(&client, &config.shop, args, format)
        }
        Commands::Callback {
            query,
            notification,
        } => {
            let (_, client) = connect(&config_path)?;
            commands::callback(&client, &query, notification, format).await
        }
        Commands::Endpoints { host, scheme } => {
            let (config, client) = connect(&config_path)?;
            commands::endpoints(&client, &config.shop, host, scheme, format)
        }
        Commands::Query { request_code } => {
            let (_, client) = connect(&config_path)?;
            commands::query(&client, &request_code, format).await
        }
    }
}

/// Load the configuration and build a gateway client from it.
fn connect(path: &Path) -> CliResult<(CliConfig, GatewayClient)> {
    let mut config = CliConfig::load(path)?;
    config.apply_env_overrides();
    debug!(path = %path.display(), api_url = %config.gateway.api_url, "Loaded config");
    let client = GatewayClient::new(config.gateway.clone())?;
    Ok((config, client))
}
