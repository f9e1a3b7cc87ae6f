//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use paygate_types::DEFAULT_REQUEST_CODE_LENGTH;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Paygate CLI.
#[derive(Parser, Debug)]
#[command(name = "paygate")]
#[command(author = "Paygate Contributors")]
#[command(version)]
#[command(about = "Create payment links, verify callbacks and query transactions")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "PAYGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (human or json).
    #[arg(short, long, global = true, default_value = "human")]
    pub format: OutputFormatArg,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter configuration file.
    ///
    /// Credentials are left as ${PAYGATE_*} references to fill from the environment.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Create a signed payment link.
    ///
    /// Prints the URL to redirect the paying browser to.
    Link {
        /// Merchant order reference.
        #[arg(short, long)]
        order: String,

        /// Amount in major units.
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Decimal,

        /// Where to send the browser after the callback is processed.
        #[arg(short, long)]
        return_url: String,

        /// Transaction type, echoed back in the callback.
        #[arg(short = 't', long = "type", default_value = "order")]
        transaction_type: String,

        /// Request code (generated when omitted).
        #[arg(long)]
        request_code: Option<String>,

        /// Custom data as key=value (repeatable).
        #[arg(short, long, value_parser = parse_key_val)]
        data: Vec<(String, String)>,

        /// Extra gateway fields as key=value (repeatable).
        #[arg(short, long, value_parser = parse_key_val)]
        gateway_data: Vec<(String, String)>,

        /// Shop host (defaults to the config).
        #[arg(long)]
        host: Option<String>,

        /// Shop scheme (defaults to the config).
        #[arg(long)]
        scheme: Option<String>,

        /// Client IP address of the paying browser.
        #[arg(long)]
        client_ip: Option<String>,
    },

    /// Verify and classify a gateway callback.
    ///
    /// Takes the callback query string as received, with or without a leading '?'.
    Callback {
        /// Raw callback query string.
        query: String,

        /// Treat as a server-to-server notification and print the reply body.
        #[arg(short, long)]
        notification: bool,
    },

    /// Print the callback URLs to register with the gateway.
    Endpoints {
        /// Shop host (defaults to the config).
        #[arg(long)]
        host: Option<String>,

        /// Shop scheme (defaults to the config).
        #[arg(long)]
        scheme: Option<String>,
    },

    /// Query the status of a transaction.
    Query {
        /// Request code of the transaction.
        request_code: String,
    },

    /// Generate a fresh request code.
    RequestCode {
        /// Number of characters.
        #[arg(short, long, default_value_t = DEFAULT_REQUEST_CODE_LENGTH)]
        length: usize,
    },
}

/// Parse a `key=value` argument.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_parse_link() {
        let cli = Cli::try_parse_from([
            "paygate",
            "link",
            "--order",
            "ORDER-1",
            "--amount",
            "150000",
            "--return-url",
            "https://shop.example.com/done",
            "--data",
            "note=gift",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Link {
                order,
                amount,
                transaction_type,
                data,
                ..
            } => {
                assert_eq!(order, "ORDER-1");
                assert_eq!(amount, Decimal::from(150000));
                assert_eq!(transaction_type, "order");
                assert_eq!(data, vec![("note".to_string(), "gift".to_string())]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(matches!(cli.format, OutputFormatArg::Json));
    }

    #[test]
    fn test_parse_notification_callback() {
        let cli = Cli::try_parse_from(["paygate", "callback", "--notification", "vpc_Amount=1"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Callback {
                notification: true,
                ..
            }
        ));
    }

    #[test]
    fn test_request_code_default_length() {
        let cli = Cli::try_parse_from(["paygate", "request-code"]).unwrap();
        assert!(matches!(cli.command, Commands::RequestCode { length: 12 }));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
