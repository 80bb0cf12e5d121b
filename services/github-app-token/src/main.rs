//! GitHub App Installation Token CLI
//!
//! Generates a short-lived installation access token for the account the
//! app is installed on, and prints shell commands that make git use it.
//!
//! ## Usage
//! ```bash
//! # With command line arguments
//! eval "$(github-app-token \
//!   --app-id 123456 \
//!   --app-private-key ./key.pem \
//!   --name lornu-ai)"
//!
//! # With environment variables (key as base64-encoded PEM)
//! GITHUB_APP_ID=123456 \
//! GITHUB_APP_PRIVATE_KEY="$(base64 -w0 key.pem)" \
//! GITHUB_APP_INSTALLATION_NAME=lornu-ai \
//! github-app-token --go-private
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use github_app_token::output::{self, DEFAULT_GIT_HOST};
use github_app_token::{
    client::GITHUB_API, resolve, ExchangeConfig, ExchangeError, ResolvedCredential,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// GitHub App Installation Token Generator
#[derive(Parser, Debug)]
#[command(name = "github-app-token")]
#[command(about = "Print git config that authenticates as a GitHub App installation")]
#[command(version)]
struct Args {
    /// GitHub App ID
    #[arg(long, env = "GITHUB_APP_ID")]
    app_id: String,

    /// Filename, PEM text, or base64-encoded PEM of the app's private key
    #[arg(long, env = "GITHUB_APP_PRIVATE_KEY", hide_env_values = true)]
    app_private_key: String,

    /// Username or organization name the app is installed on
    #[arg(long, env = "GITHUB_APP_INSTALLATION_NAME")]
    name: String,

    /// Also print a command that adds the account to GOPRIVATE
    #[arg(long)]
    go_private: bool,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API)]
    api_url: String,

    /// Git host used in the printed commands
    #[arg(long, env = "GITHUB_GIT_HOST", default_value = DEFAULT_GIT_HOST)]
    git_host: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Shell)]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Shell commands to eval
    Shell,
    /// JSON summary of the token
    Json,
}

impl Args {
    fn exchange_config(&self) -> ExchangeConfig {
        ExchangeConfig::new(&self.app_id, &self.app_private_key, &self.name)
            .api_url(&self.api_url)
    }
}

fn render(args: &Args, credential: &ResolvedCredential) -> Result<String> {
    match args.format {
        Format::Shell => Ok(output::shell_commands(
            credential,
            &args.git_host,
            args.go_private,
        )),
        Format::Json => Ok(output::json_output(credential)?),
    }
}

/// Stage label followed by the full cause chain
fn failure_message(err: ExchangeError) -> String {
    let stage = err.stage();
    format!("{}: {:#}", stage, anyhow::Error::from(err))
}

/// `RUST_LOG` wins over `--verbose`
fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

fn init_logging(verbose: bool) -> Result<()> {
    // stdout carries the commands to eval, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("🔐 Resolving installation token for {} (app {})", args.name, args.app_id);

    let config = args.exchange_config();
    let result = tokio::select! {
        result = resolve(&config) => result,
        _ = tokio::signal::ctrl_c() => {
            error!("interrupted, aborting token exchange");
            return ExitCode::FAILURE;
        }
    };

    let credential = match result {
        Ok(credential) => credential,
        Err(e) => {
            let stage = e.stage();
            error!(stage = ?stage, name = %args.name, "{}", failure_message(e));
            return ExitCode::FAILURE;
        }
    };

    match render(&args, &credential) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to render output: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
