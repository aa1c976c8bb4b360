pub mod api;
pub mod config;
pub mod errors;
pub mod navigation;
pub mod screens;
pub mod shell;
pub mod theme;

use clap::Parser;

use crate::config::AppConfig;
use crate::errors::ExpEaseResult;
use crate::shell::cli::Cli;
use crate::shell::Shell;

/// Install the stderr log subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run() -> ExpEaseResult<()> {
    init_tracing();

    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config; starting with defaults");
            AppConfig::default()
        }
    };
    if let Some(base) = cli.api_base {
        config.api.base_url = base;
    }

    let mut shell = Shell::new(config, cli.scheme.map(Into::into))?;
    shell.execute(cli.command).await
}
