use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use builder::cli::Cli;
use builder::commands;
use builder::config::Config;
use builder::errors::AppError;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Resume builder v{} against {}", env!("CARGO_PKG_VERSION"), config.api_url);

    let outcome = match Cli::try_parse() {
        Ok(cli) => commands::run(cli.command, &config).await,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => Err(AppError::from(e)),
    };

    if let Err(e) = outcome {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
