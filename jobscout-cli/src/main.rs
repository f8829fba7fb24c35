//! JobScout CLI
//!
//! Command-line front end for the JobScout job-listing service: sign in,
//! browse and check off job links, and (for admins) watch and trigger the
//! scraper.

mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "JobScout job listing CLI", long_about = None)]
struct Cli {
    /// API server URL
    #[arg(long, env = "JOBSCOUT_API_URL", default_value = config::DEFAULT_API_URL)]
    api_url: String,

    /// Where the session is kept between runs
    #[arg(long, env = "JOBSCOUT_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "JOBSCOUT_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Dashboard refresh interval in seconds while the scraper runs
    #[arg(long, env = "JOBSCOUT_POLL_INTERVAL", default_value_t = 10)]
    poll_interval: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobscout=warn,jobscout_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        session_file: cli
            .session_file
            .unwrap_or_else(Config::default_session_file),
        timeout: Duration::from_secs(cli.timeout),
        poll_interval: Duration::from_secs(cli.poll_interval),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
