//! Review CLI
//!
//! Command-line interface for the design review API and its status pollers.

mod commands;
mod config;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use review_poller::PollerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "review")]
#[command(about = "Design review dashboard CLI", long_about = None)]
#[command(after_help = "Unset options fall back to REVIEW_API_URL, \
REVIEW_POLL_INTERVAL_MS and REVIEW_MAX_ATTEMPTS, then to the built-in defaults.")]
struct Cli {
    /// Review API base URL [default: http://localhost:8000/api]
    #[arg(long)]
    api_url: Option<String>,

    /// Delay between status probes, in milliseconds [default: 5000]
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Non-terminal probes before a poller gives up [default: 60]
    #[arg(long)]
    max_attempts: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Applies command-line overrides on top of `base` and validates the result
    fn config_with(&self, mut base: PollerConfig) -> Result<Config> {
        if let Some(api_url) = &self.api_url {
            base.api_url = api_url.clone();
        }
        if let Some(ms) = self.poll_interval_ms {
            base.poll_interval = Duration::from_millis(ms);
        }
        if let Some(max_attempts) = self.max_attempts {
            base.max_attempts = max_attempts;
        }
        base.validate()?;
        Ok(Config { poller: base })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_cli=info,review_poller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = PollerConfig::from_env()
        .and_then(|base| cli.config_with(base))
        .context("invalid configuration")?;

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["review", "candidate", "list"]).unwrap();
        let config = cli.config_with(PollerConfig::default()).unwrap();
        assert_eq!(config.poller.api_url, "http://localhost:8000/api");
        assert_eq!(config.poller.poll_interval, Duration::from_secs(5));
        assert_eq!(config.poller.max_attempts, 60);
    }

    #[test]
    fn test_flags_override_environment() {
        let mut from_env = PollerConfig::new("https://env.example.com/api".to_string());
        from_env.max_attempts = 9;

        let cli = Cli::try_parse_from([
            "review",
            "--poll-interval-ms",
            "250",
            "--max-attempts",
            "3",
            "watch",
            "12",
        ])
        .unwrap();
        let config = cli.config_with(from_env).unwrap();
        assert_eq!(config.poller.api_url, "https://env.example.com/api");
        assert_eq!(config.policy().interval, Duration::from_millis(250));
        assert_eq!(config.policy().max_attempts, 3);
        assert!(matches!(cli.command, Commands::Watch(_)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cli = Cli::try_parse_from(["review", "--max-attempts", "0", "candidate", "list"])
            .unwrap();
        assert!(cli.config_with(PollerConfig::default()).is_err());

        let cli = Cli::try_parse_from(["review", "--api-url", "localhost", "candidate", "list"])
            .unwrap();
        assert!(cli.config_with(PollerConfig::default()).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["review"]).is_err());
    }
}
