//! Question relay CLI
//!
//! Samples a question, asks the completion provider, forwards the answer to
//! the relay endpoint, sleeps, and repeats until interrupted.

use anyhow::Result;
use clap::Parser;
use question_relay::{
    Config, ProviderClient, ProviderConfig, QuestionSet, RelayClient, Runner, Telemetry,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Get the default data directory for log files
/// Uses XDG_DATA_HOME if set, otherwise ~/.question_relay
fn default_data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("question_relay")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".question_relay")
    } else {
        PathBuf::from(".question_relay")
    }
}

#[derive(Parser)]
#[command(name = "question-relay")]
#[command(
    about = "Relay randomly sampled questions through a chat model to an HTTP endpoint",
    long_about = None
)]
struct Cli {
    /// Question file, one question per line (overrides QUESTIONS_FILE)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Seconds to sleep between iterations (overrides SLEEP_INTERVAL_SECS)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Chat model requested from the completion provider
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL for a custom OpenAI-compatible completion endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for log files (default: ~/.question_relay or $XDG_DATA_HOME/question_relay)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(default_data_dir);
    let _telemetry = Telemetry::init(&log_dir, cli.verbose)?;

    // Configuration priority: CLI flags > environment > defaults
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(error = %error, "startup configuration is invalid");
            return Err(error.into());
        }
    };
    if let Some(path) = cli.questions {
        config.questions_file = path;
    }
    if let Some(secs) = cli.interval {
        config.sleep_interval = Duration::from_secs(secs);
    }

    let questions = match QuestionSet::load(&config.questions_file) {
        Ok(questions) => questions,
        Err(error) => {
            tracing::error!(error = %error, "failed to load question set");
            return Err(error.into());
        }
    };
    tracing::info!(
        count = questions.len(),
        file = %config.questions_file.display(),
        "loaded question set"
    );

    let mut provider_config = ProviderConfig::groq();
    if let Some(model) = cli.model {
        provider_config = provider_config.with_model(model);
    }
    if let Some(base_url) = cli.base_url {
        provider_config = provider_config.with_base_url(base_url);
    }

    let provider = ProviderClient::new(provider_config, &config.provider_api_key);
    let relay = RelayClient::new(&config.relay_api_url, &config.relay_auth_token)?;

    // Ctrl-C cancels the token; the loop observes it between iterations
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, finishing current iteration");
            signal_token.cancel();
        }
    });

    let runner = Runner::new(
        questions,
        provider,
        relay,
        config.sleep_interval,
        shutdown,
    );
    runner.run().await;

    Ok(())
}
