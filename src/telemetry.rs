//! Telemetry and logging infrastructure
//!
//! Console logging (human-readable) plus JSON file logging for analysis.
//! Every stage of the loop reports through tracing: startup validation,
//! outbound questions, completion results, relay outcomes, and shutdown.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Holds the file-writer guard; keep this alive for the process lifetime so
/// buffered log lines are flushed on exit.
pub struct Telemetry {
    log_dir: PathBuf,
    _file_guard: WorkerGuard,
}

impl Telemetry {
    /// Initialize console + JSON file logging. `RUST_LOG` overrides the
    /// default filter.
    pub fn init(log_dir: &Path, verbose: bool) -> anyhow::Result<Self> {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "question_relay.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);

        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if verbose {
                EnvFilter::new("debug,hyper=info,reqwest=info,h2=info,rustls=info")
            } else {
                EnvFilter::new("info,hyper=warn,reqwest=warn,h2=warn,rustls=warn")
            }
        });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).compact())
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()
            .ok();

        tracing::info!(log_dir = %log_dir.display(), "telemetry initialized");

        Ok(Self {
            log_dir: log_dir.to_path_buf(),
            _file_guard: file_guard,
        })
    }

    /// Directory log files are written to.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}
