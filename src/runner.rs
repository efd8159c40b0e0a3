//! Control loop
//!
//! A two-state machine: `Running` until the shutdown token fires, then
//! `Stopped`. Each iteration picks a question, asks the completion provider,
//! and relays any answer. Recovery is always log-and-continue; the loop never
//! ends on its own.

use crate::provider::ProviderClient;
use crate::questions::QuestionSet;
use crate::relay::{RelayClient, RelayOutcome};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Loop state. `run()` holds `Running` internally and returns `Stopped`
/// once the shutdown token has been observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// What one iteration did, for the loop's summary line and for tests.
#[derive(Debug)]
pub struct IterationReport {
    pub question: String,
    pub completion: Option<String>,
    pub relay: Option<RelayOutcome>,
}

/// Owns the question set, both clients, and the shutdown signal.
pub struct Runner {
    questions: QuestionSet,
    provider: ProviderClient,
    relay: RelayClient,
    interval: Duration,
    shutdown: CancellationToken,
}

impl Runner {
    pub fn new(
        questions: QuestionSet,
        provider: ProviderClient,
        relay: RelayClient,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            questions,
            provider,
            relay,
            interval,
            shutdown,
        }
    }

    /// Run until the shutdown token is cancelled.
    ///
    /// The token is checked between iterations and raced against the
    /// end-of-iteration sleep, so an interrupt stops the loop within one
    /// interval bound. In-flight network calls are never cancelled
    /// mid-request; they complete or fail normally first.
    pub async fn run(&self) -> LoopState {
        tracing::info!(
            questions = self.questions.len(),
            interval_secs = self.interval.as_secs(),
            "entering relay loop"
        );

        let mut iteration: u64 = 0;
        loop {
            if self.shutdown.is_cancelled() {
                tracing::info!(iterations = iteration, "shutdown requested, stopping relay loop");
                return LoopState::Stopped;
            }

            iteration += 1;
            match self.run_iteration(iteration).await {
                Ok(report) => {
                    tracing::debug!(
                        iteration,
                        question = %report.question,
                        completed = report.completion.is_some(),
                        relayed = report.relay.is_some(),
                        "iteration finished"
                    );
                }
                Err(error) => {
                    // Catch-all for anything the clients' own handling missed
                    tracing::error!(
                        iteration,
                        error = %error,
                        "iteration failed unexpectedly, resuming after sleep"
                    );
                }
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => {}
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    /// One pass: pick → complete → relay (skipped when the provider
    /// returned nothing; that absence was already logged there).
    async fn run_iteration(&self, iteration: u64) -> anyhow::Result<IterationReport> {
        let question = self.questions.pick().to_string();
        tracing::info!(iteration, question = %question, "asking completion provider");

        let completion = self.provider.complete(&question).await;

        let relay = match completion.as_deref() {
            Some(text) => Some(self.relay.relay(text).await),
            None => None,
        };

        Ok(IterationReport {
            question,
            completion,
            relay,
        })
    }
}
