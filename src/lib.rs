//! Question relay loop
//!
//! This crate provides:
//! - A question source sampled uniformly each iteration
//! - A chat-completion client for the Groq API (OpenAI-compatible)
//! - A relay client that forwards completions to a second chat endpoint
//! - The control loop that ties them together until interrupted

pub mod config;
pub mod provider;
pub mod questions;
pub mod relay;
pub mod runner;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod mockserver;

pub use config::{Config, ConfigError};
pub use provider::{ProviderClient, ProviderConfig};
pub use questions::QuestionSet;
pub use relay::{RelayClient, RelayOutcome};
pub use runner::{IterationReport, LoopState, Runner};
pub use telemetry::Telemetry;
