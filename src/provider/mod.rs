//! Completion provider layer
//!
//! OpenAI-compatible chat-completion client for the Groq API.
//! Supports any endpoint implementing the OpenAI chat completions spec.

mod client;
mod config;

pub use client::*;
pub use config::*;
