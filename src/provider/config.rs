//! Provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for an OpenAI-compatible completion provider, including
/// the fixed generation parameters used on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name for the provider
    pub name: String,
    /// API base URL (e.g., "https://api.groq.com/openai/v1")
    pub base_url: String,
    /// Model to request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap per completion
    pub max_tokens: u32,
}

impl ProviderConfig {
    /// Create a Groq provider config (via their OpenAI-compatible endpoint)
    pub fn groq() -> Self {
        Self {
            name: "Groq".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "mixtral-8x7b-32768".to_string(),
            temperature: 0.7,
            max_tokens: 50,
        }
    }

    /// Create a custom provider config (e.g., LM Studio, vLLM)
    pub fn custom(
        name: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 50,
        }
    }

    /// Override the requested model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
