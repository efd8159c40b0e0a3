//! Completion provider client
//!
//! One non-streaming chat completion per call. Failures never propagate:
//! the contract is `Option<String>`, and absence tells the loop to skip the
//! relay step for that iteration.

use super::ProviderConfig;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};

/// OpenAI-compatible client wrapper
#[derive(Clone)]
pub struct ProviderClient {
    config: ProviderConfig,
    client: Client<OpenAIConfig>,
}

impl ProviderClient {
    /// Create a new provider client from config and an API key.
    pub fn new(config: ProviderConfig, api_key: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            config,
        }
    }

    /// Get the provider config
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Send `question` as a single user message with the configured model,
    /// temperature, and token cap. Returns the trimmed text of the first
    /// choice; an empty answer counts as absence. Every failure is logged
    /// here and collapsed into `None`.
    pub async fn complete(&self, question: &str) -> Option<String> {
        let message = match ChatCompletionRequestUserMessageArgs::default()
            .content(question)
            .build()
        {
            Ok(message) => message,
            Err(error) => {
                tracing::error!(error = %error, "failed to build completion message");
                return None;
            }
        };
        let messages: Vec<ChatCompletionRequestMessage> = vec![message.into()];

        let request = match CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build()
        {
            Ok(request) => request,
            Err(error) => {
                tracing::error!(error = %error, "failed to build completion request");
                return None;
            }
        };

        let response = match self.client.chat().create(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(
                    provider = %self.config.name,
                    model = %self.config.model,
                    error = %error,
                    "completion request failed"
                );
                return None;
            }
        };

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty());

        match content {
            Some(text) => {
                tracing::info!(completion = %text, "completion provider replied");
                Some(text.to_string())
            }
            None => {
                tracing::warn!(
                    provider = %self.config.name,
                    "completion response contained no text"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mockserver;

    fn client_for(base_url: String) -> ProviderClient {
        let config = ProviderConfig::groq().with_base_url(format!("{base_url}/v1"));
        ProviderClient::new(config, "test-key")
    }

    #[tokio::test]
    async fn test_complete_returns_trimmed_first_choice() {
        let base = mockserver::one_shot("200 OK", mockserver::chat_completion_body("  4  ")).await;
        let client = client_for(base);

        let answer = client.complete("What is 2+2?").await;
        assert_eq!(answer.as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_complete_provider_error_yields_none() {
        let body = serde_json::json!({
            "error": {"message": "over capacity", "type": "server_error"}
        })
        .to_string();
        let base = mockserver::one_shot("500 Internal Server Error", body).await;
        let client = client_for(base);

        assert_eq!(client.complete("anything").await, None);
    }

    #[tokio::test]
    async fn test_complete_empty_choices_yields_none() {
        let body = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 0,
            "model": "mixtral-8x7b-32768",
            "choices": []
        })
        .to_string();
        let base = mockserver::one_shot("200 OK", body).await;
        let client = client_for(base);

        assert_eq!(client.complete("anything").await, None);
    }

    #[tokio::test]
    async fn test_complete_blank_answer_counts_as_absent() {
        let base = mockserver::one_shot("200 OK", mockserver::chat_completion_body("   ")).await;
        let client = client_for(base);

        assert_eq!(client.complete("anything").await, None);
    }
}
