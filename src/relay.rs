//! Relay client
//!
//! Forwards a completion to the relay endpoint as a chat-style payload and
//! logs whatever comes back. Nothing here raises: every failure mode maps to
//! a `RelayOutcome` variant, and the loop treats the call as fire-and-forget.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const NO_RESPONSE_FALLBACK: &str = "No response";

// The underlying client would otherwise wait forever on a stuck endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What a single relay attempt produced. The outcome is logged by
/// [`RelayClient::relay`]; the returned value is informational.
#[derive(Debug, Clone)]
pub enum RelayOutcome {
    /// HTTP 200 with parseable JSON; holds the extracted (or defaulted) text.
    Success(String),
    /// HTTP 200 but the body was not valid JSON.
    InvalidJson { body: String },
    /// Non-200 status.
    HttpError { status: StatusCode, body: String },
    /// Connection error, timeout, or other transport failure.
    Transport(String),
}

/// Authenticated POST client for the relay endpoint
pub struct RelayClient {
    http: reqwest::Client,
    url: String,
    auth_token: String,
}

impl RelayClient {
    pub fn new(url: &str, auth_token: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            url: url.to_string(),
            auth_token: auth_token.to_string(),
        })
    }

    /// Forward `message` as the user turn of a fixed two-message chat body
    /// and log the outcome. Never raises; callers may ignore the return
    /// value.
    pub async fn relay(&self, message: &str) -> RelayOutcome {
        let outcome = self.send(message).await;
        match &outcome {
            RelayOutcome::Success(text) => {
                tracing::info!(response = %text, "relay endpoint replied");
            }
            RelayOutcome::InvalidJson { body } => {
                tracing::error!(body = %body, "relay endpoint returned invalid JSON");
            }
            RelayOutcome::HttpError { status, body } => {
                tracing::error!(status = %status, body = %body, "relay endpoint returned an error");
            }
            RelayOutcome::Transport(error) => {
                tracing::error!(error = %error, "relay request failed");
            }
        }
        outcome
    }

    async fn send(&self, message: &str) -> RelayOutcome {
        let payload = serde_json::json!({
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": message},
            ]
        });

        let response = match self
            .http
            .post(&self.url)
            .bearer_auth(&self.auth_token)
            .header("accept", "application/json")
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => return RelayOutcome::Transport(error.to_string()),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => return RelayOutcome::Transport(error.to_string()),
        };

        if status != StatusCode::OK {
            return RelayOutcome::HttpError { status, body };
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => RelayOutcome::Success(extract_content(&json).to_string()),
            Err(_) => RelayOutcome::InvalidJson { body },
        }
    }
}

/// Safe nested lookup of `choices[0].message.content`, defaulting when any
/// segment is absent or not a string.
fn extract_content(body: &Value) -> &str {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .unwrap_or(NO_RESPONSE_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mockserver;
    use serde_json::json;

    #[test]
    fn test_extract_content_reads_nested_path() {
        let body = json!({"choices": [{"message": {"content": "hi"}}]});
        assert_eq!(extract_content(&body), "hi");
    }

    #[test]
    fn test_extract_content_defaults_on_missing_segments() {
        let cases = [
            json!({}),
            json!({"choices": []}),
            json!({"choices": [{"message": {}}]}),
            json!({"choices": [{"message": {"content": 42}}]}),
        ];
        for body in &cases {
            assert_eq!(extract_content(body), NO_RESPONSE_FALLBACK);
        }
    }

    #[tokio::test]
    async fn test_relay_success_extracts_text() {
        let body = json!({"choices": [{"message": {"content": "hi"}}]}).to_string();
        let url = mockserver::one_shot("200 OK", body).await;
        let client = RelayClient::new(&url, "test-token").unwrap();

        match client.relay("hello").await {
            RelayOutcome::Success(text) => assert_eq!(text, "hi"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_relay_empty_choices_falls_back() {
        let body = json!({"choices": []}).to_string();
        let url = mockserver::one_shot("200 OK", body).await;
        let client = RelayClient::new(&url, "test-token").unwrap();

        match client.relay("hello").await {
            RelayOutcome::Success(text) => assert_eq!(text, NO_RESPONSE_FALLBACK),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_relay_http_error_carries_status_and_body() {
        let url = mockserver::one_shot("500 Internal Server Error", "boom".to_string()).await;
        let client = RelayClient::new(&url, "test-token").unwrap();

        match client.relay("hello").await {
            RelayOutcome::HttpError { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_relay_invalid_json_keeps_raw_body() {
        let url = mockserver::one_shot("200 OK", "not-json".to_string()).await;
        let client = RelayClient::new(&url, "test-token").unwrap();

        match client.relay("hello").await {
            RelayOutcome::InvalidJson { body } => assert_eq!(body, "not-json"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_relay_transport_failure_is_captured() {
        // Nothing listens on the discard port
        let client = RelayClient::new("http://127.0.0.1:9", "test-token").unwrap();

        match client.relay("hello").await {
            RelayOutcome::Transport(_) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
