//! Minimal OpenAI-compatible chat-completion client.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::error::LlmError;

/// Completion endpoint.
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Per-request timeout. There is no retry/backoff, so this is the only
/// bound on a slow provider.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the chat-completion API.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client construction cannot fail with static options");
        Self {
            http,
            api_key,
            model,
        }
    }

    /// Model name this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// One chat completion round trip. Returns the assistant's content,
    /// trimmed.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "max_tokens": max_tokens,
        });

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Upstream("completion response had no choices".to_string()))?;

        Ok(content.trim().to_string())
    }
}
