use crate::history::Turn;
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;

/// Model used for tutor replies unless overridden via configuration.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Elevated, not deterministic: tutor replies should vary in phrasing
/// from one exchange to the next.
const TEMPERATURE: f64 = 0.8;
/// Output cap. Tutor turns are short; a correction plus a retry prompt
/// fits comfortably.
const MAX_TOKENS: u32 = 300;

#[derive(Debug, Deserialize)]
struct LlmResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

// The `ChatBackend` trait is the contract for any chat-completion service
// that can produce a tutor reply from the session so far. The orchestrator
// depends on this abstraction rather than on a concrete client, which lets
// unit tests drive it with `mockall`'s `MockChatBackend` instead of making
// real network calls, and lets a different provider be dropped in without
// touching the conversation logic.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait ChatBackend {
    /// Generates a reply for the given system instructions and ordered
    /// history. Returns `Ok(None)` when the backend answered but produced
    /// no content.
    async fn complete(&self, instructions: &str, history: &[Turn]) -> Result<Option<String>>;
}

/// Chat-completion client for the OpenAI API.
pub struct OpenAiChatClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl OpenAiChatClient {
    /// The key is optional on purpose: a missing key is surfaced at call
    /// time as a credential error rather than as a startup failure, so the
    /// rest of the application can still run and tell the user what to fix.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatClient {
    async fn complete(&self, instructions: &str, history: &[Turn]) -> Result<Option<String>> {
        // Error text mentions "API key" so callers can distinguish a
        // credential problem from a transport one.
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("missing OpenAI API key: set OPENAI_API_KEY"))?;

        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": instructions,
        })];
        for turn in history {
            messages.push(serde_json::to_value(turn)?);
        }

        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let resp = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("Chat completion request failed")?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            bail!("chat completion rejected: invalid API key (HTTP 401)");
        }
        if !status.is_success() {
            bail!("chat completion returned HTTP {status}");
        }

        let parsed = resp
            .json::<LlmResponse>()
            .await
            .context("Failed to decode chat completion response")?;

        tracing::debug!(choices = parsed.choices.len(), "chat completion received");
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::SYSTEM_INSTRUCTIONS;
    use std::env;

    #[tokio::test]
    async fn test_missing_key_error_mentions_api_key() {
        let client = OpenAiChatClient::new(None, DEFAULT_CHAT_MODEL);
        let err = client
            .complete(SYSTEM_INSTRUCTIONS, &[])
            .await
            .expect_err("a keyless client must not succeed");
        assert!(
            format!("{err:#}").contains("API key"),
            "credential errors must be recognizable by their text: {err:#}"
        );
    }

    #[tokio::test]
    async fn test_empty_response_body_yields_no_content() {
        let parsed: LlmResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(parsed.choices.is_empty());

        let parsed: LlmResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    // This is an integration test that makes a live call to the OpenAI API.
    // It is ignored by default so `cargo test` runs without a live API key.
    // To run it, use `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_live_completion_produces_a_reply() {
        dotenvy::dotenv_override().ok();
        let api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
        let client = OpenAiChatClient::new(Some(api_key), DEFAULT_CHAT_MODEL);

        let history = vec![Turn::user("Yesterday I go to the park.")];
        let reply = client
            .complete(SYSTEM_INSTRUCTIONS, &history)
            .await
            .expect("live completion should succeed");

        let reply = reply.expect("live completion should carry content");
        println!("Tutor replied: {reply}");
        assert!(!reply.trim().is_empty());
    }
}
