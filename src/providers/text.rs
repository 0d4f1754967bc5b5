use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::BotError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Bound on a single text-generation round trip.
const TEXT_TIMEOUT: Duration = Duration::from_secs(30);

/// A synchronous call-and-reply text-generation contract. The persona
/// instruction and the user's text travel together; the reply comes back
/// as plain text.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(&self, system_instruction: &str, user_text: &str)
        -> Result<String, BotError>;
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl TextProvider for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<String, BotError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = json!({
            "contents": [{
                "parts": [{ "text": format!("{system_instruction}\nThe student says: {user_text}") }]
            }]
        });

        let resp = self
            .http
            .post(&url)
            .timeout(TEXT_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::ProviderFailure(format!("request failed: {e}")))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(BotError::RateLimited);
        }

        let body_text = resp
            .text()
            .await
            .map_err(|e| BotError::ProviderFailure(format!("read response failed: {e}")))?;

        if !status.is_success() {
            return Err(BotError::ProviderFailure(format!(
                "http {}: {}",
                status.as_u16(),
                body_text
            )));
        }

        debug!("text provider raw response: {}", body_text);
        extract_reply(&body_text)
    }
}

/// Pulls the merged `candidates[0].content.parts[*].text` out of a
/// `generateContent` response body.
fn extract_reply(body_text: &str) -> Result<String, BotError> {
    let value: Value = serde_json::from_str(body_text)
        .map_err(|e| BotError::ProviderFailure(format!("parse response failed: {e}")))?;

    value
        .get("candidates")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|v| v.as_array())
        .and_then(|parts| {
            let mut merged = String::new();
            for p in parts {
                if let Some(t) = p.get("text").and_then(|v| v.as_str()) {
                    merged.push_str(t);
                }
            }
            if merged.is_empty() {
                None
            } else {
                Some(merged)
            }
        })
        .ok_or_else(|| {
            BotError::ProviderFailure("missing candidates[0].content.parts[*].text".to_string())
        })
}
