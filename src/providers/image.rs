use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, ImageBackend};
use crate::error::BotError;

const HUGGINGFACE_ENDPOINT: &str =
    "https://router.huggingface.co/hf-inference/models/black-forest-labs/FLUX.1-schnell";
const POLLINATIONS_ENDPOINT: &str = "https://image.pollinations.ai/prompt";

/// Bound on a single image-generation round trip.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// One pluggable image-generation contract. The backend is selected by
/// configuration; callers never know which one they got.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate_image(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
        seed: u32,
    ) -> Result<Vec<u8>, BotError>;

    fn name(&self) -> &'static str;
}

/// Builds the configured backend. `Config` validation guarantees the
/// bearer credential is present when the direct-model backend is selected.
pub fn from_config(config: &Config) -> Arc<dyn ImageProvider> {
    match config.image_backend {
        ImageBackend::HuggingFace => Arc::new(HuggingFaceProvider::new(
            config.hf_token.clone().unwrap_or_default(),
        )),
        ImageBackend::Pollinations => Arc::new(PollinationsProvider::new()),
    }
}

/// Direct model endpoint: POST with a bearer credential and a JSON body.
pub struct HuggingFaceProvider {
    http: reqwest::Client,
    token: String,
    endpoint: String,
}

impl HuggingFaceProvider {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            endpoint: HUGGINGFACE_ENDPOINT.to_string(),
        }
    }
}

#[async_trait]
impl ImageProvider for HuggingFaceProvider {
    async fn generate_image(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
        seed: u32,
    ) -> Result<Vec<u8>, BotError> {
        let body = json!({
            "inputs": prompt,
            "parameters": { "width": width, "height": height, "seed": seed }
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .timeout(IMAGE_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::ProviderFailure(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(BotError::ProviderFailure(format!(
                "http {}: {}",
                status.as_u16(),
                detail
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| BotError::ProviderFailure(format!("read image failed: {e}")))?;

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}

/// Public templated-URL endpoint: GET with the prompt as a path segment
/// and width/height/seed query parameters. No credential.
pub struct PollinationsProvider {
    http: reqwest::Client,
    endpoint: String,
}

impl PollinationsProvider {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: POLLINATIONS_ENDPOINT.to_string(),
        }
    }
}

impl Default for PollinationsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for PollinationsProvider {
    async fn generate_image(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
        seed: u32,
    ) -> Result<Vec<u8>, BotError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| BotError::ProviderFailure(format!("bad endpoint: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| BotError::ProviderFailure("bad endpoint: cannot-be-a-base".to_string()))?
            .push(prompt);

        url.query_pairs_mut()
            .append_pair("width", &width.to_string())
            .append_pair("height", &height.to_string())
            .append_pair("seed", &seed.to_string())
            .append_pair("nologo", "true");

        let resp = self
            .http
            .get(url)
            .timeout(IMAGE_TIMEOUT)
            .send()
            .await
            .map_err(|e| BotError::ProviderFailure(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BotError::ProviderFailure(format!(
                "http {}",
                status.as_u16()
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| BotError::ProviderFailure(format!("read image failed: {e}")))?;

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "pollinations"
    }
}
