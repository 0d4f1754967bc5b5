use anyhow::{anyhow, Result};
use std::env;

/// Which image-generation backend serves `/sticker` requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBackend {
    /// Direct model endpoint, needs a bearer credential (`HF_TOKEN`).
    HuggingFace,
    /// Public templated-URL endpoint, no credential.
    Pollinations,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub gemini_api_key: String,
    pub hf_token: Option<String>,
    pub image_backend: ImageBackend,
    pub database_url: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup so tests
    /// do not have to mutate the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = required(&get, "TELEGRAM_BOT_TOKEN")?;
        let gemini_api_key = required(&get, "GEMINI_API_KEY")?;

        let hf_token = get("HF_TOKEN").filter(|t| !t.trim().is_empty());

        let image_backend = match get("IMAGE_PROVIDER").as_deref().map(str::trim) {
            None | Some("") => {
                if hf_token.is_some() {
                    ImageBackend::HuggingFace
                } else {
                    ImageBackend::Pollinations
                }
            }
            Some("huggingface") => ImageBackend::HuggingFace,
            Some("pollinations") => ImageBackend::Pollinations,
            Some(other) => return Err(anyhow!("Unknown IMAGE_PROVIDER '{}'", other)),
        };

        if image_backend == ImageBackend::HuggingFace && hf_token.is_none() {
            return Err(anyhow!("HF_TOKEN must be set when IMAGE_PROVIDER=huggingface"));
        }

        let database_url = get("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| "sqlite:./data/nudnik.db".to_string());

        let port_str = get("HTTP_PORT").unwrap_or_else(|| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            telegram_bot_token,
            gemini_api_key,
            hf_token,
            image_backend,
            database_url,
            http_port,
        })
    }
}

fn required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("{} must be set", key))
}
