use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use std::io::Cursor;
use std::sync::Arc;

use crate::error::BotError;
use crate::providers::ImageProvider;

/// Telegram sticker edge length.
pub const STICKER_SIZE: u32 = 512;

const STYLE_TEMPLATE: &str = "isolated on white background, thick white border, \
die-cut sticker, flat vector illustration";

/// Biases the image generator toward a sticker-appropriate result.
pub fn styled_prompt(prompt: &str) -> String {
    format!("Professional sticker of {}, {}", prompt.trim(), STYLE_TEMPLATE)
}

/// Turns drawing prompts into 512x512 WEBP sticker payloads via the
/// configured image backend.
pub struct StickerService {
    provider: Arc<dyn ImageProvider>,
}

impl StickerService {
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    /// Rejects an empty prompt before any provider call. Each request gets
    /// a fresh random seed so identical prompts do not return identical
    /// cached images. No retry on failure.
    pub async fn render(&self, prompt: &str) -> Result<Vec<u8>, BotError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(BotError::InvalidFormat("empty sticker prompt".to_string()));
        }

        let seed = rand::random::<u32>();
        let raw = self
            .provider
            .generate_image(&styled_prompt(prompt), STICKER_SIZE, STICKER_SIZE, seed)
            .await?;

        tracing::debug!(
            "sticker image received from {} ({} bytes, seed {})",
            self.provider.name(),
            raw.len(),
            seed
        );

        encode_sticker(&raw)
    }
}

/// Decodes whatever the provider returned, resizes to exactly 512x512 with
/// Lanczos3 and re-encodes as WEBP.
pub fn encode_sticker(raw: &[u8]) -> Result<Vec<u8>, BotError> {
    let decoded = image::load_from_memory(raw)
        .map_err(|e| BotError::ProviderFailure(format!("image decode failed: {e}")))?;

    let resized = decoded
        .resize_exact(STICKER_SIZE, STICKER_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    let mut out = Cursor::new(Vec::new());
    resized
        .write_with_encoder(WebPEncoder::new_lossless(&mut out))
        .map_err(|e| BotError::ProviderFailure(format!("webp encode failed: {e}")))?;

    Ok(out.into_inner())
}
