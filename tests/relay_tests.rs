#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use nudnik_bot::error::BotError;
use nudnik_bot::providers::{ImageProvider, TextProvider};
use nudnik_bot::services::chat::{ChatService, BREAKDOWN_REPLY, PERSONA, QUOTA_REPLY};
use nudnik_bot::services::sticker::{encode_sticker, styled_prompt, StickerService, STICKER_SIZE};

// --- Conversation relay ---

enum TextMode {
    Echo,
    RateLimited,
    Broken,
}

struct FakeTextProvider {
    mode: TextMode,
    last_instruction: Mutex<Option<String>>,
}

impl FakeTextProvider {
    fn new(mode: TextMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            last_instruction: Mutex::new(None),
        })
    }
}

#[async_trait]
impl TextProvider for FakeTextProvider {
    async fn generate(
        &self,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<String, BotError> {
        *self.last_instruction.lock().unwrap() = Some(system_instruction.to_string());
        match self.mode {
            TextMode::Echo => Ok(format!("echo: {user_text}")),
            TextMode::RateLimited => Err(BotError::RateLimited),
            TextMode::Broken => Err(BotError::ProviderFailure(
                "http 500: internal stack trace".to_string(),
            )),
        }
    }
}

#[tokio::test]
async fn test_converse_relays_the_provider_reply() {
    let provider = FakeTextProvider::new(TextMode::Echo);
    let chat = ChatService::new(provider.clone());

    let reply = chat.converse("why is rust hard").await;
    assert_eq!(reply, "echo: why is rust hard");

    // The fixed persona travels with every request.
    let instruction = provider.last_instruction.lock().unwrap().clone().unwrap();
    assert_eq!(instruction, PERSONA);
}

#[tokio::test]
async fn test_converse_maps_rate_limit_to_the_fixed_quota_reply() {
    let chat = ChatService::new(FakeTextProvider::new(TextMode::RateLimited));
    assert_eq!(chat.converse("hello").await, QUOTA_REPLY);
}

#[tokio::test]
async fn test_converse_never_leaks_provider_detail() {
    let chat = ChatService::new(FakeTextProvider::new(TextMode::Broken));
    let reply = chat.converse("hello").await;
    assert_eq!(reply, BREAKDOWN_REPLY);
    assert!(!reply.contains("stack trace"));
}

// --- Sticker relay ---

struct RecordingImageProvider {
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    response: Vec<u8>,
}

impl RecordingImageProvider {
    fn new(response: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            response,
        })
    }
}

#[async_trait]
impl ImageProvider for RecordingImageProvider {
    async fn generate_image(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
        _seed: u32,
    ) -> Result<Vec<u8>, BotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        assert_eq!((width, height), (STICKER_SIZE, STICKER_SIZE));
        Ok(self.response.clone())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

#[tokio::test]
async fn test_render_produces_a_512x512_webp_sticker() {
    let provider = RecordingImageProvider::new(png_fixture(64, 32));
    let service = StickerService::new(provider.clone());

    let webp = service.render("a crab writing rust").await.unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    let sticker = image::load_from_memory(&webp).unwrap();
    assert_eq!((sticker.width(), sticker.height()), (STICKER_SIZE, STICKER_SIZE));
}

#[tokio::test]
async fn test_render_augments_the_prompt_with_the_style_template() {
    let provider = RecordingImageProvider::new(png_fixture(16, 16));
    let service = StickerService::new(provider.clone());

    service.render("  a tired student  ").await.unwrap();

    let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("a tired student"));
    assert!(prompt.contains("die-cut sticker"));
    assert!(prompt.contains("isolated on white background"));
    assert!(prompt.contains("flat vector illustration"));
}

#[tokio::test]
async fn test_render_rejects_an_empty_prompt_without_calling_the_provider() {
    let provider = RecordingImageProvider::new(png_fixture(16, 16));
    let service = StickerService::new(provider.clone());

    let result = service.render("   ").await;
    assert!(matches!(result, Err(BotError::InvalidFormat(_))));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_render_maps_undecodable_payloads_to_provider_failure() {
    let provider = RecordingImageProvider::new(b"this is not an image".to_vec());
    let service = StickerService::new(provider);

    let result = service.render("a crab").await;
    assert!(matches!(result, Err(BotError::ProviderFailure(_))));
}

#[test]
fn test_styled_prompt_wraps_the_subject() {
    let prompt = styled_prompt("a grumpy cat");
    assert!(prompt.starts_with("Professional sticker of a grumpy cat"));
    assert!(prompt.ends_with("flat vector illustration"));
}

#[test]
fn test_encode_sticker_resizes_any_input() {
    let webp = encode_sticker(&png_fixture(300, 100)).unwrap();
    let sticker = image::load_from_memory(&webp).unwrap();
    assert_eq!((sticker.width(), sticker.height()), (STICKER_SIZE, STICKER_SIZE));
}

#[test]
fn test_encode_sticker_rejects_garbage() {
    assert!(matches!(
        encode_sticker(b"garbage bytes"),
        Err(BotError::ProviderFailure(_))
    ));
}
