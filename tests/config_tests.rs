#![allow(clippy::unwrap_used)]

use nudnik_bot::config::{Config, ImageBackend};
use std::collections::HashMap;

fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    let map: HashMap<&str, &str> = vars.iter().copied().collect();
    move |key| map.get(key).map(|v| (*v).to_string())
}

#[test]
fn test_minimal_config_defaults() {
    let config = Config::from_lookup(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "tg-token"),
        ("GEMINI_API_KEY", "gm-key"),
    ]))
    .unwrap();

    assert_eq!(config.telegram_bot_token, "tg-token");
    assert_eq!(config.gemini_api_key, "gm-key");
    assert_eq!(config.database_url, "sqlite:./data/nudnik.db");
    assert_eq!(config.http_port, 3000);
    // Without a Hugging Face credential the credential-free backend wins.
    assert_eq!(config.image_backend, ImageBackend::Pollinations);
    assert!(config.hf_token.is_none());
}

#[test]
fn test_missing_telegram_token_is_fatal() {
    let result = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "gm-key")]));
    assert!(result.is_err());

    let result = Config::from_lookup(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "   "),
        ("GEMINI_API_KEY", "gm-key"),
    ]));
    assert!(result.is_err());
}

#[test]
fn test_missing_gemini_key_is_fatal() {
    let result = Config::from_lookup(lookup(&[("TELEGRAM_BOT_TOKEN", "tg-token")]));
    assert!(result.is_err());
}

#[test]
fn test_hf_token_selects_the_direct_backend_by_default() {
    let config = Config::from_lookup(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "tg-token"),
        ("GEMINI_API_KEY", "gm-key"),
        ("HF_TOKEN", "hf-token"),
    ]))
    .unwrap();

    assert_eq!(config.image_backend, ImageBackend::HuggingFace);
    assert_eq!(config.hf_token.as_deref(), Some("hf-token"));
}

#[test]
fn test_explicit_backend_selection() {
    let config = Config::from_lookup(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "tg-token"),
        ("GEMINI_API_KEY", "gm-key"),
        ("HF_TOKEN", "hf-token"),
        ("IMAGE_PROVIDER", "pollinations"),
    ]))
    .unwrap();

    assert_eq!(config.image_backend, ImageBackend::Pollinations);
}

#[test]
fn test_direct_backend_without_credential_is_fatal() {
    let result = Config::from_lookup(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "tg-token"),
        ("GEMINI_API_KEY", "gm-key"),
        ("IMAGE_PROVIDER", "huggingface"),
    ]));
    assert!(result.is_err());
}

#[test]
fn test_unknown_backend_is_fatal() {
    let result = Config::from_lookup(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "tg-token"),
        ("GEMINI_API_KEY", "gm-key"),
        ("IMAGE_PROVIDER", "dall-e"),
    ]));
    assert!(result.is_err());
}

#[test]
fn test_overridden_database_and_port() {
    let config = Config::from_lookup(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "tg-token"),
        ("GEMINI_API_KEY", "gm-key"),
        ("DATABASE_URL", "sqlite:/tmp/other.db"),
        ("HTTP_PORT", "8080"),
    ]))
    .unwrap();

    assert_eq!(config.database_url, "sqlite:/tmp/other.db");
    assert_eq!(config.http_port, 8080);
}

#[test]
fn test_invalid_port_is_fatal() {
    let result = Config::from_lookup(lookup(&[
        ("TELEGRAM_BOT_TOKEN", "tg-token"),
        ("GEMINI_API_KEY", "gm-key"),
        ("HTTP_PORT", "not-a-port"),
    ]));
    assert!(result.is_err());
}
