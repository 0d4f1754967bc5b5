use std::sync::Arc;

use crate::error::BotError;
use crate::providers::TextProvider;

/// The fixed persona sent with every conversational request.
pub const PERSONA: &str = "You are 'The Nudnik', a cheeky bot that helps students. \
Reply in short, cynical, funny sentences.";

/// Fixed reply when the provider reports an exhausted quota.
pub const QUOTA_REPLY: &str =
    "You talked my quota away. Google cut me off, wait a minute and try again.";

/// Fixed reply for every other provider failure. Raw detail goes to the
/// log, never to the chat.
pub const BREAKDOWN_REPLY: &str = "Even my AI crashed reading that. Try again later.";

/// Relays free-form user text to the text-generation provider under the
/// fixed persona.
pub struct ChatService {
    provider: Arc<dyn TextProvider>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Never fails: provider errors are mapped to fixed replies at this
    /// boundary.
    pub async fn converse(&self, user_text: &str) -> String {
        match self.provider.generate(PERSONA, user_text).await {
            Ok(reply) => reply,
            Err(BotError::RateLimited) => {
                tracing::warn!("text provider rate limited");
                QUOTA_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!("text provider failure: {}", e);
                BREAKDOWN_REPLY.to_string()
            }
        }
    }
}
