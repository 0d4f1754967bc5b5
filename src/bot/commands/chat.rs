use teloxide::prelude::*;

use crate::bot::HandlerResult;
use crate::services::chat::ChatService;

/// Conversational fallback for every message that is not a recognized
/// command, including unknown `/foo` attempts.
pub async fn handle_chat(bot: Bot, msg: Message, chat: &ChatService) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let reply = chat.converse(text).await;
    bot.send_message(msg.chat.id, reply)
        .reply_to_message_id(msg.id)
        .await?;

    Ok(())
}
