use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::bot::HandlerResult;
use crate::services::sticker::StickerService;
use crate::utils::feedback::{CommandFeedback, FeedbackType};
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

pub async fn handle_sticker(
    bot: Bot,
    msg: Message,
    prompt: String,
    stickers: &StickerService,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let user = msg
        .from()
        .and_then(|u| u.username.as_ref())
        .map_or("unknown", |v| v);
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(chat_id.0);
    log_command_start("sticker", user, user_id, chat_id.0);

    // Reject before any progress message or provider call.
    if prompt.trim().is_empty() {
        bot.send_message(chat_id, "What should I draw? I cannot read minds.")
            .await?;
        return Ok(());
    }

    let feedback = CommandFeedback::new(bot.clone(), chat_id);
    let progress = feedback.send_processing("Pressing your sticker... hang on.").await?;

    match stickers.render(&prompt).await {
        Ok(webp) => {
            bot.send_sticker(chat_id, InputFile::memory(webp)).await?;
            bot.delete_message(chat_id, progress.id).await?;
            log_command_success("sticker", user, user_id, chat_id.0, None);
        }
        Err(e) => {
            log_command_error("sticker", user, user_id, chat_id.0, &e.to_string());
            feedback
                .update_message(progress.id, FeedbackType::Error, e.user_message())
                .await?;
        }
    }

    Ok(())
}
