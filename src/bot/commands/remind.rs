use chrono::Utc;
use teloxide::prelude::*;

use crate::bot::HandlerResult;
use crate::error::BotError;
use crate::services::reminder::ReminderQueue;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_start, log_command_success};
use crate::utils::validation::split_remind_args;

pub async fn handle_remind(
    bot: Bot,
    msg: Message,
    args: String,
    reminders: &ReminderQueue,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let user = msg
        .from()
        .and_then(|u| u.username.as_ref())
        .map_or("unknown", |v| v);
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(chat_id.0);
    log_command_start("remind", user, user_id, chat_id.0);

    let feedback = CommandFeedback::new(bot, chat_id);

    let (time_of_day, text) = match split_remind_args(&args) {
        Ok(parts) => parts,
        Err(e) => {
            feedback
                .validation_error(e.user_message(), "Use /remind HH:MM <text>, e.g. /remind 23:59 sleep")
                .await?;
            return Ok(());
        }
    };

    match reminders.schedule(chat_id.0, time_of_day, text, Utc::now()) {
        Ok(id) => {
            log_command_success("remind", user, user_id, chat_id.0, Some(&format!("job {id}")));
            feedback
                .success(&format!("Fine, I will nag you at {}.", time_of_day.trim()))
                .await?;
        }
        Err(e @ BotError::PastTime) => {
            feedback.error(e.user_message()).await?;
        }
        Err(e) => {
            feedback
                .validation_error(e.user_message(), "Use /remind HH:MM <text>, e.g. /remind 23:59 sleep")
                .await?;
        }
    }

    Ok(())
}
