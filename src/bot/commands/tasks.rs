use teloxide::prelude::*;

use crate::bot::HandlerResult;
use crate::database::{connection::DatabaseManager, models::Task};
use crate::error::BotError;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};
use crate::utils::validation::parse_task_id;

fn sender_id(msg: &Message) -> i64 {
    msg.from()
        .map(|u| u.id.0 as i64)
        .unwrap_or_else(|| msg.chat.id.0)
}

fn sender_name(msg: &Message) -> &str {
    msg.from()
        .and_then(|u| u.username.as_ref())
        .map_or("unknown", |v| v)
}

pub async fn handle_add(bot: Bot, msg: Message, text: String, db: &DatabaseManager) -> HandlerResult {
    let owner = sender_id(&msg);
    let chat_id = msg.chat.id;
    log_command_start("add", sender_name(&msg), owner, chat_id.0);

    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    match Task::create(&db.pool, owner, &text).await {
        // Whitespace-only input: no record, no reply.
        Ok(None) => {}
        Ok(Some(task)) => {
            log_command_success("add", sender_name(&msg), owner, chat_id.0, Some(&format!("task {}", task.id)));
            bot.send_message(
                chat_id,
                format!("Noted: '{}'. Now get to work.", task.description),
            )
            .await?;
        }
        Err(e) => {
            log_command_error("add", sender_name(&msg), owner, chat_id.0, &e.to_string());
            feedback.error(BotError::from(e).user_message()).await?;
        }
    }

    Ok(())
}

pub async fn handle_tasks(bot: Bot, msg: Message, db: &DatabaseManager) -> HandlerResult {
    let owner = sender_id(&msg);
    let chat_id = msg.chat.id;
    log_command_start("tasks", sender_name(&msg), owner, chat_id.0);

    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    match Task::find_by_owner(&db.pool, owner).await {
        Ok(tasks) if tasks.is_empty() => {
            feedback.info("No tasks. Suspicious.").await?;
        }
        Ok(tasks) => {
            let mut text = String::from("Tasks you will probably ignore anyway:\n");
            for task in &tasks {
                text.push_str(&format!("{}. {}\n", task.id, task.description));
            }
            bot.send_message(chat_id, text).await?;
        }
        Err(e) => {
            log_command_error("tasks", sender_name(&msg), owner, chat_id.0, &e.to_string());
            feedback.error(BotError::from(e).user_message()).await?;
        }
    }

    Ok(())
}

pub async fn handle_done(bot: Bot, msg: Message, arg: String, db: &DatabaseManager) -> HandlerResult {
    let owner = sender_id(&msg);
    let chat_id = msg.chat.id;
    log_command_start("done", sender_name(&msg), owner, chat_id.0);

    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    let id = match parse_task_id(&arg) {
        Ok(id) => id,
        Err(e) => {
            feedback.error(e.user_message()).await?;
            return Ok(());
        }
    };

    match Task::delete_for_owner(&db.pool, owner, id).await {
        Ok(removed) => {
            if !removed {
                tracing::debug!("done: task {} not found for user {}", id, owner);
            }
            // Deletion is always confirmed, whether or not a row matched.
            bot.send_message(chat_id, format!("Deleted {id}. One less excuse."))
                .await?;
        }
        Err(e) => {
            log_command_error("done", sender_name(&msg), owner, chat_id.0, &e.to_string());
            feedback.error(BotError::from(e).user_message()).await?;
        }
    }

    Ok(())
}
