use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::{remind, sticker, tasks, Command};
use crate::bot::handlers::BotHandler;
use crate::bot::HandlerResult;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    deps: BotHandler,
) -> HandlerResult {
    match cmd {
        Command::Start => {
            bot.send_message(
                msg.chat.id,
                "Well, what now? Send /add <task>, /remind <HH:MM> <text> or /sticker <prompt>.\n\
                 /help lists everything I put up with.",
            )
            .await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Add(text) => {
            tasks::handle_add(bot, msg, text, &deps.db).await?;
        }
        Command::Tasks => {
            tasks::handle_tasks(bot, msg, &deps.db).await?;
        }
        Command::Done(arg) => {
            tasks::handle_done(bot, msg, arg, &deps.db).await?;
        }
        Command::Remind(args) => {
            remind::handle_remind(bot, msg, args, &deps.reminders).await?;
        }
        Command::Sticker(prompt) => {
            sticker::handle_sticker(bot, msg, prompt, &deps.stickers).await?;
        }
    }
    Ok(())
}
