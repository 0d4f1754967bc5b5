pub mod chat;
pub mod remind;
pub mod sticker;
pub mod tasks;

use teloxide::utils::command::BotCommands;

/// The recognized command tokens. Anything that does not parse as one of
/// these falls through to the conversational relay with its full text.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "The Nudnik understands these commands:")]
pub enum Command {
    #[command(description = "wake the bot up")]
    Start,
    #[command(description = "display this help message")]
    Help,
    #[command(description = "add a task: /add <text>")]
    Add(String),
    #[command(description = "list your open tasks")]
    Tasks,
    #[command(description = "cross a task off: /done <id>")]
    Done(String),
    #[command(description = "one-shot reminder: /remind <HH:MM> <text>")]
    Remind(String),
    #[command(description = "draw a die-cut sticker: /sticker <prompt>")]
    Sticker(String),
}
