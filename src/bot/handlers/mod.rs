pub mod message;

use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::{dptree, prelude::*};

use crate::bot::commands::{chat, Command};
use crate::database::connection::DatabaseManager;
use crate::services::chat::ChatService;
use crate::services::reminder::ReminderQueue;
use crate::services::sticker::StickerService;

/// Everything a handler can reach: the task store, the relays and the
/// reminder queue. Constructed once at startup and cloned into the
/// dispatcher branches.
#[derive(Clone)]
pub struct BotHandler {
    pub db: DatabaseManager,
    pub chat: Arc<ChatService>,
    pub stickers: Arc<StickerService>,
    pub reminders: Arc<ReminderQueue>,
}

impl BotHandler {
    pub fn new(
        db: DatabaseManager,
        chat: Arc<ChatService>,
        stickers: Arc<StickerService>,
        reminders: Arc<ReminderQueue>,
    ) -> Self {
        Self {
            db,
            chat,
            stickers,
            reminders,
        }
    }

    /// Exactly one branch runs per inbound message: a recognized command
    /// goes to its handler, everything else to the conversational relay.
    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let command_deps = self.clone();
        let chat_deps = self.clone();

        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let deps = command_deps.clone();
                        async move { message::command_handler(bot, msg, cmd, deps).await }
                    }),
            )
            .branch(dptree::endpoint(move |bot: Bot, msg: Message| {
                let deps = chat_deps.clone();
                async move { chat::handle_chat(bot, msg, &deps.chat).await }
            }))
    }
}
