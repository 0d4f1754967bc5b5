pub mod chat;
pub mod health;
pub mod reminder;
pub mod sticker;
