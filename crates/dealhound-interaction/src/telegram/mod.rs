//! Telegram Bot API transport module.
//!
//! # Module Structure
//!
//! - `types`: wire payload types (updates, messages, keyboards)
//! - `client`: the HTTP client (long-polling plus send operations)
//!
//! # Usage
//!
//! ```ignore
//! use dealhound_interaction::telegram::{TelegramClient, escape_markdown};
//!
//! let client = TelegramClient::try_from_env()?;
//! let updates = client.get_updates(None).await?;
//! ```

mod client;
mod types;

// Re-export public API
pub use client::{TelegramClient, escape_markdown};
pub use types::{
    CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, ReplyKeyboardMarkup,
    Update, User,
};
