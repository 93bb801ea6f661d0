//! Telegram Bot API wire types.
//!
//! Only the fields the bot actually reads are modeled; everything else in
//! the payloads is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// One element of a `getUpdates` response.
///
/// Exactly one of the optional payloads is set per update; updates of kinds
/// this bot never subscribes to deserialize with both fields empty.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// An incoming chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The Telegram account that sent a message or pressed a button.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// The message the pressed keyboard was attached to. Absent when the
    /// message is too old for the server to return.
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

/// A one-shot reply keyboard shown under the text input.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<String>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

impl ReplyKeyboardMarkup {
    /// Builds the markup Telegram expects from a row-by-row label grid.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            keyboard: rows,
            resize_keyboard: true,
            one_time_keyboard: true,
        }
    }
}

/// An inline keyboard attached below a message.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// One inline button that fires a callback query when pressed.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}
