//! Telegram Bot API client.
//!
//! Long-polls `getUpdates` with an offset cursor and exposes the three send
//! operations the bot needs: plain replies (optionally with a reply
//! keyboard), the photo confirmation card, and callback acknowledgements.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dealhound_core::command::BotCommand;
use dealhound_core::price::display_price;
use dealhound_core::session::Reply;
use dealhound_core::transport::{
    CALLBACK_CANCEL_SEARCH, CALLBACK_CONFIRM, ChatTransport, ConfirmationCard,
};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::env;

use super::types::{InlineKeyboardButton, InlineKeyboardMarkup, ReplyKeyboardMarkup, Update};

const BASE_URL: &str = "https://api.telegram.org";
const LONG_POLL_TIMEOUT_SECS: u64 = 30;

/// Characters the MarkdownV2 dialect reserves.
const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes reserved MarkdownV2 characters with a backslash.
///
/// Interpolated values (product titles, prices) must pass through here
/// before being embedded in a MarkdownV2 caption, or the send is rejected.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_V2_RESERVED.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// HTTP client for the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    token: String,
    base_url: String,
}

impl TelegramClient {
    /// Creates a new client with the provided bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads the bot token from the `TELEGRAM_BOT_TOKEN` environment variable.
    pub fn try_from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN not found in environment variables"))?;
        Ok(Self::new(token))
    }

    /// Overrides the API endpoint, mainly for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &serde_json::Value) -> Result<T> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;

        let parsed: ApiResponse<T> = response.json().await?;
        if !parsed.ok {
            let description = parsed
                .description
                .unwrap_or_else(|| "no description".to_string());
            return Err(anyhow!("Telegram {method} failed: {description}"));
        }
        parsed
            .result
            .ok_or_else(|| anyhow!("Telegram {method} returned ok without a result"))
    }

    /// Fetches the next batch of updates, long-polling for up to 30 seconds.
    ///
    /// # Arguments
    ///
    /// * `offset` - One past the highest update id already handled; `None` on
    ///   the first poll.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let mut body = json!({
            "timeout": LONG_POLL_TIMEOUT_SECS,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        self.call("getUpdates", &body).await
    }

    /// Sends one outgoing reply to a chat, mapping the domain-level reply
    /// keyboard to Telegram's one-shot markup.
    pub async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": reply.text,
        });
        if reply.markdown {
            body["parse_mode"] = json!("Markdown");
        }
        if let Some(keyboard) = &reply.keyboard {
            let markup = ReplyKeyboardMarkup::from_rows(keyboard.rows.clone());
            body["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call::<serde_json::Value>("sendMessage", &body).await?;
        Ok(())
    }

    /// Convenience wrapper for a bare text message with no keyboard.
    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_reply(chat_id, &Reply::plain(text)).await
    }

    /// Acknowledges a callback query so the client stops the button spinner.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<()> {
        let body = json!({ "callback_query_id": callback_query_id });
        self.call::<bool>("answerCallbackQuery", &body).await?;
        Ok(())
    }

    /// Publishes the command menu shown in the chat client's `/` picker.
    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<()> {
        let entries: Vec<serde_json::Value> = commands
            .iter()
            .map(|command| json!({ "command": command.name, "description": command.description }))
            .collect();
        let body = json!({ "commands": entries });
        self.call::<bool>("setMyCommands", &body).await?;
        Ok(())
    }
}

/// Renders the confirmation card caption in MarkdownV2.
fn card_caption(card: &ConfirmationCard) -> String {
    format!(
        "🛒 *Product:* {}\n\
         💰 *Current Price:* {}\n\n\
         ✅ *I'll use these details to track this item\\.*\n\
         ❌ *If this is NOT the product you meant, click below or type* `/cancel` *to stop\\.*",
        escape_markdown(&card.title),
        escape_markdown(&display_price(card.price)),
    )
}

fn card_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![vec![
            InlineKeyboardButton::new("✅ Confirm", CALLBACK_CONFIRM),
            InlineKeyboardButton::new("❌ Cancel Search", CALLBACK_CANCEL_SEARCH),
        ]],
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        TelegramClient::send_reply(self, chat_id, reply).await
    }

    /// Sends the confirmation card as a photo message with a MarkdownV2
    /// caption and an inline keyboard. When the item carries no image, or
    /// Telegram rejects the photo send, the same caption and keyboard go
    /// out as a plain message instead; the caller never sees the downgrade.
    async fn send_card(&self, chat_id: i64, card: &ConfirmationCard) -> Result<()> {
        let caption = card_caption(card);
        let markup = serde_json::to_value(card_keyboard())?;

        if let Some(image_url) = &card.image_url {
            let body = json!({
                "chat_id": chat_id,
                "photo": image_url,
                "caption": caption,
                "parse_mode": "MarkdownV2",
                "reply_markup": markup,
            });
            match self.call::<serde_json::Value>("sendPhoto", &body).await {
                Ok(_) => return Ok(()),
                Err(err) => {
                    tracing::warn!(target: "bot", error = %err, "photo send rejected, falling back to text card");
                }
            }
        }

        let body = json!({
            "chat_id": chat_id,
            "text": caption,
            "parse_mode": "MarkdownV2",
            "reply_markup": markup,
        });
        self.call::<serde_json::Value>("sendMessage", &body).await?;
        Ok(())
    }

    async fn ack_callback(&self, callback_id: &str) -> Result<()> {
        self.answer_callback_query(callback_id).await
    }
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_reserved_markdown_character() {
        let escaped = escape_markdown("Apple iPhone 14 Pro Max (256GB) - $1,399.99!");
        assert_eq!(escaped, "Apple iPhone 14 Pro Max \\(256GB\\) \\- $1,399\\.99\\!");
    }

    #[test]
    fn leaves_unreserved_text_untouched() {
        assert_eq!(escape_markdown("Sony WH 1000XM5"), "Sony WH 1000XM5");
    }

    #[test]
    fn method_url_embeds_the_token() {
        let client = TelegramClient::new("12345:TESTTOKEN").with_base_url("http://localhost:8081");
        assert_eq!(
            client.method_url("getUpdates"),
            "http://localhost:8081/bot12345:TESTTOKEN/getUpdates"
        );
    }

    #[test]
    fn error_responses_carry_the_description() {
        let json = r#"{"ok": false, "error_code": 400, "description": "Bad Request: wrong file identifier"}"#;
        let parsed: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!parsed.ok);
        assert_eq!(
            parsed.description.as_deref(),
            Some("Bad Request: wrong file identifier")
        );
    }

    #[test]
    fn update_batches_deserialize_from_the_result_field() {
        let json = r#"{
            "ok": true,
            "result": [
                {"update_id": 1, "message": {"message_id": 9, "chat": {"id": 7, "type": "private"}, "date": 0, "text": "hi"}}
            ]
        }"#;
        let parsed: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        let updates = parsed.result.unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].message.as_ref().unwrap().text.as_deref(), Some("hi"));
    }

    #[test]
    fn card_caption_escapes_title_and_price() {
        let card = ConfirmationCard {
            title: "Apple iPhone 14 Pro Max (256GB) - Space Black".to_string(),
            price: Some(1399.99),
            image_url: None,
        };
        let caption = card_caption(&card);
        assert!(
            caption.starts_with("🛒 *Product:* Apple iPhone 14 Pro Max \\(256GB\\) \\- Space Black\n")
        );
        assert!(caption.contains("💰 *Current Price:* $1399\\.99\n"));
        assert!(caption.ends_with("`/cancel` *to stop\\.*"));
    }

    #[test]
    fn card_caption_shows_missing_prices_as_not_available() {
        let card = ConfirmationCard {
            title: "mystery listing".to_string(),
            price: None,
            image_url: None,
        };
        assert!(card_caption(&card).contains("💰 *Current Price:* N/A\n"));
    }

    #[test]
    fn card_keyboard_wires_the_two_callbacks() {
        let keyboard = card_keyboard();
        assert_eq!(keyboard.inline_keyboard[0][0].text, "✅ Confirm");
        assert_eq!(keyboard.inline_keyboard[0][0].callback_data, CALLBACK_CONFIRM);
        assert_eq!(keyboard.inline_keyboard[0][1].text, "❌ Cancel Search");
        assert_eq!(
            keyboard.inline_keyboard[0][1].callback_data,
            CALLBACK_CANCEL_SEARCH
        );
    }
}
