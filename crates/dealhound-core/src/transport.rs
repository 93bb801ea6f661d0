//! Chat transport collaborator boundary.
//!
//! The services talk to the chat platform exclusively through this trait, so
//! the whole conversation can run against a recording double in tests. The
//! transport owns its own dialect concerns (markup escaping, button types);
//! callers hand it platform-neutral [`Reply`] and [`ConfirmationCard`] values.

use anyhow::Result;
use async_trait::async_trait;

use crate::session::Reply;

/// Callback payload of the card's confirm button.
pub const CALLBACK_CONFIRM: &str = "confirm";
/// Callback payload of the card's cancel button.
pub const CALLBACK_CANCEL_SEARCH: &str = "cancel_search";

/// The product card shown for confirmation at the end of the guided flow.
///
/// Carries the catalog item's raw fields; the transport renders them into
/// its own caption markup and attaches confirm/cancel buttons wired to
/// [`CALLBACK_CONFIRM`] and [`CALLBACK_CANCEL_SEARCH`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationCard {
    pub title: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

/// An abstract outbound chat channel.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Delivers one reply to a chat.
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<()>;

    /// Shows a product confirmation card with confirm/cancel buttons.
    async fn send_card(&self, chat_id: i64, card: &ConfirmationCard) -> Result<()>;

    /// Acknowledges a pressed button so the client stops its spinner.
    async fn ack_callback(&self, callback_id: &str) -> Result<()>;
}
