//! Session domain model.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::stage::Stage;

/// One chat's conversation state.
///
/// Sessions are in-memory only; a restart drops every in-flight flow back
/// to idle while stored trackings are unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Telegram chat this session belongs to
    pub chat_id: i64,
    /// User driving the conversation
    pub user_id: i64,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
    /// Current flow stage
    pub stage: Stage,
}

impl Session {
    /// Creates a fresh idle session for a chat.
    pub fn new(chat_id: i64, user_id: i64) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            chat_id,
            user_id,
            created_at: now.clone(),
            updated_at: now,
            stage: Stage::Idle,
        }
    }

    /// Replaces the stage and touches the update timestamp.
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.updated_at = Utc::now().to_rfc3339();
    }

    /// Drops any in-flight flow back to idle, discarding collected slots.
    pub fn reset(&mut self) {
        self.set_stage(Stage::Idle);
    }
}
