//! In-memory session store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::model::Session;

/// Holds every chat's session, deliberately keyed by chat id rather than
/// user id: a guided flow belongs to the conversation it runs in, so in a
/// group chat everyone steers the one flow in progress and `/cancel` from
/// anyone ends it. The session's user id records whoever opened it.
///
/// Cloning the store is cheap and shares the underlying map, so the bot
/// dispatcher and the reconciliation loop can hold the same store.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<i64, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the chat's session, creating an idle one first if
    /// the chat is new.
    pub async fn get_or_create(&self, chat_id: i64, user_id: i64) -> Session {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(chat_id)
            .or_insert_with(|| Session::new(chat_id, user_id))
            .clone()
    }

    /// Writes a session back after a transition.
    pub async fn put(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.chat_id, session);
    }

    /// Resets the chat's flow to idle, if a session exists.
    pub async fn reset(&self, chat_id: i64) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(&chat_id) {
            session.reset();
        }
    }
}
