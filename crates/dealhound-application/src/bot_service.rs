//! Bot service: one incoming chat update in, replies and state changes out.
//!
//! Slash commands are routed straight to their handlers; any other text
//! advances the guided flow state machine, whose returned step tells the
//! service what to send and whether to run the end-of-flow catalog search.
//! The search outcome decides the real next stage: a confirmation card with
//! a pending tracking, or a reset back to the category question.

use std::sync::Arc;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use dealhound_core::catalog::CatalogSearch;
use dealhound_core::command::{ParsedCommand, parse_command};
use dealhound_core::matching::{is_genuine, is_intended_product, profile_for};
use dealhound_core::session::{
    PendingTracking, SearchRequest, SessionStore, Stage, advance, prompt,
};
use dealhound_core::tracking::{TrackingRecord, TrackingRepository};
use dealhound_core::transport::{
    CALLBACK_CANCEL_SEARCH, CALLBACK_CONFIRM, ChatTransport, ConfirmationCard,
};
use dealhound_interaction::telegram::{CallbackQuery, Update};

/// How many leading raw results the interactive search considers.
const INTERACTIVE_RESULT_WINDOW: usize = 10;

/// Greeting fallback when the transport did not supply a first name.
const FALLBACK_FIRST_NAME: &str = "there";

/// Drives one chat conversation per incoming update.
///
/// # Responsibilities
///
/// - Routing slash commands (`/start`, `/track`, `/stop`, `/list`, `/help`,
///   `/cancel`) to their handlers
/// - Advancing the guided flow state machine on plain text
/// - Running the confirmation search and showing the result card
/// - Saving confirmed trackings and answering inline button presses
///
/// # Thread Safety
///
/// Collaborators are `Arc`-shared trait objects and the session store shares
/// its map internally; the randomness source sits behind a `Mutex` so the
/// service itself can be shared across tasks.
pub struct BotService {
    /// Per-chat conversation state
    store: SessionStore,
    /// Persistent tracking storage
    repository: Arc<dyn TrackingRepository>,
    /// Catalog provider queried at the end of a flow
    catalog: Arc<dyn CatalogSearch>,
    /// Outbound chat channel
    transport: Arc<dyn ChatTransport>,
    /// Randomness for phrasing variation in flow prompts
    rng: Mutex<StdRng>,
}

impl BotService {
    /// Creates a new `BotService` instance.
    ///
    /// # Arguments
    ///
    /// * `store` - Shared per-chat session state
    /// * `repository` - Persistent tracking storage
    /// * `catalog` - Catalog provider for the confirmation search
    /// * `transport` - Outbound chat channel
    pub fn new(
        store: SessionStore,
        repository: Arc<dyn TrackingRepository>,
        catalog: Arc<dyn CatalogSearch>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            store,
            repository,
            catalog,
            transport,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the randomness source with a seeded one, fixing the phrasing
    /// the flow picks.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Routes one incoming update to the message or callback handler.
    ///
    /// Updates without text (stickers, photos) are ignored.
    pub async fn handle_update(&self, update: &Update) -> Result<()> {
        if let Some(message) = &update.message {
            if let Some(text) = message.text.as_deref() {
                let chat_id = message.chat.id;
                let (user_id, first_name) = match &message.from {
                    Some(user) => (user.id, user.first_name.as_str()),
                    None => (chat_id, ""),
                };
                self.handle_message(chat_id, user_id, first_name, text)
                    .await?;
            }
        }
        if let Some(callback) = &update.callback_query {
            self.handle_callback(callback).await?;
        }
        Ok(())
    }

    async fn handle_message(
        &self,
        chat_id: i64,
        user_id: i64,
        first_name: &str,
        text: &str,
    ) -> Result<()> {
        if let Some(command) = parse_command(text) {
            return self
                .handle_command(chat_id, user_id, first_name, &command)
                .await;
        }
        self.advance_flow(chat_id, user_id, text).await
    }

    async fn handle_command(
        &self,
        chat_id: i64,
        user_id: i64,
        first_name: &str,
        command: &ParsedCommand<'_>,
    ) -> Result<()> {
        match command.name.as_str() {
            "start" => {
                let name = if first_name.is_empty() {
                    FALLBACK_FIRST_NAME
                } else {
                    first_name
                };
                self.transport
                    .send_reply(chat_id, &prompt::greeting_prompt(name))
                    .await?;
                self.transport
                    .send_reply(chat_id, &prompt::greeting_follow_up_prompt())
                    .await
            }
            // /track replaces whatever flow was in progress.
            "track" => {
                let mut session = self.store.get_or_create(chat_id, user_id).await;
                session.set_stage(Stage::AwaitingCategory);
                self.store.put(session).await;
                self.transport
                    .send_reply(chat_id, &prompt::category_prompt())
                    .await
            }
            "stop" => self.handle_stop(chat_id, user_id, command.args).await,
            "list" => self.handle_list(chat_id, user_id).await,
            "help" => {
                self.transport
                    .send_reply(chat_id, &prompt::help_prompt())
                    .await
            }
            "cancel" => {
                self.store.reset(chat_id).await;
                self.transport
                    .send_reply(chat_id, &prompt::cancel_ack_prompt())
                    .await
            }
            _ => {
                self.transport
                    .send_reply(chat_id, &prompt::unknown_command_prompt())
                    .await
            }
        }
    }

    async fn handle_stop(&self, chat_id: i64, user_id: i64, args: &str) -> Result<()> {
        if args.is_empty() {
            return self
                .transport
                .send_reply(chat_id, &prompt::stop_usage_prompt())
                .await;
        }
        let reply = if self.repository.remove(user_id, args).await? {
            prompt::stop_success_prompt(args)
        } else {
            prompt::stop_miss_prompt(args)
        };
        self.transport.send_reply(chat_id, &reply).await
    }

    async fn handle_list(&self, chat_id: i64, user_id: i64) -> Result<()> {
        let records = self.repository.list_for_user(user_id).await?;
        let reply = if records.is_empty() {
            prompt::list_empty_prompt()
        } else {
            prompt::tracking_list_prompt(&records)
        };
        self.transport.send_reply(chat_id, &reply).await
    }

    async fn advance_flow(&self, chat_id: i64, user_id: i64, text: &str) -> Result<()> {
        let mut session = self.store.get_or_create(chat_id, user_id).await;
        let step = {
            let mut rng = self.rng.lock().await;
            advance(&mut *rng, session.stage.clone(), text)
        };
        session.set_stage(step.next);
        self.store.put(session).await;

        for reply in &step.replies {
            self.transport.send_reply(chat_id, reply).await?;
        }
        if let Some(search) = step.search {
            self.finish_with_search(chat_id, user_id, search).await?;
        }
        Ok(())
    }

    /// Runs the end-of-flow catalog search and shows the confirmation card.
    ///
    /// A search failure is treated the same as an empty result: the user is
    /// asked to retry with more detail and the flow restarts at the category
    /// question, never surfacing a transport error.
    async fn finish_with_search(
        &self,
        chat_id: i64,
        user_id: i64,
        search: SearchRequest,
    ) -> Result<()> {
        let results = match self.catalog.search(search.query.as_str()).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(
                    target: "bot",
                    "Confirmation search failed for '{}': {}",
                    search.query.as_str(),
                    e
                );
                Vec::new()
            }
        };

        let candidate = results.iter().take(INTERACTIVE_RESULT_WINDOW).find(|item| {
            is_genuine(search.category, &item.title)
                && is_intended_product(
                    profile_for(search.category),
                    search.query.as_str(),
                    &item.title,
                )
        });

        let mut session = self.store.get_or_create(chat_id, user_id).await;
        match candidate {
            Some(item) => {
                let card = ConfirmationCard {
                    title: item.title.clone(),
                    price: item.price_value(),
                    image_url: item.image_url.clone(),
                };
                self.transport.send_card(chat_id, &card).await?;
                session.set_stage(Stage::EndConversation {
                    pending: PendingTracking {
                        category: search.category,
                        product_name: search.display_name,
                        search_query: search.query.into_string(),
                        target_price: search.target_price,
                        product_data: search.product_data,
                    },
                });
            }
            None => {
                self.transport
                    .send_reply(chat_id, &prompt::no_results_prompt(&search.display_name))
                    .await?;
                self.transport
                    .send_reply(chat_id, &prompt::category_prompt())
                    .await?;
                session.set_stage(Stage::AwaitingCategory);
            }
        }
        self.store.put(session).await;
        Ok(())
    }

    async fn handle_callback(&self, callback: &CallbackQuery) -> Result<()> {
        if let Err(e) = self.transport.ack_callback(&callback.id).await {
            tracing::warn!(target: "bot", "Callback acknowledgement failed: {}", e);
        }
        let user_id = callback.from.id;
        let chat_id = callback
            .message
            .as_ref()
            .map(|message| message.chat.id)
            .unwrap_or(user_id);

        match callback.data.as_deref() {
            Some(CALLBACK_CONFIRM) => self.confirm_pending(chat_id, user_id).await,
            Some(CALLBACK_CANCEL_SEARCH) => {
                self.store.reset(chat_id).await;
                self.transport
                    .send_reply(chat_id, &prompt::cancel_ack_prompt())
                    .await
            }
            _ => {
                tracing::debug!(
                    target: "bot",
                    "Ignoring unknown callback data: {:?}",
                    callback.data
                );
                Ok(())
            }
        }
    }

    /// Turns the session's pending tracking into a stored record.
    ///
    /// A confirm press with nothing pending (stale card, restarted process)
    /// is acknowledged and otherwise ignored.
    async fn confirm_pending(&self, chat_id: i64, user_id: i64) -> Result<()> {
        let session = self.store.get_or_create(chat_id, user_id).await;
        let Stage::EndConversation { pending } = session.stage else {
            tracing::debug!(target: "bot", "Confirm pressed with nothing pending in chat {}", chat_id);
            return Ok(());
        };
        let record = TrackingRecord::new(
            user_id,
            chat_id,
            pending.product_name,
            pending.category,
            pending.search_query,
            pending.target_price,
            pending.product_data,
        );
        self.repository.add(&record).await?;
        self.store.reset(chat_id).await;
        self.transport
            .send_reply(chat_id, &prompt::confirm_ack_prompt())
            .await
    }
}
