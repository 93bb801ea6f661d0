//! Watcher service: scheduled price reconciliation over stored trackings.
//!
//! Each pass reissues every tracking's immutable search query, keeps the
//! genuine results priced at or below the target, and alerts the owner for
//! each one that matches the intended product. Alerts across all trackings
//! are collected first and sent in one burst; alerted trackings are then
//! removed so a deal fires once.

use std::sync::Arc;

use anyhow::Result;

use dealhound_core::catalog::{CatalogItem, CatalogSearch};
use dealhound_core::matching::{is_genuine, is_intended_product, profile_for};
use dealhound_core::price::display_price;
use dealhound_core::ranking::{results_at_or_below, sort_by_price};
use dealhound_core::session::Reply;
use dealhound_core::tracking::TrackingRepository;
use dealhound_core::transport::ChatTransport;

/// One qualifying hit found during a pass, held until every tracking has
/// been checked.
struct DealAlert {
    user_id: i64,
    chat_id: i64,
    /// Stored display name, used for removal and the removal notice.
    product_name: String,
    /// Catalog title of the item that hit the target.
    title: String,
    current_price: Option<f64>,
    target_price: f64,
    url: String,
}

impl DealAlert {
    fn message(&self) -> Reply {
        Reply::plain(format!(
            "🚨 Price Alert: {}\n\n💰 Price Found: {}\n🎯 Your Target: {}\n🔗 {}",
            self.title,
            display_price(self.current_price),
            display_price(Some(self.target_price)),
            self.url
        ))
    }
}

/// Reconciles stored trackings against live catalog prices.
///
/// # Responsibilities
///
/// - Running one reconciliation pass over all stored trackings
/// - Sending price alerts and removal notices to the owning chats
/// - Removing trackings whose deal was alerted
/// - Driving itself on a fixed interval via the background scheduler
///
/// # Thread Safety
///
/// Collaborators are `Arc`-shared trait objects; the service holds no
/// mutable state of its own, so an `Arc<WatcherService>` can be shared
/// between the scheduler task and anything else.
pub struct WatcherService {
    /// Persistent tracking storage
    repository: Arc<dyn TrackingRepository>,
    /// Catalog provider reissuing stored queries
    catalog: Arc<dyn CatalogSearch>,
    /// Outbound chat channel for alerts and notices
    transport: Arc<dyn ChatTransport>,
}

impl WatcherService {
    /// Creates a new `WatcherService` instance.
    ///
    /// # Arguments
    ///
    /// * `repository` - Persistent tracking storage
    /// * `catalog` - Catalog provider for reissuing stored queries
    /// * `transport` - Outbound chat channel
    pub fn new(
        repository: Arc<dyn TrackingRepository>,
        catalog: Arc<dyn CatalogSearch>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            repository,
            catalog,
            transport,
        }
    }

    /// Starts the background reconciliation scheduler.
    ///
    /// The scheduler runs one pass per interval, starting immediately. Pass
    /// failures are logged and the loop re-arms for the next tick.
    ///
    /// # Arguments
    ///
    /// * `interval_secs` - Seconds between reconciliation passes
    pub fn start_price_check_scheduler(self: &Arc<Self>, interval_secs: u64) {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::time::Duration;
        use tokio::time::interval;

        // Prevent multiple scheduler instances
        static SCHEDULER_RUNNING: AtomicBool = AtomicBool::new(false);
        if SCHEDULER_RUNNING.swap(true, Ordering::SeqCst) {
            tracing::warn!(target: "watcher", "Scheduler already running, skipping");
            return;
        }

        let service = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(interval_secs));
            tracing::info!(target: "watcher", "Scheduler started ({}s interval)", interval_secs);

            loop {
                ticker.tick().await;
                tracing::debug!(target: "watcher", "Tick - starting reconciliation pass");

                if let Err(e) = service.run_price_check_batch().await {
                    tracing::error!(target: "watcher", "Reconciliation pass failed: {}", e);
                }
            }
        });
    }

    /// Runs one reconciliation pass over every stored tracking.
    ///
    /// Qualifying hits are collected across all trackings before any alert
    /// is sent. A tracking is removed only after its alert was delivered,
    /// and the removal notice goes out only when the removal actually
    /// deleted a record, so a second hit on the same tracking stays silent.
    pub async fn run_price_check_batch(&self) -> Result<()> {
        let trackings = self.repository.list_all().await?;
        if trackings.is_empty() {
            tracing::debug!(target: "watcher", "No trackings stored, skipping pass");
            return Ok(());
        }
        tracing::debug!(target: "watcher", "Checking {} tracking(s)", trackings.len());

        let mut alerts: Vec<DealAlert> = Vec::new();
        let mut search_failures = 0;

        for tracking in &trackings {
            let results = match self.catalog.search(&tracking.search_query).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(
                        target: "watcher",
                        "Search failed for '{}' (user {}): {}",
                        tracking.search_query,
                        tracking.user_id,
                        e
                    );
                    search_failures += 1;
                    continue;
                }
            };

            let genuine: Vec<CatalogItem> = results
                .into_iter()
                .filter(|item| is_genuine(tracking.category, &item.title))
                .collect();
            let ranked = sort_by_price(genuine);
            let within_target = results_at_or_below(&ranked, tracking.target_price);

            let profile = profile_for(tracking.category);
            for item in within_target {
                if !is_intended_product(profile, &tracking.search_query, &item.title) {
                    continue;
                }
                alerts.push(DealAlert {
                    user_id: tracking.user_id,
                    chat_id: tracking.chat_id,
                    product_name: tracking.product_name.clone(),
                    title: item.title.clone(),
                    current_price: item.price_value(),
                    target_price: tracking.target_price,
                    url: item.link.clone().unwrap_or_default(),
                });
            }
        }

        // Send every alert before touching storage; an undelivered alert
        // leaves its tracking in place for the next pass.
        let mut delivered: Vec<&DealAlert> = Vec::new();
        for alert in &alerts {
            match self.transport.send_reply(alert.chat_id, &alert.message()).await {
                Ok(()) => delivered.push(alert),
                Err(e) => {
                    tracing::warn!(
                        target: "watcher",
                        "Failed to deliver alert for '{}' to chat {}: {}",
                        alert.title,
                        alert.chat_id,
                        e
                    );
                }
            }
        }

        let mut removed = 0;
        for alert in &delivered {
            match self.repository.remove(alert.user_id, &alert.product_name).await {
                Ok(true) => {
                    removed += 1;
                    let notice = Reply::plain(format!(
                        "✅ We found a deal for {} and have stopped tracking it. \
                         You can track it again anytime with /track.",
                        alert.product_name
                    ));
                    if let Err(e) = self.transport.send_reply(alert.chat_id, &notice).await {
                        tracing::warn!(
                            target: "watcher",
                            "Failed to send removal notice to chat {}: {}",
                            alert.chat_id,
                            e
                        );
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        target: "watcher",
                        "Failed to remove tracking '{}' for user {}: {}",
                        alert.product_name,
                        alert.user_id,
                        e
                    );
                }
            }
        }

        tracing::info!(
            target: "watcher",
            "Pass complete: {} tracking(s) checked, {} search failure(s), {} alert(s) delivered, {} removal(s)",
            trackings.len(),
            search_failures,
            delivered.len(),
            removed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dealhound_core::catalog::ItemPrice;
    use dealhound_core::category::Category;
    use dealhound_core::tracking::{ProductData, TrackingRecord};
    use dealhound_core::transport::ConfirmationCard;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct RecordingTransport {
        replies: StdMutex<Vec<(i64, Reply)>>,
    }

    impl RecordingTransport {
        fn texts(&self) -> Vec<String> {
            self.replies
                .lock()
                .unwrap()
                .iter()
                .map(|(_, reply)| reply.text.clone())
                .collect()
        }
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<()> {
            self.replies.lock().unwrap().push((chat_id, reply.clone()));
            Ok(())
        }

        async fn send_card(&self, _chat_id: i64, _card: &ConfirmationCard) -> Result<()> {
            Ok(())
        }

        async fn ack_callback(&self, _callback_id: &str) -> Result<()> {
            Ok(())
        }
    }

    /// Transport that records what it was asked to send and then refuses,
    /// as if the chat API were unreachable.
    #[derive(Default)]
    struct DownTransport {
        attempts: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatTransport for DownTransport {
        async fn send_reply(&self, _chat_id: i64, reply: &Reply) -> Result<()> {
            self.attempts.lock().unwrap().push(reply.text.clone());
            Err(anyhow::anyhow!("chat unreachable"))
        }

        async fn send_card(&self, _chat_id: i64, _card: &ConfirmationCard) -> Result<()> {
            Err(anyhow::anyhow!("chat unreachable"))
        }

        async fn ack_callback(&self, _callback_id: &str) -> Result<()> {
            Err(anyhow::anyhow!("chat unreachable"))
        }
    }

    #[derive(Default)]
    struct MemoryRepository {
        records: StdMutex<Vec<TrackingRecord>>,
    }

    #[async_trait]
    impl TrackingRepository for MemoryRepository {
        async fn add(&self, record: &TrackingRecord) -> Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn remove(&self, user_id: i64, product_name: &str) -> Result<bool> {
            let needle = product_name.to_lowercase();
            let mut records = self.records.lock().unwrap();
            let position = records.iter().position(|record| {
                record.user_id == user_id && record.product_name.to_lowercase().contains(&needle)
            });
            match position {
                Some(index) => {
                    records.remove(index);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn list_for_user(&self, user_id: i64) -> Result<Vec<TrackingRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|record| record.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> Result<Vec<TrackingRecord>> {
            Ok(self.records.lock().unwrap().clone())
        }
    }

    /// Catalog keyed by query; unknown queries error like a failed request.
    struct ScriptedCatalog {
        responses: HashMap<String, Vec<CatalogItem>>,
    }

    #[async_trait]
    impl CatalogSearch for ScriptedCatalog {
        async fn search(&self, query: &str) -> Result<Vec<CatalogItem>> {
            self.responses
                .get(query)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    fn record(user_id: i64, name: &str, query: &str, target: f64) -> TrackingRecord {
        TrackingRecord::new(
            user_id,
            user_id,
            name.to_string(),
            Category::Phones,
            query.to_string(),
            target,
            ProductData::default(),
        )
    }

    fn item(title: &str, price: f64, link: &str) -> CatalogItem {
        CatalogItem {
            title: title.to_string(),
            price: Some(ItemPrice::Plain(price)),
            image_url: None,
            link: Some(link.to_string()),
        }
    }

    async fn service_with(
        records: Vec<TrackingRecord>,
        responses: HashMap<String, Vec<CatalogItem>>,
    ) -> (WatcherService, Arc<MemoryRepository>, Arc<RecordingTransport>) {
        let repository = Arc::new(MemoryRepository::default());
        for record in &records {
            repository.add(record).await.unwrap();
        }
        let transport = Arc::new(RecordingTransport::default());
        let service = WatcherService::new(
            repository.clone(),
            Arc::new(ScriptedCatalog { responses }),
            transport.clone(),
        );
        (service, repository, transport)
    }

    #[tokio::test]
    async fn deal_at_or_below_target_alerts_then_removes() {
        let query = "apple iphone 14 pro max 256 gb";
        let responses = HashMap::from([(
            query.to_string(),
            vec![
                item("Case for Apple iPhone 14 Pro Max 256GB", 19.99, "https://x/case"),
                item(
                    "Apple iPhone 14 Pro Max (256GB) - Deep Purple",
                    949.99,
                    "https://x/deal",
                ),
                item(
                    "Apple iPhone 14 Pro Max (256GB) - Space Black",
                    1200.0,
                    "https://x/pricey",
                ),
            ],
        )]);
        let (service, repository, transport) =
            service_with(vec![record(7, "iPhone 14 Pro Max", query, 1000.0)], responses).await;

        service.run_price_check_batch().await.unwrap();

        let texts = transport.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(
            texts[0],
            "🚨 Price Alert: Apple iPhone 14 Pro Max (256GB) - Deep Purple\n\n\
             💰 Price Found: $949.99\n\
             🎯 Your Target: $1000.00\n\
             🔗 https://x/deal"
        );
        assert_eq!(
            texts[1],
            "✅ We found a deal for iPhone 14 Pro Max and have stopped tracking it. \
             You can track it again anytime with /track."
        );
        assert!(repository.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn alerts_batch_before_any_removal_notice() {
        let responses = HashMap::from([
            (
                "apple iphone 14 pro".to_string(),
                vec![item("Apple iPhone 14 Pro 128GB", 700.0, "https://x/a")],
            ),
            (
                "samsung galaxy s23".to_string(),
                vec![item("Samsung Galaxy S23 5G", 600.0, "https://x/b")],
            ),
        ]);
        let (service, _, transport) = service_with(
            vec![
                record(1, "iPhone 14 Pro", "apple iphone 14 pro", 800.0),
                record(2, "Galaxy S23", "samsung galaxy s23", 650.0),
            ],
            responses,
        )
        .await;

        service.run_price_check_batch().await.unwrap();

        let texts = transport.texts();
        assert_eq!(texts.len(), 4);
        assert!(texts[0].starts_with("🚨 Price Alert:"));
        assert!(texts[1].starts_with("🚨 Price Alert:"));
        assert!(texts[2].starts_with("✅ We found a deal"));
        assert!(texts[3].starts_with("✅ We found a deal"));
    }

    #[tokio::test]
    async fn prices_above_target_stay_silent() {
        let query = "apple iphone 14 pro";
        let responses = HashMap::from([(
            query.to_string(),
            vec![item("Apple iPhone 14 Pro 128GB", 999.0, "https://x/a")],
        )]);
        let (service, repository, transport) =
            service_with(vec![record(7, "iPhone 14 Pro", query, 800.0)], responses).await;

        service.run_price_check_batch().await.unwrap();

        assert!(transport.texts().is_empty());
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_failure_skips_the_tracking_but_the_pass_continues() {
        // Only the second tracking's query is scripted; the first errors.
        let responses = HashMap::from([(
            "samsung galaxy s23".to_string(),
            vec![item("Samsung Galaxy S23 5G", 600.0, "https://x/b")],
        )]);
        let (service, repository, transport) = service_with(
            vec![
                record(1, "iPhone 14 Pro", "apple iphone 14 pro", 800.0),
                record(2, "Galaxy S23", "samsung galaxy s23", 650.0),
            ],
            responses,
        )
        .await;

        service.run_price_check_batch().await.unwrap();

        let texts = transport.texts();
        assert_eq!(texts.len(), 2);
        assert!(texts[0].contains("Samsung Galaxy S23 5G"));

        let remaining = repository.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_name, "iPhone 14 Pro");
    }

    #[tokio::test]
    async fn undelivered_alert_leaves_the_tracking_for_the_next_pass() {
        let query = "apple iphone 14 pro";
        let responses = HashMap::from([(
            query.to_string(),
            vec![item("Apple iPhone 14 Pro 128GB", 700.0, "https://x/a")],
        )]);
        let repository = Arc::new(MemoryRepository::default());
        repository
            .add(&record(7, "iPhone 14 Pro", query, 800.0))
            .await
            .unwrap();
        let transport = Arc::new(DownTransport::default());
        let service = WatcherService::new(
            repository.clone(),
            Arc::new(ScriptedCatalog { responses }),
            transport.clone(),
        );

        service.run_price_check_batch().await.unwrap();

        // Only the alert was attempted; removal and its notice never ran.
        let attempts = transport.attempts.lock().unwrap().clone();
        assert_eq!(attempts.len(), 1);
        assert!(attempts[0].starts_with("🚨 Price Alert:"));
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn two_hits_on_one_tracking_alert_twice_but_remove_once() {
        let query = "apple iphone 14 pro";
        let responses = HashMap::from([(
            query.to_string(),
            vec![
                item("Apple iPhone 14 Pro 128GB - Silver", 700.0, "https://x/a"),
                item("Apple iPhone 14 Pro 128GB - Gold", 750.0, "https://x/b"),
            ],
        )]);
        let (service, repository, transport) =
            service_with(vec![record(7, "iPhone 14 Pro", query, 800.0)], responses).await;

        service.run_price_check_batch().await.unwrap();

        let texts = transport.texts();
        let alerts = texts.iter().filter(|t| t.starts_with("🚨")).count();
        let notices = texts.iter().filter(|t| t.starts_with("✅")).count();
        assert_eq!(alerts, 2);
        assert_eq!(notices, 1);
        assert!(repository.list_all().await.unwrap().is_empty());
    }
}
