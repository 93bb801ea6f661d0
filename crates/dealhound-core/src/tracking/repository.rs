//! Tracking repository trait.
//!
//! Defines the interface for tracking persistence operations.

use anyhow::Result;
use async_trait::async_trait;

use super::model::TrackingRecord;

/// An abstract repository for managing tracking persistence.
///
/// This trait defines the contract for persisting and retrieving trackings,
/// decoupling the application's core logic from the specific storage
/// mechanism (e.g., TOML files, database, remote API).
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    /// Adds a tracking, replacing any existing tracking the same user has
    /// under the same product name.
    ///
    /// # Arguments
    ///
    /// * `record` - The tracking to store
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Tracking stored successfully
    /// - `Err(_)`: Error occurred during save
    async fn add(&self, record: &TrackingRecord) -> Result<()>;

    /// Removes the first of the user's trackings whose product name
    /// contains `product_name`, compared case-insensitively.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owning user
    /// * `product_name` - Full or partial product name to match
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: A tracking was found and removed
    /// - `Ok(false)`: Nothing matched
    /// - `Err(_)`: Error occurred during removal
    async fn remove(&self, user_id: i64, product_name: &str) -> Result<bool>;

    /// Lists the trackings belonging to one user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owning user
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<TrackingRecord>)`: The user's trackings (possibly empty)
    /// - `Err(_)`: Error occurred during listing
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<TrackingRecord>>;

    /// Lists every stored tracking across all users.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<TrackingRecord>)`: All stored trackings
    /// - `Err(_)`: Error occurred during listing
    async fn list_all(&self) -> Result<Vec<TrackingRecord>>;
}
