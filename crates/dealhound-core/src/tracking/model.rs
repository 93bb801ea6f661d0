//! Tracking domain model.
//!
//! This module contains the core TrackingRecord entity that represents one
//! product a user is tracking, together with the attribute bag collected by
//! the guided flow.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Attributes collected during the guided flow, minus the product name.
///
/// Skipped slots stay `None` and are omitted from serialized records, so a
/// stored tracking only carries what the user actually provided.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
}

/// One product a user is tracking.
///
/// The record is immutable once confirmed: the reconciliation loop reissues
/// `search_query` verbatim every pass and compares findings against
/// `target_price` until a hit removes the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    /// Telegram user the tracking belongs to
    pub user_id: i64,
    /// Chat alerts are delivered to
    pub chat_id: i64,
    /// Display name the user gave the product during the flow
    pub product_name: String,
    /// Category the guided flow ran for
    pub category: Category,
    /// The query string reissued on every reconciliation pass
    pub search_query: String,
    /// Price at or below which the user wants an alert
    pub target_price: f64,
    /// Retailer SKU placeholder; collected nowhere yet, always empty
    #[serde(default)]
    pub sku: String,
    /// Timestamp when the tracking was created (RFC 3339 format)
    pub created_at: String,
    /// Collected flow attributes, skipped slots omitted
    #[serde(default)]
    pub product_data: ProductData,
}

impl TrackingRecord {
    /// Creates a new record stamped with the current time.
    pub fn new(
        user_id: i64,
        chat_id: i64,
        product_name: String,
        category: Category,
        search_query: String,
        target_price: f64,
        product_data: ProductData,
    ) -> Self {
        Self {
            user_id,
            chat_id,
            product_name,
            category,
            search_query,
            target_price,
            sku: String::new(),
            created_at: Utc::now().to_rfc3339(),
            product_data,
        }
    }
}
