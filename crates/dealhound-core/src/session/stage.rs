//! Conversation stage types for session state management.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::query::SlotValue;
use crate::tracking::ProductData;

/// A tracking shown on the confirmation card but not yet saved.
///
/// Held by the session until the user presses the inline confirm button,
/// at which point it becomes a stored [`crate::tracking::TrackingRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTracking {
    pub category: Category,
    pub product_name: String,
    pub search_query: String,
    pub target_price: f64,
    pub product_data: ProductData,
}

/// Where a chat currently is in the guided tracking flow.
///
/// Each variant carries exactly the slots collected up to that point, so a
/// stage can never be observed with slots it has not asked for yet. Price
/// stages re-carry their slots on invalid input, which is what makes
/// re-prompting loop in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Stage {
    /// No flow in progress.
    Idle,
    /// The category menu was shown.
    AwaitingCategory,

    AwaitingMobileName,
    AwaitingMobileManufacturer {
        name: String,
    },
    AwaitingMobileModel {
        name: String,
        manufacturer: SlotValue,
    },
    AwaitingMobileStorage {
        name: String,
        manufacturer: SlotValue,
        model: SlotValue,
    },
    AwaitingMobilePrice {
        name: String,
        manufacturer: SlotValue,
        model: SlotValue,
        storage: SlotValue,
    },

    AwaitingConsoleName,
    AwaitingConsoleManufacturer {
        name: String,
    },
    AwaitingConsolePrice {
        name: String,
        manufacturer: SlotValue,
    },

    AwaitingLaptopManufacturer,
    AwaitingLaptopName {
        manufacturer: SlotValue,
    },
    AwaitingLaptopRam {
        manufacturer: SlotValue,
        name: String,
    },
    AwaitingLaptopStorage {
        manufacturer: SlotValue,
        name: String,
        ram: SlotValue,
    },
    AwaitingLaptopProcessor {
        manufacturer: SlotValue,
        name: String,
        ram: SlotValue,
        storage: SlotValue,
    },
    AwaitingLaptopPrice {
        manufacturer: SlotValue,
        name: String,
        ram: SlotValue,
        storage: SlotValue,
        processor: SlotValue,
    },

    AwaitingHeadphonesManufacturer,
    AwaitingHeadphonesModel {
        manufacturer: String,
    },
    /// A confident vocabulary match is waiting for a yes/no answer.
    ConfirmHeadphonesModel {
        manufacturer: String,
        candidate: String,
    },
    AwaitingHeadphonesPrice {
        manufacturer: String,
        model: String,
    },

    /// A result card is on screen; only the inline confirm/cancel buttons
    /// (or /cancel) move the flow forward.
    EndConversation {
        pending: PendingTracking,
    },
}

impl Stage {
    pub fn is_idle(&self) -> bool {
        matches!(self, Stage::Idle)
    }
}
