//! Search query assembly from collected conversation slots.
//!
//! Each guided flow gathers slot values in a fixed order; this module turns
//! them into the single search string sent to the product catalog. Skip
//! sentinels and blank values are dropped, survivors are trimmed and
//! lowercased, duplicates are removed keeping the first occurrence, and the
//! rest are joined with single spaces.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

/// Keyboard labels that mean "leave this slot empty". The label text doubles
/// as the sentinel value, so a typed match behaves like the button press.
pub const SKIP_MANUFACTURER: &str = "Skip Manufacturer";
pub const SKIP_MODEL: &str = "Skip Model";
pub const SKIP_STORAGE: &str = "Skip Storage";
pub const SKIP_RAM: &str = "Skip RAM";
pub const SKIP_PROCESSOR: &str = "Skip Processor";

/// A single collected slot: either a concrete value or an explicit skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotValue {
    Skipped,
    Given(String),
}

impl SlotValue {
    /// Interprets raw user input for a slot whose skip button carries
    /// `sentinel`. The comparison is exact after trimming.
    pub fn from_input(input: &str, sentinel: &str) -> Self {
        let trimmed = input.trim();
        if trimmed == sentinel {
            SlotValue::Skipped
        } else {
            SlotValue::Given(trimmed.to_string())
        }
    }

    /// Returns the concrete value, if one was given.
    pub fn into_given(self) -> Option<String> {
        match self {
            SlotValue::Given(value) => Some(value),
            SlotValue::Skipped => None,
        }
    }
}

/// A fully assembled catalog search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("search needs at least {minimum} detail(s), got {provided}")]
    TooVague { provided: usize, minimum: usize },
}

/// Builds the search string for `category` from its ordered slot values.
///
/// The category minimum is checked against the count of concrete, non-blank
/// values before deduplication, so repeating the same term still counts
/// toward it.
///
/// # Arguments
///
/// * `category` - The product category the slots were collected for
/// * `slots` - Slot values in the category's collection order
///
/// # Returns
///
/// The assembled query, or `QueryError::TooVague` when too few concrete
/// values were provided to search meaningfully.
pub fn build_search_query(category: Category, slots: &[SlotValue]) -> Result<SearchQuery, QueryError> {
    let cleaned: Vec<String> = slots
        .iter()
        .filter_map(|slot| match slot {
            SlotValue::Given(value) => Some(value.trim().to_lowercase()),
            SlotValue::Skipped => None,
        })
        .filter(|value| !value.is_empty())
        .collect();

    let minimum = category.min_query_slots();
    if cleaned.len() < minimum {
        return Err(QueryError::TooVague {
            provided: cleaned.len(),
            minimum,
        });
    }

    let mut terms: Vec<String> = Vec::new();
    for value in cleaned {
        if !terms.contains(&value) {
            terms.push(value);
        }
    }

    Ok(SearchQuery(terms.join(" ")))
}
