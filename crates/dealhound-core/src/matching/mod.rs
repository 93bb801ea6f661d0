//! Listing-matching domain module.
//!
//! Everything that decides whether a raw catalog listing is worth showing
//! for a tracked product lives here.
//!
//! # Module Structure
//!
//! - `normalize`: shared text normalization (`clean_listing_text`, `squash`)
//! - `relevance`: category deny/allow word gates (`is_genuine`)
//! - `intent`: whole-word coverage matching (`is_intended_product`)
//! - `resolver`: fuzzy headphone model resolution (`resolve_model`)
//!
//! # Usage
//!
//! ```ignore
//! use dealhound_core::matching::{is_genuine, is_intended_product, profile_for};
//! use dealhound_core::matching::{resolve_model, Resolution};
//! ```

mod intent;
mod normalize;
mod relevance;
mod resolver;

// Re-export public API
pub use intent::{is_intended_product, profile_for, MatchProfile, DEFAULT_PROFILE, GAMING_PROFILE};
pub use normalize::{clean_listing_text, squash};
pub use relevance::{
    is_genuine, CONSOLE_ALLOWLIST, CONSOLE_BLOCKLIST, LAPTOP_BLOCKLIST, MOBILE_BLOCKLIST,
};
pub use resolver::{resolve_model, Resolution, CONFIDENT_SCORE, KNOWN_MODELS};
