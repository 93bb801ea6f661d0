//! Tracking domain module.
//!
//! # Module Structure
//!
//! - `model`: tracking domain model (`TrackingRecord`, `ProductData`)
//! - `repository`: repository trait for tracking persistence

mod model;
mod repository;

// Re-export public API
pub use model::{ProductData, TrackingRecord};
pub use repository::TrackingRepository;
