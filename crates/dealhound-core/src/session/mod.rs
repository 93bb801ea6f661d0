//! Session domain module.
//!
//! This module contains the per-chat conversation state, the transition
//! machine that drives the guided tracking flow, and the prompts it speaks
//! with.
//!
//! # Module Structure
//!
//! - `model`: core session domain model (`Session`)
//! - `stage`: conversation stage types (`Stage`, `PendingTracking`)
//! - `machine`: the pure transition function (`advance`, `Step`)
//! - `prompt`: outgoing message texts and keyboards (`Reply`)
//! - `store`: in-memory session map (`SessionStore`)
//!
//! # Usage
//!
//! ```ignore
//! use dealhound_core::session::{advance, Session, SessionStore, Stage, Step};
//! use dealhound_core::session::prompt;
//! ```

mod machine;
mod model;
pub mod prompt;
mod stage;
mod store;

// Re-export public API
pub use machine::{advance, SearchRequest, Step};
pub use model::Session;
pub use prompt::{Reply, ReplyKeyboard};
pub use stage::{PendingTracking, Stage};
pub use store::SessionStore;
