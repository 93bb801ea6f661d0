//! Application layer for Dealhound.
//!
//! This crate provides the services that coordinate the domain core with the
//! chat transport, catalog provider, and tracking storage: the bot service
//! drives conversations update by update, and the watcher service reconciles
//! stored trackings against live prices on a schedule.

pub mod bot_service;
pub mod watcher_service;

pub use bot_service::BotService;
pub use watcher_service::WatcherService;
