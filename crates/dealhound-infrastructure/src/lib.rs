pub mod config_service;
pub mod paths;
pub mod toml_tracking_repository;

pub use crate::config_service::{AppConfig, ConfigService};
pub use crate::paths::DealhoundPaths;
pub use crate::toml_tracking_repository::TomlTrackingRepository;
