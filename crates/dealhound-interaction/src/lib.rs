pub mod rainforest;
pub mod telegram;

// Re-export the two collaborator clients
pub use rainforest::RainforestClient;
pub use telegram::TelegramClient;
