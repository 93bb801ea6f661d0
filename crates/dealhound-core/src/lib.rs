pub mod catalog;
pub mod category;
pub mod command;
pub mod error;
pub mod matching;
pub mod price;
pub mod query;
pub mod ranking;
pub mod responses;
pub mod session;
pub mod tracking;
pub mod transport;

// Re-export common error type
pub use error::DealhoundError;
