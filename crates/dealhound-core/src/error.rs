//! Typed errors for Dealhound's storage and configuration layers.
//!
//! Collaborator traits and the application services stay on `anyhow` at
//! their seams; this enum types the failures Dealhound's own infrastructure
//! produces, so each one carries the operation that failed rather than a
//! bare OS error string.

use thiserror::Error;

/// The domain error for tracking persistence and configuration loading.
#[derive(Error, Debug)]
pub enum DealhoundError {
    /// File system operation failed
    #[error("IO error: {message}")]
    Io { message: String },

    /// Tracking store scan failed
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// TOML encode/decode failed
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration could not be resolved or loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DealhoundError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for DealhoundError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DealhoundError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DealhoundError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DealhoundError>`.
pub type Result<T> = std::result::Result<T, DealhoundError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_display_their_operation() {
        assert_eq!(
            DealhoundError::config("missing home directory").to_string(),
            "Configuration error: missing home directory"
        );
        assert_eq!(
            DealhoundError::io("Failed to write tracking record: disk full").to_string(),
            "IO error: Failed to write tracking record: disk full"
        );
        assert_eq!(
            DealhoundError::data_access("Failed to read trackings directory").to_string(),
            "Data access error: Failed to read trackings directory"
        );
    }

    #[test]
    fn toml_failures_convert_to_serialization() {
        let err: DealhoundError = toml::from_str::<toml::Value>("= [[").unwrap_err().into();
        match err {
            DealhoundError::Serialization { format, .. } => assert_eq!(format, "TOML"),
            other => panic!("expected a serialization error, got {other:?}"),
        }
    }
}
