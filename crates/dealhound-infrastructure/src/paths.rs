//! Unified path management for dealhound files.
//!
//! Configuration lives under the platform config directory and tracking
//! records under the platform data directory, resolved via `dirs`.
//!
//! This ensures consistency across all platforms (Linux, macOS, Windows).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for dealhound.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/dealhound/         # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/dealhound/    # Data directory
/// └── trackings/               # One TOML document per tracking record
/// ```
pub struct DealhoundPaths;

impl DealhoundPaths {
    /// Returns the dealhound configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/dealhound/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("dealhound"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the dealhound data directory, used for tracking records.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to data directory (e.g., `~/.local/share/dealhound/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("dealhound"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the tracking records directory.
    pub fn trackings_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("trackings"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = DealhoundPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("dealhound"));
    }

    #[test]
    fn test_config_file() {
        let config_file = DealhoundPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        // Verify it's under config_dir
        let config_dir = DealhoundPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_data_dir() {
        let data_dir = DealhoundPaths::data_dir().unwrap();
        assert!(data_dir.ends_with("dealhound"));
    }

    #[test]
    fn test_trackings_dir() {
        let trackings_dir = DealhoundPaths::trackings_dir().unwrap();
        assert!(trackings_dir.ends_with("trackings"));
        // Verify it's under data_dir
        let data_dir = DealhoundPaths::data_dir().unwrap();
        assert!(trackings_dir.starts_with(&data_dir));
    }
}
