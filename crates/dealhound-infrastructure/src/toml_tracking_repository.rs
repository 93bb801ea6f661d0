//! TOML-directory TrackingRepository implementation.
//!
//! Each tracking record is one TOML document in a flat directory, named with
//! a v4 UUID at creation time. Records are small and few per user, so every
//! operation re-reads the directory instead of holding an in-memory index.
//!
//! Directory structure:
//! ```text
//! trackings/
//! ├── 8c6f3e4a-7b2d-4f1e-9a3c-4d8b6e2f1a5c.toml
//! └── 19b0d2aa-55c1-4f8e-8f33-0a9cc0714b21.toml
//! ```

use anyhow::Result;
use async_trait::async_trait;
use dealhound_core::tracking::{TrackingRecord, TrackingRepository};
use dealhound_core::DealhoundError;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::paths::DealhoundPaths;

/// File-per-record tracking repository.
pub struct TomlTrackingRepository {
    trackings_dir: PathBuf,
}

impl TomlTrackingRepository {
    /// Creates a repository at the default location
    /// (`~/.local/share/dealhound/trackings`).
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined or the
    /// trackings directory cannot be created.
    pub async fn default_location() -> Result<Self, DealhoundError> {
        let trackings_dir = DealhoundPaths::trackings_dir()
            .map_err(|e| DealhoundError::config(e.to_string()))?;
        Self::new(trackings_dir).await
    }

    /// Creates a repository rooted at an explicit directory.
    pub async fn new(trackings_dir: impl AsRef<Path>) -> Result<Self, DealhoundError> {
        let trackings_dir = trackings_dir.as_ref().to_path_buf();

        fs::create_dir_all(&trackings_dir)
            .await
            .map_err(|e| {
                DealhoundError::io(format!("Failed to create trackings directory: {e}"))
            })?;

        Ok(Self { trackings_dir })
    }

    /// Reads every record in the directory, with its backing path.
    ///
    /// Unreadable and unparsable files are skipped with a warning so one
    /// corrupt record cannot take down the whole listing. Results are sorted
    /// by file name to keep iteration order stable across passes.
    async fn load_entries(&self) -> Result<Vec<(PathBuf, TrackingRecord)>, DealhoundError> {
        let mut entries = fs::read_dir(&self.trackings_dir).await.map_err(|e| {
            DealhoundError::data_access(format!("Failed to read trackings directory: {e}"))
        })?;

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }

            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!("Skipping unreadable tracking file {:?}: {}", path, err);
                    continue;
                }
            };

            match toml::from_str::<TrackingRecord>(&content) {
                Ok(record) => records.push((path, record)),
                Err(err) => {
                    tracing::warn!("Skipping corrupt tracking file {:?}: {}", path, err);
                }
            }
        }

        records.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(records)
    }

    /// Finds the file backing an exact (user, product name) pair, if any.
    /// Product names compare case-insensitively.
    async fn find_record_path(
        &self,
        user_id: i64,
        product_name: &str,
    ) -> Result<Option<PathBuf>, DealhoundError> {
        let entries = self.load_entries().await?;
        Ok(entries
            .into_iter()
            .find(|(_, record)| {
                record.user_id == user_id
                    && record.product_name.eq_ignore_ascii_case(product_name)
            })
            .map(|(path, _)| path))
    }

    /// Serializes one record and writes it to its backing file.
    async fn write_record(
        &self,
        path: &Path,
        record: &TrackingRecord,
    ) -> Result<(), DealhoundError> {
        let content = toml::to_string_pretty(record)?;
        fs::write(path, content)
            .await
            .map_err(|e| DealhoundError::io(format!("Failed to write tracking record: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl TrackingRepository for TomlTrackingRepository {
    async fn add(&self, record: &TrackingRecord) -> Result<()> {
        let path = match self
            .find_record_path(record.user_id, &record.product_name)
            .await?
        {
            Some(existing) => existing,
            None => self.trackings_dir.join(format!("{}.toml", Uuid::new_v4())),
        };

        self.write_record(&path, record).await?;
        Ok(())
    }

    async fn remove(&self, user_id: i64, product_name: &str) -> Result<bool> {
        let needle = product_name.to_lowercase();

        for (path, record) in self.load_entries().await? {
            if record.user_id == user_id && record.product_name.to_lowercase().contains(&needle) {
                fs::remove_file(&path).await.map_err(|e| {
                    DealhoundError::io(format!("Failed to delete tracking record: {e}"))
                })?;
                return Ok(true);
            }
        }

        Ok(false)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<TrackingRecord>> {
        Ok(self
            .load_entries()
            .await?
            .into_iter()
            .map(|(_, record)| record)
            .filter(|record| record.user_id == user_id)
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<TrackingRecord>> {
        Ok(self
            .load_entries()
            .await?
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }
}
