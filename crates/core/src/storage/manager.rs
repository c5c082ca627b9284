use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// Storage key for the portfolio collection bucket.
pub const PORTFOLIOS_KEY: &str = "portfolios";

/// Storage key for the historical-price cache bucket.
pub const HISTORY_KEY: &str = "historical_values";

/// Plain-JSON key-value snapshot store, one `<key>.json` file per key
/// under a root directory.
///
/// Each bucket holds the full serialized state it belongs to; a save
/// rewrites the whole file (last write wins). There is no locking and no
/// versioning — the snapshot format is exactly the serialized data model.
pub struct StorageManager {
    root: PathBuf,
}

impl StorageManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load and deserialize the snapshot stored under `key`.
    /// Returns `Ok(None)` if the key has never been saved.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CoreError> {
        let path = self.path_for(key);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Serialize `value` and store it under `key`, replacing any previous
    /// snapshot.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize '{key}': {e}")))?;
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), json)?;
        Ok(())
    }

    /// `true` if a snapshot exists for this key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}
