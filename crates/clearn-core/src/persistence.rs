use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use super::preferences::StorageBackend;
use super::preferences::StorageError;

pub const PREFERENCES_SCHEMA_V1: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPreference {
    pub value: String,
    pub updated_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPreferences {
    pub version: u8,
    #[serde(default)]
    pub entries: BTreeMap<String, PersistedPreference>,
}

impl Default for PersistedPreferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_SCHEMA_V1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON document on disk holding every preference for one origin.
///
/// The document is read once at open and rewritten whole on every write
/// (temp file, then rename). A missing file is empty storage; an unreadable
/// document is logged and treated as empty until the next successful write
/// replaces it.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    document: PersistedPreferences,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let document = load_document(path.as_path())?;
        Ok(Self { path, document })
    }

    pub fn document(&self) -> &PersistedPreferences {
        &self.document
    }

    fn persist(&self, document: &PersistedPreferences) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, encoded)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .document
            .entries
            .get(key)
            .map(|entry| entry.value.clone()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.document.clone();
        next.version = PREFERENCES_SCHEMA_V1;
        next.entries.insert(
            key.to_string(),
            PersistedPreference {
                value: value.to_string(),
                updated_at_ms: chrono::Utc::now().timestamp_millis(),
            },
        );
        self.persist(&next)?;
        self.document = next;
        Ok(())
    }
}

pub fn load_document(path: &Path) -> std::io::Result<PersistedPreferences> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PersistedPreferences::default());
        }
        Err(err) => return Err(err),
    };
    match serde_json::from_slice::<PersistedPreferences>(&bytes) {
        Ok(document) => Ok(document),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable preferences file");
            Ok(PersistedPreferences::default())
        }
    }
}

pub fn format_timestamp(ts_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ts_ms)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts_ms.to_string())
}
