use std::collections::BTreeMap;

use tracing::debug;
use tracing::warn;

pub const THEME_KEY: &str = "clearn-theme";
pub const FONT_SCALE_KEY: &str = "clearn-font-size";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode storage document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable per-origin key/value medium behind [`PreferenceStore`].
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage disabled by browser policy: every access fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl StorageBackend for UnavailableStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Named string preferences. Neither operation surfaces a failure: reads
/// degrade to "absent" and writes are dropped, so callers keep running on
/// their in-memory state.
#[derive(Debug)]
pub struct PreferenceStore<B> {
    backend: B,
}

impl<B: StorageBackend> PreferenceStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.read(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "preference read failed; using default");
                None
            }
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.backend.write(key, value) {
            Ok(()) => debug!(key, value, "preference stored"),
            Err(err) => {
                warn!(key, value, error = %err, "preference not persisted this session");
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
