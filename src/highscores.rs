//! Best-score persistence
//!
//! The simulation only sees the narrow [`ScoreStore`] interface: read once at
//! run start, write + flush when a run sets a new best.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Integer key/value preferences with an explicit durable flush
pub trait ScoreStore {
    /// Stored value, or 0 when the key is missing or unreadable
    fn get(&self, key: &str) -> u32;
    fn set(&mut self, key: &str, value: u32);
    /// Make every `set` since the last flush durable
    fn flush(&mut self) -> Result<(), StoreError>;
}

/// In-memory store; records every write for inspection
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, u32>,
    /// Every `set` in call order
    pub writes: Vec<(String, u32)>,
    pub flushes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: u32) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> u32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), value);
        self.writes.push((key.to_string(), value));
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.flushes += 1;
        Ok(())
    }
}

/// JSON file on disk (native builds).
///
/// Flush writes a temp file next to the target and renames it over, so a
/// crash mid-write never leaves a truncated store behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, u32>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store. A corrupt file is logged and ignored.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => {
                    log::info!("Loaded scores from {}", path.display());
                    values
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt score file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No score file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> u32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Scores flushed to {}", self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage (wasm32 only). Writes are buffered until flush.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    prefix: String,
    pending: BTreeMap<String, u32>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            pending: BTreeMap::new(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    fn item_key(&self, key: &str) -> String {
        format!("{}.{}", self.prefix, key)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> u32 {
        if let Some(value) = self.pending.get(key) {
            return *value;
        }
        Self::storage()
            .and_then(|s| s.get_item(&self.item_key(key)).ok().flatten())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: u32) {
        self.pending.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".into()))?;
        for (key, value) in std::mem::take(&mut self.pending) {
            storage
                .set_item(&self.item_key(&key), &value.to_string())
                .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIGHSCORE_KEY;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("jump-action-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.get(HIGHSCORE_KEY), 0);
    }

    #[test]
    fn test_memory_store_records_writes() {
        let mut store = MemoryStore::with_value(HIGHSCORE_KEY, 3);
        assert_eq!(store.get(HIGHSCORE_KEY), 3);
        store.set(HIGHSCORE_KEY, 5);
        store.flush().unwrap();
        assert_eq!(store.get(HIGHSCORE_KEY), 5);
        assert_eq!(store.writes, vec![(HIGHSCORE_KEY.to_string(), 5)]);
        assert_eq!(store.flushes, 1);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_path("reopen");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(HIGHSCORE_KEY), 0);
        store.set(HIGHSCORE_KEY, 42);
        store.flush().unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(HIGHSCORE_KEY), 42);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(HIGHSCORE_KEY), 0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unflushed_writes_are_not_durable() {
        let path = temp_path("unflushed");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set(HIGHSCORE_KEY, 7);
        assert_eq!(store.get(HIGHSCORE_KEY), 7);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(HIGHSCORE_KEY), 0);
    }
}
