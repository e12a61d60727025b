use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::path::PathBuf;

use tokio::sync::{Mutex, RwLock};

use crate::error::{AppError, AppResult};

/// Keys of the persisted key-value store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Favorites,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Favorites => write!(f, "favorites"),
        }
    }
}

/// Durable key-value blob store
///
/// Values are opaque strings; callers own the serialization format.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, `None` if nothing was ever written
    async fn get(&self, key: &StorageKey) -> AppResult<Option<String>>;

    /// Replaces the value stored under `key`
    async fn set(&self, key: &StorageKey, value: String) -> AppResult<()>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Store that lives only as long as the process
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry
    pub fn with_entry(key: &StorageKey, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(&key.to_string()).cloned())
    }

    async fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Store backed by a single JSON object file mapping keys to values
///
/// The whole file is rewritten on every `set`. Writes go to a sibling
/// temporary file first and are renamed into place.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_entries(&self) -> AppResult<BTreeMap<String, String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            AppError::Storage(format!(
                "Malformed storage file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let entries = self.read_entries().await?;
        Ok(entries.get(&key.to_string()).cloned())
    }

    async fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        // A corrupt file is replaced rather than blocking every future write
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(AppError::Storage(msg)) => {
                tracing::warn!(error = %msg, "Discarding malformed storage file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value);

        let json = serde_json::to_string_pretty(&entries)?;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        tracing::debug!(key = %key, path = %self.path.display(), "Storage entry written");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
