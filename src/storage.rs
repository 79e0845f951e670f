//! Durable key/value storage with per-entry expiry, and the high score
//! stored in it.
//!
//! The file store keeps a SHA-256 checksum next to its entries. A file that
//! fails the checksum or does not parse is treated as empty.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Store key of the persisted high score.
pub const HIGH_SCORE_KEY: &str = "billyHighScore";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A string store whose entries expire.
pub trait KeyValueStore {
    /// Value for `key`, or None when absent or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` for `ttl_days` days from now.
    fn set(&mut self, key: &str, value: &str, ttl_days: i64) -> io::Result<()>;

    fn remove(&mut self, key: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub value: String,
    /// Unix timestamp (seconds) after which the entry reads as absent.
    pub expires_at: i64,
}

impl StoredEntry {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Entry map shared by both store implementations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entries(BTreeMap<String, StoredEntry>);

impl Entries {
    pub fn get_at(&self, key: &str, now: i64) -> Option<String> {
        self.0
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    pub fn set_at(&mut self, key: &str, value: &str, ttl_days: i64, now: i64) {
        self.0.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at: now.saturating_add(ttl_days.saturating_mul(SECONDS_PER_DAY)),
            },
        );
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.0.remove(key).is_some()
    }

    fn checksum(&self) -> io::Result<String> {
        let json =
            serde_json::to_string(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(format!("{:x}", Sha256::digest(json.as_bytes())))
    }
}

/// On-disk layout of the file store.
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    checksum: String,
    entries: Entries,
}

/// In-process store, used by tests and when no data directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Entries,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get_at(key, Utc::now().timestamp())
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: i64) -> io::Result<()> {
        self.entries
            .set_at(key, value, ttl_days, Utc::now().timestamp());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON file store with checksum verification.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Entries,
}

impl FileStore {
    /// Open the store at `path`. A missing, unreadable or tampered file
    /// yields an empty store; the file is rewritten on the next `set`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read(&path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Entries::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding unreadable store");
                Entries::default()
            }
        };
        Self { path, entries }
    }

    fn read(path: &Path) -> io::Result<Entries> {
        let json = fs::read_to_string(path)?;
        let file: StoreFile =
            serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if file.entries.checksum()? != file.checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }
        Ok(file.entries)
    }

    fn write(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = StoreFile {
            checksum: self.entries.checksum()?,
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get_at(key, Utc::now().timestamp())
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: i64) -> io::Result<()> {
        self.entries
            .set_at(key, value, ttl_days, Utc::now().timestamp());
        self.write()
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.entries.remove(key) {
            self.write()?;
        }
        Ok(())
    }
}

/// Get the ~/.billy-run/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".billy-run");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Stored high score; missing, expired or non-numeric values read as 0.
pub fn load_high_score(store: &dyn KeyValueStore) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %value, "ignoring invalid stored high score");
            0
        }),
        None => 0,
    }
}

pub fn save_high_score(store: &mut dyn KeyValueStore, score: u32, ttl_days: i64) -> io::Result<()> {
    store.set(HIGH_SCORE_KEY, &score.to_string(), ttl_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_expire() {
        let mut entries = Entries::default();
        entries.set_at("k", "v", 365, 1_000);
        assert_eq!(entries.get_at("k", 1_000), Some("v".to_string()));
        assert_eq!(
            entries.get_at("k", 1_000 + 365 * SECONDS_PER_DAY - 1),
            Some("v".to_string())
        );
        assert_eq!(entries.get_at("k", 1_000 + 365 * SECONDS_PER_DAY), None);
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_overflowing() {
        let mut entries = Entries::default();
        entries.set_at("k", "v", i64::MAX, 1_000);
        assert_eq!(entries.get_at("k", i64::MAX - 1), Some("v".to_string()));

        entries.set_at("old", "v", i64::MIN, 1_000);
        assert_eq!(entries.get_at("old", 1_000), None);
    }

    #[test]
    fn test_memory_store_roundtrip_and_expiry() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);
        store.set("a", "1", 1).unwrap();
        assert_eq!(store.get("a"), Some("1".to_string()));
        store.set("b", "2", -1).unwrap();
        assert_eq!(store.get("b"), None);
        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path);
        store.set(HIGH_SCORE_KEY, "17", 365).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(HIGH_SCORE_KEY), Some("17".to_string()));
    }

    #[test]
    fn test_file_store_rejects_tampered_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path);
        store.set(HIGH_SCORE_KEY, "17", 365).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        fs::write(&path, json.replace("\"17\"", "\"9999\"")).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(HIGH_SCORE_KEY), None);
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "billyHighScore=12").unwrap();
        let store = FileStore::open(&path);
        assert_eq!(store.get(HIGH_SCORE_KEY), None);
    }

    #[test]
    fn test_high_score_parsing() {
        let mut store = MemoryStore::new();
        assert_eq!(load_high_score(&store), 0);

        store.set(HIGH_SCORE_KEY, "abc", 365).unwrap();
        assert_eq!(load_high_score(&store), 0);

        store.set(HIGH_SCORE_KEY, "-5", 365).unwrap();
        assert_eq!(load_high_score(&store), 0);

        save_high_score(&mut store, 42, 365).unwrap();
        assert_eq!(load_high_score(&store), 42);
    }
}
