//! Key-value capability with per-entry expiry.
//!
//! The consent slot is a cookie in a browser deployment; everywhere else
//! it is whatever client-resident store the host provides. The trait
//! captures the two operations the consent store needs: read (where an
//! expired entry is a miss) and write-with-ttl.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A durable, expiring key-value slot.
pub trait KeyValueStore {
    /// Current value for `key`. Expired entries are misses.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key` with a time-to-live. Replaces any
    /// existing entry and restarts its expiry window. Write failures are
    /// swallowed by the implementation — persistence is best-effort and
    /// must never block the caller.
    fn set(&mut self, key: &str, value: &str, ttl: Duration);
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn live(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// In-memory store. Session-lifetime only; also the test double.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, Entry>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|e| e.live())
            .map(|e| e.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
    }
}

/// File-backed store: one JSON file of entries with absolute expiry
/// timestamps. Write-through on every set; expired entries are pruned
/// on write.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: HashMap<String, Entry>,
}

impl FileKvStore {
    /// Open the store at `path`, loading any existing entries. A missing
    /// or unreadable file starts empty; a corrupt file is discarded.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("discarding corrupt store at {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    fn flush(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!("failed to write store at {}: {}", self.path.display(), e);
                }
            }
            Err(e) => tracing::warn!("failed to serialize store: {}", e),
        }
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|e| e.live())
            .map(|e| e.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl: Duration) {
        self.entries.retain(|_, e| e.live());
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
        self.flush();
    }
}
