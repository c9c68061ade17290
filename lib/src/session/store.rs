// lib/src/session/store.rs
//! Durable key/value storage for the persisted session (`token` and `user`).
//!
//! Every entry carries its own expiry. Reading an expired entry removes it and
//! reports it as absent.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use log::{debug, trace, warn};
use models::errors::{HospitalError, HospitalResult};
use serde::{Deserialize, Serialize};

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> HospitalResult<Option<String>>;
    fn set(&self, key: &str, value: &str, ttl: Duration) -> HospitalResult<()>;
    fn remove(&self, key: &str) -> HospitalResult<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl StoredEntry {
    fn new(value: &str, ttl: Duration) -> Self {
        StoredEntry { value: value.to_string(), expires_at: Utc::now() + ttl }
    }

    fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// One JSON file per key under a private directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSessionStore { dir: dir.into() }
    }

    pub fn directory(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> HospitalResult<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(HospitalError::InvalidData(format!("invalid session key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> HospitalResult<Option<String>> {
        let path = self.entry_path(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry: StoredEntry = serde_json::from_str(&raw)?;
        if entry.is_expired() {
            debug!("Session entry '{}' expired at {}", key, entry.expires_at);
            self.remove(key)?;
            return Ok(None);
        }
        trace!("Read session entry '{}' from {:?}", key, path);
        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> HospitalResult<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_string(&StoredEntry::new(value, ttl))?;
        fs::write(&path, body)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&path, fs::Permissions::from_mode(0o600)) {
                warn!("Could not restrict permissions on {:?}: {}", path, e);
            }
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> HospitalResult<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store, used by tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, StoredEntry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw value with no validation, e.g. to seed a corrupted profile.
    pub fn seed(&self, key: &str, value: &str) -> HospitalResult<()> {
        self.set(key, value, Duration::days(1))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().map(|m| m.contains_key(key)).unwrap_or(false)
    }

    fn lock(&self) -> HospitalResult<std::sync::MutexGuard<'_, HashMap<String, StoredEntry>>> {
        self.entries
            .lock()
            .map_err(|e| HospitalError::Internal(format!("session store lock poisoned: {}", e)))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> HospitalResult<Option<String>> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> HospitalResult<()> {
        self.lock()?.insert(key.to_string(), StoredEntry::new(value, ttl));
        Ok(())
    }

    fn remove(&self, key: &str) -> HospitalResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session"));

        assert_eq!(store.get("token").unwrap(), None);
        store.set("token", "abc.def", Duration::days(7)).unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc.def"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        // removing twice is fine
        store.remove("token").unwrap();
    }

    #[test]
    fn expired_entries_read_as_absent_and_are_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.set("user", "{}", Duration::seconds(-1)).unwrap();

        assert_eq!(store.get("user").unwrap(), None);
        assert!(!dir.path().join("user.json").exists());
    }

    #[test]
    fn corrupted_envelope_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("user.json"), "not json at all").unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(matches!(store.get("user"), Err(HospitalError::Deserialization(_))));
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(store.set("../etc/passwd", "x", Duration::days(1)).is_err());
    }

    #[test]
    fn memory_store_honours_expiry() {
        let store = MemorySessionStore::new();
        store.set("token", "t", Duration::seconds(-5)).unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        assert!(!store.contains("token"));
    }
}
