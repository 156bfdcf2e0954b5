//! Persisted client-side key/value storage.
//!
//! Holds the small bits of state a browser client would keep in local
//! storage: the selected language and an optional bearer token. File-backed
//! stores re-read the file on every `get`, so changes written by another
//! process are visible immediately.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::config::Config;
use crate::error::{FolioError, Result};

/// Storage key holding the bearer token sent with API requests.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the selected locale code.
pub const LANG_KEY: &str = "lang";

// ============================================================================
// Client Storage
// ============================================================================

/// JSON-file key/value store, or a purely in-memory one.
pub struct ClientStorage {
    path: Option<PathBuf>,
    entries: Mutex<HashMap<String, String>>,
}

/// On-disk shape of the storage file.
#[derive(serde::Serialize, serde::Deserialize, Default)]
struct StorageFile {
    entries: HashMap<String, String>,
}

impl ClientStorage {
    /// Open the store at `~/.folio/storage.json`.
    pub fn open_default() -> Self {
        Self::open(Config::dir().join("storage.json"))
    }

    /// Open a file-backed store. The file is created on first write.
    pub fn open(path: PathBuf) -> Self {
        let entries = load_file(&path).entries;
        Self {
            path: Some(path),
            entries: Mutex::new(entries),
        }
    }

    /// Store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read a value. Blank values read as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.lock();
        if let Some(path) = &self.path {
            *entries = load_file(path).entries;
        }
        entries.get(key).filter(|v| !v.trim().is_empty()).cloned()
    }

    /// Write a value and persist it.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.lock();
        if let Some(path) = &self.path {
            *entries = load_file(path).entries;
        }
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    /// Remove a value. Returns whether it was present.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.lock();
        if let Some(path) = &self.path {
            *entries = load_file(path).entries;
        }
        let removed = entries.remove(key).is_some();
        if removed {
            self.persist(&entries)?;
        }
        Ok(removed)
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FolioError::Storage(format!(
                    "Failed to create storage directory {:?}: {}",
                    parent, e
                ))
            })?;
        }

        let file = StorageFile {
            entries: entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| FolioError::Storage(format!("Failed to serialize storage: {}", e)))?;

        std::fs::write(path, json).map_err(|e| {
            FolioError::Storage(format!("Failed to write storage at {:?}: {}", path, e))
        })?;

        // Holds the bearer token; owner-only on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }

        Ok(())
    }
}

fn load_file(path: &Path) -> StorageFile {
    match std::fs::read_to_string(path) {
        Ok(data) if data.trim().is_empty() => StorageFile::default(),
        Ok(data) => match serde_json::from_str(&data) {
            Ok(file) => file,
            Err(e) => {
                warn!("Client storage file is corrupt, reading as empty: {}", e);
                StorageFile::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StorageFile::default(),
        Err(e) => {
            warn!("Failed to read client storage, reading as empty: {}", e);
            StorageFile::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
