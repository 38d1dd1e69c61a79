//! Durable history storage.
//!
//! One fixed key (`"history"`) holds a JSON-encoded sequence of strings.
//! Any other keys are out of scope.
//!
//! # Failure Model
//!
//! Storage never blocks the console: a missing store loads as an empty
//! sequence, corrupt data surfaces as [`Error::Storage`] and callers degrade
//! to an empty log, and a failed save is logged and otherwise ignored.

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Fixed storage key for the history sequence.
pub const HISTORY_KEY: &str = "history";

/// File name of the default store under the platform data directory.
const STORE_FILE: &str = "history.json";

// ============================================================================
// HistoryStore
// ============================================================================

/// Durable key-value persistence of the history sequence.
pub trait HistoryStore: Send {
    /// Loads the stored sequence; an absent store yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if stored data exists but cannot be
    /// decoded. Callers treat that as empty and continue.
    fn load(&self) -> Result<Vec<String>>;

    /// Writes the full sequence back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Json`] if the write fails.
    fn save(&self, entries: &[String]) -> Result<()>;
}

// ============================================================================
// StoreFile
// ============================================================================

/// On-disk layout: a JSON object with the one fixed key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    /// The history sequence under [`HISTORY_KEY`].
    #[serde(default)]
    history: Vec<String>,
}

// ============================================================================
// FileStore
// ============================================================================

/// File-backed store: a JSON object in a single file, replaced atomically
/// on every save via a staged temporary file.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path of the store file.
    path: PathBuf,
}

impl FileStore {
    /// Creates a store at the given path.
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default store path under the platform data directory,
    /// or `None` if the platform has no data directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("ws-console").join(STORE_FILE))
    }

    /// Returns the path of the store file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for FileStore {
    fn load(&self) -> Result<Vec<String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history store yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::storage(format!("read {}: {e}", self.path.display()))),
        };

        let store: StoreFile = serde_json::from_str(&raw)
            .map_err(|e| Error::storage(format!("decode {}: {e}", self.path.display())))?;

        debug!(
            path = %self.path.display(),
            entries = store.history.len(),
            "history store loaded"
        );

        Ok(store.history)
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        let store = StoreFile {
            history: entries.to_vec(),
        };
        let json = serde_json::to_string(&store)?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        // Stage in the same directory so the final rename stays atomic.
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged
            .persist(&self.path)
            .map_err(|e| Error::storage(format!("persist {}: {e}", self.path.display())))?;

        debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "history store saved"
        );

        Ok(())
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// The stored sequence.
    entries: Mutex<Vec<String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with entries.
    #[inline]
    #[must_use]
    pub fn with_entries(entries: Vec<String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().clone())
    }

    fn save(&self, entries: &[String]) -> Result<()> {
        *self.entries.lock() = entries.to_vec();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
