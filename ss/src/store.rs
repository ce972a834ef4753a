//! Core SessionStore implementation

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from session store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// File-backed session state store
///
/// One `{session_id}.json` file per session under the base directory.
/// Saves are atomic: the snapshot is written to a temp file in the same
/// directory and renamed into place, so a crash mid-save leaves the previous
/// snapshot intact.
pub struct SessionStore {
    base_path: PathBuf,
    lock_path: PathBuf,
}

impl SessionStore {
    /// Open or create a session store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        let lock_path = base_path.join(".lock");
        debug!(?base_path, "Opened session store");
        Ok(Self { base_path, lock_path })
    }

    /// Load the state for a session, or the default state if none exists
    ///
    /// Never fails for unknown session ids. A snapshot that exists but cannot
    /// be parsed is an error - silently replacing corrupt state would lose a
    /// conversation.
    pub fn load_or_create<T>(&self, session_id: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.session_path(session_id)?;
        debug!(%session_id, ?path, "load_or_create: called");

        if !path.exists() {
            debug!(%session_id, "load_or_create: no snapshot, returning default state");
            return Ok(T::default());
        }

        let content = fs::read_to_string(&path)?;
        let state = serde_json::from_str(&content)?;
        debug!(%session_id, bytes = content.len(), "load_or_create: snapshot loaded");
        Ok(state)
    }

    /// Atomically save the state for a session
    ///
    /// Last-writer-wins with respect to concurrent saves for the same id;
    /// callers are expected to serialize turns per session.
    pub fn save<T>(&self, session_id: &str, state: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let path = self.session_path(session_id)?;
        let tmp_path = self.base_path.join(format!("{}.json.tmp", session_id));
        debug!(%session_id, ?path, "save: called");

        let json = serde_json::to_string_pretty(state)?;

        // Advisory lock so two saves never interleave their write+rename
        let lock = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;
        // Fully qualified: std::fs::File grew its own lock methods, which
        // otherwise collide with the fs2 trait.
        fs2::FileExt::lock_exclusive(&lock)?;

        let result = (|| -> Result<(), StoreError> {
            let mut tmp = fs::File::create(&tmp_path)?;
            tmp.write_all(json.as_bytes())?;
            tmp.sync_all()?;
            fs::rename(&tmp_path, &path)?;
            Ok(())
        })();

        if let Err(e) = fs2::FileExt::unlock(&lock) {
            warn!(error = %e, "save: failed to release store lock");
        }

        if result.is_ok() {
            debug!(%session_id, bytes = json.len(), "save: snapshot written");
        }
        result
    }

    /// List all session ids with a persisted snapshot
    pub fn list_sessions(&self) -> Result<Vec<String>, StoreError> {
        debug!("list_sessions: called");
        let mut sessions = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                sessions.push(stem.to_string());
            }
        }
        sessions.sort();
        Ok(sessions)
    }

    /// Delete a session snapshot, returning whether one existed
    ///
    /// Retention tooling only - the conversation core never deletes state.
    pub fn delete(&self, session_id: &str) -> Result<bool, StoreError> {
        let path = self.session_path(session_id)?;
        debug!(%session_id, "delete: called");
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        info!(%session_id, "Deleted session snapshot");
        Ok(true)
    }

    /// Validate a session id and build its snapshot path
    ///
    /// Ids become file names, so anything that could escape the base
    /// directory is rejected.
    fn session_path(&self, session_id: &str) -> Result<PathBuf, StoreError> {
        if session_id.is_empty() {
            return Err(StoreError::InvalidSessionId("empty".to_string()));
        }
        let valid = session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
        if !valid || session_id.starts_with('.') {
            return Err(StoreError::InvalidSessionId(session_id.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", session_id)))
    }
}
