//! Session storage binding
//!
//! Where the backend client keeps the session between restarts. The rest of
//! the app never reads or writes it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::egui_app::backend::BackendError;
use crate::shared::Session;

/// Persistence for the current session
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<Session>, BackendError>;
    fn store(&self, session: &Session) -> Result<(), BackendError>;
    fn clear(&self) -> Result<(), BackendError>;
}

/// JSON file storage, written atomically
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/storefront/<storage key>.json`
    pub fn in_data_dir(storage_key: &str) -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join("storefront").join(format!("{}.json", storage_key))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Storage(format!("{}: {}", path.display(), err))
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<Session>, BackendError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_error(&self.path, err)),
        };

        match serde_json::from_slice::<Session>(&data) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                // A corrupt file is treated as signed out rather than a hard failure.
                tracing::warn!("[STORAGE] discarding unreadable session file {}: {}", self.path.display(), err);
                Ok(None)
            }
        }
    }

    fn store(&self, session: &Session) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(session).map_err(|e| storage_error(&self.path, e))?;
        fs::write(&tmp, data).map_err(|e| storage_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| storage_error(&self.path, e))?;
        tracing::debug!("[STORAGE] session written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), BackendError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(&self.path, err)),
        }
    }
}

/// Process-local storage, used when persistence is disabled
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<Session>, BackendError> {
        let guard = self
            .session
            .lock()
            .map_err(|_| BackendError::Storage("session lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn store(&self, session: &Session) -> Result<(), BackendError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| BackendError::Storage("session lock poisoned".to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), BackendError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| BackendError::Storage("session lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}
