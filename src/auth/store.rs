//! Durable slot for the current session token.
//!
//! The browser client keeps the token in local storage under a single fixed
//! key. `FileStore` mirrors that layout on disk as a JSON object so the token
//! survives restarts of the host; `MemoryStore` keeps it for the life of the
//! process and is what tests inject.

use super::{error::StoreError, types::SessionToken};
use serde_json::{Map, Value};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};
use tracing::debug;

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Single-slot, last-write-wins token storage.
pub trait SessionStore {
    /// Overwrites any existing token.
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn save(&self, token: &SessionToken) -> Result<(), StoreError>;

    /// Returns the current token, or `None` if none was saved or it was cleared.
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be read.
    fn load(&self) -> Result<Option<SessionToken>, StoreError>;

    /// Removes the token.
    ///
    /// # Errors
    /// Returns `StoreError` if the backing storage cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-wide in-memory slot. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<SessionToken>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<SessionToken>) -> T) -> T {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut slot)
    }
}

impl SessionStore for MemoryStore {
    fn save(&self, token: &SessionToken) -> Result<(), StoreError> {
        self.with_slot(|slot| *slot = Some(token.clone()));
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionToken>, StoreError> {
        Ok(self.with_slot(|slot| slot.clone()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.with_slot(|slot| *slot = None);
        Ok(())
    }
}

/// JSON document on disk holding the token under [`TOKEN_KEY`].
///
/// Other keys already present in the document are left untouched.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes through a sibling temp file and renames it into place so a
    /// crash never leaves a half-written document.
    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        let payload = serde_json::to_vec_pretty(document)?;
        let mut file = open_private(&tmp_path)?;
        file.write_all(&payload)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl SessionStore for FileStore {
    fn save(&self, token: &SessionToken) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        document.insert(
            TOKEN_KEY.to_string(),
            Value::String(token.expose().to_string()),
        );
        self.write_document(&document)?;
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionToken>, StoreError> {
        let document = self.read_document()?;
        Ok(document
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .and_then(SessionToken::new))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        if document.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_document(&document)?;
        debug!(path = %self.path.display(), "session token cleared");
        Ok(())
    }
}
