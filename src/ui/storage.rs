//! Client-local durable storage for the session artifact
//!
//! The login flow talks to a [`KeyValueStorage`] instead of `localStorage`
//! directly, so tests can run against [`MemoryStorage`].

use std::collections::HashMap;

use crate::core::SessionArtifact;

/// Storage key for the raw session token
pub const STORAGE_KEY_TOKEN: &str = "token";

/// Storage key for the JSON-serialized user
pub const STORAGE_KEY_USER: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,

    #[error("Failed to write {0}")]
    WriteFailed(String),

    #[error("Failed to encode session: {0}")]
    Encode(String),
}

/// String key-value storage
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// The browser's `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn local_storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local_storage().ok()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed(key.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .remove_item(key)
            .map_err(|_| StorageError::WriteFailed(key.to_string()))
    }
}

/// SSR stubs - there is no browser storage on the server
#[cfg(not(feature = "hydrate"))]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Persist `token` as-is and `user` as JSON
pub fn save_session(
    storage: &mut impl KeyValueStorage,
    session: &SessionArtifact,
) -> Result<(), StorageError> {
    let user =
        serde_json::to_string(&session.user).map_err(|e| StorageError::Encode(e.to_string()))?;
    storage.set(STORAGE_KEY_TOKEN, &session.token)?;
    if let Err(e) = storage.set(STORAGE_KEY_USER, &user) {
        // a token without its user is not a session
        let _ = storage.remove(STORAGE_KEY_TOKEN);
        return Err(e);
    }
    Ok(())
}

/// Read back a stored session, if both keys are present and the user parses
pub fn load_session(storage: &impl KeyValueStorage) -> Option<SessionArtifact> {
    let token = storage.get(STORAGE_KEY_TOKEN)?;
    let user = serde_json::from_str(&storage.get(STORAGE_KEY_USER)?).ok()?;
    Some(SessionArtifact { token, user })
}

/// Remove the stored session
pub fn clear_session(storage: &mut impl KeyValueStorage) -> Result<(), StorageError> {
    storage.remove(STORAGE_KEY_TOKEN)?;
    storage.remove(STORAGE_KEY_USER)
}
