//! Persistence capability
//!
//! A string key-value store (the shape of browser local storage) and the
//! history/theme accessors layered on top of it.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use super::record::{ConversionRecord, ThemePreference};
use crate::db::DbError;

/// Key holding the JSON-encoded history, most recent first
pub const HISTORY_KEY: &str = "conversionHistory";
/// Key holding the bare theme name
pub const THEME_KEY: &str = "theme";

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage database error: {0}")]
    Db(#[from] DbError),

    #[error("Stored value could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Db(DbError::Sqlite(e))
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Raw string storage
pub trait KeyValueStore: Send {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

/// History and theme persistence, injected into the session
pub trait SettingsStore: Send {
    /// Stored history, most recent first; empty when nothing is stored
    fn load_history(&self) -> StoreResult<Vec<ConversionRecord>>;
    fn save_history(&self, history: &[ConversionRecord]) -> StoreResult<()>;
    fn clear_history(&self) -> StoreResult<()>;
    /// Stored theme; light when nothing (or something unrecognized) is stored
    fn load_theme(&self) -> StoreResult<ThemePreference>;
    fn save_theme(&self, theme: ThemePreference) -> StoreResult<()>;
}

impl<T: KeyValueStore> SettingsStore for T {
    fn load_history(&self) -> StoreResult<Vec<ConversionRecord>> {
        match self.get_item(HISTORY_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_history(&self, history: &[ConversionRecord]) -> StoreResult<()> {
        let json = serde_json::to_string(history)?;
        self.set_item(HISTORY_KEY, &json)
    }

    fn clear_history(&self) -> StoreResult<()> {
        self.remove_item(HISTORY_KEY)
    }

    fn load_theme(&self) -> StoreResult<ThemePreference> {
        let stored = self.get_item(THEME_KEY)?;
        let theme = stored.as_deref().and_then(ThemePreference::from_str);
        if theme.is_none() {
            if let Some(value) = stored {
                tracing::warn!("Ignoring unrecognized stored theme '{}'", value);
            }
        }
        Ok(theme.unwrap_or_default())
    }

    fn save_theme(&self, theme: ThemePreference) -> StoreResult<()> {
        self.set_item(THEME_KEY, theme.as_str())
    }
}

/// Process-local store, for tests and one-off sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let mut items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}
