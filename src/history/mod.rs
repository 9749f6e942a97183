//! Conversion history and preferences
//!
//! Records, the persistence capability and its implementations.

pub mod record;
pub mod sqlite;
pub mod store;

pub use record::{format_conversion, ConversionRecord, ThemePreference};
pub use sqlite::SqliteStore;
pub use store::{
    KeyValueStore, MemoryStore, SettingsStore, StoreError, StoreResult, HISTORY_KEY, THEME_KEY,
};
