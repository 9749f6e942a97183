//! Converter session
//!
//! Validates user input, runs conversions, and keeps the history and theme in
//! sync with the injected store.

use thiserror::Error;

use crate::catalog::{ConversionError, UnitConverter};
use crate::history::{ConversionRecord, SettingsStore, StoreError, ThemePreference};

/// Reasons a submitted conversion is rejected
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please select different units.")]
    SameUnits,

    #[error("Enter a valid number.")]
    InvalidNumber,

    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Result is out of range.")]
    ResultOutOfRange,

    #[error("Conversion succeeded but history could not be saved: {0}")]
    Storage(#[from] StoreError),
}

/// A successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub record: ConversionRecord,
    /// `"<value> <from> = <result> <to>"`, result to 4 decimal places
    pub display: String,
}

pub struct ConverterSession<S: SettingsStore> {
    converter: UnitConverter,
    store: S,
    history: Vec<ConversionRecord>,
    theme: ThemePreference,
}

impl<S: SettingsStore> ConverterSession<S> {
    /// Start a session, loading history and theme from `store`.
    ///
    /// Unreadable stored values are logged and replaced by defaults.
    pub fn new(converter: UnitConverter, store: S) -> Self {
        let history = store.load_history().unwrap_or_else(|e| {
            tracing::warn!("Starting with empty history: {}", e);
            Vec::new()
        });
        let theme = store.load_theme().unwrap_or_else(|e| {
            tracing::warn!("Using default theme: {}", e);
            ThemePreference::default()
        });

        tracing::info!(
            "Session started with {} history entries, {} theme",
            history.len(),
            theme.as_str()
        );

        Self {
            converter,
            store,
            history,
            theme,
        }
    }

    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unit names for the selection lists
    pub fn units(&self) -> Vec<String> {
        self.converter.available_units()
    }

    /// Validate, convert and record one conversion
    pub fn submit(
        &mut self,
        raw_value: &str,
        from: &str,
        to: &str,
    ) -> Result<ConversionOutcome, SubmitError> {
        if from == to {
            return Err(SubmitError::SameUnits);
        }
        let value = parse_value(raw_value).ok_or(SubmitError::InvalidNumber)?;

        let result = self.converter.convert(value, from, to)?;
        // Non-finite numbers do not survive the JSON history
        if !result.is_finite() {
            return Err(SubmitError::ResultOutOfRange);
        }
        let record = ConversionRecord::new(value, from, to, result);
        let display = record.summary();

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.push(record.clone());
        history.extend(self.history.iter().cloned());
        self.store.save_history(&history)?;
        self.history = history;

        Ok(ConversionOutcome { record, display })
    }

    /// History, most recent first
    pub fn history(&self) -> &[ConversionRecord] {
        &self.history
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.store.clear_history()?;
        self.history.clear();
        tracing::info!("Conversion history cleared");
        Ok(())
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemePreference) -> Result<ThemePreference, StoreError> {
        self.store.save_theme(theme)?;
        self.theme = theme;
        Ok(theme)
    }

    /// Switch between light and dark, returning the new theme
    pub fn toggle_theme(&mut self) -> Result<ThemePreference, StoreError> {
        self.set_theme(self.theme.toggled())
    }
}

/// Parse a user-entered number; empty, non-numeric and non-finite input is rejected
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
