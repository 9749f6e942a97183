//! Catalog loading
//!
//! Reads a unit catalog from JSON, either the embedded default or a file, and
//! reports anomalies the converter tolerates but callers should know about.

use std::path::Path;

use thiserror::Error;

use super::units::UnitCatalog;

/// Default catalog compiled into the binary
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../data/units.json");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl UnitCatalog {
    /// Parse a catalog document, keeping category and unit order
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let catalog: UnitCatalog = serde_json::from_str(json)?;
        if catalog.is_empty() {
            return Err(CatalogError::Invalid("catalog contains no units".to_string()));
        }
        catalog.report_anomalies();
        Ok(catalog)
    }

    /// Read and parse a catalog file
    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading unit catalog from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The embedded default catalog
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
    }

    fn report_anomalies(&self) {
        tracing::info!(
            "Loaded unit catalog: {} categories, {} units",
            self.categories().len(),
            self.unit_count()
        );

        // Lookup returns the first match, so later owners of these are unreachable
        for identifier in self.duplicate_identifiers() {
            tracing::warn!("Unit identifier '{}' is defined more than once", identifier);
        }

        for unit in self.units() {
            if unit.kind.is_temperature() && unit.temperature_scale().is_none() {
                tracing::warn!(
                    "Temperature unit '{}' has unrecognized symbol '{}'; conversions will return the input unchanged",
                    unit.name,
                    unit.symbol
                );
            }
        }
    }
}
