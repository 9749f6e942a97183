//! Unit catalog module
//!
//! Unit definitions, catalog loading and conversion.

pub mod converter;
pub mod loader;
pub mod units;

pub use converter::{convert_temperature, ConversionError, UnitConverter};
pub use loader::{CatalogError, CatalogResult, BUILTIN_CATALOG_JSON};
pub use units::{TemperatureScale, UnitCatalog, UnitCategory, UnitDefinition, UnitKind};
