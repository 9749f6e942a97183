//! Conversion Tools
//!
//! Tools for listing, resolving and converting units.

use serde::Serialize;

use crate::catalog::{UnitCatalog, UnitDefinition};
use crate::history::{ConversionRecord, SettingsStore};
use crate::session::{ConverterSession, SubmitError};

/// Unit detail for list/resolve results
#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    pub category: String,
}

impl UnitSummary {
    fn from_unit(unit: &UnitDefinition, category: &str) -> Self {
        Self {
            name: unit.name.clone(),
            symbol: unit.symbol.clone(),
            kind: unit.kind.as_str(),
            factor: unit.kind.factor(),
            category: category.to_string(),
        }
    }
}

/// Units of one category
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub units: Vec<UnitSummary>,
}

/// Response for list_units
#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    /// Distinct unit names, for selection lists
    pub units: Vec<String>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategorySummary>>,
}

/// Response for resolve_unit
#[derive(Debug, Serialize)]
pub struct ResolveUnitResponse {
    pub found: bool,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<UnitSummary>,
}

/// Response for convert
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ConversionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// List available units, optionally grouped by category
pub fn list_units<S: SettingsStore>(session: &ConverterSession<S>, grouped: bool) -> ListUnitsResponse {
    let units = session.units();
    let total = units.len();

    let categories: Option<Vec<CategorySummary>> = grouped.then(|| {
        session
            .converter()
            .catalog()
            .categories()
            .iter()
            .map(|category| CategorySummary {
                name: category.name.clone(),
                units: category
                    .units
                    .iter()
                    .map(|unit| UnitSummary::from_unit(unit, &category.name))
                    .collect(),
            })
            .collect()
    });

    ListUnitsResponse {
        units,
        total,
        categories,
    }
}

/// Look up a unit by name or symbol
pub fn resolve_unit<S: SettingsStore>(
    session: &ConverterSession<S>,
    identifier: &str,
) -> ResolveUnitResponse {
    let converter = session.converter();
    let unit = converter.resolve(identifier).map(|unit| {
        let category = category_of(converter.catalog(), unit).unwrap_or_default();
        UnitSummary::from_unit(unit, category)
    });

    ResolveUnitResponse {
        found: unit.is_some(),
        identifier: identifier.to_string(),
        unit,
    }
}

/// Convert a value and record it in history.
///
/// Rejected input is reported in the response; only a storage failure is an
/// error.
pub fn convert<S: SettingsStore>(
    session: &mut ConverterSession<S>,
    value: &str,
    from: &str,
    to: &str,
) -> Result<ConvertResponse, String> {
    match session.submit(value, from, to) {
        Ok(outcome) => Ok(ConvertResponse {
            success: true,
            display: Some(outcome.display),
            record: Some(outcome.record),
            error: None,
        }),
        Err(SubmitError::Storage(e)) => Err(format!("Failed to save history: {}", e)),
        Err(e) => Ok(ConvertResponse {
            success: false,
            display: None,
            record: None,
            error: Some(e.to_string()),
        }),
    }
}

fn category_of<'a>(catalog: &'a UnitCatalog, unit: &UnitDefinition) -> Option<&'a str> {
    catalog
        .categories()
        .iter()
        .find(|category| category.units.iter().any(|u| u == unit))
        .map(|category| category.name.as_str())
}
