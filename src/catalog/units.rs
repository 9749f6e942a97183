//! Unit catalog types
//!
//! Provides the unit definitions, their categories and the ordered catalog the
//! converter searches.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a unit converts to the other units of its category
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitKind {
    /// Multiplier to the category's reference unit
    Linear { factor: f64 },
    /// Affine scale, converted with fixed pairwise formulas
    Temperature,
}

impl UnitKind {
    pub fn is_temperature(&self) -> bool {
        matches!(self, UnitKind::Temperature)
    }

    /// Linear factor, if this is a linear unit
    pub fn factor(&self) -> Option<f64> {
        match self {
            UnitKind::Linear { factor } => Some(*factor),
            UnitKind::Temperature => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Linear { .. } => "linear",
            UnitKind::Temperature => "temp",
        }
    }
}

/// A single unit. Both `name` and `symbol` identify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawUnitDefinition", into = "RawUnitDefinition")]
pub struct UnitDefinition {
    pub name: String,
    pub symbol: String,
    pub kind: UnitKind,
}

impl UnitDefinition {
    pub fn linear(name: impl Into<String>, symbol: impl Into<String>, factor: f64) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind: UnitKind::Linear { factor },
        }
    }

    pub fn temperature(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind: UnitKind::Temperature,
        }
    }

    /// Whether `identifier` is this unit's name or symbol (exact, case-sensitive)
    pub fn matches(&self, identifier: &str) -> bool {
        self.name == identifier || self.symbol == identifier
    }

    /// The temperature scale for this unit, recognized from its symbol
    pub fn temperature_scale(&self) -> Option<TemperatureScale> {
        match self.kind {
            UnitKind::Temperature => TemperatureScale::from_symbol(&self.symbol),
            UnitKind::Linear { .. } => None,
        }
    }
}

/// Wire shape of a unit: `{name, symbol, type?, factor?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawUnitDefinition {
    name: String,
    symbol: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    factor: Option<f64>,
}

impl TryFrom<RawUnitDefinition> for UnitDefinition {
    type Error = String;

    fn try_from(raw: RawUnitDefinition) -> Result<Self, Self::Error> {
        if raw.name.trim().is_empty() || raw.symbol.trim().is_empty() {
            return Err("unit name and symbol cannot be empty".to_string());
        }

        let kind = match raw.kind.as_deref() {
            Some("temp") | Some("temperature") => UnitKind::Temperature,
            _ => match raw.factor {
                Some(factor) if factor.is_finite() && factor != 0.0 => {
                    UnitKind::Linear { factor }
                }
                Some(factor) => {
                    return Err(format!(
                        "unit '{}' has invalid factor {}",
                        raw.name, factor
                    ))
                }
                None => return Err(format!("linear unit '{}' is missing a factor", raw.name)),
            },
        };

        Ok(Self {
            name: raw.name,
            symbol: raw.symbol,
            kind,
        })
    }
}

impl From<UnitDefinition> for RawUnitDefinition {
    fn from(unit: UnitDefinition) -> Self {
        Self {
            kind: Some(unit.kind.as_str().to_string()),
            factor: unit.kind.factor(),
            name: unit.name,
            symbol: unit.symbol,
        }
    }
}

/// Temperature scales the pairwise formulas understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "°C" => Some(TemperatureScale::Celsius),
            "°F" => Some(TemperatureScale::Fahrenheit),
            "K" => Some(TemperatureScale::Kelvin),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
            TemperatureScale::Kelvin => "K",
        }
    }
}

/// A named group of units sharing a reference scale
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCategory {
    pub name: String,
    pub units: Vec<UnitDefinition>,
}

/// Ordered mapping from category name to its units.
///
/// Category order follows the source document, as does unit order inside a
/// category. Lookups depend on this order: the first match wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitCatalog {
    categories: Vec<UnitCategory>,
}

impl UnitCatalog {
    pub fn new(categories: Vec<UnitCategory>) -> Self {
        let mut catalog = Self::default();
        for category in categories {
            catalog.insert(category.name, category.units);
        }
        catalog
    }

    /// Insert a category, replacing the units of an existing one with the same
    /// name but keeping its position
    pub fn insert(&mut self, name: String, units: Vec<UnitDefinition>) {
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.units = units,
            None => self.categories.push(UnitCategory { name, units }),
        }
    }

    pub fn categories(&self) -> &[UnitCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&UnitCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All units in catalog order
    pub fn units(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.categories.iter().flat_map(|c| c.units.iter())
    }

    pub fn unit_count(&self) -> usize {
        self.categories.iter().map(|c| c.units.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.unit_count() == 0
    }

    /// Identifiers claimed by more than one unit.
    ///
    /// A unit whose name equals its own symbol is not a duplicate. Returned in
    /// order of second occurrence.
    pub fn duplicate_identifiers(&self) -> Vec<String> {
        let mut owners: HashMap<&str, usize> = HashMap::new();
        let mut duplicates: Vec<String> = Vec::new();

        for (index, unit) in self.units().enumerate() {
            let mut identifiers = vec![unit.name.as_str()];
            if unit.symbol != unit.name {
                identifiers.push(unit.symbol.as_str());
            }
            for identifier in identifiers {
                match owners.get(identifier) {
                    Some(&owner) if owner != index => {
                        if !duplicates.iter().any(|d| d == identifier) {
                            duplicates.push(identifier.to_string());
                        }
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(identifier, index);
                    }
                }
            }
        }

        duplicates
    }
}

impl Serialize for UnitCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.units)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UnitCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = UnitCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to a list of units")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut catalog = UnitCatalog::default();
                while let Some((name, units)) = map.next_entry::<String, Vec<UnitDefinition>>()? {
                    catalog.insert(name, units);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_linear_and_temperature_units() {
        let unit: UnitDefinition =
            serde_json::from_str(r#"{"name": "Meter", "symbol": "m", "type": "linear", "factor": 1}"#)
                .unwrap();
        assert_eq!(unit.kind, UnitKind::Linear { factor: 1.0 });

        let unit: UnitDefinition =
            serde_json::from_str(r#"{"name": "Celsius", "symbol": "°C", "type": "temp"}"#).unwrap();
        assert!(unit.kind.is_temperature());
        assert_eq!(unit.temperature_scale(), Some(TemperatureScale::Celsius));

        let unit: UnitDefinition =
            serde_json::from_str(r#"{"name": "Kelvin", "symbol": "K", "type": "temperature", "factor": 1}"#)
                .unwrap();
        assert_eq!(unit.kind, UnitKind::Temperature);
    }

    #[test]
    fn test_untyped_unit_is_linear() {
        let unit: UnitDefinition =
            serde_json::from_str(r#"{"name": "Foot", "symbol": "ft", "factor": 0.3048}"#).unwrap();
        assert_eq!(unit.kind.factor(), Some(0.3048));
    }

    #[test]
    fn test_linear_unit_requires_factor() {
        let err = serde_json::from_str::<UnitDefinition>(r#"{"name": "Foot", "symbol": "ft"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing a factor"));

        let err = serde_json::from_str::<UnitDefinition>(
            r#"{"name": "Nothing", "symbol": "n", "factor": 0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid factor"));
    }

    #[test]
    fn test_catalog_preserves_document_order() {
        let json = r#"{
            "volume": [{"name": "Liter", "symbol": "L", "factor": 1000}],
            "length": [
                {"name": "Meter", "symbol": "m", "factor": 1},
                {"name": "Centimeter", "symbol": "cm", "factor": 0.01}
            ],
            "area": []
        }"#;
        let catalog: UnitCatalog = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["volume", "length", "area"]);

        let units: Vec<&str> = catalog.units().map(|u| u.symbol.as_str()).collect();
        assert_eq!(units, vec!["L", "m", "cm"]);
        assert_eq!(catalog.unit_count(), 3);
    }

    #[test]
    fn test_catalog_serializes_as_map() {
        let catalog = UnitCatalog::new(vec![UnitCategory {
            name: "temperature".to_string(),
            units: vec![UnitDefinition::temperature("Kelvin", "K")],
        }]);
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"temperature": [{"name": "Kelvin", "symbol": "K", "type": "temp"}]})
        );
    }

    #[test]
    fn test_duplicate_identifiers() {
        let catalog = UnitCatalog::new(vec![
            UnitCategory {
                name: "mass".to_string(),
                units: vec![
                    UnitDefinition::linear("Ounce", "oz", 28.3495),
                    UnitDefinition::linear("g", "g", 1.0),
                ],
            },
            UnitCategory {
                name: "volume".to_string(),
                units: vec![UnitDefinition::linear("Fluid Ounce", "oz", 29.5735)],
            },
        ]);
        assert_eq!(catalog.duplicate_identifiers(), vec!["oz".to_string()]);
    }

    #[test]
    fn test_insert_replaces_existing_category_in_place() {
        let mut catalog = UnitCatalog::default();
        catalog.insert("a".to_string(), vec![UnitDefinition::linear("One", "1", 1.0)]);
        catalog.insert("b".to_string(), vec![]);
        catalog.insert("a".to_string(), vec![UnitDefinition::linear("Two", "2", 2.0)]);

        assert_eq!(catalog.categories()[0].name, "a");
        assert_eq!(catalog.categories()[0].units[0].name, "Two");
        assert_eq!(catalog.categories().len(), 2);
    }

    #[test]
    fn test_temperature_scale_symbols() {
        assert_eq!(TemperatureScale::from_symbol("°F"), Some(TemperatureScale::Fahrenheit));
        assert_eq!(TemperatureScale::from_symbol("C"), None);
        assert_eq!(TemperatureScale::Kelvin.symbol(), "K");
    }
}
