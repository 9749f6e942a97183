//! Unit conversion
//!
//! Resolves unit identifiers against a catalog and converts values between
//! them.

use std::collections::HashSet;

use thiserror::Error;

use super::units::{TemperatureScale, UnitCatalog, UnitDefinition, UnitKind};

/// Conversion failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Cannot convert between '{from}' and '{to}': temperature units only convert to other temperature units")]
    IncompatibleUnits { from: String, to: String },
}

/// Lookup-based converter over an immutable catalog
#[derive(Debug, Clone)]
pub struct UnitConverter {
    catalog: UnitCatalog,
}

impl UnitConverter {
    pub fn new(catalog: UnitCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// Find the first unit, in catalog order, whose name or symbol is `identifier`
    ///
    /// Linear scan; catalogs are small and static.
    pub fn resolve(&self, identifier: &str) -> Option<&UnitDefinition> {
        self.catalog.units().find(|unit| unit.matches(identifier))
    }

    /// Convert `value` from one unit to another
    ///
    /// Two temperature units use the pairwise formulas; two linear units go
    /// through the common reference scale: `value * from.factor / to.factor`.
    /// A temperature unit paired with a linear one is rejected.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let from_unit = self
            .resolve(from)
            .ok_or_else(|| ConversionError::UnitNotFound(from.to_string()))?;
        let to_unit = self
            .resolve(to)
            .ok_or_else(|| ConversionError::UnitNotFound(to.to_string()))?;

        let result = match (from_unit.kind, to_unit.kind) {
            (UnitKind::Temperature, UnitKind::Temperature) => {
                convert_temperature(value, &from_unit.symbol, &to_unit.symbol)
            }
            (UnitKind::Linear { factor: from_factor }, UnitKind::Linear { factor: to_factor }) => {
                (value * from_factor) / to_factor
            }
            _ => {
                return Err(ConversionError::IncompatibleUnits {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            }
        };

        tracing::debug!("Converted {} {} -> {} {}", value, from, result, to);
        Ok(result)
    }

    /// Every unit name once, in first-occurrence order
    pub fn available_units(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.catalog
            .units()
            .filter(|unit| seen.insert(unit.name.as_str()))
            .map(|unit| unit.name.clone())
            .collect()
    }
}

/// Convert between temperature scales identified by symbol (°C, °F, K)
///
/// Any pair outside the six supported directions, including a scale to
/// itself or an unrecognized symbol, returns `value` unchanged.
pub fn convert_temperature(value: f64, from_symbol: &str, to_symbol: &str) -> f64 {
    use TemperatureScale::{Celsius, Fahrenheit, Kelvin};

    let from = TemperatureScale::from_symbol(from_symbol);
    let to = TemperatureScale::from_symbol(to_symbol);

    match (from, to) {
        (Some(Celsius), Some(Fahrenheit)) => (value * 9.0 / 5.0) + 32.0,
        (Some(Fahrenheit), Some(Celsius)) => (value - 32.0) * 5.0 / 9.0,
        (Some(Kelvin), Some(Celsius)) => value - 273.15,
        (Some(Celsius), Some(Kelvin)) => value + 273.15,
        (Some(Fahrenheit), Some(Kelvin)) => ((value - 32.0) * 5.0 / 9.0) + 273.15,
        (Some(Kelvin), Some(Fahrenheit)) => ((value - 273.15) * 9.0 / 5.0) + 32.0,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::units::UnitCategory;

    fn test_catalog() -> UnitCatalog {
        UnitCatalog::new(vec![
            UnitCategory {
                name: "length".to_string(),
                units: vec![
                    UnitDefinition::linear("Meter", "m", 1.0),
                    UnitDefinition::linear("Kilometer", "km", 1000.0),
                    UnitDefinition::linear("Foot", "ft", 0.3048),
                    UnitDefinition::linear("Inch", "in", 0.0254),
                ],
            },
            UnitCategory {
                name: "temperature".to_string(),
                units: vec![
                    UnitDefinition::temperature("Celsius", "°C"),
                    UnitDefinition::temperature("Fahrenheit", "°F"),
                    UnitDefinition::temperature("Kelvin", "K"),
                    UnitDefinition::temperature("Rankine", "°R"),
                ],
            },
            UnitCategory {
                name: "distance".to_string(),
                units: vec![
                    UnitDefinition::linear("Meter", "metre", 1.0),
                    UnitDefinition::linear("Mile", "mi", 1609.344),
                ],
            },
        ])
    }

    fn converter() -> UnitConverter {
        UnitConverter::new(test_catalog())
    }

    #[test]
    fn test_resolve_by_name_and_symbol() {
        let c = converter();
        assert_eq!(c.resolve("Kilometer").unwrap().symbol, "km");
        assert_eq!(c.resolve("km").unwrap().name, "Kilometer");
        assert_eq!(c.resolve("°F").unwrap().name, "Fahrenheit");
    }

    #[test]
    fn test_resolve_is_exact_and_case_sensitive() {
        let c = converter();
        assert!(c.resolve("kilometer").is_none());
        assert!(c.resolve("KM").is_none());
        assert!(c.resolve(" km").is_none());
        assert!(c.resolve("parsec").is_none());
    }

    #[test]
    fn test_resolve_returns_first_match_in_catalog_order() {
        let c = converter();
        // "Meter" exists in both length and distance; length comes first
        assert_eq!(c.resolve("Meter").unwrap().symbol, "m");
        assert_eq!(c.resolve("metre").unwrap().name, "Meter");
    }

    #[test]
    fn test_linear_conversion_formula() {
        let c = converter();
        let units = [("m", 1.0), ("km", 1000.0), ("ft", 0.3048), ("in", 0.0254), ("mi", 1609.344)];
        for (from, f1) in units {
            for (to, f2) in units {
                let result = c.convert(12.5, from, to).unwrap();
                assert_eq!(result, 12.5 * f1 / f2, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_linear_round_trip() {
        let c = converter();
        for value in [0.0, 1.0, -3.75, 1234.5678, 1e-6] {
            let there = c.convert(value, "ft", "mi").unwrap();
            let back = c.convert(there, "mi", "ft").unwrap();
            assert!((back - value).abs() < 1e-9, "{} came back as {}", value, back);
        }
    }

    #[test]
    fn test_temperature_identities() {
        let c = converter();
        assert!((c.convert(100.0, "°C", "°F").unwrap() - 212.0).abs() < 1e-9);
        assert!((c.convert(32.0, "°F", "°C").unwrap() - 0.0).abs() < 1e-9);
        assert!((c.convert(0.0, "°C", "K").unwrap() - 273.15).abs() < 1e-9);
        assert!((c.convert(273.15, "K", "°C").unwrap() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_kelvin_fahrenheit() {
        let c = converter();
        assert!((c.convert(212.0, "Fahrenheit", "Kelvin").unwrap() - 373.15).abs() < 1e-9);
        assert!((c.convert(373.15, "K", "°F").unwrap() - 212.0).abs() < 1e-9);
        assert!((c.convert(-40.0, "°C", "°F").unwrap() + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity_conversion() {
        let c = converter();
        assert_eq!(c.convert(42.0, "km", "km").unwrap(), 42.0);
        assert_eq!(c.convert(42.0, "Kilometer", "km").unwrap(), 42.0);
        assert_eq!(c.convert(-7.5, "°C", "°C").unwrap(), -7.5);
        assert_eq!(c.convert(300.0, "K", "Kelvin").unwrap(), 300.0);
    }

    #[test]
    fn test_unrecognized_temperature_pair_returns_input() {
        let c = converter();
        assert_eq!(c.convert(500.0, "°R", "°C").unwrap(), 500.0);
        assert_eq!(convert_temperature(10.0, "°X", "°Y"), 10.0);
    }

    #[test]
    fn test_unknown_unit_is_not_found() {
        let c = converter();
        assert_eq!(
            c.convert(1.0, "parsec", "m"),
            Err(ConversionError::UnitNotFound("parsec".to_string()))
        );
        assert_eq!(
            c.convert(1.0, "m", "league"),
            Err(ConversionError::UnitNotFound("league".to_string()))
        );
    }

    #[test]
    fn test_not_found_is_distinct_from_zero() {
        let c = converter();
        assert_eq!(c.convert(0.0, "m", "ft"), Ok(0.0));
        assert!(c.convert(0.0, "m", "nope").is_err());
    }

    #[test]
    fn test_mixed_temperature_and_linear_rejected() {
        let c = converter();
        assert_eq!(
            c.convert(10.0, "°C", "m"),
            Err(ConversionError::IncompatibleUnits {
                from: "°C".to_string(),
                to: "m".to_string()
            })
        );
        assert!(matches!(
            c.convert(10.0, "ft", "K"),
            Err(ConversionError::IncompatibleUnits { .. })
        ));
    }

    #[test]
    fn test_linear_units_convert_across_categories() {
        let catalog = UnitCatalog::new(vec![
            UnitCategory {
                name: "length".to_string(),
                units: vec![UnitDefinition::linear("Meter", "m", 1.0)],
            },
            UnitCategory {
                name: "mass".to_string(),
                units: vec![UnitDefinition::linear("Kilogram", "kg", 1000.0)],
            },
        ]);
        let c = UnitConverter::new(catalog);
        assert_eq!(c.convert(1.0, "m", "kg"), Ok(0.001));
        assert_eq!(c.convert(2.0, "kg", "m"), Ok(2000.0));
    }

    #[test]
    fn test_available_units_deduplicated() {
        let c = converter();
        let units = c.available_units();
        assert_eq!(units.iter().filter(|u| *u == "Meter").count(), 1);
        assert_eq!(units.len(), 9);
        assert_eq!(units[0], "Meter");
        assert!(units.contains(&"Mile".to_string()));
    }
}
