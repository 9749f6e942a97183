//! History record and theme preference
//!
//! The values the converter persists between sessions.

use serde::{Deserialize, Serialize};

/// One successful conversion.
///
/// Serialized with the short keys used by existing history data:
/// `value`, `from`, `to`, `result`, `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    #[serde(rename = "value")]
    pub input_value: f64,
    #[serde(rename = "from")]
    pub from_unit: String,
    #[serde(rename = "to")]
    pub to_unit: String,
    #[serde(rename = "result")]
    pub result_value: f64,
    pub timestamp: String,
}

impl ConversionRecord {
    /// Create a record stamped with the current UTC time
    pub fn new(
        input_value: f64,
        from_unit: impl Into<String>,
        to_unit: impl Into<String>,
        result_value: f64,
    ) -> Self {
        Self {
            input_value,
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
            result_value,
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }

    /// `"<value> <from> = <result to 4 dp> <to>"`
    pub fn summary(&self) -> String {
        format_conversion(self.input_value, &self.from_unit, self.result_value, &self.to_unit)
    }
}

/// Magnitude from which numbers are written in exponent form
const EXPONENT_ABOVE: f64 = 1e21;
/// Non-zero input values below this magnitude are written in exponent form
const EXPONENT_BELOW: f64 = 1e-6;

/// Format a conversion for display, result rounded to 4 decimal places.
///
/// Very large numbers, and very small non-zero input values, use exponent
/// form (`1e308`, `1e-7`, `1.0000e25`).
pub fn format_conversion(value: f64, from: &str, result: f64, to: &str) -> String {
    let value = if value != 0.0 && (value.abs() >= EXPONENT_ABOVE || value.abs() < EXPONENT_BELOW) {
        format!("{:e}", value)
    } else {
        value.to_string()
    };
    let result = if result.abs() >= EXPONENT_ABOVE {
        format!("{:.4e}", result)
    } else {
        format!("{:.4}", result)
    };
    format!("{} {} = {} {}", value, from, result, to)
}

/// UI colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Label for the toggle control: the theme it switches to
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemePreference::Light => "🌙",
            ThemePreference::Dark => "☀️",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_short_keys() {
        let record = ConversionRecord {
            input_value: 1.5,
            from_unit: "km".to_string(),
            to_unit: "m".to_string(),
            result_value: 1500.0,
            timestamp: "2026-01-13T08:30:00Z".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "value": 1.5,
                "from": "km",
                "to": "m",
                "result": 1500.0,
                "timestamp": "2026-01-13T08:30:00Z"
            })
        );
    }

    #[test]
    fn test_summary_rounds_to_four_places() {
        let record = ConversionRecord::new(1.0, "in", "cm", 2.54);
        assert_eq!(record.summary(), "1 in = 2.5400 cm");
        assert_eq!(format_conversion(2.5, "mi", 4.02336, "km"), "2.5 mi = 4.0234 km");
    }

    #[test]
    fn test_extreme_values_use_exponent_form() {
        assert_eq!(format_conversion(1e308, "GB", 1e300, "B"), "1e308 GB = 1.0000e300 B");
        assert_eq!(format_conversion(1e-7, "km", 1e-4, "m"), "1e-7 km = 0.0001 m");
        assert_eq!(format_conversion(0.000001, "km", 0.001, "m"), "0.000001 km = 0.0010 m");
        assert_eq!(format_conversion(0.0, "m", 0.0, "ft"), "0 m = 0.0000 ft");
        assert_eq!(format_conversion(-2e22, "B", -2e22, "B"), "-2e22 B = -2.0000e22 B");
    }

    #[test]
    fn test_new_record_has_timestamp() {
        let record = ConversionRecord::new(1.0, "m", "ft", 3.28084);
        assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
    }

    #[test]
    fn test_theme_parsing_and_toggle() {
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
        assert_eq!(ThemePreference::from_str("Dark"), Some(ThemePreference::Dark));
        assert_eq!(ThemePreference::from_str("sepia"), None);
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled().as_str(), "light");
    }
}
