//! Status Tool
//!
//! Provides runtime status information about the converter service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const CONVERTER_INSTRUCTIONS: &str = r#"
# Unit Converter Instructions

## Converting

1. Call `list_units` to see the available units (use `grouped: true` to see categories and symbols).
2. Call `convert` with `value`, `from` and `to`. Units may be given by name ("Kilometer") or symbol ("km").
   Matching is exact and case-sensitive.
3. The response contains `display`, e.g. `"1 Kilometer = 1000.0000 Meter"`, and the stored history record.

## Rules

- `from` and `to` must differ: "Please select different units."
- `value` must be a finite number: "Enter a valid number."
- Temperature units (°C, °F, K) convert only to other temperature units.
- Any two non-temperature units convert by their factors, even across categories
  (1 Meter to Gram gives 1). Pick units from the same category for a meaningful result.
- Unknown units are reported as "Unit not found".

## History

- Every successful conversion is added to the front of the history.
- `get_history` returns it most recent first; `clear_history` empties it.

## Theme

- `get_theme`, `set_theme` (`light` or `dark`), `toggle_theme`.
"#;

/// Runtime status of the converter service
#[derive(Debug, Clone, Serialize)]
pub struct UconvStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Catalog and history information
    pub catalog_categories: usize,
    pub catalog_units: usize,
    pub history_entries: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Catalog and history counts supplied by the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCounts {
    pub catalog_categories: usize,
    pub catalog_units: usize,
    pub history_entries: usize,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self, counts: SessionCounts) -> UconvStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        UconvStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            catalog_categories: counts.catalog_categories,
            catalog_units: counts.catalog_units,
            history_entries: counts.history_entries,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_counts() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/uconv.db"));
        let status = tracker.get_status(SessionCounts {
            catalog_categories: 6,
            catalog_units: 37,
            history_entries: 2,
        });
        assert_eq!(status.catalog_units, 37);
        assert_eq!(status.history_entries, 2);
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_instructions_describe_cross_category_conversion() {
        assert!(CONVERTER_INSTRUCTIONS.contains("convert only to other temperature units"));
        assert!(CONVERTER_INSTRUCTIONS.contains("even across categories"));
        assert!(!CONVERTER_INSTRUCTIONS.contains("same category only"));
    }
}
