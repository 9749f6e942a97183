//! History Tools
//!
//! Tools for reading and clearing conversion history.

use serde::Serialize;

use crate::history::{ConversionRecord, SettingsStore};
use crate::session::ConverterSession;

/// History entry with its display line
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: ConversionRecord,
    pub display: String,
}

/// Response for get_history
#[derive(Debug, Serialize)]
pub struct GetHistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub returned: usize,
    pub total: usize,
}

/// Response for clear_history
#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub cleared: usize,
}

/// Most recent conversions first
pub fn get_history<S: SettingsStore>(
    session: &ConverterSession<S>,
    limit: Option<usize>,
) -> GetHistoryResponse {
    let history = session.history();
    let limit = limit.unwrap_or(history.len()).min(history.len());

    let entries: Vec<HistoryEntry> = history[..limit]
        .iter()
        .map(|record| HistoryEntry {
            display: record.summary(),
            record: record.clone(),
        })
        .collect();

    GetHistoryResponse {
        returned: entries.len(),
        total: history.len(),
        entries,
    }
}

pub fn clear_history<S: SettingsStore>(
    session: &mut ConverterSession<S>,
) -> Result<ClearHistoryResponse, String> {
    let cleared = session.history().len();
    session
        .clear_history()
        .map_err(|e| format!("Failed to clear history: {}", e))?;

    Ok(ClearHistoryResponse {
        success: true,
        cleared,
    })
}
