//! Converter MCP Server Implementation
//!
//! Implements the MCP server with all converter tools.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::history::SqliteStore;
use crate::session::ConverterSession;
use crate::tools::conversions;
use crate::tools::history;
use crate::tools::settings;
use crate::tools::status::{SessionCounts, StatusTracker};

type Session = ConverterSession<SqliteStore>;

/// Converter MCP Service
#[derive(Clone)]
pub struct UconvService {
    status_tracker: Arc<tokio::sync::Mutex<StatusTracker>>,
    session: Arc<Mutex<Session>>,
    tool_router: ToolRouter<UconvService>,
}

impl UconvService {
    pub fn new(database_path: PathBuf, session: Session) -> Self {
        Self {
            status_tracker: Arc::new(tokio::sync::Mutex::new(StatusTracker::new(database_path))),
            session: Arc::new(Mutex::new(session)),
            tool_router: Self::tool_router(),
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>, McpError> {
        self.session
            .lock()
            .map_err(|_| McpError::internal_error("Session lock poisoned", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// A number, or text holding one
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    fn as_text(&self) -> String {
        match self {
            NumericInput::Number(n) => n.to_string(),
            NumericInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertParams {
    /// Value to convert
    pub value: NumericInput,
    /// Source unit name or symbol (e.g. "Kilometer" or "km")
    pub from: String,
    /// Target unit name or symbol
    pub to: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListUnitsParams {
    /// Include categories with symbols and factors (default false)
    #[serde(default)]
    pub grouped: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveUnitParams {
    /// Unit name or symbol, matched exactly
    pub identifier: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetHistoryParams {
    /// Maximum entries to return, most recent first (default all)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetThemeParams {
    /// "light" or "dark"
    pub theme: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl UconvService {
    // --- Status ---

    #[tool(description = "Get the current status of the converter service including build info, catalog size, history size, and process information")]
    async fn uconv_status(&self) -> Result<CallToolResult, McpError> {
        let counts = {
            let session = self.session()?;
            let catalog = session.converter().catalog();
            SessionCounts {
                catalog_categories: catalog.categories().len(),
                catalog_units: catalog.unit_count(),
                history_entries: session.history().len(),
            }
        };
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status(counts))
    }

    #[tool(description = "Get instructions for using the unit converter tools. Call this when unsure how units are named or how conversions are validated.")]
    fn converter_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CONVERTER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CONVERTER_INSTRUCTIONS)]))
    }

    // --- Units ---

    #[tool(description = "List available unit names. Set grouped=true to also get categories with symbols and factors.")]
    fn list_units(&self, Parameters(p): Parameters<ListUnitsParams>) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        json_result(&conversions::list_units(&*session, p.grouped))
    }

    #[tool(description = "Look up a unit by exact name or symbol")]
    fn resolve_unit(&self, Parameters(p): Parameters<ResolveUnitParams>) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        json_result(&conversions::resolve_unit(&*session, &p.identifier))
    }

    // --- Conversion ---

    #[tool(description = "Convert a value between two units and record it in history. Units are given by name or symbol. Temperature units only convert to other temperature units; other units convert by their factors, so pick units from the same category.")]
    fn convert(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let result = conversions::convert(&mut *session, &p.value.as_text(), &p.from, &p.to)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- History ---

    #[tool(description = "Get conversion history, most recent first")]
    fn get_history(&self, Parameters(p): Parameters<GetHistoryParams>) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        json_result(&history::get_history(&*session, p.limit))
    }

    #[tool(description = "Delete all conversion history")]
    fn clear_history(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let result = history::clear_history(&mut *session).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Theme ---

    #[tool(description = "Get the current theme preference (light or dark)")]
    fn get_theme(&self) -> Result<CallToolResult, McpError> {
        let session = self.session()?;
        json_result(&settings::get_theme(&*session))
    }

    #[tool(description = "Set the theme preference to light or dark")]
    fn set_theme(&self, Parameters(p): Parameters<SetThemeParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let result = settings::set_theme(&mut *session, &p.theme).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Switch the theme between light and dark")]
    fn toggle_theme(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let result = settings::toggle_theme(&mut *session).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for UconvService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "uconv".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Unit Converter".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Unit Converter (uconv) - length, mass, volume, temperature, time and data units. \
                 Call converter_instructions first if unsure. \
                 Units: list_units, resolve_unit. \
                 Conversion: convert (records history). \
                 History: get_history, clear_history. \
                 Theme: get_theme, set_theme, toggle_theme. \
                 Status: uconv_status."
                    .into(),
            ),
        }
    }
}
