//! Converter Tools module
//!
//! MCP tool implementations for the unit converter.

pub mod conversions;
pub mod history;
pub mod settings;
pub mod status;
