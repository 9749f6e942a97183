//! Unit Converter (uconv) Library
//!
//! Lookup-based unit conversion with persisted history and preferences.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod db;
pub mod history;
pub mod mcp;
pub mod session;
pub mod tools;
