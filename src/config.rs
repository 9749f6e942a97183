//! Runtime configuration
//!
//! Paths come from the environment:
//! - `UCONV_DATABASE_PATH`: SQLite file for history and theme
//!   (default `<project>/data/uconv.db`)
//! - `UCONV_CATALOG_PATH`: unit catalog JSON (default: the embedded catalog)

use std::path::{Path, PathBuf};

use crate::catalog::{CatalogResult, UnitCatalog};
use crate::db::{self, Database, DbResult};

pub const DATABASE_PATH_VAR: &str = "UCONV_DATABASE_PATH";
pub const CATALOG_PATH_VAR: &str = "UCONV_CATALOG_PATH";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var(DATABASE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),
            catalog_path: std::env::var(CATALOG_PATH_VAR).ok().map(PathBuf::from),
        }
    }

    /// The configured catalog file, or the embedded catalog
    pub fn load_catalog(&self) -> CatalogResult<UnitCatalog> {
        match &self.catalog_path {
            Some(path) => UnitCatalog::from_path(path),
            None => UnitCatalog::builtin(),
        }
    }

    /// Open the database, creating its directory and schema as needed
    pub fn open_database(&self) -> Result<Database, Box<dyn std::error::Error>> {
        if let Some(parent) = self.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let database = Database::new(&self.database_path)?;
        migrate(&database)?;
        Ok(database)
    }
}

/// Bring the schema up to date, returning whether any migration ran
fn migrate(database: &Database) -> DbResult<bool> {
    database.with_conn(|conn| {
        if !db::migrations::needs_migration(conn)? {
            tracing::debug!("Database schema is current");
            return Ok(false);
        }
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        tracing::info!("Database migrated to schema version {}", version);
        Ok(true)
    })
}

/// `data/uconv.db` next to the executable, or at the project root when run
/// from `target/debug` or `target/release`
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("uconv.db");
    path
}
