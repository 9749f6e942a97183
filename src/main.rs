//! Unit Converter (uconv)
//!
//! An MCP server for unit conversion with persisted history.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use uconv::build_info;
use uconv::catalog::UnitConverter;
use uconv::config::Config;
use uconv::history::SqliteStore;
use uconv::mcp::UconvService;
use uconv::session::ConverterSession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so it does not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("uconv=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env();
    tracing::info!("Database path: {}", config.database_path.display());

    let catalog = config.load_catalog()?;
    let database = config.open_database()?;
    let session = ConverterSession::new(UnitConverter::new(catalog), SqliteStore::new(database));

    let service = UconvService::new(config.database_path.clone(), session);

    eprintln!("Starting MCP server on stdio...");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
