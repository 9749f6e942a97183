//! One-shot conversion from the command line
//! Usage: uconv_convert <value> <from> <to>
//!        uconv_convert --units

use tracing_subscriber::EnvFilter;

use uconv::catalog::UnitConverter;
use uconv::config::Config;
use uconv::history::SqliteStore;
use uconv::session::{ConverterSession, SubmitError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("uconv=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_env();
    let converter = UnitConverter::new(config.load_catalog()?);

    if args.first().map(String::as_str) == Some("--units") {
        for category in converter.catalog().categories() {
            println!("{}:", category.name);
            for unit in &category.units {
                println!("  {} ({})", unit.name, unit.symbol);
            }
        }
        return Ok(());
    }

    let [value, from, to] = args.as_slice() else {
        eprintln!("Usage: uconv_convert <value> <from> <to>");
        eprintln!("       uconv_convert --units");
        std::process::exit(2);
    };

    let database = config.open_database()?;
    let mut session = ConverterSession::new(converter, SqliteStore::new(database));

    match session.submit(value, from, to) {
        Ok(outcome) => {
            println!("{}", outcome.display);
            Ok(())
        }
        Err(SubmitError::Storage(e)) => Err(e.into()),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
