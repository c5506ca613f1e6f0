//! # Web Larek Storefront Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `ApiConfig` (file, then `LAREK_*` environment overrides)
//! 3. Build the API client and the storefront on a current-thread runtime
//! 4. Load the catalog and print it as JSON
//!
//! An optional first argument names the config file to use instead of the
//! platform default.

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use serde::Serialize;
use tokio::task::LocalSet;
use tracing::{error, info};

use larek_api::{ApiConfig, LarekApi};
use larek_storefront::{init_tracing, Storefront, StorefrontResult};

/// One catalog entry as printed on stdout.
#[derive(Serialize)]
struct CatalogEntry {
    id: String,
    title: String,
    category: String,
    price: String,
}

fn main() -> ExitCode {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ApiConfig::load_or_default(config_path);
    info!(api = %config.api_url(), cdn = %config.cdn_url(), "Starting Web Larek storefront");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(%err, "Failed to start the async runtime");
            return ExitCode::FAILURE;
        }
    };

    let local = LocalSet::new();
    match local.block_on(&runtime, run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.code(), %err, "Storefront stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ApiConfig) -> StorefrontResult<()> {
    let api = LarekApi::from_config(&config)?;
    let storefront = Storefront::new(Rc::new(api));

    storefront.load_catalog().await?;

    let catalog: Vec<CatalogEntry> = storefront
        .page()
        .catalog()
        .iter()
        .map(|card| CatalogEntry {
            id: card.id().to_string(),
            title: card.title().to_string(),
            category: card.category().to_string(),
            price: card.price().to_string(),
        })
        .collect();

    match serde_json::to_string_pretty(&catalog) {
        Ok(json) => println!("{}", json),
        Err(err) => error!(%err, "Failed to encode catalog"),
    }
    Ok(())
}
