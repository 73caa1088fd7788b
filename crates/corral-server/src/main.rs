//! Server binary for the Corral demo API.
//!
//! This is the main entry point that wires together the seeded resource
//! store, the counter task, and the Axum HTTP server. It loads
//! configuration, initializes all subsystems, and serves requests until
//! the process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `corral-config.yaml`
//! 3. Seed the resource store with the demo fixtures
//! 4. Seed the counter to a random value and spawn its walk task
//! 5. Run the HTTP server

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use corral_api::counter::{self, Counter};
use corral_api::server::ServerConfig;
use corral_api::state::AppState;
use corral_store::Store;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CorralConfig;
use crate::error::CorralError;

/// Application entry point for the Corral server.
///
/// # Errors
///
/// Returns an error if configuration loading or the server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("corral-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        counter_interval_ms = config.counter.interval_ms,
        photos_dir = %config.photos.directory.display(),
        "Configuration loaded"
    );

    // 3. Seed the resource store.
    let store = Arc::new(Store::with_fixtures(&config.photos.base_url));
    info!(
        capacities = store.capacities.len().await,
        unicorns = store.unicorns.len().await,
        "Store seeded with fixtures"
    );

    // 4. Seed the counter and spawn the random-walk task.
    let counter = Counter::with_random_seed(config.counter.seed_min, config.counter.seed_max);
    info!(value = counter.value(), "Counter seeded");

    tokio::spawn(counter::run(
        counter.clone(),
        Duration::from_millis(config.counter.interval_ms),
        config.counter.step_up_probability,
    ));

    // 5. Run the HTTP server.
    let state = Arc::new(AppState::new(
        store,
        counter,
        config.photos.directory.clone(),
    ));
    // The PORT environment variable wins over the config file.
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.server.port);
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port,
    };

    corral_api::start_server(&server_config, state)
        .await
        .map_err(CorralError::from)?;

    info!("corral-server shutdown complete");

    Ok(())
}

/// Load the server configuration from `corral-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<CorralConfig, CorralError> {
    let config_path = Path::new("corral-config.yaml");
    if config_path.exists() {
        let config = CorralConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(CorralConfig::default())
    }
}
