//! Simulation binary for merchant economies.
//!
//! Loads an economy from `merchant-config.yaml`, then ticks it on a fixed
//! interval: scheduled purchases first, then production.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `merchant-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Build the market from the configured catalog
//! 4. Run the tick loop
//! 5. Log the final wallet as JSON

mod config;
mod error;
mod simulation;

use std::path::Path;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::simulation::Simulation;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "merchant-config.yaml";

/// Application entry point for the simulation.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a scheduled purchase
/// names an item that is not on sale.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = Path::new(CONFIG_PATH);
    let from_file = config_path.exists();
    let config = load_config(config_path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("merchant-sim starting");
    info!(
        from_file,
        tick_interval_ms = config.sim.tick_interval_ms,
        ticks = config.sim.ticks,
        item_count = config.catalog.items.len(),
        purchase_count = config.purchases.len(),
        "Configuration loaded"
    );

    // 3. Build the market.
    let mut simulation = Simulation::from_config(&config)?;
    info!(wallet = %simulation.wallet(), "Market open");

    // 4. Run the tick loop.
    run(&mut simulation, config.sim.ticks, config.sim.tick_interval_ms).await?;

    // 5. Log the result.
    let wallet = serde_json::to_string(simulation.wallet()).map_err(SimError::from)?;
    info!(ticks = simulation.tick(), wallet = %wallet, "Simulation finished");

    Ok(())
}

/// Load the simulation configuration from `path`, or defaults if it is absent.
fn load_config(path: &Path) -> Result<SimConfig, SimError> {
    if path.exists() {
        let config = SimConfig::from_file(path)?;
        Ok(config)
    } else {
        Ok(SimConfig::default())
    }
}

/// Step `simulation` once per interval until `ticks` ticks have run.
async fn run(simulation: &mut Simulation, ticks: u64, interval_ms: u64) -> Result<(), SimError> {
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));

    for _ in 0..ticks {
        interval.tick().await;
        let report = simulation.step()?;
        info!(
            tick = report.tick,
            completed = report.completed,
            declined = report.declined,
            production = %report.production,
            wallet = %simulation.wallet(),
            "Tick"
        );
    }

    Ok(())
}
