#![cfg(not(tarpaulin_include))]

use stockboard::app::{self, DashboardConfig};

/// Main entry point for the dashboard server
///
/// Reads the launch configuration from the environment, then serves the
/// dashboard until the process is terminated.
///
/// # Arguments
/// * An optional positional argument overrides the inventory CSV path
///
/// # Default Configuration
/// * Reads `warehouse_inventory.csv` from the working directory
/// * Binds `127.0.0.1:3000`
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut config = DashboardConfig::from_env();
    if let Some(path) = std::env::args().nth(1) {
        config.csv_path = path.into();
    }

    // Start the web application with the resolved configuration
    app::run(config).await
}
