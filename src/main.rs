//! cryptotrade-gateway entry point.
//!
//! Wiring only: config, logging, store bootstrap, venue client, server.

use std::sync::Arc;

use anyhow::Context;

use cryptotrade_gateway::config::AppConfig;
use cryptotrade_gateway::gateway::{self, state::AppState};
use cryptotrade_gateway::logging::init_logging;
use cryptotrade_gateway::mason::{Catalogue, RouteTable};
use cryptotrade_gateway::store::Database;
use cryptotrade_gateway::venue::VenueClient;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(&get_env());
    let _guard = init_logging(&config);

    let db = Database::connect(&config.database.url)
        .await
        .context("failed to open the account database")?;
    db.create_schema()
        .await
        .context("failed to create the database schema")?;

    let venue = VenueClient::new(config.venue.base_url.clone());
    tracing::info!(venue = %config.venue.base_url, "venue client ready");

    let state = Arc::new(AppState::new(
        db,
        venue,
        Catalogue::new(RouteTable::default()),
    ));
    gateway::run_server(&config.gateway, state).await
}
