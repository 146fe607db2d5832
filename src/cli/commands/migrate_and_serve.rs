use anyhow::Result;
use tracing::{debug, error, info, trace};

use super::initdb::run_migrations;
use super::serve::run_server;
use crate::config::{initialize_app_state, AppConfig};

pub async fn migrate_and_serve(config: AppConfig) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");

    let state = match initialize_app_state(config).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Same pool for migrating and serving
    run_migrations(&state.db).await?;

    run_server(state).await
}
