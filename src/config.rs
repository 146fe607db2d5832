use crate::schemas::AppState;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use sea_orm::Database;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://exercise_tracker.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime settings.
///
/// Resolved in order: built-in defaults, an optional `exercise_tracker.toml`
/// in the working directory, `EXERCISE_TRACKER_*` environment variables, and
/// finally `PORT`, which only replaces the port of `bind_address`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    /// Directory served for paths no route matches
    pub static_dir: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("static_dir", DEFAULT_STATIC_DIR)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .add_source(File::with_name("exercise_tracker").required(false))
            .add_source(Environment::with_prefix("EXERCISE_TRACKER"))
            .build()
            .context("failed to read configuration")?;

        let mut app_config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration")?;

        if let Ok(port) = std::env::var("PORT") {
            app_config.bind_address = with_port(&app_config.bind_address, &port)?;
        }

        debug!("Loaded configuration: {:?}", app_config);
        Ok(app_config)
    }

    /// Apply values given on the command line.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Replace the port of a `host:port` bind address.
pub fn with_port(bind_address: &str, port: &str) -> Result<String> {
    let port: u16 = port
        .trim()
        .parse()
        .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
    let host = match bind_address.rsplit_once(':') {
        Some((host, _)) => host,
        None => bind_address,
    };
    Ok(format!("{}:{}", host, port))
}

/// Connect to the database and build the shared handler state.
pub async fn initialize_app_state(config: AppConfig) -> Result<AppState> {
    info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to connect to {}", config.database_url))?;

    Ok(AppState {
        db,
        config: Arc::new(config),
    })
}
