//! Configuration management for the Perpus client

use config::{Config, ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the Perpus REST API, without a trailing slash
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// File holding the persisted bearer token; absence means logged out
    pub token_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load environment variables from .env file, if present
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let defaults = ClientConfig::default();

        let config = Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default(
                "session.token_path",
                defaults.session.token_path.to_string_lossy().into_owned(),
            )?
            .set_default("logging.level", defaults.logging.level)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix PERPUS_)
            .add_source(
                Environment::with_prefix("PERPUS")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override API base URL from PERPUS_API_URL env var if present
            .set_override_option("api.base_url", env::var("PERPUS_API_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            token_path: base.join("perpus").join("auth_token"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
