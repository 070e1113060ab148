//! Application configuration
//!
//! Layered from built-in defaults, an optional `config.toml` and
//! `NEXTRIDE__*` environment variables, in increasing precedence.
//! Nested keys use a double underscore, e.g. `NEXTRIDE__MBTA__API_KEY`.

use std::path::Path;

use domain::AllowedDirections;
use integration_mbta::MbtaConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix for environment variable overrides
const ENV_PREFIX: &str = "NEXTRIDE";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// MBTA API client settings
    #[serde(default)]
    pub mbta: MbtaConfig,

    /// Route direction names a trip must travel in to be considered
    #[serde(default)]
    pub allowed_directions: AllowedDirections,
}

impl AppConfig {
    /// Load configuration from environment and optional `config` file
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(
            config::File::with_name("config").required(false),
            Self::env_source(),
        )
    }

    /// Load configuration from an explicit file, still honouring env overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or any source does not
    /// deserialize.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::from(path).required(true), Self::env_source())
    }

    fn env_source() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("allowed_directions")
    }

    fn load_with(
        file: config::File<config::FileSourceFile, config::FileFormat>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        let app: Self = config.try_deserialize()?;
        debug!(
            base_url = %app.mbta.base_url,
            allowed = %app.allowed_directions,
            "Configuration loaded"
        );
        Ok(app)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.mbta.validate().map_err(|e| format!("mbta: {e}"))?;

        if self.allowed_directions.is_empty() {
            return Err("allowed_directions must name at least one direction".to_string());
        }

        Ok(())
    }
}
