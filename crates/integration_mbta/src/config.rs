//! MBTA client configuration

use serde::{Deserialize, Serialize};

/// Configuration for the MBTA V3 API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MbtaConfig {
    /// Base URL for the MBTA V3 API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `x-api-key`; anonymous access is rate limited harder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Stop search radius in degrees
    #[serde(default = "default_search_radius")]
    pub search_radius: f64,

    /// Route direction cache TTL in minutes (0 to disable caching)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,
}

fn default_base_url() -> String {
    "https://api-v3.mbta.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_search_radius() -> f64 {
    0.01
}

const fn default_cache_ttl_minutes() -> u32 {
    60
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            search_radius: default_search_radius(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl MbtaConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Check if route caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if !self.search_radius.is_finite() || self.search_radius <= 0.0 {
            return Err("search_radius must be a positive number".to_string());
        }

        if self.api_key.as_deref().is_some_and(str::is_empty) {
            return Err("api_key must not be empty when set".to_string());
        }

        Ok(())
    }
}
