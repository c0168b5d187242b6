//! Store configuration: where the backend lives and whether the local
//! fallback may serve data.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use taskly_store_http::StoreConfig;

/// Environment variable overriding the configured base URL.
pub const ENV_API_URL: &str = "TASKLY_API_URL";
/// Development backend address (the local JSON server).
pub const DEV_BASE_URL: &str = "http://localhost:3001";

const CONFIG_FILE: &str = "taskly.toml";

/// Backend connection configuration, loaded from `taskly.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the record store. Deployments point this at their `/api`
    /// mount; development defaults to the local JSON server.
    pub base_url: String,
    /// Serve the documented local data set when the backend is unreachable.
    pub mock_fallback: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEV_BASE_URL.into(),
            mock_fallback: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from `taskly.toml` under `dir`, falling back to
    /// defaults when the file is absent, then apply the environment
    /// override.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let config_path = dir.as_ref().join(CONFIG_FILE);
        let config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };
        Ok(config.with_env_override(|key| std::env::var(key).ok()))
    }

    /// Apply the environment override through an injected fetch, so tests
    /// stay hermetic.
    #[must_use]
    pub fn with_env_override(mut self, fetch: impl FnOnce(&'static str) -> Option<String>) -> Self {
        if let Some(url) = fetch(ENV_API_URL).filter(|value| !value.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Build the HTTP store settings.
    ///
    /// # Errors
    /// Returns an error when the configured base URL is invalid.
    pub fn store_config(&self) -> Result<StoreConfig> {
        StoreConfig::new(&self.base_url, self.mock_fallback)
            .with_context(|| format!("invalid base_url: {}", self.base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_development_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEV_BASE_URL);
        assert!(config.mock_fallback);
        let store = config.store_config().expect("default must be valid");
        assert_eq!(store.base_url.as_str(), "http://localhost:3001/");
    }

    #[test]
    fn toml_values_override_defaults() {
        let config: ApiConfig = toml::from_str(
            "base_url = \"https://tasks.example.com/api\"\nmock_fallback = false\n",
        )
        .expect("must parse config");
        assert_eq!(config.base_url, "https://tasks.example.com/api");
        assert!(!config.mock_fallback);
    }

    #[test]
    fn environment_override_wins_but_ignores_blanks() {
        let config = ApiConfig::default()
            .with_env_override(|_| Some("https://staging.example.com".into()));
        assert_eq!(config.base_url, "https://staging.example.com");

        let config = ApiConfig::default().with_env_override(|_| Some("  ".into()));
        assert_eq!(config.base_url, DEV_BASE_URL);
    }

    #[test]
    fn invalid_base_url_is_reported_with_context() {
        let config = ApiConfig {
            base_url: "not a url".into(),
            mock_fallback: true,
        };
        let err = config.store_config().expect_err("must reject bad url");
        assert!(err.to_string().contains("invalid base_url"));
    }
}
