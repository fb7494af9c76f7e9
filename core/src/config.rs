//! Endpoint configuration for the catalog client.
//!
//! Every field has a default, so an empty TOML document yields a working
//! configuration pointed at the public TMDB endpoints.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_POPULAR_PATH: &str = "/popular";
pub const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub popular_path: String,
    pub poster_base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            popular_path: DEFAULT_POPULAR_PATH.to_string(),
            poster_base_url: DEFAULT_POSTER_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Config with every endpoint rooted at `api_base_url`, e.g. a mock server.
    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Fully formed URL of the popular-movies endpoint.
    pub fn popular_movies_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let path = self.popular_path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
