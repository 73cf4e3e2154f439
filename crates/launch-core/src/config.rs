//! Configuration types.
//!
//! Configuration lives in `config.toml` under the platform config directory.
//! Every section is optional; anything left out falls back to the defaults
//! below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Launch API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// User-visible text
    #[serde(default)]
    pub messages: Messages,
}

/// Launch API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without trailing slash, e.g. "https://ll.thespacedevs.com/2.2.0"
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lldev.thespacedevs.com/2.2.0".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Every string the views render.
///
/// `search_error` and `no_results` may contain `{query}`, which is replaced
/// with the query verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub heading: String,
    pub search_button: String,
    pub loading: String,
    pub search_error: String,
    pub no_results: String,
    pub mission_prefix: String,
    pub back: String,
    pub window_start_prefix: String,
    pub window_end_prefix: String,
    pub status_prefix: String,
    /// Shown in place of any field the API did not provide.
    pub unknown: String,
    /// Shown in place of a missing launch image.
    pub no_image: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            heading: "Launch search 🚀".to_string(),
            search_button: "Search".to_string(),
            loading: "Fetching data...".to_string(),
            search_error: "Error while searching for {query}".to_string(),
            no_results: "No results for {query}".to_string(),
            mission_prefix: "Mission: ".to_string(),
            back: "Back".to_string(),
            window_start_prefix: "Window opens: ".to_string(),
            window_end_prefix: "Window closes: ".to_string(),
            status_prefix: "Status: ".to_string(),
            unknown: "Unknown".to_string(),
            no_image: "No image".to_string(),
        }
    }
}

impl Messages {
    /// Message for a failed search.
    pub fn search_error_for(&self, query: &str) -> String {
        self.search_error.replace("{query}", query)
    }

    /// Message for a search without results.
    pub fn no_results_for(&self, query: &str) -> String {
        self.no_results.replace("{query}", query)
    }

    /// The value itself, or the placeholder when it is missing.
    pub fn or_unknown<'a>(&'a self, value: Option<&'a str>) -> &'a str {
        value.unwrap_or(&self.unknown)
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("launch-search"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the default location is used
/// and a missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, crate::ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(path) = config_path() else {
                tracing::warn!("No config directory found - using default configuration");
                return Ok(AppConfig::default());
            };
            if !path.exists() {
                tracing::info!("No config found at {:?} - using defaults", path);
                return Ok(AppConfig::default());
            }
            path
        }
    };

    tracing::info!("Loading config from {:?}", path);

    let text = std::fs::read_to_string(&path).map_err(|e| crate::ConfigError::Io {
        path: path.clone(),
        error: e.to_string(),
    })?;

    toml::from_str(&text).map_err(|e| crate::ConfigError::Parse {
        path,
        message: e.to_string(),
    })
}
