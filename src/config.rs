use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants::{appwrite, intervals, limits, tmdb};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub tmdb: TmdbConfig,

    pub analytics: AnalyticsConfig,

    pub search: SearchConfig,

    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding `favorites.json`
    pub data_dir: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir().map_or_else(
        || ".cinefind".to_string(),
        |dir| dir.join("cinefind").display().to_string(),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub api_key: String,

    pub base_url: String,

    /// Poster base, including the size segment
    pub image_base_url: String,

    pub language: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: tmdb::API_BASE_URL.to_string(),
            image_base_url: tmdb::IMAGE_BASE_URL.to_string(),
            language: tmdb::DEFAULT_LANGUAGE.to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// When enabled, `project_id`, `database_id` and `collection_id` are required.
    pub enabled: bool,

    pub endpoint: String,

    pub project_id: String,

    pub database_id: String,

    pub collection_id: String,

    /// Server API key. Collections with public document permissions work without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: appwrite::DEFAULT_ENDPOINT.to_string(),
            project_id: String::new(),
            database_id: String::new(),
            collection_id: String::new(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before an interactive search fires (default: 600)
    pub debounce_ms: u64,

    pub trending_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: u64::try_from(intervals::SEARCH_DEBOUNCE.as_millis()).unwrap_or(600),
            trending_limit: limits::TRENDING_LIMIT,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 6790,
            cors_allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies environment-style overrides on top of file values.
    ///
    /// Supplying any Appwrite database or collection id turns analytics on.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("TMDB_API_KEY") {
            self.tmdb.api_key = key;
        }
        if let Some(dir) = get("CINEFIND_DATA_DIR") {
            self.general.data_dir = dir;
        }
        if let Some(endpoint) = get("APPWRITE_ENDPOINT") {
            self.analytics.endpoint = endpoint;
        }
        if let Some(project) = get("APPWRITE_PROJECT_ID") {
            self.analytics.project_id = project;
        }
        if let Some(database) = get("APPWRITE_DATABASE_ID") {
            self.analytics.database_id = database;
            self.analytics.enabled = true;
        }
        if let Some(collection) = get("APPWRITE_COLLECTION_ID") {
            self.analytics.collection_id = collection;
            self.analytics.enabled = true;
        }
        if let Some(api_key) = get("APPWRITE_API_KEY") {
            self.analytics.api_key = Some(api_key);
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![Self::default_config_path()];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cinefind").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cinefind").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("cinefind.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.tmdb.base_url)
            .with_context(|| format!("Invalid TMDB base URL: {}", self.tmdb.base_url))?;

        if self.analytics.enabled {
            if self.analytics.database_id.trim().is_empty()
                || self.analytics.collection_id.trim().is_empty()
            {
                anyhow::bail!(
                    "Missing required analytics configuration: database_id or collection_id"
                );
            }

            if self.analytics.project_id.trim().is_empty() {
                anyhow::bail!("Missing required analytics configuration: project_id");
            }

            url::Url::parse(&self.analytics.endpoint).with_context(|| {
                format!("Invalid Appwrite endpoint: {}", self.analytics.endpoint)
            })?;
        }

        if self.general.data_dir.trim().is_empty() {
            anyhow::bail!("Data directory cannot be empty");
        }

        Ok(())
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.debounce_ms, 600);
        assert_eq!(config.search.trending_limit, 10);
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert!(!config.analytics.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[tmdb]"));
        assert!(toml_str.contains("[analytics]"));
        assert!(toml_str.contains("[search]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [search]
            debounce_ms = 250
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.search.debounce(), Duration::from_millis(250));

        assert_eq!(config.tmdb.language, "en-US");
    }

    #[test]
    fn test_analytics_ids_required_when_enabled() {
        let mut config = Config::default();
        config.analytics.enabled = true;
        config.analytics.project_id = "proj".to_string();
        config.analytics.database_id = "db".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("collection_id"));

        config.analytics.collection_id = "metrics".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_enable_analytics() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("TMDB_API_KEY", "secret"),
            ("APPWRITE_PROJECT_ID", "proj"),
            ("APPWRITE_DATABASE_ID", "db"),
            ("APPWRITE_COLLECTION_ID", "metrics"),
        ]));

        assert_eq!(config.tmdb.api_key, "secret");
        assert!(config.analytics.enabled);
        assert_eq!(config.analytics.collection_id, "metrics");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_analytics_env_is_fatal() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("APPWRITE_DATABASE_ID", "db")]));

        assert!(config.analytics.enabled);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("APPWRITE_COLLECTION_ID", "  ")]));
        assert!(!config.analytics.enabled);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("cinefind-config-{}", uuid::Uuid::new_v4()))
            .join("config.toml");

        let mut config = Config::default();
        config.server.port = 7000;
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.server.port, 7000);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
