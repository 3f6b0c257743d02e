use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::{CategoriesConfig, TypeFilter};
use crate::error::{Result, WatizatError};

const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding `api.base_url`
pub const BACKEND_URL_ENV: &str = "WATIZAT_BACKEND_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# watizat configuration file
# Location: ~/.watizat/config.toml

[api]
# Backend root; requests go to <base_url>/api/...
# Overridden by the WATIZAT_BACKEND_URL environment variable
base_url = "http://localhost:8000"

# Bearer token (written by `watizat login`, or set WATIZAT_TOKEN)
# token = ""

[feed]
# Default post type filter: all, need or offer
type_filter = "all"

# Categories pre-selected in the feed filter (empty = show everything)
# Example: categories = ["food", "health"]
categories = []

# Per-category display overrides
# [categories.food]
# label = "Alimentação"
# icon = "🍲"
"#;

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default, skip_serializing_if = "CategoriesConfig::is_empty")]
    pub categories: CategoriesConfig,
}

/// Backend connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

/// Feed filter defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub type_filter: TypeFilter,

    #[serde(default)]
    pub categories: Vec<String>,
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| WatizatError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self).map_err(|e| WatizatError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Backend URL, `WATIZAT_BACKEND_URL` taking precedence
    pub fn base_url(&self) -> String {
        pick_base_url(std::env::var(BACKEND_URL_ENV).ok(), &self.api.base_url)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.token" => Some(self.api.token.clone().unwrap_or_default()),
            "feed.type_filter" => Some(self.feed.type_filter.to_string()),
            "feed.categories" => Some(format!("{:?}", self.feed.categories)),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(WatizatError::MissingField { field: "api.base_url" });
                }
                self.api.base_url = value.trim_end_matches('/').to_string();
                Ok(())
            }
            "api.token" => {
                let value = value.trim();
                self.api.token = (!value.is_empty()).then(|| value.to_string());
                Ok(())
            }
            "feed.type_filter" => {
                self.feed.type_filter = value.trim().parse()?;
                Ok(())
            }
            "feed.categories" => {
                self.feed.categories = parse_string_list(value)?;
                Ok(())
            }
            _ => Err(WatizatError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values (token masked)
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("api.base_url".to_string(), self.api.base_url.clone()),
            (
                "api.token".to_string(),
                self.api.token.as_deref().map(mask_token).unwrap_or_default(),
            ),
            (
                "feed.type_filter".to_string(),
                self.feed.type_filter.to_string(),
            ),
            (
                "feed.categories".to_string(),
                format!("{:?}", self.feed.categories),
            ),
        ]
    }
}

fn pick_base_url(env: Option<String>, configured: &str) -> String {
    env.map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

fn mask_token(token: &str) -> String {
    let tail: String = token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Result<Vec<String>> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    Ok(inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
