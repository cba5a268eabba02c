use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::SearchFilters;

pub const DEFAULT_USER_AGENT: &str = concat!("schoolscout/", env!("CARGO_PKG_VERSION"));

fn default_max_distance_km() -> f64 {
    SearchFilters::DEFAULT_MAX_DISTANCE_KM
}
fn default_school_type() -> String {
    "all".to_string()
}
fn default_format() -> String {
    "text".to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_school_type")]
    pub school_type: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Client-side timeout for each HTTP request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub nominatim: NominatimConfig,
    #[serde(default)]
    pub overpass: OverpassConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            school_type: default_school_type(),
            format: default_format(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            nominatim: NominatimConfig::default(),
            overpass: OverpassConfig::default(),
        }
    }
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct NominatimConfig {
    #[serde(default = "default_nominatim_url")]
    pub url: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            url: default_nominatim_url(),
        }
    }
}

fn default_overpass_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_query_timeout_secs() -> u64 {
    25
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_url")]
    pub url: String,
    /// Server-side `[timeout:N]` of the Overpass QL query
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl FileConfig {
    /// Read and parse an explicitly requested config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// First parseable config file from the standard locations, if any.
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> Option<Self> {
        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::from_path(path) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => {
                    tracing::warn!("Skipping config file {}: {:#}", path.display(), e);
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("schoolscout.toml"));
    paths.push(PathBuf::from(".schoolscout.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("schoolscout").join("config.toml"));
        paths.push(config_dir.join("schoolscout.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".schoolscout.toml"));
    }

    paths
}
