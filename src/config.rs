use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::search::{DEFAULT_ENDPOINT, DEFAULT_MIN_STARS};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_min_stars")]
    pub min_stars: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            min_stars: default_min_stars(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_min_stars() -> u64 {
    DEFAULT_MIN_STARS
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct TriageConfig {
    pub issues: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub triage: TriageConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("starboard").join("config.toml"))
}

impl Config {
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Missing file means defaults; an unparsable one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Config::default();
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Config::default()
            }
        }
    }
}
