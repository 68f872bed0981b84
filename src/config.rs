use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractConfig,
    pub formats: FormatConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub columns: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            columns: ["timestamp", "location-long", "location-lat"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// chrono format strings used when parsing the `date` and `time` columns.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub date: String,
    // tried in order, first match wins
    pub time: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            date: "%m/%d/%Y".to_string(),
            time: vec!["%H:%M:%S".to_string(), "%H:%M".to_string()],
        }
    }
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}

/// Loads `path` when given, otherwise `fallback` if that file exists, otherwise
/// the defaults.
pub fn load_or_default(path: Option<&Path>, fallback: &Path) -> Result<Config> {
    match path {
        Some(path) => load(path),
        None if fallback.exists() => load(fallback),
        None => Ok(Config::default()),
    }
}
