use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Free-form label for the loaded profile.
    pub profile_name: String,
    pub roster: RosterSource,
    pub defaults: FilterDefaults,
    pub display: DisplayRules,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            profile_name: "base".to_string(),
            roster: RosterSource::default(),
            defaults: FilterDefaults::default(),
            display: DisplayRules::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RosterSource {
    /// Roster file; the built-in sample is used when unset
    pub path: Option<PathBuf>,
}

/// Filter state a view starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub query: String,
    /// "all" or a vehicle status name
    pub vehicle_status: String,
    /// "all" or a station status name
    pub station_status: String,
    /// "all" or an alert severity
    pub alert_severity: String,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            query: String::new(),
            vehicle_status: "all".to_string(),
            station_status: "all".to_string(),
            alert_severity: "all".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayRules {
    pub max_rows: Option<usize>,
    pub show_summary: bool,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self {
            max_rows: None,
            show_summary: true,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<RosterConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<RosterConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    let mut config =
        toml::from_str::<RosterConfig>(&raw).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

    // roster paths are relative to the config file
    if let (Some(roster_path), Some(base)) = (&config.roster.path, path.parent())
        && roster_path.is_relative()
    {
        config.roster.path = Some(base.join(roster_path));
    }

    Ok(config)
}

pub fn default_config() -> &'static RosterConfig {
    static DEFAULT_CONFIG: LazyLock<RosterConfig> = LazyLock::new(RosterConfig::default);
    &DEFAULT_CONFIG
}
