//! Global dummycal configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::params::GenerationParameters;

static DEFAULT_CALENDAR_DIR: &str = "~/calendar";

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

/// Global configuration at ~/.config/dummycal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DummycalConfig {
    /// Root of the caldir-style calendar directory.
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: PathBuf,

    /// Calendar slug used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_calendar: Option<String>,

    /// Default randomization parameters.
    #[serde(default)]
    pub generation: GenerationParameters,
}

impl Default for DummycalConfig {
    fn default() -> Self {
        DummycalConfig {
            calendar_dir: default_calendar_dir(),
            default_calendar: None,
            generation: GenerationParameters::default(),
        }
    }
}

impl DummycalConfig {
    pub fn config_path() -> StoreResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StoreError::Config("Could not determine config directory".into()))?
            .join("dummycal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented-out default file on first run.
    pub fn load() -> StoreResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> StoreResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| StoreError::Config(e.to_string()))
    }

    /// The calendar directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.calendar_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> StoreResult<()> {
        let defaults = GenerationParameters::default();
        let contents = format!(
            "\
# dummycal configuration

# Where your calendars live (shared with caldir):
# calendar_dir = \"{}\"

# Calendar to fill when --calendar is not given:
# default_calendar = \"personal\"

# Defaults for `dummycal generate`. Times are in quarter-hours (32 = 08:00).
# [generation]
# interval_days = {}
# min_start_quarter_hour = {}
# max_start_quarter_hour = {}
# max_duration_quarter_hours = {}
# all_day_probability = {}
",
            DEFAULT_CALENDAR_DIR,
            defaults.interval_days,
            defaults.min_start_quarter_hour,
            defaults.max_start_quarter_hour,
            defaults.max_duration_quarter_hours,
            defaults.all_day_probability,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| StoreError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
