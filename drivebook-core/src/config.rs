//! Global drivebook configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ARCHIVE_DAYS, MAX_ARCHIVE_DAYS};
use crate::error::{DriveBookError, DriveBookResult};
use crate::file_store::FileStore;
use crate::slots::SlotSettings;

static DEFAULT_DATA_DIR: &str = "~/.local/share/drivebook";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_archive_days() -> i64 {
    DEFAULT_ARCHIVE_DAYS
}

/// `DRIVEBOOK_<KEY>`, with `__` between nested keys.
fn environment() -> Environment {
    Environment::with_prefix("DRIVEBOOK")
        .prefix_separator("_")
        .separator("__")
}

/// Configuration at ~/.config/drivebook/config.toml
///
/// Every key can be overridden from the environment, e.g.
/// `DRIVEBOOK_DATA_DIR` or `DRIVEBOOK_SLOTS__STEP_MINUTES`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DriveBookConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_archive_days")]
    pub archive_days: i64,

    #[serde(default)]
    pub slots: SlotSettings,
}

impl Default for DriveBookConfig {
    fn default() -> Self {
        DriveBookConfig {
            data_dir: default_data_dir(),
            archive_days: DEFAULT_ARCHIVE_DAYS,
            slots: SlotSettings::default(),
        }
    }
}

impl DriveBookConfig {
    pub fn config_path() -> DriveBookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DriveBookError::Config("Could not determine config directory".into()))?
            .join("drivebook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first if
    /// no config file exists yet.
    pub fn load() -> DriveBookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DriveBookResult<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: &Path, env: Environment) -> DriveBookResult<Self> {
        let config: DriveBookConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| DriveBookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DriveBookError::Config(e.to_string()))?;

        config.slots.validate()?;
        if !(1..=MAX_ARCHIVE_DAYS).contains(&config.archive_days) {
            return Err(DriveBookError::Config(format!(
                "archive_days must be between 1 and {MAX_ARCHIVE_DAYS}, got {}",
                config.archive_days
            )));
        }

        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DriveBookResult<()> {
        let contents = format!(
            "\
# drivebook configuration

# Where lessons are stored:
# data_dir = \"{}\"

# How many days back the archive reaches:
# archive_days = {}

# Bookable hours and time step:
# [slots]
# open_hour = 8
# close_hour = 20
# step_minutes = 5
",
            DEFAULT_DATA_DIR, DEFAULT_ARCHIVE_DAYS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DriveBookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DriveBookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> DriveBookResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DriveBookError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| DriveBookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
