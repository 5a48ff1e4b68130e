use crate::error::{Result, WellnusError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "wellnus.toml";

/// Fallback data directory when no platform directory can be determined.
const FALLBACK_DATA_DIR: &str = ".wellnus";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellnusConfig {
    #[serde(default)]
    pub focus: FocusSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSettings {
    #[serde(default = "default_cycles")]
    pub cycles: u32,

    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,

    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,

    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u64,
}

fn default_cycles() -> u32 {
    2
}

fn default_work_minutes() -> u64 {
    25
}

fn default_break_minutes() -> u64 {
    5
}

fn default_long_break_minutes() -> u64 {
    15
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            cycles: default_cycles(),
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
        }
    }
}

impl FocusSettings {
    pub fn work_duration(&self) -> Duration {
        minutes(self.work_minutes)
    }

    pub fn break_duration(&self) -> Duration {
        minutes(self.break_minutes)
    }

    pub fn long_break_duration(&self) -> Duration {
        minutes(self.long_break_minutes)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cycles == 0 {
            return Err(WellnusError::Config(
                "focus.cycles must be at least 1".to_string(),
            ));
        }
        let durations = [
            ("focus.work_minutes", self.work_minutes),
            ("focus.break_minutes", self.break_minutes),
            ("focus.long_break_minutes", self.long_break_minutes),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(WellnusError::Config(format!("{} must be at least 1", name)));
            }
        }
        Ok(())
    }
}

fn minutes(count: u64) -> Duration {
    Duration::from_secs(count.saturating_mul(60))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl WellnusConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WellnusConfig = toml::from_str(&content)?;
        config.focus.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), otherwise the platform config
    /// file if present, otherwise defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(WellnusError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load(path);
        }
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Data directory: `override_dir`, then `storage.data_dir`, then the platform data dir.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.storage.data_dir.clone())
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "wellnus")
}
