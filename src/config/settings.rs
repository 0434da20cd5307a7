//! Configuration settings for rudoro.
//!
//! Settings are loaded from `~/.rudoro/config.yaml`. Every field is
//! optional; missing fields take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::RudoroError;
use crate::features::focus::TimerSettings;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Phase durations and cycle length.
    pub timer: TimerConfig,
    /// Notification sounds.
    pub sound: SoundConfig,
    /// Phase screen appearance.
    pub display: DisplayConfig,
    /// Activity suggestions.
    pub activities: ActivitiesConfig,
}

/// Timer settings, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work phase duration in minutes.
    #[serde(default = "default_work")]
    pub work_minutes: u32,
    /// Short break duration in minutes.
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break duration in minutes.
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    /// Number of work phases before a long break.
    #[serde(default = "default_cycles")]
    pub cycles_before_long_break: u32,
    /// Start each phase without waiting for Enter.
    #[serde(default)]
    pub auto_start: bool,
}

/// Notification sound settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SoundConfig {
    /// Play a sound when a phase ends.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory holding the sound files; the working directory if unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// File played when a work phase ends.
    #[serde(default = "default_work_end_file")]
    pub work_end_file: String,
    /// File played when a break ends.
    #[serde(default = "default_break_end_file")]
    pub break_end_file: String,
}

/// Phase screen settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width of the progress bar in cells.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    /// Show a motivational quote under the header.
    #[serde(default = "default_true")]
    pub show_quotes: bool,
}

/// Activity settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ActivitiesConfig {
    /// Free-form activities offered when tracking.
    pub extra: Vec<String>,
}

// Default value functions for serde
const fn default_work() -> u32 {
    60
}

const fn default_short_break() -> u32 {
    10
}

const fn default_long_break() -> u32 {
    25
}

const fn default_cycles() -> u32 {
    4
}

const fn default_true() -> bool {
    true
}

const fn default_bar_width() -> usize {
    40
}

fn default_work_end_file() -> String {
    "bell.wav".to_string()
}

fn default_break_end_file() -> String {
    "notif.wav".to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            cycles_before_long_break: default_cycles(),
            auto_start: false,
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            directory: None,
            work_end_file: default_work_end_file(),
            break_end_file: default_break_end_file(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            show_quotes: default_true(),
        }
    }
}

impl TimerConfig {
    /// Convert to validated timer settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a duration or the cycle count is zero.
    pub fn to_settings(&self) -> Result<TimerSettings, RudoroError> {
        let settings = TimerSettings::from_minutes(
            i64::from(self.work_minutes),
            i64::from(self.short_break_minutes),
            i64::from(self.long_break_minutes),
            self.cycles_before_long_break,
        );
        settings.validate()?;
        Ok(settings)
    }
}

impl Config {
    /// Load configuration from an explicit path, or the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown or the file exists
    /// but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, RudoroError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_path(&Paths::new()?.config_file),
        }
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, RudoroError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            RudoroError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        log::info!("Loaded config from {}", path.display());
        serde_yaml::from_str(&contents).map_err(|e| {
            RudoroError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), RudoroError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Paths::with_root(parent.to_path_buf()).ensure_dirs()?;
        }

        std::fs::write(path, self.to_yaml()?).map_err(|e| {
            RudoroError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, RudoroError> {
        serde_yaml::to_string(self)
            .map_err(|e| RudoroError::Config(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.timer.work_minutes, 60);
        assert_eq!(config.timer.short_break_minutes, 10);
        assert_eq!(config.timer.long_break_minutes, 25);
        assert_eq!(config.timer.cycles_before_long_break, 4);
        assert!(config.sound.enabled);
        assert_eq!(config.sound.work_end_file, "bell.wav");
        assert_eq!(config.sound.break_end_file, "notif.wav");
        assert_eq!(config.display.bar_width, 40);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load(Some(&config_path)).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sub").join("config.yaml");

        let mut config = Config::default();
        config.timer.work_minutes = 30;
        config.activities.extra = vec!["Gym".to_string()];

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.timer.work_minutes, 30);
        assert_eq!(loaded.activities.extra, vec!["Gym".to_string()]);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
timer:
  work_minutes: 45
sound:
  enabled: false
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.work_minutes, 45);
        assert_eq!(config.timer.short_break_minutes, 10);
        assert!(!config.sound.enabled);
        assert_eq!(config.sound.work_end_file, "bell.wav");
        assert!(config.display.show_quotes);
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer: [not, a, map]").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, RudoroError::Config(_)));
    }

    #[test]
    fn test_to_settings() {
        let timer = TimerConfig {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            cycles_before_long_break: 2,
            auto_start: false,
        };
        let settings = timer.to_settings().unwrap();
        assert_eq!(settings.work, Duration::minutes(25));
        assert_eq!(settings.cycles_before_long_break, 2);

        let zero = TimerConfig {
            short_break_minutes: 0,
            ..TimerConfig::default()
        };
        assert!(zero.to_settings().is_err());
    }
}
