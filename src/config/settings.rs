//! Configuration settings for focuslog.
//!
//! Settings are loaded from `~/.focuslog/config.yaml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::FocuslogError;
use crate::features::timer::Durations;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Countdown lengths.
    pub timer: TimerConfig,
    /// Fallback labels for automatically logged focus periods.
    pub labels: LabelsConfig,
    /// Report and export backend.
    pub collaborator: CollaboratorConfig,
    /// Spreadsheet export settings.
    pub export: ExportConfig,
}

/// Countdown lengths in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Length of a focus period.
    #[serde(default = "default_focus_seconds")]
    pub focus_seconds: u64,
    /// Length of a break.
    #[serde(default = "default_break_seconds")]
    pub break_seconds: u64,
}

/// Labels used when a focus period ends with blank inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabelsConfig {
    #[serde(default = "default_task_name")]
    pub default_task_name: String,
    #[serde(default = "default_category")]
    pub default_category: String,
}

/// Which implementation answers report and export requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Computed in-process.
    #[default]
    Local,
    /// Google Gemini `generateContent` API.
    Gemini,
}

/// Report/export collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CollaboratorConfig {
    #[serde(default)]
    pub backend: Backend,
    /// Remote model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Spreadsheet export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory. Defaults to `~/.focuslog/exports/`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

const fn default_focus_seconds() -> u64 {
    25 * 60
}

const fn default_break_seconds() -> u64 {
    5 * 60
}

fn default_task_name() -> String {
    "Pomodoro Session".to_string()
}

fn default_category() -> String {
    "Uncategorized".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

const fn default_timeout_seconds() -> u64 {
    60
}

fn default_file_name() -> String {
    "productivity_log.csv".to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_seconds: default_focus_seconds(),
            break_seconds: default_break_seconds(),
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            default_task_name: default_task_name(),
            default_category: default_category(),
        }
    }
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: default_file_name(),
        }
    }
}

impl From<TimerConfig> for Durations {
    fn from(timer: TimerConfig) -> Self {
        Self {
            focus_seconds: timer.focus_seconds,
            break_seconds: timer.break_seconds,
        }
    }
}

impl ExportConfig {
    /// Full path of the export file.
    #[must_use]
    pub fn target(&self, paths: &Paths) -> PathBuf {
        self.directory
            .as_ref()
            .unwrap_or(&paths.exports)
            .join(&self.file_name)
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if a countdown length is zero.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocuslogError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocuslogError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            FocuslogError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero-length focus or break period.
    pub fn validate(&self) -> Result<(), FocuslogError> {
        if self.timer.focus_seconds == 0 || self.timer.break_seconds == 0 {
            return Err(FocuslogError::Config(
                "timer.focus_seconds and timer.break_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocuslogError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| FocuslogError::Config(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents).map_err(|e| {
            FocuslogError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
