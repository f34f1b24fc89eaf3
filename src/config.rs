//! Configuration handling for the TUI

use crate::state::{Screen, ValidationMode, DEFAULT_PASSWORD_MIN_LENGTH};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment override for the validation mode
const MODE_ENV_VAR: &str = "SIGNFLOW_VALIDATION_MODE";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// When forms re-run validation
    pub validation_mode: Option<ValidationMode>,
    /// Sign-up password floor
    pub password_min_length: Option<usize>,
    /// Screen shown at startup
    pub start_screen: Option<Screen>,
    /// Delay of the local identity service
    pub simulated_latency_ms: Option<u64>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "signflow", "signflow-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory log files are written to while the TUI owns the terminal
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        Self::from_sources(Self::config_path().as_deref(), |key| std::env::var(key).ok())
    }

    fn from_sources(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config: Self = match path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        if let Some(mode) = env(MODE_ENV_VAR) {
            config.validation_mode = Some(mode.parse()?);
        }

        Ok(config)
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation_mode.unwrap_or_default()
    }

    pub fn password_min_length(&self) -> usize {
        self.password_min_length.unwrap_or(DEFAULT_PASSWORD_MIN_LENGTH)
    }

    pub fn start_screen(&self) -> Screen {
        self.start_screen.unwrap_or_default()
    }

    /// `None` means use the service default
    pub fn simulated_latency(&self) -> Option<Duration> {
        self.simulated_latency_ms.map(Duration::from_millis)
    }
}
