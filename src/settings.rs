//! Persisted user settings
//!
//! The four values a user enters before a run are saved to
//! `<config dir>/forminator/settings.json` and restored on the next run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ForminatorError, Result};

pub const DEFAULT_OUTPUT_FILE: &str = "contacts.csv";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_key: String,
    /// Directory holding the form images
    pub directory: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            directory: home.clone(),
            output_dir: dirs::desktop_dir().unwrap_or(home),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl Settings {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Check that everything needed for a run is filled in
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(invalid("Please enter an OpenAI API key"));
        }
        if self.directory.as_os_str().is_empty() {
            return Err(invalid("Please select a forms directory to process"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(invalid(
                "Please select an output directory to save the results",
            ));
        }
        if self.output_file.trim().is_empty() {
            return Err(invalid("Please enter an output file name"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ForminatorError {
    ForminatorError::InvalidInput(message.to_string())
}

/// Reads and writes [`Settings`] as JSON
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the platform config location
    pub fn new() -> Result<Self> {
        let path = dirs::config_dir()
            .map(|dir| dir.join("forminator").join("settings.json"))
            .ok_or_else(|| {
                ForminatorError::Settings("Could not determine config directory".to_string())
            })?;
        Ok(Self { path })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved settings, or defaults if nothing was saved yet
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            tracing::debug!("No settings at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }

        let json = fs::read_to_string(&self.path).map_err(|e| {
            ForminatorError::Settings(format!("Failed to read settings file: {}", e))
        })?;

        let settings = serde_json::from_str(&json).map_err(|e| {
            ForminatorError::Settings(format!("Failed to parse settings file: {}", e))
        })?;

        tracing::debug!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ForminatorError::Settings(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(|e| {
            ForminatorError::Settings(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(&self.path, json).map_err(|e| {
            ForminatorError::Settings(format!("Failed to write settings file: {}", e))
        })?;

        tracing::info!("Saving settings to {}", self.path.display());
        Ok(())
    }
}
