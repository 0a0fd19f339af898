//! # Dashboard Configuration
//!
//! Settings are read from `<config dir>/salesdash/config.toml`. Every field is
//! optional; a missing file yields the defaults.

use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// URL (`http://`, `https://`) or local path of the sales JSON
    pub data_source: String,
    pub request_timeout_secs: u64,
    pub window_width: f32,
    pub window_height: f32,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Where "Export PNG" writes the current chart
    pub export_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_source: "http://localhost:8000/processed_sales_data.json".to_string(),
            request_timeout_secs: 10,
            window_width: 1200.0,
            window_height: 800.0,
            chart_width: 1000,
            chart_height: 520,
            export_path: PathBuf::from("sales_chart.png"),
        }
    }
}

impl DashboardConfig {
    /// Load the user's configuration file, falling back to defaults when it
    /// does not exist
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("salesdash").join("config.toml"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
