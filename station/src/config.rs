//! Configuration management (config.toml in the platform config dir)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use stratocast_core::CaptureConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Write each finalized recording to disk as it lands.
    #[serde(default = "default_true")]
    pub auto_export: bool,
    /// Overrides the platform recordings directory when set.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            auto_export: true,
            directory: None,
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.stratocast", "", "Stratocast")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn load() -> StationConfig {
    config_dir()
        .and_then(|dir| std::fs::read_to_string(dir.join("config.toml")).ok())
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

#[allow(dead_code)] // Settings UI will call this once editing lands
pub fn save(config: &StationConfig) -> std::io::Result<()> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(&dir)?;
        let content = toml::to_string_pretty(config).map_err(std::io::Error::other)?;
        std::fs::write(dir.join("config.toml"), content)?;
    }
    Ok(())
}
