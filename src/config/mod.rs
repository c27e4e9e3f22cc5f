//! Configuration management module.
//!
//! Handles loading and saving application configuration from a JSON file
//! in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ui::theme::Theme;

/// UI-enforced bounds for the export dimensions.
pub const MIN_EXPORT_WIDTH: u32 = 100;
pub const MAX_EXPORT_WIDTH: u32 = 3840;
pub const MIN_EXPORT_HEIGHT: u32 = 100;
pub const MAX_EXPORT_HEIGHT: u32 = 2160;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub html_file_path: String,
    #[serde(default = "default_export_width")]
    pub export_width: u32,
    #[serde(default = "default_export_height")]
    pub export_height: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_render_delay")]
    pub render_delay_ms: u64,
}

fn default_export_width() -> u32 {
    1024
}

fn default_export_height() -> u32 {
    768
}

fn default_render_delay() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            html_file_path: String::new(),
            export_width: 1024,
            export_height: 768,
            theme: Theme::default(),
            render_delay_ms: 1000,
        }
    }
}

impl Config {
    /// Pull hand-edited values back into the UI-enforced ranges.
    fn clamp_dimensions(&mut self) {
        self.export_width = self.export_width.clamp(MIN_EXPORT_WIDTH, MAX_EXPORT_WIDTH);
        self.export_height = self.export_height.clamp(MIN_EXPORT_HEIGHT, MAX_EXPORT_HEIGHT);
    }
}

/// Configuration manager for loading/saving config.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        let mut path = PathBuf::from("html_png_converter.json");
        if let Some(dirs) = directories::ProjectDirs::from("com", "htmlpng", "html-png-converter") {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            path = config_dir.join("config.json");
        }
        Self { config_path: path }
    }

    /// Get the config file path.
    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from file, falling back to defaults.
    pub fn load(&self) -> Config {
        let mut config = self.try_load().unwrap_or_default();
        config.clamp_dimensions();
        config
    }

    fn try_load(&self) -> Option<Config> {
        if !self.config_path.exists() {
            return None;
        }

        let content = fs::read_to_string(&self.config_path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ignoring malformed config {}: {}", self.config_path.display(), e);
                None
            }
        }
    }

    /// Save configuration to file.
    pub fn save(&self, config: &Config) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        fs::write(&self.config_path, json)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.export_width, 1024);
        assert_eq!(config.export_height, 768);
        assert_eq!(config.render_delay_ms, 1000);
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.export_width, config.export_width);
        assert_eq!(parsed.theme, config.theme);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.export_width, 1024);
        assert_eq!(parsed.render_delay_ms, 1000);
    }

    #[test]
    fn test_dimensions_clamped_on_load() {
        let mut config: Config =
            serde_json::from_str(r#"{"export_width": 10, "export_height": 99999}"#).unwrap();
        config.clamp_dimensions();
        assert_eq!(config.export_width, MIN_EXPORT_WIDTH);
        assert_eq!(config.export_height, MAX_EXPORT_HEIGHT);
    }
}
