use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, TubegrabError};

fn default_output_template() -> String {
    "downloaded_content.%(ext)s".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Output filename template; the extraction tool substitutes the
    /// container extension. Fixed per run and shared by every download, so
    /// concurrent downloads race on the same path.
    #[serde(default = "default_output_template")]
    pub output_template: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_template: default_output_template(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TubegrabError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TubegrabError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TubegrabError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TubegrabError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_template() {
        let config = Config::default();
        assert_eq!(config.download.output_template, "downloaded_content.%(ext)s");
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.download.output_template = "clip.%(ext)s".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.download.output_template, "clip.%(ext)s");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::from_file("does-not-exist.toml");
        assert!(matches!(result, Err(TubegrabError::Config(_))));
    }
}
