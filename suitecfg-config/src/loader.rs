// Feature configuration file loaders

use crate::env::apply_pair;
use crate::{ConfigError, FeatureConfig, Result};
use std::fs;
use std::path::Path;
use suitecfg_log::{debug, warn};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }

    /// Detect the format of a path. `.env` files have no extension, only a
    /// file name, so they are matched by name too.
    pub fn from_path(path: &Path) -> Option<Self> {
        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            return Self::from_extension(ext);
        }
        match path.file_name().and_then(|s| s.to_str()) {
            Some(".env") => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Configuration file loader
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path).ok_or_else(|| {
            ConfigError::LoadError(format!("Unsupported format: {}", path.display()))
        })?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load feature configuration from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<FeatureConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = self.parse(&content)?;
        debug!(
            target: "suitecfg::config",
            "loaded {} ({} suites, {} values)",
            path.display(),
            config.suites.len(),
            config.values.len()
        );
        Ok(config)
    }

    /// Parse feature configuration from string
    pub fn parse(&self, content: &str) -> Result<FeatureConfig> {
        match self.format {
            FileFormat::Json => self.parse_json(content),
            FileFormat::Toml => self.parse_toml(content),
            FileFormat::Env => Ok(self.parse_env(content)),
        }
    }

    fn parse_json(&self, content: &str) -> Result<FeatureConfig> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<FeatureConfig> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }

    fn parse_env(&self, content: &str) -> FeatureConfig {
        let mut config = FeatureConfig::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => {
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if !apply_pair(&mut config, key, value) {
                        debug!(target: "suitecfg::config", "ignoring unknown key {}", key.trim());
                    }
                }
                None => warn!(target: "suitecfg::config", "ignoring malformed line: {}", line),
            }
        }

        config
    }
}
