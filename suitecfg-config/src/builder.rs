// FeatureConfigBuilder - layered loading of feature configuration

use crate::env::{DEFAULT_PREFIX, EnvLoader};
use crate::{ConfigError, ConfigLoader, FeatureConfig, FileFormat, Result, Validate};
use std::path::PathBuf;
use suitecfg_features::Features;
use suitecfg_log::{debug, info};

/// Builder for [`FeatureConfig`].
///
/// Sources are layered in a fixed order, later ones overriding earlier:
/// programmatic entries, then files in the order added, then the `.env`
/// file and the process environment.
pub struct FeatureConfigBuilder {
    base: FeatureConfig,
    prefix: String,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    config_files: Vec<(PathBuf, Option<FileFormat>)>,
    strict: bool,
}

impl FeatureConfigBuilder {
    pub fn new() -> Self {
        Self {
            base: FeatureConfig::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            config_files: Vec::new(),
            strict: false,
        }
    }

    /// Set environment variable prefix (default `SUITECFG`)
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Define a suite directly
    pub fn with_suite<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base
            .suites
            .insert(name.into(), members.into_iter().map(Into::into).collect());
        self
    }

    /// Define a feature value directly
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base.values.insert(key.into(), value.into());
        self
    }

    /// Activate a suite after `default`
    pub fn activate(mut self, suite: impl Into<String>) -> Self {
        self.base.active.push(suite.into());
        self
    }

    /// Enable loading from environment variables
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Enable loading from a .env file, `None` searches the usual places
    pub fn load_dotenv(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path.map(Into::into);
        self
    }

    /// Add a file, format detected from its name
    pub fn add_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push((path.into(), None));
        self
    }

    /// Add a file with an explicit format
    pub fn add_file_as(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), Some(format)));
        self
    }

    /// Reject empty entries and suite cycles instead of ignoring them
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Load and merge every configured source
    pub fn build(self) -> Result<FeatureConfig> {
        let mut config = self.base;

        for (path, format) in &self.config_files {
            let loader = match format {
                Some(format) => ConfigLoader::new(*format),
                None => ConfigLoader::auto(path)?,
            };
            config.merge(loader.load_file(path)?);
        }

        if self.load_dotenv {
            match self.dotenv_path {
                Some(ref path) => {
                    dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
                }
                None => {
                    // a missing .env is fine
                    dotenvy::dotenv().ok();
                }
            }
        }

        if self.load_env || self.load_dotenv {
            let loader = EnvLoader::new(Some(self.prefix.clone()));
            config.merge(loader.load()?);
        }

        if self.strict {
            config.validate()?;
        }

        info!(
            target: "suitecfg::config",
            "feature configuration ready: {} suites, {} values, active {:?}",
            config.suites.len(),
            config.values.len(),
            config.active
        );
        debug!(target: "suitecfg::config", "{} files merged", self.config_files.len());

        Ok(config)
    }

    /// Build straight into a resolver
    pub fn build_features(self) -> Result<Features> {
        Ok(self.build()?.into_features())
    }
}

impl Default for FeatureConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_programmatic_build() {
        let features = FeatureConfigBuilder::new()
            .with_suite("default", ["Sms"])
            .with_suite("china", ["Sms", "Wechat"])
            .with_value("sms", "SmsJuhe")
            .with_value("wechat", "WechatPay")
            .activate("china")
            .build_features()
            .unwrap();

        assert!(features.evaluate("wechat = WechatPay"));
        assert!(features.evaluate("default"));
    }

    #[test]
    fn test_strict_rejects_cycle() {
        let result = FeatureConfigBuilder::new()
            .with_suite("a", ["b"])
            .with_suite("b", ["a"])
            .strict()
            .build();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_lenient_accepts_cycle() {
        let config = FeatureConfigBuilder::new()
            .with_suite("a", ["b"])
            .with_suite("b", ["a"])
            .build()
            .unwrap();
        assert_eq!(config.suites.len(), 2);
    }

    #[test]
    fn test_unknown_extension_fails() {
        let result = FeatureConfigBuilder::new().add_file("features.ini").build();
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = FeatureConfigBuilder::new()
            .add_file("/nonexistent/suitecfg/features.toml")
            .build();
        assert!(result.is_err());
    }
}
