// Feature configuration for suitecfg
//
// Loads suite and value tables from JSON/TOML/.env files and the process
// environment, merges them, and builds a resolver from the result.

pub mod builder;
pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use builder::FeatureConfigBuilder;
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use suitecfg_features::{Features, SuiteStore, global, normalize};
use suitecfg_log::debug;

/// Raw feature configuration as read from a source.
///
/// ```toml
/// active = ["china"]
///
/// [suites]
/// default = ["Sms"]
/// china = ["default", "Wechat"]
///
/// [values]
/// sms = "SmsJuhe"
/// wechat = "WechatPay"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Suite name to members
    #[serde(default)]
    pub suites: HashMap<String, Vec<String>>,

    /// Feature name to value
    #[serde(default)]
    pub values: HashMap<String, String>,

    /// Suites merged in after `default`
    #[serde(default)]
    pub active: Vec<String>,
}

impl FeatureConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for layered loading
    pub fn builder() -> FeatureConfigBuilder {
        FeatureConfigBuilder::new()
    }

    /// Layer `other` on top of this configuration.
    ///
    /// Suites are replaced by name, values by key, and `active` suites are
    /// appended. Names and keys are compared normalized, so `SMS` and `sms`
    /// are the same entry.
    pub fn merge(&mut self, mut other: FeatureConfig) {
        self.normalize_keys();
        other.normalize_keys();
        self.suites.extend(other.suites);
        self.values.extend(other.values);
        self.active.extend(other.active);
    }

    /// Rewrite suite names and value keys in normalized form.
    ///
    /// Keys that collide within one source are folded in sorted order:
    /// suite members are concatenated and the last value wins, the same
    /// way [`SuiteStore::new`] folds them.
    fn normalize_keys(&mut self) {
        let mut suites: Vec<_> = self.suites.drain().collect();
        suites.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, members) in suites {
            self.suites
                .entry(normalize(&name))
                .or_default()
                .extend(members);
        }

        let mut values: Vec<_> = self.values.drain().collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, value) in values {
            self.values.insert(normalize(&key), value);
        }
    }

    /// Normalized store built from the tables.
    pub fn store(&self) -> SuiteStore {
        SuiteStore::new(self.suites.clone(), self.values.clone())
    }

    /// Build a resolver: `default` first, then the `active` suites merged in.
    pub fn into_features(self) -> Features {
        let mut features = Features::new(self.suites, self.values);
        if !self.active.is_empty() {
            features.activate(&self.active, false);
        }
        debug!(
            target: "suitecfg::config",
            "resolved {} active features from configuration",
            features.len()
        );
        features
    }

    /// Build a resolver and make it the process-wide one.
    pub fn install(self) {
        global::install(self.into_features());
    }
}
