// Environment variable loading
//
// Keys (after the optional prefix) follow one grammar shared with `.env`
// files:
//
//   SUITES_<NAME>=member,member,...
//   VALUES_<KEY>=value
//   ACTIVE=suite,suite,...

use crate::{FeatureConfig, Result};
use std::env;
use suitecfg_log::debug;

pub const DEFAULT_PREFIX: &str = "SUITECFG";

const SUITES_KEY: &str = "SUITES_";
const VALUES_KEY: &str = "VALUES_";
const ACTIVE_KEY: &str = "ACTIVE";

/// Split a comma separated list, keeping empty items out.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Apply one `KEY=value` pair to `config`. Returns false for keys outside
/// the grammar.
pub(crate) fn apply_pair(config: &mut FeatureConfig, key: &str, value: &str) -> bool {
    let key = key.trim().to_uppercase();

    if let Some(name) = key.strip_prefix(SUITES_KEY) {
        config
            .suites
            .insert(name.to_lowercase(), split_list(value));
    } else if let Some(name) = key.strip_prefix(VALUES_KEY) {
        config
            .values
            .insert(name.to_lowercase(), value.to_string());
    } else if key == ACTIVE_KEY {
        config.active.extend(split_list(value));
    } else {
        return false;
    }
    true
}

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Read feature configuration from the process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn load(&self) -> Result<FeatureConfig> {
        let vars = env::vars_os().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    debug!(
                        target: "suitecfg::config",
                        "skipping non UTF-8 environment variable {:?}",
                        key.unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
                    );
                    None
                }
            }
        });
        Ok(self.load_from(vars))
    }

    /// Read feature configuration from explicit variables.
    pub fn load_from<I, K, V>(&self, vars: I) -> FeatureConfig
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = FeatureConfig::default();

        for (key, value) in vars {
            let key = key.as_ref();
            let key = match self.prefix {
                Some(ref prefix) => match key.strip_prefix(prefix.as_str()) {
                    Some(rest) if rest.starts_with('_') => &rest[1..],
                    _ => continue,
                },
                None => key,
            };
            apply_pair(&mut config, key, value.as_ref());
        }

        config
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(Some(DEFAULT_PREFIX.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" sms, ,wechat ,"), vec!["sms", "wechat"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_load_from_with_prefix() {
        let loader = EnvLoader::default();
        let config = loader.load_from([
            ("SUITECFG_SUITES_CHINA", "Sms, Wechat"),
            ("SUITECFG_VALUES_SMS", "SmsJuhe"),
            ("SUITECFG_ACTIVE", "china"),
            ("SUITECFG_UNRELATED", "x"),
            ("SUITECFGX_VALUES_SMS", "wrong"),
            ("PATH", "/usr/bin"),
        ]);

        assert_eq!(config.suites["china"], vec!["Sms", "Wechat"]);
        assert_eq!(config.values["sms"], "SmsJuhe");
        assert_eq!(config.active, vec!["china"]);
        assert_eq!(config.suites.len(), 1);
        assert_eq!(config.values.len(), 1);
    }

    #[test]
    fn test_load_from_without_prefix() {
        let loader = EnvLoader::new(None);
        let config = loader.load_from([("values_pay", "Alipay"), ("ACTIVE", "a,b")]);

        assert_eq!(config.values["pay"], "Alipay");
        assert_eq!(config.active, vec!["a", "b"]);
    }
}
