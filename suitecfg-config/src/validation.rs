// Feature configuration validation
//
// The resolver accepts any input: empty entries are dropped and cyclic
// suites are expanded once. Validation is the opt-in strict mode for
// catching those mistakes at load time instead.

use crate::{ConfigError, FeatureConfig, Result};
use std::collections::{HashMap, HashSet};
use suitecfg_features::normalize;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks over raw suite and value tables
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a name is not empty once trimmed
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that no suite lists an empty member
    pub fn no_empty_members(suites: &HashMap<String, Vec<String>>) -> Result<()> {
        for (name, members) in suites {
            Self::not_empty(name, "suite name")?;
            if members.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "suite {} has no members",
                    name
                )));
            }
            for member in members {
                Self::not_empty(member, &format!("member of suite {}", name))?;
            }
        }
        Ok(())
    }

    /// Validate that feature values have names and content
    pub fn no_empty_values(values: &HashMap<String, String>) -> Result<()> {
        for (key, value) in values {
            Self::not_empty(key, "value key")?;
            if value.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "value of {} cannot be empty",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Validate that no suite reaches itself through its members.
    ///
    /// The error names the cycle, e.g. `a -> b -> a`.
    pub fn acyclic(suites: &HashMap<String, Vec<String>>) -> Result<()> {
        let graph: HashMap<String, Vec<String>> = suites
            .iter()
            .map(|(name, members)| (normalize(name), members.iter().map(|m| normalize(m)).collect()))
            .collect();

        let mut done = HashSet::new();
        let mut names: Vec<&String> = graph.keys().collect();
        names.sort();

        for start in names {
            let mut path = Vec::new();
            if let Some(cycle) = find_cycle(&graph, start, &mut path, &mut done) {
                return Err(ConfigError::ValidationError(format!(
                    "suite cycle: {}",
                    cycle.join(" -> ")
                )));
            }
        }
        Ok(())
    }
}

/// Depth-first search returning the first cycle reachable from `node`.
fn find_cycle(
    graph: &HashMap<String, Vec<String>>,
    node: &str,
    path: &mut Vec<String>,
    done: &mut HashSet<String>,
) -> Option<Vec<String>> {
    if let Some(pos) = path.iter().position(|n| n == node) {
        let mut cycle = path[pos..].to_vec();
        cycle.push(node.to_string());
        return Some(cycle);
    }
    if done.contains(node) {
        return None;
    }

    let members = graph.get(node)?;
    path.push(node.to_string());
    for member in members {
        if let Some(cycle) = find_cycle(graph, member, path, done) {
            return Some(cycle);
        }
    }
    path.pop();
    done.insert(node.to_string());
    None
}

impl Validate for FeatureConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::no_empty_members(&self.suites)?;
        ConfigValidator::no_empty_values(&self.values)?;
        for name in &self.active {
            ConfigValidator::not_empty(name, "active suite")?;
        }
        ConfigValidator::acyclic(&self.suites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suites(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_not_empty_validation() {
        assert!(ConfigValidator::not_empty("sms", "field").is_ok());
        assert!(ConfigValidator::not_empty("  ", "field").is_err());
    }

    #[test]
    fn test_empty_members_rejected() {
        assert!(ConfigValidator::no_empty_members(&suites(&[("default", &["sms"])])).is_ok());
        assert!(ConfigValidator::no_empty_members(&suites(&[("default", &["sms", ""])])).is_err());
        assert!(ConfigValidator::no_empty_members(&suites(&[("default", &[])])).is_err());
    }

    #[test]
    fn test_acyclic_accepts_diamond() {
        let table = suites(&[
            ("default", &["a", "b"]),
            ("a", &["core"]),
            ("b", &["core"]),
            ("core", &["sms"]),
        ]);
        assert!(ConfigValidator::acyclic(&table).is_ok());
    }

    #[test]
    fn test_acyclic_reports_cycle() {
        let table = suites(&[("a", &["b"]), ("B", &["c"]), ("c", &["A", "sms"])]);
        let err = ConfigValidator::acyclic(&table).unwrap_err().to_string();
        assert!(err.contains("suite cycle: a -> b -> c -> a"), "{}", err);
    }

    #[test]
    fn test_acyclic_reports_self_reference() {
        let table = suites(&[("loop", &["loop"])]);
        let err = ConfigValidator::acyclic(&table).unwrap_err().to_string();
        assert!(err.contains("loop -> loop"));
    }

    #[test]
    fn test_feature_config_validate() {
        let mut config = FeatureConfig::default();
        config.suites = suites(&[("default", &["sms"])]);
        config.values.insert("sms".to_string(), "SmsJuhe".to_string());
        assert!(config.validate().is_ok());

        config.values.insert("wechat".to_string(), String::new());
        assert!(config.validate().is_err());
    }
}
