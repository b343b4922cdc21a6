//! Suite Store
//!
//! Static configuration: suite definitions and feature values. Built once
//! and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalize a suite name, feature name or expression key.
///
/// Surrounding whitespace is trimmed and the result lower-cased.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Suite definitions and feature values.
///
/// Keys of both tables are stored normalized. Suite members and feature
/// values are stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Tables")]
pub struct SuiteStore {
    /// Suite name to member tokens (feature names or other suite names)
    suites: HashMap<String, Vec<String>>,

    /// Feature name to value
    values: HashMap<String, String>,
}

/// Raw tables as they appear in serialized form, normalized on the way in.
#[derive(Deserialize)]
struct Tables {
    #[serde(default)]
    suites: HashMap<String, Vec<String>>,
    #[serde(default)]
    values: HashMap<String, String>,
}

impl From<Tables> for SuiteStore {
    fn from(tables: Tables) -> Self {
        Self::new(tables.suites, tables.values)
    }
}

impl SuiteStore {
    /// Build a store from raw suite and value tables.
    ///
    /// Malformed entries are dropped silently:
    /// - empty members are removed from each suite,
    /// - suites left without members, or with an empty name, are dropped,
    /// - values with an empty key or an empty value are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use suitecfg_features::SuiteStore;
    ///
    /// let suites = HashMap::from([("Default".to_string(), vec!["Sms".to_string(), String::new()])]);
    /// let values = HashMap::from([("sms".to_string(), "SmsJuhe".to_string())]);
    ///
    /// let store = SuiteStore::new(suites, values);
    /// assert_eq!(store.suite("default"), Some(&["Sms".to_string()][..]));
    /// assert_eq!(store.value("SMS"), Some("SmsJuhe"));
    /// ```
    pub fn new(suites: HashMap<String, Vec<String>>, values: HashMap<String, String>) -> Self {
        let mut store = Self::empty();

        // sorted so colliding keys merge the same way on every run
        let mut suites: Vec<_> = suites.into_iter().collect();
        suites.sort_by(|a, b| a.0.cmp(&b.0));
        let mut values: Vec<_> = values.into_iter().collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, members) in suites {
            let name = normalize(&name);
            if name.is_empty() {
                continue;
            }
            let members: Vec<String> = members.into_iter().filter(|m| !m.is_empty()).collect();
            if members.is_empty() {
                continue;
            }
            // "China" and "china" in the same input end up as one suite
            store.suites.entry(name).or_default().extend(members);
        }

        for (key, value) in values {
            let key = normalize(&key);
            if key.is_empty() || value.is_empty() {
                continue;
            }
            store.values.insert(key, value);
        }

        store
    }

    /// A store with no suites and no values.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Members of a suite, if it is defined.
    pub fn suite(&self, name: &str) -> Option<&[String]> {
        self.suites.get(&normalize(name)).map(|m| m.as_slice())
    }

    /// Whether `name` is a defined suite.
    pub fn contains_suite(&self, name: &str) -> bool {
        self.suites.contains_key(&normalize(name))
    }

    /// Value configured for a feature.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize(key)).map(|v| v.as_str())
    }

    pub fn suite_names(&self) -> impl Iterator<Item = &str> {
        self.suites.keys().map(|k| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of suites.
    pub fn suite_count(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty() && self.values.is_empty()
    }

    /// Lookup used during expansion, `token` is already normalized.
    pub(crate) fn members_of(&self, token: &str) -> Option<&[String]> {
        self.suites.get(token).map(|m| m.as_slice())
    }

    /// Value lookup used during expansion, `token` is already normalized.
    pub(crate) fn value_of(&self, token: &str) -> &str {
        self.values.get(token).map(|v| v.as_str()).unwrap_or("")
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

    fn values(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Sms "), "sms");
        assert_eq!(normalize("WECHAT"), "wechat");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_empty_members_are_stripped() {
        let store = SuiteStore::new(suites(&[("default", &["Sms", ""])]), HashMap::new());
        assert_eq!(store.suite("default"), Some(&["Sms".to_string()][..]));
    }

    #[test]
    fn test_member_order_is_kept() {
        let store = SuiteStore::new(suites(&[("china", &["", "a", "", "b", "c"])]), HashMap::new());
        let members: Vec<&str> = store
            .suite("china")
            .unwrap()
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(members, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_suites_are_dropped() {
        let store = SuiteStore::new(
            suites(&[("default", &["", ""]), ("", &["sms"]), ("  ", &["sms"]), ("ok", &["x"])]),
            HashMap::new(),
        );
        assert!(!store.contains_suite("default"));
        assert!(!store.contains_suite(""));
        assert_eq!(store.suite_count(), 1);
    }

    #[test]
    fn test_suite_names_are_normalized() {
        let store = SuiteStore::new(suites(&[(" China ", &["Wechat"])]), HashMap::new());
        assert!(store.contains_suite("china"));
        assert!(store.contains_suite("CHINA"));
        assert_eq!(store.suite_names().collect::<Vec<_>>(), vec!["china"]);
    }

    #[test]
    fn test_invalid_values_are_dropped() {
        let store = SuiteStore::new(
            HashMap::new(),
            values(&[("sms", "SmsJuhe"), ("", "x"), ("empty", ""), ("Pay", "Alipay")]),
        );
        assert_eq!(store.value("sms"), Some("SmsJuhe"));
        assert_eq!(store.value("pay"), Some("Alipay"));
        assert_eq!(store.value("empty"), None);
        assert_eq!(store.values().count(), 2);
    }

    #[test]
    fn test_values_only_store_is_not_empty() {
        let store = SuiteStore::new(HashMap::new(), values(&[("sms", "SmsJuhe")]));
        assert_eq!(store.suite_count(), 0);
        assert!(!store.is_empty());
        assert!(SuiteStore::empty().is_empty());
    }

    #[test]
    fn test_colliding_value_keys_resolve_the_same_way() {
        for _ in 0..16 {
            let store = SuiteStore::new(
                HashMap::new(),
                values(&[("SMS", "SmsUpper"), ("sms", "SmsLower"), (" Sms", "SmsSpaced")]),
            );
            // " Sms" < "SMS" < "sms" in byte order, the last one wins
            assert_eq!(store.value("sms"), Some("SmsLower"));
        }
    }

    #[test]
    fn test_value_of_defaults_to_empty() {
        let store = SuiteStore::new(HashMap::new(), values(&[("sms", "SmsJuhe")]));
        assert_eq!(store.value_of("sms"), "SmsJuhe");
        assert_eq!(store.value_of("wechat"), "");
    }

    #[test]
    fn test_serde_roundtrip_keeps_tables() {
        let store = SuiteStore::new(
            suites(&[("default", &["sms"])]),
            values(&[("sms", "SmsJuhe")]),
        );
        let json = serde_json::to_string(&store).unwrap();
        let back: SuiteStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let json = r#"{"suites": {"China": ["Sms", ""]}, "values": {"SMS": "SmsJuhe", "x": ""}}"#;
        let store: SuiteStore = serde_json::from_str(json).unwrap();
        assert_eq!(store.suite("china"), Some(&["Sms".to_string()][..]));
        assert_eq!(store.value("sms"), Some("SmsJuhe"));
        assert_eq!(store.value("x"), None);
    }
}
