//! Feature Resolver
//!
//! Expands suite names into the active feature set and answers queries
//! against it.

use crate::expr::Expression;
use crate::store::{SuiteStore, normalize};
use std::collections::{HashMap, HashSet};
use suitecfg_log::{debug, trace};

/// Name of the suite activated at construction.
pub const DEFAULT_SUITE: &str = "default";

/// Active features resolved from a [`SuiteStore`].
///
/// Suite names and feature names share one namespace: activating a suite
/// makes the suite name itself active, along with every member it expands
/// to. Each active feature carries its value from the store, or an empty
/// string when the store has none.
#[derive(Debug, Clone, Default)]
pub struct Features {
    /// Static suite and value tables
    store: SuiteStore,

    /// Feature name to resolved value
    active: HashMap<String, String>,
}

impl Features {
    /// Build a resolver and activate the `default` suite.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use suitecfg_features::Features;
    ///
    /// let suites = HashMap::from([
    ///     ("default".to_string(), vec!["Sms".to_string()]),
    ///     ("china".to_string(), vec!["Sms".to_string(), "Wechat".to_string()]),
    /// ]);
    /// let values = HashMap::from([
    ///     ("sms".to_string(), "SmsJuhe".to_string()),
    ///     ("wechat".to_string(), "WechatPay".to_string()),
    /// ]);
    ///
    /// let mut features = Features::new(suites, values);
    /// assert_eq!(features.lookup("sms"), Some("SmsJuhe"));
    /// assert_eq!(features.lookup("wechat"), None);
    ///
    /// features.activate(["china"], true);
    /// assert!(features.evaluate("wechat = WechatPay"));
    /// ```
    pub fn new(suites: HashMap<String, Vec<String>>, values: HashMap<String, String>) -> Self {
        Self::from_store(SuiteStore::new(suites, values))
    }

    /// Build a resolver over an existing store and activate `default`.
    pub fn from_store(store: SuiteStore) -> Self {
        let mut features = Self {
            store,
            active: HashMap::new(),
        };
        features.activate_default();
        features
    }

    /// A resolver with no suites and nothing active.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Activate suites.
    ///
    /// With `full_replace` the active set is cleared first, otherwise the
    /// expanded features are merged into it.
    pub fn activate<I, S>(&mut self, suites: I, full_replace: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: Vec<String> = suites.into_iter().map(|s| s.as_ref().to_string()).collect();

        if full_replace && !self.active.is_empty() {
            self.active.clear();
        }

        for feature in self.expand(requested.clone()) {
            let value = self.store.value_of(&feature).to_string();
            self.active.insert(feature, value);
        }

        debug!(
            target: "suitecfg::resolver",
            "activated suites {:?} (full_replace={}), {} features active",
            requested,
            full_replace,
            self.active.len()
        );
    }

    /// Replace the active set with the `default` suite.
    pub fn activate_default(&mut self) {
        self.activate([DEFAULT_SUITE], true);
    }

    /// Flatten suite names into the set of feature names they activate.
    ///
    /// Works as a stack: each popped token is normalized, recorded, and, if
    /// it names a suite not yet expanded in this call, its members are
    /// pushed. The visited set makes cyclic suites terminate.
    fn expand(&self, mut stack: Vec<String>) -> HashSet<String> {
        let mut features = HashSet::with_capacity(stack.len() + 10);
        let mut expanded = HashSet::new();

        while let Some(token) = stack.pop() {
            let token = normalize(&token);
            if token.is_empty() {
                continue;
            }

            if let Some(members) = self.store.members_of(&token) {
                if expanded.insert(token.clone()) {
                    trace!(target: "suitecfg::resolver", "expanding suite {} -> {:?}", token, members);
                    stack.extend(members.iter().cloned());
                } else {
                    trace!(target: "suitecfg::resolver", "suite {} already expanded", token);
                }
            }

            features.insert(token);
        }

        features
    }

    /// Value of an active feature, `None` when it is not active.
    ///
    /// The key is trimmed and lower-cased before lookup.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.active.get(&normalize(key)).map(|v| v.as_str())
    }

    /// Call `handler` with the feature's value if the feature is active.
    pub fn lookup_and_apply<F>(&self, key: &str, handler: Option<F>)
    where
        F: FnOnce(&str),
    {
        if let Some(handler) = handler
            && let Some(value) = self.lookup(key)
        {
            handler(value);
        }
    }

    /// Whether the feature is active.
    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains_key(&normalize(key))
    }

    /// Evaluate an expression such as `"sms"` or `"sms = SmsJuhe"`.
    pub fn evaluate(&self, expression: &str) -> bool {
        self.evaluate_parsed(&Expression::parse(expression))
    }

    /// Evaluate an already parsed expression.
    pub fn evaluate_parsed(&self, expression: &Expression) -> bool {
        let current = expression
            .key()
            .and_then(|key| self.active.get(key))
            .map(|v| v.as_str());
        expression.matches(current)
    }

    /// True if every expression holds. An empty list is false.
    pub fn evaluate_all<I, S>(&self, expressions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = false;
        for expression in expressions {
            if !self.evaluate(expression.as_ref()) {
                return false;
            }
            seen = true;
        }
        seen
    }

    /// True if at least one expression holds. An empty list is false.
    pub fn evaluate_any<I, S>(&self, expressions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        expressions
            .into_iter()
            .any(|expression| self.evaluate(expression.as_ref()))
    }

    /// Active features and their values, in no particular order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.active.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Snapshot of the active set.
    pub fn active_map(&self) -> &HashMap<String, String> {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn store(&self) -> &SuiteStore {
        &self.store
    }
}
