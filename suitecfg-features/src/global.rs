//! Process-wide resolver
//!
//! A drop-in global for code that cannot thread a [`Features`] value
//! through. Prefer owning a [`Features`] and passing it by reference.
//!
//! Until [`initialize`] (or [`install`]) is called the global resolver is
//! empty: nothing is active and every expression is false.
//!
//! Queries and dispatch work on a snapshot taken under a read lock, so an
//! action may itself call [`use_suites`] or [`initialize`]. Such a change
//! is only visible to later calls.

use crate::dispatch::Dispatchable;
use crate::resolver::Features;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use suitecfg_log::info;

static FEATURES: Lazy<RwLock<Arc<Features>>> =
    Lazy::new(|| RwLock::new(Arc::new(Features::empty())));

/// Replace the global resolver with one built from these tables, with the
/// `default` suite active.
pub fn initialize(suites: HashMap<String, Vec<String>>, values: HashMap<String, String>) {
    install(Features::new(suites, values));
}

/// Replace the global resolver.
pub fn install(features: Features) {
    info!(
        target: "suitecfg::global",
        "installing resolver with {} suites, {} active features",
        features.store().suite_count(),
        features.len()
    );
    *FEATURES.write() = Arc::new(features);
}

/// Current global resolver.
pub fn snapshot() -> Arc<Features> {
    FEATURES.read().clone()
}

/// See [`Features::activate`].
pub fn use_suites<I, S>(suites: I, full_replace: bool)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut guard = FEATURES.write();
    Arc::make_mut(&mut guard).activate(suites, full_replace);
}

/// See [`Features::activate_default`].
pub fn use_default() {
    let mut guard = FEATURES.write();
    Arc::make_mut(&mut guard).activate_default();
}

/// See [`Features::lookup`].
pub fn lookup(key: &str) -> Option<String> {
    FEATURES.read().lookup(key).map(str::to_string)
}

/// See [`Features::lookup_and_apply`].
pub fn lookup_and_apply<F>(key: &str, handler: Option<F>)
where
    F: FnOnce(&str),
{
    snapshot().lookup_and_apply(key, handler);
}

/// See [`Features::evaluate`].
pub fn evaluate(expression: &str) -> bool {
    FEATURES.read().evaluate(expression)
}

/// See [`Features::evaluate_all`].
pub fn evaluate_all<I, S>(expressions: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    snapshot().evaluate_all(expressions)
}

/// See [`Features::evaluate_any`].
pub fn evaluate_any<I, S>(expressions: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    snapshot().evaluate_any(expressions)
}

/// See [`Features::dispatch_all`].
pub fn dispatch_all<'a>(actions: impl Dispatchable<'a>) -> bool {
    snapshot().dispatch_all(actions)
}

/// See [`Features::dispatch_first`].
pub fn dispatch_first<'a>(actions: impl Dispatchable<'a>) -> bool {
    snapshot().dispatch_first(actions)
}

/// See [`Features::dispatch_if`].
pub fn dispatch_if(expression: &str, action: impl FnOnce()) -> bool {
    snapshot().dispatch_if(expression, action)
}

/// See [`Features::dispatch_unless`].
pub fn dispatch_unless(expression: &str, action: impl FnOnce()) -> bool {
    snapshot().dispatch_unless(expression, action)
}
