//! Integration tests for common suitecfg workflows.
//!
//! These tests verify that the most common use cases work correctly.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use suitecfg::prelude::*;

fn sms_tables() -> (HashMap<String, Vec<String>>, HashMap<String, String>) {
    let suites = HashMap::from([
        ("default".to_string(), vec!["Sms".to_string()]),
        (
            "china".to_string(),
            vec!["Sms".to_string(), "Wechat".to_string()],
        ),
    ]);
    let values = HashMap::from([
        ("sms".to_string(), "SmsJuhe".to_string()),
        ("wechat".to_string(), "WechatPay".to_string()),
    ]);
    (suites, values)
}

// =============================================================================
// Activation
// =============================================================================

#[test]
fn test_sms_provider_scenario() {
    let (suites, values) = sms_tables();
    let mut features = Features::new(suites, values);

    // default suite is active after construction
    assert_eq!(features.lookup("sms"), Some("SmsJuhe"));
    assert_eq!(features.lookup("wechat"), None);

    features.activate(["china"], true);
    assert_eq!(features.lookup("wechat"), Some("WechatPay"));
    assert!(features.evaluate("sms = SmsJuhe"));
    assert!(!features.evaluate("sms = Other"));
}

#[test]
fn test_layered_presets() {
    let suites = HashMap::from([
        ("default".to_string(), vec!["base".to_string()]),
        (
            "base".to_string(),
            vec!["Logging".to_string(), "Metrics".to_string()],
        ),
        (
            "production".to_string(),
            vec!["base".to_string(), "Tls".to_string()],
        ),
        (
            "debug".to_string(),
            vec!["Logging".to_string(), "Profiler".to_string()],
        ),
    ]);
    let values = HashMap::from([("logging".to_string(), "json".to_string())]);
    let mut features = Features::new(suites, values);

    features.activate(["production"], true);
    assert!(features.evaluate_all(["logging = json", "metrics", "tls"]));
    assert!(!features.evaluate("profiler"));

    // merge a second preset on top
    features.activate(["debug"], false);
    assert!(features.evaluate_all(["tls", "profiler"]));
}

#[test]
fn test_empty_member_is_normalized_away() {
    let suites = HashMap::from([(
        "default".to_string(),
        vec!["Sms".to_string(), String::new()],
    )]);
    let features = Features::new(suites, HashMap::new());

    assert_eq!(
        features.store().suite("default"),
        Some(&["Sms".to_string()][..])
    );
    assert!(features.active().all(|(key, _)| !key.is_empty()));
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_pick_provider_with_dispatch_first() {
    let (suites, values) = sms_tables();
    let features = Features::new(suites, values);
    let ran = RefCell::new(Vec::new());

    features.dispatch_first(
        Actions::new()
            .on("sms", || ran.borrow_mut().push("sms"))
            .on("wechat", || ran.borrow_mut().push("wechat")),
    );

    assert_eq!(*ran.borrow(), vec!["sms"]);
}

#[test]
fn test_dispatch_with_fallback() {
    let (suites, values) = sms_tables();
    let features = Features::new(suites, values);
    let provider = Cell::new("unset");

    features.dispatch_first(
        OrderedActions::new()
            .on("sms = SmsAliyun", || provider.set("aliyun"))
            .on("sms = SmsTencent", || provider.set("tencent"))
            .otherwise(|| provider.set("console")),
    );
    assert_eq!(provider.get(), "console");

    features.dispatch_if("sms = SmsJuhe", || provider.set("juhe"));
    assert_eq!(provider.get(), "juhe");
}

// =============================================================================
// Configuration
// =============================================================================

#[cfg(feature = "config")]
#[test]
fn test_features_from_toml_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("features.toml");
    std::fs::write(
        &path,
        r#"
        active = ["china"]

        [suites]
        default = ["Sms"]
        china = ["Sms", "Wechat"]

        [values]
        sms = "SmsJuhe"
        wechat = "WechatPay"
        "#,
    )
    .unwrap();

    let features = FeatureConfig::builder()
        .add_file(&path)
        .strict()
        .build_features()
        .unwrap();

    assert!(features.evaluate_all(["default", "china", "wechat = WechatPay"]));
}

// =============================================================================
// Global resolver
// =============================================================================

#[test]
fn test_global_resolver() {
    let (suites, values) = sms_tables();
    global::initialize(suites, values);

    assert_eq!(global::lookup("SMS"), Some("SmsJuhe".to_string()));
    assert!(!global::evaluate("wechat"));

    global::use_suites(["china"], false);
    assert!(global::evaluate_all(["sms", "wechat"]));

    global::use_default();
    let hit = Cell::new(false);
    global::dispatch_unless("wechat", || hit.set(true));
    assert!(hit.get());
}
