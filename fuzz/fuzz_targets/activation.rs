//! Fuzz target for suite activation.
//!
//! Arbitrary suite graphs, cycles included, must expand in finite time and
//! never activate an empty feature name.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;
use suitecfg_features::Features;

#[derive(Debug, Arbitrary)]
struct FuzzSuites {
    suites: HashMap<String, Vec<String>>,
    values: HashMap<String, String>,
    activate: Vec<String>,
    full_replace: bool,
}

fuzz_target!(|input: FuzzSuites| {
    let mut features = Features::new(input.suites, input.values);
    features.activate(&input.activate, input.full_replace);

    assert!(features.active().all(|(key, _)| !key.is_empty()));

    // merging the same suites again changes nothing
    let before = features.active_map().clone();
    features.activate(&input.activate, false);
    assert_eq!(&before, features.active_map());
});
