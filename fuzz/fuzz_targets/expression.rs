//! Fuzz target for expression parsing and evaluation.
//!
//! Checks that evaluation never panics and agrees with lookup.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use suitecfg_features::{Expression, Features};

#[derive(Debug, Arbitrary)]
struct FuzzExpression {
    /// Features to activate
    active: Vec<String>,
    /// Raw expression
    expression: String,
}

fuzz_target!(|input: FuzzExpression| {
    let mut features = Features::empty();
    features.activate(&input.active, true);

    let result = features.evaluate(&input.expression);

    match Expression::parse(&input.expression) {
        Expression::Presence { ref key } => {
            assert_eq!(result, features.lookup(key).is_some());
        }
        Expression::Equals { ref key, ref value } => {
            assert_eq!(result, features.lookup(key) == Some(value.as_str()));
        }
        Expression::Invalid => assert!(!result),
    }
});
