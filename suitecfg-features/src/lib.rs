//! Suite-based feature resolution
//!
//! Turns named *suites* (ordered lists of feature names, possibly naming
//! other suites) and a table of feature values into an active feature set,
//! then lets code branch on that set with small expressions.
//!
//! # Features
//!
//! - 🧩 **Suites** - Reusable presets that may nest other suites
//! - 🔀 **Activation** - Replace or merge the active set at runtime
//! - 🔍 **Expressions** - `"sms"` or `"sms = SmsJuhe"`
//! - 🎯 **Dispatch** - Run the first, or every, matching action
//! - 🌐 **Global** - Optional process-wide resolver
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use suitecfg_features::*;
//!
//! let suites = HashMap::from([
//!     ("default".to_string(), vec!["Sms".to_string()]),
//!     ("china".to_string(), vec!["default".to_string(), "Wechat".to_string()]),
//! ]);
//! let values = HashMap::from([
//!     ("sms".to_string(), "SmsJuhe".to_string()),
//!     ("wechat".to_string(), "WechatPay".to_string()),
//! ]);
//!
//! // `default` is active straight away
//! let mut features = Features::new(suites, values);
//! assert_eq!(features.lookup("sms"), Some("SmsJuhe"));
//!
//! // switch to the china preset
//! features.activate(["china"], true);
//! assert!(features.evaluate_all(["sms = SmsJuhe", "wechat"]));
//! ```
//!
//! # Dispatch
//!
//! ```
//! use std::cell::Cell;
//! use std::collections::HashMap;
//! use suitecfg_features::*;
//!
//! let features = Features::new(
//!     HashMap::from([("default".to_string(), vec!["sms".to_string()])]),
//!     HashMap::new(),
//! );
//!
//! let sent = Cell::new(0);
//! features.dispatch_all(
//!     Actions::new()
//!         .on("sms", || sent.set(sent.get() + 1))
//!         .on("email", || sent.set(sent.get() + 10))
//!         .otherwise(|| sent.set(-1)),
//! );
//! assert_eq!(sent.get(), 1);
//!
//! features.dispatch_unless("email", || println!("email disabled"));
//! ```

pub mod dispatch;
pub mod expr;
pub mod global;
pub mod resolver;
pub mod store;

pub use dispatch::{Action, Actions, Dispatchable, OrderedActions};
pub use expr::Expression;
pub use resolver::{DEFAULT_SUITE, Features};
pub use store::{SuiteStore, normalize};
