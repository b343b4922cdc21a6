// suitecfg - runtime feature resolution from layered named suites
//
// Suites are named presets of feature names (and other suites). Activating
// suites yields an active feature set; code then branches on it with
// expressions like `"sms"` or `"sms = SmsJuhe"`.

// Re-export the resolver
pub use suitecfg_features::*;

// Re-export logging so callers can tune it without a second dependency
pub use suitecfg_log as log;

#[cfg(feature = "config")]
pub use suitecfg_config as config;

#[cfg(feature = "config")]
pub use suitecfg_config::{FeatureConfig, FeatureConfigBuilder};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Actions, DEFAULT_SUITE, Expression, Features, OrderedActions, SuiteStore, global,
    };

    #[cfg(feature = "config")]
    pub use crate::{FeatureConfig, FeatureConfigBuilder};
}
