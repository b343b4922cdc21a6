//! Feature expressions
//!
//! The grammar is deliberately tiny:
//!
//! ```text
//! EXPR  := NAME | NAME "=" VALUE
//! ```
//!
//! `NAME` is compared case-insensitively after trimming, `VALUE` is compared
//! exactly after trimming. Anything else (for example two `=` signs) is an
//! invalid expression, which never matches.

use crate::store::normalize;
use std::fmt;

/// A parsed feature expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// `Name`: the feature is active, whatever its value.
    Presence { key: String },

    /// `Name = Value`: the feature is active and its value is `value`.
    Equals { key: String, value: String },

    /// Not a recognized form.
    Invalid,
}

impl Expression {
    /// Parse an expression. Never fails, malformed input yields
    /// [`Expression::Invalid`].
    ///
    /// # Examples
    ///
    /// ```
    /// use suitecfg_features::Expression;
    ///
    /// assert_eq!(
    ///     Expression::parse(" Sms = SmsJuhe "),
    ///     Expression::Equals { key: "sms".into(), value: "SmsJuhe".into() }
    /// );
    /// assert_eq!(Expression::parse("a = b = c"), Expression::Invalid);
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut parts = input.split('=');
        let key = normalize(parts.next().unwrap_or_default());

        match (parts.next(), parts.next()) {
            (None, _) => Self::Presence { key },
            (Some(value), None) => Self::Equals {
                key,
                value: value.trim().to_string(),
            },
            (Some(_), Some(_)) => Self::Invalid,
        }
    }

    /// Normalized feature name, `None` for invalid expressions.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Presence { key } | Self::Equals { key, .. } => Some(key),
            Self::Invalid => None,
        }
    }

    /// Test the expression against a looked-up feature value.
    ///
    /// `active` is the value of the feature in the active set, `None` when
    /// the feature is not active.
    pub fn matches(&self, active: Option<&str>) -> bool {
        match (self, active) {
            (Self::Presence { .. }, Some(_)) => true,
            (Self::Equals { value, .. }, Some(current)) => value == current,
            _ => false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl From<&str> for Expression {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presence { key } => write!(f, "{}", key),
            Self::Equals { key, value } => write!(f, "{} = {}", key, value),
            Self::Invalid => write!(f, "<invalid>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_presence() {
        assert_eq!(
            Expression::parse("  WeChat "),
            Expression::Presence {
                key: "wechat".to_string()
            }
        );
    }

    #[test]
    fn test_parse_equals_trims_but_keeps_case_of_value() {
        let expr = Expression::parse("SMS=  SmsJuhe\t");
        assert_eq!(expr.key(), Some("sms"));
        assert_eq!(
            expr,
            Expression::Equals {
                key: "sms".to_string(),
                value: "SmsJuhe".to_string()
            }
        );
    }

    #[test]
    fn test_parse_multiple_equals_is_invalid() {
        assert_eq!(Expression::parse("sms = a = b"), Expression::Invalid);
        assert_eq!(Expression::parse("=="), Expression::Invalid);
        assert!(!Expression::parse("a=b=c").is_valid());
        assert_eq!(Expression::parse("a=b=c").key(), None);
    }

    #[test]
    fn test_parse_empty_value() {
        assert_eq!(
            Expression::parse("sms ="),
            Expression::Equals {
                key: "sms".to_string(),
                value: String::new()
            }
        );
    }

    #[test]
    fn test_matches() {
        let presence = Expression::parse("sms");
        assert!(presence.matches(Some("")));
        assert!(presence.matches(Some("anything")));
        assert!(!presence.matches(None));

        let equals = Expression::parse("sms = SmsJuhe");
        assert!(equals.matches(Some("SmsJuhe")));
        assert!(!equals.matches(Some("smsjuhe")));
        assert!(!equals.matches(None));

        assert!(!Expression::Invalid.matches(Some("x")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Expression::parse(" Sms = SmsJuhe").to_string(), "sms = SmsJuhe");
        assert_eq!(Expression::parse("Sms").to_string(), "sms");
    }
}
