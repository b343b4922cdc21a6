//! Dispatch helpers
//!
//! Run code depending on which expressions hold against a [`Features`]
//! set.
//!
//! [`Actions`] keeps its expressions in a hash map, so the order in which
//! they are evaluated (and, for [`Features::dispatch_first`], which of
//! several matching actions wins) is unspecified. Use [`OrderedActions`]
//! when evaluation must follow insertion order.

use crate::resolver::Features;
use std::collections::HashMap;
use std::fmt;

/// A deferred zero-argument action.
pub type Action<'a> = Box<dyn FnOnce() + 'a>;

/// Expression-keyed actions plus fallback actions, evaluated in an
/// unspecified order.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::collections::HashMap;
/// use suitecfg_features::{Actions, Features};
///
/// let features = Features::new(
///     HashMap::from([("default".to_string(), vec!["sms".to_string()])]),
///     HashMap::from([("sms".to_string(), "SmsJuhe".to_string())]),
/// );
///
/// let provider = Cell::new("");
/// features.dispatch_first(
///     Actions::new()
///         .on("sms = SmsJuhe", || provider.set("juhe"))
///         .on("sms = SmsAliyun", || provider.set("aliyun"))
///         .otherwise(|| provider.set("none")),
/// );
/// assert_eq!(provider.get(), "juhe");
/// ```
#[derive(Default)]
pub struct Actions<'a> {
    entries: HashMap<String, Option<Action<'a>>>,
    defaults: Vec<Action<'a>>,
}

impl<'a> Actions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` when `expression` holds. A second action for the same
    /// expression string replaces the first.
    pub fn on(self, expression: impl Into<String>, action: impl FnOnce() + 'a) -> Self {
        self.on_maybe(expression, Some(action))
    }

    /// Like [`Actions::on`], a `None` action never runs and never counts as
    /// a match.
    pub fn on_maybe<F>(mut self, expression: impl Into<String>, action: Option<F>) -> Self
    where
        F: FnOnce() + 'a,
    {
        self.entries
            .insert(expression.into(), action.map(|f| Box::new(f) as Action<'a>));
        self
    }

    /// Fallback run when no expression matched. Fallbacks run in the order
    /// they were added.
    pub fn otherwise(mut self, action: impl FnOnce() + 'a) -> Self {
        self.defaults.push(Box::new(action));
        self
    }

    /// Like [`Actions::otherwise`], `None` is skipped.
    pub fn otherwise_maybe<F>(self, action: Option<F>) -> Self
    where
        F: FnOnce() + 'a,
    {
        match action {
            Some(action) => self.otherwise(action),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Actions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions")
            .field("expressions", &self.entries.keys().collect::<Vec<_>>())
            .field("defaults", &self.defaults.len())
            .finish()
    }
}

/// Expression/action pairs evaluated in insertion order.
#[derive(Default)]
pub struct OrderedActions<'a> {
    entries: Vec<(String, Option<Action<'a>>)>,
    defaults: Vec<Action<'a>>,
}

impl<'a> OrderedActions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, expression: impl Into<String>, action: impl FnOnce() + 'a) -> Self {
        self.on_maybe(expression, Some(action))
    }

    pub fn on_maybe<F>(mut self, expression: impl Into<String>, action: Option<F>) -> Self
    where
        F: FnOnce() + 'a,
    {
        self.entries
            .push((expression.into(), action.map(|f| Box::new(f) as Action<'a>)));
        self
    }

    pub fn otherwise(mut self, action: impl FnOnce() + 'a) -> Self {
        self.defaults.push(Box::new(action));
        self
    }

    pub fn otherwise_maybe<F>(self, action: Option<F>) -> Self
    where
        F: FnOnce() + 'a,
    {
        match action {
            Some(action) => self.otherwise(action),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for OrderedActions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedActions")
            .field(
                "expressions",
                &self.entries.iter().map(|(e, _)| e).collect::<Vec<_>>(),
            )
            .field("defaults", &self.defaults.len())
            .finish()
    }
}

/// A set of expression-keyed actions with fallbacks.
pub trait Dispatchable<'a> {
    /// Split into keyed entries and fallbacks.
    fn into_parts(self) -> (Vec<(String, Option<Action<'a>>)>, Vec<Action<'a>>);
}

impl<'a> Dispatchable<'a> for Actions<'a> {
    fn into_parts(self) -> (Vec<(String, Option<Action<'a>>)>, Vec<Action<'a>>) {
        (self.entries.into_iter().collect(), self.defaults)
    }
}

impl<'a> Dispatchable<'a> for OrderedActions<'a> {
    fn into_parts(self) -> (Vec<(String, Option<Action<'a>>)>, Vec<Action<'a>>) {
        (self.entries, self.defaults)
    }
}

fn run_defaults(defaults: Vec<Action<'_>>) {
    for action in defaults {
        action();
    }
}

impl Features {
    /// Run every action whose expression holds. When none matched, run the
    /// fallbacks in order.
    ///
    /// Returns whether any keyed action ran.
    pub fn dispatch_all<'a>(&self, actions: impl Dispatchable<'a>) -> bool {
        let (entries, defaults) = actions.into_parts();
        let mut matched = false;

        for (expression, action) in entries {
            if let Some(action) = action
                && self.evaluate(&expression)
            {
                action();
                matched = true;
            }
        }

        if !matched {
            run_defaults(defaults);
        }
        matched
    }

    /// Run the first action whose expression holds and stop. When none
    /// matched, run the fallbacks in order.
    ///
    /// Returns whether a keyed action ran.
    pub fn dispatch_first<'a>(&self, actions: impl Dispatchable<'a>) -> bool {
        let (entries, defaults) = actions.into_parts();

        for (expression, action) in entries {
            if let Some(action) = action
                && self.evaluate(&expression)
            {
                action();
                return true;
            }
        }

        run_defaults(defaults);
        false
    }

    /// Run `action` if `expression` holds.
    pub fn dispatch_if(&self, expression: &str, action: impl FnOnce()) -> bool {
        let matched = self.evaluate(expression);
        if matched {
            action();
        }
        matched
    }

    /// Run `action` if `expression` does not hold.
    pub fn dispatch_unless(&self, expression: &str, action: impl FnOnce()) -> bool {
        let missed = !self.evaluate(expression);
        if missed {
            action();
        }
        missed
    }
}
