//! A single validation rule.

use std::fmt;

use crate::core::Violations;

/// Type alias for named check functions.
pub type CheckFn<T> = fn(&T, &mut Violations);

/// The callable behind a rule: a named function reference, or an
/// anonymous closure evaluated with the policy instance.
enum Check<T> {
    Method {
        name: &'static str,
        call: CheckFn<T>,
    },
    Inline {
        call: Box<dyn Fn(&T, &mut Violations) + Send + Sync>,
    },
}

/// One validation check registered on a policy type.
///
/// Named rules compare equal by name alone — registering the same name
/// twice de-duplicates instead of running the check twice. Inline rules
/// never compare equal to anything but themselves.
///
/// # Example
///
/// ```rust
/// use verdict::{Rule, Violations};
///
/// #[derive(Debug)]
/// struct Draft {
///     title: String,
/// }
///
/// impl Draft {
///     fn title_presence(&self, violations: &mut Violations) {
///         if self.title.is_empty() {
///             violations.add("Title is empty", verdict::tags! {});
///         }
///     }
/// }
///
/// let named = Rule::named("title_presence", Draft::title_presence);
/// let fatal = Rule::named("title_presence", Draft::title_presence).stop_on_failure();
///
/// assert_eq!(named, fatal);
/// assert!(fatal.stops_on_failure());
/// ```
pub struct Rule<T> {
    check: Check<T>,
    stop_on_failure: bool,
}

impl<T> Rule<T> {
    /// A rule backed by a named function on the policy type.
    pub fn named(name: &'static str, call: CheckFn<T>) -> Self {
        Rule {
            check: Check::Method { name, call },
            stop_on_failure: false,
        }
    }

    /// An anonymous rule backed by a closure.
    pub fn inline(call: impl Fn(&T, &mut Violations) + Send + Sync + 'static) -> Self {
        Rule {
            check: Check::Inline {
                call: Box::new(call),
            },
            stop_on_failure: false,
        }
    }

    /// Mark this rule as terminal: when it adds at least one new
    /// violation, no further rules run for the instance.
    pub fn stop_on_failure(mut self) -> Self {
        self.stop_on_failure = true;
        self
    }

    /// Whether this rule halts the pipeline on failure.
    pub fn stops_on_failure(&self) -> bool {
        self.stop_on_failure
    }

    /// The rule's name, if it has one.
    pub fn name(&self) -> Option<&'static str> {
        match &self.check {
            Check::Method { name, .. } => Some(name),
            Check::Inline { .. } => None,
        }
    }

    /// Execute the check against a policy instance.
    pub(crate) fn check(&self, subject: &T, violations: &mut Violations) {
        match &self.check {
            Check::Method { call, .. } => call(subject, violations),
            Check::Inline { call } => call(subject, violations),
        }
    }
}

impl<T> PartialEq for Rule<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.name(), other.name()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name())
            .field("stop_on_failure", &self.stop_on_failure)
            .finish()
    }
}
