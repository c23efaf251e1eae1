//! Ordered, de-duplicated rule sets and their builder.

use std::slice;

use crate::core::Violations;

use super::rule::{CheckFn, Rule};

/// The effective, read-only list of rules for a policy type.
///
/// Built once while the type is being defined and never mutated per
/// instance. The list is ordered: rules run in registration order, with
/// inherited rules first.
///
/// # Example
///
/// ```rust
/// use verdict::{Rule, RuleSet, Violations};
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
/// let rules: RuleSet<Draft> = RuleSet::builder()
///     .named("title_presence", Draft::title_presence)
///     .rule(Rule::inline(|_, _| {}))
///     .build();
///
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules.names(), ["title_presence"]);
/// ```
#[derive(Debug)]
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    /// Start building a rule set.
    pub fn builder() -> RuleSetBuilder<T> {
        RuleSetBuilder::new()
    }

    /// An empty rule set (a policy with no checks is always valid).
    pub fn empty() -> Self {
        RuleSet { rules: Vec::new() }
    }

    /// Iterate the rules in execution order.
    pub fn iter(&self) -> slice::Iter<'_, Rule<T>> {
        self.rules.iter()
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The names of the named rules, in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().filter_map(Rule::name).collect()
    }
}

/// Append-only builder for [`RuleSet`], used while a policy type is
/// being defined.
///
/// Registration is additive with de-duplication by name: a name seen
/// again keeps its first position but takes the latest registration's
/// function and stop flag. Re-declaring an inherited rule with the same
/// function therefore changes nothing, while registering a new function
/// under an inherited name overrides it — executed exactly once, at the
/// inherited position.
pub struct RuleSetBuilder<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSetBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        RuleSetBuilder { rules: Vec::new() }
    }

    /// Start from a snapshot of another rule set's effective list.
    ///
    /// Call this first when deriving one policy's rules from another's:
    /// the base rules keep their positions and later additions append.
    /// Changes made to the base set after this call do not propagate.
    pub fn inherit(mut self, base: RuleSet<T>) -> Self {
        for rule in base.rules {
            self.push(rule);
        }
        self
    }

    /// Register a rule.
    pub fn rule(mut self, rule: Rule<T>) -> Self {
        self.push(rule);
        self
    }

    /// Register a named check function.
    pub fn named(self, name: &'static str, call: CheckFn<T>) -> Self {
        self.rule(Rule::named(name, call))
    }

    /// Register an anonymous closure check.
    pub fn inline(self, call: impl Fn(&T, &mut Violations) + Send + Sync + 'static) -> Self {
        self.rule(Rule::inline(call))
    }

    /// Freeze the builder into a read-only rule set.
    pub fn build(self) -> RuleSet<T> {
        RuleSet { rules: self.rules }
    }

    fn push(&mut self, rule: Rule<T>) {
        if let Some(name) = rule.name() {
            if let Some(existing) = self
                .rules
                .iter_mut()
                .find(|candidate| candidate.name() == Some(name))
            {
                *existing = rule;
                return;
            }
        }
        self.rules.push(rule);
    }
}

impl<T> Default for RuleSetBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
