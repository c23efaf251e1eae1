//! The judged policy instance.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

use crate::core::{Violation, Violations};
use crate::i18n::Translate;

use super::error::ValidationError;
use super::{short_type_name, Policy};

/// A policy instance after evaluation: the subject, its violation
/// collection, and the moment the judgment was made.
///
/// An outcome is a read-only query surface. The collection never changes
/// after evaluation — a policy is a snapshot judgment of the attributes
/// it was built with.
///
/// # Example
///
/// ```rust
/// use verdict::{tags, Policy, RuleSet, Violations};
///
/// #[derive(Debug)]
/// struct Draft {
///     title: String,
/// }
///
/// impl Policy for Draft {
///     fn rules() -> RuleSet<Self> {
///         RuleSet::builder()
///             .named("title_presence", Self::title_presence)
///             .build()
///     }
/// }
///
/// impl Draft {
///     fn title_presence(&self, violations: &mut Violations) {
///         if self.title.is_empty() {
///             violations.add(
///                 "Title is empty",
///                 tags! { "field" => "title", "level" => "error" },
///             );
///         }
///     }
/// }
///
/// let outcome = Draft { title: String::new() }.evaluate();
///
/// assert!(outcome.is_invalid());
/// // Warnings can be ignored without losing the error findings:
/// assert!(!outcome.is_valid_where(|v| v.tag_str("level") == Some("warning")));
/// ```
#[derive(Clone, Serialize)]
pub struct Outcome<T: Policy> {
    policy: T,
    violations: Violations,
    evaluated_at: DateTime<Utc>,
}

impl<T: Policy> Outcome<T> {
    /// Run the policy's rule pipeline and capture the judgment.
    ///
    /// Rules execute in order. After each rule, the collection size is
    /// compared with the size before it ran; a `stop_on_failure` rule
    /// that added at least one new violation terminates the pipeline.
    pub(crate) fn evaluate(policy: T) -> Self {
        let rules = T::rules();
        let mut violations = Violations::new(T::scope());

        for rule in rules.iter() {
            let label = rule.name().unwrap_or("<inline>");
            trace!(policy = short_type_name::<T>(), rule = label, "running rule");

            let before = violations.len();
            rule.check(&policy, &mut violations);
            let added = violations.len().saturating_sub(before);

            if added > 0 {
                debug!(
                    policy = short_type_name::<T>(),
                    rule = label,
                    added,
                    "rule reported violations"
                );
                if rule.stops_on_failure() {
                    debug!(
                        policy = short_type_name::<T>(),
                        rule = label,
                        "halting pipeline after stop_on_failure rule"
                    );
                    break;
                }
            }
        }

        Outcome {
            policy,
            violations,
            evaluated_at: Utc::now(),
        }
    }

    /// The judged policy value.
    pub fn policy(&self) -> &T {
        &self.policy
    }

    /// Consume the outcome, returning the policy value.
    pub fn into_policy(self) -> T {
        self.policy
    }

    /// The violations found during evaluation.
    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// When the judgment was made.
    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    /// Whether no violations were found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether at least one violation was found.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Validity with a filter: violations for which `ignore` returns
    /// true are disregarded.
    pub fn is_valid_where(&self, ignore: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().all(|violation| ignore(violation))
    }

    /// The strict complement of [`is_valid_where`](Self::is_valid_where)
    /// under the same filter.
    pub fn is_invalid_where(&self, ignore: impl Fn(&Violation) -> bool) -> bool {
        !self.is_valid_where(ignore)
    }

    /// Require validity, or fail with a [`ValidationError`] carrying
    /// this outcome and a summary of its violations.
    pub fn ensure_valid(
        self,
        translations: &dyn Translate,
        locale: &str,
    ) -> Result<Self, ValidationError<T>> {
        self.ensure_valid_where(|_| false, translations, locale)
    }

    /// Require validity under a filter: ignored violations neither fail
    /// the check nor appear in the error summary.
    pub fn ensure_valid_where(
        self,
        ignore: impl Fn(&Violation) -> bool,
        translations: &dyn Translate,
        locale: &str,
    ) -> Result<Self, ValidationError<T>> {
        if self.is_valid_where(&ignore) {
            Ok(self)
        } else {
            Err(ValidationError::new(self, ignore, translations, locale))
        }
    }
}

impl<T: Policy> fmt::Debug for Outcome<T> {
    /// Renders the policy type with its attributes and the number of
    /// findings, for diagnostics only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#<{} {:?} violations={}>",
            short_type_name::<T>(),
            self.policy,
            self.violations.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rule, RuleSet};
    use crate::tags;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StopPolicy {
        tail_runs: AtomicUsize,
    }

    impl Policy for StopPolicy {
        fn rules() -> RuleSet<Self> {
            RuleSet::builder()
                .rule(Rule::named("always_fails", Self::always_fails).stop_on_failure())
                .named("tail", Self::tail)
                .build()
        }
    }

    impl StopPolicy {
        fn always_fails(&self, violations: &mut Violations) {
            violations.add("boom", tags! {});
        }

        fn tail(&self, _violations: &mut Violations) {
            self.tail_runs.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn stop_on_failure_halts_the_pipeline() {
        let outcome = StopPolicy {
            tail_runs: AtomicUsize::new(0),
        }
        .evaluate();

        assert!(outcome.is_invalid());
        assert_eq!(outcome.policy().tail_runs.load(Ordering::SeqCst), 0);
    }

    #[derive(Debug)]
    struct QuietStopPolicy {
        tail_runs: AtomicUsize,
    }

    impl Policy for QuietStopPolicy {
        fn rules() -> RuleSet<Self> {
            RuleSet::builder()
                .rule(Rule::named("passes", Self::passes).stop_on_failure())
                .named("tail", Self::tail)
                .build()
        }
    }

    impl QuietStopPolicy {
        fn passes(&self, _violations: &mut Violations) {}

        fn tail(&self, _violations: &mut Violations) {
            self.tail_runs.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn passing_stop_rule_does_not_halt_the_pipeline() {
        let outcome = QuietStopPolicy {
            tail_runs: AtomicUsize::new(0),
        }
        .evaluate();

        assert!(outcome.is_valid());
        assert_eq!(outcome.policy().tail_runs.load(Ordering::SeqCst), 1);
    }

    #[derive(Debug)]
    struct DuplicateReporter;

    impl Policy for DuplicateReporter {
        fn rules() -> RuleSet<Self> {
            RuleSet::builder()
                .named("first", Self::first)
                .rule(Rule::named("repeats", Self::repeats).stop_on_failure())
                .named("tail", Self::tail)
                .build()
        }
    }

    impl DuplicateReporter {
        fn first(&self, violations: &mut Violations) {
            violations.add("boom", tags! {});
        }

        fn repeats(&self, violations: &mut Violations) {
            // Re-adds an existing finding: the collection does not grow,
            // so stop_on_failure must not trigger.
            violations.add("boom", tags! {});
        }

        fn tail(&self, violations: &mut Violations) {
            violations.add("tail ran", tags! {});
        }
    }

    #[test]
    fn stop_on_failure_counts_new_findings_only() {
        let outcome = DuplicateReporter.evaluate();

        assert_eq!(outcome.violations().len(), 2);
        let messages: Vec<String> = outcome
            .violations()
            .iter()
            .map(|v| v.key().to_string())
            .collect();
        assert!(messages.contains(&"tail ran".to_string()));
    }

    #[derive(Debug)]
    struct Mixed;

    impl Policy for Mixed {
        fn rules() -> RuleSet<Self> {
            RuleSet::builder()
                .inline(|_: &Mixed, violations: &mut Violations| {
                    violations.add("warned", tags! { "level" => "warning" });
                })
                .inline(|_: &Mixed, violations: &mut Violations| {
                    violations.add("failed", tags! { "level" => "error" });
                })
                .build()
        }
    }

    #[test]
    fn filtered_validity_ignores_matching_findings() {
        let outcome = Mixed.evaluate();

        let ignore_warnings = |v: &Violation| v.tag_str("level") == Some("warning");
        assert!(!outcome.is_valid_where(ignore_warnings));
        assert!(outcome.is_invalid_where(ignore_warnings));

        let ignore_all = |_: &Violation| true;
        assert!(outcome.is_valid_where(ignore_all));
        assert!(!outcome.is_invalid_where(ignore_all));
    }

    #[test]
    fn debug_rendering_names_the_policy_type() {
        let outcome = Mixed.evaluate();
        let rendered = format!("{outcome:?}");

        assert!(rendered.starts_with("#<Mixed"));
        assert!(rendered.contains("violations=2"));
    }

    #[test]
    fn outcome_exposes_the_judged_policy() {
        let outcome = Mixed.evaluate();
        let policy: Mixed = outcome.into_policy();
        let _ = policy;
    }

    #[derive(Debug, serde::Serialize)]
    struct Snapshot {
        title: String,
    }

    impl Policy for Snapshot {
        fn rules() -> RuleSet<Self> {
            RuleSet::empty()
        }
    }

    #[test]
    fn outcome_serializes_as_a_snapshot() {
        let outcome = Snapshot {
            title: "ready".to_string(),
        }
        .evaluate();

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["policy"]["title"], "ready");
        assert_eq!(json["violations"]["set"], serde_json::json!([]));
        assert!(json["evaluated_at"].is_string());
    }
}
