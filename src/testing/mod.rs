//! Test support: locale-matrix assertions over policy outcomes.
//!
//! The checks mirror how acceptance tests talk about policies: "this
//! policy has a violation tagged `field: name`, translated in every
//! configured locale". The policy expression is passed as a deferred
//! closure and re-evaluated once per available locale, so locale-specific
//! translation gaps surface instead of hiding behind a single build.

use thiserror::Error;

use crate::core::TagMap;
use crate::i18n::{is_missing_translation, Translate};
use crate::policy::{Outcome, Policy};

/// Why a locale-matrix check failed.
///
/// Each variant carries a report of the actual violations per locale,
/// rendered into the failure text.
#[derive(Debug, Error)]
pub enum MatchFailure {
    /// No violation matched the tags in at least one locale.
    #[error("expected violations tagged {tags} in every locale\n{report}")]
    NoMatch { tags: String, report: String },

    /// A matched violation rendered as a missing-translation sentinel.
    #[error("matched violations are missing translations\n{report}")]
    MissingTranslation { report: String },

    /// A violation matched the tags although none was expected.
    #[error("expected no violations tagged {tags}\n{report}")]
    UnexpectedMatch { tags: String, report: String },
}

/// Check that the policy is invalid at the given tags in every locale.
///
/// `policy` is evaluated once per available locale. The check passes
/// when each locale yields at least one violation carrying all the tags,
/// and none of the matched messages is a missing-translation sentinel.
///
/// # Example
///
/// ```rust
/// use verdict::testing::check_invalid_at;
/// use verdict::{tags, Catalog, Policy, RuleSet, Violations};
///
/// #[derive(Debug)]
/// struct NamePolicy {
///     name: String,
/// }
///
/// impl Policy for NamePolicy {
///     fn rules() -> RuleSet<Self> {
///         RuleSet::builder()
///             .named("name_presence", Self::name_presence)
///             .build()
///     }
/// }
///
/// impl NamePolicy {
///     fn name_presence(&self, violations: &mut Violations) {
///         if self.name.is_empty() {
///             violations.add("Name is absent", tags! { "field" => "name" });
///         }
///     }
/// }
///
/// let catalog = Catalog::new().with_locale("en");
/// let result = check_invalid_at(&catalog, &tags! { "field" => "name" }, || {
///     NamePolicy { name: String::new() }.evaluate()
/// });
/// assert!(result.is_ok());
/// ```
pub fn check_invalid_at<T, F>(
    translations: &dyn Translate,
    tags: &TagMap,
    mut policy: F,
) -> Result<(), MatchFailure>
where
    T: Policy,
    F: FnMut() -> Outcome<T>,
{
    let mut report = Report::new();
    let mut matched_everywhere = true;
    let mut missing = false;

    for locale in translations.available_locales() {
        let outcome = policy();
        let matched = outcome.violations().by_tags(tags);

        if matched.is_empty() {
            matched_everywhere = false;
        }
        if matched
            .messages(translations, &locale)
            .iter()
            .any(|message| is_missing_translation(message))
        {
            missing = true;
        }

        report.record(&locale, &outcome, translations);
    }

    if !matched_everywhere {
        return Err(MatchFailure::NoMatch {
            tags: render_tags(tags),
            report: report.into_text(),
        });
    }
    if missing {
        return Err(MatchFailure::MissingTranslation {
            report: report.into_text(),
        });
    }
    Ok(())
}

/// Check that the policy has no violation at the given tags, in any
/// locale. The negated form of [`check_invalid_at`].
pub fn check_valid_at<T, F>(
    translations: &dyn Translate,
    tags: &TagMap,
    mut policy: F,
) -> Result<(), MatchFailure>
where
    T: Policy,
    F: FnMut() -> Outcome<T>,
{
    let mut report = Report::new();
    let mut matched_somewhere = false;

    for locale in translations.available_locales() {
        let outcome = policy();
        if !outcome.violations().by_tags(tags).is_empty() {
            matched_somewhere = true;
        }
        report.record(&locale, &outcome, translations);
    }

    if matched_somewhere {
        return Err(MatchFailure::UnexpectedMatch {
            tags: render_tags(tags),
            report: report.into_text(),
        });
    }
    Ok(())
}

/// Panicking wrapper around [`check_invalid_at`] for use in tests.
pub fn assert_invalid_at<T, F>(translations: &dyn Translate, tags: &TagMap, policy: F)
where
    T: Policy,
    F: FnMut() -> Outcome<T>,
{
    if let Err(failure) = check_invalid_at(translations, tags, policy) {
        panic!("{failure}");
    }
}

/// Panicking wrapper around [`check_valid_at`] for use in tests.
pub fn assert_valid_at<T, F>(translations: &dyn Translate, tags: &TagMap, policy: F)
where
    T: Policy,
    F: FnMut() -> Outcome<T>,
{
    if let Err(failure) = check_valid_at(translations, tags, policy) {
        panic!("{failure}");
    }
}

/// Per-locale listing of the actual violations, for failure text.
struct Report {
    text: String,
}

impl Report {
    fn new() -> Self {
        Report {
            text: String::from("Actual violations:\n"),
        }
    }

    fn record<T: Policy>(
        &mut self,
        locale: &str,
        outcome: &Outcome<T>,
        translations: &dyn Translate,
    ) {
        self.text.push_str(&format!("  {locale}:\n"));
        for message in outcome.violations().full_messages(translations, locale) {
            self.text.push_str(&format!("  - {message}\n"));
        }
    }

    fn into_text(self) -> String {
        self.text
    }
}

fn render_tags(tags: &TagMap) -> String {
    serde_json::to_string(tags).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Message, Violations};
    use crate::i18n::Catalog;
    use crate::rules::RuleSet;
    use crate::tags;

    #[derive(Debug)]
    struct TextPolicy {
        text: String,
    }

    impl Policy for TextPolicy {
        fn rules() -> RuleSet<Self> {
            RuleSet::builder()
                .named("text_presence", Self::text_presence)
                .build()
        }
    }

    impl TextPolicy {
        fn text_presence(&self, violations: &mut Violations) {
            if self.text.is_empty() {
                violations.add(
                    Message::key("empty_text"),
                    tags! { "field" => "text", "level" => "error" },
                );
            }
        }
    }

    fn translated_catalog() -> Catalog {
        Catalog::new()
            .with("en", "verdict.text_policy.empty_text", "Text is empty")
            .with("fr", "verdict.text_policy.empty_text", "Texte absent")
    }

    fn empty_policy() -> Outcome<TextPolicy> {
        TextPolicy {
            text: String::new(),
        }
        .evaluate()
    }

    #[test]
    fn passes_when_matched_and_translated_everywhere() {
        let catalog = translated_catalog();
        let result = check_invalid_at(&catalog, &tags! { "field" => "text" }, empty_policy);
        assert!(result.is_ok());
    }

    #[test]
    fn fails_when_no_violation_matches() {
        let catalog = translated_catalog();
        let result = check_invalid_at(&catalog, &tags! { "field" => "title" }, empty_policy);
        assert!(matches!(result, Err(MatchFailure::NoMatch { .. })));
    }

    #[test]
    fn fails_when_a_locale_lacks_the_translation() {
        let catalog = translated_catalog().with_locale("de");
        let result = check_invalid_at(&catalog, &tags! { "field" => "text" }, empty_policy);
        assert!(matches!(
            result,
            Err(MatchFailure::MissingTranslation { .. })
        ));
    }

    #[test]
    fn negated_check_passes_for_valid_policies() {
        let catalog = translated_catalog();
        let result = check_valid_at(&catalog, &tags! { "field" => "text" }, || {
            TextPolicy {
                text: "ready".to_string(),
            }
            .evaluate()
        });
        assert!(result.is_ok());
    }

    #[test]
    fn negated_check_fails_on_unexpected_matches() {
        let catalog = translated_catalog();
        let result = check_valid_at(&catalog, &tags! { "field" => "text" }, empty_policy);
        assert!(matches!(result, Err(MatchFailure::UnexpectedMatch { .. })));
    }

    #[test]
    fn negated_check_ignores_unrelated_violations() {
        let catalog = translated_catalog();
        let result = check_valid_at(&catalog, &tags! { "field" => "title" }, empty_policy);
        assert!(result.is_ok());
    }

    #[test]
    fn subject_is_rebuilt_once_per_locale() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let catalog = translated_catalog();
        let builds = AtomicUsize::new(0);

        let _ = check_invalid_at(&catalog, &tags! { "field" => "text" }, || {
            builds.fetch_add(1, Ordering::SeqCst);
            empty_policy()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failure_text_reports_actual_violations() {
        let catalog = translated_catalog();
        let failure = check_invalid_at(&catalog, &tags! { "field" => "title" }, empty_policy)
            .expect_err("tag does not match");

        let text = failure.to_string();
        assert!(text.contains("en:"));
        assert!(text.contains("fr:"));
        assert!(text.contains("Texte absent"));
    }
}
