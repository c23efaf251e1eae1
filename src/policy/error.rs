//! The error raised when a policy is required to be valid.

use thiserror::Error;

use crate::core::Violation;
use crate::i18n::Translate;

use super::outcome::Outcome;
use super::Policy;

/// Failure returned by [`Outcome::ensure_valid`] and
/// [`Outcome::ensure_valid_where`].
///
/// Carries the offending outcome and a precomputed summary: the full
/// messages of the kept (non-ignored) violations, sorted and joined
/// under a fixed header. The summary is deterministic, suitable for
/// logs and API error bodies.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationError<T: Policy> {
    outcome: Outcome<T>,
    message: String,
}

impl<T: Policy> ValidationError<T> {
    pub(crate) fn new(
        outcome: Outcome<T>,
        ignore: impl Fn(&Violation) -> bool,
        translations: &dyn Translate,
        locale: &str,
    ) -> Self {
        let mut kept: Vec<String> = outcome
            .violations()
            .iter()
            .filter(|violation| !ignore(violation))
            .map(|violation| violation.full_message(translations, locale))
            .collect();
        kept.sort();

        let mut message = String::from("Validation failed with errors:");
        for item in &kept {
            message.push_str("\n- ");
            message.push_str(item);
        }

        ValidationError { outcome, message }
    }

    /// The outcome whose validation failed.
    pub fn outcome(&self) -> &Outcome<T> {
        &self.outcome
    }

    /// Consume the error, returning the outcome.
    pub fn into_outcome(self) -> Outcome<T> {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Violations;
    use crate::i18n::Catalog;
    use crate::rules::RuleSet;
    use crate::tags;

    #[derive(Debug)]
    struct Noisy;

    impl Policy for Noisy {
        fn rules() -> RuleSet<Self> {
            RuleSet::builder()
                .named("report", Self::report)
                .build()
        }
    }

    impl Noisy {
        fn report(&self, violations: &mut Violations) {
            violations.add("Title is empty", tags! { "field" => "title" });
            violations.add("Text is empty", tags! { "field" => "text", "level" => "warning" });
        }
    }

    #[test]
    fn ensure_valid_passes_through_valid_outcomes() {
        #[derive(Debug)]
        struct Quiet;

        impl Policy for Quiet {
            fn rules() -> RuleSet<Self> {
                RuleSet::empty()
            }
        }

        let catalog = Catalog::new();
        assert!(Quiet.evaluate().ensure_valid(&catalog, "en").is_ok());
    }

    #[test]
    fn message_joins_sorted_full_messages() {
        let catalog = Catalog::new();
        let error = Noisy
            .evaluate()
            .ensure_valid(&catalog, "en")
            .expect_err("two violations should fail");

        assert_eq!(
            error.to_string(),
            "Validation failed with errors:\n\
             - Text is empty {\"field\":\"text\",\"level\":\"warning\"}\n\
             - Title is empty {\"field\":\"title\"}"
        );
    }

    #[test]
    fn ignored_violations_are_left_out_of_the_summary() {
        let catalog = Catalog::new();
        let error = Noisy
            .evaluate()
            .ensure_valid_where(
                |v| v.tag_str("level") == Some("warning"),
                &catalog,
                "en",
            )
            .expect_err("the title violation still counts");

        assert_eq!(
            error.to_string(),
            "Validation failed with errors:\n- Title is empty {\"field\":\"title\"}"
        );
    }

    #[test]
    fn error_carries_the_offending_outcome() {
        let catalog = Catalog::new();
        let error = Noisy
            .evaluate()
            .ensure_valid(&catalog, "en")
            .expect_err("invalid outcome");

        assert_eq!(error.outcome().violations().len(), 2);
        assert_eq!(error.into_outcome().violations().len(), 2);
    }
}
