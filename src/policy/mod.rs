//! Policy definition and evaluation.
//!
//! A policy type implements [`Policy`]: it declares its rule set and,
//! optionally, overrides the translation scope hooks. Evaluating an
//! instance runs every applicable rule in order — synchronously, exactly
//! once — and returns an [`Outcome`]: the judged instance with its
//! violation collection. There is no re-validation entry point; validity
//! is fixed when the outcome is produced.

mod error;
mod outcome;

pub use error::ValidationError;
pub use outcome::Outcome;

use std::fmt::Debug;

use crate::core::{underscore, Message, Scope, TagMap};
use crate::i18n::{missing_translation, Translate};
use crate::rules::RuleSet;

/// Trait for value-validating policy types.
///
/// A policy is bound to one subject (plus any computed attributes its
/// constructor derives) and judges it with a fixed list of checks.
///
/// # Required Traits
///
/// - `Debug`: policies must be debuggable — outcomes and validation
///   errors render the offending instance for diagnostics
///
/// # Example
///
/// ```rust
/// use verdict::{tags, Policy, RuleSet, Violations};
///
/// #[derive(Debug)]
/// struct UserPolicy {
///     name: String,
///     email: String,
/// }
///
/// impl Policy for UserPolicy {
///     fn rules() -> RuleSet<Self> {
///         RuleSet::builder()
///             .named("name_presence", Self::name_presence)
///             .named("email_presence", Self::email_presence)
///             .build()
///     }
/// }
///
/// impl UserPolicy {
///     fn name_presence(&self, violations: &mut Violations) {
///         if self.name.is_empty() {
///             violations.add("Name is absent", tags! { "field" => "name" });
///         }
///     }
///
///     fn email_presence(&self, violations: &mut Violations) {
///         if self.email.is_empty() {
///             violations.add("Email is absent", tags! { "field" => "email" });
///         }
///     }
/// }
///
/// let outcome = UserPolicy {
///     name: "Andy".to_string(),
///     email: String::new(),
/// }
/// .evaluate();
///
/// assert!(outcome.is_invalid());
/// assert_eq!(UserPolicy::scope().to_string(), "verdict.user_policy");
/// ```
pub trait Policy: Debug + Sized {
    /// The ordered rule set for this policy type.
    ///
    /// Declared once, while the type is defined; the returned set is the
    /// effective list — base rules first when composing via
    /// [`RuleSetBuilder::inherit`](crate::RuleSetBuilder::inherit).
    fn rules() -> RuleSet<Self>;

    /// The root portion of the translation scope.
    ///
    /// Defaults to the library token. Override it in a shared base impl
    /// to give a whole policy hierarchy a common root.
    fn root_scope() -> Scope {
        Scope::library_root()
    }

    /// The leaf portion of the translation scope.
    ///
    /// Defaults to the snake_case of the type's unqualified name. Not
    /// inherited: every type computes its own leaf unless it pins one.
    fn leaf_scope() -> String {
        underscore(short_type_name::<Self>())
    }

    /// The effective translation scope: root followed by leaf.
    fn scope() -> Scope {
        Self::root_scope().child(Self::leaf_scope())
    }

    /// Judge this instance: run every applicable rule in order and
    /// return the evaluated outcome.
    fn evaluate(self) -> Outcome<Self> {
        Outcome::evaluate(self)
    }

    /// Translate a message in this policy's scope.
    ///
    /// Literal messages pass through verbatim; symbolic keys resolve
    /// through the port, falling back to the recognizable
    /// `translation missing: ...` sentinel.
    fn t(
        message: &Message,
        variables: &TagMap,
        translations: &dyn Translate,
        locale: &str,
    ) -> String {
        match message {
            Message::Text(text) => text.clone(),
            Message::Key(key) => {
                let scope = Self::scope();
                translations
                    .translate(locale, &scope, key, variables)
                    .unwrap_or_else(|| missing_translation(locale, &scope, key))
            }
        }
    }
}

/// The unqualified name of a type, without its module path.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
