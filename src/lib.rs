//! Verdict: composable business-rule validation
//!
//! Verdict expresses business-rule validation (as opposed to schema
//! validation) as small composable policy types. A policy declares an
//! ordered set of named rules; evaluating an instance runs every
//! applicable rule exactly once and accumulates tagged, translatable
//! violations. Validity is a snapshot judgment: once evaluated, an
//! outcome never changes.
//!
//! # Core Concepts
//!
//! - **Policy**: a type describing one subject to judge, via the `Policy` trait
//! - **Rules**: named checks registered once per type in a `RuleSet`
//! - **Violations**: the de-duplicating, filterable collection of findings
//! - **Scopes**: hierarchical translation namespaces for symbolic messages
//!
//! # Example
//!
//! ```rust
//! use verdict::{tags, Policy, RuleSet, Violations};
//!
//! #[derive(Debug)]
//! struct ReadinessPolicy {
//!     title: String,
//! }
//!
//! impl Policy for ReadinessPolicy {
//!     fn rules() -> RuleSet<Self> {
//!         RuleSet::builder()
//!             .named("title_presence", Self::title_presence)
//!             .build()
//!     }
//! }
//!
//! impl ReadinessPolicy {
//!     fn title_presence(&self, violations: &mut Violations) {
//!         if self.title.is_empty() {
//!             violations.add(
//!                 "Title is empty",
//!                 tags! { "field" => "title", "level" => "error" },
//!             );
//!         }
//!     }
//! }
//!
//! let outcome = ReadinessPolicy { title: String::new() }.evaluate();
//!
//! assert!(outcome.is_invalid());
//! assert_eq!(outcome.violations().len(), 1);
//! ```

pub mod core;
pub mod i18n;
pub mod policy;
pub mod rules;
pub mod testing;

// Re-export commonly used types
pub use crate::core::{Message, Scope, TagMap, TagValue, Violation, Violations};
pub use crate::i18n::{Catalog, Translate};
pub use crate::policy::{Outcome, Policy, ValidationError};
pub use crate::rules::{Rule, RuleSet, RuleSetBuilder};
