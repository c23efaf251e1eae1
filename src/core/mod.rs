//! Core value model for validation findings.
//!
//! This module contains the pure value types of the library:
//! - Literal and symbolic messages via `Message`
//! - Tagged, immutable findings via `Violation`
//! - The de-duplicating `Violations` collection
//! - Translation scopes via `Scope`
//!
//! Everything here is a plain value: no side effects, no references back
//! to the policy that produced a finding. A violation can be moved freely
//! from one collection to another.

mod macros;
mod scope;
mod violation;
mod violations;

pub use scope::{underscore, Scope};
pub use violation::{Message, TagMap, TagValue, Violation};
pub use violations::Violations;
