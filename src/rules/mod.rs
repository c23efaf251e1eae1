//! Rule registration for policy types.
//!
//! A policy type declares its checks once, through an append-only
//! builder, producing a read-only [`RuleSet`]. Rule sets compose:
//! a derived policy starts from a snapshot of its base rules and appends
//! its own, with named duplicates collapsed so re-declaring an inherited
//! rule never runs it twice.

mod rule;
mod set;

pub use rule::{CheckFn, Rule};
pub use set::{RuleSet, RuleSetBuilder};
