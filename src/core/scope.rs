//! Translation scopes for symbolic messages.
//!
//! A scope is the hierarchical namespace path used to look up a translated
//! message for a symbolic key. Policies resolve their scope once, from a
//! root portion (shared across a hierarchy) and a leaf portion (derived
//! from the type name unless pinned).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::violation::TagValue;

/// Root token identifying this library in translation scopes.
pub(crate) const LIBRARY_TOKEN: &str = "verdict";

/// Hierarchical namespace path for translation lookups.
///
/// Scopes render as dot-joined paths (`verdict.readiness_policy`) and
/// travel with symbolic violations as their `scope` tag, so a finding
/// keeps translating against the scope it was produced under even after
/// it is merged into another collection.
///
/// # Example
///
/// ```rust
/// use verdict::Scope;
///
/// let scope = Scope::new(["verdict"]).child("readiness_policy");
/// assert_eq!(scope.to_string(), "verdict.readiness_policy");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope(Vec<String>);

impl Scope {
    /// Build a scope from a sequence of tokens.
    ///
    /// Empty tokens are discarded, so callers can assemble scopes from
    /// optional pieces without producing degenerate paths.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scope(
            parts
                .into_iter()
                .map(Into::into)
                .filter(|part| !part.is_empty())
                .collect(),
        )
    }

    /// The default root scope for policies: the library token alone.
    pub fn library_root() -> Self {
        Scope::new([LIBRARY_TOKEN])
    }

    /// Append a leaf token, returning the extended scope.
    pub fn child(mut self, leaf: impl Into<String>) -> Self {
        let leaf = leaf.into();
        if !leaf.is_empty() {
            self.0.push(leaf);
        }
        self
    }

    /// The scope's tokens in order.
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Render the scope as a tag value (a JSON array of tokens).
    pub fn to_tag(&self) -> TagValue {
        TagValue::Array(self.0.iter().map(|part| TagValue::from(part.as_str())).collect())
    }

    /// Parse a scope back from a tag value.
    ///
    /// Accepts the array form produced by [`Scope::to_tag`] and, for
    /// convenience, a single string token. Returns `None` for anything else.
    pub fn from_tag(value: &TagValue) -> Option<Self> {
        match value {
            TagValue::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(item.as_str()?.to_string());
                }
                Some(Scope(parts))
            }
            TagValue::String(part) => Some(Scope::new([part.as_str()])),
            _ => None,
        }
    }
}

impl Default for Scope {
    /// The fallback scope for violations created outside any policy.
    fn default() -> Self {
        Scope::new([LIBRARY_TOKEN, "violations"])
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Convert a type name to its snake_case scope token.
///
/// Namespace separators (`::`) become `/`, dashes become underscores, and
/// case boundaries are split: `"ReadinessPolicy"` becomes
/// `"readiness_policy"`, `"HTTPPolicy"` becomes `"http_policy"`.
pub fn underscore(name: &str) -> String {
    let name = name.replace("::", "/");
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => {
                    matches!(next, Some(n) if n.is_ascii_lowercase())
                }
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    out
}
