//! The collection of violations owned by one policy outcome.
//!
//! A collection is context-dependent: it knows the translation scope of
//! the policy it belongs to, and injects that scope into symbolic
//! messages added without one. Insertion order is preserved for
//! reproducible reports, but equal findings are stored only once.

use serde::{Deserialize, Serialize};
use std::slice;

use crate::i18n::Translate;

use super::scope::Scope;
use super::violation::{Message, TagMap, Violation};

/// Insertion-ordered, de-duplicating collection of [`Violation`] values.
///
/// # Example
///
/// ```rust
/// use verdict::{tags, Scope, Violations};
///
/// let mut violations = Violations::new(Scope::library_root().child("demo"));
/// violations
///     .add("Title is empty", tags! { "field" => "title" })
///     .add("Title is empty", tags! { "field" => "title" });
///
/// // Equal findings collapse into one entry.
/// assert_eq!(violations.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Violations {
    scope: Scope,
    set: Vec<Violation>,
}

impl Violations {
    /// Create an empty collection with the given default scope.
    pub fn new(scope: Scope) -> Self {
        Violations {
            scope,
            set: Vec::new(),
        }
    }

    /// The default translation scope of this collection.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Add a finding to the collection.
    ///
    /// Symbolic messages without an explicit `scope` tag receive this
    /// collection's scope. Adding an equal `(key, tags)` pair twice leaves
    /// the collection unchanged. Returns the collection for chaining.
    pub fn add(&mut self, message: impl Into<Message>, mut tags: TagMap) -> &mut Self {
        let message = message.into();
        if message.is_key() && !tags.contains_key("scope") {
            tags.insert("scope".to_string(), self.scope.to_tag());
        }
        self.insert(Violation::new(message, tags));
        self
    }

    /// Number of distinct findings.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether the collection holds no findings.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Whether no finding satisfies the predicate.
    pub fn is_empty_where(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        !self.set.iter().any(|violation| predicate(violation))
    }

    /// Whether an equal finding is already present.
    pub fn contains(&self, violation: &Violation) -> bool {
        self.set.contains(violation)
    }

    /// Iterate the findings in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Violation> {
        self.set.iter()
    }

    /// A new collection (with the same scope) holding only the findings
    /// that match the optional key and carry all the given tags.
    pub fn filter(&self, key: Option<&Message>, tags: &TagMap) -> Violations {
        let mut filtered = Violations::new(self.scope.clone());
        for violation in &self.set {
            if violation.matches(key, tags) {
                filtered.insert(violation.clone());
            }
        }
        filtered
    }

    /// [`filter`](Self::filter) by tags alone.
    pub fn by_tags(&self, tags: &TagMap) -> Violations {
        self.filter(None, tags)
    }

    /// Merge another collection into this one.
    ///
    /// Every finding of `other` is re-added here with `extra` tags merged
    /// in. Findings keep their own `scope` tag, so symbolic messages still
    /// translate against the scope they were produced under.
    pub fn merge(&mut self, other: &Violations, extra: TagMap) -> &mut Self {
        self.merge_with(other, extra, |_| {})
    }

    /// Merge another collection, transforming each finding's tags first.
    ///
    /// The transformation runs before `extra` is merged in, so explicit
    /// extras win over transformed values. Used by composed policies to
    /// re-qualify sub-policy findings (e.g. prefixing a `field` tag)
    /// while preserving the original message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{tags, Scope, TagValue, Violations};
    ///
    /// let mut inner = Violations::new(Scope::library_root().child("section"));
    /// inner.add("Heading is empty", tags! { "field" => "heading" });
    ///
    /// let mut outer = Violations::new(Scope::library_root().child("article"));
    /// outer.merge_with(&inner, tags! { "source" => "section" }, |tags| {
    ///     if let Some(field) = tags.get("field").and_then(TagValue::as_str) {
    ///         let qualified = format!("sections[0].{field}");
    ///         tags.insert("field".to_string(), qualified.into());
    ///     }
    /// });
    ///
    /// let merged = outer.iter().next().unwrap();
    /// assert_eq!(merged.tag_str("field"), Some("sections[0].heading"));
    /// assert_eq!(merged.tag_str("source"), Some("section"));
    /// ```
    pub fn merge_with(
        &mut self,
        other: &Violations,
        extra: TagMap,
        mut transform: impl FnMut(&mut TagMap),
    ) -> &mut Self {
        for violation in &other.set {
            let mut tags = violation.tags().clone();
            transform(&mut tags);
            tags.extend(extra.clone());
            self.add(violation.key().clone(), tags);
        }
        self
    }

    /// All messages in the given locale, sorted for determinism.
    pub fn messages(&self, translations: &dyn Translate, locale: &str) -> Vec<String> {
        let mut messages: Vec<String> = self
            .set
            .iter()
            .map(|violation| violation.message(translations, locale))
            .collect();
        messages.sort();
        messages
    }

    /// All full messages (message plus tags) in the given locale, sorted.
    pub fn full_messages(&self, translations: &dyn Translate, locale: &str) -> Vec<String> {
        let mut messages: Vec<String> = self
            .set
            .iter()
            .map(|violation| violation.full_message(translations, locale))
            .collect();
        messages.sort();
        messages
    }

    /// Insert a prebuilt violation, suppressing duplicates.
    fn insert(&mut self, violation: Violation) {
        if !self.set.contains(&violation) {
            self.set.push(violation);
        }
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}
