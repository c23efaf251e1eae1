//! A single validation finding.
//!
//! A violation is an immutable value: a message (literal text or a
//! symbolic key resolved through a translation port) plus an open map of
//! tags. It is context-independent — it knows nothing about the
//! collection it is placed in, so it can be moved safely between
//! collections of [`Violations`](super::Violations).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::i18n::{missing_translation, Translate};

use super::scope::Scope;

/// Value attached to a violation under a tag name.
///
/// Tags are open-ended annotations, so values are arbitrary JSON data.
pub type TagValue = serde_json::Value;

/// Ordered mapping from tag name to tag value.
///
/// The ordering keeps tag rendering and equality deterministic.
pub type TagMap = BTreeMap<String, TagValue>;

/// The content a violation was created with.
///
/// `Text` is used verbatim as the human-readable message. `Key` is a
/// symbolic identifier resolved through a [`Translate`] port in the scope
/// carried by the violation's `scope` tag.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Message {
    /// Literal text, returned as-is.
    Text(String),
    /// Symbolic key, translated at render time.
    Key(String),
}

impl Message {
    /// Build a symbolic key message.
    pub fn key(key: impl Into<String>) -> Self {
        Message::Key(key.into())
    }

    /// Whether this message is a symbolic key.
    pub fn is_key(&self) -> bool {
        matches!(self, Message::Key(_))
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) | Message::Key(text) => write!(f, "{text}"),
        }
    }
}

/// An immutable validation finding with a message and assigned tags.
///
/// Two violations are equal iff their `(key, tags)` pairs are equal;
/// collections rely on this for de-duplication.
///
/// # Example
///
/// ```rust
/// use verdict::{tags, Violation};
///
/// let violation = Violation::new(
///     "Title is empty",
///     tags! { "field" => "title", "level" => "error" },
/// );
///
/// assert_eq!(violation.tag_str("field"), Some("title"));
/// assert_eq!(violation.tag("missing"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    key: Message,
    tags: TagMap,
}

impl Violation {
    /// Build a violation from a message and tags.
    ///
    /// Symbolic keys always carry a `scope` tag; when the caller supplies
    /// none, the library fallback scope is injected. Collections inject
    /// their own scope instead (see [`Violations::add`](super::Violations::add)).
    pub fn new(key: impl Into<Message>, mut tags: TagMap) -> Self {
        let key = key.into();
        if key.is_key() && !tags.contains_key("scope") {
            tags.insert("scope".to_string(), Scope::default().to_tag());
        }
        Violation { key, tags }
    }

    /// The literal text or symbolic key this violation was created with.
    pub fn key(&self) -> &Message {
        &self.key
    }

    /// All tags assigned to this violation.
    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    /// Look up a tag by name.
    ///
    /// Returns `None` for unknown tags — never panics and never falls back
    /// to any reflective lookup.
    pub fn tag(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    /// Look up a tag expected to hold a string.
    pub fn tag_str(&self, name: &str) -> Option<&str> {
        self.tags.get(name).and_then(TagValue::as_str)
    }

    /// The translation scope carried by this violation, if any.
    pub fn scope(&self) -> Option<Scope> {
        self.tags.get("scope").and_then(Scope::from_tag)
    }

    /// Whether this violation matches an optional key and a set of tag
    /// constraints (the violation's tags must be a superset).
    pub fn matches(&self, key: Option<&Message>, tags: &TagMap) -> bool {
        if let Some(key) = key {
            if key != &self.key {
                return false;
            }
        }
        tags.iter().all(|(name, value)| self.tags.get(name) == Some(value))
    }

    /// The message text in the given locale.
    ///
    /// Literal messages are returned verbatim. Symbolic keys are resolved
    /// through the translation port with the violation's scope and its
    /// non-scope tags as variables; when no translation exists the result
    /// is a recognizable `translation missing: ...` sentinel, never a
    /// silent fallback to the key name.
    pub fn message(&self, translations: &dyn Translate, locale: &str) -> String {
        match &self.key {
            Message::Text(text) => text.clone(),
            Message::Key(key) => {
                let scope = self.scope().unwrap_or_default();
                let variables = self.variables();
                translations
                    .translate(locale, &scope, key, &variables)
                    .unwrap_or_else(|| missing_translation(locale, &scope, key))
            }
        }
    }

    /// The message followed by a rendering of the non-scope tags.
    ///
    /// Used for human-facing exception text and failure reports.
    pub fn full_message(&self, translations: &dyn Translate, locale: &str) -> String {
        let message = self.message(translations, locale);
        let variables = self.variables();
        if variables.is_empty() {
            message
        } else {
            let rendered = serde_json::to_string(&variables).unwrap_or_default();
            format!("{message} {rendered}")
        }
    }

    /// Tags without the internal `scope` entry, used as translation
    /// variables and in rendered messages.
    fn variables(&self) -> TagMap {
        self.tags
            .iter()
            .filter(|(name, _)| name.as_str() != "scope")
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::tags;

    #[test]
    fn literal_message_is_returned_verbatim() {
        let violation = Violation::new("Title is empty", tags! { "field" => "title" });
        let catalog = Catalog::new();
        assert_eq!(violation.message(&catalog, "en"), "Title is empty");
    }

    #[test]
    fn symbolic_key_gets_fallback_scope() {
        let violation = Violation::new(Message::key("empty_text"), TagMap::new());
        assert_eq!(violation.scope(), Some(Scope::default()));
    }

    #[test]
    fn explicit_scope_tag_is_kept() {
        let scope = Scope::new(["verdict", "custom"]);
        let violation = Violation::new(
            Message::key("empty_text"),
            tags! { "scope" => scope.to_tag() },
        );
        assert_eq!(violation.scope(), Some(scope));
    }

    #[test]
    fn literal_message_gets_no_scope_tag() {
        let violation = Violation::new("plain", TagMap::new());
        assert_eq!(violation.tag("scope"), None);
    }

    #[test]
    fn missing_translation_is_recognizable() {
        let violation = Violation::new(Message::key("nope"), TagMap::new());
        let catalog = Catalog::new();
        assert_eq!(
            violation.message(&catalog, "en"),
            "translation missing: en.verdict.violations.nope"
        );
    }

    #[test]
    fn symbolic_key_translates_with_variables() {
        let mut catalog = Catalog::new();
        catalog.store("en", "verdict.violations.empty_text", "%{level}: text is empty");

        let violation = Violation::new(Message::key("empty_text"), tags! { "level" => "error" });
        assert_eq!(violation.message(&catalog, "en"), "error: text is empty");
    }

    #[test]
    fn full_message_renders_tags() {
        let violation = Violation::new(
            "Some error message",
            tags! { "field" => "name", "level" => "error" },
        );
        let catalog = Catalog::new();
        assert_eq!(
            violation.full_message(&catalog, "en"),
            r#"Some error message {"field":"name","level":"error"}"#
        );
    }

    #[test]
    fn full_message_without_tags_is_bare() {
        let violation = Violation::new("Some error message", TagMap::new());
        let catalog = Catalog::new();
        assert_eq!(violation.full_message(&catalog, "en"), "Some error message");
    }

    #[test]
    fn equality_covers_key_and_tags() {
        let a = Violation::new("boom", tags! { "field" => "title" });
        let b = Violation::new("boom", tags! { "field" => "title" });
        let c = Violation::new("boom", tags! { "field" => "text" });

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn matches_requires_tag_superset() {
        let violation = Violation::new(
            "boom",
            tags! { "field" => "title", "level" => "error" },
        );

        assert!(violation.matches(None, &tags! { "field" => "title" }));
        assert!(violation.matches(None, &TagMap::new()));
        assert!(!violation.matches(None, &tags! { "field" => "text" }));
        assert!(!violation.matches(None, &tags! { "other" => "tag" }));
    }

    #[test]
    fn matches_compares_keys_when_given() {
        let violation = Violation::new("boom", TagMap::new());

        assert!(violation.matches(Some(&Message::from("boom")), &TagMap::new()));
        assert!(!violation.matches(Some(&Message::key("boom")), &TagMap::new()));
    }

    #[test]
    fn violation_serializes_correctly() {
        let violation = Violation::new("boom", tags! { "field" => "title" });
        let json = serde_json::to_string(&violation).unwrap();
        let decoded: Violation = serde_json::from_str(&json).unwrap();
        assert_eq!(violation, decoded);
    }
}
