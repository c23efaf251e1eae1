//! Translation port and an in-memory catalog backend.
//!
//! Symbolic violation messages resolve through the [`Translate`] trait:
//! an explicit `(locale, scope, key, variables)` lookup with a
//! distinguishable "missing" result. No global locale state exists —
//! callers pass the active locale, and the set of available locales is
//! configuration carried by the backend.

use std::collections::BTreeMap;

use crate::core::{Scope, TagMap, TagValue};

/// Port for resolving symbolic messages to localized text.
pub trait Translate {
    /// Look up the translation for `key` under `scope` in `locale`,
    /// interpolating `variables`. Returns `None` when no translation
    /// exists — the caller decides how to surface the gap.
    fn translate(
        &self,
        locale: &str,
        scope: &Scope,
        key: &str,
        variables: &TagMap,
    ) -> Option<String>;

    /// Every locale this backend is configured for, in stable order.
    ///
    /// Test tooling iterates these to prove translations exist in every
    /// configured locale.
    fn available_locales(&self) -> Vec<String>;
}

/// The sentinel text rendered when a translation is missing.
///
/// Recognizable (never a silent fallback to the key name) so tooling can
/// detect locale gaps; see [`is_missing_translation`].
pub fn missing_translation(locale: &str, scope: &Scope, key: &str) -> String {
    format!("translation missing: {locale}.{scope}.{key}")
}

/// Whether a rendered message is the missing-translation sentinel.
pub fn is_missing_translation(message: &str) -> bool {
    message.starts_with("translation missing:")
}

/// In-memory translation backend.
///
/// Templates are stored per locale under dotted scope-and-key paths and
/// may interpolate variables with `%{name}` placeholders. A locale can
/// be declared without entries, which makes its missing translations
/// observable to test tooling.
///
/// # Example
///
/// ```rust
/// use verdict::{tags, Catalog, Scope, Translate};
///
/// let catalog = Catalog::new()
///     .with("en", "verdict.user_policy.name_presence", "%{level}: Name is absent")
///     .with_locale("fr");
///
/// let scope = Scope::new(["verdict", "user_policy"]);
/// let found = catalog.translate("en", &scope, "name_presence", &tags! { "level" => "error" });
/// assert_eq!(found.as_deref(), Some("error: Name is absent"));
///
/// assert_eq!(catalog.translate("fr", &scope, "name_presence", &tags! {}), None);
/// assert_eq!(catalog.available_locales(), ["en", "fr"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Store a template for a locale under a dotted `scope.key` path.
    pub fn store(&mut self, locale: &str, path: &str, template: &str) -> &mut Self {
        self.entries
            .entry(locale.to_string())
            .or_default()
            .insert(path.to_string(), template.to_string());
        self
    }

    /// Builder-style [`store`](Self::store).
    pub fn with(mut self, locale: &str, path: &str, template: &str) -> Self {
        self.store(locale, path, template);
        self
    }

    /// Declare a locale without storing any entry for it.
    pub fn declare_locale(&mut self, locale: &str) -> &mut Self {
        self.entries.entry(locale.to_string()).or_default();
        self
    }

    /// Builder-style [`declare_locale`](Self::declare_locale).
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.declare_locale(locale);
        self
    }

    /// Substitute `%{name}` placeholders from the variable map.
    ///
    /// Unknown placeholders are left in place, matching the lookup
    /// behavior: gaps stay visible rather than vanishing silently.
    fn interpolate(template: &str, variables: &TagMap) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("%{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find('}') {
                Some(end) => {
                    let name = &after[..end];
                    match variables.get(name) {
                        Some(value) => out.push_str(&display_value(value)),
                        None => {
                            out.push_str("%{");
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl Translate for Catalog {
    fn translate(
        &self,
        locale: &str,
        scope: &Scope,
        key: &str,
        variables: &TagMap,
    ) -> Option<String> {
        let path = format!("{scope}.{key}");
        self.entries
            .get(locale)?
            .get(&path)
            .map(|template| Catalog::interpolate(template, variables))
    }

    fn available_locales(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Render a tag value for interpolation: strings bare, everything else
/// as its JSON text.
fn display_value(value: &TagValue) -> String {
    match value {
        TagValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}
