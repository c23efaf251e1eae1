//! Macros for ergonomic tag construction.

/// Build a [`TagMap`](crate::TagMap) from `name => value` pairs.
///
/// Values may be anything convertible into a tag value: strings, numbers,
/// booleans, or prebuilt JSON values.
///
/// # Example
///
/// ```
/// use verdict::tags;
///
/// let tags = tags! { "field" => "title", "level" => "error" };
/// assert_eq!(tags.len(), 2);
///
/// let empty = tags! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! tags {
    () => {
        $crate::TagMap::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut tags = $crate::TagMap::new();
        $(
            tags.insert(($name).to_string(), $crate::TagValue::from($value));
        )+
        tags
    }};
}

#[cfg(test)]
mod tests {
    use crate::TagValue;

    #[test]
    fn tags_macro_builds_a_map() {
        let tags = tags! { "field" => "title", "count" => 2 };

        assert_eq!(tags.get("field"), Some(&TagValue::from("title")));
        assert_eq!(tags.get("count"), Some(&TagValue::from(2)));
    }

    #[test]
    fn tags_macro_supports_trailing_comma() {
        let tags = tags! {
            "field" => "title",
        };
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn empty_tags_macro_is_empty() {
        assert!(tags! {}.is_empty());
    }
}
