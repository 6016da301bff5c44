//! Directive argument parsing.
//!
//! Parses the `[label]{#id .class key="value"}` syntax that follows a
//! directive name.

use std::collections::BTreeMap;

use crate::tree::Attributes;

/// Parsed arguments from directive syntax.
///
/// # Example
///
/// ```
/// use glaze_markdown::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse(Some("hello"), r#"#my-id .foo .bar lang="en""#);
/// assert_eq!(args.label.as_deref(), Some("hello"));
/// assert_eq!(args.id, Some("my-id".to_owned()));
/// assert_eq!(args.classes, vec!["foo", "bar"]);
/// assert_eq!(args.get("lang"), Some("en"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Label from brackets: `[label]` (`None` if no brackets were written).
    pub label: Option<String>,
    /// ID from attributes: `{#id}`.
    pub id: Option<String>,
    /// Classes from attributes: `{.class1 .class2}`.
    pub classes: Vec<String>,
    /// Key-value attributes: `{key="value"}`.
    pub attrs: BTreeMap<String, String>,
}

impl DirectiveArgs {
    /// Parse label and attributes string into structured arguments.
    ///
    /// `attrs_str` is the text between the braces, without the braces.
    #[must_use]
    pub fn parse(label: Option<&str>, attrs_str: &str) -> Self {
        let mut args = Self {
            label: label.map(str::to_owned),
            ..Default::default()
        };

        // #id, .class, key="value", key='value', or key=value
        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            if let Some(rest) = remaining.strip_prefix('#') {
                let end = shorthand_end(rest);
                args.id = Some(rest[..end].to_owned());
                remaining = &rest[end..];
            } else if let Some(rest) = remaining.strip_prefix('.') {
                let end = shorthand_end(rest);
                if end > 0 {
                    args.classes.push(rest[..end].to_owned());
                }
                remaining = &rest[end..];
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.attrs.insert(key.to_owned(), value.to_owned());
                remaining = rest;
            } else {
                // Skip unrecognized character
                let skip = remaining.chars().next().map_or(1, char::len_utf8);
                remaining = &remaining[skip..];
            }
            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Flatten into a single attribute map.
    ///
    /// `#id` becomes `id` and classes are joined into `class`; both win over
    /// explicit `id=`/`class=` keys.
    #[must_use]
    pub fn into_attributes(self) -> Attributes {
        let mut attributes = self.attrs;
        if let Some(id) = self.id {
            attributes.insert("id".to_owned(), id);
        }
        if !self.classes.is_empty() {
            attributes.insert("class".to_owned(), self.classes.join(" "));
        }
        attributes
    }
}

fn shorthand_end(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len())
}

/// Parse a key-value pair from the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`, and bare `key`
/// (empty value).
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(s.len());
    let key = &s[..key_end];

    if key.is_empty() || key.starts_with('#') || key.starts_with('.') {
        return None;
    }

    let Some(after_eq) = s[key_end..].strip_prefix('=') else {
        return Some((key, "", &s[key_end..]));
    };

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}
