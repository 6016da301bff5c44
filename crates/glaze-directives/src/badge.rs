//! `:badge` and `:badge-<preset>` text directives.

use glaze_markdown::directive::{DirectiveContext, DirectiveError, DirectiveHandler, Resolved};
use glaze_markdown::tree::{DirectiveKind, Node, RenderOverride, attrs};

/// Built-in badges: `(suffix, text, "light|dark")`.
const PRESETS: &[(&str, &str, &str)] = &[
    ("a", "ARTICLE", "#E9D66B|#fbf8cc"),
    ("v", "VIDEO", "#D473D4|#f1c0e8"),
    ("o", "OFFICIAL", "#4a8ce8|#a3c4f3"),
    ("f", "FEED", "#9568de|#cfbaf0"),
    ("t", "TOOL", "#FF9966|#ffcfd2"),
    ("w", "WEBSITE", "#8AB9F1|#90dbf4"),
    ("g", "GITHUB", "#74C365|#b9fbc0"),
];

/// Light and dark theme colors of a badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeColors {
    pub light: String,
    pub dark: String,
}

impl BadgeColors {
    /// Parse `"color"` or `"light|dark"`.
    ///
    /// Returns `None` for any other shape, including empty segments.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.split('|').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        match parts.as_slice() {
            [both] => Some(Self {
                light: (*both).to_owned(),
                dark: (*both).to_owned(),
            }),
            [light, dark] => Some(Self {
                light: (*light).to_owned(),
                dark: (*dark).to_owned(),
            }),
            _ => None,
        }
    }

    fn style(&self) -> String {
        format!(
            "--badge-color-light:{}; --badge-color-dark:{}",
            self.light, self.dark
        )
    }
}

/// Resolves `:badge[text]{color="..."}`.
#[derive(Debug, Clone)]
pub struct BadgeHandler {
    default_color: String,
}

impl BadgeHandler {
    #[must_use]
    pub fn new(default_color: impl Into<String>) -> Self {
        Self {
            default_color: default_color.into(),
        }
    }
}

impl DirectiveHandler for BadgeHandler {
    fn resolve(&self, ctx: &DirectiveContext) -> Result<Resolved, DirectiveError> {
        ctx.require_kind(DirectiveKind::Text)?;

        if ctx.label().is_none() {
            return Err(ctx.missing("a label in `[]`"));
        }

        let color = ctx.attr("color").unwrap_or(&self.default_color);
        let colors = BadgeColors::parse(color).ok_or_else(|| {
            ctx.invalid(format!(
                "`color` must be \"<color>\" or \"<light>|<dark>\", got \"{color}\""
            ))
        })?;

        Ok(Resolved::Override(RenderOverride::wrap(
            "span",
            attrs([("class", "sugar-badge"), ("style", colors.style().as_str())]),
        )))
    }
}

/// Resolves `:badge-a`, `:badge-v`, and the other preset badges.
///
/// The preset text replaces any label; an explicit `color` replaces the
/// preset colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct BadgePresetHandler;

impl DirectiveHandler for BadgePresetHandler {
    fn resolve(&self, ctx: &DirectiveContext) -> Result<Resolved, DirectiveError> {
        ctx.require_kind(DirectiveKind::Text)?;

        let suffix = ctx.name().strip_prefix("badge-").unwrap_or_default();
        let (_, text, color) = PRESETS
            .iter()
            .find(|(key, _, _)| *key == suffix)
            .ok_or_else(|| {
                let known: Vec<&str> = PRESETS.iter().map(|(key, _, _)| *key).collect();
                ctx.invalid(format!(
                    "unknown badge preset \"{suffix}\", expected one of: {}",
                    known.join(", ")
                ))
            })?;

        let color = ctx.attr("color").unwrap_or(color);
        let colors = BadgeColors::parse(color).ok_or_else(|| {
            ctx.invalid(format!(
                "`color` must be \"<color>\" or \"<light>|<dark>\", got \"{color}\""
            ))
        })?;

        Ok(Resolved::Override(RenderOverride::with_children(
            "span",
            attrs([("class", "sugar-badge"), ("style", colors.style().as_str())]),
            vec![Node::text(*text)],
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{leaf, resolve_one, text};
    use glaze_markdown::tree::Attributes;
    use pretty_assertions::assert_eq;

    fn handler() -> BadgeHandler {
        BadgeHandler::new("#bebfc5")
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!(
            BadgeColors::parse("red"),
            Some(BadgeColors {
                light: "red".to_owned(),
                dark: "red".to_owned()
            })
        );
        assert_eq!(
            BadgeColors::parse(" #fff | #000 "),
            Some(BadgeColors {
                light: "#fff".to_owned(),
                dark: "#000".to_owned()
            })
        );
        assert_eq!(BadgeColors::parse("a|b|c"), None);
        assert_eq!(BadgeColors::parse("red|"), None);
        assert_eq!(BadgeColors::parse(""), None);
    }

    #[test]
    fn test_badge_default_color() {
        let node = text("badge", Some("New"), Attributes::new());
        let resolved = resolve_one(&handler(), &node).unwrap();

        assert_eq!(
            resolved,
            Resolved::Override(RenderOverride::wrap(
                "span",
                attrs([
                    ("class", "sugar-badge"),
                    (
                        "style",
                        "--badge-color-light:#bebfc5; --badge-color-dark:#bebfc5"
                    ),
                ]),
            ))
        );
    }

    #[test]
    fn test_badge_light_dark() {
        let node = text("badge", Some("Beta"), attrs([("color", "#111|#eee")]));
        let Resolved::Override(o) = resolve_one(&handler(), &node).unwrap() else {
            panic!("expected override");
        };
        assert_eq!(
            o.properties["style"],
            "--badge-color-light:#111; --badge-color-dark:#eee"
        );
        assert_eq!(o.children, None);
    }

    #[test]
    fn test_badge_requires_label() {
        let node = text("badge", None, attrs([("color", "red")]));
        let err = resolve_one(&handler(), &node).unwrap_err();
        assert!(matches!(err, DirectiveError::MissingAttribute { .. }));
    }

    #[test]
    fn test_badge_too_many_colors() {
        let node = text("badge", Some("x"), attrs([("color", "a|b|c")]));
        let err = resolve_one(&handler(), &node).unwrap_err();
        assert!(matches!(err, DirectiveError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_preset_ignores_label() {
        let node = text("badge-g", Some("ignored"), Attributes::new());
        let resolved = resolve_one(&BadgePresetHandler, &node).unwrap();

        assert_eq!(
            resolved,
            Resolved::Override(RenderOverride::with_children(
                "span",
                attrs([
                    ("class", "sugar-badge"),
                    (
                        "style",
                        "--badge-color-light:#74C365; --badge-color-dark:#b9fbc0"
                    ),
                ]),
                vec![Node::text("GITHUB")],
            ))
        );
    }

    #[test]
    fn test_every_preset_resolves() {
        for (key, label, _) in PRESETS {
            let node = text(&format!("badge-{key}"), None, Attributes::new());
            let Resolved::Override(o) = resolve_one(&BadgePresetHandler, &node).unwrap() else {
                panic!("expected override");
            };
            assert_eq!(o.children, Some(vec![Node::text(*label)]));
        }
    }

    #[test]
    fn test_preset_color_override() {
        let node = text("badge-o", None, attrs([("color", "#000")]));
        let Resolved::Override(o) = resolve_one(&BadgePresetHandler, &node).unwrap() else {
            panic!("expected override");
        };
        assert_eq!(
            o.properties["style"],
            "--badge-color-light:#000; --badge-color-dark:#000"
        );
        assert_eq!(o.children, Some(vec![Node::text("OFFICIAL")]));
    }

    #[test]
    fn test_unknown_preset() {
        let node = text("badge-zz", None, Attributes::new());
        let err = resolve_one(&BadgePresetHandler, &node).unwrap_err();
        assert!(err.to_string().contains("unknown badge preset"));
    }

    #[test]
    fn test_leaf_badge_rejected() {
        let node = leaf("badge", attrs([("color", "red")]));
        assert!(matches!(
            resolve_one(&handler(), &node).unwrap_err(),
            DirectiveError::Arity { .. }
        ));
    }
}
