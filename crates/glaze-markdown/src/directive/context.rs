//! Directive resolution context.
//!
//! Gives handlers read access to the directive node and builds positioned
//! errors for it.

use crate::tree::{Attributes, Directive, DirectiveKind, Node};

use super::error::{DirectiveError, Location};

/// Context handed to a [`DirectiveHandler`](super::DirectiveHandler) for one
/// directive node.
///
/// # Example
///
/// ```
/// use glaze_markdown::tree::{Directive, DirectiveKind, Node, attrs};
/// use glaze_markdown::directive::DirectiveContext;
///
/// let directive = Directive {
///     kind: DirectiveKind::Text,
///     name: "badge".to_owned(),
///     attributes: attrs([("color", "red")]),
///     label: Some("New".to_owned()),
/// };
/// let node = Node::directive(directive.clone());
/// let ctx = DirectiveContext::new(&node, &directive);
///
/// assert_eq!(ctx.attr("color"), Some("red"));
/// assert_eq!(ctx.label(), Some("New"));
/// ```
pub struct DirectiveContext<'a> {
    /// The directive node being resolved.
    pub node: &'a Node,
    /// The directive record of `node`.
    pub directive: &'a Directive,
}

impl<'a> DirectiveContext<'a> {
    #[must_use]
    pub fn new(node: &'a Node, directive: &'a Directive) -> Self {
        Self { node, directive }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.directive.name
    }

    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        self.directive.kind
    }

    #[must_use]
    pub fn attributes(&self) -> &'a Attributes {
        &self.directive.attributes
    }

    /// Attribute value, treating empty values as absent.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.directive
            .attributes
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Whether the attribute was written at all, even without a value.
    #[must_use]
    pub fn has_attr(&self, key: &str) -> bool {
        self.directive.attributes.contains_key(key)
    }

    /// Non-empty label text.
    #[must_use]
    pub fn label(&self) -> Option<&'a str> {
        self.directive
            .label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
    }

    #[must_use]
    pub fn children(&self) -> &'a [Node] {
        &self.node.children
    }

    #[must_use]
    pub fn location(&self) -> Location {
        Location {
            kind: self.directive.kind,
            position: self.node.position,
        }
    }

    /// Fail unless the directive was written in the `expected` form.
    pub fn require_kind(&self, expected: DirectiveKind) -> Result<(), DirectiveError> {
        if self.directive.kind == expected {
            return Ok(());
        }
        Err(DirectiveError::Arity {
            name: self.directive.name.clone(),
            expected: expected.as_str(),
            at: self.location(),
        })
    }

    #[must_use]
    pub fn missing(&self, message: impl Into<String>) -> DirectiveError {
        DirectiveError::MissingAttribute {
            name: self.directive.name.clone(),
            message: message.into(),
            at: self.location(),
        }
    }

    #[must_use]
    pub fn invalid(&self, message: impl Into<String>) -> DirectiveError {
        DirectiveError::InvalidAttribute {
            name: self.directive.name.clone(),
            message: message.into(),
            at: self.location(),
        }
    }

    #[must_use]
    pub fn unresolvable_caption(&self, message: impl Into<String>) -> DirectiveError {
        DirectiveError::UnresolvableCaption {
            name: self.directive.name.clone(),
            message: message.into(),
            at: self.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Position, attrs};

    fn leaf(attributes: Attributes) -> (Node, Directive) {
        let directive = Directive {
            kind: DirectiveKind::Leaf,
            name: "video".to_owned(),
            attributes,
            label: Some("  ".to_owned()),
        };
        let node = Node::directive(directive.clone()).with_position(Some(Position::new(4, 1)));
        (node, directive)
    }

    #[test]
    fn test_empty_values_are_absent() {
        let (node, directive) = leaf(attrs([("youtubeId", ""), ("noScale", "")]));
        let ctx = DirectiveContext::new(&node, &directive);

        assert_eq!(ctx.attr("youtubeId"), None);
        assert!(ctx.has_attr("noScale"));
        assert_eq!(ctx.label(), None);
    }

    #[test]
    fn test_require_kind() {
        let (node, directive) = leaf(Attributes::new());
        let ctx = DirectiveContext::new(&node, &directive);

        assert!(ctx.require_kind(DirectiveKind::Leaf).is_ok());
        let err = ctx.require_kind(DirectiveKind::Text).unwrap_err();
        assert_eq!(
            err,
            DirectiveError::Arity {
                name: "video".to_owned(),
                expected: "text",
                at: Location {
                    kind: DirectiveKind::Leaf,
                    position: Some(Position::new(4, 1)),
                },
            }
        );
    }
}
