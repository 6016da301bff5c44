//! Document tree model.
//!
//! A parsed document is a tree of [`Node`]s. Standard markdown constructs map
//! to dedicated [`NodeKind`] variants; directive syntax produces
//! [`NodeKind::Directive`] nodes that the resolver later decorates with a
//! [`RenderOverride`] or replaces outright.

use std::collections::BTreeMap;
use std::fmt;

/// Output properties of an element, keyed by attribute name.
pub type Attributes = BTreeMap<String, String>;

/// Source location of a node (1-indexed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The three directive forms, distinguished by the number of leading colons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `:name[label]{attrs}` inside a paragraph.
    Text,
    /// `::name[label]{attrs}` on its own line.
    Leaf,
    /// `:::name[label]{attrs}` ... `:::` wrapping block content.
    Container,
}

impl DirectiveKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Leaf => "leaf",
            Self::Container => "container",
        }
    }

    /// Source marker for the kind (`:`, `::`, `:::`).
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Text => ":",
            Self::Leaf => "::",
            Self::Container => ":::",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directive as written in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub name: String,
    /// Attributes from `{...}`; `#id` is stored as `id`, classes as `class`.
    pub attributes: Attributes,
    /// Plain text of the `[...]` label, `None` when no brackets were written.
    pub label: Option<String>,
}

/// Node type tag with per-type payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading(u8),
    BlockQuote,
    List { ordered: bool, start: u64 },
    ListItem,
    TaskMarker(bool),
    CodeBlock { lang: Option<String>, value: String },
    ThematicBreak,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Text(String),
    InlineCode(String),
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String, title: String },
    Image { url: String, alt: String, title: String },
    Html(String),
    SoftBreak,
    HardBreak,
    Directive(Directive),
    /// Output element produced by directive resolution.
    Element { tag: String, properties: Attributes },
}

/// How a node is rendered in place of its own kind.
///
/// `children: None` renders the node's original children inside `tag`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOverride {
    pub tag: String,
    pub properties: Attributes,
    pub children: Option<Vec<Node>>,
}

impl RenderOverride {
    /// Override that wraps the original children.
    #[must_use]
    pub fn wrap(tag: impl Into<String>, properties: Attributes) -> Self {
        Self {
            tag: tag.into(),
            properties,
            children: None,
        }
    }

    /// Override with explicit output children.
    #[must_use]
    pub fn with_children(
        tag: impl Into<String>,
        properties: Attributes,
        children: Vec<Node>,
    ) -> Self {
        Self {
            tag: tag.into(),
            properties,
            children: Some(children),
        }
    }
}

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    pub render_override: Option<RenderOverride>,
    pub position: Option<Position>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            render_override: None,
            position: None,
        }
    }

    #[must_use]
    pub fn root(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Root).with_children(children)
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(value.into()))
    }

    /// Output element with the given properties and children.
    #[must_use]
    pub fn element(tag: impl Into<String>, properties: Attributes, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.into(),
            properties,
        })
        .with_children(children)
    }

    #[must_use]
    pub fn directive(directive: Directive) -> Self {
        Self::new(NodeKind::Directive(directive))
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// Directive record if this node is a directive.
    #[must_use]
    pub fn as_directive(&self) -> Option<&Directive> {
        match &self.kind {
            NodeKind::Directive(d) => Some(d),
            _ => None,
        }
    }

    /// Depth-first search for the first node matching `pred`, self included.
    pub fn find(&self, pred: &impl Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(pred))
    }
}

/// Build an [`Attributes`] map from string pairs.
#[must_use]
pub fn attrs<const N: usize>(pairs: [(&str, &str); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
}
