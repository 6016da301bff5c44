//! HTML fragment serializer.
//!
//! Serializes a document tree to an HTML fragment. Nodes carrying a
//! [`RenderOverride`](crate::tree::RenderOverride) are rendered exclusively
//! through the override.

use std::fmt::Write;

use crate::tree::{Attributes, Node, NodeKind};

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a document tree to an HTML fragment.
///
/// # Example
///
/// ```
/// use glaze_markdown::{parse_markdown, render_html};
///
/// let parsed = parse_markdown("Hello *world*");
/// assert_eq!(render_html(&parsed.root), "<p>Hello <em>world</em></p>");
/// ```
#[must_use]
pub fn render_html(node: &Node) -> String {
    let mut out = String::with_capacity(1024);
    HtmlWriter { out: &mut out }.node(node, false);
    out
}

struct HtmlWriter<'a> {
    out: &'a mut String,
}

impl HtmlWriter<'_> {
    fn node(&mut self, node: &Node, in_head: bool) {
        if let Some(render_override) = &node.render_override {
            let children = render_override.children.as_deref().unwrap_or(&node.children);
            self.element(&render_override.tag, &render_override.properties, children);
            return;
        }

        match &node.kind {
            NodeKind::Root | NodeKind::Directive(_) => self.children(&node.children, in_head),
            NodeKind::Paragraph => self.wrap("p", node),
            NodeKind::Heading(level) => {
                let tag = format!("h{level}");
                self.wrap(&tag, node);
            }
            NodeKind::BlockQuote => self.wrap("blockquote", node),
            NodeKind::List { ordered: false, .. } => self.wrap("ul", node),
            NodeKind::List {
                ordered: true,
                start,
            } => {
                if *start == 1 {
                    self.out.push_str("<ol>");
                } else {
                    write!(self.out, r#"<ol start="{start}">"#).unwrap();
                }
                self.children(&node.children, false);
                self.out.push_str("</ol>");
            }
            NodeKind::ListItem => self.wrap("li", node),
            NodeKind::TaskMarker(checked) => {
                let checked = if *checked { " checked" } else { "" };
                write!(self.out, r#"<input type="checkbox" disabled{checked}>"#).unwrap();
            }
            NodeKind::CodeBlock { lang, value } => match lang {
                Some(lang) => write!(
                    self.out,
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(value)
                )
                .unwrap(),
                None => write!(self.out, "<pre><code>{}</code></pre>", escape_html(value)).unwrap(),
            },
            NodeKind::ThematicBreak => self.out.push_str("<hr>"),
            NodeKind::Table => self.table(node),
            NodeKind::TableHead => {
                self.out.push_str("<thead><tr>");
                self.children(&node.children, true);
                self.out.push_str("</tr></thead>");
            }
            NodeKind::TableRow => {
                self.out.push_str("<tr>");
                self.children(&node.children, false);
                self.out.push_str("</tr>");
            }
            NodeKind::TableCell => self.wrap(if in_head { "th" } else { "td" }, node),
            NodeKind::Text(value) => self.out.push_str(&escape_html(value)),
            NodeKind::InlineCode(value) => {
                write!(self.out, "<code>{}</code>", escape_html(value)).unwrap();
            }
            NodeKind::Emphasis => self.wrap("em", node),
            NodeKind::Strong => self.wrap("strong", node),
            NodeKind::Strikethrough => self.wrap("s", node),
            NodeKind::Link { url, title } => {
                write!(self.out, r#"<a href="{}""#, escape_html(url)).unwrap();
                if !title.is_empty() {
                    write!(self.out, r#" title="{}""#, escape_html(title)).unwrap();
                }
                self.out.push('>');
                self.children(&node.children, false);
                self.out.push_str("</a>");
            }
            NodeKind::Image { url, alt, title } => {
                write!(self.out, r#"<img src="{}""#, escape_html(url)).unwrap();
                if !title.is_empty() {
                    write!(self.out, r#" title="{}""#, escape_html(title)).unwrap();
                }
                write!(self.out, r#" alt="{}">"#, escape_html(alt)).unwrap();
            }
            NodeKind::Html(html) => self.out.push_str(html),
            NodeKind::SoftBreak => self.out.push('\n'),
            NodeKind::HardBreak => self.out.push_str("<br>"),
            NodeKind::Element { tag, properties } => {
                self.element(tag, properties, &node.children);
            }
        }
    }

    fn children(&mut self, children: &[Node], in_head: bool) {
        for child in children {
            self.node(child, in_head);
        }
    }

    fn wrap(&mut self, tag: &str, node: &Node) {
        write!(self.out, "<{tag}>").unwrap();
        self.children(&node.children, false);
        write!(self.out, "</{tag}>").unwrap();
    }

    fn table(&mut self, node: &Node) {
        self.out.push_str("<table>");
        let (head, rows): (Vec<&Node>, Vec<&Node>) = node
            .children
            .iter()
            .partition(|child| child.kind == NodeKind::TableHead);
        for child in head {
            self.node(child, true);
        }
        if !rows.is_empty() {
            self.out.push_str("<tbody>");
            for row in rows {
                self.node(row, false);
            }
            self.out.push_str("</tbody>");
        }
        self.out.push_str("</table>");
    }

    fn element(&mut self, tag: &str, properties: &Attributes, children: &[Node]) {
        write!(self.out, "<{tag}").unwrap();
        for (key, value) in properties {
            write!(self.out, r#" {key}="{}""#, escape_html(value)).unwrap();
        }
        self.out.push('>');
        if VOID_TAGS.contains(&tag) {
            return;
        }
        self.children(children, false);
        write!(self.out, "</{tag}>").unwrap();
    }
}
