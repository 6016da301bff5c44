//! Plain-text projection of a document tree.

use crate::tree::{DirectiveKind, Node, NodeKind};

/// Concatenated text content of a tree.
///
/// Includes text, inline and block code, raw HTML, image alt text, and
/// directive labels. Block-level nodes are separated by a newline so words in
/// adjacent blocks never run together. Render overrides are ignored: this is
/// the text the author wrote, not the rendered output.
#[must_use]
pub fn to_plain_text(node: &Node) -> String {
    let mut out = String::new();
    collect(node, &mut out);
    out
}

/// Text of inline content, without block separators.
pub(crate) fn inline_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        collect(node, &mut out);
    }
    out
}

fn collect(node: &Node, out: &mut String) {
    match &node.kind {
        NodeKind::Text(value)
        | NodeKind::InlineCode(value)
        | NodeKind::Html(value)
        | NodeKind::CodeBlock { value, .. } => out.push_str(value),
        NodeKind::Image { alt, .. } => out.push_str(alt),
        NodeKind::SoftBreak | NodeKind::HardBreak => out.push(' '),
        // Text and leaf labels are already children; container labels are not.
        NodeKind::Directive(directive) if directive.kind == DirectiveKind::Container => {
            if let Some(label) = directive.label.as_deref().filter(|l| !l.is_empty()) {
                out.push_str(label);
                out.push('\n');
            }
        }
        _ => {}
    }

    for child in &node.children {
        collect(child, out);
    }

    if is_block(&node.kind) && !out.ends_with('\n') && !out.is_empty() {
        out.push('\n');
    }
}

fn is_block(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::Paragraph
        | NodeKind::Heading(_)
        | NodeKind::BlockQuote
        | NodeKind::List { .. }
        | NodeKind::ListItem
        | NodeKind::CodeBlock { .. }
        | NodeKind::Table
        | NodeKind::TableHead
        | NodeKind::TableRow
        | NodeKind::TableCell => true,
        NodeKind::Directive(directive) => directive.kind != DirectiveKind::Text,
        _ => false,
    }
}
