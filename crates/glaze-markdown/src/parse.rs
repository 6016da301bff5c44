//! Markdown to document tree.
//!
//! Parsing runs in two layers. A line scanner finds leaf and container
//! directive lines (skipping fenced code and lines nested in list items or
//! block quotes) and splits the source into plain markdown segments. Text
//! directives in a segment are masked with placeholders, the segment is
//! parsed with pulldown-cmark into tree nodes, and the placeholders are then
//! turned back into directive nodes.

use std::fmt;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::directive::DirectiveArgs;
use crate::directive::syntax::{
    DirectiveLine, TextDirective, find_text_directives, parse_directive_line,
};
use crate::fence::FenceTracker;
use crate::text::inline_text;
use crate::tree::{Directive, DirectiveKind, Node, NodeKind, Position};

/// Result of parsing a markdown document.
#[derive(Clone, Debug)]
pub struct ParseResult {
    /// Root node of the document tree.
    pub root: Node,
    /// Recoverable syntax problems (unclosed or stray container fences).
    pub warnings: Vec<ParseWarning>,
}

/// A recoverable syntax problem at a source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}

impl ParseWarning {
    /// Shift the line by `lines`.
    #[must_use]
    pub fn with_line_offset(mut self, lines: usize) -> Self {
        self.line += lines;
        self
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Parse markdown with directive syntax into a document tree.
///
/// Never fails: malformed directive syntax is kept as text and reported in
/// [`ParseResult::warnings`].
#[must_use]
pub fn parse_markdown(source: &str) -> ParseResult {
    let mut scanner = LineScanner::default();
    for (index, line) in source.lines().enumerate() {
        scanner.line(index + 1, line);
    }
    scanner.finish()
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Contiguous lines of plain markdown awaiting parsing.
#[derive(Default)]
struct Segment<'a> {
    first_line: usize,
    lines: Vec<&'a str>,
}

impl<'a> Segment<'a> {
    fn push(&mut self, line_no: usize, line: &'a str) {
        if self.lines.is_empty() {
            self.first_line = line_no;
        }
        self.lines.push(line);
    }

    fn take_nodes(&mut self) -> Vec<Node> {
        if self.lines.is_empty() {
            return Vec::new();
        }
        let text = self.lines.join("\n");
        self.lines.clear();
        TreeBuilder::new(&text, self.first_line).build()
    }
}

struct OpenContainer {
    name: String,
    args: DirectiveArgs,
    colon_count: usize,
    position: Position,
}

/// Root document or an open container directive.
struct Frame<'a> {
    container: Option<OpenContainer>,
    children: Vec<Node>,
    segment: Segment<'a>,
}

impl<'a> Frame<'a> {
    fn new(container: Option<OpenContainer>) -> Self {
        Self {
            container,
            children: Vec::new(),
            segment: Segment::default(),
        }
    }

    fn flush(&mut self) {
        let nodes = self.segment.take_nodes();
        self.children.extend(nodes);
    }
}

struct LineScanner<'a> {
    fence: FenceTracker,
    stack: Vec<Frame<'a>>,
    warnings: Vec<ParseWarning>,
    /// Inside a list item or block quote, where indented lines continue the
    /// block instead of starting directives.
    nested_block: bool,
}

impl Default for LineScanner<'_> {
    fn default() -> Self {
        Self {
            fence: FenceTracker::new(),
            stack: vec![Frame::new(None)],
            warnings: Vec::new(),
            nested_block: false,
        }
    }
}

impl<'a> LineScanner<'a> {
    fn top(&mut self) -> &mut Frame<'a> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn line(&mut self, line_no: usize, line: &'a str) {
        let was_in_fence = self.fence.in_fence();
        let is_fence = self.fence.update(line);
        if !was_in_fence {
            self.track_nested_block(line);
        }
        let indent = line.len() - line.trim_start().len();
        if was_in_fence || is_fence || (self.nested_block && indent > 0) {
            self.top().segment.push(line_no, line);
            return;
        }

        let position = Position::new(line_no, indent + 1);

        match parse_directive_line(line) {
            Some(DirectiveLine::Leaf { name, args }) => {
                let node = directive_node(DirectiveKind::Leaf, name, args, Some(position));
                let top = self.top();
                top.flush();
                top.children.push(node);
            }
            Some(DirectiveLine::ContainerStart {
                name,
                args,
                colon_count,
            }) => {
                self.top().flush();
                self.stack.push(Frame::new(Some(OpenContainer {
                    name,
                    args,
                    colon_count,
                    position,
                })));
            }
            Some(DirectiveLine::ContainerEnd { colon_count }) => {
                let closes = self
                    .stack
                    .last()
                    .and_then(|frame| frame.container.as_ref())
                    .is_some_and(|open| open.colon_count <= colon_count);
                if closes {
                    self.close_container();
                } else {
                    self.warnings.push(ParseWarning {
                        line: line_no,
                        message: "closing fence without an open container".to_owned(),
                    });
                    self.top().segment.push(line_no, line);
                }
            }
            None => self.top().segment.push(line_no, line),
        }
    }

    fn track_nested_block(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if opens_nested_block(line) {
            self.nested_block = true;
        } else if !line.starts_with([' ', '\t']) {
            self.nested_block = false;
        }
    }

    /// Pop the innermost container and attach it to its parent.
    fn close_container(&mut self) {
        let Some(mut frame) = self.stack.pop() else {
            return;
        };
        frame.flush();
        let Some(open) = frame.container else {
            // Root frame: put it back untouched.
            self.stack.push(frame);
            return;
        };

        let node = directive_node(
            DirectiveKind::Container,
            open.name,
            open.args,
            Some(open.position),
        )
        .with_children(frame.children);

        let parent = self.top();
        parent.flush();
        parent.children.push(node);
    }

    fn finish(mut self) -> ParseResult {
        while self.stack.len() > 1 {
            if let Some(open) = self.stack.last().and_then(|f| f.container.as_ref()) {
                self.warnings.push(ParseWarning {
                    line: open.position.line,
                    message: format!("container `{}` is never closed", open.name),
                });
            }
            self.close_container();
        }

        let mut root = self.stack.pop().unwrap_or_else(|| Frame::new(None));
        root.flush();
        ParseResult {
            root: Node::root(root.children),
            warnings: self.warnings,
        }
    }
}

/// Whether `line` starts a list item or a block quote.
fn opens_nested_block(line: &str) -> bool {
    let trimmed = line.trim_start();
    if line.len() - trimmed.len() >= 4 {
        return false;
    }
    if trimmed.starts_with('>') {
        return true;
    }

    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    let after_marker = if digits == 0 {
        trimmed.strip_prefix(['-', '*', '+'])
    } else if digits <= 9 {
        trimmed[digits..].strip_prefix(['.', ')'])
    } else {
        None
    };
    after_marker.is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
}

/// Build a directive node.
///
/// The label is parsed as inline markdown. Text and leaf directives keep the
/// parsed label as their children; every kind records its plain text.
fn directive_node(
    kind: DirectiveKind,
    name: String,
    args: DirectiveArgs,
    position: Option<Position>,
) -> Node {
    let label_nodes = args.label.as_deref().map(label_children);
    let label = label_nodes.as_deref().map(inline_text);
    let children = match kind {
        DirectiveKind::Text | DirectiveKind::Leaf => label_nodes.unwrap_or_default(),
        DirectiveKind::Container => Vec::new(),
    };

    Node::directive(Directive {
        kind,
        name,
        attributes: args.into_attributes(),
        label,
    })
    .with_children(children)
    .with_position(position)
}

/// Inline nodes of a directive label. Anything that is not a single
/// paragraph stays literal text.
fn label_children(label: &str) -> Vec<Node> {
    if label.is_empty() {
        return Vec::new();
    }
    let mut blocks = TreeBuilder::new(label, 1).build();
    match blocks.as_mut_slice() {
        [paragraph] if paragraph.kind == NodeKind::Paragraph => {
            let mut children = std::mem::take(&mut paragraph.children);
            clear_positions(&mut children);
            children
        }
        _ => vec![Node::text(label)],
    }
}

fn clear_positions(nodes: &mut [Node]) {
    for node in nodes {
        node.position = None;
        clear_positions(&mut node.children);
    }
}

/// Placeholder delimiters for masked text directives. Private-use code
/// points have no markdown meaning.
const MASK_OPEN: char = '\u{E000}';
const MASK_CLOSE: char = '\u{E001}';

/// A text directive cut out of the source before inline parsing.
struct Masked {
    directive: TextDirective,
    /// Byte range of the placeholder in the masked text.
    start: usize,
    end: usize,
}

/// Split `value` around its first placeholder: text before, directive
/// index, text after.
fn split_placeholder(value: &str) -> Option<(&str, usize, &str)> {
    let open = value.find(MASK_OPEN)?;
    let body = &value[open + MASK_OPEN.len_utf8()..];
    let close = body.find(MASK_CLOSE)?;
    let index = body[..close].parse().ok()?;
    Some((&value[..open], index, &body[close + MASK_CLOSE.len_utf8()..]))
}

/// Node under construction; transparent frames splice their children into
/// the parent (constructs with no tree representation).
struct OpenNode {
    node: Node,
    transparent: bool,
}

/// Builds nodes for one markdown segment from pulldown-cmark events.
///
/// Text directives are located on the raw source and replaced with
/// placeholders before pulldown-cmark sees the text, so emphasis, code, or
/// table pipes inside a label or attribute value cannot break them up.
struct TreeBuilder<'t> {
    source: &'t str,
    first_line: usize,
    line_starts: Vec<usize>,
    masked: Vec<Masked>,
    stack: Vec<OpenNode>,
}

impl<'t> TreeBuilder<'t> {
    fn new(source: &'t str, first_line: usize) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            first_line,
            line_starts,
            masked: Vec::new(),
            stack: vec![OpenNode {
                node: Node::new(NodeKind::Root),
                transparent: false,
            }],
        }
    }

    /// Position of a byte offset in the raw source.
    fn position(&self, offset: usize) -> Position {
        let index = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        Position::new(self.first_line + index, offset - self.line_starts[index] + 1)
    }

    /// Map an offset in the masked text back to the raw source.
    fn source_offset(&self, offset: usize) -> usize {
        let prior = self.masked.partition_point(|m| m.start <= offset);
        match prior.checked_sub(1).map(|i| &self.masked[i]) {
            Some(m) if offset < m.end => m.directive.start,
            Some(m) => m.directive.end + (offset - m.end),
            None => offset,
        }
    }

    /// Replace every text directive in the source with a placeholder.
    fn mask(&mut self) -> String {
        let mut text = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (index, directive) in find_text_directives(self.source).into_iter().enumerate() {
            text.push_str(&self.source[cursor..directive.start]);
            let start = text.len();
            text.push(MASK_OPEN);
            text.push_str(&index.to_string());
            text.push(MASK_CLOSE);
            cursor = directive.end;
            self.masked.push(Masked {
                directive,
                start,
                end: text.len(),
            });
        }
        text.push_str(&self.source[cursor..]);
        text
    }

    /// Restore the raw directive source in literal content (code, raw HTML,
    /// URLs), where directives are not recognized.
    fn unmask(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some((before, index, after)) = split_placeholder(rest) {
            out.push_str(before);
            match self.masked.get(index) {
                Some(m) => out.push_str(&self.source[m.directive.start..m.directive.end]),
                None => out.push_str(&rest[before.len()..rest.len() - after.len()]),
            }
            rest = after;
        }
        out.push_str(rest);
        out
    }

    fn build(mut self) -> Vec<Node> {
        let text = self.mask();
        let parser = Parser::new_ext(&text, markdown_options()).into_offset_iter();
        for (event, range) in parser {
            let position = Some(self.position(self.source_offset(range.start)));
            match event {
                Event::Start(tag) => self.start(tag, position),
                Event::End(_) => self.end(),
                Event::Text(text) => self.text(&text, position),
                Event::Code(code) => {
                    let code = self.unmask(&code);
                    self.leaf(NodeKind::InlineCode(code), position);
                }
                Event::Html(html) | Event::InlineHtml(html) => {
                    let html = self.unmask(&html);
                    self.leaf(NodeKind::Html(html), position);
                }
                Event::InlineMath(math) | Event::DisplayMath(math) => {
                    let math = self.unmask(&math);
                    self.text(&math, position);
                }
                Event::FootnoteReference(label) => self.text(&format!("[^{label}]"), position),
                Event::SoftBreak => self.leaf(NodeKind::SoftBreak, position),
                Event::HardBreak => self.leaf(NodeKind::HardBreak, position),
                Event::Rule => self.leaf(NodeKind::ThematicBreak, position),
                Event::TaskListMarker(checked) => self.leaf(NodeKind::TaskMarker(checked), position),
            }
        }

        while self.stack.len() > 1 {
            self.end();
        }
        let root = self.stack.pop();
        root.map(|root| self.normalize_inlines(root.node.children))
            .unwrap_or_default()
    }

    fn start(&mut self, tag: Tag<'_>, position: Option<Position>) {
        let kind = match tag {
            Tag::Paragraph => Some(NodeKind::Paragraph),
            Tag::Heading { level, .. } => Some(NodeKind::Heading(heading_level(level))),
            Tag::BlockQuote(_) => Some(NodeKind::BlockQuote),
            Tag::CodeBlock(kind) => Some(NodeKind::CodeBlock {
                lang: match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(|lang| self.unmask(lang))
                    }
                    CodeBlockKind::Indented => None,
                },
                value: String::new(),
            }),
            Tag::List(start) => Some(NodeKind::List {
                ordered: start.is_some(),
                start: start.unwrap_or(1),
            }),
            Tag::Item => Some(NodeKind::ListItem),
            Tag::Table(_) => Some(NodeKind::Table),
            Tag::TableHead => Some(NodeKind::TableHead),
            Tag::TableRow => Some(NodeKind::TableRow),
            Tag::TableCell => Some(NodeKind::TableCell),
            Tag::Emphasis => Some(NodeKind::Emphasis),
            Tag::Strong => Some(NodeKind::Strong),
            Tag::Strikethrough => Some(NodeKind::Strikethrough),
            Tag::Link {
                dest_url, title, ..
            } => Some(NodeKind::Link {
                url: self.unmask(&dest_url),
                title: self.unmask(&title),
            }),
            Tag::Image {
                dest_url, title, ..
            } => Some(NodeKind::Image {
                url: self.unmask(&dest_url),
                alt: String::new(),
                title: self.unmask(&title),
            }),
            _ => None,
        };

        let transparent = kind.is_none();
        let node = Node::new(kind.unwrap_or(NodeKind::Root)).with_position(position);
        self.stack.push(OpenNode { node, transparent });
    }

    fn end(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(OpenNode {
            mut node,
            transparent,
        }) = self.stack.pop()
        else {
            return;
        };

        let children = self.normalize_inlines(std::mem::take(&mut node.children));
        if let NodeKind::Image { alt, .. } = &mut node.kind {
            *alt = inline_text(&children);
        } else {
            node.children = children;
        }

        let Some(parent) = self.stack.last_mut() else {
            return;
        };
        if transparent {
            parent.node.children.extend(node.children);
        } else {
            parent.node.children.push(node);
        }
    }

    fn text(&mut self, text: &str, position: Option<Position>) {
        let in_code = self
            .stack
            .last()
            .is_some_and(|open| matches!(open.node.kind, NodeKind::CodeBlock { .. }));
        if in_code {
            let code = self.unmask(text);
            if let Some(OpenNode { node, .. }) = self.stack.last_mut()
                && let NodeKind::CodeBlock { value, .. } = &mut node.kind
            {
                value.push_str(&code);
            }
            return;
        }
        self.leaf(NodeKind::Text(text.to_owned()), position);
    }

    fn leaf(&mut self, kind: NodeKind, position: Option<Position>) {
        if let Some(parent) = self.stack.last_mut() {
            parent
                .node
                .children
                .push(Node::new(kind).with_position(position));
        }
    }

    /// Merge adjacent text nodes, then turn placeholders back into text
    /// directive nodes.
    fn normalize_inlines(&self, children: Vec<Node>) -> Vec<Node> {
        let mut merged: Vec<Node> = Vec::with_capacity(children.len());
        for child in children {
            if let NodeKind::Text(value) = &child.kind
                && let Some(Node {
                    kind: NodeKind::Text(previous),
                    ..
                }) = merged.last_mut()
            {
                previous.push_str(value);
                continue;
            }
            merged.push(child);
        }

        merged
            .into_iter()
            .flat_map(|node| self.restore_directives(node))
            .collect()
    }

    fn restore_directives(&self, node: Node) -> Vec<Node> {
        let (text, position) = match node {
            Node {
                kind: NodeKind::Text(text),
                position,
                ..
            } => (text, position),
            other => return vec![other],
        };

        let mut nodes = Vec::new();
        let mut rest = text.as_str();
        let mut rest_position = position;
        while let Some((before, index, after)) = split_placeholder(rest) {
            let Some(masked) = self.masked.get(index) else {
                break;
            };
            if !before.is_empty() {
                nodes.push(Node::text(before).with_position(rest_position));
            }
            let directive = &masked.directive;
            nodes.push(directive_node(
                DirectiveKind::Text,
                directive.name.clone(),
                directive.args.clone(),
                Some(self.position(directive.start)),
            ));
            rest = after;
            rest_position = Some(self.position(directive.end));
        }
        if !rest.is_empty() {
            nodes.push(Node::text(rest).with_position(rest_position));
        }
        nodes
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::attrs;
    use pretty_assertions::assert_eq;

    fn directive(node: &Node) -> &Directive {
        node.as_directive().expect("directive node")
    }

    #[test]
    fn test_plain_markdown() {
        let result = parse_markdown("# Hello\n\nSome *text*.");
        let root = result.root;

        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].kind, NodeKind::Heading(1));
        assert_eq!(root.children[1].kind, NodeKind::Paragraph);
        assert_eq!(root.children[1].children[1].kind, NodeKind::Emphasis);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_leaf_directive_line() {
        let root = parse_markdown("Intro.\n\n::video{youtubeId=abc}\n\nOutro.").root;

        assert_eq!(root.children.len(), 3);
        let video = directive(&root.children[1]);
        assert_eq!(video.kind, DirectiveKind::Leaf);
        assert_eq!(video.name, "video");
        assert_eq!(video.attributes, attrs([("youtubeId", "abc")]));
        assert_eq!(root.children[1].position, Some(Position::new(3, 1)));
    }

    #[test]
    fn test_text_directive_in_paragraph() {
        let root = parse_markdown("Made by :link[me]{id=\"@octocat\"}, thanks.").root;
        let para = &root.children[0];

        assert_eq!(para.children.len(), 3);
        assert_eq!(para.children[0].kind, NodeKind::Text("Made by ".to_owned()));
        let link = directive(&para.children[1]);
        assert_eq!(link.kind, DirectiveKind::Text);
        assert_eq!(link.label.as_deref(), Some("me"));
        assert_eq!(link.attributes, attrs([("id", "@octocat")]));
        assert_eq!(para.children[1].children, vec![Node::text("me")]);
        assert_eq!(para.children[1].position, Some(Position::new(1, 9)));
        assert_eq!(para.children[2].kind, NodeKind::Text(", thanks.".to_owned()));
    }

    #[test]
    fn test_text_directive_with_inline_markup() {
        let root = parse_markdown("A :link[Docs]{link=\"https://a.com/_x_/y\"} b").root;
        let para = &root.children[0];

        assert_eq!(para.children.len(), 3);
        let link = directive(&para.children[1]);
        assert_eq!(link.attributes, attrs([("link", "https://a.com/_x_/y")]));
        assert_eq!(para.children[1].position, Some(Position::new(1, 3)));
        assert_eq!(para.children[2].kind, NodeKind::Text(" b".to_owned()));
        assert_eq!(para.children[2].position, Some(Position::new(1, 42)));
    }

    #[test]
    fn test_label_is_inline_markdown() {
        let root = parse_markdown("Now :badge[**New**]{color=red} here").root;
        let badge_node = &root.children[0].children[1];
        let badge = directive(badge_node);

        assert_eq!(badge.name, "badge");
        assert_eq!(badge.label.as_deref(), Some("New"));
        assert_eq!(badge.attributes, attrs([("color", "red")]));
        assert_eq!(
            badge_node.children,
            vec![Node::new(NodeKind::Strong).with_children(vec![Node::text("New")])]
        );
    }

    #[test]
    fn test_code_in_label() {
        let root = parse_markdown("Uses :link[`serde`]{link=\"https://serde.rs\"}.").root;
        let link_node = &root.children[0].children[1];

        assert_eq!(directive(link_node).label.as_deref(), Some("serde"));
        assert_eq!(
            link_node.children,
            vec![Node::new(NodeKind::InlineCode("serde".to_owned()))]
        );
    }

    #[test]
    fn test_escaped_text_directive() {
        let root = parse_markdown("Write \\:badge[x] literally.").root;
        let para = &root.children[0];

        assert!(para.children.iter().all(|n| n.as_directive().is_none()));
        assert_eq!(
            para.children[0].kind,
            NodeKind::Text("Write :badge[x] literally.".to_owned())
        );
    }

    #[test]
    fn test_directive_line_inside_list_item() {
        let root = parse_markdown("- item\n  ::video{youtubeId=abc}\n\nAfter.").root;

        assert_eq!(root.children.len(), 2);
        assert_eq!(
            root.children[0].kind,
            NodeKind::List {
                ordered: false,
                start: 1
            }
        );
        assert!(crate::text::to_plain_text(&root.children[0]).contains("::video{youtubeId=abc}"));
        assert!(root.find(&|n: &Node| n.as_directive().is_some()).is_none());
        assert_eq!(root.children[1].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_directive_line_after_list() {
        let root = parse_markdown("- item\n\n::video{youtubeId=abc}").root;

        assert_eq!(root.children.len(), 2);
        assert_eq!(directive(&root.children[1]).name, "video");
        assert_eq!(root.children[1].position, Some(Position::new(3, 1)));
    }

    #[test]
    fn test_container_directive() {
        let source = "\
:::image-figure[A caption]{.wide}
![Lake](lake.jpg)
:::

After.";
        let result = parse_markdown(source);
        let root = result.root;

        assert_eq!(root.children.len(), 2);
        let figure = directive(&root.children[0]);
        assert_eq!(figure.kind, DirectiveKind::Container);
        assert_eq!(figure.label.as_deref(), Some("A caption"));
        assert_eq!(figure.attributes, attrs([("class", "wide")]));

        let para = &root.children[0].children[0];
        assert_eq!(
            para.children[0].kind,
            NodeKind::Image {
                url: "lake.jpg".to_owned(),
                alt: "Lake".to_owned(),
                title: String::new(),
            }
        );
        assert_eq!(para.children[0].position, Some(Position::new(2, 1)));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_nested_containers() {
        let source = "\
::::image-section
:::image-a{href=/x}
![a](a.png)
:::
::::";
        let root = parse_markdown(source).root;

        let section = &root.children[0];
        assert_eq!(directive(section).name, "image-section");
        assert_eq!(section.children.len(), 1);
        assert_eq!(directive(&section.children[0]).name, "image-a");
    }

    #[test]
    fn test_directives_in_code_are_literal() {
        let source = "```md\n:::image-div\n::video{youtubeId=x}\n```";
        let root = parse_markdown(source).root;

        assert_eq!(root.children.len(), 1);
        assert_eq!(
            root.children[0].kind,
            NodeKind::CodeBlock {
                lang: Some("md".to_owned()),
                value: ":::image-div\n::video{youtubeId=x}\n".to_owned(),
            }
        );
    }

    #[test]
    fn test_inline_code_is_not_scanned() {
        let root = parse_markdown("Use `:badge[x]` syntax.").root;
        let para = &root.children[0];
        assert!(para.children.iter().all(|n| n.as_directive().is_none()));
    }

    #[test]
    fn test_unclosed_container_warns() {
        let result = parse_markdown(":::image-div\ncontent");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("never closed"));
        assert_eq!(directive(&result.root.children[0]).name, "image-div");
    }

    #[test]
    fn test_stray_closing_fence_warns() {
        let result = parse_markdown("text\n\n:::\n");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(
            result.warnings[0].to_string(),
            "line 3: closing fence without an open container"
        );
    }

    #[test]
    fn test_list_and_table() {
        let source = "1. one\n2. two\n\n| a | b |\n|---|---|\n| 1 | 2 |";
        let root = parse_markdown(source).root;

        assert_eq!(
            root.children[0].kind,
            NodeKind::List {
                ordered: true,
                start: 1
            }
        );
        assert_eq!(root.children[0].children.len(), 2);
        assert_eq!(root.children[1].kind, NodeKind::Table);
    }
}
