//! Markdown document tree with directive support.
//!
//! This crate turns markdown into a [`Node`] tree that understands the
//! generic directive syntax, resolves directives through a pluggable
//! [`DirectiveRegistry`](directive::DirectiveRegistry), and serializes the
//! result to an HTML fragment.
//!
//! # Pipeline
//!
//! 1. [`parse_markdown`]: source → tree with directive nodes
//! 2. [`DirectiveRegistry::resolve`](directive::DirectiveRegistry::resolve):
//!    directive nodes → render overrides or replacement subtrees
//! 3. [`to_plain_text`]: tree → text for word counting
//! 4. [`render_html`]: tree → HTML fragment
//!
//! # Example
//!
//! ```
//! use glaze_markdown::directive::DirectiveRegistry;
//! use glaze_markdown::{parse_markdown, render_html};
//!
//! let parsed = parse_markdown(":::aside{.note}\nHello\n:::");
//! let tree = DirectiveRegistry::new().resolve(parsed.root).unwrap();
//! assert_eq!(render_html(&tree), r#"<aside class="note"><p>Hello</p></aside>"#);
//! ```

pub mod directive;
mod fence;
mod html;
mod parse;
mod text;
pub mod tree;

pub use html::{escape_html, render_html};
pub use parse::{ParseResult, ParseWarning, parse_markdown};
pub use text::to_plain_text;
pub use tree::{Attributes, Directive, DirectiveKind, Node, NodeKind, Position, RenderOverride};
