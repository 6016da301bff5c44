//! Directive syntax and resolution.
//!
//! Directives extend markdown with three forms:
//!
//! - **Text** `:name[label]{attrs}` inside a paragraph
//! - **Leaf** `::name[label]{attrs}` on a line of its own
//! - **Container** `:::name[label]{attrs}` ... `:::` around block content
//!
//! The parser turns directive syntax into [`NodeKind::Directive`] nodes.
//! A [`DirectiveRegistry`] then walks the tree and hands every directive node
//! to the [`DirectiveHandler`] registered for its name, which answers with a
//! [`Resolved`] value: attach a render override, replace the node, or keep it.
//!
//! [`NodeKind::Directive`]: crate::tree::NodeKind::Directive

mod args;
mod context;
mod error;
mod handler;
mod registry;
pub(crate) mod syntax;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use error::{DirectiveError, Location};
pub use handler::{DirectiveHandler, GenericHandler, Resolved};
pub use registry::DirectiveRegistry;
