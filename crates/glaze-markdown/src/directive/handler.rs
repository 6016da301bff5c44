//! Directive handler trait.

use crate::tree::{Node, RenderOverride};

use super::{DirectiveContext, DirectiveError};

/// Outcome of resolving one directive node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// Keep the node and render it with this override.
    Override(RenderOverride),
    /// Replace the node with another subtree.
    Replace(Node),
    /// Leave the node untouched.
    Keep,
}

/// Resolves directive nodes of one variant.
///
/// Handlers are registered on a [`DirectiveRegistry`](super::DirectiveRegistry)
/// under an exact name or a name prefix and must be shareable across the
/// build's worker threads.
///
/// # Example
///
/// ```
/// use glaze_markdown::directive::{
///     DirectiveContext, DirectiveError, DirectiveHandler, Resolved,
/// };
/// use glaze_markdown::tree::{Attributes, RenderOverride};
///
/// struct Kbd;
///
/// impl DirectiveHandler for Kbd {
///     fn resolve(&self, _ctx: &DirectiveContext) -> Result<Resolved, DirectiveError> {
///         Ok(Resolved::Override(RenderOverride::wrap("kbd", Attributes::new())))
///     }
/// }
/// ```
pub trait DirectiveHandler: Send + Sync {
    fn resolve(&self, ctx: &DirectiveContext) -> Result<Resolved, DirectiveError>;
}

/// Fallback for unregistered names: tag = directive name, properties = raw
/// attributes, original children rendered inside.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericHandler;

impl DirectiveHandler for GenericHandler {
    fn resolve(&self, ctx: &DirectiveContext) -> Result<Resolved, DirectiveError> {
        Ok(Resolved::Override(RenderOverride::wrap(
            ctx.name(),
            ctx.attributes().clone(),
        )))
    }
}
