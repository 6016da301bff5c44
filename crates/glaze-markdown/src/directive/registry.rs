//! Directive dispatch and tree resolution.

use std::collections::HashMap;
use std::sync::Arc;

use crate::tree::{Node, NodeKind};

use super::{DirectiveContext, DirectiveError, DirectiveHandler, GenericHandler, Resolved};

/// Maps directive names to handlers and resolves every directive in a tree.
///
/// Lookup order: exact name, then the longest registered prefix, then the
/// fallback handler ([`GenericHandler`]).
///
/// # Example
///
/// ```
/// use glaze_markdown::directive::DirectiveRegistry;
/// use glaze_markdown::{parse_markdown, render_html};
///
/// let registry = DirectiveRegistry::new();
/// let parsed = parse_markdown("Press :kbd[Ctrl]{.key} now.");
/// let tree = registry.resolve(parsed.root).unwrap();
///
/// assert_eq!(render_html(&tree), r#"<p>Press <kbd class="key">Ctrl</kbd> now.</p>"#);
/// ```
pub struct DirectiveRegistry {
    exact: HashMap<String, Arc<dyn DirectiveHandler>>,
    /// Sorted by descending prefix length.
    prefixes: Vec<(String, Arc<dyn DirectiveHandler>)>,
    fallback: Arc<dyn DirectiveHandler>,
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveRegistry {
    /// Create an empty registry with the generic fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            exact: HashMap::new(),
            prefixes: Vec::new(),
            fallback: Arc::new(GenericHandler),
        }
    }

    /// Register a handler for one exact directive name.
    #[must_use]
    pub fn with_handler<H: DirectiveHandler + 'static>(mut self, name: &str, handler: H) -> Self {
        self.exact.insert(name.to_owned(), Arc::new(handler));
        self
    }

    /// Register a handler for every name starting with `prefix`.
    #[must_use]
    pub fn with_prefix<H: DirectiveHandler + 'static>(mut self, prefix: &str, handler: H) -> Self {
        self.prefixes.push((prefix.to_owned(), Arc::new(handler)));
        self.prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        self
    }

    /// Handler responsible for `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> &dyn DirectiveHandler {
        if let Some(handler) = self.exact.get(name) {
            return handler.as_ref();
        }
        self.prefixes
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix.as_str()))
            .map_or(self.fallback.as_ref(), |(_, handler)| handler.as_ref())
    }

    /// Whether `name` has a registered (non-fallback) handler.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.exact.contains_key(name)
            || self
                .prefixes
                .iter()
                .any(|(prefix, _)| name.starts_with(prefix.as_str()))
    }

    /// Resolve every directive node in `tree`, preorder.
    ///
    /// Consumes the tree and returns the resolved one. The first failing
    /// directive aborts the walk; no partially resolved tree is returned.
    pub fn resolve(&self, tree: Node) -> Result<Node, DirectiveError> {
        self.resolve_node(tree)
    }

    fn resolve_node(&self, mut node: Node) -> Result<Node, DirectiveError> {
        let resolved = match &node.kind {
            NodeKind::Directive(directive) => {
                if !self.is_registered(&directive.name) {
                    tracing::debug!(
                        name = %directive.name,
                        kind = %directive.kind,
                        "No handler registered, using fallback"
                    );
                }
                let ctx = DirectiveContext::new(&node, directive);
                Some(self.lookup(&directive.name).resolve(&ctx)?)
            }
            _ => None,
        };

        match resolved {
            Some(Resolved::Override(render_override)) => {
                node.render_override = Some(render_override);
            }
            Some(Resolved::Replace(replacement)) => node = replacement,
            Some(Resolved::Keep) | None => {}
        }

        node.children = self.resolve_all(std::mem::take(&mut node.children))?;
        if let Some(render_override) = node.render_override.as_mut()
            && let Some(children) = render_override.children.take()
        {
            render_override.children = Some(self.resolve_all(children)?);
        }

        Ok(node)
    }

    fn resolve_all(&self, nodes: Vec<Node>) -> Result<Vec<Node>, DirectiveError> {
        nodes
            .into_iter()
            .map(|child| self.resolve_node(child))
            .collect()
    }
}
