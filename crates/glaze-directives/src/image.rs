//! `:::image-<tag>` container directives.
//!
//! Wraps images in a chosen element. `image-figure` adds a caption taken
//! from the directive label or the first image's alt text.

use glaze_markdown::directive::{DirectiveContext, DirectiveError, DirectiveHandler, Resolved};
use glaze_markdown::tree::{Attributes, DirectiveKind, Node, NodeKind, RenderOverride};

/// Tags allowed after `image-` besides `figure` and `a`.
const WRAPPER_TAGS: &[&str] = &[
    "div", "span", "section", "article", "main", "aside", "header", "footer", "nav", "fieldset",
    "form",
];

/// Resolves every directive starting with `image-`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageContainerHandler;

impl DirectiveHandler for ImageContainerHandler {
    fn resolve(&self, ctx: &DirectiveContext) -> Result<Resolved, DirectiveError> {
        ctx.require_kind(DirectiveKind::Container)?;

        let tag = ctx.name().strip_prefix("image-").unwrap_or_default();
        match tag {
            "figure" => figure(ctx),
            "a" => {
                if ctx.attr("href").is_none() {
                    return Err(ctx.missing("`href`"));
                }
                Ok(Resolved::Override(RenderOverride::wrap(
                    "a",
                    ctx.attributes().clone(),
                )))
            }
            _ if WRAPPER_TAGS.contains(&tag) => Ok(Resolved::Override(RenderOverride::wrap(
                tag,
                ctx.attributes().clone(),
            ))),
            _ => Err(ctx.invalid(format!(
                "unsupported wrapper `{tag}`, expected figure, a, or one of: {}",
                WRAPPER_TAGS.join(", ")
            ))),
        }
    }
}

fn figure(ctx: &DirectiveContext) -> Result<Resolved, DirectiveError> {
    let caption = match ctx.label() {
        Some(label) => label.to_owned(),
        None => first_image_alt(ctx.children())
            .ok_or_else(|| ctx.unresolvable_caption("no label and no image alt text"))?,
    };

    let mut children = ctx.children().to_vec();
    children.push(Node::element(
        "figcaption",
        ctx.attributes().clone(),
        vec![Node::text(caption)],
    ));

    Ok(Resolved::Override(RenderOverride::with_children(
        "figure",
        Attributes::new(),
        children,
    )))
}

fn first_image_alt(children: &[Node]) -> Option<String> {
    children.iter().find_map(|child| {
        let image = child.find(&|n| matches!(n.kind, NodeKind::Image { .. }))?;
        match &image.kind {
            NodeKind::Image { alt, .. } if !alt.trim().is_empty() => Some(alt.clone()),
            _ => None,
        }
    })
}
