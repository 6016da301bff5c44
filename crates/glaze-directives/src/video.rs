//! `::video` leaf directive.

use glaze_markdown::directive::{DirectiveContext, DirectiveError, DirectiveHandler, Resolved};
use glaze_markdown::tree::{Attributes, DirectiveKind, Node, RenderOverride};

/// Embed URL templates, in lookup priority order.
const PLATFORMS: &[(&str, &str)] = &[
    ("youtubeId", "https://www.youtube-nocookie.com/embed/"),
    ("bilibiliId", "https://player.bilibili.com/player.html?bvid="),
    ("vimeoId", "https://player.vimeo.com/video/"),
];

const DEFAULT_TITLE: &str = "Video Player";

const ALLOW: &str =
    "accelerometer; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";

/// Resolves `::video{youtubeId=...}` into a wrapped, lazily loaded iframe.
#[derive(Debug, Default, Clone, Copy)]
pub struct VideoHandler;

impl DirectiveHandler for VideoHandler {
    fn resolve(&self, ctx: &DirectiveContext) -> Result<Resolved, DirectiveError> {
        ctx.require_kind(DirectiveKind::Leaf)?;

        let src = PLATFORMS
            .iter()
            .find_map(|(key, base)| ctx.attr(key).map(|id| format!("{base}{id}")))
            .or_else(|| ctx.attr("iframeSrc").map(str::to_owned))
            .ok_or_else(|| ctx.missing("one of `youtubeId`, `bilibiliId`, `vimeoId`, `iframeSrc`"))?;

        let no_scale = ctx.has_attr("noScale");

        let mut wrapper = Attributes::new();
        wrapper.insert("class".to_owned(), "sugar-video".to_owned());
        if no_scale {
            wrapper.insert("style".to_owned(), "margin: 1rem 0".to_owned());
        }

        let mut frame = Attributes::new();
        frame.insert("src".to_owned(), src);
        frame.insert(
            "title".to_owned(),
            ctx.attr("title").unwrap_or(DEFAULT_TITLE).to_owned(),
        );
        frame.insert("loading".to_owned(), "lazy".to_owned());
        frame.insert("allow".to_owned(), ALLOW.to_owned());
        frame.insert("allowfullscreen".to_owned(), String::new());
        if no_scale {
            frame.insert("style".to_owned(), "transform: none".to_owned());
        }

        Ok(Resolved::Override(RenderOverride::with_children(
            "div",
            wrapper,
            vec![Node::element("iframe", frame, Vec::new())],
        )))
    }
}
