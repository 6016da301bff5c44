//! Directive handlers for glaze content.
//!
//! | Directive | Form | Output |
//! |-----------|------|--------|
//! | `::video{youtubeId=..}` | leaf | responsive iframe embed |
//! | `:link{id=..}` | text | avatar or favicon link |
//! | `:badge[text]{color=..}` | text | colored badge |
//! | `:badge-a` .. `:badge-g` | text | preset badge |
//! | `:::image-figure` | container | `<figure>` with caption |
//! | `:::image-a{href=..}` | container | linked image |
//! | `:::image-<tag>` | container | image wrapped in `<tag>` |
//!
//! Any other directive falls through to the generic handler, which renders
//! it as an element named after the directive.
//!
//! # Example
//!
//! ```
//! use glaze_directives::sugar_registry;
//! use glaze_markdown::{parse_markdown, render_html};
//!
//! let registry = sugar_registry("#bebfc5");
//! let parsed = parse_markdown("New :badge-t{} here");
//! let tree = registry.resolve(parsed.root).unwrap();
//!
//! assert!(render_html(&tree).contains(r#"<span class="sugar-badge""#));
//! ```

mod badge;
mod image;
mod link;
mod video;

pub use badge::{BadgeColors, BadgeHandler, BadgePresetHandler};
pub use image::ImageContainerHandler;
pub use link::{LinkHandler, LinkStyle, ResolvedLink};
pub use video::VideoHandler;

use glaze_markdown::directive::DirectiveRegistry;

/// Registry with every built-in handler installed.
///
/// `default_badge_color` is used by `:badge` when no `color` is given.
#[must_use]
pub fn sugar_registry(default_badge_color: &str) -> DirectiveRegistry {
    DirectiveRegistry::new()
        .with_handler("video", VideoHandler)
        .with_handler("link", LinkHandler)
        .with_handler("badge", BadgeHandler::new(default_badge_color))
        .with_prefix("badge-", BadgePresetHandler)
        .with_prefix("image-", ImageContainerHandler)
}


#[cfg(test)]
mod tests {
    use super::*;
    use glaze_markdown::{parse_markdown, render_html};
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> Result<String, glaze_markdown::directive::DirectiveError> {
        let parsed = parse_markdown(markdown);
        let tree = sugar_registry("#bebfc5").resolve(parsed.root)?;
        Ok(render_html(&tree))
    }

    #[test]
    fn test_video_end_to_end() {
        assert_eq!(
            render("::video{youtubeId=abc title=\"Intro\"}").unwrap(),
            concat!(
                r#"<div class="sugar-video"><iframe allow="accelerometer; clipboard-write; "#,
                r#"encrypted-media; gyroscope; picture-in-picture; web-share" allowfullscreen="" "#,
                r#"loading="lazy" src="https://www.youtube-nocookie.com/embed/abc" title="Intro">"#,
                r#"</iframe></div>"#
            )
        );
    }

    #[test]
    fn test_badge_and_link_inline() {
        assert_eq!(
            render("See :badge[new]{color=red} and :link{id=\"@octocat\" style=github}").unwrap(),
            concat!(
                r#"<p>See <span class="sugar-badge" "#,
                r#"style="--badge-color-light:red; --badge-color-dark:red">new</span> and "#,
                r#"<span style="white-space: nowrap"><span class="i-carbon-logo-github"></span>"#,
                r#"<a class="sugar-link-github" href="https://github.com/octocat">octocat</a>"#,
                r#"</span></p>"#
            )
        );
    }

    #[test]
    fn test_link_url_keeps_underscores() {
        let html = render("Read :link[Docs]{link=\"https://a.com/_x_/y\"} now").unwrap();

        assert!(html.contains(r#"href="https://a.com/_x_/y""#));
        assert!(!html.contains("<em>"));
        assert!(html.ends_with(" now</p>"));
    }

    #[test]
    fn test_badge_label_markup() {
        assert_eq!(
            render(":badge[**New**]{color=red}").unwrap(),
            concat!(
                r#"<p><span class="sugar-badge" "#,
                r#"style="--badge-color-light:red; --badge-color-dark:red">"#,
                r#"<strong>New</strong></span></p>"#
            )
        );
    }

    #[test]
    fn test_directive_line_in_list_stays_text() {
        let html = render("- item\n  ::video{youtubeId=abc}").unwrap();

        assert!(html.starts_with("<ul><li>"));
        assert!(html.contains("::video{youtubeId=abc}"));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_image_figure_end_to_end() {
        assert_eq!(
            render(":::image-figure\n![A tabby](cat.png)\n:::").unwrap(),
            concat!(
                r#"<figure><p><img src="cat.png" alt="A tabby"></p>"#,
                r#"<figcaption>A tabby</figcaption></figure>"#
            )
        );
    }

    #[test]
    fn test_unregistered_directive_uses_generic() {
        assert_eq!(
            render(":::details{.faq}\nBody\n:::").unwrap(),
            r#"<details class="faq"><p>Body</p></details>"#
        );
    }

    #[test]
    fn test_error_carries_location() {
        let err = render("Intro\n\n::video{title=x}").unwrap_err();
        assert_eq!(err.name(), "video");
        assert_eq!(err.location().position.map(|p| p.line), Some(3));
    }
}
