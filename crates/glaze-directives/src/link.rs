//! `:link` text directive.
//!
//! Renders a link with a small avatar or favicon in front of the label:
//!
//! - `:link{id="@octocat"}` links a GitHub profile
//! - `:link{id="rust-lang/rust"}` links a GitHub repository
//! - `:link[Docs]{link="https://docs.rs"}` links any URL with its favicon

use std::sync::LazyLock;

use glaze_markdown::directive::{DirectiveContext, DirectiveError, DirectiveHandler, Resolved};
use glaze_markdown::tree::{DirectiveKind, Node, RenderOverride, attrs};
use regex::Regex;
use url::Url;

const FAVICON_BASE_URL: &str = "https://www.google.com/s2/favicons";
const FAVICON_RESOLUTION: u32 = 128;

/// GitHub handle: 2-39 chars, alphanumeric at both ends. `--` is rejected
/// separately.
static GITHUB_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@([a-zA-Z0-9][a-zA-Z0-9_-]{0,37}[a-zA-Z0-9])$").expect("invalid user regex")
});

static GITHUB_REPO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@?(([a-zA-Z0-9][a-zA-Z0-9_-]{0,37}[a-zA-Z0-9])/.*)$")
        .expect("invalid repo regex")
});

const GITHUB_TABS: &[&str] = &[
    "repositories",
    "projects",
    "packages",
    "stars",
    "sponsoring",
    "sponsors",
    "org-repositories",
    "org-projects",
    "org-packages",
    "org-sponsoring",
    "org-people",
];

/// Visual style of a rendered link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStyle {
    Square,
    Rounded,
    Github,
}

impl LinkStyle {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "square" => Some(Self::Square),
            "rounded" => Some(Self::Rounded),
            "github" => Some(Self::Github),
            _ => None,
        }
    }
}

/// Fully resolved link before it is turned into output nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
    pub text: String,
    pub href: String,
    pub image_url: String,
    pub style: LinkStyle,
}

/// Resolves `:link` into an avatar link.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkHandler;

impl LinkHandler {
    /// Work out target, avatar, style, and label for a `:link` directive.
    pub fn resolve_link(ctx: &DirectiveContext) -> Result<ResolvedLink, DirectiveError> {
        ctx.require_kind(DirectiveKind::Text)?;

        let id = ctx.attr("id");
        let link = ctx.attr("link");
        let image_url = ctx.attr("imageUrl");

        let style = ctx
            .attr("style")
            .map(|s| {
                LinkStyle::parse(s).ok_or_else(|| {
                    ctx.invalid(format!(
                        "`style` must be one of \"square\", \"rounded\", or \"github\", got \"{s}\""
                    ))
                })
            })
            .transpose()?;

        let tab = ctx
            .attr("tab")
            .map(|t| {
                if GITHUB_TABS.contains(&t) {
                    Ok(t)
                } else {
                    Err(ctx.invalid(format!(
                        "`tab` must be one of: {}, got \"{t}\"",
                        GITHUB_TABS.join(", ")
                    )))
                }
            })
            .transpose()?;

        let Some(id) = id else {
            let link = link.ok_or_else(|| ctx.missing("`link` (required when `id` is not given)"))?;
            let text = ctx
                .label()
                .ok_or_else(|| ctx.missing("a label in `[]` (required when `id` is not given)"))?;
            let image_url = match image_url {
                Some(url) => url.to_owned(),
                None => favicon_url(link).ok_or_else(|| {
                    ctx.invalid(format!("`link` must be an absolute URL, got \"{link}\""))
                })?,
            };
            return Ok(ResolvedLink {
                text: text.to_owned(),
                href: link.to_owned(),
                image_url,
                style: style.unwrap_or(LinkStyle::Square),
            });
        };

        if id.contains("--") {
            return Err(invalid_id(ctx, id));
        }

        if let Some(caps) = GITHUB_USER.captures(id) {
            let user = &caps[1];
            let href = link.map_or_else(|| profile_url(user, tab), str::to_owned);
            return Ok(ResolvedLink {
                text: ctx.label().unwrap_or(user).to_owned(),
                href,
                image_url: image_url.map_or_else(|| format!("https://github.com/{user}.png"), str::to_owned),
                style: style.unwrap_or(LinkStyle::Rounded),
            });
        }

        if let Some(caps) = GITHUB_REPO.captures(id) {
            let repo = &caps[1];
            let owner = &caps[2];
            return Ok(ResolvedLink {
                text: ctx.label().unwrap_or(id).to_owned(),
                href: link.map_or_else(|| format!("https://github.com/{repo}"), str::to_owned),
                image_url: image_url
                    .map_or_else(|| format!("https://github.com/{owner}.png"), str::to_owned),
                style: style.unwrap_or(LinkStyle::Square),
            });
        }

        Err(invalid_id(ctx, id))
    }
}

impl DirectiveHandler for LinkHandler {
    fn resolve(&self, ctx: &DirectiveContext) -> Result<Resolved, DirectiveError> {
        let link = Self::resolve_link(ctx)?;
        Ok(Resolved::Override(render(link)))
    }
}

fn invalid_id(ctx: &DirectiveContext, id: &str) -> DirectiveError {
    ctx.invalid(format!(
        "`id` must look like `@username` or `username/reponame`, got \"{id}\""
    ))
}

fn profile_url(user: &str, tab: Option<&str>) -> String {
    match tab {
        None => format!("https://github.com/{user}"),
        Some(tab) => match tab.strip_prefix("org-") {
            Some(org_tab) => format!("https://github.com/orgs/{user}/{org_tab}"),
            None => format!("https://github.com/{user}?tab={tab}"),
        },
    }
}

fn favicon_url(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?;
    Some(format!(
        "{FAVICON_BASE_URL}?domain={host}&sz={FAVICON_RESOLUTION}"
    ))
}

fn render(link: ResolvedLink) -> RenderOverride {
    match link.style {
        LinkStyle::Square | LinkStyle::Rounded => {
            let class = if link.style == LinkStyle::Square {
                "sugar-link-square"
            } else {
                "sugar-link-rounded"
            };
            let background = format!("background-image: url(\"{}\")", link.image_url);
            RenderOverride::with_children(
                "a",
                attrs([("class", class), ("href", link.href.as_str())]),
                vec![
                    Node::element(
                        "span",
                        attrs([("class", "sugar-link-image"), ("style", background.as_str())]),
                        Vec::new(),
                    ),
                    Node::text(link.text),
                ],
            )
        }
        LinkStyle::Github => RenderOverride::with_children(
            "span",
            attrs([("style", "white-space: nowrap")]),
            vec![
                Node::element("span", attrs([("class", "i-carbon-logo-github")]), Vec::new()),
                Node::element(
                    "a",
                    attrs([("class", "sugar-link-github"), ("href", link.href.as_str())]),
                    vec![Node::text(link.text)],
                ),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{leaf, resolve_one, text};
    use glaze_markdown::tree::Attributes;
    use pretty_assertions::assert_eq;

    fn resolve(label: Option<&str>, attributes: Attributes) -> Result<ResolvedLink, DirectiveError> {
        let node = text("link", label, attributes);
        let directive = node.as_directive().unwrap();
        LinkHandler::resolve_link(&DirectiveContext::new(&node, directive))
    }

    #[test]
    fn test_github_user() {
        let link = resolve(None, attrs([("id", "@octocat")])).unwrap();
        assert_eq!(
            link,
            ResolvedLink {
                text: "octocat".to_owned(),
                href: "https://github.com/octocat".to_owned(),
                image_url: "https://github.com/octocat.png".to_owned(),
                style: LinkStyle::Rounded,
            }
        );
    }

    #[test]
    fn test_github_user_tabs() {
        let link = resolve(None, attrs([("id", "@octocat"), ("tab", "stars")])).unwrap();
        assert_eq!(link.href, "https://github.com/octocat?tab=stars");

        let link = resolve(None, attrs([("id", "@github"), ("tab", "org-people")])).unwrap();
        assert_eq!(link.href, "https://github.com/orgs/github/people");
    }

    #[test]
    fn test_github_repo() {
        let link = resolve(None, attrs([("id", "rust-lang/rust")])).unwrap();
        assert_eq!(
            link,
            ResolvedLink {
                text: "rust-lang/rust".to_owned(),
                href: "https://github.com/rust-lang/rust".to_owned(),
                image_url: "https://github.com/rust-lang.png".to_owned(),
                style: LinkStyle::Square,
            }
        );
    }

    #[test]
    fn test_github_repo_leading_at() {
        let link = resolve(None, attrs([("id", "@withastro/astro")])).unwrap();
        assert_eq!(link.href, "https://github.com/withastro/astro");
        assert_eq!(link.image_url, "https://github.com/withastro.png");
    }

    #[test]
    fn test_external_link_favicon() {
        let link = resolve(Some("Rust docs"), attrs([("link", "https://doc.rust-lang.org/std/")]))
            .unwrap();
        assert_eq!(
            link.image_url,
            "https://www.google.com/s2/favicons?domain=doc.rust-lang.org&sz=128"
        );
        assert_eq!(link.style, LinkStyle::Square);
        assert_eq!(link.text, "Rust docs");
    }

    #[test]
    fn test_explicit_overrides() {
        let link = resolve(
            Some("Me"),
            attrs([
                ("id", "@octocat"),
                ("link", "https://octocat.dev"),
                ("imageUrl", "https://img/x.png"),
                ("style", "github"),
            ]),
        )
        .unwrap();
        assert_eq!(
            link,
            ResolvedLink {
                text: "Me".to_owned(),
                href: "https://octocat.dev".to_owned(),
                image_url: "https://img/x.png".to_owned(),
                style: LinkStyle::Github,
            }
        );
    }

    #[test]
    fn test_invalid_ids() {
        // `x/y` has a one-char owner, which is too short.
        for id in ["octocat", "@a", "@bad--name", "@-dash", "x/y", "own--er/repo"] {
            let result = resolve(None, attrs([("id", id)]));
            assert!(result.is_err(), "{id} should be rejected");
        }
    }

    #[test]
    fn test_neither_id_nor_link() {
        let err = resolve(Some("label"), Attributes::new()).unwrap_err();
        assert!(matches!(err, DirectiveError::MissingAttribute { .. }));
    }

    #[test]
    fn test_link_without_label() {
        let err = resolve(None, attrs([("link", "https://example.com")])).unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_relative_link_needs_image() {
        assert!(resolve(Some("x"), attrs([("link", "/about")])).is_err());
        assert!(
            resolve(
                Some("x"),
                attrs([("link", "/about"), ("imageUrl", "/me.png")])
            )
            .is_ok()
        );
    }

    #[test]
    fn test_invalid_style_and_tab() {
        let err = resolve(None, attrs([("id", "@octocat"), ("style", "pill")])).unwrap_err();
        assert!(matches!(err, DirectiveError::InvalidAttribute { .. }));

        let err = resolve(None, attrs([("id", "@octocat"), ("tab", "followers")])).unwrap_err();
        assert!(err.to_string().contains("`tab`"));
    }

    #[test]
    fn test_leaf_form_rejected() {
        let node = leaf("link", attrs([("id", "@octocat")]));
        let err = resolve_one(&LinkHandler, &node).unwrap_err();
        assert!(matches!(err, DirectiveError::Arity { expected: "text", .. }));
    }

    #[test]
    fn test_render_rounded() {
        let node = text("link", None, attrs([("id", "@octocat")]));
        let resolved = resolve_one(&LinkHandler, &node).unwrap();

        let expected = RenderOverride::with_children(
            "a",
            attrs([
                ("class", "sugar-link-rounded"),
                ("href", "https://github.com/octocat"),
            ]),
            vec![
                Node::element(
                    "span",
                    attrs([
                        ("class", "sugar-link-image"),
                        (
                            "style",
                            "background-image: url(\"https://github.com/octocat.png\")",
                        ),
                    ]),
                    Vec::new(),
                ),
                Node::text("octocat"),
            ],
        );
        assert_eq!(resolved, Resolved::Override(expected));
    }

    #[test]
    fn test_render_github_style() {
        let node = text("link", None, attrs([("id", "rust-lang/rust"), ("style", "github")]));
        let Resolved::Override(o) = resolve_one(&LinkHandler, &node).unwrap() else {
            panic!("expected override");
        };

        assert_eq!(o.tag, "span");
        assert_eq!(o.properties, attrs([("style", "white-space: nowrap")]));
        let children = o.children.unwrap();
        assert_eq!(
            children[1],
            Node::element(
                "a",
                attrs([
                    ("class", "sugar-link-github"),
                    ("href", "https://github.com/rust-lang/rust"),
                ]),
                vec![Node::text("rust-lang/rust")],
            )
        );
    }
}
