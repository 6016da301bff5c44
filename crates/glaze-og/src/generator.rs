//! Per-document OG image decisions.
//!
//! The generator checks, in order: draft, redirect, empty title,
//! `ogImage: false`, an existing `<slug>.png`, and an explicit `ogImage`
//! file. Only when every check passes is a card rendered and stored.

use std::path::Path;
use std::sync::Arc;

use glaze_config::{BgType, OgImageConfig};
use glaze_store::ArtifactStore;

use crate::render::{Card, CardRenderer};
use crate::{FALLBACK_KEY, OgError};

/// The `ogImage` front-matter setting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OgImageSetting {
    /// Absent or `true`: generate `<slug>.png`.
    #[default]
    Auto,
    /// `false`: never generate.
    Disabled,
    /// A filename expected in the output directory.
    File(String),
}

/// Everything the generator needs to know about one document.
#[derive(Clone, Debug)]
pub struct OgRequest<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub bg_type: Option<BgType>,
    pub og_image: &'a OgImageSetting,
    pub draft: bool,
    pub redirect: Option<&'a str>,
}

/// Why no image was rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Draft,
    Redirect,
    NoTitle,
    Disabled,
    /// An artifact under `key` is already in the store.
    AlreadyExists { key: String },
    /// The explicit `ogImage` file is not in the store.
    CustomFileMissing { file: String },
}

/// Result of one generation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OgOutcome {
    Skipped(SkipReason),
    Generated { key: String },
    Failed { key: String, error: String },
}

impl OgOutcome {
    /// Key of the artifact that exists after this outcome, if any.
    #[must_use]
    pub fn artifact(&self) -> Option<&str> {
        match self {
            Self::Generated { key } | Self::Skipped(SkipReason::AlreadyExists { key }) => {
                Some(key)
            }
            _ => None,
        }
    }
}

/// Generates and caches preview images in an [`ArtifactStore`].
pub struct OgImageGenerator {
    store: Arc<dyn ArtifactStore>,
    renderer: Box<dyn CardRenderer>,
    author: String,
    fallback_title: String,
    fallback_bg_type: BgType,
}

impl OgImageGenerator {
    pub fn new(
        config: &OgImageConfig,
        store: Arc<dyn ArtifactStore>,
        renderer: Box<dyn CardRenderer>,
    ) -> Self {
        Self {
            store,
            renderer,
            author: config.author_or_brand.clone(),
            fallback_title: config.fallback_title.clone(),
            fallback_bg_type: config.fallback_bg_type,
        }
    }

    /// Render the site-wide fallback image unless it already exists.
    pub fn ensure_fallback(&self) -> OgOutcome {
        if self.store.exists(FALLBACK_KEY) {
            return OgOutcome::Skipped(SkipReason::AlreadyExists {
                key: FALLBACK_KEY.to_owned(),
            });
        }
        let card = Card {
            author: &self.author,
            title: &self.fallback_title,
            bg_type: self.fallback_bg_type,
        };
        self.render_to(FALLBACK_KEY, &card)
    }

    /// Decide and, if needed, render the image for one document.
    pub fn generate(&self, request: &OgRequest<'_>) -> OgOutcome {
        if request.draft {
            return OgOutcome::Skipped(SkipReason::Draft);
        }
        if request.redirect.is_some() {
            return OgOutcome::Skipped(SkipReason::Redirect);
        }
        let title = request.title.trim();
        if title.is_empty() {
            tracing::warn!(slug = %request.slug, "Empty title, skipping OG image");
            return OgOutcome::Skipped(SkipReason::NoTitle);
        }
        if *request.og_image == OgImageSetting::Disabled {
            return OgOutcome::Skipped(SkipReason::Disabled);
        }

        let key = format!("{}.png", request.slug);
        if self.store.exists(&key) {
            return OgOutcome::Skipped(SkipReason::AlreadyExists { key });
        }

        if let OgImageSetting::File(file) = request.og_image {
            let name = basename(file);
            if self.store.exists(name) {
                return OgOutcome::Skipped(SkipReason::AlreadyExists {
                    key: name.to_owned(),
                });
            }
            tracing::warn!(
                slug = %request.slug,
                file = %file,
                "ogImage file not found, no OG image will be generated"
            );
            return OgOutcome::Skipped(SkipReason::CustomFileMissing { file: file.clone() });
        }

        let card = Card {
            author: &self.author,
            title,
            bg_type: request.bg_type.unwrap_or(self.fallback_bg_type),
        };
        self.render_to(&key, &card)
    }

    fn render_to(&self, key: &str, card: &Card<'_>) -> OgOutcome {
        tracing::info!(key = %key, "Generating OG image");
        let result = self
            .renderer
            .render(card)
            .and_then(|png| self.store.write(key, &png).map_err(OgError::from));
        match result {
            Ok(()) => OgOutcome::Generated {
                key: key.to_owned(),
            },
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Failed to generate OG image");
                OgOutcome::Failed {
                    key: key.to_owned(),
                    error: e.to_string(),
                }
            }
        }
    }
}

fn basename(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}
