//! Fonts, backgrounds, and brand mark shared by every card.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use glaze_config::{BgType, OgImageConfig};
use resvg::usvg::fontdb;

use crate::OgError;

/// Mark drawn next to the author line when no `brand_mark` is configured.
const DEFAULT_BRAND_MARK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#f97316"/><stop offset="1" stop-color="#c026d3"/></linearGradient></defs><rect x="2" y="2" width="28" height="28" rx="8" fill="url(#g)"/><path d="M16 7l2.6 6.4L25 16l-6.4 2.6L16 25l-2.6-6.4L7 16l6.4-2.6z" fill="#fff"/></svg>"##;

/// Background for one variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    /// Built-in art drawn by [`procedural`](crate::background::procedural).
    Procedural(BgType),
    /// Image file embedded as a data URI.
    Image(String),
}

/// Resources loaded once per build and shared read-only across cards.
#[derive(Clone)]
pub struct OgResources {
    fontdb: Arc<fontdb::Database>,
    font_family: String,
    backgrounds: BTreeMap<BgType, String>,
    brand_mark: String,
}

impl std::fmt::Debug for OgResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OgResources")
            .field("faces", &self.fontdb.len())
            .field("font_family", &self.font_family)
            .field("backgrounds", &self.backgrounds.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl OgResources {
    /// Load fonts, background images, and the brand mark named in `config`.
    ///
    /// Fails if any configured file is missing or no font face is available.
    pub fn load(config: &OgImageConfig) -> Result<Self, OgError> {
        let mut db = fontdb::Database::new();
        if let Some(font) = &config.font {
            db.load_font_data(read(font)?);
        }
        if config.system_fonts {
            db.load_system_fonts();
        }
        if db.is_empty() {
            return Err(OgError::NoFonts);
        }
        tracing::debug!(faces = db.len(), family = %config.font_family, "Loaded OG fonts");

        let backgrounds = config
            .backgrounds
            .iter()
            .map(|(bg_type, path)| Ok((*bg_type, data_uri(path)?)))
            .collect::<Result<BTreeMap<_, _>, OgError>>()?;

        let brand_mark = match &config.brand_mark {
            Some(path) => data_uri(path)?,
            None => svg_data_uri(DEFAULT_BRAND_MARK.as_bytes()),
        };

        Ok(Self {
            fontdb: Arc::new(db),
            font_family: config.font_family.clone(),
            backgrounds,
            brand_mark,
        })
    }

    #[must_use]
    pub fn background(&self, bg_type: BgType) -> Background {
        self.backgrounds
            .get(&bg_type)
            .map_or(Background::Procedural(bg_type), |uri| {
                Background::Image(uri.clone())
            })
    }

    #[must_use]
    pub fn brand_mark(&self) -> &str {
        &self.brand_mark
    }

    #[must_use]
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub(crate) fn fontdb(&self) -> Arc<fontdb::Database> {
        Arc::clone(&self.fontdb)
    }

    /// Built-in art and mark with an empty font database.
    #[cfg(test)]
    pub(crate) fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(fontdb::Database::new()),
            font_family: "Inter".to_owned(),
            backgrounds: BTreeMap::new(),
            brand_mark: svg_data_uri(DEFAULT_BRAND_MARK.as_bytes()),
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>, OgError> {
    fs::read(path).map_err(|source| OgError::Resource {
        path: path.to_path_buf(),
        source,
    })
}

fn data_uri(path: &Path) -> Result<String, OgError> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => return Err(OgError::UnsupportedImage(path.to_path_buf())),
    };
    let bytes = read(path)?;
    Ok(format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes)))
}

fn svg_data_uri(svg: &[u8]) -> String {
    format!("data:image/svg+xml;base64,{}", BASE64_STANDARD.encode(svg))
}
