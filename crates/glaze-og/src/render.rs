//! Card rasterization.

use glaze_config::BgType;
use resvg::{tiny_skia, usvg};

use crate::markup::card_svg;
use crate::resources::OgResources;
use crate::{OG_HEIGHT, OG_WIDTH, OgError};

/// Content of one preview card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card<'a> {
    pub author: &'a str,
    pub title: &'a str,
    pub bg_type: BgType,
}

/// Turns a card into PNG bytes.
pub trait CardRenderer: Send + Sync {
    fn render(&self, card: &Card<'_>) -> Result<Vec<u8>, OgError>;
}

/// Renders cards by composing SVG and rasterizing it with `resvg`.
#[derive(Debug, Clone)]
pub struct SvgCardRenderer {
    resources: OgResources,
}

impl SvgCardRenderer {
    #[must_use]
    pub fn new(resources: OgResources) -> Self {
        Self { resources }
    }

    fn options(&self) -> usvg::Options<'static> {
        usvg::Options {
            font_family: self.resources.font_family().to_owned(),
            fontdb: self.resources.fontdb(),
            ..usvg::Options::default()
        }
    }
}

impl CardRenderer for SvgCardRenderer {
    fn render(&self, card: &Card<'_>) -> Result<Vec<u8>, OgError> {
        let svg = card_svg(&self.resources, card);
        let tree = usvg::Tree::from_str(&svg, &self.options())?;

        let mut pixmap = tiny_skia::Pixmap::new(OG_WIDTH, OG_HEIGHT)
            .ok_or_else(|| OgError::Raster("cannot allocate pixmap".to_owned()))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| OgError::Raster(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_png() {
        let renderer = SvgCardRenderer::new(OgResources::without_fonts());
        let png = renderer
            .render(&Card {
                author: "Jane",
                title: "Hello",
                bg_type: BgType::Particle,
            })
            .unwrap();

        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
