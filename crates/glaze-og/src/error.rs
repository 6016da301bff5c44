use std::path::PathBuf;

use glaze_store::StoreError;

/// Errors raised while loading resources or rendering a card.
#[derive(Debug, thiserror::Error)]
pub enum OgError {
    /// A configured resource file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A background file has an extension we cannot embed.
    #[error("unsupported background image format: {}", .0.display())]
    UnsupportedImage(PathBuf),
    /// No usable font was loaded.
    #[error("no fonts available: configure `og_image.font` or enable `system_fonts`")]
    NoFonts,
    /// The composed SVG was rejected by the parser.
    #[error("invalid card markup: {0}")]
    Markup(#[from] resvg::usvg::Error),
    /// Rasterization or PNG encoding failed.
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
