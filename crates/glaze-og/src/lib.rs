//! Open Graph preview images.
//!
//! Every published document gets a 1200×630 PNG named `<slug>.png` in a flat
//! output directory, plus one site-wide `og-image.png` used when a page has
//! no image of its own. Images are only rendered when missing, so rebuilding
//! an unchanged site writes nothing.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use glaze_config::OgImageConfig;
//! use glaze_og::{OgImageGenerator, OgImageSetting, OgRequest, OgResources, SvgCardRenderer};
//! use glaze_store::FileStore;
//!
//! let config = OgImageConfig::default();
//! let resources = OgResources::load(&config)?;
//! let store = Arc::new(FileStore::new(config.output_dir.clone()));
//! let generator =
//!     OgImageGenerator::new(&config, store, Box::new(SvgCardRenderer::new(resources)));
//!
//! generator.ensure_fallback();
//! let outcome = generator.generate(&OgRequest {
//!     slug: "hello-world",
//!     title: "Hello, world",
//!     bg_type: None,
//!     og_image: &OgImageSetting::Auto,
//!     draft: false,
//!     redirect: None,
//! });
//! println!("{outcome:?}");
//! # Ok::<(), glaze_og::OgError>(())
//! ```

pub mod background;
mod error;
mod generator;
pub mod markup;
mod render;
mod resources;

pub use error::OgError;
pub use generator::{OgImageGenerator, OgImageSetting, OgOutcome, OgRequest, SkipReason};
pub use render::{Card, CardRenderer, SvgCardRenderer};
pub use resources::{Background, OgResources};

/// Card width in pixels.
pub const OG_WIDTH: u32 = 1200;
/// Card height in pixels.
pub const OG_HEIGHT: u32 = 630;
/// Store key of the site-wide fallback image.
pub const FALLBACK_KEY: &str = "og-image.png";
