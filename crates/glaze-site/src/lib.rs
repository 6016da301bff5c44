//! Content build pipeline for glaze.
//!
//! This crate provides:
//! - [`Pipeline`]: per-document transform (front matter, directives,
//!   reading time, HTML)
//! - [`SiteBuilder`]: parallel build of a content directory, including OG
//!   preview images
//! - [`Metadata`]: the typed front-matter record written next to each page
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use glaze_config::Config;
//! use glaze_site::SiteBuilder;
//!
//! let config = Config::load(None, None)?;
//! let report = SiteBuilder::from_config(&config)?.build();
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.relative.display(), failure.error);
//! }
//! # Ok(())
//! # }
//! ```

mod build;
mod error;
mod frontmatter;
mod pipeline;
pub mod reading_time;
mod scanner;

pub use build::{BuildReport, CheckReport, DocumentFailure, DocumentReport, SiteBuilder};
pub use error::SiteError;
pub use frontmatter::{Metadata, SourceDocument};
pub use pipeline::{Pipeline, ProcessedDocument};
pub use scanner::{SourceFile, scan};
