//! Content directory build.
//!
//! Scans the source directory, renders the fallback OG image once, then
//! processes documents in parallel. Each document produces an HTML fragment
//! and a JSON metadata file mirroring its source path:
//!
//! ```text
//! src/content/blog/post.md -> dist/blog/post.html
//!                             dist/blog/post.json
//!                             public/og-images/post.png
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glaze_config::Config;
use glaze_markdown::ParseWarning;
use glaze_og::{OgImageGenerator, OgImageSetting, OgOutcome, OgRequest, OgResources, SvgCardRenderer};
use glaze_store::FileStore;
use rayon::prelude::*;

use crate::scanner::{SourceFile, scan};
use crate::{Metadata, Pipeline, SiteError};

/// Outcome of one successfully built document.
#[derive(Debug)]
pub struct DocumentReport {
    pub relative: PathBuf,
    pub metadata: Metadata,
    /// `None` when OG generation is disabled for the build.
    pub og: Option<OgOutcome>,
    pub warnings: Vec<ParseWarning>,
}

/// A document that failed to build.
#[derive(Debug)]
pub struct DocumentFailure {
    pub relative: PathBuf,
    pub error: SiteError,
}

/// Summary of a full build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub fallback: Option<OgOutcome>,
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<DocumentFailure>,
}

impl BuildReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of OG images rendered during this build, fallback included.
    #[must_use]
    pub fn images_generated(&self) -> usize {
        self.fallback
            .iter()
            .chain(self.documents.iter().filter_map(|d| d.og.as_ref()))
            .filter(|o| matches!(o, OgOutcome::Generated { .. }))
            .count()
    }

    /// Number of OG images that failed to render.
    #[must_use]
    pub fn images_failed(&self) -> usize {
        self.fallback
            .iter()
            .chain(self.documents.iter().filter_map(|d| d.og.as_ref()))
            .filter(|o| matches!(o, OgOutcome::Failed { .. }))
            .count()
    }
}

/// Summary of a directive check.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub failures: Vec<DocumentFailure>,
    pub warnings: Vec<(PathBuf, ParseWarning)>,
}

impl CheckReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds every document under a source directory.
pub struct SiteBuilder {
    source_dir: PathBuf,
    output_dir: PathBuf,
    pipeline: Pipeline,
    og: Option<OgImageGenerator>,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(source_dir: PathBuf, output_dir: PathBuf, pipeline: Pipeline) -> Self {
        Self {
            source_dir,
            output_dir,
            pipeline,
            og: None,
        }
    }

    /// Generate OG images with `generator` during [`build`](Self::build).
    #[must_use]
    pub fn with_og(mut self, generator: OgImageGenerator) -> Self {
        self.og = Some(generator);
        self
    }

    /// Builder wired from configuration.
    ///
    /// Loads OG resources up front when OG images are enabled, so a missing
    /// font or background fails here rather than per document.
    pub fn from_config(config: &Config) -> Result<Self, SiteError> {
        let content = &config.content_resolved;
        let builder = Self::new(
            content.source_dir.clone(),
            content.output_dir.clone(),
            Pipeline::from_config(config),
        );

        let og = &config.og_image_resolved;
        if !og.enabled {
            return Ok(builder);
        }
        let resources = OgResources::load(og)?;
        let store = Arc::new(FileStore::new(og.output_dir.clone()));
        let renderer = Box::new(SvgCardRenderer::new(resources));
        Ok(builder.with_og(OgImageGenerator::new(og, store, renderer)))
    }

    /// Build every document. Per-document failures are collected, not fatal.
    #[must_use]
    pub fn build(&self) -> BuildReport {
        let files = scan(&self.source_dir);
        tracing::info!(
            source = %self.source_dir.display(),
            documents = files.len(),
            "Building content"
        );

        let fallback = self.og.as_ref().map(OgImageGenerator::ensure_fallback);

        let results: Vec<_> = files
            .par_iter()
            .map(|file| (file, self.build_one(file)))
            .collect();

        let mut report = BuildReport {
            fallback,
            ..BuildReport::default()
        };
        for (file, result) in results {
            match result {
                Ok(document) => report.documents.push(document),
                Err(error) => {
                    tracing::error!(path = %file.relative.display(), error = %error, "Document failed");
                    report.failures.push(DocumentFailure {
                        relative: file.relative.clone(),
                        error,
                    });
                }
            }
        }
        report
    }

    /// Parse and resolve directives in every document without writing.
    #[must_use]
    pub fn check(&self) -> CheckReport {
        let files = scan(&self.source_dir);
        let results: Vec<_> = files
            .par_iter()
            .map(|file| (file, self.check_one(file)))
            .collect();

        let mut report = CheckReport {
            checked: files.len(),
            ..CheckReport::default()
        };
        for (file, result) in results {
            match result {
                Ok(warnings) => report.warnings.extend(
                    warnings
                        .into_iter()
                        .map(|w| (file.relative.clone(), w)),
                ),
                Err(error) => report.failures.push(DocumentFailure {
                    relative: file.relative.clone(),
                    error,
                }),
            }
        }
        report
    }

    fn build_one(&self, file: &SourceFile) -> Result<DocumentReport, SiteError> {
        let source = fs::read_to_string(&file.path).map_err(|e| SiteError::io(&file.path, e))?;
        let mut document = self.pipeline.process(&source)?;
        for warning in &document.warnings {
            tracing::warn!(path = %file.relative.display(), warning = %warning, "Directive syntax warning");
        }

        let og = self.og.as_ref().map(|generator| {
            let metadata = &document.metadata;
            generator.generate(&OgRequest {
                slug: &file.slug,
                title: &metadata.title,
                bg_type: metadata.bg_type,
                og_image: &metadata.og_image,
                draft: metadata.draft,
                redirect: metadata.redirect.as_deref(),
            })
        });
        if let Some(key) = og.as_ref().and_then(OgOutcome::artifact) {
            document.metadata.og_image = OgImageSetting::File(key.to_owned());
        }

        let html_path = self.output_path(&file.relative, "html");
        write_file(&html_path, document.html.as_bytes())?;
        let json = serde_json::to_vec_pretty(&document.metadata)?;
        write_file(&self.output_path(&file.relative, "json"), &json)?;
        tracing::debug!(path = %html_path.display(), "Wrote document");

        Ok(DocumentReport {
            relative: file.relative.clone(),
            metadata: document.metadata,
            og,
            warnings: document.warnings,
        })
    }

    fn check_one(&self, file: &SourceFile) -> Result<Vec<ParseWarning>, SiteError> {
        let source = fs::read_to_string(&file.path).map_err(|e| SiteError::io(&file.path, e))?;
        self.pipeline.check(&source)
    }

    fn output_path(&self, relative: &Path, extension: &str) -> PathBuf {
        self.output_dir.join(relative).with_extension(extension)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| SiteError::io(path, e))
}
