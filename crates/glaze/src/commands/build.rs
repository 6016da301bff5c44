//! `glaze build` command implementation.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use glaze_config::{CliSettings, Config};
use glaze_og::OgOutcome;
use glaze_site::{BuildReport, SiteBuilder};

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover glaze.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for HTML and metadata (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output directory for OG images (overrides config).
    #[arg(long, env = "GLAZE_OG_DIR")]
    og_dir: Option<PathBuf>,

    /// Skip OG image generation.
    #[arg(long)]
    no_og: bool,

    /// Enable verbose output (per-document logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            og_output_dir: self.og_dir,
            og_enabled: self.no_og.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let content = &config.content_resolved;
        output.line(
            Tone::Plain,
            format_args!("Source: {}", content.source_dir.display()),
        );
        output.line(
            Tone::Plain,
            format_args!("Output: {}", content.output_dir.display()),
        );
        if config.og_image_resolved.enabled {
            output.line(
                Tone::Plain,
                format_args!("OG images: {}", config.og_image_resolved.output_dir.display()),
            );
        }

        let started = Instant::now();
        let report = SiteBuilder::from_config(&config)?.build();
        print_report(&output, &report);

        if !report.is_success() {
            return Err(CliError::DocumentsFailed {
                count: report.failures.len(),
            });
        }
        output.line(
            Tone::Success,
            format_args!(
                "Built {} document(s) in {:.2?}",
                report.documents.len(),
                started.elapsed()
            ),
        );
        Ok(())
    }
}

fn print_report(output: &Output, report: &BuildReport) {
    if let Some(OgOutcome::Failed { key, error }) = &report.fallback {
        output.line(Tone::Warning, format_args!("OG image {key} failed: {error}"));
    }

    for document in &report.documents {
        for warning in &document.warnings {
            output.file(Tone::Warning, &document.relative, warning);
        }
        if let Some(OgOutcome::Failed { key, error }) = &document.og {
            output.file(
                Tone::Warning,
                &document.relative,
                format_args!("OG image {key} failed: {error}"),
            );
        }
    }

    for failure in &report.failures {
        output.file(Tone::Error, &failure.relative, &failure.error);
    }

    let generated = report.images_generated();
    let failed = report.images_failed();
    if generated > 0 || failed > 0 {
        output.line(
            Tone::Muted,
            format_args!("OG images: {generated} generated, {failed} failed"),
        );
    }
}
