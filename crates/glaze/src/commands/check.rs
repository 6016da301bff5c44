//! `glaze check` command implementation.

use std::path::PathBuf;

use clap::Args;
use glaze_config::{CliSettings, Config};
use glaze_site::SiteBuilder;

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover glaze.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Validate every document's directives without writing output.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            og_enabled: Some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let report = SiteBuilder::from_config(&config)?.check();

        for (path, warning) in &report.warnings {
            output.file(Tone::Warning, path, warning);
        }
        for failure in &report.failures {
            output.file(Tone::Error, &failure.relative, &failure.error);
        }

        if !report.is_success() {
            return Err(CliError::DocumentsFailed {
                count: report.failures.len(),
            });
        }
        output.line(
            Tone::Success,
            format_args!("Checked {} document(s)", report.checked),
        );
        Ok(())
    }
}
