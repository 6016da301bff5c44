//! CLI error types.

use glaze_config::ConfigError;
use glaze_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{count} document(s) failed")]
    DocumentsFailed { count: usize },
}
