use std::path::PathBuf;

use glaze_markdown::directive::DirectiveError;

/// Errors raised while building a document or the site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Front matter is unterminated or not valid YAML for the metadata record.
    #[error("invalid front matter: {0}")]
    FrontMatter(String),
    /// A directive failed validation.
    #[error(transparent)]
    Directive(#[from] DirectiveError),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize metadata: {0}")]
    Json(#[from] serde_json::Error),
    /// OG resources could not be loaded.
    #[error(transparent)]
    Og(#[from] glaze_og::OgError),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
