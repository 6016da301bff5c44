//! Per-document transform: front matter, directives, reading time, HTML.

use glaze_config::Config;
use glaze_directives::sugar_registry;
use glaze_markdown::directive::DirectiveRegistry;
use glaze_markdown::{Node, ParseWarning, parse_markdown, render_html};

use crate::frontmatter::SourceDocument;
use crate::reading_time;
use crate::{Metadata, SiteError};

/// A document after every transform ran.
#[derive(Clone, Debug)]
pub struct ProcessedDocument {
    pub metadata: Metadata,
    pub html: String,
    pub warnings: Vec<ParseWarning>,
}

/// Transforms one markdown source at a time. Shared across threads.
pub struct Pipeline {
    registry: DirectiveRegistry,
    words_per_minute: u32,
}

impl Pipeline {
    #[must_use]
    pub fn new(registry: DirectiveRegistry, words_per_minute: u32) -> Self {
        Self {
            registry,
            words_per_minute,
        }
    }

    /// Pipeline with the built-in directives and configured settings.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            sugar_registry(&config.badge.default_color),
            config.reading_time.words_per_minute,
        )
    }

    /// Run every transform on `source`.
    pub fn process(&self, source: &str) -> Result<ProcessedDocument, SiteError> {
        let (mut metadata, tree, warnings) = self.resolve(source)?;
        reading_time::annotate(&mut metadata, &tree, self.words_per_minute);
        Ok(ProcessedDocument {
            metadata,
            html: render_html(&tree),
            warnings,
        })
    }

    /// Parse and resolve directives without rendering.
    pub fn check(&self, source: &str) -> Result<Vec<ParseWarning>, SiteError> {
        self.resolve(source).map(|(_, _, warnings)| warnings)
    }

    fn resolve(&self, source: &str) -> Result<(Metadata, Node, Vec<ParseWarning>), SiteError> {
        let document = SourceDocument::parse(source)?;
        let offset = document.body_line_offset;

        let parsed = parse_markdown(document.body);
        let tree = self
            .registry
            .resolve(parsed.root)
            .map_err(|e| e.with_line_offset(offset))?;
        let warnings = parsed
            .warnings
            .into_iter()
            .map(|w| w.with_line_offset(offset))
            .collect();

        Ok((document.metadata, tree, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glaze_markdown::directive::DirectiveError;
    use pretty_assertions::assert_eq;

    fn pipeline() -> Pipeline {
        Pipeline::new(sugar_registry("#bebfc5"), 200)
    }

    #[test]
    fn test_process() {
        let doc = pipeline()
            .process("---\ntitle: Hello\n---\nNew :badge-t{} here\n")
            .unwrap();

        assert_eq!(doc.metadata.title, "Hello");
        assert_eq!(doc.metadata.minutes_read, Some(1));
        assert!(doc.html.starts_with("<p>New <span class=\"sugar-badge\""));
        assert!(doc.html.contains(">TOOL</span>"));
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_error_line_is_file_relative() {
        let err = pipeline()
            .process("---\ntitle: x\n---\n\n::video{title=nothing}\n")
            .unwrap_err();

        let SiteError::Directive(err) = err else {
            panic!("expected directive error, got {err:?}");
        };
        assert!(matches!(err, DirectiveError::MissingAttribute { .. }));
        assert_eq!(err.location().position.map(|p| p.line), Some(5));
    }

    #[test]
    fn test_warning_line_is_file_relative() {
        let warnings = pipeline()
            .check("---\ntitle: x\n---\n:::image-div\n![a](a.png)\n")
            .unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 4);
    }

    #[test]
    fn test_existing_minutes_read_kept() {
        let doc = pipeline()
            .process("---\nminutesRead: 0\n---\nwords words words\n")
            .unwrap();
        assert_eq!(doc.metadata.minutes_read, Some(0));
    }

    #[test]
    fn test_front_matter_error() {
        let err = pipeline().process("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, SiteError::FrontMatter(_)));
    }
}
