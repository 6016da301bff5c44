//! Terminal reporting for build and check runs.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Color of a report line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Success,
    Warning,
    Error,
    Muted,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Muted => Style::new().dim(),
        }
    }
}

/// Writes report lines to stderr.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn line(&self, tone: Tone, msg: impl Display) {
        let _ = self.term.write_line(&tone.style().apply_to(msg).to_string());
    }

    /// A line about one source file, prefixed with its path.
    pub(crate) fn file(&self, tone: Tone, path: &Path, msg: impl Display) {
        self.line(tone, format_args!("{}: {msg}", path.display()));
    }
}
