//! Directive resolution errors.

use std::fmt;

use crate::tree::{DirectiveKind, Position};

/// Where a failing directive was written: its form and source position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub kind: DirectiveKind,
    pub position: Option<Position>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} directive at {position}", self.kind),
            None => write!(f, "{} directive", self.kind),
        }
    }
}

/// A directive that cannot be resolved. Fatal for the current document.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// Directive written in a form its variant does not accept.
    #[error("`{name}` must be used as a {expected} directive ({at})")]
    Arity {
        name: String,
        expected: &'static str,
        at: Location,
    },
    /// Required attribute absent.
    #[error("`{name}` is missing {message} ({at})")]
    MissingAttribute {
        name: String,
        message: String,
        at: Location,
    },
    /// Attribute present but unusable.
    #[error("`{name}`: {message} ({at})")]
    InvalidAttribute {
        name: String,
        message: String,
        at: Location,
    },
    /// `image-figure` with neither a label nor an image alt text.
    #[error("`{name}` needs a caption: {message} ({at})")]
    UnresolvableCaption {
        name: String,
        message: String,
        at: Location,
    },
}

impl DirectiveError {
    /// Name of the directive that failed.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Arity { name, .. }
            | Self::MissingAttribute { name, .. }
            | Self::InvalidAttribute { name, .. }
            | Self::UnresolvableCaption { name, .. } => name,
        }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::Arity { at, .. }
            | Self::MissingAttribute { at, .. }
            | Self::InvalidAttribute { at, .. }
            | Self::UnresolvableCaption { at, .. } => *at,
        }
    }

    /// Shift the reported line by `lines`, for sources parsed without a
    /// leading header such as front matter.
    #[must_use]
    pub fn with_line_offset(mut self, lines: usize) -> Self {
        let (Self::Arity { at, .. }
        | Self::MissingAttribute { at, .. }
        | Self::InvalidAttribute { at, .. }
        | Self::UnresolvableCaption { at, .. }) = &mut self;
        if let Some(position) = &mut at.position {
            position.line += lines;
        }
        self
    }
}
