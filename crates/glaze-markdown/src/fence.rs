//! Code fence tracking for the line scanner.
//!
//! Directive lines inside fenced code blocks are literal code, so the scanner
//! needs to know when it is inside one.

/// An open code fence: the fence character and the opening run length.
#[derive(Debug, Clone, Copy)]
struct OpenFence {
    ch: char,
    len: usize,
}

/// Tracks code fence state during line-by-line scanning.
///
/// Fences use three or more backticks or tildes. A fence closes on a line
/// made of the same character, at least as long as the opener, followed only
/// by whitespace.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        // Four spaces of indentation make an indented code line, not a fence.
        if line.len() - trimmed.len() >= 4 && self.open.is_none() {
            return false;
        }
        let Some((ch, len)) = fence_run(trimmed) else {
            return false;
        };

        match self.open {
            Some(open) => {
                let closes =
                    ch == open.ch && len >= open.len && trimmed[len..].trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                // Backtick fences cannot carry backticks in their info string.
                if ch == '`' && trimmed[len..].contains('`') {
                    return false;
                }
                self.open = Some(OpenFence { ch, len });
                true
            }
        }
    }
}

/// Leading run of three or more backticks or tildes, as (char, byte length).
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let ch = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}
