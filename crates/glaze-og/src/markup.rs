//! SVG card composition.
//!
//! Layout: background over the whole card, brand mark on the left, author
//! line and wrapped title stacked to its right, vertically centered.

use std::fmt::Write;

use crate::background::procedural;
use crate::render::Card;
use crate::resources::{Background, OgResources};
use crate::{OG_HEIGHT, OG_WIDTH};

const PADDING_X: u32 = 72;
const MARK_SIZE: u32 = 120;
const GAP: u32 = 20;
const AUTHOR_SIZE: u32 = 34;
const AUTHOR_COLOR: &str = "#858585";
const TITLE_SIZE: u32 = 50;
const TITLE_LINE_HEIGHT: u32 = 80;
const TITLE_COLOR: &str = "#ffffff";
const STACK_GAP: u32 = 10;

/// Title width budget in narrow-character units.
const TITLE_LINE_UNITS: usize = 33;
const TITLE_MAX_LINES: usize = 3;

/// Escape text for SVG content and attribute values.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Compose the full card as a standalone SVG document.
#[must_use]
pub fn card_svg(resources: &OgResources, card: &Card<'_>) -> String {
    let lines = wrap_title(card.title, TITLE_LINE_UNITS, TITLE_MAX_LINES);
    let line_count = u32::try_from(lines.len()).unwrap_or(1);

    let stack_height = AUTHOR_SIZE + STACK_GAP + TITLE_LINE_HEIGHT * line_count;
    let top = OG_HEIGHT.saturating_sub(stack_height) / 2;
    let text_x = PADDING_X + MARK_SIZE + GAP;

    let mut svg = String::with_capacity(16 * 1024);
    write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{OG_WIDTH}" height="{OG_HEIGHT}" viewBox="0 0 {OG_WIDTH} {OG_HEIGHT}" font-family="{}">"#,
        escape_xml(resources.font_family())
    )
    .unwrap();

    match resources.background(card.bg_type) {
        Background::Procedural(bg_type) => svg.push_str(&procedural(bg_type)),
        Background::Image(uri) => write!(
            svg,
            r#"<image href="{uri}" x="0" y="0" width="{OG_WIDTH}" height="{OG_HEIGHT}" preserveAspectRatio="xMidYMid slice"/>"#
        )
        .unwrap(),
    }

    write!(
        svg,
        r#"<image href="{}" x="{PADDING_X}" y="{top}" width="{MARK_SIZE}" height="{MARK_SIZE}"/>"#,
        resources.brand_mark()
    )
    .unwrap();

    write!(
        svg,
        r#"<text x="{text_x}" y="{}" font-size="{AUTHOR_SIZE}" fill="{AUTHOR_COLOR}">{}</text>"#,
        top + AUTHOR_SIZE,
        escape_xml(card.author)
    )
    .unwrap();

    let title_top = top + AUTHOR_SIZE + STACK_GAP;
    write!(
        svg,
        r#"<text font-size="{TITLE_SIZE}" fill="{TITLE_COLOR}">"#
    )
    .unwrap();
    for (i, line) in (0_u32..).zip(&lines) {
        // Baseline sits where a centered line box would put it.
        let baseline = title_top + TITLE_LINE_HEIGHT * i + (TITLE_LINE_HEIGHT + TITLE_SIZE) / 2;
        write!(
            svg,
            r#"<tspan x="{text_x}" y="{baseline}">{}</tspan>"#,
            escape_xml(line)
        )
        .unwrap();
    }
    svg.push_str("</text></svg>");
    svg
}

/// Break `title` into at most `max_lines` lines of `max_units` width.
///
/// Wide (CJK) characters count as two units and may break anywhere; other
/// text breaks at whitespace, and words longer than a line are split.
/// Overflow is cut and marked with an ellipsis.
#[must_use]
pub fn wrap_title(title: &str, max_units: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut width = 0;

    for token in tokens(title) {
        let token_width: usize = token.chars().map(char_units).sum();
        let needs_space = !current.is_empty() && !is_wide_token(token);
        let extra = usize::from(needs_space);

        if width + extra + token_width <= max_units {
            if needs_space {
                current.push(' ');
            }
            current.push_str(token);
            width += extra + token_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            width = 0;
        }
        for c in token.chars() {
            let w = char_units(c);
            if width + w > max_units {
                lines.push(std::mem::take(&mut current));
                width = 0;
            }
            current.push(c);
            width += w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while last.chars().map(char_units).sum::<usize>() + 1 > max_units {
                last.pop();
            }
            last.push('…');
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Whitespace-separated words, with each wide character as its own token.
fn tokens(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for word in s.split_whitespace() {
        let mut start = 0;
        for (i, c) in word.char_indices() {
            if is_wide(c) {
                if start < i {
                    out.push(&word[start..i]);
                }
                out.push(&word[i..i + c.len_utf8()]);
                start = i + c.len_utf8();
            }
        }
        if start < word.len() {
            out.push(&word[start..]);
        }
    }
    out
}

fn is_wide_token(token: &str) -> bool {
    token.chars().next().is_some_and(is_wide)
}

fn char_units(c: char) -> usize {
    if is_wide(c) { 2 } else { 1 }
}

fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{11FF}'
        | '\u{2E80}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FF60}'
        | '\u{20000}'..='\u{2FA1F}')
}
