//! Directive syntax parsing.
//!
//! Recognizes the generic directive syntax: `:name` inside text, `::name` on a
//! line of its own, and `:::name` ... `:::` around block content.

use super::DirectiveArgs;

/// A directive recognized on a whole line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DirectiveLine {
    /// Leaf directive: `::name[label]{attrs}`
    Leaf { name: String, args: DirectiveArgs },
    /// Container opening: `:::name[label]{attrs}`
    ContainerStart {
        name: String,
        args: DirectiveArgs,
        colon_count: usize,
    },
    /// Container closing: `:::`
    ContainerEnd { colon_count: usize },
}

/// A text directive found inside a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextDirective {
    pub name: String,
    pub args: DirectiveArgs,
    /// Byte range of the directive within the scanned text.
    pub start: usize,
    pub end: usize,
}

/// Check if a name is a valid directive name.
///
/// Names start with a letter and continue with alphanumerics, hyphens, and
/// underscores.
pub(crate) fn is_valid_directive_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

fn name_end(s: &str) -> usize {
    s.find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len())
}

/// Parse label from brackets: `[label]`.
///
/// Returns (label, `bytes_consumed`); `None` when there is no closed bracket.
fn parse_brackets(s: &str) -> (Option<String>, usize) {
    match find_closing(s, '[', ']') {
        Some(end) => (Some(s[1..end].to_owned()), end + 1),
        None => (None, 0),
    }
}

/// Parse attributes from braces: `{#id .class key="value"}`.
///
/// Returns (`attrs_str` without braces, `bytes_consumed`).
fn parse_braces(s: &str) -> (Option<String>, usize) {
    match find_closing(s, '{', '}') {
        Some(end) => (Some(s[1..end].to_owned()), end + 1),
        None => (None, 0),
    }
}

/// Index of the bracket matching the opener at the start of `s`.
fn find_closing(s: &str, open: char, close: char) -> Option<usize> {
    if !s.starts_with(open) {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Parse `name[label]{attrs}` at the start of `s`.
///
/// Returns the name, parsed arguments, whether any brackets or braces were
/// present, and the number of bytes consumed.
fn parse_tail(s: &str) -> Option<(String, DirectiveArgs, bool, usize)> {
    let end = name_end(s);
    let name = &s[..end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let mut pos = end;
    let (label, label_len) = parse_brackets(&s[pos..]);
    pos += label_len;
    let (attrs, attrs_len) = parse_braces(&s[pos..]);
    pos += attrs_len;

    let has_args = label.is_some() || attrs.is_some();
    let args = DirectiveArgs::parse(label.as_deref(), attrs.as_deref().unwrap_or(""));
    Some((name.to_owned(), args, has_args, pos))
}

/// Parse a whole line as a leaf or container directive.
///
/// Lines indented four or more spaces are code and never match. Returns
/// `None` if the line is not a directive line.
pub(crate) fn parse_directive_line(line: &str) -> Option<DirectiveLine> {
    let trimmed = line.trim_start();
    if line.len() - trimmed.len() >= 4 {
        return None;
    }
    let trimmed = trimmed.trim_end();

    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    if colon_count < 2 {
        return None;
    }
    let after_colons = &trimmed[colon_count..];

    if colon_count >= 3 {
        let after_colons = after_colons.trim_start();
        if after_colons.is_empty() {
            return Some(DirectiveLine::ContainerEnd { colon_count });
        }
        let (name, args, _, _) = parse_tail(after_colons)?;
        return Some(DirectiveLine::ContainerStart {
            name,
            args,
            colon_count,
        });
    }

    // Leaf directives must occupy the whole line.
    let (name, args, _, consumed) = parse_tail(after_colons)?;
    if consumed != after_colons.len() {
        return None;
    }
    Some(DirectiveLine::Leaf { name, args })
}

/// Find every text directive in `text`.
///
/// A text directive is a single colon, not preceded by a colon, a backslash,
/// or an alphanumeric character, followed by a name and at least one of
/// `[label]` or `{attrs}` on the same line. Times such as `10:30` and URLs
/// such as `https://` never match.
pub(crate) fn find_text_directives(text: &str) -> Vec<TextDirective> {
    let mut found = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find(':') {
        let start = search_from + offset;
        search_from = start + 1;

        let preceded_ok = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| c != ':' && c != '\\' && !c.is_alphanumeric());
        if !preceded_ok || text[start + 1..].starts_with(':') {
            continue;
        }

        if let Some((name, args, true, consumed)) = parse_tail(&text[start + 1..]) {
            let end = start + 1 + consumed;
            if text[start..end].contains('\n') {
                continue;
            }
            found.push(TextDirective {
                name,
                args,
                start,
                end,
            });
            search_from = end;
        }
    }

    found
}
