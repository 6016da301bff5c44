//! Reading-time estimate written to `minutesRead`.

use glaze_markdown::{Node, to_plain_text};

use crate::Metadata;

/// Count words in `text`.
///
/// Each CJK ideograph, kana, or hangul syllable is one word; any other run
/// of non-whitespace characters is one word.
#[must_use]
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;
    for c in text.chars() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            count += 1;
            in_word = true;
        }
    }
    count
}

/// Minutes to read `words`, rounded, never below one.
#[must_use]
pub fn estimate_minutes(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    // Round half up in integer arithmetic.
    let minutes = (words * 2 + wpm) / (wpm * 2);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

/// Write `minutesRead` into `metadata` unless it is already set.
///
/// Returns whether the field was written.
pub fn annotate(metadata: &mut Metadata, tree: &Node, words_per_minute: u32) -> bool {
    if metadata.minutes_read.is_some() {
        return false;
    }
    let words = count_words(&to_plain_text(tree));
    let minutes = estimate_minutes(words, words_per_minute);
    tracing::debug!(words, minutes, "Estimated reading time");
    metadata.minutes_read = Some(minutes);
    true
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'     // hiragana, katakana
        | '\u{3400}'..='\u{4DBF}'   // CJK extension A
        | '\u{4E00}'..='\u{9FFF}'   // CJK unified ideographs
        | '\u{AC00}'..='\u{D7AF}'   // hangul syllables
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FA1F}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use glaze_markdown::parse_markdown;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("hello  world\nagain"), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn test_count_cjk() {
        assert_eq!(count_words("你好世界"), 4);
        assert_eq!(count_words("Rust入门 guide"), 4);
        assert_eq!(count_words("ひらがな"), 4);
        assert_eq!(count_words("한국어"), 3);
    }

    #[test]
    fn test_estimate_minutes() {
        assert_eq!(estimate_minutes(0, 200), 1);
        assert_eq!(estimate_minutes(299, 200), 1);
        assert_eq!(estimate_minutes(300, 200), 2);
        assert_eq!(estimate_minutes(1000, 200), 5);
        assert_eq!(estimate_minutes(1000, 100), 10);
    }

    #[test]
    fn test_annotate_writes_once() {
        let text = "word ".repeat(450);
        let tree = parse_markdown(&text).root;
        let mut metadata = Metadata::default();

        assert!(annotate(&mut metadata, &tree, 200));
        assert_eq!(metadata.minutes_read, Some(2));

        // Second run leaves the value alone.
        assert!(!annotate(&mut metadata, &tree, 10));
        assert_eq!(metadata.minutes_read, Some(2));
    }

    #[test]
    fn test_annotate_preserves_zero() {
        let tree = parse_markdown("some words").root;
        let mut metadata = Metadata {
            minutes_read: Some(0),
            ..Metadata::default()
        };

        assert!(!annotate(&mut metadata, &tree, 200));
        assert_eq!(metadata.minutes_read, Some(0));
    }

    #[test]
    fn test_code_counts_as_words() {
        let tree = parse_markdown("Intro\n\n```\nlet x = 1;\n```").root;
        assert_eq!(count_words(&to_plain_text(&tree)), 5);
    }
}
