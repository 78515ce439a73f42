// src/extract/title.rs
//! Title derivation for records whose source gives no title.

const TITLE_WORDS: usize = 10;
const TITLE_MAX_CHARS: usize = 80;
const TITLE_CUT_CHARS: usize = 77;

/// First ten words of `text`, single-spaced; over 80 chars becomes 77 + "...".
pub fn derive_title(text: &str) -> String {
    let head = text
        .split_whitespace()
        .take(TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    if head.chars().count() > TITLE_MAX_CHARS {
        let mut cut: String = head.chars().take(TITLE_CUT_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept_whole() {
        assert_eq!(derive_title("  Leaving   YouTube\tfor good "), "Leaving YouTube for good");
    }

    #[test]
    fn only_ten_words_survive() {
        let t = derive_title("a b c d e f g h i j k l m");
        assert_eq!(t, "a b c d e f g h i j");
    }

    #[test]
    fn long_head_is_truncated_with_ellipsis() {
        let text = "abcdefghij ".repeat(15);
        let t = derive_title(&text);
        assert_eq!(t.chars().count(), 80);
        assert!(t.ends_with("..."));
    }

    #[test]
    fn multibyte_text_truncates_on_char_boundary() {
        let text = "čšřžýáíéůú ".repeat(12);
        let t = derive_title(&text);
        assert_eq!(t.chars().count(), 80);
    }
}
