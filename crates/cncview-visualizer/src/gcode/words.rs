//! G-code line lexer
//!
//! Splits one source line into letter/value words. The lexer is lenient:
//! comments are stripped, compact (`G1X10Y5`) and lowercase forms are
//! accepted, and a value that does not parse as a finite number is kept as
//! a word with no value so the caller can skip just that word.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// A single address word, e.g. `X10.5` or `G1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Word {
    /// Uppercased address letter
    pub letter: char,
    /// Parsed numeric value, `None` when the number was missing or malformed
    pub value: Option<f64>,
}

impl Word {
    pub fn new(letter: char, value: f64) -> Self {
        Self {
            letter,
            value: Some(value),
        }
    }

    /// Value scaled by ten and rounded, so `G92.1` becomes `921` and `G01`
    /// becomes `10`
    pub fn code(&self) -> Option<i64> {
        self.value.map(|v| (v * 10.0).round() as i64)
    }
}

/// Remove `;` comments and `( ... )` comments from a line.
///
/// An unterminated `(` comments out the rest of the line.
pub fn strip_comments(line: &str) -> Cow<'_, str> {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COMMENT_REGEX
        .get_or_init(|| Regex::new(r"\([^)]*\)?|;.*").expect("invalid regex pattern"));
    regex.replace_all(line, " ")
}

/// True when the line carries nothing once comments and whitespace are gone
pub fn is_blank(stripped: &str) -> bool {
    stripped.trim().is_empty()
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-')
}

/// Tokenize an already comment-stripped line into words.
///
/// Characters that cannot start a word (`%`, stray punctuation) are skipped.
/// A `*` starts a checksum and ends the line.
pub fn parse_words(line: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if ch == '*' {
            break;
        }
        if !ch.is_ascii_alphabetic() {
            continue;
        }
        let letter = ch.to_ascii_uppercase();

        while matches!(chars.peek(), Some((_, ' ' | '\t'))) {
            chars.next();
        }

        let start = chars.peek().map_or(line.len(), |(idx, _)| *idx);
        let mut end = start;
        while let Some(&(idx, c)) = chars.peek() {
            if !is_number_char(c) {
                break;
            }
            end = idx + c.len_utf8();
            chars.next();
        }

        let value = line[start..end]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite());
        words.push(Word { letter, value });
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_semicolon_comment() {
        assert_eq!(strip_comments("G1 X10 ; move").trim(), "G1 X10");
        assert!(is_blank(&strip_comments("; only a comment")));
    }

    #[test]
    fn test_strip_paren_comments() {
        let stripped = strip_comments("G1 (inline) X10 (tail)");
        assert_eq!(parse_words(&stripped), vec![Word::new('G', 1.0), Word::new('X', 10.0)]);
        assert!(is_blank(&strip_comments("(unterminated comment G1 X5")));
    }

    #[test]
    fn test_compact_and_lowercase_words() {
        let words = parse_words("g1x10Y-2.5z+.5");
        assert_eq!(
            words,
            vec![
                Word::new('G', 1.0),
                Word::new('X', 10.0),
                Word::new('Y', -2.5),
                Word::new('Z', 0.5),
            ]
        );
    }

    #[test]
    fn test_malformed_value_kept_without_value() {
        let words = parse_words("G1 X1.2.3 Y4");
        assert_eq!(words.len(), 3);
        assert_eq!(words[1], Word { letter: 'X', value: None });
        assert_eq!(words[2], Word::new('Y', 4.0));

        let words = parse_words("G1 X Y4");
        assert_eq!(words[1].value, None);
        assert_eq!(words[2], Word::new('Y', 4.0));
    }

    #[test]
    fn test_space_between_letter_and_value() {
        assert_eq!(parse_words("X 12"), vec![Word::new('X', 12.0)]);
    }

    #[test]
    fn test_delimiters_and_checksums() {
        assert!(parse_words("%").is_empty());
        assert_eq!(
            parse_words("N10 G0 X1*57"),
            vec![Word::new('N', 10.0), Word::new('G', 0.0), Word::new('X', 1.0)]
        );
    }

    #[test]
    fn test_word_code() {
        assert_eq!(Word::new('G', 92.1).code(), Some(921));
        assert_eq!(Word::new('G', 1.0).code(), Some(10));
        assert_eq!(Word { letter: 'G', value: None }.code(), None);
    }
}
