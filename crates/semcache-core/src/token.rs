// Word-run tokenization

use std::str::CharIndices;

use crate::character::is_token_char;

/// Iterator over the maximal `[a-zA-Z0-9]+` runs of a text.
///
/// Produced by [`word_runs`]. Runs are borrowed from the input and yielded
/// left to right, without case normalization.
pub struct WordRuns<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
}

/// Split `text` into maximal runs of ASCII letters and digits.
///
/// Everything else (whitespace, punctuation, non-ASCII letters) separates
/// runs and is discarded.
pub fn word_runs(text: &str) -> WordRuns<'_> {
    WordRuns {
        text,
        chars: text.char_indices(),
    }
}

impl<'a> Iterator for WordRuns<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        // Skip separators up to the first token character.
        let start = loop {
            let (byte_pos, c) = self.chars.next()?;
            if is_token_char(c) {
                break byte_pos;
            }
        };

        // Token characters are single-byte, so the run ends at the first
        // separator's byte offset (or at the end of the text).
        for (byte_pos, c) in self.chars.by_ref() {
            if !is_token_char(c) {
                return Some(&self.text[start..byte_pos]);
            }
        }
        Some(&self.text[start..])
    }
}
