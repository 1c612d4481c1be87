// Token frequency maps

use hashbrown::HashMap;
use semcache_core::token::word_runs;

/// Occurrence count of every token in one text.
///
/// Tokens are maximal `[a-zA-Z0-9]` runs, compared case-sensitively. The
/// total number of tokens is kept alongside the map so scoring does not
/// have to re-sum it for every candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    counts: HashMap<String, usize>,
    total: usize,
}

impl WordFrequency {
    /// Tokenize `text` and count every token.
    pub fn from_text(text: &str) -> Self {
        let mut freq = Self::default();
        for word in word_runs(text) {
            freq.add(word);
        }
        freq
    }

    /// Count one more occurrence of `token`.
    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
            }
        }
        self.total += 1;
    }

    /// Occurrences of `token`, or 0 if it never appears.
    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Total number of tokens (sum of all counts).
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(token, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(token, &count)| (token.as_str(), count))
    }
}

impl<'a> FromIterator<&'a str> for WordFrequency {
    fn from_iter<I: IntoIterator<Item = &'a str>>(tokens: I) -> Self {
        let mut freq = Self::default();
        for token in tokens {
            freq.add(token);
        }
        freq
    }
}

/// Build the token frequency map of `text`.
pub fn build_word_frequency_map(text: &str) -> WordFrequency {
    WordFrequency::from_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_repeated_words() {
        let freq = build_word_frequency_map("Hello World, Hello World.");
        assert_eq!(freq.get("Hello"), 2);
        assert_eq!(freq.get("World"), 2);
        assert_eq!(freq.len(), 2);
        assert_eq!(freq.total(), 4);
    }

    #[test]
    fn is_case_sensitive() {
        let freq = build_word_frequency_map("Rust rust RUST rust");
        assert_eq!(freq.get("rust"), 2);
        assert_eq!(freq.get("Rust"), 1);
        assert_eq!(freq.get("RUST"), 1);
        assert!(!freq.contains("rUST"));
    }

    #[test]
    fn empty_text_gives_empty_map() {
        let freq = build_word_frequency_map("");
        assert!(freq.is_empty());
        assert_eq!(freq.total(), 0);
        assert_eq!(freq, WordFrequency::default());
    }

    #[test]
    fn punctuation_only_text_gives_empty_map() {
        assert!(build_word_frequency_map("?! ... --").is_empty());
    }

    #[test]
    fn from_iterator_matches_from_text() {
        let collected: WordFrequency = ["how", "do", "i", "do"].into_iter().collect();
        assert_eq!(collected, WordFrequency::from_text("how do i do"));
    }

    #[test]
    fn iter_yields_every_token() {
        let freq = WordFrequency::from_text("a b a");
        let mut pairs: Vec<(&str, usize)> = freq.iter().collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![("a", 2), ("b", 1)]);
    }
}
