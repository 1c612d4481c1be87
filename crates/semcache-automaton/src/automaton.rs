// Built keyword automaton: whole-word search and introspection

use std::collections::BTreeSet;

use semcache_core::character::{fold_case, fold_case_string, is_word_char};

use crate::node::{Keyword, Node, NodeId};
use crate::vocabulary::TECHNOLOGY_KEYWORDS;
use crate::{Alphabet, AutomatonBuilder, AutomatonError};

/// A whole-word keyword occurrence, in character offsets of the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<'a> {
    /// The matched keyword, lower-cased as stored in the automaton.
    pub keyword: &'a str,
    /// Offset of the first character of the occurrence.
    pub start: usize,
    /// Offset one past the last character of the occurrence.
    pub end: usize,
}

/// Immutable Aho-Corasick automaton over a fixed keyword vocabulary.
///
/// Built by [`AutomatonBuilder::build`]. Searching takes `&self` and never
/// mutates the automaton, so one instance can serve concurrent searches.
#[derive(Debug, Clone)]
pub struct KeywordAutomaton {
    alphabet: Alphabet,
    nodes: Vec<Node>,
    keywords: Vec<Keyword>,
}

impl KeywordAutomaton {
    pub(crate) fn from_parts(alphabet: Alphabet, nodes: Vec<Node>, keywords: Vec<Keyword>) -> Self {
        Self {
            alphabet,
            nodes,
            keywords,
        }
    }

    /// Start an empty ASCII builder.
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::new()
    }

    /// Build an automaton over the built-in technology vocabulary.
    pub fn technology() -> Result<Self, AutomatonError> {
        crate::build_automaton(TECHNOLOGY_KEYWORDS.iter())
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Return the distinct keywords that occur as whole words in `text`.
    ///
    /// Matching is case-insensitive. Characters outside the automaton's
    /// alphabet can never be part of a match; they reset the automaton to
    /// the root and still act as ordinary text for boundary checks.
    pub fn search(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        self.scan(text, |keyword, _, _| {
            if !found.contains(keyword.text.as_str()) {
                found.insert(keyword.text.clone());
            }
        });
        found
    }

    /// Like [`search`](Self::search), but rejects text containing characters
    /// outside the automaton's alphabet.
    pub fn search_strict(&self, text: &str) -> Result<BTreeSet<String>, AutomatonError> {
        self.alphabet.check(text)?;
        Ok(self.search(text))
    }

    /// Return every whole-word occurrence in `text`, ordered by end offset.
    ///
    /// Occurrences ending at the same offset are ordered longest first.
    pub fn find_matches(&self, text: &str) -> Vec<KeywordMatch<'_>> {
        let mut matches = Vec::new();
        self.scan(text, |keyword, start, end| {
            matches.push(KeywordMatch {
                keyword: &keyword.text,
                start,
                end,
            });
        });
        matches
    }

    /// Run the automaton over `text` and report every accepted whole-word
    /// occurrence as `(keyword, start, end)`.
    ///
    /// The alphabet is checked on the original character: folding may map a
    /// character outside the alphabet (KELVIN SIGN) onto one inside it (`k`).
    fn scan<'a, F>(&'a self, text: &str, mut on_match: F)
    where
        F: FnMut(&'a Keyword, usize, usize),
    {
        let folded = fold_case(text);
        let mut state = NodeId::ROOT;
        for (i, original) in text.chars().enumerate() {
            if !self.alphabet.contains(original) {
                state = NodeId::ROOT;
                continue;
            }
            state = self.next_state(state, folded[i]);

            for &id in &self.nodes[state.index()].output {
                let keyword = &self.keywords[id.0 as usize];
                // Every keyword in the output set is a suffix of the i + 1
                // characters consumed so far.
                let start = i + 1 - keyword.char_len;
                let end = i + 1;
                if is_whole_word(&folded, start, end) {
                    on_match(keyword, start, end);
                }
            }
        }
    }

    /// One automaton transition on `ch`, following failure links on mismatch.
    fn next_state(&self, mut state: NodeId, ch: char) -> NodeId {
        loop {
            let node = &self.nodes[state.index()];
            if let Some(next) = node.child(ch) {
                return next;
            }
            match node.failure_link {
                Some(fallback) => state = fallback,
                None => return NodeId::ROOT,
            }
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of trie nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct keywords.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// The vocabulary, lower-cased, in insertion order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords.iter().map(|k| k.text.as_str())
    }

    /// The child of `node` on character `ch`, if any.
    pub fn child(&self, node: NodeId, ch: char) -> Option<NodeId> {
        self.nodes.get(node.index())?.child(ch)
    }

    /// The failure target of `node`. `None` for the root.
    pub fn failure_link(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index())?.failure_link
    }

    /// Keywords recognised when `node` is reached, including inherited ones.
    pub fn output(&self, node: NodeId) -> Vec<&str> {
        self.nodes
            .get(node.index())
            .map(|n| {
                n.output
                    .iter()
                    .map(|id| self.keywords[id.0 as usize].text.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_end_of_word(&self, node: NodeId) -> bool {
        self.nodes
            .get(node.index())
            .is_some_and(|n| n.end_of_word)
    }

    /// Follow trie edges (not failure links) from the root along `path`.
    pub fn walk(&self, path: &str) -> Option<NodeId> {
        path.chars()
            .try_fold(NodeId::ROOT, |node, ch| self.child(node, ch))
    }

    /// Check whether `word` is an exact vocabulary entry (case-insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.walk(&fold_case_string(word))
            .is_some_and(|node| self.is_end_of_word(node))
    }
}

/// Check that `text[start..end]` is not glued to a letter or digit on
/// either side. String edges and symbols count as boundaries.
fn is_whole_word(text: &[char], start: usize, end: usize) -> bool {
    if start > 0 && is_word_char(text[start - 1]) {
        return false;
    }
    if end < text.len() && is_word_char(text[end]) {
        return false;
    }
    true
}
