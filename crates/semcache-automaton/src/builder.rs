// Keyword insertion and failure-link construction

use std::collections::VecDeque;

use hashbrown::HashMap;
use semcache_core::character::fold_case_string;

use crate::automaton::KeywordAutomaton;
use crate::node::{Keyword, KeywordId, Node, NodeId};
use crate::{Alphabet, AutomatonError};

/// Mutable trie under construction.
///
/// A builder only supports insertion. Calling [`build`](Self::build) runs the
/// failure-link pass once and turns the trie into a [`KeywordAutomaton`];
/// output sets are never observable before that pass has completed.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    alphabet: Alphabet,
    nodes: Vec<Node>,
    keywords: Vec<Keyword>,
    /// Terminal node of each inserted keyword, for duplicate detection.
    terminals: HashMap<String, NodeId>,
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatonBuilder {
    /// Create an empty builder accepting ASCII keywords.
    pub fn new() -> Self {
        Self::with_alphabet(Alphabet::Ascii)
    }

    /// Create an empty builder accepting keywords from `alphabet`.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            nodes: vec![Node::default()],
            keywords: Vec::new(),
            terminals: HashMap::new(),
        }
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Number of distinct keywords inserted so far.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Number of trie nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a single keyword.
    ///
    /// The keyword is lower-cased before insertion. Inserting a keyword that
    /// is already present leaves the trie unchanged. On error nothing is
    /// inserted.
    pub fn insert(&mut self, word: &str) -> Result<(), AutomatonError> {
        if word.is_empty() {
            return Err(AutomatonError::EmptyKeyword);
        }
        self.alphabet.check(word)?;

        let word = fold_case_string(word);
        if self.terminals.contains_key(&word) {
            return Ok(());
        }
        ensure_capacity(self.nodes.len(), word.chars().count(), self.keywords.len())?;

        let mut current = NodeId::ROOT;
        for ch in word.chars() {
            current = match self.nodes[current.index()].child(ch) {
                Some(next) => next,
                None => {
                    let next = NodeId(to_id(self.nodes.len())?);
                    self.nodes.push(Node::default());
                    self.nodes[current.index()].children.insert(ch, next);
                    next
                }
            };
        }

        let id = KeywordId(to_id(self.keywords.len())?);
        let node = &mut self.nodes[current.index()];
        node.end_of_word = true;
        node.output.push(id);

        self.keywords.push(Keyword {
            char_len: word.chars().count(),
            text: word.clone(),
        });
        self.terminals.insert(word, current);
        Ok(())
    }

    /// Insert every keyword of `words` in order.
    ///
    /// Stops at the first invalid keyword; keywords before it stay inserted.
    pub fn insert_all<I, S>(&mut self, words: I) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref())?;
        }
        Ok(())
    }

    /// Compute failure links and finalize output sets.
    ///
    /// Breadth-first over the trie: a node's failure target is always
    /// shallower than the node itself, so its output set is already final
    /// when it is copied.
    pub fn build(mut self) -> KeywordAutomaton {
        let mut queue = VecDeque::with_capacity(self.nodes.len());

        for (_, child) in self.nodes[NodeId::ROOT.index()].sorted_children() {
            self.nodes[child.index()].failure_link = Some(NodeId::ROOT);
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            for (ch, child) in self.nodes[current.index()].sorted_children() {
                let target = self.find_failure_target(current, ch);
                self.nodes[child.index()].failure_link = Some(target);

                if target != NodeId::ROOT {
                    let inherited = self.nodes[target.index()].output.clone();
                    self.nodes[child.index()].output.extend(inherited);
                }

                queue.push_back(child);
            }
        }

        tracing::debug!(
            nodes = self.nodes.len(),
            keywords = self.keywords.len(),
            "keyword automaton built"
        );

        KeywordAutomaton::from_parts(self.alphabet, self.nodes, self.keywords)
    }

    /// Follow failure links from `parent` until some state has an edge on
    /// `ch`, and return that edge's target. Falls back to the root when even
    /// the root has no such edge.
    fn find_failure_target(&self, parent: NodeId, ch: char) -> NodeId {
        let mut state = self.nodes[parent.index()].failure_link;
        while let Some(candidate) = state {
            if let Some(next) = self.nodes[candidate.index()].child(ch) {
                return next;
            }
            state = self.nodes[candidate.index()].failure_link;
        }
        NodeId::ROOT
    }
}

fn to_id(index: usize) -> Result<u32, AutomatonError> {
    u32::try_from(index).map_err(|_| AutomatonError::CapacityExceeded)
}

/// Check that inserting a keyword of `added` characters keeps every node
/// and keyword id within `u32`, before anything is mutated.
fn ensure_capacity(nodes: usize, added: usize, keywords: usize) -> Result<(), AutomatonError> {
    let last_node = nodes
        .checked_add(added)
        .ok_or(AutomatonError::CapacityExceeded)?;
    to_id(last_node)?;
    to_id(keywords)?;
    Ok(())
}
