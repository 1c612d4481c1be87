// Trie and automaton node storage

use hashbrown::HashMap;

/// Index of a node inside the automaton's node arena.
///
/// Children and failure links are both stored as `NodeId`s, so the failure
/// graph can point anywhere in the trie without owning anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node. Always present, always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a keyword in the automaton's keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct KeywordId(pub(crate) u32);

/// A keyword stored in the automaton, already case-folded.
#[derive(Debug, Clone)]
pub(crate) struct Keyword {
    pub text: String,
    /// Length in characters (not bytes); match offsets are character offsets.
    pub char_len: usize,
}

/// A single trie node with its automaton extensions.
#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    /// Outgoing edges keyed by (case-folded) character.
    pub children: HashMap<char, NodeId>,

    /// True when some inserted keyword ends exactly here.
    pub end_of_word: bool,

    /// Fallback state on mismatch. `None` for the root, and for every node
    /// until the failure-link pass has run.
    pub failure_link: Option<NodeId>,

    /// Keywords recognised when this node is reached. Starts with the keyword
    /// ending here (if any); the failure-link pass appends the output of the
    /// failure target.
    pub output: Vec<KeywordId>,
}

impl Node {
    pub fn child(&self, ch: char) -> Option<NodeId> {
        self.children.get(&ch).copied()
    }

    /// Children sorted by edge character, for deterministic traversal.
    pub fn sorted_children(&self) -> Vec<(char, NodeId)> {
        let mut children: Vec<(char, NodeId)> =
            self.children.iter().map(|(&ch, &id)| (ch, id)).collect();
        children.sort_unstable_by_key(|&(ch, _)| ch);
        children
    }
}
