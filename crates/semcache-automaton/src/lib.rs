//! Multi-pattern keyword matching for tagging LLM responses.
//!
//! Keywords are inserted into an [`AutomatonBuilder`], which is then consumed
//! by a single failure-link pass into an immutable [`KeywordAutomaton`]. The
//! automaton is `Send + Sync` and can be shared behind an `Arc` for any number
//! of concurrent searches.
//!
//! Keywords and searched text are both lower-cased, and a keyword is only
//! reported where it stands as a whole word: the characters on either side
//! of the occurrence must not be letters or digits.
//!
//! # Architecture
//!
//! - [`node`] -- Node arena: children, failure links, output sets
//! - [`builder`] -- Keyword insertion and the breadth-first failure-link pass
//! - [`automaton`] -- Built automaton: search and introspection
//! - [`vocabulary`] -- Built-in technology keyword list and word-list parsing

pub mod automaton;
pub mod builder;
pub mod node;
pub mod vocabulary;

pub use automaton::{KeywordAutomaton, KeywordMatch};
pub use builder::AutomatonBuilder;
pub use node::NodeId;

/// Error type for keyword insertion and strict searching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("unsupported character {ch:?} at position {position}")]
    UnsupportedCharacter { ch: char, position: usize },
    #[error("keywords must not be empty")]
    EmptyKeyword,
    /// The trie would outgrow its 32-bit node or keyword ids.
    #[error("keyword automaton is full")]
    CapacityExceeded,
}

/// Set of characters a keyword automaton accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// 7-bit ASCII only.
    #[default]
    Ascii,
    /// Any Unicode scalar value.
    Unicode,
}

impl Alphabet {
    /// Check whether `ch` belongs to this alphabet.
    pub fn contains(self, ch: char) -> bool {
        match self {
            Alphabet::Ascii => ch.is_ascii(),
            Alphabet::Unicode => true,
        }
    }

    /// Return the first character of `text` outside this alphabet.
    pub fn check(self, text: &str) -> Result<(), AutomatonError> {
        match text
            .chars()
            .enumerate()
            .find(|&(_, ch)| !self.contains(ch))
        {
            Some((position, ch)) => Err(AutomatonError::UnsupportedCharacter { ch, position }),
            None => Ok(()),
        }
    }
}

/// Build an ASCII automaton over `vocabulary`.
///
/// Fails on the first keyword that is empty or contains a non-ASCII character.
pub fn build_automaton<I, S>(vocabulary: I) -> Result<KeywordAutomaton, AutomatonError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = AutomatonBuilder::new();
    builder.insert_all(vocabulary)?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_alphabet_rejects_non_ascii() {
        assert!(Alphabet::Ascii.contains('a'));
        assert!(Alphabet::Ascii.contains('#'));
        assert!(!Alphabet::Ascii.contains('\u{00E4}'));
        assert_eq!(
            Alphabet::Ascii.check("na\u{00EF}ve"),
            Err(AutomatonError::UnsupportedCharacter {
                ch: '\u{00EF}',
                position: 2
            })
        );
    }

    #[test]
    fn unicode_alphabet_accepts_everything() {
        assert!(Alphabet::Unicode.contains('\u{4E2D}'));
        assert_eq!(Alphabet::Unicode.check("na\u{00EF}ve"), Ok(()));
    }

    #[test]
    fn build_automaton_propagates_errors() {
        let err = build_automaton(["java", "", "rust"]).unwrap_err();
        assert_eq!(err, AutomatonError::EmptyKeyword);
    }

    #[test]
    fn error_messages() {
        let err = AutomatonError::UnsupportedCharacter {
            ch: '\u{00E9}',
            position: 3,
        };
        assert_eq!(
            err.to_string(),
            "unsupported character '\u{00E9}' at position 3"
        );
    }
}
