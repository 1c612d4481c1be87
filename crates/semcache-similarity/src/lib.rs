//! Near-duplicate prompt detection by token-frequency overlap.
//!
//! A prompt is tokenized into maximal runs of ASCII letters and digits
//! (case-sensitive). Two prompts are compared by the size of their token
//! multiset intersection relative to an approximation of their union; a
//! candidate is a near-duplicate when that ratio reaches the threshold
//! (0.8 by default).
//!
//! # Architecture
//!
//! - [`frequency`] -- Token frequency maps
//! - [`score`] -- Pairwise similarity score
//! - [`matcher`] -- Threshold policy and short-circuiting candidate scans

pub mod frequency;
pub mod matcher;
pub mod score;

pub use frequency::{WordFrequency, build_word_frequency_map};
pub use matcher::{PromptMatcher, find_near_duplicate};
pub use score::calculate_similarity;

/// Score a candidate must reach to count as a near-duplicate.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Error type for matcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SimilarityError {
    #[error("similarity threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),
}
