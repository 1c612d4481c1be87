// Threshold policy and candidate scans

use std::convert::Infallible;

use crate::frequency::WordFrequency;
use crate::score::calculate_similarity;
use crate::{DEFAULT_SIMILARITY_THRESHOLD, SimilarityError};

/// Decides whether a candidate prompt is a near-duplicate of a new prompt.
///
/// Scans are single-pass and pull-based: candidates are consumed in order
/// and nothing after the first hit is ever requested, so the candidate
/// sequence can be a lazy database cursor of any length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptMatcher {
    threshold: f64,
}

impl Default for PromptMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl PromptMatcher {
    /// Create a matcher with the default threshold (0.8).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with a custom threshold in `(0, 1]`.
    ///
    /// A threshold of 0 would accept every candidate, including ones with no
    /// shared token, so it is rejected along with NaN and values above 1.
    pub fn with_threshold(threshold: f64) -> Result<Self, SimilarityError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(SimilarityError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Check whether `candidate` scores at or above the threshold.
    pub fn is_match(&self, input: &WordFrequency, candidate: &str) -> bool {
        calculate_similarity(input, candidate) >= self.threshold
    }

    /// Return the first candidate text that is a near-duplicate of `text`.
    pub fn check_similarity_of_text_and_stream<I, T>(&self, text: &str, candidates: I) -> Option<T>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let input = WordFrequency::from_text(text);
        candidates
            .into_iter()
            .find(|candidate| self.is_match(&input, candidate.as_ref()))
    }

    /// Return the id of the first `(id, text)` candidate that is a
    /// near-duplicate of `prompt`.
    pub fn find_near_duplicate<I, Id, T>(&self, prompt: &str, candidates: I) -> Option<Id>
    where
        I: IntoIterator<Item = (Id, T)>,
        T: AsRef<str>,
    {
        let input = WordFrequency::from_text(prompt);
        let mut scanned = 0usize;
        let hit = candidates.into_iter().find_map(|(id, text)| {
            scanned += 1;
            self.is_match(&input, text.as_ref()).then_some(id)
        });
        tracing::trace!(scanned, hit = hit.is_some(), "near-duplicate scan finished");
        hit
    }

    /// Like [`find_near_duplicate`](Self::find_near_duplicate), for candidate
    /// sources that can fail while producing items.
    ///
    /// The first error stops the scan and is returned as is.
    pub fn try_find_near_duplicate<I, Id, T, E>(
        &self,
        prompt: &str,
        candidates: I,
    ) -> Result<Option<Id>, E>
    where
        I: IntoIterator<Item = Result<(Id, T), E>>,
        T: AsRef<str>,
    {
        let input = WordFrequency::from_text(prompt);
        let mut scanned = 0usize;
        for candidate in candidates {
            let (id, text) = candidate?;
            scanned += 1;
            if self.is_match(&input, text.as_ref()) {
                tracing::trace!(scanned, "near-duplicate found");
                return Ok(Some(id));
            }
        }
        tracing::trace!(scanned, "no near-duplicate");
        Ok(None)
    }

    /// Score every candidate and return the best `(id, score)`, ignoring the
    /// threshold. Ties keep the earliest candidate.
    ///
    /// Unlike the other scans this always consumes the whole sequence.
    pub fn best_match<I, Id, T>(&self, prompt: &str, candidates: I) -> Option<(Id, f64)>
    where
        I: IntoIterator<Item = (Id, T)>,
        T: AsRef<str>,
    {
        let candidates = candidates.into_iter().map(Ok::<_, Infallible>);
        match self.try_best_match(prompt, candidates) {
            Ok(best) => best,
            Err(never) => match never {},
        }
    }

    /// Like [`best_match`](Self::best_match), for candidate sources that can
    /// fail while producing items. The first error stops the scan.
    pub fn try_best_match<I, Id, T, E>(
        &self,
        prompt: &str,
        candidates: I,
    ) -> Result<Option<(Id, f64)>, E>
    where
        I: IntoIterator<Item = Result<(Id, T), E>>,
        T: AsRef<str>,
    {
        let input = WordFrequency::from_text(prompt);
        let mut best: Option<(Id, f64)> = None;
        for candidate in candidates {
            let (id, text) = candidate?;
            let score = calculate_similarity(&input, text.as_ref());
            if best.as_ref().is_none_or(|&(_, top)| score > top) {
                best = Some((id, score));
            }
        }
        Ok(best)
    }
}

/// [`PromptMatcher::find_near_duplicate`] with the default threshold.
pub fn find_near_duplicate<I, Id, T>(prompt: &str, candidates: I) -> Option<Id>
where
    I: IntoIterator<Item = (Id, T)>,
    T: AsRef<str>,
{
    PromptMatcher::default().find_near_duplicate(prompt, candidates)
}
