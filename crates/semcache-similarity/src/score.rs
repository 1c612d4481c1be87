// Pairwise similarity score

use hashbrown::HashMap;
use semcache_core::token::word_runs;

use crate::frequency::WordFrequency;

/// Score how closely `candidate` resembles the text behind `input`.
///
/// Every candidate token counts towards the total. A candidate token counts
/// towards the intersection only while its running count in the candidate
/// does not exceed its count in the input, so a token repeated more often
/// than in the input is not credited twice. Input tokens left unmatched are
/// then added to the total, which makes it the size of the multiset union.
///
/// The score is `intersection / total`, in `[0, 1]`: identical texts score
/// 1, texts without a common token score 0, and two token-less texts score 0.
pub fn calculate_similarity(input: &WordFrequency, candidate: &str) -> f64 {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut intersection = 0usize;
    let mut total = 0usize;

    for word in word_runs(candidate) {
        let count = seen.entry(word).or_insert(0);
        *count += 1;
        total += 1;

        if *count <= input.get(word) {
            intersection += 1;
        }
    }

    total += input.total() - intersection;
    if total == 0 {
        return 0.0;
    }
    intersection as f64 / total as f64
}
