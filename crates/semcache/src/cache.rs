// SemanticCache: near-duplicate lookup in front of the LLM, keyword tagging
// of fresh responses.
//
// Design notes:
// - The keyword automaton is built once by the caller and shared through an
//   `Arc`; the cache never rebuilds or mutates it.
// - The owner's prompt history is scanned through the store's lazy cursor
//   and the scan stops at the first near-duplicate.
// - A cache hit never calls the LLM and never writes to the store.

use std::collections::BTreeSet;
use std::sync::Arc;

use semcache_automaton::KeywordAutomaton;
use semcache_similarity::{DEFAULT_SIMILARITY_THRESHOLD, PromptMatcher, SimilarityError};
use serde::Deserialize;

use crate::llm::{LlmClient, LlmError};
use crate::store::{PromptId, PromptStore, StoreError};

/// Error type for [`SemanticCache`] operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The options could not be turned into a matcher.
    #[error("invalid cache options: {0}")]
    Config(#[from] SimilarityError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    /// A near-duplicate prompt was found but the store has no response for it.
    #[error("no stored response for prompt {0}")]
    MissingResponse(PromptId),
}

/// Tunables of the cache layer.
///
/// Deserializable so the enclosing service can read it from its own
/// configuration; every field has a default.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Minimum similarity for a prior prompt to be reused.
    pub similarity_threshold: f64,

    /// Whether fresh responses are tagged with technology keywords.
    pub tag_responses: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            tag_responses: true,
        }
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// Reused from a near-duplicate prompt answered earlier.
    Cached,
    /// Fetched from the LLM for this request.
    Fresh,
}

/// The response handed back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// The stored prompt the response belongs to: the matched prior prompt on
    /// a hit, the newly saved one on a miss.
    pub prompt_id: PromptId,
    pub body: String,
    pub keywords: Vec<String>,
    pub source: AnswerSource,
}

/// Semantic cache in front of an LLM client.
pub struct SemanticCache<S, C> {
    automaton: Arc<KeywordAutomaton>,
    matcher: PromptMatcher,
    options: CacheOptions,
    store: S,
    client: C,
}

impl<S, C> SemanticCache<S, C>
where
    S: PromptStore,
    C: LlmClient,
{
    /// Create a cache with the given collaborators.
    ///
    /// Fails if `options.similarity_threshold` is outside `(0, 1]`.
    pub fn new(
        automaton: Arc<KeywordAutomaton>,
        store: S,
        client: C,
        options: CacheOptions,
    ) -> Result<Self, CacheError> {
        let matcher = PromptMatcher::with_threshold(options.similarity_threshold)?;
        Ok(Self {
            automaton,
            matcher,
            options,
            store,
            client,
        })
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tag `text` with the keywords of the shared automaton.
    pub fn tag(&self, text: &str) -> BTreeSet<String> {
        self.automaton.search(text)
    }

    /// Look for a near-duplicate of `prompt` among the prompts of `owner`.
    pub fn lookup(&self, owner: &str, prompt: &str) -> Result<Option<PromptId>, CacheError> {
        let candidates = self
            .store
            .prompts_by_owner(owner)
            .map(|row| row.map(|p| (p.id, p.text)));
        Ok(self.matcher.try_find_near_duplicate(prompt, candidates)?)
    }

    /// Answer `prompt` for `owner`, reusing a prior response when possible.
    pub fn answer(&self, owner: &str, prompt: &str) -> Result<Answer, CacheError> {
        if let Some(prompt_id) = self.lookup(owner, prompt)? {
            let response = self
                .store
                .response_for_prompt(prompt_id)?
                .ok_or(CacheError::MissingResponse(prompt_id))?;
            tracing::info!(%prompt_id, "semantic cache hit");
            return Ok(Answer {
                prompt_id,
                body: response.body,
                keywords: response.keywords,
                source: AnswerSource::Cached,
            });
        }

        tracing::info!("semantic cache miss, calling LLM");
        let body = self.client.complete(prompt)?;
        let keywords: Vec<String> = if self.options.tag_responses {
            self.tag(&body).into_iter().collect()
        } else {
            Vec::new()
        };
        let prompt_id = self.store.save(owner, prompt, &body, &keywords)?;
        tracing::debug!(%prompt_id, keywords = keywords.len(), "stored fresh response");

        Ok(Answer {
            prompt_id,
            body,
            keywords,
            source: AnswerSource::Fresh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn automaton() -> Arc<KeywordAutomaton> {
        Arc::new(KeywordAutomaton::technology().unwrap())
    }

    fn fixed_reply(prompt: &str) -> Result<String, LlmError> {
        Ok(format!("Answer to '{prompt}': use Rust with Docker."))
    }

    #[test]
    fn default_options() {
        let options = CacheOptions::default();
        assert_eq!(options.similarity_threshold, 0.8);
        assert!(options.tag_responses);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: CacheOptions = serde_json::from_str(r#"{"tag_responses": false}"#).unwrap();
        assert_eq!(options.similarity_threshold, 0.8);
        assert!(!options.tag_responses);

        let options: CacheOptions =
            serde_json::from_str(r#"{"similarity_threshold": 0.9}"#).unwrap();
        assert_eq!(options.similarity_threshold, 0.9);
        assert!(options.tag_responses);
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let options = CacheOptions {
            similarity_threshold: 1.5,
            ..CacheOptions::default()
        };
        let result = SemanticCache::new(automaton(), InMemoryStore::new(), fixed_reply, options);
        assert!(matches!(result, Err(CacheError::Config(_))));
    }

    #[test]
    fn miss_tags_and_stores_response() {
        let cache = SemanticCache::new(
            automaton(),
            InMemoryStore::new(),
            fixed_reply,
            CacheOptions::default(),
        )
        .unwrap();

        let answer = cache.answer("alice", "How do I ship a web service").unwrap();
        assert_eq!(answer.source, AnswerSource::Fresh);
        assert_eq!(answer.prompt_id, PromptId(1));
        assert_eq!(answer.keywords, vec!["docker", "rust"]);
        assert_eq!(cache.store().len().unwrap(), 1);
    }

    #[test]
    fn untagged_responses_have_no_keywords() {
        let options = CacheOptions {
            tag_responses: false,
            ..CacheOptions::default()
        };
        let cache = SemanticCache::new(automaton(), InMemoryStore::new(), fixed_reply, options)
            .unwrap();
        let answer = cache.answer("alice", "anything").unwrap();
        assert!(answer.keywords.is_empty());
    }

    #[test]
    fn llm_errors_propagate_and_store_nothing() {
        let failing = |_: &str| -> Result<String, LlmError> { Err(LlmError::EmptyCompletion) };
        let cache = SemanticCache::new(
            automaton(),
            InMemoryStore::new(),
            failing,
            CacheOptions::default(),
        )
        .unwrap();
        let err = cache.answer("alice", "hello").unwrap_err();
        assert!(matches!(err, CacheError::Llm(LlmError::EmptyCompletion)));
        assert!(cache.store().is_empty().unwrap());
    }

    #[test]
    fn tag_uses_shared_automaton() {
        let cache = SemanticCache::new(
            automaton(),
            InMemoryStore::new(),
            fixed_reply,
            CacheOptions::default(),
        )
        .unwrap();
        let tags: Vec<String> = cache.tag("Kotlin and Ktor").into_iter().collect();
        assert_eq!(tags, vec!["kotlin", "ktor"]);
    }
}
