//! End-to-end request flow of the semantic cache.

use std::cell::Cell;
use std::sync::Arc;

use semcache::automaton::KeywordAutomaton;
use semcache::{
    AnswerSource, CacheError, CacheOptions, InMemoryStore, LlmError, PromptId, PromptStore,
    SemanticCache, StoreError, StoredPrompt, StoredResponse,
};

fn technology() -> Arc<KeywordAutomaton> {
    Arc::new(KeywordAutomaton::technology().unwrap())
}

#[test]
fn near_duplicate_prompt_reuses_stored_response() {
    let calls = Cell::new(0usize);
    let client = |_: &str| -> Result<String, LlmError> {
        calls.set(calls.get() + 1);
        Ok("Use flexbox in CSS.".to_string())
    };
    let cache = SemanticCache::new(
        technology(),
        InMemoryStore::new(),
        client,
        CacheOptions::default(),
    )
    .unwrap();

    let first = cache.answer("alice", "How do i center a div in html").unwrap();
    assert_eq!(first.source, AnswerSource::Fresh);
    assert_eq!(first.keywords, vec!["css"]);

    let second = cache
        .answer("alice", "How do i center a div in html using css")
        .unwrap();
    assert_eq!(second.source, AnswerSource::Cached);
    assert_eq!(second.prompt_id, first.prompt_id);
    assert_eq!(second.body, "Use flexbox in CSS.");
    assert_eq!(second.keywords, vec!["css"]);

    assert_eq!(calls.get(), 1);
    assert_eq!(cache.store().len().unwrap(), 1);
}

#[test]
fn history_is_scoped_to_the_owner() {
    let calls = Cell::new(0usize);
    let client = |_: &str| -> Result<String, LlmError> {
        calls.set(calls.get() + 1);
        Ok("ok".to_string())
    };
    let cache = SemanticCache::new(
        technology(),
        InMemoryStore::new(),
        client,
        CacheOptions::default(),
    )
    .unwrap();

    let alice = cache.answer("alice", "How do i program a program").unwrap();
    let bob = cache.answer("bob", "How do i program a program").unwrap();
    assert_eq!(alice.source, AnswerSource::Fresh);
    assert_eq!(bob.source, AnswerSource::Fresh);
    assert_ne!(alice.prompt_id, bob.prompt_id);
    assert_eq!(calls.get(), 2);
}

#[test]
fn unrelated_prompt_is_a_miss() {
    let cache = SemanticCache::new(
        technology(),
        InMemoryStore::new(),
        |p: &str| -> Result<String, LlmError> { Ok(format!("re: {p}")) },
        CacheOptions::default(),
    )
    .unwrap();

    cache.answer("alice", "How do i center a div in html").unwrap();
    let other = cache.answer("alice", "Java is fun!").unwrap();
    assert_eq!(other.source, AnswerSource::Fresh);
    assert_eq!(other.prompt_id, PromptId(2));
    assert_eq!(other.keywords, vec!["java"]);
}

#[test]
fn stricter_threshold_needs_closer_prompts() {
    let options = CacheOptions {
        similarity_threshold: 1.0,
        ..CacheOptions::default()
    };
    let cache = SemanticCache::new(
        technology(),
        InMemoryStore::new(),
        |_: &str| -> Result<String, LlmError> { Ok("answer".to_string()) },
        options,
    )
    .unwrap();

    cache.answer("alice", "How do i center a div in html").unwrap();
    let near = cache
        .answer("alice", "How do i center a div in html using css")
        .unwrap();
    assert_eq!(near.source, AnswerSource::Fresh);
    let exact = cache.answer("alice", "How do i center a div in html").unwrap();
    assert_eq!(exact.source, AnswerSource::Cached);
    assert_eq!(exact.prompt_id, PromptId(1));
}

/// Store with a fixed history whose responses can be withheld or whose scan
/// fails partway through.
struct FixtureStore {
    history: Vec<Result<StoredPrompt, String>>,
    has_responses: bool,
}

impl PromptStore for FixtureStore {
    fn prompts_by_owner<'a>(
        &'a self,
        _owner: &str,
    ) -> Box<dyn Iterator<Item = Result<StoredPrompt, StoreError>> + 'a> {
        Box::new(
            self.history
                .iter()
                .map(|row| row.clone().map_err(StoreError::Backend)),
        )
    }

    fn response_for_prompt(
        &self,
        prompt_id: PromptId,
    ) -> Result<Option<StoredResponse>, StoreError> {
        Ok(self.has_responses.then(|| StoredResponse {
            prompt_id,
            body: "stored".to_string(),
            keywords: Vec::new(),
        }))
    }

    fn save(
        &self,
        _owner: &str,
        _prompt: &str,
        _body: &str,
        _keywords: &[String],
    ) -> Result<PromptId, StoreError> {
        Err(StoreError::Backend("read-only fixture".to_string()))
    }
}

fn prompt(id: u64, text: &str) -> Result<StoredPrompt, String> {
    Ok(StoredPrompt {
        id: PromptId(id),
        owner: "alice".to_string(),
        text: text.to_string(),
    })
}

fn unreachable_client(_: &str) -> Result<String, LlmError> {
    panic!("LLM must not be called");
}

#[test]
fn hit_without_response_is_an_error() {
    let store = FixtureStore {
        history: vec![prompt(7, "How do i program a program")],
        has_responses: false,
    };
    let cache =
        SemanticCache::new(technology(), store, unreachable_client, CacheOptions::default())
            .unwrap();

    let err = cache.answer("alice", "How do i program a program").unwrap_err();
    assert!(matches!(err, CacheError::MissingResponse(PromptId(7))));
    assert_eq!(err.to_string(), "no stored response for prompt 7");
}

#[test]
fn store_errors_during_scan_propagate() {
    let store = FixtureStore {
        history: vec![
            prompt(1, "Java is fun!"),
            Err("connection reset".to_string()),
            prompt(3, "How do i program a program"),
        ],
        has_responses: true,
    };
    let cache =
        SemanticCache::new(technology(), store, unreachable_client, CacheOptions::default())
            .unwrap();

    let err = cache.answer("alice", "How do i program a program").unwrap_err();
    assert!(matches!(err, CacheError::Store(StoreError::Backend(_))));
}

#[test]
fn hit_before_a_failing_row_succeeds() {
    let store = FixtureStore {
        history: vec![
            prompt(1, "How do i program a program"),
            Err("connection reset".to_string()),
        ],
        has_responses: true,
    };
    let cache =
        SemanticCache::new(technology(), store, unreachable_client, CacheOptions::default())
            .unwrap();

    let answer = cache.answer("alice", "How do i program a program").unwrap();
    assert_eq!(answer.source, AnswerSource::Cached);
    assert_eq!(answer.body, "stored");
}

#[test]
fn save_failures_propagate_after_llm_call() {
    let store = FixtureStore {
        history: Vec::new(),
        has_responses: true,
    };
    let cache = SemanticCache::new(
        technology(),
        store,
        |_: &str| -> Result<String, LlmError> { Ok("fresh".to_string()) },
        CacheOptions::default(),
    )
    .unwrap();

    let err = cache.answer("alice", "anything").unwrap_err();
    assert!(matches!(err, CacheError::Store(StoreError::Backend(_))));
}

#[test]
fn options_load_from_json() {
    let options: CacheOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, CacheOptions::default());

    let options: CacheOptions =
        serde_json::from_str(r#"{"similarity_threshold": 0.5, "tag_responses": false}"#).unwrap();
    assert_eq!(options.similarity_threshold, 0.5);
    assert!(!options.tag_responses);
}
