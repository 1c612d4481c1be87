//! Semantic cache in front of an LLM.
//!
//! Before a prompt is sent to the model, the sender's earlier prompts are
//! scanned for a near-duplicate; on a hit the stored response is reused and
//! the model is not called. Fresh responses are tagged with the technology
//! keywords they mention before being stored.
//!
//! # Architecture
//!
//! - [`store`] -- Persistence boundary ([`PromptStore`]) and an in-memory store
//! - [`llm`] -- Completion backend boundary ([`LlmClient`])
//! - [`cache`] -- The request flow ([`SemanticCache`])
//!
//! Keyword matching comes from `semcache-automaton`, similarity scoring from
//! `semcache-similarity`; both are re-exported for convenience.

pub mod cache;
pub mod llm;
pub mod store;

pub use cache::{Answer, AnswerSource, CacheError, CacheOptions, SemanticCache};
pub use llm::{LlmClient, LlmError};
pub use store::{InMemoryStore, PromptId, PromptStore, StoreError, StoredPrompt, StoredResponse};

pub use semcache_automaton as automaton;
pub use semcache_similarity as similarity;
