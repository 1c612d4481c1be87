// Prompt/response persistence boundary and an in-memory reference store

use std::fmt;
use std::sync::RwLock;

use hashbrown::HashMap;

/// Identifier of a stored prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PromptId(pub u64);

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A prompt as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPrompt {
    pub id: PromptId,
    /// Identity of the user who sent the prompt.
    pub owner: String,
    pub text: String,
}

/// The LLM response saved for a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResponse {
    pub prompt_id: PromptId,
    pub body: String,
    /// Technology keywords found in `body` when it was saved.
    pub keywords: Vec<String>,
}

/// Error type for store access failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("prompt store lock poisoned")]
    Poisoned,

    /// The backing storage reported an error.
    #[error("prompt store backend error: {0}")]
    Backend(String),
}

/// Persistence boundary for prompts and their responses.
///
/// `prompts_by_owner` must be lazy: the cache stops pulling as soon as it
/// finds a near-duplicate, so implementations backed by a database cursor
/// should fetch rows on demand rather than loading the whole history.
pub trait PromptStore {
    /// Iterate over the prompts of `owner`, oldest first.
    fn prompts_by_owner<'a>(
        &'a self,
        owner: &str,
    ) -> Box<dyn Iterator<Item = Result<StoredPrompt, StoreError>> + 'a>;

    /// Look up the response saved for `prompt_id`.
    fn response_for_prompt(&self, prompt_id: PromptId)
    -> Result<Option<StoredResponse>, StoreError>;

    /// Save a prompt together with its response and return the new prompt id.
    fn save(
        &self,
        owner: &str,
        prompt: &str,
        body: &str,
        keywords: &[String],
    ) -> Result<PromptId, StoreError>;
}

#[derive(Debug, Default)]
struct Tables {
    prompts: Vec<StoredPrompt>,
    responses: HashMap<PromptId, StoredResponse>,
}

/// Thread-safe in-memory [`PromptStore`].
///
/// Prompt ids are assigned sequentially from 1. Owner scans take the read
/// lock once per yielded prompt, so writers are never blocked for the length
/// of a scan.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored prompts across all owners.
    pub fn len(&self) -> Result<usize, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.prompts.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl PromptStore for InMemoryStore {
    fn prompts_by_owner<'a>(
        &'a self,
        owner: &str,
    ) -> Box<dyn Iterator<Item = Result<StoredPrompt, StoreError>> + 'a> {
        Box::new(OwnerCursor {
            store: self,
            owner: owner.to_string(),
            position: 0,
            done: false,
        })
    }

    fn response_for_prompt(
        &self,
        prompt_id: PromptId,
    ) -> Result<Option<StoredResponse>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.responses.get(&prompt_id).cloned())
    }

    fn save(
        &self,
        owner: &str,
        prompt: &str,
        body: &str,
        keywords: &[String],
    ) -> Result<PromptId, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let id = PromptId(tables.prompts.len() as u64 + 1);
        tables.prompts.push(StoredPrompt {
            id,
            owner: owner.to_string(),
            text: prompt.to_string(),
        });
        tables.responses.insert(
            id,
            StoredResponse {
                prompt_id: id,
                body: body.to_string(),
                keywords: keywords.to_vec(),
            },
        );
        Ok(id)
    }
}

/// Forward-only cursor over one owner's prompts.
struct OwnerCursor<'a> {
    store: &'a InMemoryStore,
    owner: String,
    position: usize,
    done: bool,
}

impl Iterator for OwnerCursor<'_> {
    type Item = Result<StoredPrompt, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let store = self.store;
        let tables = match store.tables.read() {
            Ok(tables) => tables,
            Err(_) => {
                self.done = true;
                return Some(Err(StoreError::Poisoned));
            }
        };

        while let Some(prompt) = tables.prompts.get(self.position) {
            self.position += 1;
            if prompt.owner == self.owner {
                return Some(Ok(prompt.clone()));
            }
        }
        self.done = true;
        None
    }
}
