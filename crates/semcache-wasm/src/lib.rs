// WASM bindings for semcache.
//
// Provides a `WasmKeywordMatcher` class and a `findNearDuplicate` function
// exported via wasm-bindgen. Match lists are serialized to JavaScript values
// using serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const matcher = new WasmKeywordMatcher();            // built-in vocabulary
//   const custom = new WasmKeywordMatcher(["rust", "zig"]);
//   matcher.search("I love Java!");                     // => ["java"]
//   matcher.findMatches("Rust and Go");                 // => [{ keyword: "rust", start: 0, end: 4 }, ...]
//   findNearDuplicate("How do i program a program", ["Java is fun!", "How do i program a program"]);
//                                                       // => 1
//   findNearDuplicate(prompt, candidates, 0.9);          // custom threshold

use semcache_automaton::{AutomatonError, KeywordAutomaton, KeywordMatch, build_automaton};
use semcache_similarity::{PromptMatcher, SimilarityError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Serializable representation of one keyword occurrence.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsKeywordMatch {
    keyword: String,
    start: usize,
    end: usize,
}

impl From<KeywordMatch<'_>> for JsKeywordMatch {
    fn from(m: KeywordMatch<'_>) -> Self {
        Self {
            keyword: m.keyword.to_string(),
            start: m.start,
            end: m.end,
        }
    }
}

fn automaton_error_to_js(e: AutomatonError) -> JsError {
    JsError::new(&e.to_string())
}

fn similarity_error_to_js(e: SimilarityError) -> JsError {
    JsError::new(&e.to_string())
}

/// Read a JS array as strings; non-string entries become errors.
fn string_entries(array: &js_sys::Array) -> impl Iterator<Item = Result<String, JsError>> + '_ {
    array.iter().enumerate().map(|(i, value)| {
        value
            .as_string()
            .ok_or_else(|| JsError::new(&format!("entry {i} is not a string")))
    })
}

fn build_matcher(vocabulary: Option<Vec<String>>) -> Result<KeywordAutomaton, AutomatonError> {
    match vocabulary {
        Some(words) => build_automaton(&words),
        None => KeywordAutomaton::technology(),
    }
}

fn matcher_for(threshold: Option<f64>) -> Result<PromptMatcher, SimilarityError> {
    threshold.map_or(Ok(PromptMatcher::new()), PromptMatcher::with_threshold)
}

/// Keyword tagger for WebAssembly.
#[wasm_bindgen]
pub struct WasmKeywordMatcher {
    automaton: KeywordAutomaton,
}

#[wasm_bindgen]
impl WasmKeywordMatcher {
    /// Build a matcher from `vocabulary`, or from the built-in technology
    /// list when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(vocabulary: Option<js_sys::Array>) -> Result<WasmKeywordMatcher, JsError> {
        let words = vocabulary
            .map(|array| string_entries(&array).collect::<Result<Vec<_>, _>>())
            .transpose()?;
        let automaton = build_matcher(words).map_err(automaton_error_to_js)?;
        Ok(WasmKeywordMatcher { automaton })
    }

    /// Distinct keywords found in `text`, sorted.
    pub fn search(&self, text: &str) -> Vec<String> {
        self.automaton.search(text).into_iter().collect()
    }

    /// Like `search`, but throws on characters outside the alphabet.
    #[wasm_bindgen(js_name = "searchStrict")]
    pub fn search_strict(&self, text: &str) -> Result<Vec<String>, JsError> {
        self.automaton
            .search_strict(text)
            .map(|found| found.into_iter().collect())
            .map_err(automaton_error_to_js)
    }

    /// Every occurrence with character offsets.
    #[wasm_bindgen(js_name = "findMatches")]
    pub fn find_matches(&self, text: &str) -> Result<JsValue, JsError> {
        let matches: Vec<JsKeywordMatch> = self
            .automaton
            .find_matches(text)
            .into_iter()
            .map(JsKeywordMatch::from)
            .collect();
        serde_wasm_bindgen::to_value(&matches).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = "keywordCount")]
    pub fn keyword_count(&self) -> usize {
        self.automaton.keyword_count()
    }
}

/// Index of the first entry of `candidates` that is a near-duplicate of
/// `prompt`, or `undefined`.
///
/// The array is read lazily; entries after the first hit are never touched.
/// Non-string entries throw.
#[wasm_bindgen(js_name = "findNearDuplicate")]
pub fn find_near_duplicate(
    prompt: &str,
    candidates: &js_sys::Array,
    threshold: Option<f64>,
) -> Result<Option<u32>, JsError> {
    let matcher = matcher_for(threshold).map_err(similarity_error_to_js)?;
    let entries = string_entries(candidates)
        .enumerate()
        .map(|(i, text)| text.map(|text| (i as u32, text)));
    matcher.try_find_near_duplicate(prompt, entries)
}
