//! Phrasebook dataset import
//!
//! Reads a JSON document of the form `{"data": [ {...}, ... ]}` and turns
//! each item into an intent (by category), one rule and one response.
//!
//! - item with a question → exact rule (priority 10) + rule-bound response
//! - item without one     → keyword rule from the category words (priority 50)
//!   + intent-level response

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ImportError;
use crate::normalize::word_tokens;
use crate::store::{InMemoryRuleStore, NewResponse};
use crate::types::MatchType;

pub const EXACT_RULE_PRIORITY: i32 = 10;
pub const KEYWORD_RULE_PRIORITY: i32 = 50;
/// Exact patterns are truncated to this many characters
pub const MAX_PATTERN_CHARS: usize = 200;

const UNCATEGORIZED: &str = "Uncategorized";
const CATEGORY_KEYS: &[&str] = &["category", "intent"];
const QUESTION_KEYS: &[&str] = &["question", "user_query", "question_text"];
const TEXT_KEYS: &[&str] = &["sesotho", "answer", "meaning", "text", "itinerary"];

/// Counts from one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub items: usize,
    pub intents_created: usize,
    pub exact_rules: usize,
    pub keyword_rules: usize,
}

/// Import a dataset from JSON text into `store`
pub fn import_dataset(
    store: &InMemoryRuleStore,
    json: &str,
) -> Result<ImportSummary, ImportError> {
    let root: Value = serde_json::from_str(json)?;
    let items = root
        .get("data")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingData)?;

    let mut summary = ImportSummary::default();
    for item in items {
        let Some(item) = item.as_object() else {
            debug!("Skipping non-object dataset item");
            continue;
        };
        import_item(store, item, &mut summary)?;
    }

    info!(
        items = summary.items,
        intents = summary.intents_created,
        exact = summary.exact_rules,
        keyword = summary.keyword_rules,
        "Imported dataset"
    );
    Ok(summary)
}

/// Read a dataset file and import it into a fresh store
pub fn load_store(
    path: impl AsRef<Path>,
) -> Result<(InMemoryRuleStore, ImportSummary), ImportError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let store = InMemoryRuleStore::new();
    let summary = import_dataset(&store, &content)?;
    Ok((store, summary))
}

fn import_item(
    store: &InMemoryRuleStore,
    item: &Map<String, Value>,
    summary: &mut ImportSummary,
) -> Result<(), ImportError> {
    let category =
        first_string(item, CATEGORY_KEYS).unwrap_or_else(|| UNCATEGORIZED.to_string());
    let (intent, created) = store.get_or_create_intent(&category)?;
    if created {
        summary.intents_created += 1;
    }

    let text = first_text(item, TEXT_KEYS).unwrap_or_default();
    let pronunciation = trimmed_field(item, "pronunciation");
    let meaning = trimmed_field(item, "meaning");

    let mut response = NewResponse::for_intent(intent.id, text);
    response.pronunciation = pronunciation;
    response.meaning = meaning;

    match first_string(item, QUESTION_KEYS) {
        Some(question) => {
            let pattern: String = question.trim().chars().take(MAX_PATTERN_CHARS).collect();
            let rule =
                store.add_rule(intent.id, MatchType::Exact, &pattern, EXACT_RULE_PRIORITY)?;
            store.add_response(response.for_rule(rule.id))?;
            summary.exact_rules += 1;
        }
        None => {
            let pattern = category_keywords(&category);
            store.add_rule(intent.id, MatchType::Keyword, &pattern, KEYWORD_RULE_PRIORITY)?;
            store.add_response(response)?;
            summary.keyword_rules += 1;
        }
    }

    summary.items += 1;
    Ok(())
}

/// Comma-joined distinct lower-case words of a category name
pub fn category_keywords(category: &str) -> String {
    let mut seen: Vec<String> = Vec::new();
    for token in word_tokens(category) {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen.join(",")
}

/// First key holding a non-empty string
fn first_string(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First key holding a non-empty value; structured values (itineraries)
/// are kept as their JSON text.
fn first_text(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| item.get(*k)).find_map(|v| match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(a) if !a.is_empty() => Some(v.to_string()),
        Value::Object(o) if !o.is_empty() => Some(v.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn trimmed_field(item: &Map<String, Value>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
