//! Response selection and reply composition
//!
//! Rule-scoped responses are preferred; the rule's intent responses are
//! the fallback pool. One is drawn uniformly from whichever pool is
//! non-empty, using a caller-supplied random source.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::RuleRepository;
use crate::types::{ChatReply, Response, RuleMatch};

/// Label prefix for the pronunciation line
pub const PRONUNCIATION_LABEL: &str = "Pronunciation:";
/// Label prefix for the meaning line
pub const MEANING_LABEL: &str = "Meaning:";

/// Picks and composes the reply for a matched rule
#[derive(Clone)]
pub struct ResponseSelector {
    store: Arc<dyn RuleRepository>,
}

impl ResponseSelector {
    pub fn new(store: Arc<dyn RuleRepository>) -> Self {
        Self { store }
    }

    /// Eligible responses for a rule: its own, else its intent's
    pub fn eligible_responses(&self, rule_match: &RuleMatch) -> StoreResult<Vec<Response>> {
        let rule = &rule_match.rule;
        let responses = self.store.responses_by_rule(rule.id)?;
        if !responses.is_empty() {
            return Ok(responses);
        }
        debug!(
            rule_id = rule.id,
            intent_id = rule.intent_id,
            "No rule responses, using intent responses"
        );
        self.store.responses_by_intent(rule.intent_id)
    }

    /// Build the reply for `rule_match`.
    ///
    /// `Ok(None)` means there is nothing to say and the caller should fall back.
    pub fn select<R: Rng + ?Sized>(
        &self,
        rule_match: &RuleMatch,
        rng: &mut R,
    ) -> StoreResult<Option<ChatReply>> {
        let responses = self.eligible_responses(rule_match)?;
        let Some(response) = responses.choose(rng) else {
            debug!(rule_id = rule_match.rule.id, "Matched rule has no responses");
            return Ok(None);
        };

        let rule = &rule_match.rule;
        let intent = self.store.intent(rule.intent_id)?.ok_or_else(|| {
            StoreError::Query(format!(
                "rule {} references missing intent {}",
                rule.id, rule.intent_id
            ))
        })?;

        Ok(Some(ChatReply {
            text: compose_text(response),
            intent: Some(intent.name),
            rule_id: Some(rule.id),
            method: rule_match.method,
        }))
    }
}

/// Final reply text: base text, then pronunciation and meaning lines,
/// each separated by a blank line, trimmed.
pub fn compose_text(response: &Response) -> String {
    let mut parts = vec![response.text.clone()];

    if let Some(pronunciation) = response.pronunciation.as_deref().filter(|p| !p.is_empty()) {
        parts.push(format!("{} {}", PRONUNCIATION_LABEL, pronunciation));
    }
    if let Some(meaning) = response.meaning.as_deref().filter(|m| !m.trim().is_empty()) {
        parts.push(format!("{} {}", MEANING_LABEL, meaning));
    }

    parts.join("\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(text: &str, pronunciation: Option<&str>, meaning: Option<&str>) -> Response {
        Response {
            id: 1,
            intent_id: 1,
            rule_id: None,
            text: text.to_string(),
            pronunciation: pronunciation.map(String::from),
            meaning: meaning.map(String::from),
        }
    }

    #[test]
    fn test_compose_plain() {
        assert_eq!(compose_text(&response("  Lumela \n", None, None)), "Lumela");
    }

    #[test]
    fn test_compose_with_extras() {
        let text = compose_text(&response("Lumela", Some("loo-MEH-lah"), Some("Hello")));
        assert_eq!(
            text,
            "Lumela\n\nPronunciation: loo-MEH-lah\n\nMeaning: Hello"
        );
    }

    #[test]
    fn test_compose_skips_blank_meaning() {
        let text = compose_text(&response("Khotso", Some(""), Some("   ")));
        assert_eq!(text, "Khotso");
    }

    #[test]
    fn test_compose_empty_text_with_meaning() {
        let text = compose_text(&response("", None, Some("Peace")));
        assert_eq!(text, "Meaning: Peace");
    }
}
