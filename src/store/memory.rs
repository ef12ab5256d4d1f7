//! In-memory rule store
//!
//! Holds intents, rules and responses behind a `RwLock`. Queries clone
//! snapshots so callers never hold the lock across cascade stages.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{sort_by_priority, RuleRepository};
use crate::error::{StoreError, StoreResult};
use crate::types::{Intent, IntentId, MatchType, Response, ResponseId, Rule, RuleId};

/// Default rule priority when none is given
pub const DEFAULT_PRIORITY: i32 = 100;

/// Fields for a response about to be inserted
#[derive(Debug, Clone, Default)]
pub struct NewResponse {
    pub intent_id: IntentId,
    pub rule_id: Option<RuleId>,
    pub text: String,
    pub pronunciation: Option<String>,
    pub meaning: Option<String>,
}

impl NewResponse {
    pub fn for_intent(intent_id: IntentId, text: impl Into<String>) -> Self {
        Self {
            intent_id,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn for_rule(mut self, rule_id: RuleId) -> Self {
        self.rule_id = Some(rule_id);
        self
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }
}

#[derive(Debug, Default)]
struct Inner {
    intents: Vec<Intent>,
    rules: Vec<Rule>,
    responses: Vec<Response>,
    next_intent_id: IntentId,
    next_rule_id: RuleId,
    next_response_id: ResponseId,
}

impl Inner {
    fn push_intent(&mut self, name: &str, description: &str) -> Intent {
        self.next_intent_id += 1;
        let intent = Intent {
            id: self.next_intent_id,
            name: name.to_string(),
            description: description.to_string(),
        };
        self.intents.push(intent.clone());
        intent
    }
}

/// Thread-safe in-memory [`RuleRepository`]
#[derive(Debug, Default)]
pub struct InMemoryRuleStore {
    inner: RwLock<Inner>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("rule store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("rule store lock poisoned".to_string()))
    }

    /// Insert a new intent. Names are unique.
    pub fn add_intent(&self, name: &str, description: &str) -> StoreResult<Intent> {
        let mut inner = self.write()?;
        if inner.intents.iter().any(|i| i.name == name) {
            return Err(StoreError::Query(format!("intent '{}' already exists", name)));
        }
        Ok(inner.push_intent(name, description))
    }

    /// Fetch an intent by name, creating it when missing.
    /// Returns the intent and whether it was created.
    pub fn get_or_create_intent(&self, name: &str) -> StoreResult<(Intent, bool)> {
        let mut inner = self.write()?;
        if let Some(existing) = inner.intents.iter().find(|i| i.name == name) {
            return Ok((existing.clone(), false));
        }
        Ok((inner.push_intent(name, ""), true))
    }

    pub fn intent_by_name(&self, name: &str) -> StoreResult<Option<Intent>> {
        Ok(self.read()?.intents.iter().find(|i| i.name == name).cloned())
    }

    /// Insert a rule stamped with the current time
    pub fn add_rule(
        &self,
        intent_id: IntentId,
        match_type: MatchType,
        pattern: &str,
        priority: i32,
    ) -> StoreResult<Rule> {
        self.add_rule_at(intent_id, match_type, pattern, priority, Utc::now())
    }

    /// Insert a rule with an explicit creation time
    pub fn add_rule_at(
        &self,
        intent_id: IntentId,
        match_type: MatchType,
        pattern: &str,
        priority: i32,
        created_at: DateTime<Utc>,
    ) -> StoreResult<Rule> {
        let mut inner = self.write()?;
        if !inner.intents.iter().any(|i| i.id == intent_id) {
            return Err(StoreError::Query(format!("unknown intent id {}", intent_id)));
        }
        inner.next_rule_id += 1;
        let rule = Rule {
            id: inner.next_rule_id,
            intent_id,
            match_type,
            pattern: pattern.to_string(),
            priority,
            created_at,
        };
        inner.rules.push(rule.clone());
        Ok(rule)
    }

    pub fn add_response(&self, new: NewResponse) -> StoreResult<Response> {
        let mut inner = self.write()?;
        if !inner.intents.iter().any(|i| i.id == new.intent_id) {
            return Err(StoreError::Query(format!(
                "unknown intent id {}",
                new.intent_id
            )));
        }
        if let Some(rule_id) = new.rule_id {
            if !inner.rules.iter().any(|r| r.id == rule_id) {
                return Err(StoreError::Query(format!("unknown rule id {}", rule_id)));
            }
        }
        inner.next_response_id += 1;
        let response = Response {
            id: inner.next_response_id,
            intent_id: new.intent_id,
            rule_id: new.rule_id,
            text: new.text,
            pronunciation: new.pronunciation,
            meaning: new.meaning,
        };
        inner.responses.push(response.clone());
        Ok(response)
    }

    /// Remove a rule. Responses that referenced it survive, detached.
    pub fn remove_rule(&self, rule_id: RuleId) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let before = inner.rules.len();
        inner.rules.retain(|r| r.id != rule_id);
        if inner.rules.len() == before {
            return Ok(false);
        }
        let mut detached = 0;
        for response in inner.responses.iter_mut() {
            if response.rule_id == Some(rule_id) {
                response.rule_id = None;
                detached += 1;
            }
        }
        debug!(rule_id, detached, "Removed rule");
        Ok(true)
    }

    pub fn intent_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.intents.len())
    }

    pub fn rule_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.rules.len())
    }

    pub fn response_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.responses.len())
    }
}

impl RuleRepository for InMemoryRuleStore {
    fn rules_by_match_type(&self, match_type: MatchType) -> StoreResult<Vec<Rule>> {
        let mut rules: Vec<Rule> = self
            .read()?
            .rules
            .iter()
            .filter(|r| r.match_type == match_type)
            .cloned()
            .collect();
        // Default model ordering applies to every rule query
        sort_by_priority(&mut rules);
        Ok(rules)
    }

    fn rules_by_priority(&self, intent_id: IntentId) -> StoreResult<Vec<Rule>> {
        let mut rules: Vec<Rule> = self
            .read()?
            .rules
            .iter()
            .filter(|r| r.intent_id == intent_id)
            .cloned()
            .collect();
        sort_by_priority(&mut rules);
        Ok(rules)
    }

    fn responses_by_rule(&self, rule_id: RuleId) -> StoreResult<Vec<Response>> {
        Ok(self
            .read()?
            .responses
            .iter()
            .filter(|r| r.rule_id == Some(rule_id))
            .cloned()
            .collect())
    }

    fn responses_by_intent(&self, intent_id: IntentId) -> StoreResult<Vec<Response>> {
        Ok(self
            .read()?
            .responses
            .iter()
            .filter(|r| r.intent_id == intent_id)
            .cloned()
            .collect())
    }

    fn all_intents(&self) -> StoreResult<Vec<Intent>> {
        Ok(self.read()?.intents.clone())
    }

    fn intent(&self, intent_id: IntentId) -> StoreResult<Option<Intent>> {
        Ok(self.read()?.intents.iter().find(|i| i.id == intent_id).cloned())
    }

    fn rule(&self, rule_id: RuleId) -> StoreResult<Option<Rule>> {
        Ok(self.read()?.rules.iter().find(|r| r.id == rule_id).cloned())
    }
}
