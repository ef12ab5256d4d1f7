//! Rule store abstraction
//!
//! The matching core only reads from the store, through the small query
//! surface of [`RuleRepository`]. Implementations own persistence; the
//! in-memory one backs tests, the CLI and the server.

mod memory;

pub use memory::{InMemoryRuleStore, NewResponse, DEFAULT_PRIORITY};

use crate::error::StoreResult;
use crate::types::{Intent, IntentId, MatchType, Response, Rule, RuleId};

/// Read-only query surface consumed by the matcher and response selector
///
/// Ordering for the non-priority queries is store iteration order; callers
/// rely only on it being stable between calls.
pub trait RuleRepository: Send + Sync {
    /// All rules of one match type, in store order
    fn rules_by_match_type(&self, match_type: MatchType) -> StoreResult<Vec<Rule>>;

    /// Rules of one intent ordered by ascending priority, then newest first
    fn rules_by_priority(&self, intent_id: IntentId) -> StoreResult<Vec<Rule>>;

    /// Responses bound to one specific rule
    fn responses_by_rule(&self, rule_id: RuleId) -> StoreResult<Vec<Response>>;

    /// All responses of an intent (rule-bound or not)
    fn responses_by_intent(&self, intent_id: IntentId) -> StoreResult<Vec<Response>>;

    /// All intents, in store order
    fn all_intents(&self) -> StoreResult<Vec<Intent>>;

    /// Look up one intent by id
    fn intent(&self, intent_id: IntentId) -> StoreResult<Option<Intent>>;

    /// Look up one rule by id
    fn rule(&self, rule_id: RuleId) -> StoreResult<Option<Rule>>;
}

/// Sort rules the way ordered store queries return them:
/// ascending priority, then most recent first, then id for stability.
pub fn sort_by_priority(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn rule(id: RuleId, priority: i32, age_secs: i64) -> Rule {
        Rule {
            id,
            intent_id: 1,
            match_type: MatchType::Exact,
            pattern: format!("p{}", id),
            priority,
            created_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[test]
    fn test_sort_by_priority_then_recency() {
        let mut rules = vec![rule(1, 50, 10), rule(2, 10, 100), rule(3, 10, 5), rule(4, 100, 0)];
        sort_by_priority(&mut rules);
        let ids: Vec<RuleId> = rules.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1, 4]);
    }
}
