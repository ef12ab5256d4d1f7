//! Rule Matcher - ordered match cascade over the rule store
//!
//! ```text
//! user text
//!     │
//!     ├─ 1. exact          normalized pattern == normalized input
//!     ├─ 2. regex          case-insensitive search in the raw input
//!     ├─ 3. keyword        any comma-separated keyword is a substring
//!     ├─ 4. fuzzy          best similarity against exact patterns >= threshold
//!     └─ 5. intent_keyword intent name word found in input → top-priority rule
//! ```
//!
//! The first stage with a candidate wins; later stages are not consulted.
//! Stages 1-3 take the first structural hit in store order, not the
//! lowest priority value. Only stage 5 honours priority.

use std::sync::Arc;

use regex::RegexBuilder;
use tracing::debug;

use crate::error::StoreResult;
use crate::normalize::{normalize, split_keywords, word_tokens};
use crate::similarity::fuzzy_ratio;
use crate::store::RuleRepository;
use crate::types::{MatchMethod, MatchType, Rule, RuleMatch};

/// Default minimum similarity for a fuzzy match
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 70;

/// Match cascade over a [`RuleRepository`]
///
/// Stateless apart from the store handle; safe to share across threads.
#[derive(Clone)]
pub struct RuleMatcher {
    store: Arc<dyn RuleRepository>,
}

impl RuleMatcher {
    pub fn new(store: Arc<dyn RuleRepository>) -> Self {
        Self { store }
    }

    /// Find the rule for `user_text`, or `None` when every stage misses.
    ///
    /// Store failures propagate; invalid regex patterns are skipped.
    pub fn find_rule(
        &self,
        user_text: &str,
        fuzzy_threshold: u8,
    ) -> StoreResult<Option<RuleMatch>> {
        let normalized = normalize(user_text);

        let exact_rules = self.store.rules_by_match_type(MatchType::Exact)?;
        if let Some(rule) = match_exact(&exact_rules, &normalized) {
            debug!(rule_id = rule.id, "Exact match");
            return Ok(Some(RuleMatch::new(rule.clone(), MatchMethod::Exact)));
        }

        let regex_rules = self.store.rules_by_match_type(MatchType::Regex)?;
        if let Some(rule) = match_regex(&regex_rules, user_text) {
            debug!(rule_id = rule.id, pattern = %rule.pattern, "Regex match");
            return Ok(Some(RuleMatch::new(rule.clone(), MatchMethod::Regex)));
        }

        let keyword_rules = self.store.rules_by_match_type(MatchType::Keyword)?;
        if let Some(rule) = match_keyword(&keyword_rules, &normalized) {
            debug!(rule_id = rule.id, "Keyword match");
            return Ok(Some(RuleMatch::new(rule.clone(), MatchMethod::Keyword)));
        }

        // Fuzzy reuses the exact-rule fetch from stage 1
        if let Some((rule, score)) = best_fuzzy(&exact_rules, &normalized) {
            if score >= fuzzy_threshold {
                debug!(rule_id = rule.id, score, "Fuzzy match");
                return Ok(Some(RuleMatch {
                    rule: rule.clone(),
                    method: MatchMethod::Fuzzy,
                    score: Some(score),
                }));
            }
            debug!(
                rule_id = rule.id,
                score, fuzzy_threshold, "Best fuzzy candidate below threshold"
            );
        }

        if let Some(rule) = self.match_intent_keyword(&normalized)? {
            debug!(rule_id = rule.id, "Intent keyword match");
            return Ok(Some(RuleMatch::new(rule, MatchMethod::IntentKeyword)));
        }

        debug!("No rule matched");
        Ok(None)
    }

    /// Stage 5: an intent whose name shares a word with the input yields
    /// its highest-precedence rule.
    fn match_intent_keyword(&self, normalized: &str) -> StoreResult<Option<Rule>> {
        for intent in self.store.all_intents()? {
            let tokens = word_tokens(&intent.name);
            if !tokens.iter().any(|t| normalized.contains(t.as_str())) {
                continue;
            }
            let rules = self.store.rules_by_priority(intent.id)?;
            if let Some(first) = rules.into_iter().next() {
                return Ok(Some(first));
            }
        }
        Ok(None)
    }
}

fn match_exact<'a>(rules: &'a [Rule], normalized: &str) -> Option<&'a Rule> {
    rules
        .iter()
        .filter(|r| r.is_matchable())
        .find(|r| normalize(&r.pattern) == normalized)
}

fn match_regex<'a>(rules: &'a [Rule], raw: &str) -> Option<&'a Rule> {
    for rule in rules.iter().filter(|r| r.is_matchable()) {
        let re = match RegexBuilder::new(&rule.pattern)
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                debug!(rule_id = rule.id, error = %e, "Skipping invalid regex pattern");
                continue;
            }
        };
        if re.is_match(raw) {
            return Some(rule);
        }
    }
    None
}

fn match_keyword<'a>(rules: &'a [Rule], normalized: &str) -> Option<&'a Rule> {
    rules.iter().find(|r| {
        split_keywords(&r.pattern)
            .iter()
            .any(|kw| normalized.contains(kw.as_str()))
    })
}

/// Highest-scoring exact rule; ties keep the first seen.
/// A zero score is never a candidate.
fn best_fuzzy<'a>(rules: &'a [Rule], normalized: &str) -> Option<(&'a Rule, u8)> {
    let mut best: Option<(&Rule, u8)> = None;
    for rule in rules.iter().filter(|r| r.is_matchable()) {
        let score = fuzzy_ratio(&normalize(&rule.pattern), normalized);
        if score > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((rule, score));
        }
    }
    best
}
