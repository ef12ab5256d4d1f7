//! Chat engine - public resolution entry point
//!
//! Runs the match cascade, then the response selector, falling back to
//! the canned apology when either comes up empty.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, instrument};

use crate::error::StoreResult;
use crate::fallback::fallback_reply;
use crate::matcher::{RuleMatcher, DEFAULT_FUZZY_THRESHOLD};
use crate::responder::ResponseSelector;
use crate::store::RuleRepository;
use crate::types::{ChatReply, RuleMatch};

/// Resolves utterances to replies against a rule store
#[derive(Clone)]
pub struct ChatEngine {
    store: Arc<dyn RuleRepository>,
    matcher: RuleMatcher,
    selector: ResponseSelector,
    fuzzy_threshold: u8,
}

impl ChatEngine {
    pub fn new(store: Arc<dyn RuleRepository>) -> Self {
        Self {
            matcher: RuleMatcher::new(store.clone()),
            selector: ResponseSelector::new(store.clone()),
            store,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// Override the default fuzzy threshold used by [`ChatEngine::resolve`]
    pub fn with_fuzzy_threshold(mut self, fuzzy_threshold: u8) -> Self {
        self.fuzzy_threshold = fuzzy_threshold;
        self
    }

    pub fn fuzzy_threshold(&self) -> u8 {
        self.fuzzy_threshold
    }

    pub fn store(&self) -> &Arc<dyn RuleRepository> {
        &self.store
    }

    /// Resolve with the configured threshold and a fresh thread-local RNG
    pub fn resolve(&self, user_text: &str) -> StoreResult<ChatReply> {
        self.resolve_with(user_text, self.fuzzy_threshold, &mut rand::thread_rng())
    }

    /// Resolve with an explicit threshold and random source
    #[instrument(skip(self, rng))]
    pub fn resolve_with<R: Rng + ?Sized>(
        &self,
        user_text: &str,
        fuzzy_threshold: u8,
        rng: &mut R,
    ) -> StoreResult<ChatReply> {
        let Some(rule_match) = self.matcher.find_rule(user_text, fuzzy_threshold)? else {
            return Ok(fallback_reply());
        };

        match self.selector.select(&rule_match, rng)? {
            Some(reply) => {
                debug!(method = %reply.method, rule_id = ?reply.rule_id, "Resolved");
                Ok(reply)
            }
            None => Ok(fallback_reply()),
        }
    }

    /// Run only the match cascade
    pub fn find_rule(
        &self,
        user_text: &str,
        fuzzy_threshold: u8,
    ) -> StoreResult<Option<RuleMatch>> {
        self.matcher.find_rule(user_text, fuzzy_threshold)
    }
}
