//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::Utc;
use explore_chat::error::{StoreError, StoreResult};
use explore_chat::store::sort_by_priority;
use explore_chat::{
    InMemoryRuleStore, Intent, IntentId, MatchType, NewResponse, Response, Rule, RuleId,
    RuleRepository,
};

pub const HELLO_PATTERN: &str = "how do i say hello in sesotho";
pub const TRIP_PATTERN: &str = "plan a trip to semonkong";
pub const ITINERARY: &str = r#"[{"day_number": 1, "location": "Maseru", "activities": ["Thaba Bosiu"]},
 {"day_number": 2, "location": "Semonkong", "activities": ["Maletsunyane Falls"]}]"#;

/// Rule ids of the fixture store
pub struct FixtureIds {
    pub hello: RuleId,
    pub hi_regex: RuleId,
    pub food_keyword: RuleId,
    pub trip_exact: RuleId,
    pub trip_top: RuleId,
    pub taxi_keyword: RuleId,
}

/// Small phrasebook covering every cascade stage.
///
/// - Greetings: exact hello (rule response with pronunciation/meaning), regex `\bhi\b`
/// - Food: keyword `papa, moroho`, intent-level response only
/// - Trip Planning: exact trip rule with itinerary, keyword rule at priority 5
/// - Weather: no rules
/// - Transport: keyword `taxi`, no responses at all
pub fn fixture_store() -> (Arc<InMemoryRuleStore>, FixtureIds) {
    let store = InMemoryRuleStore::new();

    let greetings = store.add_intent("Greetings", "Saying hello").unwrap();
    let hello = store
        .add_rule(greetings.id, MatchType::Exact, HELLO_PATTERN, 10)
        .unwrap();
    store
        .add_response(
            NewResponse::for_intent(greetings.id, "Lumela")
                .for_rule(hello.id)
                .with_pronunciation("loo-MEH-lah")
                .with_meaning("Hello"),
        )
        .unwrap();
    let hi_regex = store
        .add_rule(greetings.id, MatchType::Regex, r"\bhi\b", 20)
        .unwrap();
    store
        .add_response(NewResponse::for_intent(greetings.id, "Hi! Lumela!").for_rule(hi_regex.id))
        .unwrap();

    let food = store.add_intent("Food", "").unwrap();
    let food_keyword = store
        .add_rule(food.id, MatchType::Keyword, "papa, moroho", 50)
        .unwrap();
    store
        .add_response(NewResponse::for_intent(food.id, "Try papa with moroho"))
        .unwrap();

    let trip = store.add_intent("Trip Planning", "").unwrap();
    let trip_exact = store
        .add_rule(trip.id, MatchType::Exact, TRIP_PATTERN, 10)
        .unwrap();
    store
        .add_response(NewResponse::for_intent(trip.id, ITINERARY).for_rule(trip_exact.id))
        .unwrap();
    let trip_top = store
        .add_rule(trip.id, MatchType::Keyword, "itinerary", 5)
        .unwrap();
    store
        .add_response(NewResponse::for_intent(trip.id, "Ask me for an itinerary"))
        .unwrap();

    store.add_intent("Weather", "").unwrap();

    let transport = store.add_intent("Transport", "").unwrap();
    let taxi_keyword = store
        .add_rule(transport.id, MatchType::Keyword, "taxi", 50)
        .unwrap();

    (
        Arc::new(store),
        FixtureIds {
            hello: hello.id,
            hi_regex: hi_regex.id,
            food_keyword: food_keyword.id,
            trip_exact: trip_exact.id,
            trip_top: trip_top.id,
            taxi_keyword: taxi_keyword.id,
        },
    )
}

pub fn rule(id: RuleId, intent_id: IntentId, match_type: MatchType, pattern: &str, priority: i32) -> Rule {
    Rule {
        id,
        intent_id,
        match_type,
        pattern: pattern.to_string(),
        priority,
        created_at: Utc::now(),
    }
}

/// Store returning rules in exactly the order given, recording every query
#[derive(Default)]
pub struct StubStore {
    pub intents: Vec<Intent>,
    pub rules: Vec<Rule>,
    pub responses: Vec<Response>,
    /// Query name that fails with `StoreError::Unavailable`
    pub fail_on: Option<&'static str>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl StubStore {
    fn enter(&self, name: &'static str) -> StoreResult<()> {
        self.calls.lock().unwrap().push(name);
        if self.fail_on == Some(name) {
            return Err(StoreError::Unavailable(format!("{} offline", name)));
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }
}

impl RuleRepository for StubStore {
    fn rules_by_match_type(&self, match_type: MatchType) -> StoreResult<Vec<Rule>> {
        self.enter("rules_by_match_type")?;
        Ok(self
            .rules
            .iter()
            .filter(|r| r.match_type == match_type)
            .cloned()
            .collect())
    }

    fn rules_by_priority(&self, intent_id: IntentId) -> StoreResult<Vec<Rule>> {
        self.enter("rules_by_priority")?;
        let mut rules: Vec<Rule> = self
            .rules
            .iter()
            .filter(|r| r.intent_id == intent_id)
            .cloned()
            .collect();
        sort_by_priority(&mut rules);
        Ok(rules)
    }

    fn responses_by_rule(&self, rule_id: RuleId) -> StoreResult<Vec<Response>> {
        self.enter("responses_by_rule")?;
        Ok(self
            .responses
            .iter()
            .filter(|r| r.rule_id == Some(rule_id))
            .cloned()
            .collect())
    }

    fn responses_by_intent(&self, intent_id: IntentId) -> StoreResult<Vec<Response>> {
        self.enter("responses_by_intent")?;
        Ok(self
            .responses
            .iter()
            .filter(|r| r.intent_id == intent_id)
            .cloned()
            .collect())
    }

    fn all_intents(&self) -> StoreResult<Vec<Intent>> {
        self.enter("all_intents")?;
        Ok(self.intents.clone())
    }

    fn intent(&self, intent_id: IntentId) -> StoreResult<Option<Intent>> {
        self.enter("intent")?;
        Ok(self.intents.iter().find(|i| i.id == intent_id).cloned())
    }

    fn rule(&self, rule_id: RuleId) -> StoreResult<Option<Rule>> {
        self.enter("rule")?;
        Ok(self.rules.iter().find(|r| r.id == rule_id).cloned())
    }
}

pub fn intent(id: IntentId, name: &str) -> Intent {
    Intent {
        id,
        name: name.to_string(),
        description: String::new(),
    }
}

pub fn response(id: i64, intent_id: IntentId, rule_id: Option<RuleId>, text: &str) -> Response {
    Response {
        id,
        intent_id,
        rule_id,
        text: text.to_string(),
        pronunciation: None,
        meaning: None,
    }
}
