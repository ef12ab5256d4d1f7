//! Core data model for the phrasebook chat engine
//!
//! Intents group rules and responses. Rules describe how an utterance is
//! matched; responses are the canned replies attached to a rule or intent.
//! None of these are mutated by the matching core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type IntentId = i64;
pub type RuleId = i64;
pub type ResponseId = i64;

/// A named category (e.g. "Greetings", "Trip Planning")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// How a rule's pattern is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Literal text, compared after normalization
    Exact,
    /// Case-insensitive regular expression, searched in the raw input
    Regex,
    /// Comma-separated keyword list, any substring hit wins
    Keyword,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Regex => "regex",
            MatchType::Keyword => "keyword",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(MatchType::Exact),
            "regex" => Ok(MatchType::Regex),
            "keyword" => Ok(MatchType::Keyword),
            other => Err(format!("unknown match type '{}'", other)),
        }
    }
}

/// A single matching directive tied to one intent
///
/// `priority`: lower number = higher precedence. Only the intent-keyword
/// fallback honours it; the other strategies take the first structural hit
/// in store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub intent_id: IntentId,
    pub match_type: MatchType,
    pub pattern: String,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}

impl Rule {
    /// A rule with an empty (or whitespace-only) pattern never matches
    pub fn is_matchable(&self) -> bool {
        !self.pattern.trim().is_empty()
    }
}

/// A canned reply, scoped to an intent and optionally to one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub intent_id: IntentId,
    /// Cleared when the referenced rule is removed
    pub rule_id: Option<RuleId>,
    pub text: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub meaning: Option<String>,
}

/// Which cascade stage produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Exact,
    Regex,
    Keyword,
    Fuzzy,
    IntentKeyword,
    /// No rule (or no eligible response) - canned apology
    Fallback,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "exact",
            MatchMethod::Regex => "regex",
            MatchMethod::Keyword => "keyword",
            MatchMethod::Fuzzy => "fuzzy",
            MatchMethod::IntentKeyword => "intent_keyword",
            MatchMethod::Fallback => "fallback",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful cascade stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: Rule,
    pub method: MatchMethod,
    /// Similarity score, only set for fuzzy matches
    pub score: Option<u8>,
}

impl RuleMatch {
    pub fn new(rule: Rule, method: MatchMethod) -> Self {
        Self {
            rule,
            method,
            score: None,
        }
    }
}

/// Final reply payload returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub intent: Option<String>,
    pub rule_id: Option<RuleId>,
    pub method: MatchMethod,
}

impl ChatReply {
    pub fn is_fallback(&self) -> bool {
        self.method == MatchMethod::Fallback
    }
}
