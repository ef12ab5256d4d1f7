//! Explore Chat - rule-based phrasebook chat engine
//!
//! Resolves a free-form utterance to a canned reply from a small rule
//! corpus of intents, rules and responses.
//!
//! # Architecture
//!
//! ```text
//! User Text
//!       │
//!       ▼
//! ┌─────────────────────────────────────────┐
//! │  Normalizer                             │
//! │  "  How do I say Hello " → "how do i…"  │
//! └─────────────────────────────────────────┘
//!       │
//!       ▼
//! ┌─────────────────────────────────────────┐
//! │  RuleMatcher (RuleRepository queries)   │
//! │  exact → regex → keyword → fuzzy →      │
//! │  intent keyword                         │
//! └─────────────────────────────────────────┘
//!       │
//!       ├─── no rule ──────────────► Fallback reply
//!       ▼
//! ┌─────────────────────────────────────────┐
//! │  ResponseSelector                       │
//! │  rule responses, else intent responses  │
//! │  random pick + pronunciation/meaning    │
//! └─────────────────────────────────────────┘
//!       │
//!       ▼
//!   ChatReply { text, intent, rule_id, method }
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use explore_chat::{ChatEngine, InMemoryRuleStore, MatchMethod, MatchType, NewResponse};
//!
//! let store = InMemoryRuleStore::new();
//! let intent = store.add_intent("Greetings", "").unwrap();
//! let rule = store
//!     .add_rule(intent.id, MatchType::Exact, "how do i say hello in sesotho", 1)
//!     .unwrap();
//! store
//!     .add_response(NewResponse::for_intent(intent.id, "Lumela").for_rule(rule.id))
//!     .unwrap();
//!
//! let engine = ChatEngine::new(Arc::new(store));
//! let reply = engine.resolve("How do I say hello in Sesotho").unwrap();
//! assert_eq!(reply.text, "Lumela");
//! assert_eq!(reply.method, MatchMethod::Exact);
//! ```

pub mod chat_log;
pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod import;
pub mod itinerary;
pub mod matcher;
pub mod normalize;
pub mod responder;
pub mod service;
pub mod similarity;
pub mod store;
pub mod types;

#[cfg(feature = "server")]
pub mod api;

pub use chat_log::{
    ChatLogEntry, ChatLogSink, InMemoryChatLog, NoopChatLog, TracingChatLog,
};
pub use config::EngineConfig;
pub use engine::ChatEngine;
pub use error::{ChatError, ConfigError, ImportError, StoreError};
pub use fallback::{fallback_reply, FALLBACK_TEXT};
pub use import::{import_dataset, load_store, ImportSummary};
pub use matcher::{RuleMatcher, DEFAULT_FUZZY_THRESHOLD};
pub use responder::ResponseSelector;
pub use service::{ChatApiResponse, ChatRequest, ChatService};
pub use store::{InMemoryRuleStore, NewResponse, RuleRepository};
pub use types::*;
