//! Chat history recording
//!
//! Written by the chat service after the engine has produced a reply. The
//! engine itself never writes.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::types::RuleId;

/// One user/bot exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLogEntry {
    pub id: Uuid,
    pub user_text: String,
    pub bot_text: String,
    /// Empty when nothing matched
    pub matched_intent: String,
    /// Only set when the rule still exists at logging time
    pub matched_rule: Option<RuleId>,
    pub created_at: DateTime<Utc>,
}

impl ChatLogEntry {
    pub fn new(
        user_text: impl Into<String>,
        bot_text: impl Into<String>,
        matched_intent: Option<&str>,
        matched_rule: Option<RuleId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_text: user_text.into(),
            bot_text: bot_text.into(),
            matched_intent: matched_intent.unwrap_or_default().to_string(),
            matched_rule,
            created_at: Utc::now(),
        }
    }
}

/// Append-only destination for chat history
pub trait ChatLogSink: Send + Sync {
    fn record(&self, entry: ChatLogEntry);
}

/// Emits each entry as an `info` event and keeps nothing.
/// Suited to long-running processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingChatLog;

impl ChatLogSink for TracingChatLog {
    fn record(&self, entry: ChatLogEntry) {
        info!(
            id = %entry.id,
            user_text = %entry.user_text,
            matched_intent = %entry.matched_intent,
            matched_rule = ?entry.matched_rule,
            bot_chars = entry.bot_text.chars().count(),
            "Chat exchange"
        );
    }
}

/// Keeps entries in memory, oldest first. Unbounded; meant for tests.
#[derive(Debug, Default)]
pub struct InMemoryChatLog {
    entries: Mutex<Vec<ChatLogEntry>>,
}

impl InMemoryChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ChatLogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChatLogSink for InMemoryChatLog {
    fn record(&self, entry: ChatLogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

/// Discards every entry
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChatLog;

impl ChatLogSink for NoopChatLog {
    fn record(&self, _entry: ChatLogEntry) {}
}
