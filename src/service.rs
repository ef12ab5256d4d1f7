//! Chat service - transport-neutral request handling
//!
//! ```text
//! {"message": "..."} → validate → ChatEngine::resolve → itinerary formatting
//!                                         │
//!                                         └──► ChatLogSink (after the reply is built)
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chat_log::{ChatLogEntry, ChatLogSink};
use crate::engine::ChatEngine;
use crate::error::ChatError;
use crate::itinerary::format_trip_response;
use crate::types::MatchMethod;

/// Incoming chat request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Reply body returned to chat clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatApiResponse {
    pub status: &'static str,
    pub user_message: String,
    pub bot_reply: String,
    pub intent: Option<String>,
    pub method: MatchMethod,
}

/// Wires the engine to reply formatting and chat history
#[derive(Clone)]
pub struct ChatService {
    engine: ChatEngine,
    log: Arc<dyn ChatLogSink>,
}

impl ChatService {
    pub fn new(engine: ChatEngine, log: Arc<dyn ChatLogSink>) -> Self {
        Self { engine, log }
    }

    pub fn engine(&self) -> &ChatEngine {
        &self.engine
    }

    /// Handle one message. Blank messages are rejected.
    pub fn handle(&self, message: &str) -> Result<ChatApiResponse, ChatError> {
        let user_text = message.trim();
        if user_text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let reply = self.engine.resolve(user_text).map_err(|e| {
            warn!(error = %e, "Rule store failure while resolving");
            e
        })?;
        let bot_reply = format_trip_response(&reply.text);

        // Only link rules that still exist
        let matched_rule = match reply.rule_id {
            Some(id) => self.engine.store().rule(id)?.map(|r| r.id),
            None => None,
        };
        self.log.record(ChatLogEntry::new(
            user_text,
            bot_reply.clone(),
            reply.intent.as_deref(),
            matched_rule,
        ));

        info!(method = %reply.method, intent = ?reply.intent, "Chat reply");
        Ok(ChatApiResponse {
            status: "success",
            user_message: user_text.to_string(),
            bot_reply,
            intent: reply.intent,
            method: reply.method,
        })
    }

    /// Handle a raw JSON request body
    pub fn handle_json(&self, body: &[u8]) -> Result<ChatApiResponse, ChatError> {
        let request: ChatRequest =
            serde_json::from_slice(body).map_err(|e| ChatError::InvalidJson(e.to_string()))?;
        self.handle(&request.message)
    }
}
