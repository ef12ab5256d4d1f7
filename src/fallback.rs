//! Fixed reply used when nothing matched

use crate::types::{ChatReply, MatchMethod};

/// Apology in Sesotho with an English gloss. Constant, never derived from input.
pub const FALLBACK_TEXT: &str = "Ke kopa tšoarelo, ha ke utloisise.\n\
Ka kōpo hlakisa potso kapa re kopa 'help' \
(I'm sorry, I don't understand. Please rephrase or ask 'help').";

/// The fallback payload: no intent, no rule, method `fallback`
pub fn fallback_reply() -> ChatReply {
    ChatReply {
        text: FALLBACK_TEXT.to_string(),
        intent: None,
        rule_id: None,
        method: MatchMethod::Fallback,
    }
}
