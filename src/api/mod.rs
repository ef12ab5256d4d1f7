//! HTTP routes for the chat service
//!
//! - `POST /api/chat/`  `{"message": "..."}` → [`ChatApiResponse`]
//! - `GET  /api/health`
//!
//! Request errors return 400, store failures 500, both as `{"error": "..."}`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use crate::error::ChatError;
use crate::service::{ChatApiResponse, ChatService};

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct ChatState {
    pub service: ChatService,
}

impl ChatState {
    pub fn new(service: ChatService) -> Self {
        Self { service }
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

struct ApiError(ChatError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_chat_router(service: ChatService) -> Router {
    Router::new()
        .route("/api/chat/", post(chat))
        .route("/api/health", get(health))
        .with_state(ChatState::new(service))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/chat/
///
/// The body is parsed by the service so malformed JSON gets the same
/// `{"error": ...}` shape as a blank message.
async fn chat(
    State(state): State<ChatState>,
    body: Bytes,
) -> Result<Json<ChatApiResponse>, ApiError> {
    state.service.handle_json(&body).map(Json).map_err(ApiError)
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
