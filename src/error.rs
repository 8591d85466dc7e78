use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors from graph store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("failed to deserialize row: {0}")]
    Deserialize(String),
}

/// Errors calling or parsing the chat-completion API. Callers do not
/// distinguish these variants; they exist for log readability.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected response shape from LLM API")]
    MalformedResponse,

    #[error("LLM API key is not configured")]
    MissingApiKey,
}

/// Errors surfaced directly by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("query parameter `q` must be a non-empty string")]
    EmptyKeyword,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to load page: {0}")]
    Page(#[from] std::io::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyKeyword => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(_) | ApiError::Page(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
