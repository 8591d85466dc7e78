use serde::{Deserialize, Serialize};

/// Query params for GET /api/graph.
#[derive(Debug, Deserialize)]
pub struct GraphParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    300
}

/// Query params for GET /api/search. `q` stays optional here so the handler
/// can reject blank values with a validation error instead of a framework
/// rejection.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Query params for GET /api/ask_question.
#[derive(Debug, Deserialize)]
pub struct QuestionParams {
    pub q: String,
}

/// Body of every /api/ask_question response, success or failure.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}
