use std::path::Path;

use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use tracing::{error, info};

use crate::error::ApiError;
use crate::graph::{project, GraphProjection};
use crate::qa;
use crate::server::models::{AskResponse, GraphParams, QuestionParams, SearchParams};
use crate::server::AppState;

/// GET / — the main graph view.
pub async fn index_page(Extension(state): Extension<AppState>) -> Result<Html<String>, ApiError> {
    load_page(&state.pages_dir, "index.html").await.map(Html)
}

/// GET /search.html — the keyword search view.
pub async fn search_page(Extension(state): Extension<AppState>) -> Result<Html<String>, ApiError> {
    load_page(&state.pages_dir, "search.html").await.map(Html)
}

/// GET /question.html — the question-answering view.
pub async fn question_page(
    Extension(state): Extension<AppState>,
) -> Result<Html<String>, ApiError> {
    load_page(&state.pages_dir, "question.html").await.map(Html)
}

/// Read one page file from the templates directory.
pub async fn load_page(dir: &Path, name: &str) -> Result<String, ApiError> {
    Ok(tokio::fs::read_to_string(dir.join(name)).await?)
}

/// GET /api/graph?limit= — projection over the first `limit` edges.
/// Store failures are not caught here; they surface as a plain 500.
pub async fn get_graph(
    Extension(state): Extension<AppState>,
    Query(params): Query<GraphParams>,
) -> Result<Json<GraphProjection>, ApiError> {
    let links = state.store.full_graph(params.limit).await?;
    Ok(Json(project(links)))
}

/// GET /api/search?q= — projection over up to 100 edges matching the keyword.
pub async fn search_graph(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<GraphProjection>, ApiError> {
    let keyword = validate_keyword(params.q.as_deref())?;
    let links = state.store.search(keyword).await?;
    Ok(Json(project(links)))
}

/// Requires a present, non-blank keyword. Rejected before any store access.
pub fn validate_keyword(q: Option<&str>) -> Result<&str, ApiError> {
    match q {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ApiError::EmptyKeyword),
    }
}

/// GET /api/ask_question?q= — the three-step QA pipeline. Every failure is
/// collapsed into an answer-shaped body with status 500; callers must check
/// the status code, not just parse the body.
pub async fn ask_question(
    Extension(state): Extension<AppState>,
    Query(params): Query<QuestionParams>,
) -> (StatusCode, Json<AskResponse>) {
    info!(question = %params.q, "answering question");

    match qa::answer_question(&state.store, &state.llm, &params.q).await {
        Ok(answer) => (StatusCode::OK, Json(AskResponse { answer })),
        Err(e) => {
            error!("question answering failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AskResponse {
                    answer: format!("Error: {e}"),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_keyword_accepts_non_blank() {
        assert_eq!(validate_keyword(Some("cat")).unwrap(), "cat");
    }

    #[test]
    fn validate_keyword_keeps_surrounding_whitespace() {
        // Trimming is only for the blank check; the store sees the keyword
        // as sent.
        assert_eq!(validate_keyword(Some(" cat ")).unwrap(), " cat ");
    }

    #[test]
    fn validate_keyword_rejects_missing() {
        assert!(validate_keyword(None).is_err());
    }

    #[test]
    fn validate_keyword_rejects_empty_and_blank() {
        assert!(validate_keyword(Some("")).is_err());
        assert!(validate_keyword(Some("   ")).is_err());
    }

    #[test]
    fn pipeline_errors_render_with_error_prefix() {
        let err = anyhow::anyhow!("LLM API key is not configured");
        assert_eq!(
            format!("Error: {err}"),
            "Error: LLM API key is not configured"
        );
    }

    #[tokio::test]
    async fn load_page_returns_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>hi</html>").unwrap();

        let page = load_page(dir.path(), "index.html").await.unwrap();
        assert_eq!(page, "<html>hi</html>");
    }

    #[tokio::test]
    async fn load_page_errors_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_page(dir.path(), "missing.html").await.unwrap_err();
        assert!(matches!(err, ApiError::Page(_)));
    }
}
