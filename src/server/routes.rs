use axum::routing::get;
use axum::Router;

use crate::server::handlers;

/// JSON API routes, nested under /api.
pub fn api_router() -> Router {
    Router::new()
        .route("/graph", get(handlers::get_graph))
        .route("/search", get(handlers::search_graph))
        .route("/ask_question", get(handlers::ask_question))
}

/// The three HTML page routes.
pub fn page_router() -> Router {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/search.html", get(handlers::search_page))
        .route("/question.html", get(handlers::question_page))
}
