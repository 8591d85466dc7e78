pub mod handlers;
pub mod models;
pub mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use axum::extract::Extension;
use axum::http::{Method, StatusCode};
use axum::routing::get_service;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::llm::LlmClient;
use crate::store::GraphStore;

/// Shared application state, cloned into each handler: the store handle and
/// LLM client (both internally pooled) plus the page directory.
#[derive(Clone)]
pub struct AppState {
    pub store: GraphStore,
    pub llm: LlmClient,
    pub pages_dir: PathBuf,
}

/// Connect to the graph store and serve HTTP until the process is stopped.
/// The store handle lives in `AppState` for the whole server lifetime and is
/// dropped on return.
pub async fn run_server(host: &str, port: u16, config: Config) -> Result<()> {
    let store = GraphStore::connect(&config.store).await?;
    let llm = LlmClient::new(config.llm.clone());

    let state = AppState {
        store,
        llm,
        pages_dir: config.pages_dir.clone(),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    let static_service = get_service(ServeDir::new(&config.static_dir)).handle_error(
        |err: std::convert::Infallible| async move {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("static file error: {err}"),
            )
        },
    );

    let app = Router::new()
        .merge(routes::page_router())
        .nest("/api", routes::api_router())
        .nest_service("/static", static_service)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!("kgraph server listening on http://{addr}");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
