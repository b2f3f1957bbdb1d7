//! RPC HTTP Server
//!
//! Axum-based HTTP server that handles JSON-RPC requests and serves the
//! report-card page.

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::explorer::EXPLORER_HTML;
use crate::rpc::methods::{handle_request, JsonRpcRequest, JsonRpcResponse, RpcState};

/// Build the HTTP routes
pub fn router(state: Arc<RpcState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(serve_explorer).post(handle_rpc))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Serve until Ctrl+C
pub async fn start_rpc_server(state: Arc<RpcState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("RPC server listening on http://{}", addr);
    tracing::info!("Report card form at http://{}/", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received. Stopping node...");
}

/// Serve the report-card page
async fn serve_explorer() -> Html<&'static str> {
    Html(EXPLORER_HTML)
}

async fn health() -> &'static str {
    "ok"
}

/// Handle incoming JSON-RPC requests
async fn handle_rpc(
    State(state): State<Arc<RpcState>>,
    Json(request): Json<JsonRpcRequest>,
) -> (StatusCode, Json<JsonRpcResponse>) {
    let response = handle_request(&state, request);
    (StatusCode::OK, Json(response))
}
