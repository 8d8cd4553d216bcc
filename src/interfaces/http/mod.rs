//! HTTP request adapter.
//!
//! Extracts the verb and form fields from each request, hands them to the
//! `SubmissionPipeline`, and renders the resulting `Outcome` as a response.
//! Every path is served by the same handler.

pub mod form_reader;
pub mod response;

use crate::application::pipeline::{SUBMIT_METHOD, SubmissionPipeline};
use crate::config::ServerConfig;
use crate::domain::form::FormData;
use crate::error::Result;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    pipeline: Arc<SubmissionPipeline>,
}

/// Builds the router serving submissions on every path.
pub fn router(pipeline: Arc<SubmissionPipeline>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", any(submit))
        .fallback(submit)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState { pipeline })
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig, pipeline: Arc<SubmissionPipeline>) -> Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    info!("photomailer listening on {}", listener.local_addr()?);

    axum::serve(listener, router(pipeline, config.max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("photomailer stopped");
    Ok(())
}

async fn submit(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    // Bodies of requests the pipeline will reject on the verb are never read.
    let form = if method.as_str() == SUBMIT_METHOD {
        form_reader::read_form(request).await
    } else {
        FormData::new()
    };

    state
        .pipeline
        .handle(method.as_str(), &form)
        .await
        .into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
