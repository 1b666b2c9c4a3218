use std::{future::Future, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    serve, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::assembler::{PromptAssembler, PromptRequest, PromptResponse};
use crate::config::ServerConfig;
use crate::constants::SERVICE_NAME;
use crate::error::ServerError;

// Shared application state
#[derive(Clone)]
struct AppState {
    assembler: Arc<PromptAssembler>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub schema: String,
}

/// Body of the one-shot `/generate` endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub idea: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub prompt: String,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: format!("{} backend is running.", SERVICE_NAME),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema: state.assembler.schema().to_string(),
    })
}

async fn prompt_handler(
    State(state): State<AppState>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ServerError> {
    let Json(request) = payload?;
    let response = state.assembler.handle(&request)?;
    Ok(Json(response))
}

async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ServerError> {
    let Json(request) = payload?;
    let prompt = state.assembler.generate_legacy(&request.idea)?;
    Ok(Json(GenerateResponse { prompt }))
}

/// Build the application router around an assembler.
pub fn router(assembler: PromptAssembler) -> Router {
    let state = AppState {
        assembler: Arc::new(assembler),
    };

    Router::new()
        .route("/", get(health_handler))
        .route("/prompt", post(prompt_handler))
        .route("/generate", post(generate_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Add request logging
}

/// Serve until `shutdown` resolves.
pub async fn start_web_server<F>(config: ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let assembler =
        PromptAssembler::new(config.schema).context("Failed to initialize prompt templates")?;
    let app = router(assembler);

    // Bind using tokio::net::TcpListener; host names are resolved here.
    let target = config.bind_display();
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .context(format!("Failed to bind to address {}", target))?;
    let addr = listener
        .local_addr()
        .context("Failed to read bound address")?;
    info!(schema = %config.schema, "Web server listening on http://{}", addr);

    serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("Web server failed")?;

    info!("Web server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionSchema;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app() -> Router {
        router(PromptAssembler::new(QuestionSchema::Classic).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(health.status, "ok");
        assert_eq!(health.message, "PromptSmith backend is running.");
        assert_eq!(health.schema, "classic");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/prompt")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"idea\": "))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
