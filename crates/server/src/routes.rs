pub mod auth;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: health, OpenAPI document and the two auth routes
pub fn build_router(state: auth::ServerState, cors: CorsLayer) -> Router {
    // Public routes (health + OpenAPI document)
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Credential routes
    let auth_routes = Router::new()
        .route("/auth/users", post(auth::register))
        .route("/auth/tokens", post(auth::login))
        .with_state(state);

    // Compose
    public
        .merge(auth_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // request arrived
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                // status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx and transport failures at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
