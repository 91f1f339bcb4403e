//! nthmax Service Library
//!
//! HTTP handlers, OpenAPI document and router for the N-th maximum service.
//! This library is used by both the nthmax-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use nthmax::NthMaxService;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers.
pub struct AppState {
    /// Spreadsheet query service.
    pub service: NthMaxService,
}

/// OpenAPI documentation for the nthmax service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "nthmax Spreadsheet Service",
        version = "0.1.0",
        description = "Reads XLSX files and finds the N-th largest number in the first column.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(handlers::get_nth_max, handlers::health_check),
    components(schemas(
        handlers::NthMaxResponse,
        handlers::ErrorResponse,
        handlers::HealthResponse,
    )),
    tags(
        (name = "xlsx", description = "Spreadsheet query endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the application router with docs, tracing and CORS layers.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/xlsx/max-number", get(handlers::get_nth_max))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use handlers::{ErrorResponse, HealthResponse, NthMaxQuery, NthMaxResponse};
