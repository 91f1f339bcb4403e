//! nthmax Service - HTTP microservice for N-th maximum queries over spreadsheets.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NTHMAX_BASE_DIR` | Directory for resolving relative file paths | None |
//! | `NTHMAX_NON_NUMERIC` | Handling of text cells in column A: "fail" or "skip" | fail |
//! | `NTHMAX_PORT` | HTTP server port | 8080 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /api/xlsx/max-number?filePath=X&n=N` - N-th largest number in column A
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use nthmax::NthMaxServiceBuilder;
use nthmax_service::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nthmax_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load port from environment (service-specific config)
    let port: u16 = std::env::var("NTHMAX_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // The library handles NTHMAX_BASE_DIR and NTHMAX_NON_NUMERIC
    let service = NthMaxServiceBuilder::from_env()?.build();

    tracing::info!(
        base_dir = ?service.base_dir().map(|p| p.display().to_string()),
        non_numeric = %service.non_numeric_policy(),
        port = port,
        "Starting nthmax service"
    );

    let state = Arc::new(AppState { service });
    let app = app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
