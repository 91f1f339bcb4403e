//! HTTP request handlers for the N-th maximum service.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use nthmax::{ErrorKind, NthMaxError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

/// Query parameters for the N-th maximum endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NthMaxQuery {
    /// Path to the spreadsheet file. Relative paths are resolved against
    /// `NTHMAX_BASE_DIR` when it is set.
    pub file_path: String,
    /// Position of the requested maximum (1 = largest).
    pub n: i64,
}

/// Successful N-th maximum response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NthMaxResponse {
    /// The N-th largest value in the first column of the first sheet.
    pub value: i64,
    /// Position that was requested.
    pub n: usize,
    /// File path as supplied by the caller.
    pub file_path: String,
    /// Rows read from the sheet.
    pub rows_scanned: usize,
    /// Numeric cells found in the first column.
    pub numeric_values: usize,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Get the N-th largest number in the first column of a spreadsheet.
///
/// # Query Parameters
///
/// - `filePath`: Path to an xlsx/xls/ods file
/// - `n`: Position of the requested maximum (1 = largest)
///
/// # Returns
///
/// - `200 OK` with the value on success
/// - `400 Bad Request` if the file does not exist, `n` is not positive, or the
///   column holds fewer than `n` numbers
/// - `500 Internal Server Error` if the file cannot be read
#[utoipa::path(
    get,
    path = "/api/xlsx/max-number",
    tag = "xlsx",
    params(NthMaxQuery),
    responses(
        (status = 200, description = "N-th maximum found", body = NthMaxResponse),
        (status = 400, description = "Missing file, invalid n or not enough numbers", body = ErrorResponse),
        (status = 500, description = "The file could not be read", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_nth_max(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NthMaxQuery>,
) -> impl IntoResponse {
    tracing::debug!(file_path = %query.file_path, n = query.n, "N-th maximum query");

    // Workbook parsing is blocking I/O
    let service = state.service.clone();
    let file_path = query.file_path.clone();
    let n = query.n;
    let result = tokio::task::spawn_blocking(move || service.nth_max(&file_path, n)).await;

    match result {
        Ok(Ok(outcome)) => {
            tracing::info!(
                file_path = %query.file_path,
                n = outcome.n,
                value = outcome.value,
                rows_scanned = outcome.rows_scanned,
                "N-th maximum found"
            );
            (
                StatusCode::OK,
                Json(NthMaxResponse {
                    value: outcome.value,
                    n: outcome.n,
                    file_path: query.file_path,
                    rows_scanned: outcome.rows_scanned,
                    numeric_values: outcome.numeric_values,
                }),
            )
                .into_response()
        }
        Ok(Err(e)) => error_response(&query.file_path, query.n, e),
        Err(e) => {
            tracing::error!(file_path = %query.file_path, n = query.n, error = %e, "Worker task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal error while reading file".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Map an [`NthMaxError`] to an HTTP status.
pub fn status_for(e: &NthMaxError) -> StatusCode {
    match e.kind() {
        ErrorKind::BadInput | ErrorKind::InsufficientData => StatusCode::BAD_REQUEST,
        ErrorKind::SourceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Create an error response for N-th maximum queries.
fn error_response(file_path: &str, n: i64, e: NthMaxError) -> axum::response::Response {
    let status = status_for(&e);

    if status.is_server_error() {
        tracing::error!(file_path = file_path, n = n, error = %e, "Failed to read file");
    } else {
        tracing::warn!(file_path = file_path, n = n, error = %e, "N-th maximum query rejected");
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_query_deserialize() {
        let json = r#"{"filePath": "/data/numbers.xlsx", "n": 3}"#;
        let query: NthMaxQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.file_path, "/data/numbers.xlsx");
        assert_eq!(query.n, 3);
    }

    #[test]
    fn test_response_serialize() {
        let response = NthMaxResponse {
            value: 15,
            n: 2,
            file_path: "numbers.xlsx".to_string(),
            rows_scanned: 5,
            numeric_values: 5,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""value":15"#));
        assert!(json.contains(r#""filePath":"numbers.xlsx""#));
        assert!(json.contains(r#""rowsScanned":5"#));
    }

    #[test]
    fn test_health_response_serialize() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("0.1.0"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&NthMaxError::FileNotFound {
                path: PathBuf::from("x.xlsx")
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&NthMaxError::InvalidArgument { n: 0 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&NthMaxError::InsufficientData {
                requested: 4,
                found: 1
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&NthMaxError::NonNumericCell {
                row: 2,
                value: "abc".to_string()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&NthMaxError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied"
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
