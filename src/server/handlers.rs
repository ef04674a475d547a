//! HTTP request handlers.

use std::{any::Any, sync::Arc};

use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{Response, StatusCode},
    response::IntoResponse
};
use serde::Serialize;
use serde_json::Value;

use super::AppState;
use crate::{
    engine::AnalysisResult,
    format::format_query,
    query::{ComplexityReport, query_complexity}
};

const MISSING_QUERY: &str = "Missing 'query' field in request body";
const EMPTY_QUERY: &str = "Query cannot be empty";
const ANALYSIS_FAILED: &str = "Internal server error during query analysis";
const NOT_FOUND: &str = "Endpoint not found";
const INTERNAL_ERROR: &str = "Internal server error";

/// Characters of the statement included in request logs
const LOG_PREVIEW_CHARS: usize = 100;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status:  &'static str,
    pub service: String
}

/// Formatter response
#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub formatted_query: String
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error:   String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>
}

/// Error returned by a handler
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request, never reaches the engine
    BadRequest(&'static str),
    /// No route matched
    NotFound,
    /// Failure while serving a well-formed request
    Internal {
        error:   &'static str,
        details: String
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            Self::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error:   error.to_string(),
                    details: None
                }
            ),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error:   NOT_FOUND.to_string(),
                    details: None
                }
            ),
            Self::Internal {
                error,
                details
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error:   error.to_string(),
                    details: Some(details)
                }
            )
        };
        (status, Json(body)).into_response()
    }
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy",
        service: state.service_name.clone()
    })
}

pub async fn analyze_query(
    State(state): State<Arc<AppState>>,
    body: Bytes
) -> Result<Json<AnalysisResult>, ApiError> {
    let query = extract_query(&body)?;
    tracing::info!("Analyzing query: {}...", preview(&query));

    let worker = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || worker.analyzer.analyze(&query))
        .await
        .map_err(|e| {
            tracing::error!("Error analyzing query: {}", e);
            ApiError::Internal {
                error:   ANALYSIS_FAILED,
                details: e.to_string()
            }
        })?;

    tracing::info!("Analysis completed successfully");
    Ok(Json(result))
}

pub async fn format_sql(body: Bytes) -> Result<Json<FormatResponse>, ApiError> {
    let query = extract_query(&body)?;
    Ok(Json(FormatResponse {
        formatted_query: format_query(&query)
    }))
}

pub async fn complexity(body: Bytes) -> Result<Json<ComplexityReport>, ApiError> {
    let query = extract_query(&body)?;
    Ok(Json(query_complexity(&query)))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Uncaught panics inside the service stack become a generic 500
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        String::from("unknown panic")
    };
    tracing::error!("Unhandled panic while serving request: {}", details);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error:   INTERNAL_ERROR.to_string(),
            details: None
        })
    )
        .into_response()
}

/// Pull the trimmed `query` string out of a JSON body.
fn extract_query(body: &[u8]) -> Result<String, ApiError> {
    let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
        return Err(ApiError::BadRequest(MISSING_QUERY));
    };
    match fields.remove("query") {
        None => Err(ApiError::BadRequest(MISSING_QUERY)),
        Some(Value::String(query)) => {
            let query = query.trim();
            if query.is_empty() {
                Err(ApiError::BadRequest(EMPTY_QUERY))
            } else {
                Ok(query.to_string())
            }
        }
        Some(other) => Err(ApiError::Internal {
            error:   ANALYSIS_FAILED,
            details: format!("'query' must be a string, got {}", json_type(&other))
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object"
    }
}

fn preview(query: &str) -> String {
    query.chars().take(LOG_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_query_trims() {
        let query = extract_query(br#"{"query": "  SELECT 1  "}"#).unwrap();
        assert_eq!(query, "SELECT 1");
    }

    #[test]
    fn test_extract_query_missing_field() {
        assert!(matches!(
            extract_query(br#"{"sql": "SELECT 1"}"#),
            Err(ApiError::BadRequest(MISSING_QUERY))
        ));
        assert!(matches!(
            extract_query(b"not json"),
            Err(ApiError::BadRequest(MISSING_QUERY))
        ));
    }

    #[test]
    fn test_extract_query_blank() {
        assert!(matches!(
            extract_query(br#"{"query": "   "}"#),
            Err(ApiError::BadRequest(EMPTY_QUERY))
        ));
    }

    #[test]
    fn test_extract_query_wrong_type() {
        let Err(ApiError::Internal {
            details, ..
        }) = extract_query(br#"{"query": 42}"#)
        else {
            panic!("expected internal error");
        };
        assert!(details.contains("number"));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(250);
        assert_eq!(preview(&long).len(), LOG_PREVIEW_CHARS);
    }
}
