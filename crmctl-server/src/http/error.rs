//! API error type with IntoResponse
//!
//! Errors become `{success: false, message, error?}` envelopes. Client faults
//! map to 400; store faults map to 500 and are logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crmctl_core::models::ValidationError;

use crate::connection::ConnectionError;
use crate::db::StoreError;
use crate::service::ServiceError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Store unreachable (500, logged)
    Connection {
        action: &'static str,
        source: ConnectionError,
    },

    /// Query or insert failed (500, logged)
    Persistence {
        action: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    /// Wrap a service failure that happened while performing `action`.
    pub fn service(action: &'static str, source: ServiceError) -> Self {
        match source {
            ServiceError::Validation(e) => Self::Validation(e),
            ServiceError::Connection(source) => Self::Connection { action, source },
            ServiceError::Persistence(source) => Self::Persistence { action, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Connection { .. } | Self::Persistence { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => json!({
                "success": false,
                "message": e.to_string()
            }),
            Self::Connection { action, source } => server_fault(action, source),
            Self::Persistence { action, source } => server_fault(action, source),
        };

        (status, Json(body)).into_response()
    }
}

/// Log the failure and carry its message back to the caller.
fn server_fault<E>(action: &str, source: &E) -> serde_json::Value
where
    E: std::error::Error + std::fmt::Debug,
{
    tracing::error!(error = %source, "{}", action);
    json!({
        "success": false,
        "message": format!("{}: {}", action, source),
        "error": format!("{:?}", source)
    })
}
