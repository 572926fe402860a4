use activities_core::ActivityError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

// ---------------------------------------------------------------------------
// Internal sentinel for 422 Unprocessable Entity
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 422 through
/// the `anyhow::Error` chain without touching the `ActivityError` enum.
#[derive(Debug)]
struct UnprocessableError(String);

impl std::fmt::Display for UnprocessableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UnprocessableError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. Renders as `{"detail": "..."}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 422 Unprocessable Entity error, used for missing or
    /// malformed request parameters.
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self(UnprocessableError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(u) = self.0.downcast_ref::<UnprocessableError>() {
            let body = serde_json::json!({ "detail": u.0.clone() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<ActivityError>() {
            match e {
                ActivityError::NotFound(_) => StatusCode::NOT_FOUND,
                ActivityError::AlreadyRegistered { .. } | ActivityError::NotRegistered { .. } => {
                    StatusCode::BAD_REQUEST
                }
                ActivityError::InvalidSeed(_) | ActivityError::Io(_) | ActivityError::Yaml(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!("request failed: {:#}", self.0);
        }

        let body = serde_json::json!({ "detail": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
