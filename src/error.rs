use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Hint shown instead of a raw transport error when the backend is unreachable
pub const CONNECTIVITY_HINT: &str =
    "Could not connect to the backend. Please verify the storage URL and that the project is active.";

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    MalformedResponse(String),

    #[error("{0}")]
    UpstreamContent(String),

    #[error("{0}")]
    Connectivity(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Persistence(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure - simplified to just message + status code
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration(_) => StatusCode::PRECONDITION_REQUIRED,
            Self::MalformedResponse(_) | Self::UpstreamContent(_) | Self::ExternalService(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Persistence(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert to simplified error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
        }
    }

    /// Build an error from an opaque backend message, rephrasing transport
    /// failures as a connectivity hint
    pub fn from_backend_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if looks_like_connectivity_failure(&message) {
            AppError::Connectivity(CONNECTIVITY_HINT.to_string())
        } else {
            AppError::Persistence(message)
        }
    }
}

/// Whether an error message describes a failed network round trip rather than
/// a rejected request
pub fn looks_like_connectivity_failure(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("fetch")
        || lowered.contains("net::err_name_not_resolved")
        || lowered.contains("error trying to connect")
        || lowered.contains("dns error")
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error
        let status = self.status_code();
        tracing::error!(
            error = %self,
            status = %status.as_u16(),
            "Request failed"
        );

        let error_response = self.to_response();

        (status, Json(error_response)).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
