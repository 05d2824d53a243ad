use crate::domain::generation::GenerationError;
use crate::error::{AppError, CONNECTIVITY_HINT};

#[derive(Debug, thiserror::Error)]
pub enum StoryServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("Story not found.")]
    NotFound,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("{0}")]
    Persistence(String),
    #[error("connectivity error: {0}")]
    Connectivity(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryServiceError {
    /// Wrap a failed write with a user-facing context, keeping the backend message
    pub fn persistence(context: &str, err: AppError) -> Self {
        match err {
            AppError::Database(sqlx::Error::Io(e)) => StoryServiceError::Connectivity(e.to_string()),
            AppError::Database(sqlx::Error::PoolTimedOut) => {
                StoryServiceError::Connectivity("database pool timed out".to_string())
            }
            AppError::Database(sqlx::Error::Database(db_err)) => {
                StoryServiceError::Persistence(format!("{} {}", context, db_err.message()))
            }
            other => StoryServiceError::Persistence(format!("{} {}", context, other)),
        }
    }
}

impl From<StoryServiceError> for AppError {
    fn from(err: StoryServiceError) -> Self {
        match err {
            StoryServiceError::Invalid(msg) => AppError::BadRequest(msg),
            StoryServiceError::NotFound => AppError::NotFound("Story not found.".to_string()),
            StoryServiceError::Generation(e) => AppError::from(e),
            StoryServiceError::Persistence(msg) => AppError::from_backend_message(msg),
            StoryServiceError::Connectivity(_) => AppError::Connectivity(CONNECTIVITY_HINT.to_string()),
            StoryServiceError::Dependency(msg) => AppError::Internal(msg),
            StoryServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
