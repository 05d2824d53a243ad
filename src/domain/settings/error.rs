use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SettingsServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("settings store error: {0}")]
    Store(String),
}

impl From<SettingsServiceError> for AppError {
    fn from(err: SettingsServiceError) -> Self {
        match err {
            SettingsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SettingsServiceError::Store(msg) => AppError::Internal(msg),
        }
    }
}
