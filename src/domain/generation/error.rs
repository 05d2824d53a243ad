use crate::error::{AppError, CONNECTIVITY_HINT};

pub const INVALID_STORY_MESSAGE: &str =
    "The AI created an invalid story. Please try a different prompt.";

#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("Gemini API key not found. Please add it via the settings before creating a story.")]
    MissingCredential,
    #[error("{}", INVALID_STORY_MESSAGE)]
    InvalidStory,
    #[error("Failed to generate image.")]
    NoImage,
    #[error("Failed to generate audio.")]
    NoAudio,
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("connectivity error: {0}")]
    Connectivity(String),
    #[error("generation API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("credential store error: {0}")]
    CredentialStore(String),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::MissingCredential => AppError::Configuration(err.to_string()),
            GenerationError::InvalidStory => AppError::MalformedResponse(err.to_string()),
            GenerationError::MalformedResponse(_) => AppError::MalformedResponse(err.to_string()),
            GenerationError::NoImage | GenerationError::NoAudio => {
                AppError::UpstreamContent(err.to_string())
            }
            GenerationError::Connectivity(_) => AppError::Connectivity(CONNECTIVITY_HINT.to_string()),
            GenerationError::Api { .. } => AppError::ExternalService(err.to_string()),
            GenerationError::CredentialStore(msg) => AppError::Internal(msg),
        }
    }
}
