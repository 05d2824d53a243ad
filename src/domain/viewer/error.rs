use crate::domain::story::StoryServiceError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Viewer session not found.")]
    SessionNotFound,
    #[error("This story has no pages.")]
    EmptyStory,
    #[error("Autoplay cannot be turned on from the last page.")]
    AutoplayUnavailable,
    #[error("Narration is not available for this page.")]
    NarrationUnavailable,
    #[error(transparent)]
    Story(#[from] StoryServiceError),
}

impl From<ViewerError> for AppError {
    fn from(err: ViewerError) -> Self {
        match err {
            ViewerError::SessionNotFound => AppError::NotFound(err.to_string()),
            ViewerError::EmptyStory
            | ViewerError::AutoplayUnavailable
            | ViewerError::NarrationUnavailable => AppError::Conflict(err.to_string()),
            ViewerError::Story(e) => AppError::from(e),
        }
    }
}
