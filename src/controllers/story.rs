use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    domain::story::{
        CreateStoryRequest, CreateStoryResponse, Story, StoryServiceApi, StorySummary,
    },
    error::{AppError, AppResult},
};

pub struct StoryController {
    story_service: Arc<dyn StoryServiceApi>,
}

impl StoryController {
    pub fn new(story_service: Arc<dyn StoryServiceApi>) -> Self {
        Self { story_service }
    }

    /// POST /api/stories - Generate and save a new story
    pub async fn create_story(
        State(controller): State<Arc<StoryController>>,
        Json(request): Json<CreateStoryRequest>,
    ) -> AppResult<(StatusCode, Json<CreateStoryResponse>)> {
        let request = request.into_story_request().map_err(AppError::from)?;

        let id = controller.story_service.create_story(request).await?;

        Ok((StatusCode::CREATED, Json(CreateStoryResponse { id })))
    }

    /// GET /api/stories - Library listing, newest first
    pub async fn list_stories(
        State(controller): State<Arc<StoryController>>,
    ) -> AppResult<Json<Vec<StorySummary>>> {
        let stories = controller.story_service.get_all_stories().await?;
        Ok(Json(stories))
    }

    /// GET /api/stories/:storyId - Full story with ordered pages
    pub async fn get_story(
        State(controller): State<Arc<StoryController>>,
        Path(story_id): Path<String>,
    ) -> AppResult<Json<Story>> {
        let story = controller.story_service.get_story(&story_id).await?;
        Ok(Json(story))
    }
}
