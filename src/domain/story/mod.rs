pub mod catalog;
pub mod error;
pub mod model;
pub mod service;

pub use catalog::{ArtStyle, Voice};
pub use error::StoryServiceError;
pub use model::{Page, PageRow, Story, StoryDraft, StoryRow, StorySummary};
pub use service::{StoryService, StoryServiceApi};

use crate::domain::generation::StoryRequest;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_COUNT: u8 = 5;
pub const MIN_PAGE_COUNT: u8 = 3;
pub const MAX_PAGE_COUNT: u8 = 10;

/// Request for POST /api/stories
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStoryRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub art_style: ArtStyle,
    #[serde(default)]
    pub voice: Voice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_theme: Option<String>,
}

/// Response for POST /api/stories
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStoryResponse {
    pub id: String,
}

impl CreateStoryRequest {
    pub fn into_story_request(self) -> Result<StoryRequest, StoryServiceError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(StoryServiceError::Invalid(
                "Please enter a story idea!".to_string(),
            ));
        }

        let page_count = self.page_count.unwrap_or(DEFAULT_PAGE_COUNT as u32);
        if !(MIN_PAGE_COUNT as u32..=MAX_PAGE_COUNT as u32).contains(&page_count) {
            return Err(StoryServiceError::Invalid(format!(
                "Page count must be between {} and {}.",
                MIN_PAGE_COUNT, MAX_PAGE_COUNT
            )));
        }

        let educational_theme = self
            .educational_theme
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(StoryRequest {
            prompt: prompt.to_string(),
            page_count: page_count as u8,
            art_style: self.art_style,
            voice: self.voice,
            educational_theme,
        })
    }
}
