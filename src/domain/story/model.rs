use super::catalog::Voice;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single illustrated, narrated page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub page_number: i32,
    pub text: String,
    pub image_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Page {
    pub fn new(page_number: i32, text: impl Into<String>, image_prompt: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            image_prompt: image_prompt.into(),
            image_url: None,
            audio_url: None,
        }
    }
}

/// A story as produced by the text model, before it has been persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub pages: Vec<Page>,
    pub voice: Voice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_theme: Option<String>,
}

/// A persisted story with its pages ordered by page number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub pages: Vec<Page>,
    pub voice: Voice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_theme: Option<String>,
}

/// Library entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StorySummary {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct StoryRow {
    pub id: Uuid,
    pub title: String,
    pub voice: Voice,
    pub educational_theme: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PageRow {
    pub page_number: i32,
    pub text: String,
    pub image_prompt: String,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
}

impl From<PageRow> for Page {
    fn from(row: PageRow) -> Self {
        Self {
            page_number: row.page_number,
            text: row.text,
            image_prompt: row.image_prompt,
            image_url: row.image_url,
            audio_url: row.audio_url,
        }
    }
}

impl Story {
    pub fn from_rows(story: StoryRow, pages: Vec<PageRow>) -> Self {
        Self {
            id: story.id.to_string(),
            title: story.title,
            voice: story.voice,
            educational_theme: story.educational_theme,
            pages: pages.into_iter().map(Page::from).collect(),
        }
    }
}
