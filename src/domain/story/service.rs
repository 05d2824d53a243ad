use super::error::StoryServiceError;
use crate::domain::generation::{MediaAsset, StoryRequest};
use crate::domain::story::{Page, Story, StoryDraft, StorySummary, Voice};
use crate::infrastructure::repositories::{
    audio_path, image_path, AssetStorage, GenerationRepository, StoryRepository, AUDIO_BUCKET,
    AUDIO_CONTENT_TYPE, IMAGE_BUCKET, IMAGE_CONTENT_TYPE,
};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;
use uuid::Uuid;

pub struct StoryService {
    story_repo: Arc<StoryRepository>,
    generation_repo: Arc<dyn GenerationRepository>,
    asset_storage: Arc<dyn AssetStorage>,
}

impl StoryService {
    pub fn new(
        story_repo: Arc<StoryRepository>,
        generation_repo: Arc<dyn GenerationRepository>,
        asset_storage: Arc<dyn AssetStorage>,
    ) -> Self {
        Self {
            story_repo,
            generation_repo,
            asset_storage,
        }
    }
}

#[async_trait]
pub trait StoryServiceApi: Send + Sync {
    /// Generate a story from a request and persist it with all of its assets
    async fn create_story(&self, request: StoryRequest) -> Result<String, StoryServiceError>;

    /// Persist a drafted story: metadata, per-page image and narration, page rows.
    /// On any failure nothing of the story is left behind.
    async fn save_story_full(&self, draft: StoryDraft) -> Result<String, StoryServiceError>;

    async fn get_story(&self, story_id: &str) -> Result<Story, StoryServiceError>;

    async fn get_all_stories(&self) -> Result<Vec<StorySummary>, StoryServiceError>;
}

#[async_trait]
impl StoryServiceApi for StoryService {
    async fn create_story(&self, request: StoryRequest) -> Result<String, StoryServiceError> {
        tracing::info!(
            page_count = request.page_count,
            art_style = %request.art_style,
            voice = %request.voice,
            "Generating story"
        );

        let draft = self.generation_repo.generate_story(&request).await?;
        self.save_story_full(draft).await
    }

    async fn save_story_full(&self, draft: StoryDraft) -> Result<String, StoryServiceError> {
        validate_pages(&draft.pages)?;

        let story_id = self
            .story_repo
            .create_story(&draft.title, draft.voice, draft.educational_theme.as_deref())
            .await
            .map_err(|e| StoryServiceError::persistence("Could not save story metadata.", e))?;

        let id = story_id.to_string();

        let pages = match self.process_pages(&id, &draft.pages, draft.voice).await {
            Ok(pages) => pages,
            Err(e) => {
                tracing::error!(story_id = %id, error = %e, "Story assets failed, rolling back");
                self.discard_story(story_id, &draft.pages).await;
                return Err(e);
            }
        };

        if let Err(e) = self.story_repo.insert_pages(story_id, &pages).await {
            tracing::error!(story_id = %id, error = %e, "Page insert failed, rolling back");
            self.discard_story(story_id, &draft.pages).await;
            return Err(StoryServiceError::persistence(
                "Could not save the story pages.",
                e,
            ));
        }

        tracing::info!(story_id = %id, pages = pages.len(), "Story saved");

        Ok(id)
    }

    async fn get_story(&self, story_id: &str) -> Result<Story, StoryServiceError> {
        let id = Uuid::parse_str(story_id).map_err(|_| StoryServiceError::NotFound)?;

        let story = self
            .story_repo
            .find_by_id(id)
            .await
            .map_err(|e| {
                tracing::error!(story_id = %id, error = %e, "Failed to fetch story");
                StoryServiceError::Dependency("Could not fetch story.".to_string())
            })?
            .ok_or(StoryServiceError::NotFound)?;

        let pages = self.story_repo.find_pages(id).await.map_err(|e| {
            tracing::error!(story_id = %id, error = %e, "Failed to fetch story pages");
            StoryServiceError::Dependency("Could not fetch story pages.".to_string())
        })?;

        Ok(Story::from_rows(story, pages))
    }

    async fn get_all_stories(&self) -> Result<Vec<StorySummary>, StoryServiceError> {
        self.story_repo.list_summaries().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch stories");
            StoryServiceError::Dependency("Could not fetch stories.".to_string())
        })
    }
}

impl StoryService {
    /// Run every page concurrently; the first failure cancels the rest
    async fn process_pages(
        &self,
        story_id: &str,
        pages: &[Page],
        voice: Voice,
    ) -> Result<Vec<Page>, StoryServiceError> {
        try_join_all(
            pages
                .iter()
                .map(|page| self.process_page(story_id, page, voice)),
        )
        .await
    }

    async fn process_page(
        &self,
        story_id: &str,
        page: &Page,
        voice: Voice,
    ) -> Result<Page, StoryServiceError> {
        let image = async {
            let asset = self.generation_repo.generate_image(&page.image_prompt).await?;
            self.upload(
                IMAGE_BUCKET,
                image_path(story_id, page.page_number),
                IMAGE_CONTENT_TYPE,
                asset,
            )
            .await
        };

        let audio = async {
            let asset = self.generation_repo.generate_speech(&page.text, voice).await?;
            self.upload(
                AUDIO_BUCKET,
                audio_path(story_id, page.page_number),
                AUDIO_CONTENT_TYPE,
                asset,
            )
            .await
        };

        let (image_url, audio_url) = futures::try_join!(image, audio)?;

        tracing::debug!(story_id = story_id, page = page.page_number, "Page assets stored");

        Ok(Page {
            image_url: Some(image_url),
            audio_url: Some(audio_url),
            ..page.clone()
        })
    }

    /// Store an asset under its bucket's fixed content type
    async fn upload(
        &self,
        bucket: &str,
        path: String,
        content_type: &str,
        asset: MediaAsset,
    ) -> Result<String, StoryServiceError> {
        if asset.mime_type != content_type {
            tracing::debug!(
                bucket = bucket,
                path = %path,
                reported = %asset.mime_type,
                stored = content_type,
                "Storing asset under the bucket content type"
            );
        }

        self.asset_storage
            .upload(bucket, &path, asset.bytes, content_type)
            .await
            .map_err(StoryServiceError::Persistence)
    }

    /// Best-effort removal of everything a failed save may have written
    async fn discard_story(&self, story_id: Uuid, pages: &[Page]) {
        let id = story_id.to_string();
        let image_paths: Vec<String> = pages
            .iter()
            .map(|p| image_path(&id, p.page_number))
            .collect();
        let audio_paths: Vec<String> = pages
            .iter()
            .map(|p| audio_path(&id, p.page_number))
            .collect();

        let (images, audio) = futures::join!(
            self.asset_storage.remove(IMAGE_BUCKET, &image_paths),
            self.asset_storage.remove(AUDIO_BUCKET, &audio_paths)
        );
        for result in [images, audio] {
            if let Err(e) = result {
                tracing::warn!(story_id = %id, error = %e, "Failed to remove story assets");
            }
        }

        match self.story_repo.delete(story_id).await {
            Ok(_) => tracing::info!(story_id = %id, "Partial story removed"),
            Err(e) => tracing::error!(story_id = %id, error = %e, "Failed to remove partial story"),
        }
    }
}

/// A story must have at least one page, numbered 1..N without gaps
pub fn validate_pages(pages: &[Page]) -> Result<(), StoryServiceError> {
    if pages.is_empty() {
        return Err(StoryServiceError::Invalid(
            "A story needs at least one page.".to_string(),
        ));
    }

    let mut numbers: Vec<i32> = pages.iter().map(|p| p.page_number).collect();
    numbers.sort_unstable();
    let dense = numbers
        .iter()
        .enumerate()
        .all(|(i, n)| *n == i as i32 + 1);

    if !dense {
        return Err(StoryServiceError::Invalid(
            "Page numbers must be unique and run from 1 without gaps.".to_string(),
        ));
    }

    Ok(())
}
