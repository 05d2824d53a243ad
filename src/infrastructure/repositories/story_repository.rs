use crate::domain::story::{Page, PageRow, StoryRow, StorySummary, Voice};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use sqlx::{Postgres, QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

pub struct StoryRepository {
    pool: Arc<DbPool>,
}

impl StoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Insert story metadata and return the generated id
    pub async fn create_story(
        &self,
        title: &str,
        voice: Voice,
        educational_theme: Option<&str>,
    ) -> AppResult<Uuid> {
        let pool = self.pool.as_ref();
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO stories (title, voice, educational_theme)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(voice)
        .bind(educational_theme)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Insert all pages of a story in a single statement
    pub async fn insert_pages(&self, story_id: Uuid, pages: &[Page]) -> AppResult<()> {
        if pages.is_empty() {
            return Ok(());
        }

        let pool = self.pool.as_ref();
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO pages (story_id, page_number, text, image_prompt, image_url, audio_url) ",
        );
        builder.push_values(pages, |mut row, page| {
            row.push_bind(story_id)
                .push_bind(page.page_number)
                .push_bind(&page.text)
                .push_bind(&page.image_prompt)
                .push_bind(&page.image_url)
                .push_bind(&page.audio_url);
        });

        builder.build().execute(pool).await?;

        Ok(())
    }

    /// Get story metadata by ID
    pub async fn find_by_id(&self, story_id: Uuid) -> AppResult<Option<StoryRow>> {
        let pool = self.pool.as_ref();
        let story = sqlx::query_as::<_, StoryRow>(
            r#"
            SELECT id, title, voice, educational_theme
            FROM stories
            WHERE id = $1
            "#,
        )
        .bind(story_id)
        .fetch_optional(pool)
        .await?;

        Ok(story)
    }

    /// Get all pages of a story ordered by page number
    pub async fn find_pages(&self, story_id: Uuid) -> AppResult<Vec<PageRow>> {
        let pool = self.pool.as_ref();
        let pages = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT page_number, text, image_prompt, image_url, audio_url
            FROM pages
            WHERE story_id = $1
            ORDER BY page_number ASC
            "#,
        )
        .bind(story_id)
        .fetch_all(pool)
        .await?;

        Ok(pages)
    }

    /// Library listing, newest first
    pub async fn list_summaries(&self) -> AppResult<Vec<StorySummary>> {
        let pool = self.pool.as_ref();
        let stories = sqlx::query_as::<_, StorySummary>(
            r#"
            SELECT id, title
            FROM stories
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(stories)
    }

    /// Remove a story row; its pages go with it
    pub async fn delete(&self, story_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM stories
            WHERE id = $1
            "#,
        )
        .bind(story_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
