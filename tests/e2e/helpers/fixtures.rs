use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct TestFixtures {
    pool: PgPool,
}

#[allow(dead_code)]
impl TestFixtures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a story row directly, bypassing generation and storage
    pub async fn create_story(&self, title: &str, created_at: DateTime<Utc>) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO stories (title, voice, created_at)
            VALUES ($1, 'Puck', $2)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Insert pages with the given numbers, in the given order
    pub async fn add_pages(&self, story_id: Uuid, page_numbers: &[i32], with_media: bool) -> Result<()> {
        for n in page_numbers {
            let (image_url, audio_url) = if with_media {
                (
                    Some(format!("https://storage.test/story_images/{}/{}.png", story_id, n)),
                    Some(format!("https://storage.test/story_audio/{}/{}.wav", story_id, n)),
                )
            } else {
                (None, None)
            };

            sqlx::query(
                r#"
                INSERT INTO pages (story_id, page_number, text, image_prompt, image_url, audio_url)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(story_id)
            .bind(n)
            .bind(format!("Text of page {}", n))
            .bind(format!("Prompt of page {}", n))
            .bind(image_url)
            .bind(audio_url)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    pub async fn story_count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    pub async fn page_count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    pub async fn stored_voice(&self, story_id: Uuid) -> Result<String> {
        let voice: (String,) = sqlx::query_as("SELECT voice FROM stories WHERE id = $1")
            .bind(story_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(voice.0)
    }
}
