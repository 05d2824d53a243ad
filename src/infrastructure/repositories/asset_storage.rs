use async_trait::async_trait;

pub const IMAGE_BUCKET: &str = "story_images";
pub const AUDIO_BUCKET: &str = "story_audio";

/// Content types stored with each bucket's objects; they match the path extensions
pub const IMAGE_CONTENT_TYPE: &str = "image/png";
pub const AUDIO_CONTENT_TYPE: &str = "audio/wav";

/// Object storage for generated story assets.
///
/// Writes overwrite whatever is stored at the same path, so re-saving a page
/// replaces its asset instead of adding a second copy.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Store `bytes` at `bucket/path` and return its public URL
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, String>;

    /// Delete the given paths; missing objects are not an error
    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), String>;
}

pub fn image_path(story_id: &str, page_number: i32) -> String {
    format!("{}/{}.png", story_id, page_number)
}

pub fn audio_path(story_id: &str, page_number: i32) -> String {
    format!("{}/{}.wav", story_id, page_number)
}
