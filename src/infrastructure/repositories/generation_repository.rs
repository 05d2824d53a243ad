use crate::domain::generation::{GenerationError, MediaAsset, StoryRequest};
use crate::domain::story::{StoryDraft, Voice};
use async_trait::async_trait;

/// Repository for generative-AI calls.
/// Abstracts the underlying model provider (Gemini today).
///
/// Every call is independent and is never retried; implementations must
/// resolve their credential before touching the network.
#[async_trait]
pub trait GenerationRepository: Send + Sync {
    /// Generate the story text and per-page illustration prompts
    ///
    /// # Errors
    /// `InvalidStory` when the model output is not a usable story
    async fn generate_story(&self, request: &StoryRequest) -> Result<StoryDraft, GenerationError>;

    /// Generate one illustration from an image prompt
    ///
    /// # Errors
    /// `NoImage` when the response carries no inline image data
    async fn generate_image(&self, prompt: &str) -> Result<MediaAsset, GenerationError>;

    /// Narrate page text with a prebuilt voice; returns a WAV asset
    ///
    /// # Errors
    /// `NoAudio` when the response carries no inline audio data
    async fn generate_speech(&self, text: &str, voice: Voice) -> Result<MediaAsset, GenerationError>;
}
