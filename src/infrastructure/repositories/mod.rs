pub mod asset_storage;
pub mod credential_provider;
pub mod gemini_generation_repository;
pub mod generation_repository;
pub mod settings_repository;
pub mod story_repository;
pub mod supabase_storage_repository;

pub use asset_storage::{
    audio_path, image_path, AssetStorage, AUDIO_BUCKET, AUDIO_CONTENT_TYPE, IMAGE_BUCKET,
    IMAGE_CONTENT_TYPE,
};
pub use credential_provider::{CredentialProvider, StaticCredentialProvider};
pub use gemini_generation_repository::GeminiGenerationRepository;
pub use generation_repository::GenerationRepository;
pub use settings_repository::SettingsRepository;
pub use story_repository::StoryRepository;
pub use supabase_storage_repository::SupabaseStorageRepository;
