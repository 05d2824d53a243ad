use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use storyweaver_backend::domain::audio::encode_wav;
use storyweaver_backend::domain::generation::{GenerationError, MediaAsset, StoryRequest};
use storyweaver_backend::domain::story::{Page, StoryDraft, Voice};
use storyweaver_backend::infrastructure::repositories::{AssetStorage, GenerationRepository};

pub const MOCK_STORY_TITLE: &str = "The Lighthouse Cat";

/// Eight bytes of PNG signature; enough to tell images from audio
pub fn mock_image_bytes() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
}

/// 16-bit little-endian mono PCM, as the speech model returns it
pub fn mock_pcm(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Generation stand-in. Stories come back with their pages in reverse order.
#[derive(Default)]
pub struct MockGenerationRepository {
    story_error: Mutex<Option<GenerationError>>,
    image_error_on_page: Mutex<Option<(i32, GenerationError)>>,
    empty_story: Mutex<bool>,
    page_text_suffix: Mutex<Option<String>>,
    image_mime_type: Mutex<Option<String>>,
    pub story_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
    pub speech_calls: AtomicUsize,
    speech_voices: Mutex<Vec<Voice>>,
}

#[allow(dead_code)]
impl MockGenerationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_story_with(&self, error: GenerationError) {
        *self.story_error.lock() = Some(error);
    }

    /// Fail the image request whose prompt belongs to `page_number`
    pub fn fail_image_on_page(&self, page_number: i32, error: GenerationError) {
        *self.image_error_on_page.lock() = Some((page_number, error));
    }

    /// Draft stories without any pages
    pub fn return_empty_stories(&self) {
        *self.empty_story.lock() = true;
    }

    /// Append `suffix` to every drafted page text
    pub fn append_to_page_text(&self, suffix: &str) {
        *self.page_text_suffix.lock() = Some(suffix.to_string());
    }

    /// Report generated images under another mime type
    pub fn report_image_mime_type(&self, mime_type: &str) {
        *self.image_mime_type.lock() = Some(mime_type.to_string());
    }

    pub fn speech_voices(&self) -> Vec<Voice> {
        self.speech_voices.lock().clone()
    }

    pub fn draft(page_count: u8, voice: Voice, educational_theme: Option<String>) -> StoryDraft {
        let pages = (1..=page_count as i32)
            .rev()
            .map(|n| {
                Page::new(
                    n,
                    format!("Page {} of the story.", n),
                    mock_image_prompt(n),
                )
            })
            .collect();

        StoryDraft {
            title: MOCK_STORY_TITLE.to_string(),
            pages,
            voice,
            educational_theme,
        }
    }
}

pub fn mock_image_prompt(page_number: i32) -> String {
    format!("A cat guarding a lighthouse, scene {}", page_number)
}

#[async_trait]
impl GenerationRepository for MockGenerationRepository {
    async fn generate_story(&self, request: &StoryRequest) -> Result<StoryDraft, GenerationError> {
        self.story_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.story_error.lock().clone() {
            return Err(error);
        }

        let mut draft = Self::draft(
            request.page_count,
            request.voice,
            request.educational_theme.clone(),
        );

        if *self.empty_story.lock() {
            draft.pages.clear();
        }
        if let Some(suffix) = self.page_text_suffix.lock().as_deref() {
            for page in &mut draft.pages {
                page.text.push_str(suffix);
            }
        }

        Ok(draft)
    }

    async fn generate_image(&self, prompt: &str) -> Result<MediaAsset, GenerationError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);

        let failure = self.image_error_on_page.lock().clone();
        if let Some((page_number, error)) = failure {
            if prompt == mock_image_prompt(page_number) {
                return Err(error);
            }
        }

        let mime_type = self
            .image_mime_type
            .lock()
            .clone()
            .unwrap_or_else(|| "image/png".to_string());

        Ok(MediaAsset::new(mime_type, mock_image_bytes()))
    }

    async fn generate_speech(&self, text: &str, voice: Voice) -> Result<MediaAsset, GenerationError> {
        self.speech_calls.fetch_add(1, Ordering::SeqCst);
        self.speech_voices.lock().push(voice);

        let samples: Vec<i16> = text.bytes().map(|b| b as i16 * 64).collect();
        Ok(MediaAsset::new("audio/wav", encode_wav(&mock_pcm(&samples))))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Object storage held in memory; uploads to an existing path overwrite it
#[derive(Default)]
pub struct InMemoryAssetStorage {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    fail_uploads: Mutex<Option<String>>,
    pub upload_calls: AtomicUsize,
}

#[allow(dead_code)]
impl InMemoryAssetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads_with(&self, message: &str) {
        *self.fail_uploads.lock() = Some(message.to_string());
    }

    pub fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn paths_in(&self, bucket: &str) -> Vec<String> {
        let mut paths: Vec<String> = self
            .objects
            .lock()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, p)| p.clone())
            .collect();
        paths.sort();
        paths
    }
}

pub fn mock_public_url(bucket: &str, path: &str) -> String {
    format!("https://storage.test/{}/{}", bucket, path)
}

#[async_trait]
impl AssetStorage for InMemoryAssetStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.fail_uploads.lock().clone() {
            return Err(message);
        }

        self.objects.lock().insert(
            (bucket.to_string(), path.to_string()),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        Ok(mock_public_url(bucket, path))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), String> {
        let mut objects = self.objects.lock();
        for path in paths {
            objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }
}
