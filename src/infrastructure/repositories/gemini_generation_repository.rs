use super::credential_provider::CredentialProvider;
use super::generation_repository::GenerationRepository;
use crate::domain::audio::encode_wav;
use crate::domain::generation::{
    build_story_prompt, parse_story_response, GenerationError, MediaAsset, StoryRequest,
};
use crate::domain::story::{StoryDraft, Voice};
use crate::error::looks_like_connectivity_failure;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentRequest {
    fn text(text: String, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(text),
                    inline_data: None,
                }],
            }],
            generation_config: Some(generation_config),
        }
    }
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text of the first candidate
    fn text(&self) -> String {
        self.first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Gemini `generateContent` implementation of the generation repository
pub struct GeminiGenerationRepository {
    http_client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
    base_url: String,
    story_model: String,
    image_model: String,
    speech_model: String,
}

impl GeminiGenerationRepository {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        base_url: String,
        story_model: String,
        image_model: String,
        speech_model: String,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
            story_model,
            image_model,
            speech_model,
        }
    }

    async fn resolve_api_key(&self) -> Result<String, GenerationError> {
        self.credentials
            .api_key()
            .await
            .map_err(GenerationError::CredentialStore)?
            .ok_or(GenerationError::MissingCredential)
    }

    /// POST a generateContent request and decode the envelope
    async fn call_gemini(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let api_key = self.resolve_api_key().await?;
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let start_time = std::time::Instant::now();

        tracing::debug!(model = %model, "Calling Gemini generateContent");

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %model, "Gemini request failed");
                classify_transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                model = %model,
                error = %message,
                "Gemini returned an error status"
            );
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        tracing::info!(
            provider = "gemini",
            model = %model,
            latency_ms = start_time.elapsed().as_millis(),
            candidates = body.candidates.len(),
            "Gemini call completed"
        );

        Ok(body)
    }
}

fn classify_transport_error(err: reqwest::Error) -> GenerationError {
    let message = err.to_string();
    if err.is_connect() || err.is_timeout() || looks_like_connectivity_failure(&message) {
        GenerationError::Connectivity(message)
    } else {
        GenerationError::Api {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            message,
        }
    }
}

/// First inline image among all parts of the first candidate
fn extract_image(response: &GenerateContentResponse) -> Result<MediaAsset, GenerationError> {
    let inline = response
        .first_parts()
        .iter()
        .find_map(|p| p.inline_data.as_ref())
        .ok_or_else(|| {
            tracing::error!(text = %response.text(), "Image generation returned no image part");
            GenerationError::NoImage
        })?;

    let bytes = STANDARD
        .decode(&inline.data)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid image payload: {}", e)))?;

    Ok(MediaAsset::new(inline.mime_type.clone(), bytes))
}

/// Inline PCM of the first part, wrapped as WAV
fn extract_speech(response: &GenerateContentResponse) -> Result<MediaAsset, GenerationError> {
    let inline = response
        .first_parts()
        .first()
        .and_then(|p| p.inline_data.as_ref())
        .ok_or_else(|| {
            tracing::error!(text = %response.text(), "Speech generation returned no audio part");
            GenerationError::NoAudio
        })?;

    let pcm = STANDARD
        .decode(&inline.data)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid audio payload: {}", e)))?;

    Ok(MediaAsset::new("audio/wav", encode_wav(&pcm)))
}

#[async_trait]
impl GenerationRepository for GeminiGenerationRepository {
    async fn generate_story(&self, request: &StoryRequest) -> Result<StoryDraft, GenerationError> {
        tracing::info!(
            prompt = %request.prompt,
            page_count = request.page_count,
            art_style = %request.art_style,
            voice = %request.voice,
            educational_theme = ?request.educational_theme,
            "Generating story"
        );

        let body = GenerateContentRequest::text(
            build_story_prompt(request),
            GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                ..Default::default()
            },
        );

        let response = self.call_gemini(&self.story_model, &body).await?;
        let draft = parse_story_response(&response.text(), request)?;

        tracing::info!(
            title = %draft.title,
            pages = draft.pages.len(),
            "Story generated"
        );

        Ok(draft)
    }

    async fn generate_image(&self, prompt: &str) -> Result<MediaAsset, GenerationError> {
        tracing::info!(prompt_length = prompt.len(), "Generating image");

        let body = GenerateContentRequest::text(
            prompt.to_string(),
            GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                ..Default::default()
            },
        );

        let response = self.call_gemini(&self.image_model, &body).await?;
        let image = extract_image(&response)?;

        tracing::debug!(mime_type = %image.mime_type, size = image.bytes.len(), "Image generated");
        Ok(image)
    }

    async fn generate_speech(&self, text: &str, voice: Voice) -> Result<MediaAsset, GenerationError> {
        tracing::info!(voice = %voice, text_length = text.len(), "Generating speech");

        let body = GenerateContentRequest::text(
            text.to_string(),
            GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.as_str().to_string(),
                        },
                    },
                }),
                ..Default::default()
            },
        );

        let response = self.call_gemini(&self.speech_model, &body).await?;
        let audio = extract_speech(&response)?;

        tracing::debug!(size = audio.bytes.len(), "Speech generated");
        Ok(audio)
    }
}
