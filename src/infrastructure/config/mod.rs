use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Supabase Storage
    pub supabase_url: String,
    pub supabase_publishable_key: String,
    // Gemini
    pub gemini_api_base_url: String,
    pub gemini_story_model: String,
    pub gemini_image_model: String,
    pub gemini_speech_model: String,
    pub gemini_api_key: Option<String>,
    // Client-local settings (API key, onboarding flag)
    pub settings_path: PathBuf,
    // Viewer
    pub autoplay_dwell_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

pub const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_STORY_MODEL: &str = "gemini-2.0-flash-lite";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            supabase_url: env::var("SUPABASE_URL")?,
            supabase_publishable_key: env::var("SUPABASE_PUBLISHABLE_KEY")?,
            gemini_api_base_url: env::var("GEMINI_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE_URL.to_string()),
            gemini_story_model: env::var("GEMINI_STORY_MODEL")
                .unwrap_or_else(|_| DEFAULT_STORY_MODEL.to_string()),
            gemini_image_model: env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            gemini_speech_model: env::var("GEMINI_SPEECH_MODEL")
                .unwrap_or_else(|_| DEFAULT_SPEECH_MODEL.to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            settings_path: env::var("SETTINGS_PATH")
                .unwrap_or_else(|_| ".storyweaver/settings.json".to_string())
                .into(),
            autoplay_dwell_secs: env::var("AUTOPLAY_DWELL_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
