pub mod error;
pub mod onboarding;
pub mod service;

pub use error::SettingsServiceError;
pub use onboarding::OnboardingStep;
pub use service::{SettingsService, SettingsServiceApi};

use serde::{Deserialize, Serialize};

/// Response for GET /api/settings
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub api_key_configured: bool,
    pub has_seen_welcome: bool,
}

/// Request for PUT /api/settings/api-key
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveApiKeyRequest {
    #[serde(default)]
    pub api_key: String,
}

/// Response for GET /api/onboarding
#[derive(Debug, Serialize, Deserialize)]
pub struct OnboardingResponse {
    pub has_seen_welcome: bool,
    pub steps: Vec<OnboardingStep>,
}
