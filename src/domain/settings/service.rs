use super::error::SettingsServiceError;
use super::onboarding::walkthrough;
use super::{OnboardingResponse, SettingsResponse};
use crate::infrastructure::repositories::settings_repository::{API_KEY_KEY, HAS_SEEN_WELCOME_KEY};
use crate::infrastructure::repositories::{CredentialProvider, SettingsRepository};
use async_trait::async_trait;
use std::sync::Arc;

pub struct SettingsService {
    settings_repo: Arc<SettingsRepository>,
    credentials: Arc<dyn CredentialProvider>,
}

impl SettingsService {
    /// `credentials` is the provider the generation client uses, which may be
    /// the settings store itself or a key fixed at startup
    pub fn new(
        settings_repo: Arc<SettingsRepository>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            settings_repo,
            credentials,
        }
    }
}

#[async_trait]
pub trait SettingsServiceApi: Send + Sync {
    async fn get_settings(&self) -> Result<SettingsResponse, SettingsServiceError>;

    async fn save_api_key(&self, api_key: &str) -> Result<(), SettingsServiceError>;

    async fn get_onboarding(&self) -> Result<OnboardingResponse, SettingsServiceError>;

    async fn complete_onboarding(&self) -> Result<(), SettingsServiceError>;
}

#[async_trait]
impl SettingsServiceApi for SettingsService {
    async fn get_settings(&self) -> Result<SettingsResponse, SettingsServiceError> {
        let api_key = self
            .credentials
            .api_key()
            .await
            .map_err(SettingsServiceError::Store)?;

        Ok(SettingsResponse {
            api_key_configured: api_key.is_some(),
            has_seen_welcome: self.has_seen_welcome().await?,
        })
    }

    async fn save_api_key(&self, api_key: &str) -> Result<(), SettingsServiceError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(SettingsServiceError::Invalid(
                "Please enter a valid API key.".to_string(),
            ));
        }

        self.settings_repo
            .set(API_KEY_KEY, api_key)
            .await
            .map_err(SettingsServiceError::Store)?;

        tracing::info!("Gemini API key saved");
        Ok(())
    }

    async fn get_onboarding(&self) -> Result<OnboardingResponse, SettingsServiceError> {
        Ok(OnboardingResponse {
            has_seen_welcome: self.has_seen_welcome().await?,
            steps: walkthrough(),
        })
    }

    async fn complete_onboarding(&self) -> Result<(), SettingsServiceError> {
        self.settings_repo
            .set(HAS_SEEN_WELCOME_KEY, "true")
            .await
            .map_err(SettingsServiceError::Store)
    }
}

impl SettingsService {
    async fn has_seen_welcome(&self) -> Result<bool, SettingsServiceError> {
        let value = self
            .settings_repo
            .get(HAS_SEEN_WELCOME_KEY)
            .await
            .map_err(SettingsServiceError::Store)?;
        Ok(value.as_deref() == Some("true"))
    }
}
