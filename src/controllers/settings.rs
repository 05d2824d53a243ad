use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    domain::settings::{
        OnboardingResponse, SaveApiKeyRequest, SettingsResponse, SettingsServiceApi,
    },
    error::AppResult,
};

pub struct SettingsController {
    settings_service: Arc<dyn SettingsServiceApi>,
}

impl SettingsController {
    pub fn new(settings_service: Arc<dyn SettingsServiceApi>) -> Self {
        Self { settings_service }
    }

    /// GET /api/settings
    pub async fn get_settings(
        State(controller): State<Arc<SettingsController>>,
    ) -> AppResult<Json<SettingsResponse>> {
        Ok(Json(controller.settings_service.get_settings().await?))
    }

    /// PUT /api/settings/api-key - Store the Gemini API key locally
    pub async fn save_api_key(
        State(controller): State<Arc<SettingsController>>,
        Json(request): Json<SaveApiKeyRequest>,
    ) -> AppResult<StatusCode> {
        controller
            .settings_service
            .save_api_key(&request.api_key)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/onboarding
    pub async fn get_onboarding(
        State(controller): State<Arc<SettingsController>>,
    ) -> AppResult<Json<OnboardingResponse>> {
        Ok(Json(controller.settings_service.get_onboarding().await?))
    }

    /// POST /api/onboarding/complete
    pub async fn complete_onboarding(
        State(controller): State<Arc<SettingsController>>,
    ) -> AppResult<StatusCode> {
        controller.settings_service.complete_onboarding().await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
