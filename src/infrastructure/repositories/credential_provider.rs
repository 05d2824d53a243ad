use async_trait::async_trait;

/// Source of the generative-AI API key.
///
/// Resolved on every generation call, so a key saved through the settings
/// endpoint takes effect without a restart.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns `Ok(None)` when no key has been configured
    async fn api_key(&self) -> Result<Option<String>, String>;
}

/// Fixed key, used when the key is injected from the environment
pub struct StaticCredentialProvider {
    api_key: Option<String>,
}

impl StaticCredentialProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn api_key(&self) -> Result<Option<String>, String> {
        Ok(self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}
