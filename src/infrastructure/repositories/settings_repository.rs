use super::credential_provider::CredentialProvider;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub const API_KEY_KEY: &str = "gemini_api_key";
pub const HAS_SEEN_WELCOME_KEY: &str = "has_seen_welcome";

/// String key/value store persisted as a JSON object on local disk.
///
/// Values are read from disk on every access; there is no in-memory cache.
pub struct SettingsRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, String> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| format!("Corrupt settings file {}: {}", self.path.display(), e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(format!("Failed to read settings {}: {}", self.path.display(), e)),
        }
    }

    async fn store(&self, values: &BTreeMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_vec_pretty(values)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| format!("Failed to write settings {}: {}", self.path.display(), e))
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.load().await?.remove(key))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values).await?;

        tracing::debug!(key = key, path = %self.path.display(), "Setting saved");
        Ok(())
    }
}

#[async_trait]
impl CredentialProvider for SettingsRepository {
    async fn api_key(&self) -> Result<Option<String>, String> {
        Ok(self
            .get(API_KEY_KEY)
            .await?
            .filter(|key| !key.trim().is_empty()))
    }
}
