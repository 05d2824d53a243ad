use super::asset_storage::AssetStorage;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RemoveObjectsRequest<'a> {
    prefixes: &'a [String],
}

/// Supabase Storage REST implementation of asset storage
pub struct SupabaseStorageRepository {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl SupabaseStorageRepository {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            encode_path(path)
        )
    }

    /// Upsert request for one object; an existing object at the path is replaced
    fn upload_request(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> reqwest::RequestBuilder {
        self.http_client
            .post(self.object_url(bucket, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("x-upsert", "true")
            .header("Content-Type", content_type)
            .body(bytes)
    }

    /// Public URL of an object in a public bucket
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            encode_path(path)
        )
    }
}

/// Encode each path segment, keeping the `/` separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl AssetStorage for SupabaseStorageRepository {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, String> {
        let size = bytes.len();

        let response = self
            .upload_request(bucket, path, bytes, content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, bucket = bucket, path = path, "Storage upload failed");
                format!("Failed to upload to {}: {}", bucket, e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                bucket = bucket,
                path = path,
                error = %error_text,
                "Storage rejected upload"
            );
            return Err(format!("Failed to upload to {}. {}", bucket, error_text));
        }

        tracing::debug!(bucket = bucket, path = path, size = size, "Asset uploaded");

        Ok(self.public_url(bucket, path))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), String> {
        if paths.is_empty() {
            return Ok(());
        }

        let response = self
            .http_client
            .delete(format!(
                "{}/storage/v1/object/{}",
                self.base_url,
                urlencoding::encode(bucket)
            ))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .json(&RemoveObjectsRequest { prefixes: paths })
            .send()
            .await
            .map_err(|e| format!("Failed to remove from {}: {}", bucket, e))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("Failed to remove from {}. {}", bucket, error_text));
        }

        tracing::debug!(bucket = bucket, count = paths.len(), "Assets removed");
        Ok(())
    }
}
