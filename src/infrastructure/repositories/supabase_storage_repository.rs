use super::storage_repository::{StorageRepository, StorageRepositoryError, StoredObject};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Supabase Storage implementation of the storage repository
pub struct SupabaseStorageRepository {
    http_client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorageRepository {
    pub fn new(
        http_client: reqwest::Client,
        base_url: String,
        service_key: String,
        bucket: String,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        }
    }

    fn object_endpoint(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            urlencoding::encode(&self.bucket),
            encode_path(path)
        )
    }

    /// Storage reports `<bucket>/<path>`; callers work with the bucket-relative part
    fn relative_path(&self, key: &str) -> String {
        key.strip_prefix(&format!("{}/", self.bucket))
            .unwrap_or(key)
            .to_string()
    }
}

/// Percent-encode each segment while keeping the separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl StorageRepository for SupabaseStorageRepository {
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject, StorageRepositoryError> {
        let size = data.len();
        tracing::info!(
            bucket = %self.bucket,
            path = path,
            size_bytes = size,
            "Uploading audio to Supabase Storage"
        );

        let response = self
            .http_client
            .post(self.object_endpoint(path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("content-type", content_type)
            .header("x-upsert", upsert.to_string())
            .body(data)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error uploading audio to Supabase");
                StorageRepositoryError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = serde_json::from_str::<StorageErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or(body);
            tracing::error!(
                status = status.as_u16(),
                message = %message,
                "Error uploading audio to Supabase"
            );
            return Err(StorageRepositoryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let key = serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|r| r.key)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                tracing::error!(body = %body, "No data returned from Supabase");
                StorageRepositoryError::MissingData
            })?;

        let stored = StoredObject {
            path: self.relative_path(&key),
        };

        tracing::info!(path = %stored.path, size_bytes = size, "Audio uploaded");

        Ok(stored)
    }

    fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, object_path
        )
    }
}
