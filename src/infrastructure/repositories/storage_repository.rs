use async_trait::async_trait;

/// Object written to the bucket
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    /// Path inside the bucket, as reported by the storage service
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageRepositoryError {
    #[error("storage rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("no data returned from storage")]
    MissingData,
    #[error("storage request failed: {0}")]
    Transport(String),
}

/// Repository for the public object bucket that serves synthesized audio
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// Upload `data` at `path`. With `upsert = false` an existing object is
    /// never replaced and the upload fails instead.
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject, StorageRepositoryError>;

    /// Public URL under which a stored object is served
    fn public_url(&self, object_path: &str) -> String;
}
