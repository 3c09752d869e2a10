use super::dto::SpeechSynthesisRequest;
use super::error::SpeechServiceError;
use crate::error::MISSING_FIELDS_MESSAGE;
use crate::infrastructure::fs::TempArtifact;
use crate::infrastructure::repositories::{SpeechRepository, StorageRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

pub const AUDIO_CONTENT_TYPE: &str = "audio/mp3";
pub const PUBLIC_PREFIX: &str = "public";
pub const EMPTY_AUDIO_MESSAGE: &str = "Speech provider returned an empty audio stream";

pub struct SpeechSynthesisService {
    speech_repo: Option<Arc<dyn SpeechRepository>>,
    storage_repo: Arc<dyn StorageRepository>,
    temp_dir: PathBuf,
}

impl SpeechSynthesisService {
    /// `speech_repo` is `None` when no provider credentials are configured;
    /// every request then fails with a configuration error.
    pub fn new(
        speech_repo: Option<Arc<dyn SpeechRepository>>,
        storage_repo: Arc<dyn StorageRepository>,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            speech_repo,
            storage_repo,
            temp_dir,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.speech_repo.is_some()
    }
}

#[async_trait]
pub trait SpeechSynthesisServiceApi: Send + Sync {
    /// Synthesize speech and publish it
    ///
    /// This operation:
    /// - Streams provider audio into a temp artifact
    /// - Uploads the finished artifact to the public bucket
    /// - Removes the temp artifact on every exit path
    ///
    /// Returns the public URL of the uploaded audio
    async fn synthesize(
        &self,
        request: SpeechSynthesisRequest,
    ) -> Result<String, SpeechServiceError>;
}

#[async_trait]
impl SpeechSynthesisServiceApi for SpeechSynthesisService {
    async fn synthesize(
        &self,
        request: SpeechSynthesisRequest,
    ) -> Result<String, SpeechServiceError> {
        // 1. Provider configured?
        let speech_repo = self.speech_repo.as_ref().ok_or_else(|| {
            tracing::error!("ELEVEN_LABS_API_KEY is not configured");
            SpeechServiceError::Configuration
        })?;

        // 2. Required fields
        let (text, voice_id) = request
            .required_fields()
            .ok_or_else(|| SpeechServiceError::Validation(MISSING_FIELDS_MESSAGE.to_string()))?;

        tracing::info!(
            voice_id = voice_id,
            text_length = text.len(),
            "Speech synthesis request"
        );

        // 3. Open the provider stream
        let audio = speech_repo.synthesize(voice_id, text).await?;

        // 4. Stream into the temp artifact; the guard removes it on any early return
        let mut artifact = TempArtifact::create(&self.temp_dir).await?;
        let bytes_written = artifact.write_stream(audio).await?;

        if bytes_written == 0 {
            tracing::error!(voice_id = voice_id, "Speech provider returned no audio");
            return Err(SpeechServiceError::Upstream {
                status: 502,
                message: EMPTY_AUDIO_MESSAGE.to_string(),
            });
        }

        // 5. Upload only after the artifact is completely flushed
        let audio_data = artifact.read_all().await?;
        let object_key = object_key();
        let stored = self
            .storage_repo
            .upload(&object_key, audio_data, AUDIO_CONTENT_TYPE, false)
            .await?;

        let url = self.storage_repo.public_url(&stored.path);

        // 6. Clean up
        if let Err(e) = artifact.remove().await {
            tracing::warn!(error = %e, "Failed to remove temp artifact after upload");
        }

        tracing::info!(
            url = %url,
            size_bytes = bytes_written,
            "Speech synthesized and published"
        );

        Ok(url)
    }
}

/// Storage key for a new audio object. The millisecond timestamp keeps keys
/// ordered; the uuid keeps same-millisecond requests apart.
fn object_key() -> String {
    format!(
        "{}/output-audio-{}-{}.mp3",
        PUBLIC_PREFIX,
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
