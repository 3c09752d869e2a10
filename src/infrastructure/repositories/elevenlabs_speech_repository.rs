use super::speech_repository::{AudioStream, SpeechRepository, SpeechRepositoryError};
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

pub const MODEL_ID: &str = "eleven_multilingual_v2";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub use_speaker_boost: bool,
}

/// Voice settings applied to every request
pub const VOICE_SETTINGS: VoiceSettings = VoiceSettings {
    stability: 0.5,
    similarity_boost: 0.5,
    use_speaker_boost: true,
};

#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// ElevenLabs implementation of the speech repository
pub struct ElevenLabsSpeechRepository {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ElevenLabsSpeechRepository {
    pub fn new(http_client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.base_url,
            urlencoding::encode(voice_id)
        )
    }
}

#[async_trait]
impl SpeechRepository for ElevenLabsSpeechRepository {
    async fn synthesize(
        &self,
        voice_id: &str,
        text: &str,
    ) -> Result<AudioStream, SpeechRepositoryError> {
        tracing::info!(
            voice_id = voice_id,
            model = MODEL_ID,
            text_length = text.len(),
            "Calling ElevenLabs text-to-speech API"
        );

        let request = TextToSpeechRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: &VOICE_SETTINGS,
        };

        let response = self
            .http_client
            .post(self.endpoint(voice_id))
            .header("accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice_id = voice_id, "ElevenLabs request failed");
                SpeechRepositoryError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| {
                tracing::error!(
                    status = status.as_u16(),
                    error = %e,
                    "Failed to read ElevenLabs error body"
                );
                SpeechRepositoryError::Transport(e.to_string())
            })?;
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Failed to convert text to speech"
            );
            return Err(SpeechRepositoryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(
            content_length = ?response.content_length(),
            "ElevenLabs audio stream opened"
        );

        Ok(response
            .bytes_stream()
            .map_err(std::io::Error::other)
            .boxed())
    }
}
