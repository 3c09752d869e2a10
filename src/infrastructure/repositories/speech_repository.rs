use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Audio body as it arrives from the provider, chunk by chunk.
pub type AudioStream = BoxStream<'static, std::io::Result<Bytes>>;

#[derive(Debug, thiserror::Error)]
pub enum SpeechRepositoryError {
    /// Provider answered with a non-success status; body is kept verbatim
    #[error("provider returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("provider request failed: {0}")]
    Transport(String),
}

/// Repository for text-to-speech synthesis.
/// Abstracts the underlying provider (ElevenLabs today).
///
/// Implementations must not buffer the whole response: the returned stream
/// yields audio as the provider sends it.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Start synthesis of `text` with the given provider voice
    ///
    /// # Errors
    /// `Upstream` when the provider rejects the request, `Transport` when it
    /// cannot be reached
    async fn synthesize(&self, voice_id: &str, text: &str)
        -> Result<AudioStream, SpeechRepositoryError>;
}
