use serde::{Deserialize, Serialize};

/// Request for POST /api/speech-synthesis
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechSynthesisRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
}

impl SpeechSynthesisRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            voice_id: Some(voice_id.into()),
        }
    }

    /// Both fields, if present and non-empty
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let text = self.text.as_deref().filter(|t| !t.is_empty())?;
        let voice_id = self.voice_id.as_deref().filter(|v| !v.is_empty())?;
        Some((text, voice_id))
    }
}

/// Response for POST /api/speech-synthesis
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechSynthesisResponse {
    /// Public URL of the uploaded audio
    pub data: String,
}
