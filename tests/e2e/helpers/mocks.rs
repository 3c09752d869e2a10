use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const OBJECT_PREFIX: &str = "/storage/v1/object/";

/// Audio bytes shaped like the start of an MP3 stream
pub fn mock_audio_bytes(len: usize) -> Vec<u8> {
    let mut audio = vec![0xFF, 0xFB, 0x90, 0x00];
    audio.extend((0..len.saturating_sub(4)).map(|i| (i % 251) as u8));
    audio.truncate(len);
    audio
}

/// ElevenLabs answers the voice with `audio`
pub async fn mount_provider_audio(server: &MockServer, voice_id: &str, audio: Vec<u8>) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/text-to-speech/{}", voice_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(audio),
        )
        .mount(server)
        .await;
}

/// ElevenLabs fails every synthesis with `status` and `body`
pub async fn mount_provider_error(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1/text-to-speech/.+$"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Supabase-style success: echoes the uploaded key as `<bucket>/<path>`
struct EchoKey;

impl Respond for EchoKey {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let key = request
            .url
            .path()
            .strip_prefix(OBJECT_PREFIX)
            .unwrap_or_default()
            .to_string();
        ResponseTemplate::new(200).set_body_json(json!({
            "Key": key,
            "Id": uuid::Uuid::new_v4().to_string()
        }))
    }
}

pub async fn mount_storage_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/.+$"))
        .respond_with(EchoKey)
        .mount(server)
        .await;
}

pub async fn mount_storage_error(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/.+$"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "statusCode": status.to_string(),
            "error": "Error",
            "message": message
        })))
        .mount(server)
        .await;
}
