use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ELEVEN_LABS_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_STORAGE_BUCKET: &str = "translation";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // ElevenLabs
    pub eleven_labs_api_key: Option<String>,
    pub eleven_labs_base_url: String,
    // Supabase Storage
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub storage_bucket: String,
    // Where temp artifacts are written; the system temp dir when unset
    pub temp_dir_override: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            eleven_labs_api_key: non_empty_var("ELEVEN_LABS_API_KEY"),
            eleven_labs_base_url: non_empty_var("ELEVEN_LABS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ELEVEN_LABS_BASE_URL.to_string()),
            supabase_url: env::var("SUPABASE_URL")?,
            supabase_service_key: env::var("SUPABASE_SERVICE_ROLE_KEY")?,
            storage_bucket: non_empty_var("STORAGE_BUCKET")
                .unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string()),
            temp_dir_override: non_empty_var("SPEECH_TEMP_DIR").map(PathBuf::from),
        };

        Ok(config)
    }

    /// Directory for temp artifacts: the override if set, otherwise the system temp dir.
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir_override
            .clone()
            .unwrap_or_else(env::temp_dir)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
