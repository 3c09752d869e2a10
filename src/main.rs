use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use speech_synthesis_backend::controllers::speech_synthesis::SpeechSynthesisController;
use speech_synthesis_backend::domain::speech::SpeechSynthesisService;
use speech_synthesis_backend::infrastructure::config::{Config, LogFormat};
use speech_synthesis_backend::infrastructure::http::start_http_server;
use speech_synthesis_backend::infrastructure::repositories::{
    ElevenLabsSpeechRepository, SpeechRepository, SupabaseStorageRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting speech synthesis backend on {}:{}",
        config.host,
        config.port
    );

    let temp_dir = config.temp_dir();
    tracing::info!(
        temp_dir = %temp_dir.display(),
        overridden = config.temp_dir_override.is_some(),
        "Temp artifact directory resolved"
    );

    let http_client = reqwest::Client::new();

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    let speech_repo: Option<Arc<dyn SpeechRepository>> = match &config.eleven_labs_api_key {
        Some(api_key) => {
            tracing::info!(base_url = %config.eleven_labs_base_url, "ElevenLabs client initialized");
            let repo: Arc<dyn SpeechRepository> = Arc::new(ElevenLabsSpeechRepository::new(
                http_client.clone(),
                config.eleven_labs_base_url.clone(),
                api_key.clone(),
            ));
            Some(repo)
        }
        None => {
            tracing::warn!("ELEVEN_LABS_API_KEY not set. Synthesis requests will fail with a configuration error");
            None
        }
    };

    let storage_repo = Arc::new(SupabaseStorageRepository::new(
        http_client,
        config.supabase_url.clone(),
        config.supabase_service_key.clone(),
        config.storage_bucket.clone(),
    ));
    tracing::info!(bucket = %config.storage_bucket, "Supabase Storage client initialized");

    // 2. Instantiate services
    let speech_service = Arc::new(SpeechSynthesisService::new(
        speech_repo,
        storage_repo,
        temp_dir,
    ));

    // 3. Instantiate controllers
    let speech_controller = Arc::new(SpeechSynthesisController::new(speech_service.clone()));

    let config = Arc::new(config);
    start_http_server(config, speech_service, speech_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speech_synthesis_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speech_synthesis_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
