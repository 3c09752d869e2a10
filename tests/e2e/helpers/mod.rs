use anyhow::Result;
use once_cell::sync::Lazy;
use speech_synthesis_backend::{
    controllers::speech_synthesis::SpeechSynthesisController,
    domain::speech::SpeechSynthesisService,
    infrastructure::{
        config::{Config, LogFormat},
        http::build_router,
        repositories::{ElevenLabsSpeechRepository, SpeechRepository, SupabaseStorageRepository},
    },
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use wiremock::MockServer;

pub mod mocks;

use api_client::TestClient;

pub const TEST_API_KEY: &str = "test-eleven-labs-key";
pub const TEST_SERVICE_KEY: &str = "test-service-role-key";
pub const TEST_BUCKET: &str = "translation";

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("speech_synthesis_backend=debug")
        .with_test_writer()
        .try_init();
});

pub struct TestContext {
    pub client: TestClient,
    pub config: Config,
    /// Stands in for ElevenLabs
    pub provider: MockServer,
    /// Stands in for Supabase Storage
    pub storage: MockServer,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        Self::start(Some(TEST_API_KEY)).await
    }

    /// Context whose server has no ElevenLabs key configured
    pub async fn without_api_key() -> Result<Self> {
        Self::start(None).await
    }

    async fn start(api_key: Option<&str>) -> Result<Self> {
        Lazy::force(&TRACING);

        let provider = MockServer::start().await;
        let storage = MockServer::start().await;
        let temp_dir = tempfile::tempdir()?;

        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0, // Will be assigned by the OS
            log_format: LogFormat::Pretty,
            eleven_labs_api_key: api_key.map(str::to_string),
            eleven_labs_base_url: provider.uri(),
            supabase_url: storage.uri(),
            supabase_service_key: TEST_SERVICE_KEY.to_string(),
            storage_bucket: TEST_BUCKET.to_string(),
            // nested so the server has to create it
            temp_dir_override: Some(temp_dir.path().join("speech")),
        };

        let app = create_app(&config);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            client: TestClient::new(&base_url),
            config,
            provider,
            storage,
            temp_dir,
        })
    }

    pub fn artifact_dir(&self) -> PathBuf {
        self.config.temp_dir()
    }

    /// Files currently left in the temp artifact directory
    pub fn leftover_artifacts(&self) -> Vec<PathBuf> {
        list_files(&self.artifact_dir())
    }

    pub async fn provider_requests(&self) -> Vec<wiremock::Request> {
        self.provider.received_requests().await.unwrap_or_default()
    }

    pub async fn storage_requests(&self) -> Vec<wiremock::Request> {
        self.storage.received_requests().await.unwrap_or_default()
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            TestContext::new()
                .await
                .expect("Failed to start test server")
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Mock servers and the temp dir clean up on drop
        }
    }
}

fn create_app(config: &Config) -> axum::Router {
    let http_client = reqwest::Client::new();

    let speech_repo = config.eleven_labs_api_key.as_ref().map(|key| {
        let repo: Arc<dyn SpeechRepository> = Arc::new(ElevenLabsSpeechRepository::new(
            http_client.clone(),
            config.eleven_labs_base_url.clone(),
            key.clone(),
        ));
        repo
    });

    let storage_repo = Arc::new(SupabaseStorageRepository::new(
        http_client,
        config.supabase_url.clone(),
        config.supabase_service_key.clone(),
        config.storage_bucket.clone(),
    ));

    let speech_service = Arc::new(SpeechSynthesisService::new(
        speech_repo,
        storage_repo,
        config.temp_dir(),
    ));
    let speech_controller = Arc::new(SpeechSynthesisController::new(speech_service.clone()));

    build_router(speech_service, speech_controller)
}

fn list_files(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
        Err(_) => Vec::new(),
    }
}
