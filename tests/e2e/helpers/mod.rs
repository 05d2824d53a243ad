use anyhow::Result;
use axum::Router;
use once_cell::sync::Lazy;
use sqlx::PgPool;
use std::sync::Arc;
use storyweaver_backend::infrastructure::config::{
    Config, Environment, LogFormat, DEFAULT_GEMINI_API_BASE_URL, DEFAULT_IMAGE_MODEL,
    DEFAULT_SPEECH_MODEL, DEFAULT_STORY_MODEL,
};
use tempfile::TempDir;
use test_context::AsyncTestContext;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio::net::TcpListener;

pub mod assertions;
pub mod db_pool;
pub mod fixtures;
pub mod mocks;

use api_client::TestClient;
use db_pool::{DatabasePool, PooledDatabase};
use fixtures::TestFixtures;
use mocks::{InMemoryAssetStorage, MockGenerationRepository};

// Docker client for test containers
static DOCKER: Lazy<Cli> = Lazy::new(Cli::default);

// Shared PostgreSQL container for all tests
static SHARED_CONTAINER: Lazy<SharedContainer> = Lazy::new(SharedContainer::new);

// Global database pool
static DB_POOL: Lazy<DatabasePool> = Lazy::new(|| DatabasePool::new(SHARED_CONTAINER.port));

/// Shared container that lives for the duration of all tests
struct SharedContainer {
    _container: Container<'static, Postgres>,
    port: u16,
}

impl SharedContainer {
    fn new() -> Self {
        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);

        println!("🐳 Started shared PostgreSQL container on port {}", port);

        Self {
            _container: container,
            port,
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub pool: PgPool,
    #[allow(dead_code)]
    pub config: Config,
    pub fixtures: TestFixtures,
    pub generation: Arc<MockGenerationRepository>,
    pub storage: Arc<InMemoryAssetStorage>,
    _settings_dir: TempDir,
    _db: PooledDatabase,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let pooled_db = DB_POOL
                .get_database()
                .await
                .expect("Failed to get database from pool");

            let settings_dir = tempfile::tempdir().expect("Failed to create settings dir");

            let config = Config {
                database_url: pooled_db.database_url.clone(),
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                supabase_url: "https://storage.test".to_string(),
                supabase_publishable_key: "test-publishable-key".to_string(),
                gemini_api_base_url: DEFAULT_GEMINI_API_BASE_URL.to_string(),
                gemini_story_model: DEFAULT_STORY_MODEL.to_string(),
                gemini_image_model: DEFAULT_IMAGE_MODEL.to_string(),
                gemini_speech_model: DEFAULT_SPEECH_MODEL.to_string(),
                gemini_api_key: None,
                settings_path: settings_dir.path().join("settings.json"),
                autoplay_dwell_secs: 5,
            };

            let generation = Arc::new(MockGenerationRepository::new());
            let storage = Arc::new(InMemoryAssetStorage::new());

            let app = create_app_with_mocks(
                &config,
                pooled_db.pool.clone(),
                generation.clone(),
                storage.clone(),
            )
            .expect("Failed to create app");

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            let client = TestClient::new(&base_url);
            let fixtures = TestFixtures::new(pooled_db.pool.clone());

            Self {
                client,
                pool: pooled_db.pool.clone(),
                config,
                fixtures,
                generation,
                storage,
                _settings_dir: settings_dir,
                _db: pooled_db,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Database cleanup happens automatically via Drop on PooledDatabase
        }
    }
}

/// The production router with generation and storage replaced by in-process mocks
fn create_app_with_mocks(
    config: &Config,
    pool: PgPool,
    generation: Arc<MockGenerationRepository>,
    storage: Arc<InMemoryAssetStorage>,
) -> Result<Router> {
    use storyweaver_backend::{
        controllers::{
            settings::SettingsController, story::StoryController, viewer::ViewerController,
        },
        domain::{settings::SettingsService, story::StoryService, viewer::ViewerService},
        infrastructure::{
            http::build_router,
            repositories::{SettingsRepository, StoryRepository},
        },
    };

    let pool = Arc::new(pool);

    let story_repo = Arc::new(StoryRepository::new(pool.clone()));
    let settings_repo = Arc::new(SettingsRepository::new(config.settings_path.clone()));

    let story_service = Arc::new(StoryService::new(story_repo, generation, storage));
    let viewer_service = Arc::new(ViewerService::new(
        story_service.clone(),
        std::time::Duration::from_secs(config.autoplay_dwell_secs),
    ));
    let settings_service = Arc::new(SettingsService::new(
        settings_repo.clone(),
        settings_repo,
    ));

    let app = build_router(
        pool,
        Arc::new(StoryController::new(story_service)),
        Arc::new(ViewerController::new(viewer_service)),
        Arc::new(SettingsController::new(settings_service)),
    );

    Ok(app)
}
