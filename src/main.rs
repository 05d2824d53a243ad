use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use storyweaver_backend::controllers::{
    settings::SettingsController, story::StoryController, viewer::ViewerController,
};
use storyweaver_backend::domain::{
    settings::SettingsService, story::StoryService, viewer::ViewerService,
};
use storyweaver_backend::infrastructure::config::{Config, LogFormat};
use storyweaver_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use storyweaver_backend::infrastructure::http::{build_router, start_http_server};
use storyweaver_backend::infrastructure::repositories::{
    CredentialProvider, GeminiGenerationRepository, SettingsRepository,
    StaticCredentialProvider, StoryRepository, SupabaseStorageRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting StoryWeaver Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let story_repo = Arc::new(StoryRepository::new(pool.clone()));
    let settings_repo = Arc::new(SettingsRepository::new(config.settings_path.clone()));
    let asset_storage = Arc::new(SupabaseStorageRepository::new(
        config.supabase_url.clone(),
        config.supabase_publishable_key.clone(),
    ));

    // 2. Credential source for the generation client
    let credentials: Arc<dyn CredentialProvider> = match &config.gemini_api_key {
        Some(key) if !key.trim().is_empty() => {
            tracing::info!("Using Gemini API key from the environment");
            Arc::new(StaticCredentialProvider::new(Some(key.clone())))
        }
        _ => {
            tracing::info!(
                path = %config.settings_path.display(),
                "Using Gemini API key from local settings"
            );
            settings_repo.clone()
        }
    };

    let generation_repo = Arc::new(GeminiGenerationRepository::new(
        credentials.clone(),
        config.gemini_api_base_url.clone(),
        config.gemini_story_model.clone(),
        config.gemini_image_model.clone(),
        config.gemini_speech_model.clone(),
    ));

    // 3. Instantiate services
    tracing::info!("Instantiating services...");
    let story_service = Arc::new(StoryService::new(
        story_repo,
        generation_repo,
        asset_storage,
    ));
    let viewer_service = Arc::new(ViewerService::new(
        story_service.clone(),
        Duration::from_secs(config.autoplay_dwell_secs),
    ));
    let settings_service = Arc::new(SettingsService::new(settings_repo, credentials));

    // 4. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let story_controller = Arc::new(StoryController::new(story_service));
    let viewer_controller = Arc::new(ViewerController::new(viewer_service));
    let settings_controller = Arc::new(SettingsController::new(settings_service));

    let app = build_router(pool, story_controller, viewer_controller, settings_controller);

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "storyweaver_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "storyweaver_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
