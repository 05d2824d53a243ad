pub mod request_id;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use crate::controllers::{
    health, settings::SettingsController, story::StoryController, viewer::ViewerController,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

/// Assemble all routes with their controllers
pub fn build_router(
    pool: Arc<DbPool>,
    story_controller: Arc<StoryController>,
    viewer_controller: Arc<ViewerController>,
    settings_controller: Arc<SettingsController>,
) -> Router {
    // Story creation, library and viewer data
    let story_routes = Router::new()
        .route(
            "/api/stories",
            get(StoryController::list_stories).post(StoryController::create_story),
        )
        .route("/api/stories/:storyId", get(StoryController::get_story))
        .with_state(story_controller);

    // Viewer sessions
    let viewer_routes = Router::new()
        .route("/api/viewer/sessions", post(ViewerController::open_session))
        .route(
            "/api/viewer/sessions/:sessionId",
            get(ViewerController::get_session).delete(ViewerController::close_session),
        )
        .route(
            "/api/viewer/sessions/:sessionId/next",
            post(ViewerController::next_page),
        )
        .route(
            "/api/viewer/sessions/:sessionId/prev",
            post(ViewerController::prev_page),
        )
        .route(
            "/api/viewer/sessions/:sessionId/autoplay",
            put(ViewerController::set_autoplay),
        )
        .route(
            "/api/viewer/sessions/:sessionId/narration/toggle",
            post(ViewerController::toggle_narration),
        )
        .route(
            "/api/viewer/sessions/:sessionId/events",
            post(ViewerController::report_event),
        )
        .with_state(viewer_controller);

    // Local settings and onboarding
    let settings_routes = Router::new()
        .route("/api/settings", get(SettingsController::get_settings))
        .route("/api/settings/api-key", put(SettingsController::save_api_key))
        .route("/api/onboarding", get(SettingsController::get_onboarding))
        .route(
            "/api/onboarding/complete",
            post(SettingsController::complete_onboarding),
        )
        .with_state(settings_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(story_routes)
        .merge(viewer_routes)
        .merge(settings_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
