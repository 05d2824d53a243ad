use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::viewer::{
        AutoplayRequest, MediaEventRequest, NarrationToggleResponse, OpenViewerRequest,
        ViewerServiceApi, ViewerSnapshot,
    },
    error::AppResult,
};

pub struct ViewerController {
    viewer_service: Arc<dyn ViewerServiceApi>,
}

impl ViewerController {
    pub fn new(viewer_service: Arc<dyn ViewerServiceApi>) -> Self {
        Self { viewer_service }
    }

    /// POST /api/viewer/sessions - Open a story in a new viewer session
    pub async fn open_session(
        State(controller): State<Arc<ViewerController>>,
        Json(request): Json<OpenViewerRequest>,
    ) -> AppResult<(StatusCode, Json<ViewerSnapshot>)> {
        let snapshot = controller.viewer_service.open(&request.story_id).await?;
        Ok((StatusCode::CREATED, Json(snapshot)))
    }

    /// GET /api/viewer/sessions/:sessionId
    pub async fn get_session(
        State(controller): State<Arc<ViewerController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<ViewerSnapshot>> {
        Ok(Json(controller.viewer_service.snapshot(session_id).await?))
    }

    /// DELETE /api/viewer/sessions/:sessionId
    pub async fn close_session(
        State(controller): State<Arc<ViewerController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller.viewer_service.close(session_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// POST /api/viewer/sessions/:sessionId/next
    pub async fn next_page(
        State(controller): State<Arc<ViewerController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<ViewerSnapshot>> {
        Ok(Json(controller.viewer_service.next(session_id).await?))
    }

    /// POST /api/viewer/sessions/:sessionId/prev
    pub async fn prev_page(
        State(controller): State<Arc<ViewerController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<ViewerSnapshot>> {
        Ok(Json(controller.viewer_service.prev(session_id).await?))
    }

    /// PUT /api/viewer/sessions/:sessionId/autoplay
    pub async fn set_autoplay(
        State(controller): State<Arc<ViewerController>>,
        Path(session_id): Path<Uuid>,
        Json(request): Json<AutoplayRequest>,
    ) -> AppResult<Json<ViewerSnapshot>> {
        let snapshot = controller
            .viewer_service
            .set_autoplay(session_id, request.enabled)
            .await?;
        Ok(Json(snapshot))
    }

    /// POST /api/viewer/sessions/:sessionId/narration/toggle
    pub async fn toggle_narration(
        State(controller): State<Arc<ViewerController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<NarrationToggleResponse>> {
        let command = controller.viewer_service.toggle_narration(session_id).await?;
        Ok(Json(NarrationToggleResponse { command }))
    }

    /// POST /api/viewer/sessions/:sessionId/events - Report an image or audio event
    pub async fn report_event(
        State(controller): State<Arc<ViewerController>>,
        Path(session_id): Path<Uuid>,
        Json(request): Json<MediaEventRequest>,
    ) -> AppResult<Json<ViewerSnapshot>> {
        let snapshot = controller
            .viewer_service
            .report_event(session_id, request.event)
            .await?;
        Ok(Json(snapshot))
    }
}
