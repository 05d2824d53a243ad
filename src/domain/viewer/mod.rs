pub mod autoplay;
pub mod error;
pub mod page_view;
pub mod service;
pub mod session;

pub use autoplay::AutoplayCue;
pub use error::ViewerError;
pub use page_view::{ImageState, MediaEvent, NarrationCommand, NarrationState, PageView};
pub use service::{ViewerService, ViewerServiceApi};
pub use session::{ViewerSession, ViewerSnapshot};

use serde::{Deserialize, Serialize};

/// Request for POST /api/viewer/sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenViewerRequest {
    pub story_id: String,
}

/// Request for PUT /api/viewer/sessions/:sessionId/autoplay
#[derive(Debug, Serialize, Deserialize)]
pub struct AutoplayRequest {
    pub enabled: bool,
}

/// Request for POST /api/viewer/sessions/:sessionId/events
#[derive(Debug, Serialize, Deserialize)]
pub struct MediaEventRequest {
    #[serde(rename = "type")]
    pub event: MediaEvent,
}

/// Response for POST /api/viewer/sessions/:sessionId/narration/toggle
#[derive(Debug, Serialize, Deserialize)]
pub struct NarrationToggleResponse {
    pub command: NarrationCommand,
}
