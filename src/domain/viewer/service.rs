use super::autoplay::AutoplayCue;
use super::error::ViewerError;
use super::page_view::{MediaEvent, NarrationCommand};
use super::session::{ViewerSession, ViewerSnapshot};
use crate::domain::story::StoryServiceApi;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);
const MAX_SESSIONS: u64 = 1_000;

struct SessionEntry {
    session: ViewerSession,
    timer: Option<AbortHandle>,
}

type SessionCache = Cache<Uuid, Arc<Mutex<SessionEntry>>>;

pub struct ViewerService {
    story_service: Arc<dyn StoryServiceApi>,
    sessions: SessionCache,
    dwell: Duration,
}

impl ViewerService {
    pub fn new(story_service: Arc<dyn StoryServiceApi>, dwell: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_idle(SESSION_IDLE_TTL)
            .build();

        Self {
            story_service,
            sessions,
            dwell,
        }
    }
}

#[async_trait]
pub trait ViewerServiceApi: Send + Sync {
    async fn open(&self, story_id: &str) -> Result<ViewerSnapshot, ViewerError>;

    async fn snapshot(&self, session_id: Uuid) -> Result<ViewerSnapshot, ViewerError>;

    async fn next(&self, session_id: Uuid) -> Result<ViewerSnapshot, ViewerError>;

    async fn prev(&self, session_id: Uuid) -> Result<ViewerSnapshot, ViewerError>;

    async fn set_autoplay(
        &self,
        session_id: Uuid,
        enabled: bool,
    ) -> Result<ViewerSnapshot, ViewerError>;

    async fn toggle_narration(&self, session_id: Uuid) -> Result<NarrationCommand, ViewerError>;

    async fn report_event(
        &self,
        session_id: Uuid,
        event: MediaEvent,
    ) -> Result<ViewerSnapshot, ViewerError>;

    async fn close(&self, session_id: Uuid) -> Result<(), ViewerError>;
}

#[async_trait]
impl ViewerServiceApi for ViewerService {
    async fn open(&self, story_id: &str) -> Result<ViewerSnapshot, ViewerError> {
        let story = self.story_service.get_story(story_id).await?;
        let session = ViewerSession::new(story)?;

        let session_id = Uuid::new_v4();
        let snapshot = session.snapshot(session_id);
        self.sessions
            .insert(
                session_id,
                Arc::new(Mutex::new(SessionEntry {
                    session,
                    timer: None,
                })),
            )
            .await;

        tracing::info!(session_id = %session_id, story_id = story_id, "Viewer session opened");

        Ok(snapshot)
    }

    async fn snapshot(&self, session_id: Uuid) -> Result<ViewerSnapshot, ViewerError> {
        let entry = self.entry(session_id).await?;
        let entry = entry.lock().await;
        Ok(entry.session.snapshot(session_id))
    }

    async fn next(&self, session_id: Uuid) -> Result<ViewerSnapshot, ViewerError> {
        self.update(session_id, |session| {
            session.next();
            Ok(())
        })
        .await
    }

    async fn prev(&self, session_id: Uuid) -> Result<ViewerSnapshot, ViewerError> {
        self.update(session_id, |session| {
            session.prev();
            Ok(())
        })
        .await
    }

    async fn set_autoplay(
        &self,
        session_id: Uuid,
        enabled: bool,
    ) -> Result<ViewerSnapshot, ViewerError> {
        self.update(session_id, |session| session.set_autoplay(enabled))
            .await
    }

    async fn toggle_narration(&self, session_id: Uuid) -> Result<NarrationCommand, ViewerError> {
        let entry = self.entry(session_id).await?;
        let entry = entry.lock().await;
        entry.session.toggle_narration()
    }

    async fn report_event(
        &self,
        session_id: Uuid,
        event: MediaEvent,
    ) -> Result<ViewerSnapshot, ViewerError> {
        self.update(session_id, |session| {
            session.apply_event(event);
            Ok(())
        })
        .await
    }

    async fn close(&self, session_id: Uuid) -> Result<(), ViewerError> {
        let entry = self
            .sessions
            .remove(&session_id)
            .await
            .ok_or(ViewerError::SessionNotFound)?;

        if let Some(timer) = entry.lock().await.timer.take() {
            timer.abort();
        }

        tracing::info!(session_id = %session_id, "Viewer session closed");
        Ok(())
    }
}

impl ViewerService {
    async fn entry(&self, session_id: Uuid) -> Result<Arc<Mutex<SessionEntry>>, ViewerError> {
        self.sessions
            .get(&session_id)
            .await
            .ok_or(ViewerError::SessionNotFound)
    }

    /// Apply a transition and re-arm the dwell timer if the epoch moved
    async fn update<F>(&self, session_id: Uuid, transition: F) -> Result<ViewerSnapshot, ViewerError>
    where
        F: FnOnce(&mut ViewerSession) -> Result<(), ViewerError> + Send,
    {
        let entry = self.entry(session_id).await?;
        let mut guard = entry.lock().await;

        let before = guard.session.epoch();
        transition(&mut guard.session)?;
        if guard.session.epoch() != before {
            rearm(&self.sessions, session_id, &mut guard, self.dwell);
        }

        Ok(guard.session.snapshot(session_id))
    }
}

/// Abort the pending timer and, when the page has no narration to wait for,
/// arm a new one for the current epoch
fn rearm(sessions: &SessionCache, session_id: Uuid, entry: &mut SessionEntry, dwell: Duration) {
    if let Some(timer) = entry.timer.take() {
        timer.abort();
    }

    if entry.session.cue() != AutoplayCue::Dwell {
        return;
    }

    let epoch = entry.session.epoch();
    let sessions = sessions.clone();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(dwell).await;

        let Some(entry) = sessions.get(&session_id).await else {
            return;
        };
        let mut guard = entry.lock().await;
        // this task's own handle; dropping it without aborting
        guard.timer = None;

        if guard.session.dwell_elapsed(epoch) {
            tracing::debug!(
                session_id = %session_id,
                page = guard.session.current_index(),
                "Autoplay dwell elapsed"
            );
            rearm(&sessions, session_id, &mut guard, dwell);
        }
    });

    entry.timer = Some(handle.abort_handle());
}
