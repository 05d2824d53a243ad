use super::autoplay::{autoplay_cue, AutoplayCue};
use super::error::ViewerError;
use super::page_view::{ImageState, MediaEvent, NarrationCommand, NarrationState, PageView};
use crate::domain::story::{Page, Story};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Paged reading state over one stored story
#[derive(Debug, Clone)]
pub struct ViewerSession {
    story_id: String,
    title: String,
    pages: Vec<Page>,
    current: usize,
    autoplay_on: bool,
    view: PageView,
    epoch: u64,
}

/// Serialized view of a session after each interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSnapshot {
    pub session_id: Uuid,
    pub story_id: String,
    pub title: String,
    pub page_count: usize,
    pub current_page_index: usize,
    pub page: Page,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub autoplay: bool,
    pub can_toggle_autoplay: bool,
    pub image: ImageState,
    pub narration: NarrationState,
    pub autoplay_cue: AutoplayCue,
}

impl ViewerSession {
    pub fn new(story: Story) -> Result<Self, ViewerError> {
        let first = story.pages.first().ok_or(ViewerError::EmptyStory)?;
        let view = PageView::for_page(first);

        Ok(Self {
            story_id: story.id,
            title: story.title,
            pages: story.pages,
            current: 0,
            autoplay_on: false,
            view,
            epoch: 0,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.pages.len()
    }

    pub fn autoplay_on(&self) -> bool {
        self.autoplay_on
    }

    pub fn view(&self) -> PageView {
        self.view
    }

    /// Bumped on every page change and autoplay switch; a pending timer from an
    /// older epoch must not act.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn can_toggle_autoplay(&self) -> bool {
        !(self.is_last() && !self.autoplay_on)
    }

    pub fn cue(&self) -> AutoplayCue {
        autoplay_cue(self.autoplay_on, &self.view)
    }

    /// Advance one page. On the last page autoplay is switched off instead.
    pub fn next(&mut self) {
        if self.is_last() {
            if self.autoplay_on {
                self.autoplay_on = false;
                self.epoch += 1;
            }
            return;
        }
        self.go_to(self.current + 1);
    }

    pub fn prev(&mut self) {
        if !self.is_first() {
            self.go_to(self.current - 1);
        }
    }

    pub fn set_autoplay(&mut self, enabled: bool) -> Result<(), ViewerError> {
        if enabled == self.autoplay_on {
            return Ok(());
        }
        if enabled && !self.can_toggle_autoplay() {
            return Err(ViewerError::AutoplayUnavailable);
        }

        self.autoplay_on = enabled;
        self.epoch += 1;
        Ok(())
    }

    /// The command the client should apply. State changes only when the
    /// resulting media event is reported back.
    pub fn toggle_narration(&self) -> Result<NarrationCommand, ViewerError> {
        self.view
            .narration_toggle()
            .ok_or(ViewerError::NarrationUnavailable)
    }

    pub fn apply_event(&mut self, event: MediaEvent) {
        self.view.apply(event);

        if event == MediaEvent::NarrationEnded && self.autoplay_on && self.view.has_narration() {
            self.next();
        }
    }

    /// Page turn requested by an autoplay timer armed at `epoch`
    pub fn dwell_elapsed(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.cue() != AutoplayCue::Dwell {
            return false;
        }
        self.next();
        true
    }

    pub fn snapshot(&self, session_id: Uuid) -> ViewerSnapshot {
        ViewerSnapshot {
            session_id,
            story_id: self.story_id.clone(),
            title: self.title.clone(),
            page_count: self.pages.len(),
            current_page_index: self.current,
            page: self.current_page().clone(),
            is_first_page: self.is_first(),
            is_last_page: self.is_last(),
            autoplay: self.autoplay_on,
            can_toggle_autoplay: self.can_toggle_autoplay(),
            image: self.view.image,
            narration: self.view.narration,
            autoplay_cue: self.cue(),
        }
    }

    fn go_to(&mut self, index: usize) {
        self.current = index;
        self.view = PageView::for_page(&self.pages[index]);
        self.epoch += 1;
    }
}
