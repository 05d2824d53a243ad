use crate::domain::story::Page;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageState {
    Loading,
    Loaded,
    /// Render the fallback panel
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationState {
    Unavailable,
    Paused,
    Playing,
}

/// What the client should do with its audio element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationCommand {
    Play,
    Pause,
}

/// Media events reported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaEvent {
    ImageLoaded,
    ImageError,
    NarrationPlay,
    NarrationPause,
    NarrationEnded,
}

/// Display state of the page currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub image: ImageState,
    pub narration: NarrationState,
}

impl PageView {
    /// Fresh state for a page that has just been shown
    pub fn for_page(page: &Page) -> Self {
        let image = match page.image_url {
            Some(_) => ImageState::Loading,
            None => ImageState::Errored,
        };
        let narration = match page.audio_url {
            Some(_) => NarrationState::Paused,
            None => NarrationState::Unavailable,
        };

        Self { image, narration }
    }

    pub fn has_narration(&self) -> bool {
        self.narration != NarrationState::Unavailable
    }

    /// Command that flips the current narration state
    pub fn narration_toggle(&self) -> Option<NarrationCommand> {
        match self.narration {
            NarrationState::Unavailable => None,
            NarrationState::Paused => Some(NarrationCommand::Play),
            NarrationState::Playing => Some(NarrationCommand::Pause),
        }
    }

    /// Mirror a reported media event. Narration events on a page without
    /// narration are ignored.
    pub fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::ImageLoaded => self.image = ImageState::Loaded,
            MediaEvent::ImageError => self.image = ImageState::Errored,
            MediaEvent::NarrationPlay if self.has_narration() => {
                self.narration = NarrationState::Playing
            }
            MediaEvent::NarrationPause | MediaEvent::NarrationEnded if self.has_narration() => {
                self.narration = NarrationState::Paused
            }
            _ => {}
        }
    }
}
