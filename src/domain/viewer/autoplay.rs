use super::page_view::PageView;
use serde::{Deserialize, Serialize};

/// What advances the viewer while autoplay is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoplayCue {
    /// Autoplay is off; only explicit navigation moves the page
    Idle,
    /// Play the narration; the page turns when it ends
    Narration,
    /// No narration on this page; the page turns after the dwell time
    Dwell,
}

pub fn autoplay_cue(autoplay_on: bool, view: &PageView) -> AutoplayCue {
    if !autoplay_on {
        AutoplayCue::Idle
    } else if view.has_narration() {
        AutoplayCue::Narration
    } else {
        AutoplayCue::Dwell
    }
}
