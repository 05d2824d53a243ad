pub mod error;
pub mod media;
pub mod prompt;

pub use error::GenerationError;
pub use media::MediaAsset;
pub use prompt::{build_story_prompt, parse_story_response, StoryRequest};
