pub mod audio;
pub mod generation;
pub mod settings;
pub mod story;
pub mod viewer;
