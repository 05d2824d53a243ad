pub mod health;
pub mod settings;
pub mod story;
pub mod viewer;
