//! Main crate for Nikki
//!
//! Turns diary entries into Japanese lessons and manga pages, either with
//! the fixed stub generators or with the live model provider. The backend is
//! chosen from the current settings on every call.

pub mod config;
pub mod gemini;
pub mod service;
pub mod stub;

// Re-export core types
pub use nikki_core::{
    Character, GenerateResponse, GenerationError, Illustrator, MangaPrompt, MangaResult, Overview,
    Panel, PanelVisual, Quiz, Reflector, ReflectionResponse, Result, Script, Teaching, Vocab,
};

pub use config::{Backend, EnvSettings, ModelSettings, SettingsProvider};
pub use service::{BackendSelector, LessonService, ModeSelector};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ModelSettings;
    pub use crate::service::LessonService;
    pub use nikki_core::{GenerationError, MangaPrompt, Panel, ReflectionResponse};
}
