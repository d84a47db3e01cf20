//! # Nikki Core
//!
//! Lesson schema, structured-output descriptions and the generation contracts
//! shared by every backend.

pub mod error;
pub mod processor;
pub mod schema;
pub mod structured;

pub use error::{GenerationError, Result};
pub use processor::{Illustrator, ProcessorMetadata, Reflector, SharedIllustrator, SharedReflector};
pub use schema::{
    Character, GenerateResponse, MangaPrompt, MangaResult, Overview, Panel, PanelVisual, Quiz,
    ReflectionResponse, Script, Teaching, Vocab, truncate_chars,
};
pub use structured::{StructuredOutput, Validate, ValidationError};
