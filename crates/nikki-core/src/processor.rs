//! Generation contracts
//!
//! Every backend, stub or live, implements the same two traits so callers
//! can pick one per call without caring which it got.

use crate::{MangaPrompt, MangaResult, Panel, ReflectionResponse, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Turns a diary entry into a structured lesson
#[async_trait]
pub trait Reflector: Send + Sync {
    /// Build a lesson for `entry` at the given proficiency `level`
    async fn reflect(&self, entry: &str, level: &str) -> Result<ReflectionResponse>;

    /// Optional method to get backend metadata
    fn metadata(&self) -> ProcessorMetadata {
        ProcessorMetadata::default()
    }
}

/// Draws the manga page for a lesson
#[async_trait]
pub trait Illustrator: Send + Sync {
    /// Render `prompt`; `panels` are echoed back in the result
    async fn illustrate(&self, prompt: &MangaPrompt, panels: &[Panel]) -> Result<MangaResult>;

    /// Optional method to get backend metadata
    fn metadata(&self) -> ProcessorMetadata {
        ProcessorMetadata::default()
    }
}

/// Metadata about a backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessorMetadata {
    /// Human-readable name of the backend
    pub name: Option<String>,
    /// Description of what this backend does
    pub description: Option<String>,
}

impl ProcessorMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }
}

/// Arc-wrapped reflector for thread-safe sharing
pub type SharedReflector = Arc<dyn Reflector>;

/// Arc-wrapped illustrator for thread-safe sharing
pub type SharedIllustrator = Arc<dyn Illustrator>;
