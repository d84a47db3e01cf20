//! Live backends on the Gemini `generateContent` API

pub mod client;
pub mod error;
pub mod illustrator;
pub mod prompt;
pub mod reflector;

pub use client::GeminiClient;
pub use error::{GeminiError, GeminiResult};
pub use illustrator::GeminiIllustrator;
pub use reflector::GeminiReflector;
