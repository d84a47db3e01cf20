//! Local generators used when live mode is off
//!
//! Both are deterministic: identical input yields byte-identical output.

pub mod lesson;
pub mod placeholder;

pub use lesson::{StubReflector, jogging_lesson};
pub use placeholder::{StubIllustrator, placeholder_data_url, placeholder_svg};
