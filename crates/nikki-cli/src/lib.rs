//! Nikki CLI library

pub mod commands;
pub mod error;

use nikki::{LessonService, ModelSettings};
use std::path::Path;

/// Settings for one CLI run: a JSON settings file if given, otherwise the
/// environment. `--live` overrides the stub flag either way.
pub fn load_settings(settings_file: Option<&Path>, live: bool) -> anyhow::Result<ModelSettings> {
    let mut settings = match settings_file {
        Some(path) => ModelSettings::load_from_file(path)?,
        None => ModelSettings::from_env(),
    };
    if live {
        settings.use_stubs = false;
    }
    Ok(settings)
}

pub fn build_service(settings: ModelSettings) -> LessonService {
    LessonService::new(settings)
}
