use std::sync::Arc;

use nikki_core::{
    GenerateResponse, Illustrator, MangaPrompt, MangaResult, Panel, ProcessorMetadata, Reflector,
    ReflectionResponse, Result, SharedIllustrator, SharedReflector,
};

use crate::config::{Backend, EnvSettings, SettingsProvider};
use crate::gemini::{GeminiIllustrator, GeminiReflector};
use crate::stub::{StubIllustrator, StubReflector};

/// Picks the backend for one call
pub trait BackendSelector: Send + Sync {
    fn reflector(&self) -> Result<SharedReflector>;

    fn illustrator(&self) -> Result<SharedIllustrator>;
}

/// Chooses stub or live backends from the current settings on every call
pub struct ModeSelector {
    settings: Arc<dyn SettingsProvider>,
    http: reqwest::Client,
}

impl ModeSelector {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self {
            settings,
            http: reqwest::Client::new(),
        }
    }
}

impl BackendSelector for ModeSelector {
    fn reflector(&self) -> Result<SharedReflector> {
        let settings = self.settings.current();
        let reflector: SharedReflector = match settings.backend() {
            Backend::Stub => Arc::new(StubReflector),
            Backend::Live => Arc::new(GeminiReflector::from_settings(&settings, self.http.clone())?),
        };

        log_selected("reflector", &reflector.metadata());
        Ok(reflector)
    }

    fn illustrator(&self) -> Result<SharedIllustrator> {
        let settings = self.settings.current();
        let illustrator: SharedIllustrator = match settings.backend() {
            Backend::Stub => Arc::new(StubIllustrator),
            Backend::Live => {
                Arc::new(GeminiIllustrator::from_settings(&settings, self.http.clone())?)
            }
        };

        log_selected("illustrator", &illustrator.metadata());
        Ok(illustrator)
    }
}

fn log_selected(role: &str, metadata: &ProcessorMetadata) {
    tracing::debug!(
        role,
        backend = metadata.name.as_deref().unwrap_or("unnamed"),
        description = metadata.description.as_deref().unwrap_or_default(),
        "selected backend"
    );
}

/// Service layer for lesson generation
#[derive(Clone)]
pub struct LessonService {
    selector: Arc<dyn BackendSelector>,
}

impl Default for LessonService {
    fn default() -> Self {
        Self::from_env()
    }
}

impl LessonService {
    /// Create a service that reads `settings` on every call
    pub fn new(settings: impl SettingsProvider + 'static) -> Self {
        Self::with_selector(ModeSelector::new(Arc::new(settings)))
    }

    /// Create a service driven by the process environment
    pub fn from_env() -> Self {
        Self::new(EnvSettings)
    }

    pub fn with_selector(selector: impl BackendSelector + 'static) -> Self {
        Self {
            selector: Arc::new(selector),
        }
    }

    /// Build a lesson from a diary entry
    pub async fn reflect(&self, entry: &str, level: &str) -> Result<ReflectionResponse> {
        let reflector = self.selector.reflector()?;
        reflector.reflect(entry, level).await.inspect_err(|e| {
            tracing::warn!("reflect failed: {}", e);
        })
    }

    /// Draw the manga page for a prompt
    pub async fn illustrate(&self, prompt: &MangaPrompt, panels: &[Panel]) -> Result<MangaResult> {
        let illustrator = self.selector.illustrator()?;
        illustrator.illustrate(prompt, panels).await.inspect_err(|e| {
            tracing::warn!("illustrate failed: {}", e);
        })
    }

    /// Reflect, then illustrate the resulting script. Stops at the first
    /// failure.
    pub async fn generate(&self, entry: &str, level: &str) -> Result<GenerateResponse> {
        let reflection = self.reflect(entry, level).await?;
        let manga = self
            .illustrate(&reflection.manga_prompt, &reflection.script.panels)
            .await?;

        Ok(GenerateResponse {
            teaching: reflection.teaching,
            script: reflection.script,
            manga,
        })
    }
}
