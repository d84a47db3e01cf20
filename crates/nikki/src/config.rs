use serde::{Deserialize, Serialize};

pub const USE_MODEL_STUBS: &str = "USE_MODEL_STUBS";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const NANO_BANANA_API_KEY: &str = "NANO_BANANA_API_KEY";
pub const GEMINI_API_BASE: &str = "GEMINI_API_BASE";
pub const GEMINI_TEXT_MODEL: &str = "GEMINI_TEXT_MODEL";
pub const GEMINI_IMAGE_MODEL: &str = "GEMINI_IMAGE_MODEL";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// Which implementation serves a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Fixed local content, no network
    Stub,
    /// Remote model provider
    Live,
}

/// Model provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Serve stub content instead of calling the provider
    pub use_stubs: bool,

    /// Primary credential, used by every live operation
    pub gemini_api_key: Option<String>,

    /// Fallback credential for image generation only
    pub image_api_key: Option<String>,

    /// Provider REST base URL
    pub api_base: String,

    /// Model used for lesson generation
    pub text_model: String,

    /// Model used for image generation
    pub image_model: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            use_stubs: true,
            gemini_api_key: None,
            image_api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

impl ModelSettings {
    /// Settings that always serve stub content
    pub fn stub() -> Self {
        Self::default()
    }

    /// Live settings with the given primary credential
    pub fn live(gemini_api_key: Option<String>) -> Self {
        Self {
            use_stubs: false,
            gemini_api_key,
            ..Default::default()
        }
    }

    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Empty values count
    /// as unset, except for the stub flag.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            // Raw value: once set, only an exact case-insensitive "true" keeps stubs
            use_stubs: lookup(USE_MODEL_STUBS)
                .map(|value| value.to_lowercase() == "true")
                .unwrap_or(defaults.use_stubs),
            gemini_api_key: get(GEMINI_API_KEY),
            image_api_key: get(NANO_BANANA_API_KEY),
            api_base: get(GEMINI_API_BASE)
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            text_model: get(GEMINI_TEXT_MODEL).unwrap_or(defaults.text_model),
            image_model: get(GEMINI_IMAGE_MODEL).unwrap_or(defaults.image_model),
        }
    }

    /// Load from configuration file
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    pub fn backend(&self) -> Backend {
        if self.use_stubs {
            Backend::Stub
        } else {
            Backend::Live
        }
    }

    /// Credential for lesson generation
    pub fn reflect_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }

    /// Credential for image generation, falling back to the image key
    pub fn image_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .or(self.image_api_key.as_deref())
    }
}

/// Source of settings, consulted once per operation
pub trait SettingsProvider: Send + Sync {
    fn current(&self) -> ModelSettings;
}

/// Re-reads the process environment on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsProvider for EnvSettings {
    fn current(&self) -> ModelSettings {
        ModelSettings::from_env()
    }
}

/// Fixed settings
impl SettingsProvider for ModelSettings {
    fn current(&self) -> ModelSettings {
        self.clone()
    }
}

/// Load a `.env` file into the process environment if one exists
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    dotenv::dotenv().ok()
}
