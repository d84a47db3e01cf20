//! Lesson entities
//!
//! Every generation output is built from these records. Field names are the
//! wire format shared with the frontend and with the model provider's
//! structured output, so they are not renamed.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One beat of the dialogue script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Panel {
    /// Position in the script, starting at 1
    pub panel: u32,
    pub speaker: String,
    /// Japanese line
    pub jp: String,
    /// Romanized line
    pub romaji: String,
    /// English translation
    pub en: String,
    /// Grammar note
    pub note: String,
}

/// Visual direction for one panel of the manga page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PanelVisual {
    /// Matches `Panel::panel`
    pub panel: u32,
    pub visual: String,
    pub dialogue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Character {
    pub name: String,
    pub description: String,
}

/// Everything the image generator needs to draw a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MangaPrompt {
    pub style: String,
    pub characters: Vec<Character>,
    pub panel_descriptions: Vec<PanelVisual>,
    pub dialogue: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Vocab {
    pub word: String,
    /// Kana reading
    pub reading: String,
    pub romaji: String,
    pub meaning: String,
}

/// Multiple choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Quiz {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub answer_index: usize,
    pub explanation: String,
}

impl Quiz {
    /// The option marked as correct, if the index is in range
    pub fn answer(&self) -> Option<&str> {
        self.options.get(self.answer_index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Overview {
    pub summary_en: String,
    pub level: String,
    /// Excerpt of the source entry, at most [`Overview::EXCERPT_CHARS`] characters
    pub based_on_entry: String,
}

impl Overview {
    pub const EXCERPT_CHARS: usize = 200;

    /// Excerpt stored in `based_on_entry` for a raw entry
    pub fn excerpt(entry: &str) -> String {
        truncate_chars(entry.trim(), Self::EXCERPT_CHARS).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Teaching {
    pub overview: Overview,
    pub lines: Vec<Panel>,
    pub vocab: Vec<Vocab>,
    pub quiz: Vec<Quiz>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Script {
    pub panels: Vec<Panel>,
}

/// Full output of the reflect operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReflectionResponse {
    pub script: Script,
    pub teaching: Teaching,
    pub manga_prompt: MangaPrompt,
}

/// Output of the image operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MangaResult {
    /// Image embedded as a `data:` URL
    pub image_data_url: String,
    /// Input panels, echoed back unchanged
    pub panels: Vec<Panel>,
    pub notes: String,
}

/// Combined lesson and image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    pub teaching: Teaching,
    pub script: Script,
    pub manga: MangaResult,
}

/// Truncate to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
