//! Structured output support
//!
//! [`StructuredOutput`] describes a type as the response schema the model
//! provider constrains its output to (an OpenAPI subset with upper-case type
//! names). [`Validate`] checks the invariants a schema cannot express, and is
//! applied to every parsed response before it reaches a caller.

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::schema::{
    Character, MangaPrompt, Overview, Panel, PanelVisual, Quiz, ReflectionResponse, Script,
    Teaching, Vocab,
};

/// A type whose shape can be sent to the provider as a response schema
pub trait StructuredOutput {
    fn response_schema() -> Value;
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn integer() -> Value {
    json!({ "type": "INTEGER" })
}

fn array(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// Object schema with every property required, in declaration order.
fn object(fields: &[(&str, Value)]) -> Value {
    let mut properties = Map::new();
    for (name, schema) in fields {
        properties.insert((*name).to_string(), schema.clone());
    }
    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": names,
        "propertyOrdering": names,
    })
}

impl StructuredOutput for Panel {
    fn response_schema() -> Value {
        object(&[
            ("panel", integer()),
            ("speaker", string()),
            ("jp", string()),
            ("romaji", string()),
            ("en", string()),
            ("note", string()),
        ])
    }
}

impl StructuredOutput for PanelVisual {
    fn response_schema() -> Value {
        object(&[
            ("panel", integer()),
            ("visual", string()),
            ("dialogue", string()),
        ])
    }
}

impl StructuredOutput for Character {
    fn response_schema() -> Value {
        object(&[("name", string()), ("description", string())])
    }
}

impl StructuredOutput for MangaPrompt {
    fn response_schema() -> Value {
        object(&[
            ("style", string()),
            ("characters", array(Character::response_schema())),
            ("panel_descriptions", array(PanelVisual::response_schema())),
            ("dialogue", array(string())),
        ])
    }
}

impl StructuredOutput for Vocab {
    fn response_schema() -> Value {
        object(&[
            ("word", string()),
            ("reading", string()),
            ("romaji", string()),
            ("meaning", string()),
        ])
    }
}

impl StructuredOutput for Quiz {
    fn response_schema() -> Value {
        object(&[
            ("question", string()),
            ("options", array(string())),
            ("answer_index", integer()),
            ("explanation", string()),
        ])
    }
}

impl StructuredOutput for Overview {
    fn response_schema() -> Value {
        object(&[
            ("summary_en", string()),
            ("level", string()),
            ("based_on_entry", string()),
        ])
    }
}

impl StructuredOutput for Teaching {
    fn response_schema() -> Value {
        object(&[
            ("overview", Overview::response_schema()),
            ("lines", array(Panel::response_schema())),
            ("vocab", array(Vocab::response_schema())),
            ("quiz", array(Quiz::response_schema())),
        ])
    }
}

impl StructuredOutput for Script {
    fn response_schema() -> Value {
        object(&[("panels", array(Panel::response_schema()))])
    }
}

impl StructuredOutput for ReflectionResponse {
    fn response_schema() -> Value {
        object(&[
            ("script", Script::response_schema()),
            ("teaching", Teaching::response_schema()),
            ("manga_prompt", MangaPrompt::response_schema()),
        ])
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("quiz {quiz} has no options")]
    EmptyOptions { quiz: usize },

    #[error("quiz {quiz} answer_index {answer_index} is out of range for {options} options")]
    AnswerOutOfRange {
        quiz: usize,
        answer_index: usize,
        options: usize,
    },

    #[error("script has no panels")]
    EmptyScript,
}

/// Invariants checked after parsing
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn validate_quiz(position: usize, quiz: &Quiz) -> Result<(), ValidationError> {
    if quiz.options.is_empty() {
        return Err(ValidationError::EmptyOptions { quiz: position });
    }
    if quiz.answer().is_none() {
        return Err(ValidationError::AnswerOutOfRange {
            quiz: position,
            answer_index: quiz.answer_index,
            options: quiz.options.len(),
        });
    }
    Ok(())
}

impl Validate for Quiz {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_quiz(0, self)
    }
}

impl Validate for Script {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.panels.is_empty() {
            return Err(ValidationError::EmptyScript);
        }
        Ok(())
    }
}

impl Validate for Teaching {
    fn validate(&self) -> Result<(), ValidationError> {
        self.quiz
            .iter()
            .enumerate()
            .try_for_each(|(position, quiz)| validate_quiz(position, quiz))
    }
}

impl Validate for ReflectionResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        self.script.validate()?;
        self.teaching.validate()
    }
}
