//! Question catalog data model
//!
//! Mirrors the parts of a questionnaire catalog that carry tag information.
//! Everything else in a catalog entry is ignored on deserialization.
//! Tag mappings keep their document order.

use crate::error::{Result, TagInfoError};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One question of the catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
    pub question: QuestionText,

    pub answer: Answer,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Question {
    /// Reference to the question's display text (literal or translation key)
    pub fn text_ref(&self) -> &str {
        &self.question.text
    }

    /// The condition that decides the question's object types.
    ///
    /// Only the first condition is consulted; later ones are ignored.
    pub fn condition(&self) -> Option<&Condition> {
        self.conditions.first()
    }

    /// Element specifier of the deciding condition, if any
    pub fn element_spec(&self) -> Option<&ElementSpec> {
        self.condition().and_then(|c| c.osm_element.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionText {
    pub text: String,
}

/// Answer definition of a question
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Answer {
    /// Answer inputs; `None` means the question produces no tags
    #[serde(default)]
    pub input: Option<Vec<AnswerInput>>,

    /// Constructor mapping; only its keys are tag relevant
    #[serde(default)]
    pub constructor: Option<Map<String, Value>>,
}

/// A single selectable or typed answer
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnswerInput {
    /// Tag key to value; a `null` value marks a key-only tag
    #[serde(default)]
    pub osm_tags: Option<Map<String, Value>>,
}

impl AnswerInput {
    /// Tags of this input in document order.
    ///
    /// Returns `None` if the input carries no tag mapping. Values other than
    /// strings and `null` are rejected.
    pub fn tags(&self) -> Result<Option<Vec<(&str, Option<&str>)>>> {
        let Some(osm_tags) = self.osm_tags.as_ref() else {
            return Ok(None);
        };

        osm_tags
            .iter()
            .map(|(key, value)| match value {
                Value::String(value) => Ok((key.as_str(), Some(value.as_str()))),
                Value::Null => Ok((key.as_str(), None)),
                other => Err(TagInfoError::Catalog(format!(
                    "Tag '{}' has a non-string value: {}",
                    key, other
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

/// Applicability condition of a question
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub osm_element: Option<ElementSpec>,
}

/// Element-type specifier: a single token or an ordered list of tokens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ElementSpec {
    Single(String),
    Sequence(Vec<String>),
}

impl ElementSpec {
    /// All tokens of the specifier, in declaration order
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            ElementSpec::Single(token) => vec![token.as_str()],
            ElementSpec::Sequence(tokens) => tokens.iter().map(String::as_str).collect(),
        }
    }
}

/// Parse a catalog document (a JSON array of questions).
///
/// `source` names the document in error messages.
pub fn parse_catalog(json: &str, source: &str) -> Result<Vec<Question>> {
    let questions: Vec<Question> = serde_json::from_str(json)
        .map_err(|e| TagInfoError::Catalog(format!("Failed to parse {}: {}", source, e)))?;

    for question in &questions {
        for input in question.answer.input.iter().flatten() {
            input.tags().map_err(|e| {
                TagInfoError::Catalog(format!(
                    "Failed to parse {} at question '{}': {}",
                    source,
                    question.text_ref(),
                    e
                ))
            })?;
        }
    }

    Ok(questions)
}
