//! Clarifying questions and the answer fields they map to.
//!
//! Two schemas exist. `Classic` asks plain-string questions over a short key
//! set; `Extended` asks `{key, label}` questions over the larger key set used
//! by the form-based clients. A process serves exactly one of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One recognised answer key, the question that asks for it and the label its
/// bullet line carries in the rendered prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerField {
    pub key: &'static str,
    pub question: &'static str,
    pub bullet: &'static str,
}

const fn field(key: &'static str, question: &'static str, bullet: &'static str) -> AnswerField {
    AnswerField {
        key,
        question,
        bullet,
    }
}

// Row order is the bullet order in the rendered prompt.
const CLASSIC_FIELDS: &[AnswerField] = &[
    field("audience", "Who is the target audience?", "Target audience"),
    field("outcome", "What outcome do you want from the result?", "Desired outcome"),
    field("format", "What format should the output take?", "Output format"),
    field("tone", "What tone or voice should it use?", "Tone/voice"),
    field("must_include", "Is there anything it must include?", "Must include"),
    field("must_avoid", "Is there anything it must avoid?", "Must avoid"),
    field("length", "How long should the output be?", "Length"),
];

const EXTENDED_FIELDS: &[AnswerField] = &[
    field("goal", "Goal", "Goal"),
    field("audience", "Target audience", "Target audience"),
    field("industry", "Industry or niche", "Industry/niche"),
    field("experience_level", "Audience experience level", "Audience experience level"),
    field("output_format", "Output format", "Output format"),
    field("output_length", "Output length", "Output length"),
    field("tone_style", "Tone and style", "Tone/style"),
    field("content_to_avoid", "Content to avoid", "Content to avoid"),
    field("accuracy_level", "Accuracy level", "Accuracy level"),
    field("seo_keywords", "SEO keywords", "SEO keywords"),
    field("citations_required", "Citations required?", "Citations required"),
    field("target_platforms", "Target platforms", "Target platforms"),
];

/// A structured question: `key` names the answer field it fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub key: String,
    pub label: String,
}

/// Ordered questions returned by `start`. Serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionList {
    Plain(Vec<String>),
    Keyed(Vec<Question>),
}

impl QuestionList {
    pub fn len(&self) -> usize {
        match self {
            QuestionList::Plain(questions) => questions.len(),
            QuestionList::Keyed(questions) => questions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

lazy_static::lazy_static! {
    static ref CLASSIC_QUESTIONS: QuestionList = QuestionList::Plain(
        CLASSIC_FIELDS.iter().map(|f| f.question.to_string()).collect()
    );
    static ref EXTENDED_QUESTIONS: QuestionList = QuestionList::Keyed(
        EXTENDED_FIELDS
            .iter()
            .map(|f| Question {
                key: f.key.to_string(),
                label: f.question.to_string(),
            })
            .collect()
    );
}

/// Which question/answer vocabulary the service speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSchema {
    /// Plain-string questions; keys audience, outcome, format, tone, must_include, must_avoid, length.
    #[default]
    Classic,
    /// `{key, label}` questions over the twelve form-field keys.
    Extended,
}

impl QuestionSchema {
    /// Recognised answer fields in bullet order.
    pub fn fields(self) -> &'static [AnswerField] {
        match self {
            QuestionSchema::Classic => CLASSIC_FIELDS,
            QuestionSchema::Extended => EXTENDED_FIELDS,
        }
    }

    pub fn questions(self) -> &'static QuestionList {
        match self {
            QuestionSchema::Classic => &CLASSIC_QUESTIONS,
            QuestionSchema::Extended => &EXTENDED_QUESTIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionSchema::Classic => "classic",
            QuestionSchema::Extended => "extended",
        }
    }
}

impl fmt::Display for QuestionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionSchema {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(QuestionSchema::Classic),
            "extended" => Ok(QuestionSchema::Extended),
            _ => Err(ConfigError::UnknownSchema(s.to_string())),
        }
    }
}
