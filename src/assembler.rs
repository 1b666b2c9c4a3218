//! Prompt assembly: the `start` / `complete` request handler.
//!
//! Every call is self-contained. The caller carries the idea and any answers
//! between `start` and `complete`; nothing is kept here between requests.

use std::str::FromStr;

use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::constants::{CLOSING_INSTRUCTION, LEGACY_EMPTY_IDEA_MESSAGE, LEGACY_TEMPLATE, PREAMBLE_TEMPLATE};
use crate::error::{AssemblyError, RequestError};
use crate::questions::{QuestionList, QuestionSchema};

const PREAMBLE: &str = "preamble.txt";
const LEGACY: &str = "legacy.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Start,
    Complete,
}

impl FromStr for Mode {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Mode::Start),
            "complete" => Ok(Mode::Complete),
            _ => Err(RequestError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Incoming request body. Every field is optional on the wire so a missing
/// idea becomes an `error` response instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub idea: Option<String>,
    #[serde(default)]
    pub answers: Option<Map<String, Value>>,
}

impl PromptRequest {
    pub fn start(idea: impl Into<String>) -> Self {
        Self {
            mode: Some("start".to_string()),
            idea: Some(idea.into()),
            answers: None,
        }
    }

    pub fn complete(idea: impl Into<String>, answers: Map<String, Value>) -> Self {
        Self {
            mode: Some("complete".to_string()),
            idea: Some(idea.into()),
            answers: Some(answers),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromptResponse {
    NeedMoreInfo { idea: String, questions: QuestionList },
    Done { prompt: String },
    Error { message: String },
}

impl From<RequestError> for PromptResponse {
    fn from(e: RequestError) -> Self {
        PromptResponse::Error {
            message: e.to_string(),
        }
    }
}

/// Builds question lists and rendered prompts for one question schema.
#[derive(Debug)]
pub struct PromptAssembler {
    schema: QuestionSchema,
    templates: Environment<'static>,
}

impl PromptAssembler {
    pub fn new(schema: QuestionSchema) -> Result<Self, AssemblyError> {
        let mut templates = Environment::new();
        templates.add_template(PREAMBLE, PREAMBLE_TEMPLATE)?;
        templates.add_template(LEGACY, LEGACY_TEMPLATE)?;
        Ok(Self { schema, templates })
    }

    pub fn schema(&self) -> QuestionSchema {
        self.schema
    }

    /// Handle one request. Caller mistakes come back as `PromptResponse::Error`;
    /// only template failures surface as `Err`.
    #[instrument(skip(self, request), fields(schema = %self.schema))]
    pub fn handle(&self, request: &PromptRequest) -> Result<PromptResponse, AssemblyError> {
        let idea = request.idea.as_deref().unwrap_or_default().trim();
        if idea.is_empty() {
            debug!("Rejecting request with empty idea");
            return Ok(RequestError::EmptyIdea.into());
        }

        let mode = match request.mode.as_deref().map(str::trim) {
            None | Some("") => Mode::Start,
            Some(raw) => match raw.parse::<Mode>() {
                Ok(mode) => mode,
                Err(e) => {
                    debug!(mode = raw, "Rejecting request with unknown mode");
                    return Ok(e.into());
                }
            },
        };

        match mode {
            Mode::Start => Ok(PromptResponse::NeedMoreInfo {
                idea: idea.to_string(),
                questions: self.schema.questions().clone(),
            }),
            Mode::Complete => {
                let empty = Map::new();
                let answers = request.answers.as_ref().unwrap_or(&empty);
                let prompt = self.render_prompt(idea, answers)?;
                Ok(PromptResponse::Done { prompt })
            }
        }
    }

    /// Preamble, one bullet per non-empty recognised answer in schema order,
    /// then the closing instruction, joined with newlines.
    pub fn render_prompt(&self, idea: &str, answers: &Map<String, Value>) -> Result<String, AssemblyError> {
        let preamble = self
            .templates
            .get_template(PREAMBLE)?
            .render(context! { idea => idea })?;

        let mut lines = vec![preamble];
        for field in self.schema.fields() {
            let value = answer_text(answers.get(field.key));
            if !value.is_empty() {
                lines.push(format!("- {}: {}", field.bullet, value));
            }
        }
        lines.push(CLOSING_INSTRUCTION.to_string());

        debug!(bullets = lines.len() - 2, "Rendered prompt");
        Ok(lines.join("\n"))
    }

    /// One-shot prompt from the first version of the service: no questions,
    /// no answers, a blank idea yields a fixed hint instead of a prompt.
    pub fn generate_legacy(&self, idea: &str) -> Result<String, AssemblyError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Ok(LEGACY_EMPTY_IDEA_MESSAGE.to_string());
        }
        let prompt = self
            .templates
            .get_template(LEGACY)?
            .render(context! { idea => idea })?;
        Ok(prompt)
    }
}

/// Trimmed text of an answer value. Booleans and numbers use their JSON text;
/// null, arrays and objects count as unanswered.
fn answer_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
