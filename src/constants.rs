// Constants loaded from the environment, plus the fixed texts the service emits.

use std::env;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

// Raw environment values, `None` when unset. Read once; `dotenvy` must run before first access.
lazy_static::lazy_static! {
    pub static ref HOST: Option<String> = env::var("HOST").ok();
    pub static ref PORT: Option<String> = env::var("PORT").ok();
    pub static ref PROMPT_SCHEMA: Option<String> = env::var("PROMPT_SCHEMA").ok();
}

pub const SERVICE_NAME: &str = "PromptSmith";

pub const EMPTY_IDEA_MESSAGE: &str = "Please provide an idea.";
pub const UNKNOWN_MODE_MESSAGE: &str = "Invalid mode. Use 'start' or 'complete'.";
pub const LEGACY_EMPTY_IDEA_MESSAGE: &str = "Please provide an idea to generate a prompt.";

pub const PREAMBLE_TEMPLATE: &str = "You are an expert prompt engineer. \
Turn the idea below into a clear, specific and ready-to-use prompt for a large language model.
Use every detail provided and do not invent requirements that were not given.

Core idea: {{ idea }}";

pub const CLOSING_INSTRUCTION: &str = "Write the final prompt as direct instructions to the model, \
organised into short sections, and return only the prompt itself with no extra commentary.";

pub const LEGACY_TEMPLATE: &str = "Write a detailed, high-quality prompt that helps someone explore \
the following idea in depth: '{{ idea }}'. Make the prompt clear, specific, and actionable.";
