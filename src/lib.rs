pub mod assembler;
pub mod config;
pub mod constants;
pub mod error;
pub mod questions;
pub mod web_server;

pub use assembler::{Mode, PromptAssembler, PromptRequest, PromptResponse};
pub use config::{Overrides, ServerConfig};
pub use error::{AssemblyError, ConfigError, RequestError, ServerError};
pub use questions::{Question, QuestionList, QuestionSchema};
