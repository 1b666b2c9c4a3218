//! Server configuration.
//!
//! Values come from command-line flags first, then the environment, then the
//! defaults in `constants`. An environment value is only parsed when no flag
//! replaces it.

use crate::constants::{self, DEFAULT_HOST, DEFAULT_PORT};
use crate::error::ConfigError;
use crate::questions::QuestionSchema;

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub schema: Option<QuestionSchema>,
}

/// Raw environment values, `None` when unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvValues<'a> {
    pub host: Option<&'a str>,
    pub port: Option<&'a str>,
    pub schema: Option<&'a str>,
}

impl EnvValues<'static> {
    /// `HOST`, `PORT` and `PROMPT_SCHEMA` as captured in `constants`.
    pub fn current() -> Self {
        Self {
            host: constants::HOST.as_deref(),
            port: constants::PORT.as_deref(),
            schema: constants::PROMPT_SCHEMA.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or IP literal to bind to. Names are resolved at bind time.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Question schema served by this process.
    pub schema: QuestionSchema,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            schema: QuestionSchema::default(),
        }
    }
}

impl ServerConfig {
    /// Merge flags over environment values over defaults.
    pub fn resolve(overrides: Overrides, env: EnvValues<'_>) -> Result<Self, ConfigError> {
        let host = match overrides.host {
            Some(host) => parse_host(&host)?,
            None => env.host.map(parse_host).transpose()?.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        };
        let port = match overrides.port {
            Some(port) => port,
            None => env.port.map(parse_port).transpose()?.unwrap_or(DEFAULT_PORT),
        };
        let schema = resolve_schema(overrides.schema, env.schema)?;

        Ok(Self { host, port, schema })
    }

    /// Merge flags over the process environment.
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, EnvValues::current())
    }

    /// `host:port` for logs; IPv6 literals are bracketed.
    pub fn bind_display(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_schema(mut self, schema: QuestionSchema) -> Self {
        self.schema = schema;
        self
    }
}

/// The flag if given, else the environment value, else the default schema.
pub fn resolve_schema(flag: Option<QuestionSchema>, env: Option<&str>) -> Result<QuestionSchema, ConfigError> {
    match flag {
        Some(schema) => Ok(schema),
        None => Ok(env.map(str::parse::<QuestionSchema>).transpose()?.unwrap_or_default()),
    }
}

/// Schema for commands that never bind a socket; only `PROMPT_SCHEMA` is read.
pub fn schema_from_env(flag: Option<QuestionSchema>) -> Result<QuestionSchema, ConfigError> {
    resolve_schema(flag, constants::PROMPT_SCHEMA.as_deref())
}

fn parse_host(raw: &str) -> Result<String, ConfigError> {
    let host = raw.trim().trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidAddress(raw.to_string()));
    }
    Ok(host.to_string())
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}
