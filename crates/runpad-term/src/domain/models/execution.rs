use serde::Deserialize;
use strum_macros::Display;

use super::LanguageDescriptor;
use super::Message;

#[derive(Debug, Default, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ExecutorName {
    #[default]
    Piston,
}

/// One run of the current editor contents. `generation` identifies the request so a
/// superseded run can be recognised when its response arrives.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub generation: u64,
    pub language: &'static LanguageDescriptor,
    pub source: String,
    pub stdin: String,
}

impl ExecutionRequest {
    pub fn new(language: &'static LanguageDescriptor, source: &str, stdin: &str) -> Self {
        Self {
            generation: 0,
            language,
            source: source.to_string(),
            stdin: stdin.to_string(),
        }
    }
}

/// What the execution service reported for a successful request. Only `output` is
/// displayed; the rest feeds logging and the output panel title.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub output: String,
    pub exit_code: Option<i64>,
    pub signal: Option<String>,
    pub compile_output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExecutionResponse {
    pub generation: u64,
    pub message: Message,
    pub exit_code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Runtime {
    pub language: String,
    pub version: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}
