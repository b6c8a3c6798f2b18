//! Document parse errors

use thiserror::Error;

/// Errors raised while parsing a structured property value
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot render nested YAML value: {0}")]
    Render(#[from] serde_json::Error),

    #[error("YAML document must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("Invalid properties escape at line {line}: {message}")]
    Escape { line: usize, message: String },
}

impl ParseError {
    pub(crate) fn escape(line: usize, message: impl Into<String>) -> Self {
        Self::Escape {
            line,
            message: message.into(),
        }
    }
}
