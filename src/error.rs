use std::io;
use thiserror::Error;

/// Core error type for ecoprompt.
#[derive(Error, Debug)]
pub enum EcoPromptError {
    #[error("config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("serialization error: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("history error: {message}")]
    History { message: String },

    #[error("network error: {message}")]
    Network { message: String },
}

impl EcoPromptError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    pub fn history(message: impl Into<String>) -> Self {
        Self::History {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Returns true if this error is caused by user input (vs internal/system).
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true if retrying the operation might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Network { .. })
    }
}

pub type Result<T> = std::result::Result<T, EcoPromptError>;
