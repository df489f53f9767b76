//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::remote::RemoteError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("config error: {message}")]
    Config { message: String },

    /// Reading an answer from the user failed (including end of input).
    #[error("no answer for {context}")]
    Input {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("cannot update {context}")]
    Store {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    pub fn input(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Input {
            context: context.into(),
            source,
        }
    }

    pub fn store(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// The user closed standard input while being asked something.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::Input { source, .. } if source.kind() == std::io::ErrorKind::UnexpectedEof)
    }

    /// A prompt was cut short by Ctrl-C.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Input { source, .. } if source.kind() == std::io::ErrorKind::Interrupted)
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
