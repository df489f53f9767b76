//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Shell { .. } => crate::exitcode::SOFTWARE,
                InfraError::Application(app) => match app {
                    ApplicationError::UnknownService(_) => crate::exitcode::USAGE,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                    ApplicationError::Input { .. } => crate::exitcode::NOINPUT,
                    ApplicationError::Remote(_) => crate::exitcode::UNAVAILABLE,
                    ApplicationError::Store { .. } => crate::exitcode::CANTCREAT,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::remote::RemoteError;

    #[test]
    fn given_unknown_service_when_mapping_then_usage_exit_code() {
        let err = CliError::from(ApplicationError::UnknownService("flickr".into()));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
        assert_eq!(err.to_string(), "unknown service: flickr");
    }

    #[test]
    fn given_remote_error_when_mapping_then_unavailable_exit_code() {
        let err = CliError::from(ApplicationError::Remote(RemoteError::Unavailable("x".into())));
        assert_eq!(err.exit_code(), crate::exitcode::UNAVAILABLE);
    }
}
