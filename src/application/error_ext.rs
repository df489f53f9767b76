//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read(&path)
    ///     .with_path_context("read upload", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Mark a failed prompt; end of input stays recognizable.
    fn with_prompt_context(self, what: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn with_prompt_context(self, what: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::input(what, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_eof_when_adding_prompt_context_then_end_of_input_detected() {
        let result: io::Result<String> = Err(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        let err = result.with_prompt_context("title").unwrap_err();
        assert!(err.is_end_of_input());
        assert_eq!(err.to_string(), "no answer for title");
    }

    #[test]
    fn given_ctrl_c_when_adding_prompt_context_then_interrupt_detected() {
        let result: io::Result<String> =
            Err(io::Error::new(io::ErrorKind::Interrupted, "keyboard interrupt"));
        let err = result.with_prompt_context("password").unwrap_err();
        assert!(err.is_interrupted());
        assert!(!err.is_end_of_input());
    }

    #[test]
    fn given_io_error_when_adding_path_context_then_message_names_path() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result
            .with_path_context("read upload", Path::new("/tmp/a.jpg"))
            .unwrap_err();
        assert_eq!(err.to_string(), "operation failed: read upload: /tmp/a.jpg");
    }
}
