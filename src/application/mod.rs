//! Application layer: option resolution, dispatch and the interactive shell
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod dispatcher;
pub mod error;
pub mod error_ext;
pub mod help;
pub mod resolver;
pub mod services;
pub mod shell;

pub use dispatcher::{CommandDispatcher, DispatchOutcome, DispatcherDeps};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use resolver::OptionResolver;
pub use shell::{InteractiveShell, ShellExit};
