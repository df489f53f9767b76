//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements the I/O boundary traits (terminal, files, remote
//! backend) and wires up the dispatcher.

pub mod client;
pub mod credentials;
pub mod di;
pub mod error;
pub mod paths;
pub mod remote;
pub mod token_store;
pub mod traits;

pub use error::{InfraError, InfraResult};
