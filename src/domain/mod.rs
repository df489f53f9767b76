//! Domain layer: entities and pure logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod dates;
pub mod entities;
pub mod error;
pub mod matching;
pub mod options;
pub mod requirements;
pub mod tags;
pub mod text;

pub use dates::DateRange;
pub use entities::*;
pub use error::DomainError;
pub use matching::TitleMatcher;
pub use options::{OptionField, Options};
pub use requirements::{Requirement, Requirements};
pub use tags::TagEdit;
pub use text::{
    build_titles_list, extension_of, safe_decode, safe_encode, EncodeErrors, TerminalEncoding,
};
