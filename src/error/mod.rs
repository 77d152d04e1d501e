//! Error handling module.
//!
//! The completion pipeline itself is infallible: classifiers degrade to
//! `Unknown`, mappers to an empty list and the synthesizer swallows
//! resource failures. The types here cover the edges that can fail:
//! - Configuration loading and validation
//! - The resource collaborator (field names, template variables)
//! - I/O performed by the CLI and REPL
//!
//! # Example
//!
//! ```rust
//! use qlcomplete::error::{QlError, ResourceError, Result};
//!
//! fn lookup() -> Result<Vec<String>> {
//!     Err(ResourceError::Unavailable("timeout".to_string()).into())
//! }
//!
//! assert!(matches!(lookup(), Err(QlError::Resource(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, QlError, ResourceError, Result};
