//! Query Completion Library
//!
//! Context-aware completion for small query languages: a log-search
//! pipeline language, a SQL dialect, a piped processing language (PPL) and
//! single-statement metric math. Given a document and a cursor, the engine
//! classifies where the cursor sits in the statement and proposes the
//! keywords, functions, operators, field names and template variables that
//! fit there.
//!
//! # Modules
//!
//! - `language`: Tokens, the grammar tokenizer and the linked token chain
//! - `dialect`: Per-language classifiers, suggestion mappers and item builders
//! - `completion`: Engine, synthesizer, items and the resource cache
//! - `config`: Configuration management
//! - `cli`: Command-line interface and argument parsing
//! - `repl`: Interactive completion shell
//! - `error`: Error types and handling
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use qlcomplete::{CompletionEngine, Config, Dialect};
//! use qlcomplete::language::Position;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_from_file(None)?;
//!     let engine = CompletionEngine::new(
//!         Arc::new(config.resource_provider()),
//!         config.completion_settings(),
//!     );
//!
//!     let text = "fields @message | stats ";
//!     for item in engine.complete(Dialect::Logs, text, Position::end_of(text)).await {
//!         println!("{}", item.label);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod dialect;
pub mod error;
pub mod language;
pub mod repl;

// Re-export commonly used types
pub use completion::{CompletionEngine, CompletionItem, ResourceProvider};
pub use config::Config;
pub use dialect::{Classification, Dialect};
pub use error::{QlError, Result};
pub use repl::{ReplContext, ReplEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
