//! Completion pipeline
//!
//! # Architecture
//!
//! - **Engine**: entry point; builds the chain and drives the pipeline
//! - **Synthesizer**: turns suggestion kinds into items and appends
//!   template variables
//! - **Resources**: the backend collaborator and the memoizing cache
//! - **Item**: the payload handed back to the host editor
//!
//! # Examples
//!
//! ```no_run
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use qlcomplete::completion::{CompletionEngine, CompletionSettings, StaticResourceProvider};
//! use qlcomplete::dialect::Dialect;
//! use qlcomplete::language::Position;
//!
//! # async fn run() {
//! let provider = Arc::new(StaticResourceProvider::new(HashMap::new(), Vec::new()));
//! let engine = CompletionEngine::new(provider, CompletionSettings::default());
//!
//! let items = engine.complete(Dialect::Sql, "SELECT ", Position::new(1, 8)).await;
//! # }
//! ```

mod engine;
mod item;
pub mod resources;
mod synthesizer;

pub use engine::CompletionEngine;
pub use item::{CompletionItem, ItemKind, SortPriority};
pub use resources::{ResourceCache, ResourceProvider, ResourceScope, StaticResourceProvider};
pub use synthesizer::{CompletionSettings, CompletionSynthesizer, ItemCollector, replace_range};
