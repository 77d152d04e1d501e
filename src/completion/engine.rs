//! Completion engine
//!
//! Entry point used by hosts: builds the token chain, classifies the
//! cursor context, maps it to suggestion kinds and synthesizes items.

use std::sync::Arc;

use tracing::debug;

use super::item::CompletionItem;
use super::resources::{ResourceCache, ResourceProvider};
use super::synthesizer::{CompletionSettings, CompletionSynthesizer};
use crate::dialect::{Classification, Dialect};
use crate::language::{Position, TokenChain};

/// Orchestrates Builder → Classifier → Mapper → Synthesizer
pub struct CompletionEngine {
    synthesizer: CompletionSynthesizer,
}

impl CompletionEngine {
    /// Create a new engine with its own resource cache
    pub fn new(provider: Arc<dyn ResourceProvider>, settings: CompletionSettings) -> Self {
        Self::with_cache(Arc::new(ResourceCache::new(provider)), settings)
    }

    /// Create a new engine sharing an existing cache
    pub fn with_cache(cache: Arc<ResourceCache>, settings: CompletionSettings) -> Self {
        Self {
            synthesizer: CompletionSynthesizer::new(cache, settings),
        }
    }

    pub fn settings(&self) -> &CompletionSettings {
        self.synthesizer.settings()
    }

    /// Tokenize `text` with the dialect's bundled tokenizer
    pub fn tokenize(&self, dialect: Dialect, text: &str, cursor: Position) -> TokenChain {
        TokenChain::build(text, dialect.tokenizer(), dialect.token_types(), cursor)
    }

    /// Classify the cursor context without producing items
    pub fn classify(&self, dialect: Dialect, text: &str, cursor: Position) -> Classification {
        let chain = self.tokenize(dialect, text, cursor);
        Classification::of(dialect, chain.current())
    }

    /// Completion items for the cursor position in `text`
    pub async fn complete(
        &self,
        dialect: Dialect,
        text: &str,
        cursor: Position,
    ) -> Vec<CompletionItem> {
        let chain = self.tokenize(dialect, text, cursor);
        let current = chain.current();
        let classification = Classification::of(dialect, current);

        debug!(
            dialect = %dialect,
            line = cursor.line,
            column = cursor.column,
            position = %classification.position,
            "Classified cursor context"
        );

        self.synthesizer
            .synthesize(&classification.kinds, current, cursor)
            .await
    }
}
