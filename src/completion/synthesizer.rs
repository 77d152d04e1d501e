//! Completion synthesizer
//!
//! Turns an ordered list of suggestion kinds into completion items. Static
//! kinds are expanded by each dialect's item builders; field kinds go
//! through the [`ResourceCache`]. Template variables are always appended
//! last, whatever the kinds were.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::item::{CompletionItem, ItemKind, SortPriority};
use super::resources::{ResourceCache, ResourceScope};
use crate::dialect::{Dialect, KindTag};
use crate::language::{LinkedToken, Position, TokenRange};

/// Request-independent inputs of the synthesizer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSettings {
    pub scope: ResourceScope,
    /// Field groups (log groups) the query runs against
    pub field_groups: Vec<String>,
}

/// Span an accepted item overwrites.
///
/// Whitespace and parentheses are never overwritten; a partially typed
/// word is.
pub fn replace_range(current: Option<LinkedToken<'_>>, cursor: Position) -> TokenRange {
    match current {
        Some(token) if !token.is_whitespace() && !token.is_parenthesis() => token.range(),
        _ => TokenRange::empty_at(cursor),
    }
}

/// Accumulates items of one response, dropping repeated labels
#[derive(Debug)]
pub struct ItemCollector {
    items: Vec<CompletionItem>,
    labels: HashSet<String>,
    range: TokenRange,
}

impl ItemCollector {
    /// Create an empty collector for items replacing `range`
    pub fn new(range: TokenRange) -> Self {
        Self {
            items: Vec::new(),
            labels: HashSet::new(),
            range,
        }
    }

    pub fn range(&self) -> TokenRange {
        self.range
    }

    /// Add an item unless its label is already present
    pub fn push(&mut self, item: CompletionItem) {
        if self.labels.insert(item.label.clone()) {
            self.items.push(item);
        }
    }

    /// Start an item that replaces this collector's range
    pub fn item(&self, label: impl Into<String>, kind: ItemKind) -> CompletionItem {
        CompletionItem::new(label, kind, self.range)
    }

    /// Keywords inserted as typed
    pub fn keywords(&mut self, words: &[&str], priority: SortPriority) {
        for word in words {
            let item = self.item(*word, ItemKind::Keyword).priority(priority);
            self.push(item);
        }
    }

    /// Keywords that always take an argument: insert `WORD $0` and reopen
    pub fn keyword_snippets(&mut self, words: &[&str], priority: SortPriority) {
        for word in words {
            let item = self
                .item(*word, ItemKind::Keyword)
                .snippet(format!("{word} $0"))
                .priority(priority)
                .follow_up();
            self.push(item);
        }
    }

    /// Functions as `NAME($0)` snippets
    pub fn functions(&mut self, functions: &[(&str, &str)], priority: SortPriority) {
        for (name, detail) in functions {
            let item = self
                .item(*name, ItemKind::Function)
                .snippet(format!("{name}($0)"))
                .detail(*detail)
                .priority(priority)
                .follow_up();
            self.push(item);
        }
    }

    /// Operators; an operand always follows
    pub fn operators(&mut self, operators: &[&str], priority: SortPriority) {
        for operator in operators {
            let item = self
                .item(*operator, ItemKind::Operator)
                .priority(priority)
                .follow_up();
            self.push(item);
        }
    }

    /// Resource-backed field names
    pub fn fields<'s>(&mut self, names: impl IntoIterator<Item = &'s String>) {
        for name in names {
            let item = self
                .item(name.as_str(), ItemKind::Field)
                .priority(SortPriority::MediumHigh);
            self.push(item);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish the response
    pub fn into_items(self) -> Vec<CompletionItem> {
        self.items
    }
}

/// Shared base of every dialect's completion provider
pub struct CompletionSynthesizer {
    cache: Arc<ResourceCache>,
    settings: CompletionSettings,
}

impl CompletionSynthesizer {
    /// Create a new synthesizer
    pub fn new(cache: Arc<ResourceCache>, settings: CompletionSettings) -> Self {
        Self { cache, settings }
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    /// Build the items for `kinds`, in order, followed by template variables
    pub async fn synthesize(
        &self,
        kinds: &[KindTag],
        current: Option<LinkedToken<'_>>,
        cursor: Position,
    ) -> Vec<CompletionItem> {
        let mut collector = ItemCollector::new(replace_range(current, cursor));

        for kind in kinds {
            if kind.needs_fields() {
                self.append_fields(kind.dialect(), &mut collector).await;
            } else {
                kind.append_items(&mut collector, &self.settings);
            }
        }

        self.append_template_variables(&mut collector).await;

        debug!(kinds = kinds.len(), items = collector.len(), "Synthesized completions");
        collector.into_items()
    }

    async fn append_fields(&self, dialect: Dialect, collector: &mut ItemCollector) {
        match self
            .cache
            .field_names(dialect, &self.settings.scope, &self.settings.field_groups)
            .await
        {
            Ok(names) => collector.fields(names.iter()),
            Err(e) => warn!(dialect = %dialect, "Omitting field suggestions: {}", e),
        }
    }

    async fn append_template_variables(&self, collector: &mut ItemCollector) {
        let variables = match self.cache.template_variables().await {
            Ok(variables) => variables,
            Err(e) => {
                warn!("Omitting template variables: {}", e);
                return;
            }
        };

        for name in variables {
            let label = if name.starts_with('$') {
                name
            } else {
                format!("${name}")
            };
            let item = collector
                .item(label, ItemKind::Variable)
                .priority(SortPriority::Low);
            collector.push(item);
        }
    }
}
