//! Completion items returned to the host editor

use serde::{Serialize, Serializer};

use crate::language::TokenRange;

/// Ordering bucket of an item; hosts sort by [`SortPriority::sort_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortPriority {
    High,
    MediumHigh,
    Medium,
    MediumLow,
    Low,
}

impl SortPriority {
    /// Sort key understood by the host editor
    pub fn sort_text(&self) -> &'static str {
        match self {
            SortPriority::High => "a",
            SortPriority::MediumHigh => "b",
            SortPriority::Medium => "c",
            SortPriority::MediumLow => "d",
            SortPriority::Low => "e",
        }
    }
}

impl Serialize for SortPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.sort_text())
    }
}

/// Icon category of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Keyword,
    Function,
    Field,
    Operator,
    Value,
    Variable,
}

/// One completion proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// Text shown in the suggestion list
    pub label: String,
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Literal text, or a snippet with `$0` style placeholders
    pub insert_text: String,
    pub insert_as_snippet: bool,
    /// Source span the item overwrites when accepted
    pub replace_range: TokenRange,
    #[serde(rename = "sortText")]
    pub sort_priority: SortPriority,
    /// Accepting the item should reopen the suggestion list
    pub triggers_follow_up: bool,
}

impl CompletionItem {
    /// Plain item inserting its own label
    pub fn new(label: impl Into<String>, kind: ItemKind, replace_range: TokenRange) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: None,
            insert_as_snippet: false,
            replace_range,
            sort_priority: SortPriority::Medium,
            triggers_follow_up: false,
        }
    }

    /// Insert a snippet instead of the label
    pub fn snippet(mut self, insert_text: impl Into<String>) -> Self {
        self.insert_text = insert_text.into();
        self.insert_as_snippet = true;
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn priority(mut self, priority: SortPriority) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Reopen suggestions once accepted
    pub fn follow_up(mut self) -> Self {
        self.triggers_follow_up = true;
        self
    }
}
