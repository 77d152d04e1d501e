//! Query dialects served by the completion engine
//!
//! Each dialect module provides the same pieces:
//! - a token type table and a rule tokenizer (`mod.rs`)
//! - static keyword, function and operator tables (`keywords`)
//! - the statement position classifier and suggestion kind mapper (`position`)
//! - the item builders that turn suggestion kinds into completion items (`items`)
//!
//! Dispatch is a single `match` on [`Dialect`]; the wrapper enums
//! [`PositionTag`] and [`KindTag`] let dialect-independent code carry a
//! classification around without knowing which dialect produced it.

pub mod landmarks;
pub mod logs;
pub mod metric_math;
pub mod ppl;
pub mod sql;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::completion::{CompletionSettings, ItemCollector};
use crate::error::QlError;
use crate::language::{LinkedToken, RuleTokenizer, TokenTypes};

/// A query language the engine can complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Log-search pipeline language
    #[default]
    Logs,
    /// SQL-like query language
    Sql,
    /// Analytics pipeline language
    Ppl,
    /// Single-statement metric math
    MetricMath,
}

impl Dialect {
    /// Every dialect, in display order
    pub const ALL: [Dialect; 4] = [
        Dialect::Logs,
        Dialect::Sql,
        Dialect::Ppl,
        Dialect::MetricMath,
    ];

    /// Name used on the command line and in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Logs => "logs",
            Dialect::Sql => "sql",
            Dialect::Ppl => "ppl",
            Dialect::MetricMath => "metric-math",
        }
    }

    /// Token type table of the dialect's tokenizer
    pub fn token_types(&self) -> &'static TokenTypes {
        match self {
            Dialect::Logs => &logs::TOKEN_TYPES,
            Dialect::Sql => &sql::TOKEN_TYPES,
            Dialect::Ppl => &ppl::TOKEN_TYPES,
            Dialect::MetricMath => &metric_math::TOKEN_TYPES,
        }
    }

    /// Bundled tokenizer for the dialect
    pub fn tokenizer(&self) -> &'static RuleTokenizer {
        match self {
            Dialect::Logs => &logs::TOKENIZER,
            Dialect::Sql => &sql::TOKENIZER,
            Dialect::Ppl => &ppl::TOKENIZER,
            Dialect::MetricMath => &metric_math::TOKENIZER,
        }
    }

    /// Characters that make a host editor request completions
    pub fn trigger_characters(&self) -> &'static [char] {
        match self {
            Dialect::Logs | Dialect::Ppl => &[' ', '$', ',', '(', '\'', '"', '`', '|'],
            Dialect::Sql => &[' ', '$', ',', '(', '\'', '"', '`'],
            Dialect::MetricMath => &[' ', '$', ',', '(', '\'', '"', '='],
        }
    }

    /// Classify the cursor context
    pub fn classify(&self, current: Option<LinkedToken<'_>>) -> PositionTag {
        match self {
            Dialect::Logs => PositionTag::Logs(logs::position::classify(current)),
            Dialect::Sql => PositionTag::Sql(sql::position::classify(current)),
            Dialect::Ppl => PositionTag::Ppl(ppl::position::classify(current)),
            Dialect::MetricMath => {
                PositionTag::MetricMath(metric_math::position::classify(current))
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = QlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logs" => Ok(Dialect::Logs),
            "sql" => Ok(Dialect::Sql),
            "ppl" => Ok(Dialect::Ppl),
            "metric-math" | "metricmath" | "metric_math" => Ok(Dialect::MetricMath),
            _ => Err(QlError::UnknownDialect(s.to_string())),
        }
    }
}

/// Statement position of any dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PositionTag {
    Logs(logs::StatementPosition),
    Sql(sql::StatementPosition),
    Ppl(ppl::StatementPosition),
    MetricMath(metric_math::StatementPosition),
}

impl PositionTag {
    /// Map the position to its ordered suggestion kinds
    pub fn suggestion_kinds(&self) -> Vec<KindTag> {
        match self {
            PositionTag::Logs(p) => logs::position::suggestion_kinds(*p)
                .into_iter()
                .map(KindTag::Logs)
                .collect(),
            PositionTag::Sql(p) => sql::position::suggestion_kinds(*p)
                .into_iter()
                .map(KindTag::Sql)
                .collect(),
            PositionTag::Ppl(p) => ppl::position::suggestion_kinds(*p)
                .into_iter()
                .map(KindTag::Ppl)
                .collect(),
            PositionTag::MetricMath(p) => metric_math::position::suggestion_kinds(*p)
                .into_iter()
                .map(KindTag::MetricMath)
                .collect(),
        }
    }

    /// Check whether the classifier recognized nothing
    pub fn is_unknown(&self) -> bool {
        matches!(
            self,
            PositionTag::Logs(logs::StatementPosition::Unknown)
                | PositionTag::Sql(sql::StatementPosition::Unknown)
                | PositionTag::Ppl(ppl::StatementPosition::Unknown)
                | PositionTag::MetricMath(metric_math::StatementPosition::Unknown)
        )
    }
}

impl fmt::Display for PositionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionTag::Logs(p) => write!(f, "{p:?}"),
            PositionTag::Sql(p) => write!(f, "{p:?}"),
            PositionTag::Ppl(p) => write!(f, "{p:?}"),
            PositionTag::MetricMath(p) => write!(f, "{p:?}"),
        }
    }
}

/// Suggestion kind of any dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KindTag {
    Logs(logs::SuggestionKind),
    Sql(sql::SuggestionKind),
    Ppl(ppl::SuggestionKind),
    MetricMath(metric_math::SuggestionKind),
}

impl KindTag {
    /// Dialect that produced this kind
    pub fn dialect(&self) -> Dialect {
        match self {
            KindTag::Logs(_) => Dialect::Logs,
            KindTag::Sql(_) => Dialect::Sql,
            KindTag::Ppl(_) => Dialect::Ppl,
            KindTag::MetricMath(_) => Dialect::MetricMath,
        }
    }

    /// Check whether the kind is served by resource-backed field names
    pub fn needs_fields(&self) -> bool {
        matches!(
            self,
            KindTag::Logs(logs::SuggestionKind::Field)
                | KindTag::Sql(sql::SuggestionKind::Field)
                | KindTag::Ppl(ppl::SuggestionKind::Field)
        )
    }

    /// Append the static items of this kind
    pub fn append_items(&self, collector: &mut ItemCollector, settings: &CompletionSettings) {
        match self {
            KindTag::Logs(kind) => logs::items::append(*kind, collector),
            KindTag::Sql(kind) => sql::items::append(*kind, collector, settings),
            KindTag::Ppl(kind) => ppl::items::append(*kind, collector),
            KindTag::MetricMath(kind) => metric_math::items::append(*kind, collector),
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindTag::Logs(k) => write!(f, "{k:?}"),
            KindTag::Sql(k) => write!(f, "{k:?}"),
            KindTag::Ppl(k) => write!(f, "{k:?}"),
            KindTag::MetricMath(k) => write!(f, "{k:?}"),
        }
    }
}

/// Result of classifying one cursor context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub dialect: Dialect,
    pub position: PositionTag,
    pub kinds: Vec<KindTag>,
}

impl Classification {
    /// Classify `current` and map the position to suggestion kinds
    pub fn of(dialect: Dialect, current: Option<LinkedToken<'_>>) -> Self {
        let position = dialect.classify(current);
        let kinds = position.suggestion_kinds();
        Self {
            dialect,
            position,
            kinds,
        }
    }
}
