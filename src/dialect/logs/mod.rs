//! Log-search pipeline dialect
//!
//! A query is a chain of commands separated by `|`, each with its own
//! small argument grammar:
//!
//! ```text
//! fields @timestamp, @message | filter level = "ERROR" | stats count(*) by bin(5m)
//! ```
//!
//! Commands and keywords are case-insensitive and compared lower-cased.

pub mod items;
pub mod keywords;
pub mod position;

use std::sync::LazyLock;

use serde::Serialize;

use crate::language::{LexerRules, RuleTokenizer, TokenTypes};

pub static TOKEN_TYPES: TokenTypes = crate::token_types!("logs");

pub static TOKENIZER: LazyLock<RuleTokenizer> = LazyLock::new(|| {
    RuleTokenizer::new(LexerRules {
        types: &TOKEN_TYPES,
        keywords: keywords::KEYWORDS,
        functions: &[],
        word_operators: keywords::WORD_OPERATORS,
        operators: keywords::SYMBOL_OPERATORS,
        delimiters: &[',', '|'],
        line_comment: Some("#"),
        string_quotes: &['\'', '"'],
        backtick_literals: true,
        regex_literals: true,
        identifier_chars: &['@', '.'],
    })
    .with_keywords(keywords::COMMANDS.iter().map(|(name, _)| *name))
    .with_functions(
        keywords::STATS_FUNCTIONS
            .iter()
            .chain(keywords::FUNCTIONS)
            .map(|(name, _)| *name),
    )
});

/// Syntactic slot the cursor sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementPosition {
    NewCommand,
    FieldsArgument,
    AfterFieldsArgument,
    FilterArgument,
    FilterComparisonOperator,
    FilterValue,
    AfterFilterValue,
    StatsFunction,
    StatsFunctionArgument,
    AfterStatsFunction,
    StatsGroupBy,
    SortField,
    AfterSortField,
    LimitValue,
    ParseField,
    AfterParseField,
    FunctionArgument,
    Unknown,
}

/// Category of items to offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestionKind {
    Command,
    Field,
    FunctionsWithArguments,
    StatsFunctions,
    ComparisonOperators,
    LogicalOperators,
    ByKeyword,
    AsKeyword,
    SortOrderDirection,
}
