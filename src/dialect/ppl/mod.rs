//! Analytics pipeline dialect
//!
//! Layered on the log-search pipeline shape with a richer command set,
//! field lists with `+` / `-` modifiers and arithmetic / boolean
//! sub-expressions:
//!
//! ```text
//! where status >= 500 and not isnull(host) | eval ms = latency * 1000 | stats avg(ms) by span(@timestamp, 5m)
//! ```

pub mod items;
pub mod keywords;
pub mod position;

use std::sync::LazyLock;

use serde::Serialize;

use crate::language::{LexerRules, RuleTokenizer, TokenTypes};

pub static TOKEN_TYPES: TokenTypes = crate::token_types!("ppl");

pub static TOKENIZER: LazyLock<RuleTokenizer> = LazyLock::new(|| {
    RuleTokenizer::new(LexerRules {
        types: &TOKEN_TYPES,
        keywords: keywords::KEYWORDS,
        functions: &["span"],
        word_operators: keywords::WORD_OPERATORS,
        operators: keywords::SYMBOL_OPERATORS,
        delimiters: &[',', '|'],
        line_comment: None,
        string_quotes: &['\'', '"'],
        backtick_literals: true,
        regex_literals: false,
        identifier_chars: &['@', '.'],
    })
    .with_keywords(keywords::COMMANDS.iter().map(|(name, _)| *name))
    .with_functions(
        keywords::STATS_FUNCTIONS
            .iter()
            .chain(keywords::BOOLEAN_FUNCTIONS)
            .chain(keywords::FUNCTIONS)
            .map(|(name, _)| *name),
    )
});

/// Syntactic slot the cursor sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementPosition {
    NewCommand,
    BeforeLogicalExpression,
    AfterNotKeyword,
    ExpectComparisonOperator,
    AfterComparisonOperator,
    AfterArithmeticOperator,
    AfterBooleanArgument,
    AfterInKeyword,
    FieldList,
    AfterFieldsCommand,
    EvalNewField,
    EvalExpression,
    StatsFunction,
    FunctionArgument,
    AfterStatsFunction,
    AfterStatsBy,
    SortField,
    HeadArgument,
    Unknown,
}

/// Category of items to offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestionKind {
    Command,
    Field,
    FunctionsWithArguments,
    BooleanFunctions,
    StatsFunctions,
    NotKeyword,
    InKeyword,
    /// `(...)` list after `in`
    ValueList,
    ComparisonOperators,
    LogicalOperators,
    FieldModifiers,
    ByKeyword,
    AsKeyword,
    SpanClause,
}
