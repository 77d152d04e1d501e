//! SQL-like query dialect
//!
//! `SELECT ... FROM ... [JOIN ... ON ...] WHERE ... GROUP BY ... HAVING ...
//! ORDER BY ... LIMIT n` with `CASE WHEN ... THEN ... ELSE ... END`
//! expressions. Keywords are case-insensitive and compared upper-cased.

pub mod items;
pub mod keywords;
pub mod position;

use std::sync::LazyLock;

use serde::Serialize;

use crate::language::{LexerRules, RuleTokenizer, TokenTypes};

pub static TOKEN_TYPES: TokenTypes = crate::token_types!("sql");

pub static TOKENIZER: LazyLock<RuleTokenizer> = LazyLock::new(|| {
    RuleTokenizer::new(LexerRules {
        types: &TOKEN_TYPES,
        keywords: keywords::KEYWORDS,
        functions: &[],
        word_operators: keywords::WORD_OPERATORS,
        operators: keywords::SYMBOL_OPERATORS,
        delimiters: &[',', ';', '.'],
        line_comment: Some("--"),
        string_quotes: &['\'', '"'],
        backtick_literals: true,
        regex_literals: false,
        identifier_chars: &['@'],
    })
    .with_functions(keywords::FUNCTIONS.iter().map(|(name, _)| *name))
});

/// Syntactic slot the cursor sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementPosition {
    SelectKeyword,
    AfterSelectKeyword,
    AfterSelectArgument,
    FunctionArgument,
    AfterFromKeyword,
    AfterFromArguments,
    AfterJoinType,
    AfterJoinKeyword,
    AfterJoinArguments,
    WhereKey,
    WhereComparisonOperator,
    WhereValue,
    AfterWhereValue,
    AfterGroupByKeywords,
    AfterGroupBy,
    AfterOrderByKeywords,
    AfterOrderByField,
    AfterOrderByDirection,
    LimitValue,
    AfterCaseKeyword,
    AfterCaseCondition,
    AfterThenKeyword,
    AfterThenExpression,
    AfterElseKeyword,
    AfterElseExpression,
    Unknown,
}

/// Category of items to offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestionKind {
    SelectKeyword,
    /// `*` and `DISTINCT`
    AfterSelectKeyword,
    FunctionsWithArguments,
    Field,
    FromKeyword,
    AsKeyword,
    /// Log groups to query
    LogGroups,
    JoinKeywords,
    /// `JOIN` after a join type such as `LEFT`
    JoinKeyword,
    OnKeyword,
    WhereKeyword,
    ComparisonOperators,
    LogicalOperators,
    Literals,
    GroupByKeywords,
    HavingKeyword,
    OrderByKeywords,
    SortOrderDirection,
    LimitKeyword,
    CaseKeyword,
    WhenKeyword,
    ThenKeyword,
    ElseKeyword,
    EndKeyword,
}
