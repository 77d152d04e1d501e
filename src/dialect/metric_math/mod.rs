//! Metric math dialect
//!
//! One expression per query, built from upper-case functions, metric ids
//! and arithmetic:
//!
//! ```text
//! SEARCH('{AWS/EC2,InstanceId} CPUUtilization', 'Average', 300)
//! FILL(m1, LINEAR) * 100
//! ```

pub mod items;
pub mod keywords;
pub mod position;

use std::sync::LazyLock;

use serde::Serialize;

use crate::language::{LexerRules, RuleTokenizer, TokenTypes};

pub static TOKEN_TYPES: TokenTypes = crate::token_types!("metricmath");

pub static TOKENIZER: LazyLock<RuleTokenizer> = LazyLock::new(|| {
    RuleTokenizer::new(LexerRules {
        types: &TOKEN_TYPES,
        keywords: keywords::KEYWORD_ARGUMENTS,
        functions: &[],
        word_operators: &[],
        operators: keywords::OPERATORS,
        delimiters: &[','],
        line_comment: None,
        string_quotes: &['\'', '"'],
        backtick_literals: false,
        regex_literals: false,
        identifier_chars: &[],
    })
    .with_functions(keywords::FUNCTIONS.iter().map(|(name, _)| *name))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementPosition {
    PredefinedFunction,
    PredefinedFunctionArgument,
    /// Statistic slot of `SEARCH`
    SearchFuncSecondArg,
    /// Period slot of `SEARCH`
    SearchFuncThirdArg,
    /// Strategy slot of `FILL`
    FillFuncSecondArg,
    AfterFunction,
    WithinString,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestionKind {
    FunctionsWithArguments,
    KeywordArguments,
    Statistic,
    Period,
    Operators,
}
