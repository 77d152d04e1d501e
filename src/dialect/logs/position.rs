//! Statement position classifier and suggestion kind mapper for log search

use super::keywords::{
    AS, ASC, BY, DEDUP, DESC, DISPLAY, FIELDS, FILTER, LIMIT, PARSE, PATTERN, SORT, STATS, UNMASK,
    is_boolean_function, is_stats_function,
};
use super::{StatementPosition, SuggestionKind};
use crate::dialect::landmarks::{self, PredicateCounts};
use crate::language::LinkedToken;

fn lower(token: &LinkedToken<'_>) -> String {
    token.value().to_ascii_lowercase()
}

fn is_comparison(value: &str) -> bool {
    matches!(
        value,
        "=" | "!=" | "<" | "<=" | ">" | ">=" | "=~" | "like" | "in"
    )
}

fn is_logical(value: &str) -> bool {
    matches!(value, "and" | "or")
}

fn is_keyword(token: &LinkedToken<'_>, word: &str) -> bool {
    token.is_keyword() && token.value().eq_ignore_ascii_case(word)
}

/// Classify the cursor context of a log-search query
pub fn classify(current: Option<LinkedToken<'_>>) -> StatementPosition {
    let (Some(current), Some(anchor)) = (current, landmarks::anchor(current)) else {
        return StatementPosition::NewCommand;
    };

    if current.is_comment() {
        return StatementPosition::Unknown;
    }

    let pipe = anchor.types().delimiter;
    if anchor.is(pipe, Some("|")) {
        return StatementPosition::NewCommand;
    }

    // Tokens of the current command, nearest first; the command word is last
    let scope = landmarks::scope_until(current, pipe, Some("|"));
    let Some(command) = scope.last().copied().filter(|t| t.is_keyword()) else {
        return StatementPosition::Unknown;
    };
    let command_name = lower(&command);

    if let Some(function) = landmarks::enclosing_function(Some(current)) {
        if function.index() > command.index() {
            return if command_name == STATS && is_stats_function(function.value()) {
                StatementPosition::StatsFunctionArgument
            } else {
                StatementPosition::FunctionArgument
            };
        }
    }

    if is_keyword(&anchor, AS) {
        return StatementPosition::Unknown;
    }

    let at_command = anchor == command;
    let after_comma = anchor.is_delimiter() && anchor.value() == ",";

    match command_name.as_str() {
        FIELDS | DISPLAY => {
            if at_command || after_comma || anchor.is_operator() {
                StatementPosition::FieldsArgument
            } else {
                StatementPosition::AfterFieldsArgument
            }
        }
        FILTER => classify_filter(current, anchor, command),
        STATS => {
            if is_keyword(&anchor, BY) {
                return StatementPosition::StatsGroupBy;
            }
            if scope.iter().any(|t| is_keyword(t, BY)) {
                return if after_comma {
                    StatementPosition::StatsGroupBy
                } else {
                    StatementPosition::Unknown
                };
            }
            let aliased = anchor
                .previous_non_whitespace()
                .is_some_and(|prev| is_keyword(&prev, AS));
            if at_command || after_comma {
                StatementPosition::StatsFunction
            } else if anchor.ends_with(')') || aliased {
                StatementPosition::AfterStatsFunction
            } else {
                StatementPosition::Unknown
            }
        }
        SORT => {
            if at_command || after_comma {
                StatementPosition::SortField
            } else if is_keyword(&anchor, ASC) || is_keyword(&anchor, DESC) {
                StatementPosition::Unknown
            } else {
                StatementPosition::AfterSortField
            }
        }
        LIMIT if at_command => StatementPosition::LimitValue,
        PARSE if at_command => StatementPosition::ParseField,
        PARSE if anchor.is_string() || anchor.is(anchor.types().regexp, None) => {
            StatementPosition::AfterParseField
        }
        DEDUP if at_command || after_comma => StatementPosition::FieldsArgument,
        UNMASK | PATTERN if at_command => StatementPosition::FieldsArgument,
        _ => StatementPosition::Unknown,
    }
}

/// Positions inside a `filter` predicate
fn classify_filter(
    current: LinkedToken<'_>,
    anchor: LinkedToken<'_>,
    command: LinkedToken<'_>,
) -> StatementPosition {
    if anchor == command || anchor.is(anchor.types().parenthesis, Some("(")) {
        return StatementPosition::FilterArgument;
    }

    if anchor.is_operator() {
        let value = lower(&anchor);
        return if is_logical(&value) || value == "not" {
            StatementPosition::FilterArgument
        } else {
            StatementPosition::FilterValue
        };
    }

    let counts = PredicateCounts::since_clause(
        current,
        command,
        is_comparison,
        is_logical,
        is_boolean_function,
    );
    if counts.expects_comparison() {
        StatementPosition::FilterComparisonOperator
    } else if counts.after_complete_value() {
        StatementPosition::AfterFilterValue
    } else {
        StatementPosition::Unknown
    }
}

/// Ordered suggestion kinds for a position
pub fn suggestion_kinds(position: StatementPosition) -> Vec<SuggestionKind> {
    use StatementPosition as P;
    use SuggestionKind as K;

    match position {
        P::NewCommand => vec![K::Command],
        P::FieldsArgument
        | P::FilterArgument
        | P::FilterValue
        | P::StatsGroupBy
        | P::FunctionArgument => vec![K::Field, K::FunctionsWithArguments],
        P::AfterFieldsArgument | P::AfterParseField => vec![K::AsKeyword],
        P::FilterComparisonOperator => vec![K::ComparisonOperators],
        P::AfterFilterValue => vec![K::LogicalOperators],
        P::StatsFunction => vec![K::StatsFunctions],
        P::StatsFunctionArgument | P::SortField | P::ParseField => vec![K::Field],
        P::AfterStatsFunction => vec![K::ByKeyword, K::AsKeyword],
        P::AfterSortField => vec![K::SortOrderDirection],
        P::LimitValue | P::Unknown => vec![],
    }
}
