//! Statement position classifier and suggestion kind mapper for the
//! analytics pipeline dialect

use super::keywords::{
    AS, BY, DEDUP, EVAL, EVENTSTATS, FIELDS, FILLNULL, HEAD, IN, NOT, RARE, SORT, STATS, TOP,
    WHERE, is_boolean_function,
};
use super::{StatementPosition, SuggestionKind};
use crate::dialect::landmarks::{self, PredicateCounts};
use crate::language::LinkedToken;

fn is_comparison(value: &str) -> bool {
    matches!(value, "=" | "==" | "!=" | "<" | "<=" | ">" | ">=" | "in")
}

fn is_logical(value: &str) -> bool {
    matches!(value, "and" | "or" | "xor")
}

fn is_arithmetic(value: &str) -> bool {
    matches!(value, "+" | "-" | "*" | "/" | "%")
}

fn is_keyword(token: &LinkedToken<'_>, word: &str) -> bool {
    token.is_keyword() && token.value().eq_ignore_ascii_case(word)
}

/// Classify the cursor context of an analytics pipeline query
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

    let scope = landmarks::scope_until(current, pipe, Some("|"));
    let Some(command) = scope.last().copied().filter(|t| t.is_keyword()) else {
        return StatementPosition::Unknown;
    };
    let command_name = command.value().to_ascii_lowercase();

    if landmarks::enclosing_function(Some(current)).is_some_and(|f| f.index() > command.index()) {
        return StatementPosition::FunctionArgument;
    }

    let at_command = anchor == command;
    let after_comma = anchor.is_delimiter() && anchor.value() == ",";
    let anchor_value = anchor.value().to_ascii_lowercase();

    match command_name.as_str() {
        WHERE => classify_where(current, anchor, command),
        FIELDS => {
            let modifier_after_command = anchor.is_operator()
                && matches!(anchor_value.as_str(), "+" | "-")
                && anchor.previous_non_whitespace() == Some(command);
            if at_command {
                StatementPosition::AfterFieldsCommand
            } else if modifier_after_command || after_comma {
                StatementPosition::FieldList
            } else {
                StatementPosition::Unknown
            }
        }
        EVAL => {
            if at_command || after_comma {
                StatementPosition::EvalNewField
            } else if anchor.is_operator() {
                StatementPosition::EvalExpression
            } else {
                StatementPosition::Unknown
            }
        }
        STATS | EVENTSTATS => {
            if is_keyword(&anchor, BY) {
                return StatementPosition::AfterStatsBy;
            }
            if scope.iter().any(|t| is_keyword(t, BY)) {
                return if after_comma {
                    StatementPosition::AfterStatsBy
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
            let modifier = anchor.is_operator() && matches!(anchor_value.as_str(), "+" | "-");
            if at_command || after_comma || modifier {
                StatementPosition::SortField
            } else {
                StatementPosition::Unknown
            }
        }
        HEAD if at_command => StatementPosition::HeadArgument,
        DEDUP | RARE | TOP | FILLNULL if at_command || after_comma || is_keyword(&anchor, BY) => {
            StatementPosition::FieldList
        }
        _ => StatementPosition::Unknown,
    }
}

/// Positions inside a `where` boolean expression
fn classify_where(
    current: LinkedToken<'_>,
    anchor: LinkedToken<'_>,
    command: LinkedToken<'_>,
) -> StatementPosition {
    let open_paren = anchor.is(anchor.types().parenthesis, Some("("));
    if open_paren
        && anchor
            .previous_non_whitespace()
            .is_some_and(|prev| is_keyword(&prev, IN))
    {
        return StatementPosition::Unknown;
    }
    if anchor == command || open_paren {
        return StatementPosition::BeforeLogicalExpression;
    }
    if is_keyword(&anchor, NOT) {
        return StatementPosition::AfterNotKeyword;
    }
    if is_keyword(&anchor, IN) {
        return StatementPosition::AfterInKeyword;
    }

    if anchor.is_operator() {
        let value = anchor.value().to_ascii_lowercase();
        if is_logical(&value) {
            return StatementPosition::BeforeLogicalExpression;
        }
        if is_comparison(&value) {
            return StatementPosition::AfterComparisonOperator;
        }
        if is_arithmetic(&value) {
            return StatementPosition::AfterArithmeticOperator;
        }
        return StatementPosition::Unknown;
    }

    // A closed boolean function is a complete operand on its own
    if anchor.ends_with(')') {
        let function = anchor.previous_of_type(anchor.types().function, None);
        if function.is_some_and(|f| is_boolean_function(f.value())) {
            return StatementPosition::AfterBooleanArgument;
        }
    }

    let counts = PredicateCounts::since_clause(
        current,
        command,
        is_comparison,
        is_logical,
        is_boolean_function,
    );
    if counts.expects_comparison() {
        StatementPosition::ExpectComparisonOperator
    } else if counts.after_complete_value() {
        StatementPosition::AfterBooleanArgument
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
        P::BeforeLogicalExpression => vec![
            K::NotKeyword,
            K::Field,
            K::BooleanFunctions,
            K::FunctionsWithArguments,
        ],
        P::AfterNotKeyword => vec![K::Field, K::BooleanFunctions],
        P::ExpectComparisonOperator => vec![K::ComparisonOperators, K::InKeyword],
        P::AfterComparisonOperator
        | P::AfterArithmeticOperator
        | P::EvalExpression
        | P::FunctionArgument => vec![K::Field, K::FunctionsWithArguments],
        P::AfterBooleanArgument => vec![K::LogicalOperators],
        P::AfterInKeyword => vec![K::ValueList],
        P::FieldList | P::SortField => vec![K::Field],
        P::AfterFieldsCommand => vec![K::FieldModifiers, K::Field],
        P::StatsFunction => vec![K::StatsFunctions],
        P::AfterStatsFunction => vec![K::ByKeyword, K::AsKeyword],
        P::AfterStatsBy => vec![K::SpanClause, K::Field],
        P::EvalNewField | P::HeadArgument | P::Unknown => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::ppl::{TOKEN_TYPES, TOKENIZER};
    use crate::language::{Position, TokenChain};

    fn position_at_end(text: &str) -> StatementPosition {
        let chain = TokenChain::build(text, &*TOKENIZER, &TOKEN_TYPES, Position::end_of(text));
        classify(chain.current())
    }

    #[test]
    fn test_new_command() {
        assert_eq!(classify(None), StatementPosition::NewCommand);
        assert_eq!(position_at_end("wh"), StatementPosition::NewCommand);
        assert_eq!(position_at_end("where a = 1 | "), StatementPosition::NewCommand);
    }

    #[test]
    fn test_where_expression() {
        assert_eq!(
            position_at_end("where "),
            StatementPosition::BeforeLogicalExpression
        );
        assert_eq!(position_at_end("where not "), StatementPosition::AfterNotKeyword);
        assert_eq!(
            position_at_end("where status "),
            StatementPosition::ExpectComparisonOperator
        );
        assert_eq!(
            position_at_end("where status >= "),
            StatementPosition::AfterComparisonOperator
        );
        assert_eq!(
            position_at_end("where status >= 500 "),
            StatementPosition::AfterBooleanArgument
        );
        assert_eq!(
            position_at_end("where status >= 500 and "),
            StatementPosition::BeforeLogicalExpression
        );
        assert_eq!(
            position_at_end("where status >= 500 and code "),
            StatementPosition::ExpectComparisonOperator
        );
        assert_eq!(
            position_at_end("where latency * "),
            StatementPosition::AfterArithmeticOperator
        );
        assert_eq!(position_at_end("where code in "), StatementPosition::AfterInKeyword);
        assert_eq!(position_at_end("where code in ("), StatementPosition::Unknown);
        assert_eq!(
            position_at_end("where code in (1, 2) "),
            StatementPosition::AfterBooleanArgument
        );
        assert_eq!(
            position_at_end("where (a = 1 or "),
            StatementPosition::BeforeLogicalExpression
        );
    }

    #[test]
    fn test_where_boolean_function() {
        assert_eq!(
            position_at_end("where isnull(host) "),
            StatementPosition::AfterBooleanArgument
        );
        assert_eq!(
            position_at_end("where isnull("),
            StatementPosition::FunctionArgument
        );
        assert_eq!(
            position_at_end("where length(host) "),
            StatementPosition::ExpectComparisonOperator
        );
    }

    #[test]
    fn test_where_boolean_function_then_logical() {
        assert_eq!(
            position_at_end("where isnull(a) and "),
            StatementPosition::BeforeLogicalExpression
        );
        assert_eq!(
            position_at_end("where isnull(a) and b "),
            StatementPosition::ExpectComparisonOperator
        );
        assert_eq!(
            position_at_end("where isnull(a) and b = 1 "),
            StatementPosition::AfterBooleanArgument
        );
        assert_eq!(
            position_at_end("where a = 1 or isnotnull(b) and c "),
            StatementPosition::ExpectComparisonOperator
        );
    }

    #[test]
    fn test_fields() {
        assert_eq!(position_at_end("fields "), StatementPosition::AfterFieldsCommand);
        assert_eq!(position_at_end("fields - "), StatementPosition::FieldList);
        assert_eq!(position_at_end("fields + a, "), StatementPosition::FieldList);
        assert_eq!(position_at_end("fields a "), StatementPosition::Unknown);
    }

    #[test]
    fn test_eval() {
        assert_eq!(position_at_end("eval "), StatementPosition::EvalNewField);
        assert_eq!(position_at_end("eval ms = "), StatementPosition::EvalExpression);
        assert_eq!(
            position_at_end("eval ms = latency * "),
            StatementPosition::EvalExpression
        );
        assert_eq!(position_at_end("eval ms = 1, "), StatementPosition::EvalNewField);
    }

    #[test]
    fn test_stats() {
        assert_eq!(position_at_end("stats "), StatementPosition::StatsFunction);
        assert_eq!(position_at_end("stats avg("), StatementPosition::FunctionArgument);
        assert_eq!(
            position_at_end("stats avg(ms) "),
            StatementPosition::AfterStatsFunction
        );
        assert_eq!(position_at_end("stats avg(ms) by "), StatementPosition::AfterStatsBy);
        assert_eq!(
            position_at_end("stats avg(ms) by host, "),
            StatementPosition::AfterStatsBy
        );
        assert_eq!(
            position_at_end("stats avg(ms) by span("),
            StatementPosition::FunctionArgument
        );
        assert_eq!(
            position_at_end("eventstats count() "),
            StatementPosition::AfterStatsFunction
        );
    }

    #[test]
    fn test_sort_head_and_field_lists() {
        assert_eq!(position_at_end("sort "), StatementPosition::SortField);
        assert_eq!(position_at_end("sort - "), StatementPosition::SortField);
        assert_eq!(position_at_end("head "), StatementPosition::HeadArgument);
        assert_eq!(position_at_end("dedup "), StatementPosition::FieldList);
        assert_eq!(position_at_end("top host by "), StatementPosition::FieldList);
        assert_eq!(position_at_end("head 10 "), StatementPosition::Unknown);
    }

    #[test]
    fn test_where_counting_is_per_command() {
        assert_eq!(
            position_at_end("where a = 1 | where b "),
            StatementPosition::ExpectComparisonOperator
        );
    }
}
