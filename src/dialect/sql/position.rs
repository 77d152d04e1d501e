//! Statement position classifier and suggestion kind mapper for SQL

use super::keywords::{
    AS, ASC, BY, CASE, DESC, DISTINCT, ELSE, END, FROM, GROUP, JOIN, JOIN_TYPES, LIMIT, ORDER,
    PREDICATE_CLAUSES, SELECT, THEN, WHEN,
};
use super::{StatementPosition, SuggestionKind};
use crate::dialect::landmarks::{self, PredicateCounts};
use crate::language::LinkedToken;

fn upper(token: &LinkedToken<'_>) -> String {
    token.value().to_ascii_uppercase()
}

fn is_comparison(value: &str) -> bool {
    matches!(
        value,
        "=" | "!=" | "<>" | "<" | "<=" | ">" | ">=" | "like" | "in" | "is" | "between" | "rlike"
            | "regexp"
    )
}

fn is_logical(value: &str) -> bool {
    matches!(value, "and" | "or")
}

/// Follow `AS` aliases and `CASE ... END` blocks back to the clause they belong to
fn resolve_clause<'a>(mut clause: LinkedToken<'a>) -> LinkedToken<'a> {
    loop {
        let next = match upper(&clause).as_str() {
            AS => clause.previous_keyword(),
            END => {
                let mut depth = 1;
                let mut curr = clause.previous_keyword();
                while let Some(keyword) = curr {
                    match upper(&keyword).as_str() {
                        END => depth += 1,
                        CASE => depth -= 1,
                        _ => {}
                    }
                    if depth == 0 {
                        break;
                    }
                    curr = keyword.previous_keyword();
                }
                curr.and_then(|case| case.previous_keyword())
            }
            _ => return clause,
        };
        match next {
            Some(keyword) => clause = keyword,
            None => return clause,
        }
    }
}

/// Classify the cursor context of a SQL statement
pub fn classify(current: Option<LinkedToken<'_>>) -> StatementPosition {
    let (Some(current), Some(anchor)) = (current, landmarks::anchor(current)) else {
        return StatementPosition::SelectKeyword;
    };

    if current.is_comment() {
        return StatementPosition::Unknown;
    }

    if landmarks::enclosing_function(Some(current)).is_some() {
        return StatementPosition::FunctionArgument;
    }

    let anchor_value = upper(&anchor);
    if anchor.is_keyword() {
        match anchor_value.as_str() {
            SELECT | DISTINCT => return StatementPosition::AfterSelectKeyword,
            FROM => return StatementPosition::AfterFromKeyword,
            JOIN => return StatementPosition::AfterJoinKeyword,
            v if JOIN_TYPES.contains(&v) => return StatementPosition::AfterJoinType,
            BY => {
                let before = anchor.previous_keyword().map(|k| upper(&k));
                return match before.as_deref() {
                    Some(GROUP) => StatementPosition::AfterGroupByKeywords,
                    Some(ORDER) => StatementPosition::AfterOrderByKeywords,
                    _ => StatementPosition::Unknown,
                };
            }
            LIMIT => return StatementPosition::LimitValue,
            CASE => return StatementPosition::AfterCaseKeyword,
            THEN => return StatementPosition::AfterThenKeyword,
            ELSE => return StatementPosition::AfterElseKeyword,
            ASC | DESC => return StatementPosition::AfterOrderByDirection,
            AS => return StatementPosition::Unknown,
            _ => {}
        }
    }

    let clause = if anchor.is_keyword() {
        Some(anchor)
    } else {
        anchor.previous_keyword()
    };
    let Some(clause) = clause.map(resolve_clause) else {
        return StatementPosition::Unknown;
    };
    let clause_value = upper(&clause);
    let after_comma = anchor.is_delimiter() && anchor.value() == ",";

    if PREDICATE_CLAUSES.contains(&clause_value.as_str()) {
        return classify_predicate(current, anchor, clause, &clause_value);
    }

    match clause_value.as_str() {
        SELECT | DISTINCT => {
            if after_comma || anchor.is_operator() {
                StatementPosition::AfterSelectKeyword
            } else {
                StatementPosition::AfterSelectArgument
            }
        }
        FROM if after_comma => StatementPosition::AfterFromKeyword,
        FROM => StatementPosition::AfterFromArguments,
        JOIN => StatementPosition::AfterJoinArguments,
        BY => {
            let before = clause.previous_keyword().map(|k| upper(&k));
            match (before.as_deref(), after_comma) {
                (Some(GROUP), true) => StatementPosition::AfterGroupByKeywords,
                (Some(GROUP), false) => StatementPosition::AfterGroupBy,
                (Some(ORDER), true) => StatementPosition::AfterOrderByKeywords,
                (Some(ORDER), false) => StatementPosition::AfterOrderByField,
                _ => StatementPosition::Unknown,
            }
        }
        ASC | DESC if after_comma => StatementPosition::AfterOrderByKeywords,
        THEN if anchor.is_operator() => StatementPosition::AfterThenKeyword,
        THEN => StatementPosition::AfterThenExpression,
        ELSE if anchor.is_operator() => StatementPosition::AfterElseKeyword,
        ELSE => StatementPosition::AfterElseExpression,
        _ => StatementPosition::Unknown,
    }
}

/// Positions inside a `WHERE`, `ON`, `HAVING` or `WHEN` predicate
fn classify_predicate(
    current: LinkedToken<'_>,
    anchor: LinkedToken<'_>,
    clause: LinkedToken<'_>,
    clause_value: &str,
) -> StatementPosition {
    if anchor == clause || anchor.is(anchor.types().parenthesis, Some("(")) {
        return StatementPosition::WhereKey;
    }

    if anchor.is_operator() {
        let value = anchor.value().to_ascii_lowercase();
        if is_logical(&value) {
            return StatementPosition::WhereKey;
        }
        if value == "not" {
            // `a NOT` continues into `NOT LIKE` / `NOT IN`
            let negates_key = anchor.previous_non_whitespace().is_some_and(|prev| {
                prev == clause || is_logical(&prev.value().to_ascii_lowercase())
            });
            return if negates_key {
                StatementPosition::WhereKey
            } else {
                StatementPosition::WhereComparisonOperator
            };
        }
        return StatementPosition::WhereValue;
    }

    let counts = PredicateCounts::since_clause(current, clause, is_comparison, is_logical, |_| false);
    if counts.expects_comparison() {
        StatementPosition::WhereComparisonOperator
    } else if counts.after_complete_value() {
        if clause_value == WHEN {
            StatementPosition::AfterCaseCondition
        } else {
            StatementPosition::AfterWhereValue
        }
    } else {
        StatementPosition::Unknown
    }
}

/// Ordered suggestion kinds for a position
pub fn suggestion_kinds(position: StatementPosition) -> Vec<SuggestionKind> {
    use StatementPosition as P;
    use SuggestionKind as K;

    match position {
        P::SelectKeyword => vec![K::SelectKeyword],
        P::AfterSelectKeyword => vec![
            K::AfterSelectKeyword,
            K::FunctionsWithArguments,
            K::Field,
            K::CaseKeyword,
        ],
        P::AfterSelectArgument => vec![K::FromKeyword, K::AsKeyword],
        P::FunctionArgument => vec![K::FunctionsWithArguments, K::Field],
        P::AfterFromKeyword | P::AfterJoinKeyword => vec![K::LogGroups],
        P::AfterFromArguments => vec![
            K::JoinKeywords,
            K::WhereKeyword,
            K::GroupByKeywords,
            K::OrderByKeywords,
            K::LimitKeyword,
        ],
        P::AfterJoinType => vec![K::JoinKeyword],
        P::AfterJoinArguments => vec![K::OnKeyword],
        P::WhereKey => vec![K::FunctionsWithArguments, K::Field],
        P::WhereComparisonOperator => vec![K::ComparisonOperators],
        P::WhereValue => vec![K::Literals, K::FunctionsWithArguments, K::Field],
        P::AfterWhereValue => vec![
            K::LogicalOperators,
            K::GroupByKeywords,
            K::OrderByKeywords,
            K::LimitKeyword,
        ],
        P::AfterGroupByKeywords => vec![K::Field],
        P::AfterGroupBy => vec![K::HavingKeyword, K::OrderByKeywords, K::LimitKeyword],
        P::AfterOrderByKeywords => vec![K::FunctionsWithArguments, K::Field],
        P::AfterOrderByField => vec![K::SortOrderDirection, K::LimitKeyword],
        P::AfterOrderByDirection => vec![K::LimitKeyword],
        P::AfterCaseKeyword => vec![K::WhenKeyword],
        P::AfterCaseCondition => vec![K::ThenKeyword, K::LogicalOperators],
        P::AfterThenKeyword | P::AfterElseKeyword => {
            vec![K::Literals, K::FunctionsWithArguments, K::Field]
        }
        P::AfterThenExpression => vec![K::WhenKeyword, K::ElseKeyword, K::EndKeyword],
        P::AfterElseExpression => vec![K::EndKeyword],
        P::LimitValue | P::Unknown => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::sql::{TOKEN_TYPES, TOKENIZER};
    use crate::language::{Position, TokenChain};

    fn build(text: &str) -> TokenChain {
        TokenChain::build(text, &*TOKENIZER, &TOKEN_TYPES, Position::end_of(text))
    }

    fn position_at_end(text: &str) -> StatementPosition {
        let chain = build(text);
        classify(chain.current())
    }

    #[test]
    fn test_start_of_statement() {
        assert_eq!(classify(None), StatementPosition::SelectKeyword);
        assert_eq!(position_at_end(""), StatementPosition::SelectKeyword);
        assert_eq!(position_at_end("SEL"), StatementPosition::SelectKeyword);
        assert_eq!(position_at_end(" "), StatementPosition::SelectKeyword);
    }

    #[test]
    fn test_select_clause() {
        assert_eq!(position_at_end("SELECT "), StatementPosition::AfterSelectKeyword);
        assert_eq!(position_at_end("select "), StatementPosition::AfterSelectKeyword);
        assert_eq!(
            position_at_end("SELECT DISTINCT "),
            StatementPosition::AfterSelectKeyword
        );
        assert_eq!(position_at_end("SELECT a "), StatementPosition::AfterSelectArgument);
        assert_eq!(position_at_end("SELECT a, "), StatementPosition::AfterSelectKeyword);
        assert_eq!(position_at_end("SELECT a, b"), StatementPosition::AfterSelectKeyword);
        assert_eq!(
            position_at_end("SELECT count(*) "),
            StatementPosition::AfterSelectArgument
        );
        assert_eq!(
            position_at_end("SELECT a AS total "),
            StatementPosition::AfterSelectArgument
        );
        assert_eq!(position_at_end("SELECT a AS "), StatementPosition::Unknown);
    }

    #[test]
    fn test_function_argument() {
        assert_eq!(position_at_end("SELECT count("), StatementPosition::FunctionArgument);
        assert_eq!(
            position_at_end("SELECT concat(a, "),
            StatementPosition::FunctionArgument
        );
        assert_eq!(
            position_at_end("SELECT a FROM g WHERE lower("),
            StatementPosition::FunctionArgument
        );
    }

    #[test]
    fn test_from_and_join() {
        assert_eq!(position_at_end("SELECT a FROM "), StatementPosition::AfterFromKeyword);
        assert_eq!(
            position_at_end("SELECT a FROM `g` "),
            StatementPosition::AfterFromArguments
        );
        assert_eq!(
            position_at_end("SELECT a FROM `g` WH"),
            StatementPosition::AfterFromArguments
        );
        assert_eq!(
            position_at_end("SELECT a FROM `g` INNER "),
            StatementPosition::AfterJoinType
        );
        assert_eq!(
            position_at_end("SELECT a FROM `g` INNER JOIN "),
            StatementPosition::AfterJoinKeyword
        );
        assert_eq!(
            position_at_end("SELECT a FROM `g` JOIN `h` "),
            StatementPosition::AfterJoinArguments
        );
        assert_eq!(
            position_at_end("SELECT a FROM `g` JOIN `h` ON "),
            StatementPosition::WhereKey
        );
        assert_eq!(
            position_at_end("SELECT a FROM `g` JOIN `h` ON g.id = h.id "),
            StatementPosition::AfterWhereValue
        );
    }

    #[test]
    fn test_where_clause() {
        let base = "SELECT a FROM g WHERE ";
        assert_eq!(position_at_end(base), StatementPosition::WhereKey);
        assert_eq!(
            position_at_end(&format!("{base}a ")),
            StatementPosition::WhereComparisonOperator
        );
        assert_eq!(position_at_end(&format!("{base}a = ")), StatementPosition::WhereValue);
        assert_eq!(
            position_at_end(&format!("{base}a = 1 ")),
            StatementPosition::AfterWhereValue
        );
        assert_eq!(
            position_at_end(&format!("{base}a = 1 AND ")),
            StatementPosition::WhereKey
        );
        assert_eq!(
            position_at_end(&format!("{base}a NOT ")),
            StatementPosition::WhereComparisonOperator
        );
        assert_eq!(
            position_at_end(&format!("{base}NOT ")),
            StatementPosition::WhereKey
        );
    }

    #[test]
    fn test_where_tie_break() {
        // Caret right after `b`: start of a second predicate
        assert_eq!(
            position_at_end("WHERE a = 1 AND b"),
            StatementPosition::WhereKey
        );
        // Operator typed: a value is expected
        assert_eq!(
            position_at_end("WHERE a = 1 AND b ="),
            StatementPosition::WhereValue
        );
        assert_eq!(
            position_at_end("WHERE a = 1 AND b "),
            StatementPosition::WhereComparisonOperator
        );
    }

    #[test]
    fn test_counting_resets_at_clause() {
        assert_eq!(
            position_at_end("SELECT a FROM g WHERE a = 1 GROUP BY a HAVING count(*) "),
            StatementPosition::WhereComparisonOperator
        );
        assert_eq!(
            position_at_end("SELECT a FROM g WHERE a = 1 GROUP BY a HAVING count(*) > 2 "),
            StatementPosition::AfterWhereValue
        );
    }

    #[test]
    fn test_group_and_order_by() {
        let base = "SELECT a FROM g ";
        assert_eq!(
            position_at_end(&format!("{base}GROUP BY ")),
            StatementPosition::AfterGroupByKeywords
        );
        assert_eq!(
            position_at_end(&format!("{base}GROUP BY a ")),
            StatementPosition::AfterGroupBy
        );
        assert_eq!(
            position_at_end(&format!("{base}GROUP BY a, ")),
            StatementPosition::AfterGroupByKeywords
        );
        assert_eq!(
            position_at_end(&format!("{base}ORDER BY ")),
            StatementPosition::AfterOrderByKeywords
        );
        assert_eq!(
            position_at_end(&format!("{base}ORDER BY a ")),
            StatementPosition::AfterOrderByField
        );
        assert_eq!(
            position_at_end(&format!("{base}ORDER BY a DESC ")),
            StatementPosition::AfterOrderByDirection
        );
        assert_eq!(
            position_at_end(&format!("{base}ORDER BY a DESC, ")),
            StatementPosition::AfterOrderByKeywords
        );
        assert_eq!(
            position_at_end(&format!("{base}LIMIT ")),
            StatementPosition::LimitValue
        );
    }

    #[test]
    fn test_case_expression() {
        let base = "SELECT CASE ";
        assert_eq!(position_at_end(base), StatementPosition::AfterCaseKeyword);
        assert_eq!(
            position_at_end(&format!("{base}WHEN ")),
            StatementPosition::WhereKey
        );
        assert_eq!(
            position_at_end(&format!("{base}WHEN a = 1 ")),
            StatementPosition::AfterCaseCondition
        );
        assert_eq!(
            position_at_end(&format!("{base}WHEN a = 1 THEN ")),
            StatementPosition::AfterThenKeyword
        );
        assert_eq!(
            position_at_end(&format!("{base}WHEN a = 1 THEN 'x' ")),
            StatementPosition::AfterThenExpression
        );
        assert_eq!(
            position_at_end(&format!("{base}WHEN a = 1 THEN 'x' ELSE ")),
            StatementPosition::AfterElseKeyword
        );
        assert_eq!(
            position_at_end(&format!("{base}WHEN a = 1 THEN 'x' ELSE 'y' ")),
            StatementPosition::AfterElseExpression
        );
        assert_eq!(
            position_at_end(&format!("{base}WHEN a = 1 THEN 'x' ELSE 'y' END ")),
            StatementPosition::AfterSelectArgument
        );
    }

    #[test]
    fn test_unrecognized_context() {
        assert_eq!(position_at_end("foo bar "), StatementPosition::Unknown);
        assert_eq!(position_at_end("SELECT a -- note"), StatementPosition::Unknown);
        assert!(suggestion_kinds(StatementPosition::Unknown).is_empty());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let text = "SELECT a FROM g WHERE a = 1 AND b";
        assert_eq!(position_at_end(text), position_at_end(text));
        let kinds = suggestion_kinds(StatementPosition::WhereValue);
        assert_eq!(kinds, suggestion_kinds(StatementPosition::WhereValue));
    }

    #[test]
    fn test_after_select_offers_functions_and_fields() {
        let kinds = suggestion_kinds(StatementPosition::AfterSelectKeyword);
        assert!(kinds.contains(&SuggestionKind::FunctionsWithArguments));
        assert!(kinds.contains(&SuggestionKind::Field));
        assert_eq!(
            suggestion_kinds(StatementPosition::SelectKeyword),
            vec![SuggestionKind::SelectKeyword]
        );
    }
}
