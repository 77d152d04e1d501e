//! Statement position classifier and suggestion kind mapper for metric math

use super::keywords::{FILL, SEARCH};
use super::{StatementPosition, SuggestionKind};
use crate::dialect::landmarks;
use crate::language::LinkedToken;

/// A string token whose closing quote has not been typed yet
fn is_open_string(token: &LinkedToken<'_>) -> bool {
    let value = token.value();
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) => open != close || value.ends_with(&format!("\\{close}")),
        _ => true,
    }
}

fn is_operand(token: &LinkedToken<'_>) -> bool {
    token.is_identifier()
        || token.is_keyword()
        || token.is_number()
        || token.is_string()
        || token.is_variable()
        || token.is(token.types().parenthesis, Some(")"))
}

/// Classify the cursor context of a metric math expression
pub fn classify(current: Option<LinkedToken<'_>>) -> StatementPosition {
    let Some(current) = current else {
        return StatementPosition::PredefinedFunction;
    };

    if current.is_string() && is_open_string(&current) {
        return StatementPosition::WithinString;
    }

    let Some(anchor) = landmarks::anchor(Some(current)) else {
        return StatementPosition::PredefinedFunction;
    };

    let after_comma = anchor.is_delimiter() && anchor.value() == ",";
    let open_paren = anchor.is(anchor.types().parenthesis, Some("("));

    if let Some(function) = landmarks::enclosing_function(Some(current)) {
        let name = function.value().to_ascii_uppercase();
        if after_comma {
            match (name.as_str(), landmarks::argument_index(current, function)) {
                (SEARCH, 1) => return StatementPosition::SearchFuncSecondArg,
                (SEARCH, 2) => return StatementPosition::SearchFuncThirdArg,
                (FILL, 1) => return StatementPosition::FillFuncSecondArg,
                _ => {}
            }
        }
        if open_paren || after_comma || anchor.is_operator() {
            return StatementPosition::PredefinedFunctionArgument;
        }
    }

    if is_operand(&anchor) {
        StatementPosition::AfterFunction
    } else if anchor.is_operator() || open_paren {
        StatementPosition::PredefinedFunction
    } else {
        StatementPosition::Unknown
    }
}

/// Ordered suggestion kinds for a position
pub fn suggestion_kinds(position: StatementPosition) -> Vec<SuggestionKind> {
    use StatementPosition as P;
    use SuggestionKind as K;

    match position {
        P::PredefinedFunction | P::PredefinedFunctionArgument => vec![K::FunctionsWithArguments],
        P::SearchFuncSecondArg => vec![K::Statistic],
        P::SearchFuncThirdArg => vec![K::Period],
        P::FillFuncSecondArg => vec![K::KeywordArguments, K::FunctionsWithArguments],
        P::AfterFunction => vec![K::Operators],
        P::WithinString | P::Unknown => vec![],
    }
}
