//! Completion items of the analytics pipeline dialect

use super::SuggestionKind;
use super::keywords::{
    AS, BOOLEAN_FUNCTIONS, BY, COMMANDS, COMPARISON_OPERATORS, FIELD_MODIFIERS, FUNCTIONS, IN,
    LOGICAL_OPERATORS, NOT, SPAN_SNIPPET, STATS_FUNCTIONS,
};
use crate::completion::{ItemCollector, ItemKind, SortPriority};

/// Append the static items of `kind`
pub fn append(kind: SuggestionKind, collector: &mut ItemCollector) {
    use SortPriority as S;
    use SuggestionKind as K;

    match kind {
        K::Command => {
            for (name, detail) in COMMANDS {
                let item = collector
                    .item(*name, ItemKind::Keyword)
                    .snippet(format!("{name} $0"))
                    .detail(*detail)
                    .priority(S::MediumHigh)
                    .follow_up();
                collector.push(item);
            }
        }
        K::FunctionsWithArguments => collector.functions(FUNCTIONS, S::MediumLow),
        K::BooleanFunctions => collector.functions(BOOLEAN_FUNCTIONS, S::Medium),
        K::StatsFunctions => collector.functions(STATS_FUNCTIONS, S::MediumHigh),
        K::NotKeyword => collector.keyword_snippets(&[NOT], S::Medium),
        K::InKeyword => collector.keyword_snippets(&[IN], S::MediumHigh),
        K::ValueList => {
            let list = collector
                .item("(...)", ItemKind::Value)
                .snippet("($0)")
                .detail("List of values")
                .priority(S::High);
            collector.push(list);
        }
        K::ComparisonOperators => collector.operators(COMPARISON_OPERATORS, S::High),
        K::LogicalOperators => collector.operators(LOGICAL_OPERATORS, S::High),
        K::FieldModifiers => collector.operators(FIELD_MODIFIERS, S::High),
        K::ByKeyword => collector.keyword_snippets(&[BY], S::High),
        K::AsKeyword => collector.keywords(&[AS], S::Medium),
        K::SpanClause => {
            let span = collector
                .item("span", ItemKind::Function)
                .snippet(SPAN_SNIPPET)
                .detail("Bucket results by a time interval")
                .priority(S::High);
            collector.push(span);
        }
        // Served by the resource cache
        K::Field => {}
    }
}
