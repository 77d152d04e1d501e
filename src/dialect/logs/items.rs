//! Completion items of the log-search dialect

use super::SuggestionKind;
use super::keywords::{
    AS, BY, COMMANDS, COMPARISON_OPERATORS, FUNCTIONS, LOGICAL_OPERATORS, SORT_DIRECTIONS,
    STATS_FUNCTIONS,
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
        K::StatsFunctions => collector.functions(STATS_FUNCTIONS, S::MediumHigh),
        K::ComparisonOperators => collector.operators(COMPARISON_OPERATORS, S::High),
        K::LogicalOperators => collector.operators(LOGICAL_OPERATORS, S::High),
        K::ByKeyword => collector.keyword_snippets(&[BY], S::High),
        K::AsKeyword => collector.keywords(&[AS], S::Medium),
        K::SortOrderDirection => collector.keywords(SORT_DIRECTIONS, S::High),
        // Served by the resource cache
        K::Field => {}
    }
}
