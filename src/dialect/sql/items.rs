//! Completion items of the SQL dialect

use super::SuggestionKind;
use super::keywords::{
    COMPARISON_OPERATORS, FUNCTIONS, JOIN_KEYWORDS, LITERALS, LOGICAL_OPERATORS,
};
use crate::completion::{CompletionSettings, ItemCollector, ItemKind, SortPriority};

/// Snippet selecting log groups by identifier
const LOG_GROUPS_SNIPPET: &str = "`logGroups(logGroupIdentifier: [$0])`";

/// Append the static items of `kind`
pub fn append(kind: SuggestionKind, collector: &mut ItemCollector, settings: &CompletionSettings) {
    use SortPriority as S;
    use SuggestionKind as K;

    match kind {
        K::SelectKeyword => collector.keyword_snippets(&["SELECT"], S::High),
        K::AfterSelectKeyword => {
            let star = collector
                .item("*", ItemKind::Operator)
                .detail("All fields")
                .priority(S::High);
            collector.push(star);
            collector.keyword_snippets(&["DISTINCT"], S::High);
        }
        K::FunctionsWithArguments => collector.functions(FUNCTIONS, S::MediumLow),
        K::FromKeyword => collector.keyword_snippets(&["FROM"], S::High),
        K::AsKeyword => collector.keywords(&["AS"], S::Medium),
        K::LogGroups => {
            for group in &settings.field_groups {
                let item = collector
                    .item(format!("`{group}`"), ItemKind::Value)
                    .detail("Log group")
                    .priority(S::High);
                collector.push(item);
            }
            let snippet = collector
                .item("logGroups", ItemKind::Function)
                .snippet(LOG_GROUPS_SNIPPET)
                .detail("Log groups by identifier")
                .priority(S::MediumHigh)
                .follow_up();
            collector.push(snippet);
        }
        K::JoinKeywords => collector.keyword_snippets(JOIN_KEYWORDS, S::High),
        K::JoinKeyword => collector.keyword_snippets(&["JOIN", "OUTER JOIN"], S::High),
        K::OnKeyword => collector.keyword_snippets(&["ON"], S::High),
        K::WhereKeyword => collector.keyword_snippets(&["WHERE"], S::High),
        K::ComparisonOperators => collector.operators(COMPARISON_OPERATORS, S::High),
        K::LogicalOperators => collector.operators(LOGICAL_OPERATORS, S::High),
        K::Literals => collector.keywords(LITERALS, S::Medium),
        K::GroupByKeywords => collector.keyword_snippets(&["GROUP BY"], S::MediumHigh),
        K::HavingKeyword => collector.keyword_snippets(&["HAVING"], S::High),
        K::OrderByKeywords => collector.keyword_snippets(&["ORDER BY"], S::MediumHigh),
        K::SortOrderDirection => collector.keywords(&["ASC", "DESC"], S::High),
        K::LimitKeyword => collector.keyword_snippets(&["LIMIT"], S::Medium),
        K::CaseKeyword => collector.keyword_snippets(&["CASE"], S::Low),
        K::WhenKeyword => collector.keyword_snippets(&["WHEN"], S::High),
        K::ThenKeyword => collector.keyword_snippets(&["THEN"], S::High),
        K::ElseKeyword => collector.keyword_snippets(&["ELSE"], S::MediumHigh),
        K::EndKeyword => collector.keywords(&["END"], S::Medium),
        // Served by the resource cache
        K::Field => {}
    }
}
