//! Completion items of the metric math dialect

use super::SuggestionKind;
use super::keywords::{FUNCTIONS, KEYWORD_ARGUMENTS, PERIODS, STATISTICS, SUGGESTED_OPERATORS};
use crate::completion::{ItemCollector, ItemKind, SortPriority};

/// Append the static items of `kind`
pub fn append(kind: SuggestionKind, collector: &mut ItemCollector) {
    use SortPriority as S;
    use SuggestionKind as K;

    match kind {
        K::FunctionsWithArguments => collector.functions(FUNCTIONS, S::MediumHigh),
        K::KeywordArguments => collector.keywords(KEYWORD_ARGUMENTS, S::High),
        K::Statistic => {
            for statistic in STATISTICS {
                let mut item = collector
                    .item(*statistic, ItemKind::Value)
                    .priority(S::High);
                item.insert_text = format!("'{statistic}'");
                collector.push(item);
            }
        }
        K::Period => {
            for (seconds, detail) in PERIODS {
                let item = collector
                    .item(*seconds, ItemKind::Value)
                    .detail(*detail)
                    .priority(S::High);
                collector.push(item);
            }
        }
        K::Operators => collector.operators(SUGGESTED_OPERATORS, S::High),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionItem;
    use crate::language::{Position, TokenRange};

    fn items(kind: SuggestionKind) -> Vec<CompletionItem> {
        let mut collector = ItemCollector::new(TokenRange::empty_at(Position::new(1, 1)));
        append(kind, &mut collector);
        collector.into_items()
    }

    #[test]
    fn test_search_leads_functions() {
        let items = items(SuggestionKind::FunctionsWithArguments);
        assert_eq!(items[0].label, "SEARCH");
        assert_eq!(items[0].insert_text, "SEARCH($0)");
        assert!(items.iter().all(|i| i.triggers_follow_up));
    }

    #[test]
    fn test_statistics_are_quoted() {
        let items = items(SuggestionKind::Statistic);
        assert_eq!(items[0].label, "Average");
        assert_eq!(items[0].insert_text, "'Average'");
        assert!(!items[0].insert_as_snippet);
    }

    #[test]
    fn test_periods_and_keywords() {
        let periods = items(SuggestionKind::Period);
        assert_eq!(periods.len(), PERIODS.len());
        assert_eq!(periods[1].detail.as_deref(), Some("5 minutes"));

        let keywords: Vec<String> = items(SuggestionKind::KeywordArguments)
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(keywords, vec!["LINEAR", "REPEAT"]);
    }
}
