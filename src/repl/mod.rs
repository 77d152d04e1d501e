//! Interactive completion shell
//!
//! This module provides a reedline-based shell for exploring the engine:
//! - Tab completion driven by the completion engine
//! - Syntax highlighting with the active dialect's tokenizer
//! - Persistent command history
//! - `:dialect` to switch languages without leaving the shell
//!
//! Entering a query prints how the end of the line is classified and what
//! would be proposed there.

mod completer;
mod engine;
mod highlighter;
mod prompt;
mod shared_state;

pub use completer::{QlCompleter, expand_snippet};
pub use engine::ReplEngine;
pub use highlighter::SyntaxHighlighter;
pub use prompt::QlPrompt;
pub use shared_state::SharedState;

use std::sync::Arc;

use crate::completion::CompletionEngine;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::language::Position;

/// Items listed per query before the output is cut short
const MAX_LISTED_ITEMS: usize = 25;

const HELP: &str = "\
Commands:
  :dialect <name>   switch to logs, sql, ppl or metric-math
  :dialect          show the active dialect
  :help             show this help
  :quit, :exit      leave the shell

Any other input is treated as a query; the shell shows how the end of the
line is classified and which items would be proposed. Press Tab to complete.";

/// A parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    SwitchDialect(Dialect),
    ShowDialect,
    Help,
    Quit,
    Query(String),
    Empty,
}

impl ReplCommand {
    /// Parse one line of input
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let Some(directive) = trimmed.strip_prefix(':') else {
            if trimmed.is_empty() {
                return Ok(Self::Empty);
            }
            return Ok(Self::Query(input.to_string()));
        };

        let mut words = directive.split_whitespace();
        match (words.next(), words.next()) {
            (Some("dialect"), None) => Ok(Self::ShowDialect),
            (Some("dialect"), Some(name)) => Ok(Self::SwitchDialect(name.parse()?)),
            (Some("help"), _) => Ok(Self::Help),
            (Some("quit" | "exit"), _) => Ok(Self::Quit),
            _ => Ok(Self::Query(input.to_string())),
        }
    }
}

/// Evaluation side of the shell, independent of the line editor
#[derive(Clone)]
pub struct ReplContext {
    engine: Arc<CompletionEngine>,
    state: SharedState,
}

impl ReplContext {
    /// Create a new context
    pub fn new(engine: Arc<CompletionEngine>, dialect: Dialect) -> Self {
        Self {
            engine,
            state: SharedState::new(dialect),
        }
    }

    pub fn engine(&self) -> &Arc<CompletionEngine> {
        &self.engine
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Run a command and render its output
    pub async fn execute(&self, command: &ReplCommand) -> String {
        match command {
            ReplCommand::SwitchDialect(dialect) => {
                self.state.set_dialect(*dialect);
                format!("Switched to {dialect}")
            }
            ReplCommand::ShowDialect => {
                let all: Vec<&str> = Dialect::ALL.iter().map(Dialect::name).collect();
                format!(
                    "Current dialect: {} (available: {})",
                    self.state.dialect(),
                    all.join(", ")
                )
            }
            ReplCommand::Help => HELP.to_string(),
            ReplCommand::Quit | ReplCommand::Empty => String::new(),
            ReplCommand::Query(query) => self.describe(query).await,
        }
    }

    async fn describe(&self, query: &str) -> String {
        let dialect = self.state.dialect();
        let cursor = Position::end_of(query);
        let classification = self.engine.classify(dialect, query, cursor);
        let items = self.engine.complete(dialect, query, cursor).await;

        let kinds: Vec<String> = classification.kinds.iter().map(|k| k.to_string()).collect();
        let mut lines = vec![
            format!("position: {}", classification.position),
            format!("kinds:    {}", kinds.join(", ")),
        ];

        if items.is_empty() {
            lines.push("items:    (none)".to_string());
        } else {
            let labels: Vec<&str> = items
                .iter()
                .take(MAX_LISTED_ITEMS)
                .map(|item| item.label.as_str())
                .collect();
            lines.push(format!("items:    {}", labels.join(", ")));
            if items.len() > MAX_LISTED_ITEMS {
                lines.push(format!("          ... and {} more", items.len() - MAX_LISTED_ITEMS));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::completion::{CompletionSettings, ResourceScope, StaticResourceProvider};

    fn context(dialect: Dialect) -> ReplContext {
        let mut catalog = HashMap::new();
        catalog.insert("app".to_string(), vec!["@message".to_string()]);
        let provider = StaticResourceProvider::new(catalog, vec![]);
        let settings = CompletionSettings {
            scope: ResourceScope::new("us-east-1", None),
            field_groups: vec!["app".to_string()],
        };
        ReplContext::new(
            Arc::new(CompletionEngine::new(Arc::new(provider), settings)),
            dialect,
        )
    }

    #[test]
    fn test_parse_directives() {
        assert_eq!(
            ReplCommand::parse(":dialect sql").unwrap(),
            ReplCommand::SwitchDialect(Dialect::Sql)
        );
        assert_eq!(ReplCommand::parse(" :dialect ").unwrap(), ReplCommand::ShowDialect);
        assert_eq!(ReplCommand::parse(":help").unwrap(), ReplCommand::Help);
        assert_eq!(ReplCommand::parse(":quit").unwrap(), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse(":exit").unwrap(), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("   ").unwrap(), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_unknown_dialect() {
        assert!(ReplCommand::parse(":dialect kql").is_err());
    }

    #[test]
    fn test_parse_query_keeps_trailing_space() {
        assert_eq!(
            ReplCommand::parse("fields ").unwrap(),
            ReplCommand::Query("fields ".to_string())
        );
    }

    #[tokio::test]
    async fn test_switch_dialect() {
        let ctx = context(Dialect::Logs);
        let output = ctx.execute(&ReplCommand::SwitchDialect(Dialect::Ppl)).await;
        assert_eq!(output, "Switched to ppl");
        assert_eq!(ctx.state().dialect(), Dialect::Ppl);

        let output = ctx.execute(&ReplCommand::ShowDialect).await;
        assert!(output.starts_with("Current dialect: ppl"));
        assert!(output.contains("metric-math"));
    }

    #[tokio::test]
    async fn test_describe_query() {
        let ctx = context(Dialect::Logs);
        let output = ctx
            .execute(&ReplCommand::Query("fields ".to_string()))
            .await;
        assert!(output.contains("position:"));
        assert!(output.contains("@message"));
    }

    #[tokio::test]
    async fn test_describe_query_without_items() {
        let ctx = context(Dialect::MetricMath);
        let output = ctx
            .execute(&ReplCommand::Query("SEARCH('{AWS/EC2".to_string()))
            .await;
        assert!(output.contains("items:    (none)"));
    }
}
