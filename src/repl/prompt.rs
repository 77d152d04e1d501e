//! Prompt showing the active query dialect

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use super::SharedState;

/// REPL prompt, e.g. `sql> `
pub struct QlPrompt {
    state: SharedState,
}

impl QlPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `state` - Shared state holding the active dialect
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl Prompt for QlPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        format!("{}> ", self.state.dialect()).into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// Empty; the indicator is part of the left prompt
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
