//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};
use tokio::runtime::{Handle, RuntimeFlavor};

use super::shared_state::SharedState;
use crate::completion::{CompletionEngine, CompletionItem};
use crate::language::{Position, TokenRange};

/// Query completer for reedline
pub struct QlCompleter {
    engine: Arc<CompletionEngine>,
    state: SharedState,
}

impl QlCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `engine` - Completion engine shared with the REPL loop
    /// * `state` - Shared state holding the active dialect
    pub fn new(engine: Arc<CompletionEngine>, state: SharedState) -> Self {
        Self { engine, state }
    }

    /// Run the engine synchronously from inside the line editor
    fn items(&self, line: &str, cursor: Position) -> Vec<CompletionItem> {
        let dialect = self.state.dialect();
        let request = self.engine.complete(dialect, line, cursor);

        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                // block_in_place avoids the nested runtime panic
                tokio::task::block_in_place(|| handle.block_on(request))
            }
            _ => futures::executor::block_on(request),
        }
    }
}

impl Completer for QlCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input buffer
    /// * `pos` - Cursor position (byte index)
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let cursor = Position::from_byte_offset(line, pos);
        let mut items = self.items(line, cursor);
        items.sort_by_key(|item| item.sort_priority);

        items
            .into_iter()
            .filter_map(|item| {
                let (start, end) = byte_span(line, &item.replace_range, pos);
                let typed = &line[start..pos.max(start)];
                if !starts_with_ignore_case(&item.label, typed) {
                    return None;
                }
                let value = if item.insert_as_snippet {
                    expand_snippet(&item.insert_text)
                } else {
                    item.insert_text
                };
                Some(Suggestion {
                    value,
                    description: item.detail,
                    span: Span::new(start, end),
                    append_whitespace: false,
                    ..Suggestion::default()
                })
            })
            .collect()
    }
}

/// Byte span of a replace range; empty ranges collapse onto the cursor
fn byte_span(line: &str, range: &TokenRange, pos: usize) -> (usize, usize) {
    if range.is_empty() {
        return (pos, pos);
    }
    let start = Position::new(range.start_line, range.start_column).to_byte_offset(line);
    let end = Position::new(range.end_line, range.end_column).to_byte_offset(line);
    (start.min(pos), end.max(start))
}

fn starts_with_ignore_case(label: &str, typed: &str) -> bool {
    label
        .chars()
        .flat_map(char::to_lowercase)
        .zip(typed.chars().flat_map(char::to_lowercase))
        .all(|(a, b)| a == b)
        && label.chars().count() >= typed.chars().count()
}

/// Flatten snippet syntax into plain text: `$0` disappears and
/// `${n:default}` becomes its default
pub fn expand_snippet(snippet: &str) -> String {
    let mut out = String::with_capacity(snippet.len());
    let mut chars = snippet.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some(d) if d.is_ascii_digit() => {
                while chars.peek().is_some_and(char::is_ascii_digit) {
                    chars.next();
                }
            }
            Some('{') => {
                chars.next();
                while chars.peek().is_some_and(char::is_ascii_digit) {
                    chars.next();
                }
                if chars.peek() == Some(&':') {
                    chars.next();
                }
                for inner in chars.by_ref() {
                    if inner == '}' {
                        break;
                    }
                    out.push(inner);
                }
            }
            _ => out.push(ch),
        }
    }

    out
}
