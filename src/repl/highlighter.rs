//! Syntax highlighter for the active query dialect
//!
//! Highlighting reuses the dialect's grammar tokenizer, so the colors
//! always agree with how the completion engine reads the query.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use super::SharedState;
use crate::language::{GrammarTokenizer, TokenCategory};

/// Dialect-aware syntax highlighter
pub struct SyntaxHighlighter {
    state: SharedState,
    enabled: bool,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter
    pub fn new(state: SharedState, enabled: bool) -> Self {
        Self { state, enabled }
    }

    fn style_for(category: Option<TokenCategory>) -> Style {
        match category {
            Some(TokenCategory::Keyword) => Style::new().fg(Color::Blue).bold(),
            Some(TokenCategory::Function) => Style::new().fg(Color::Cyan),
            Some(TokenCategory::Operator) => Style::new().fg(Color::Yellow),
            Some(TokenCategory::String | TokenCategory::Regexp) => Style::new().fg(Color::Green),
            Some(TokenCategory::Number) => Style::new().fg(Color::Purple),
            Some(TokenCategory::Variable) => Style::new().fg(Color::Magenta).italic(),
            Some(TokenCategory::Comment) => Style::new().fg(Color::DarkGray).italic(),
            Some(TokenCategory::Type) => Style::new().fg(Color::LightBlue),
            _ => Style::default(),
        }
    }
}

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let dialect = self.state.dialect();
        let types = dialect.token_types();
        let lines = dialect.tokenizer().tokenize(line);

        for (idx, (text, tokens)) in line.split('\n').zip(lines).enumerate() {
            if idx > 0 {
                styled.push((Style::default(), "\n".to_string()));
            }

            // Raw token offsets count chars
            let bytes: Vec<usize> = text
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(text.len()))
                .collect();
            let at = |offset: usize| bytes.get(offset).copied().unwrap_or(text.len());

            if tokens.first().is_none_or(|t| t.offset > 0) {
                let end = tokens.first().map_or(text.len(), |t| at(t.offset));
                if end > 0 {
                    styled.push((Style::default(), text[..end].to_string()));
                }
            }

            for (i, token) in tokens.iter().enumerate() {
                let start = at(token.offset);
                let end = tokens.get(i + 1).map_or(text.len(), |next| at(next.offset));
                if start >= end {
                    continue;
                }
                let style = Self::style_for(types.category_of(&token.token_type));
                styled.push((style, text[start..end].to_string()));
            }
        }

        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn rendered(styled: &StyledText) -> String {
        styled.buffer.iter().map(|(_, s)| s.as_str()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        let highlighter = SyntaxHighlighter::new(SharedState::new(Dialect::Sql), true);
        let line = "SELECT count(*) FROM `grp` WHERE a = 'é'";
        assert_eq!(rendered(&highlighter.highlight(line, 0)), line);
    }

    #[test]
    fn test_keyword_is_styled() {
        let highlighter = SyntaxHighlighter::new(SharedState::new(Dialect::Logs), true);
        let styled = highlighter.highlight("fields @message", 0);
        let (style, text) = &styled.buffer[0];
        assert_eq!(text, "fields");
        assert_eq!(*style, Style::new().fg(Color::Blue).bold());
    }

    #[test]
    fn test_multiline_input() {
        let highlighter = SyntaxHighlighter::new(SharedState::new(Dialect::Logs), true);
        let line = "fields @message\n| limit 10";
        assert_eq!(rendered(&highlighter.highlight(line, 0)), line);
    }

    #[test]
    fn test_disabled_highlighter() {
        let highlighter = SyntaxHighlighter::new(SharedState::default(), false);
        let styled = highlighter.highlight("stats count(*)", 0);
        assert_eq!(styled.buffer.len(), 1);
        assert_eq!(styled.buffer[0].0, Style::default());
    }
}
