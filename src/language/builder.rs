//! Token stream builder
//!
//! Turns the per-line output of a [`GrammarTokenizer`] into one
//! [`TokenChain`] spanning the whole document and locates the token under
//! the cursor.

use tracing::trace;

use super::linked_token::{Node, TokenChain};
use super::token::{Position, Token, TokenRange, TokenTypes};
use super::tokenizer::{GrammarTokenizer, RawToken};

impl TokenChain {
    /// Build the chain for `text` and find the token containing `cursor`.
    ///
    /// An empty document yields an empty chain. Blank lines contribute one
    /// zero-width whitespace token so links never break across them. The
    /// current token is the first one whose range contains the cursor.
    pub fn build(
        text: &str,
        tokenizer: &dyn GrammarTokenizer,
        types: &'static TokenTypes,
        cursor: Position,
    ) -> TokenChain {
        if text.is_empty() {
            return TokenChain::from_parts(Vec::new(), types, None);
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let tokens_per_line = tokenizer.tokenize(text);

        let mut nodes: Vec<Node> = Vec::new();
        let mut current = None;

        for (line_index, line) in lines.iter().enumerate() {
            let line_number = line_index + 1;
            let chars: Vec<char> = line.chars().collect();
            let line_length = chars.len();

            let mut raw = tokens_per_line
                .get(line_index)
                .cloned()
                .unwrap_or_default();
            if raw.is_empty() {
                raw.push(RawToken::new(0, types.whitespace));
            }

            for (column_index, token) in raw.iter().enumerate() {
                let end_offset = raw
                    .get(column_index + 1)
                    .map_or(line_length, |next| next.offset)
                    .min(line_length);
                let start_offset = token.offset.min(end_offset);
                let range =
                    TokenRange::on_line(line_number, start_offset + 1, end_offset + 1);
                let value: String = chars[start_offset..end_offset].iter().collect();

                let index = nodes.len();
                if let Some(prev) = nodes.last_mut() {
                    prev.next = Some(index);
                }
                nodes.push(Node {
                    token: Token::new(token.token_type.clone(), value, range),
                    previous: index.checked_sub(1),
                    next: None,
                });

                if current.is_none() && range.contains(cursor) {
                    current = Some(index);
                }
            }
        }

        trace!(
            tokens = nodes.len(),
            lines = lines.len(),
            current = ?current,
            "Built token chain"
        );

        TokenChain::from_parts(nodes, types, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{LexerRules, RuleTokenizer};

    static TYPES: TokenTypes = crate::token_types!("test");

    fn tokenizer() -> RuleTokenizer {
        RuleTokenizer::new(LexerRules {
            types: &TYPES,
            keywords: &["select", "from", "where", "and"],
            functions: &["count"],
            word_operators: &[],
            operators: &["=", "*"],
            delimiters: &[','],
            line_comment: None,
            string_quotes: &['\''],
            backtick_literals: true,
            regex_literals: false,
            identifier_chars: &[],
        })
    }

    fn build(text: &str, cursor: Position) -> TokenChain {
        TokenChain::build(text, &tokenizer(), &TYPES, cursor)
    }

    #[test]
    fn test_empty_document() {
        let chain = build("", Position::new(1, 1));
        assert!(chain.is_empty());
        assert!(chain.current().is_none());
    }

    #[test]
    fn test_current_after_trailing_space() {
        // "SELECT " with the caret at column 8
        let chain = build("SELECT ", Position::new(1, 8));
        let current = chain.current().unwrap();
        assert!(current.is_whitespace());
        assert_eq!(current.previous().unwrap().value(), "SELECT");
    }

    #[test]
    fn test_current_prefers_first_containing_token() {
        // Caret between "a" and "=" touches both ranges
        let chain = build("a=1", Position::new(1, 2));
        assert_eq!(chain.current().unwrap().value(), "a");
    }

    #[test]
    fn test_cursor_outside_tokens() {
        let chain = build("SELECT", Position::new(3, 1));
        assert!(chain.current().is_none());
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_blank_lines_keep_chain_connected() {
        let text = "SELECT a\n\nFROM b";
        let chain = build(text, Position::new(2, 1));
        let current = chain.current().unwrap();
        assert!(current.is_whitespace());
        assert_eq!(current.value(), "");
        assert_eq!(current.previous().unwrap().value(), "a");
        assert_eq!(current.next().unwrap().value(), "FROM");
    }

    #[test]
    fn test_chain_integrity() {
        let text = "SELECT count(*), a\nFROM `g`\n\nWHERE a = 'x' AND b";
        let chain = build(text, Position::new(1, 1));
        let count = chain.len();
        let first = chain.first().unwrap();
        let last = chain.last().unwrap();

        for k in 0..count {
            let mut forward = first;
            for _ in 0..k {
                forward = forward.next().unwrap();
            }
            let mut backward = last;
            for _ in 0..(count - 1 - k) {
                backward = backward.previous().unwrap();
            }
            assert_eq!(forward, backward);
            if let Some(next) = forward.next() {
                assert_eq!(next.previous(), Some(forward));
            }
        }
        assert!(first.previous().is_none());
        assert!(last.next().is_none());
    }

    #[test]
    fn test_range_fidelity() {
        let text = "SELECT count(*), `@ts`\nFROM g\n\nWHERE a = 'héllo' AND b";
        let chain = build(text, Position::new(1, 1));
        for token in chain.iter() {
            assert_eq!(token.range().slice(text), token.value(), "{token:?}");
        }
    }

    #[test]
    fn test_last_token_ends_past_line_end() {
        let chain = build("SELECT a", Position::new(1, 9));
        let current = chain.current().unwrap();
        assert_eq!(current.value(), "a");
        assert_eq!(current.range(), TokenRange::on_line(1, 8, 9));
    }

    /// Tokenizer that reports nothing for any line
    struct Silent;

    impl GrammarTokenizer for Silent {
        fn tokenize(&self, text: &str) -> Vec<Vec<RawToken>> {
            text.split('\n').map(|_| Vec::new()).collect()
        }
    }

    #[test]
    fn test_every_line_contributes_a_node() {
        let chain = TokenChain::build("a\nb\nc", &Silent, &TYPES, Position::new(2, 1));
        assert_eq!(chain.len(), 3);
        assert!(chain.iter().all(|t| t.is_whitespace()));
        assert_eq!(chain.current().unwrap().index(), 1);
    }
}
