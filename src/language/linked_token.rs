//! Linked token chain with cursor awareness
//!
//! A [`TokenChain`] owns every token of one document in a single arena.
//! `previous` / `next` links are arena indices, so the chain is built once
//! per completion request and never mutated afterwards. [`LinkedToken`] is
//! a cheap `Copy` view onto one node; its predicates and search helpers
//! are the whole vocabulary the dialect classifiers use to read the chain.

use std::fmt;

use super::token::{Position, Token, TokenRange, TokenTypes};

/// Arena node: a token plus its neighbours
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) token: Token,
    pub(crate) previous: Option<usize>,
    pub(crate) next: Option<usize>,
}

/// All tokens of one document, linked in source order
#[derive(Debug, Clone)]
pub struct TokenChain {
    nodes: Vec<Node>,
    types: &'static TokenTypes,
    current: Option<usize>,
}

impl TokenChain {
    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        types: &'static TokenTypes,
        current: Option<usize>,
    ) -> Self {
        Self {
            nodes,
            types,
            current,
        }
    }

    /// Token type table of the dialect that produced this chain
    pub fn types(&self) -> &'static TokenTypes {
        self.types
    }

    /// The token under the cursor, if any
    pub fn current(&self) -> Option<LinkedToken<'_>> {
        self.current.map(|index| LinkedToken { chain: self, index })
    }

    /// First token of the document
    pub fn first(&self) -> Option<LinkedToken<'_>> {
        (!self.nodes.is_empty()).then(|| LinkedToken {
            chain: self,
            index: 0,
        })
    }

    /// Last token of the document
    pub fn last(&self) -> Option<LinkedToken<'_>> {
        self.nodes.len().checked_sub(1).map(|index| LinkedToken {
            chain: self,
            index,
        })
    }

    /// Number of tokens in the chain
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the chain holds no tokens (empty document)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all tokens in source order
    pub fn iter(&self) -> impl Iterator<Item = LinkedToken<'_>> {
        (0..self.nodes.len()).map(move |index| LinkedToken { chain: self, index })
    }

    /// Find the first token whose range contains `position`
    pub fn token_at(&self, position: Position) -> Option<LinkedToken<'_>> {
        self.iter().find(|t| t.range().contains(position))
    }
}

/// View onto one node of a [`TokenChain`]
#[derive(Clone, Copy)]
pub struct LinkedToken<'a> {
    chain: &'a TokenChain,
    index: usize,
}

impl PartialEq for LinkedToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.chain, other.chain) && self.index == other.index
    }
}

impl Eq for LinkedToken<'_> {}

impl fmt::Debug for LinkedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedToken")
            .field("index", &self.index)
            .field("type", &self.token_type())
            .field("value", &self.value())
            .finish()
    }
}

impl<'a> LinkedToken<'a> {
    fn node(&self) -> &'a Node {
        &self.chain.nodes[self.index]
    }

    fn at(&self, index: Option<usize>) -> Option<LinkedToken<'a>> {
        index.map(|index| LinkedToken {
            chain: self.chain,
            index,
        })
    }

    /// Underlying token
    pub fn token(&self) -> &'a Token {
        &self.node().token
    }

    /// Type tag emitted by the tokenizer
    pub fn token_type(&self) -> &'a str {
        &self.node().token.token_type
    }

    /// Exact source text
    pub fn value(&self) -> &'a str {
        &self.node().token.value
    }

    /// Source range
    pub fn range(&self) -> TokenRange {
        self.node().token.range
    }

    /// Position of this token in the chain, 0-based
    pub fn index(&self) -> usize {
        self.index
    }

    /// Token type table of the owning chain
    pub fn types(&self) -> &'static TokenTypes {
        self.chain.types
    }

    /// Adjacent token before this one
    pub fn previous(&self) -> Option<LinkedToken<'a>> {
        self.at(self.node().previous)
    }

    /// Adjacent token after this one
    pub fn next(&self) -> Option<LinkedToken<'a>> {
        self.at(self.node().next)
    }

    /* ------------------------------ predicates ------------------------------ */

    /// Generic type test with an optional exact, case-sensitive value test
    pub fn is(&self, token_type: &str, value: Option<&str>) -> bool {
        self.token_type() == token_type && value.is_none_or(|v| v == self.value())
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type() == self.chain.types.keyword
    }

    pub fn is_whitespace(&self) -> bool {
        self.token_type() == self.chain.types.whitespace
    }

    pub fn is_parenthesis(&self) -> bool {
        self.token_type() == self.chain.types.parenthesis
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type() == self.chain.types.identifier
    }

    pub fn is_string(&self) -> bool {
        self.token_type() == self.chain.types.string
    }

    pub fn is_quoted_type_literal(&self) -> bool {
        self.token_type() == self.chain.types.type_literal
    }

    pub fn is_variable(&self) -> bool {
        self.token_type() == self.chain.types.variable
    }

    pub fn is_function(&self) -> bool {
        self.token_type() == self.chain.types.function
    }

    pub fn is_number(&self) -> bool {
        self.token_type() == self.chain.types.number
    }

    pub fn is_operator(&self) -> bool {
        self.token_type() == self.chain.types.operator
    }

    pub fn is_delimiter(&self) -> bool {
        self.token_type() == self.chain.types.delimiter
    }

    pub fn is_comment(&self) -> bool {
        self.token_type() == self.chain.types.comment
    }

    /// True if the value equals `ch` or ends with it
    pub fn ends_with(&self, ch: char) -> bool {
        self.value().ends_with(ch)
    }

    /* ------------------------------- searches ------------------------------- */

    /// Nearest preceding token that is not whitespace
    pub fn previous_non_whitespace(&self) -> Option<LinkedToken<'a>> {
        let mut curr = self.previous();
        while let Some(token) = curr {
            if !token.is_whitespace() {
                return Some(token);
            }
            curr = token.previous();
        }
        None
    }

    /// Nearest following token that is not whitespace
    pub fn next_non_whitespace(&self) -> Option<LinkedToken<'a>> {
        let mut curr = self.next();
        while let Some(token) = curr {
            if !token.is_whitespace() {
                return Some(token);
            }
            curr = token.next();
        }
        None
    }

    /// Nearest preceding token of the given type (and value, if given)
    pub fn previous_of_type(&self, token_type: &str, value: Option<&str>) -> Option<LinkedToken<'a>> {
        let mut curr = self.previous();
        while let Some(token) = curr {
            if token.is(token_type, value) {
                return Some(token);
            }
            curr = token.previous();
        }
        None
    }

    /// Nearest following token of the given type (and value, if given)
    pub fn next_of_type(&self, token_type: &str, value: Option<&str>) -> Option<LinkedToken<'a>> {
        let mut curr = self.next();
        while let Some(token) = curr {
            if token.is(token_type, value) {
                return Some(token);
            }
            curr = token.next();
        }
        None
    }

    /// Nearest preceding keyword
    pub fn previous_keyword(&self) -> Option<LinkedToken<'a>> {
        self.previous_of_type(self.chain.types.keyword, None)
    }

    /// Non-whitespace tokens between this one and the nearest preceding
    /// `(stop_type, stop_value)` match, nearest first.
    ///
    /// Tokens whose type is in `ignore_types` are skipped. Without a stop
    /// token the whole run back to the start of the document is returned.
    pub fn previous_until(
        &self,
        stop_type: &str,
        ignore_types: &[&str],
        stop_value: Option<&str>,
    ) -> Vec<LinkedToken<'a>> {
        collect_until(self.previous(), |t| t.previous(), stop_type, ignore_types, stop_value)
    }

    /// Forward counterpart of [`LinkedToken::previous_until`]
    pub fn next_until(
        &self,
        stop_type: &str,
        ignore_types: &[&str],
        stop_value: Option<&str>,
    ) -> Vec<LinkedToken<'a>> {
        collect_until(self.next(), |t| t.next(), stop_type, ignore_types, stop_value)
    }
}

fn collect_until<'a>(
    start: Option<LinkedToken<'a>>,
    step: impl Fn(&LinkedToken<'a>) -> Option<LinkedToken<'a>>,
    stop_type: &str,
    ignore_types: &[&str],
    stop_value: Option<&str>,
) -> Vec<LinkedToken<'a>> {
    let mut tokens = Vec::new();
    let mut curr = start;
    while let Some(token) = curr {
        curr = step(&token);
        if ignore_types.contains(&token.token_type()) {
            continue;
        }
        if token.is(stop_type, stop_value) {
            break;
        }
        if !token.is_whitespace() {
            tokens.push(token);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    static TYPES: TokenTypes = crate::token_types!("test");

    /// Chain over `(type, value)` pairs on a single line
    fn chain(parts: &[(&str, &str)]) -> TokenChain {
        let mut nodes = Vec::new();
        let mut column = 1;
        for (i, (token_type, value)) in parts.iter().enumerate() {
            let width = value.chars().count();
            nodes.push(Node {
                token: Token::new(
                    *token_type,
                    *value,
                    TokenRange::on_line(1, column, column + width),
                ),
                previous: i.checked_sub(1),
                next: (i + 1 < parts.len()).then_some(i + 1),
            });
            column += width;
        }
        TokenChain::from_parts(nodes, &TYPES, None)
    }

    fn sample() -> TokenChain {
        // WHERE a = 1 AND b
        chain(&[
            (TYPES.keyword, "WHERE"),
            (TYPES.whitespace, " "),
            (TYPES.identifier, "a"),
            (TYPES.whitespace, " "),
            (TYPES.operator, "="),
            (TYPES.whitespace, " "),
            (TYPES.number, "1"),
            (TYPES.whitespace, " "),
            (TYPES.keyword, "AND"),
            (TYPES.whitespace, " "),
            (TYPES.identifier, "b"),
        ])
    }

    #[test]
    fn test_links_are_symmetric() {
        let chain = sample();
        for token in chain.iter() {
            if let Some(next) = token.next() {
                assert_eq!(next.previous(), Some(token));
            }
            if let Some(prev) = token.previous() {
                assert_eq!(prev.next(), Some(token));
            }
        }
    }

    #[test]
    fn test_predicates() {
        let chain = sample();
        let first = chain.first().unwrap();
        assert!(first.is_keyword());
        assert!(first.is(TYPES.keyword, Some("WHERE")));
        assert!(!first.is(TYPES.keyword, Some("where")));
        assert!(first.is(TYPES.keyword, None));
        assert!(first.next().unwrap().is_whitespace());
        assert!(chain.last().unwrap().is_identifier());
    }

    #[test]
    fn test_previous_and_next_non_whitespace() {
        let chain = sample();
        let last = chain.last().unwrap();
        assert_eq!(last.previous_non_whitespace().unwrap().value(), "AND");
        let first = chain.first().unwrap();
        assert_eq!(first.next_non_whitespace().unwrap().value(), "a");
        assert!(first.previous_non_whitespace().is_none());
        assert!(last.next_non_whitespace().is_none());
    }

    #[test]
    fn test_previous_and_next_of_type() {
        let chain = sample();
        let last = chain.last().unwrap();
        assert_eq!(last.previous_keyword().unwrap().value(), "AND");
        assert_eq!(
            last.previous_of_type(TYPES.keyword, Some("WHERE"))
                .unwrap()
                .index(),
            0
        );
        assert!(last.previous_of_type(TYPES.string, None).is_none());
        let first = chain.first().unwrap();
        assert_eq!(first.next_of_type(TYPES.number, None).unwrap().value(), "1");
    }

    #[test]
    fn test_previous_until_stops_at_value() {
        let chain = sample();
        let last = chain.last().unwrap();
        let between: Vec<&str> = last
            .previous_until(TYPES.keyword, &[], Some("WHERE"))
            .iter()
            .map(|t| t.value())
            .collect();
        assert_eq!(between, vec!["AND", "1", "=", "a"]);
    }

    #[test]
    fn test_previous_until_ignores_types() {
        let chain = sample();
        let last = chain.last().unwrap();
        let between: Vec<&str> = last
            .previous_until(TYPES.keyword, &[TYPES.number], Some("WHERE"))
            .iter()
            .map(|t| t.value())
            .collect();
        assert_eq!(between, vec!["AND", "=", "a"]);
    }

    #[test]
    fn test_previous_until_without_stop_returns_run() {
        let chain = sample();
        let last = chain.last().unwrap();
        let run = last.previous_until(TYPES.string, &[], None);
        assert_eq!(run.len(), 5);
    }

    #[test]
    fn test_next_until() {
        let chain = sample();
        let first = chain.first().unwrap();
        let values: Vec<&str> = first
            .next_until(TYPES.keyword, &[], None)
            .iter()
            .map(|t| t.value())
            .collect();
        assert_eq!(values, vec!["a", "=", "1"]);
    }

    #[test]
    fn test_ends_with() {
        let chain = chain(&[(TYPES.function, "count"), (TYPES.parenthesis, "()")]);
        let last = chain.last().unwrap();
        assert!(last.ends_with(')'));
        assert!(!last.ends_with('('));
        assert!(!chain.first().unwrap().ends_with(')'));
    }

    #[test]
    fn test_empty_chain() {
        let chain = chain(&[]);
        assert!(chain.is_empty());
        assert!(chain.first().is_none());
        assert!(chain.last().is_none());
        assert!(chain.current().is_none());
    }
}
