//! Backward landmarks shared by every classifier
//!
//! All helpers read the chain only through the [`LinkedToken`] primitives.

use crate::language::LinkedToken;

/// Check whether a token is punctuation (operator, delimiter or parenthesis)
pub fn is_punctuation(token: &LinkedToken<'_>) -> bool {
    token.is_operator() || token.is_delimiter() || token.is_parenthesis()
}

/// The last complete token before the slot being filled.
///
/// Punctuation is complete as soon as it is typed, so it anchors itself.
/// A word under the cursor is still being typed and gets replaced, so the
/// anchor is whatever precedes it.
pub fn anchor<'a>(current: Option<LinkedToken<'a>>) -> Option<LinkedToken<'a>> {
    let current = current?;
    if is_punctuation(&current) {
        Some(current)
    } else {
        current.previous_non_whitespace()
    }
}

/// Non-whitespace tokens from the anchor back to the nearest
/// `(stop_type, stop_value)` token, nearest first
pub fn scope_until<'a>(
    current: LinkedToken<'a>,
    stop_type: &str,
    stop_value: Option<&str>,
) -> Vec<LinkedToken<'a>> {
    let mut tokens = Vec::new();
    if is_punctuation(&current) {
        if current.is(stop_type, stop_value) {
            return tokens;
        }
        tokens.push(current);
    }
    tokens.extend(current.previous_until(stop_type, &[], stop_value));
    tokens
}

/// Net count of `(` minus `)` over a run of tokens
fn paren_balance(tokens: &[LinkedToken<'_>]) -> i32 {
    tokens
        .iter()
        .filter(|t| t.is_parenthesis())
        .map(|t| {
            let opens = t.value().matches('(').count() as i32;
            let closes = t.value().matches(')').count() as i32;
            opens - closes
        })
        .sum()
}

/// The function call whose parentheses are still open at the cursor
pub fn enclosing_function<'a>(current: Option<LinkedToken<'a>>) -> Option<LinkedToken<'a>> {
    let current = current?;
    let function_type = current.types().function;

    let mut balance = if current.is_parenthesis() {
        paren_balance(&[current])
    } else {
        0
    };
    let mut from = current;
    while let Some(function) = from.previous_of_type(function_type, None) {
        balance += paren_balance(&from.previous_until(function_type, &[], None));
        if balance > 0 {
            return Some(function);
        }
        from = function;
    }
    None
}

/// Number of `,` delimiters between the cursor and the opening of `function`
pub fn argument_index(current: LinkedToken<'_>, function: LinkedToken<'_>) -> usize {
    let mut commas = usize::from(current.is_delimiter() && current.value() == ",");
    let mut curr = current.previous();
    while let Some(token) = curr {
        if token == function {
            break;
        }
        if token.is_delimiter() && token.value() == "," {
            commas += 1;
        }
        curr = token.previous();
    }
    commas
}

/// Comparison and logical operators seen since a clause keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PredicateCounts {
    pub comparisons: usize,
    pub logicals: usize,
}

impl PredicateCounts {
    /// Count operators between the cursor and the nearest `clause` keyword.
    ///
    /// The scope resets at that keyword, so an earlier clause of the same
    /// kind never contributes. A call to a function accepted by
    /// `is_predicate` is a whole predicate and counts as one comparison.
    pub fn since_clause(
        current: LinkedToken<'_>,
        clause: LinkedToken<'_>,
        is_comparison: impl Fn(&str) -> bool,
        is_logical: impl Fn(&str) -> bool,
        is_predicate: impl Fn(&str) -> bool,
    ) -> Self {
        let keyword = current.types().keyword;
        let mut counts = Self::default();
        for token in scope_until(current, keyword, Some(clause.value())) {
            if token.is_function() {
                let called = token
                    .next_non_whitespace()
                    .is_some_and(|next| next.is(next.types().parenthesis, Some("(")));
                if called && is_predicate(token.value()) {
                    counts.comparisons += 1;
                }
                continue;
            }
            if !token.is_operator() && !token.is_keyword() {
                continue;
            }
            let value = token.value().to_ascii_lowercase();
            if is_comparison(&value) {
                counts.comparisons += 1;
            } else if is_logical(&value) {
                counts.logicals += 1;
            }
        }
        counts
    }

    /// A key has been written and its operator is still missing
    pub fn expects_comparison(&self) -> bool {
        self.comparisons == self.logicals
    }

    /// Every key has its value; a logical operator or terminator comes next
    pub fn after_complete_value(&self) -> bool {
        self.comparisons > self.logicals
    }
}
