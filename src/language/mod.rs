//! Dialect-agnostic document model
//!
//! This module turns raw query text into the linked token chain the
//! classifiers walk:
//! - `token`: positions, ranges, tokens and per-dialect type tables
//! - `tokenizer`: the grammar tokenizer contract and a rule-driven scanner
//! - `builder`: assembles tokenizer output into a [`TokenChain`]
//! - `linked_token`: navigation and search over the chain

mod builder;
pub mod linked_token;
pub mod token;
pub mod tokenizer;

pub use linked_token::{LinkedToken, TokenChain};
pub use token::{Position, Token, TokenCategory, TokenRange, TokenTypes};
pub use tokenizer::{GrammarTokenizer, LexerRules, RawToken, RuleTokenizer};
