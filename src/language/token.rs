//! Token values and per-dialect token type tables
//!
//! Tokens are plain immutable values. Their `token_type` is the literal tag
//! emitted by a dialect's grammar tokenizer (for example `keyword.sql`);
//! the [`TokenTypes`] table of a dialect maps semantic categories onto
//! those tags so the same model code serves every dialect.

use serde::Serialize;

/// Cursor position in a document, 1-based line and column.
///
/// Columns count chars, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position just past the last char of `text`
    pub fn end_of(text: &str) -> Self {
        let line = text.split('\n').count();
        let column = text.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        Self { line, column }
    }

    /// Convert a byte offset in `text` into a position.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn from_byte_offset(text: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (idx, ch) in text.char_indices() {
            if idx >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }

    /// Byte offset of this position in `text`, clamped to the end
    pub fn to_byte_offset(self, text: &str) -> usize {
        let mut line = 1;
        let mut column = 1;
        for (idx, ch) in text.char_indices() {
            if line > self.line || (line == self.line && column >= self.column) {
                return idx;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        text.len()
    }
}

/// Source range of a token.
///
/// The end column is exclusive when slicing text, but cursor containment
/// is inclusive on both ends (a caret may sit at either edge of a token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRange {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl TokenRange {
    /// Range on a single line
    pub fn on_line(line: usize, start_column: usize, end_column: usize) -> Self {
        Self {
            start_line: line,
            start_column,
            end_line: line,
            end_column,
        }
    }

    /// Zero-width range at a position
    pub fn empty_at(position: Position) -> Self {
        Self::on_line(position.line, position.column, position.column)
    }

    /// Check whether the position lies inside the range, both ends inclusive
    pub fn contains(&self, position: Position) -> bool {
        let start = Position::new(self.start_line, self.start_column);
        let end = Position::new(self.end_line, self.end_column);
        start <= position && position <= end
    }

    /// Check whether the range covers no text
    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line && self.start_column == self.end_column
    }

    /// Extract the text this range covers from `text`.
    ///
    /// Only single-line ranges are produced by the builder; a multi-line
    /// range yields the text from its start to its end position.
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        let start = byte_offset(text, self.start_line, self.start_column);
        let end = byte_offset(text, self.end_line, self.end_column);
        match (start, end) {
            (Some(s), Some(e)) if s <= e => &text[s..e],
            _ => "",
        }
    }
}

/// Byte offset of a 1-based (line, column) pair, `None` past the line end
fn byte_offset(text: &str, line: usize, column: usize) -> Option<usize> {
    let mut line_start = 0;
    for (idx, current) in text.split('\n').enumerate() {
        if idx + 1 == line {
            let mut chars = current.char_indices();
            if column == 0 {
                return None;
            }
            for _ in 1..column {
                chars.next()?;
            }
            let within = chars.next().map_or(current.len(), |(i, _)| i);
            return Some(line_start + within);
        }
        line_start += current.len() + 1;
    }
    None
}

/// A single token of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Dialect-scoped type tag, e.g. `keyword.sql`
    pub token_type: String,
    /// Exact source text
    pub value: String,
    pub range: TokenRange,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: impl Into<String>, value: impl Into<String>, range: TokenRange) -> Self {
        Self {
            token_type: token_type.into(),
            value: value.into(),
            range,
        }
    }
}

/// Semantic token categories shared by every dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Parenthesis,
    Whitespace,
    Keyword,
    Delimiter,
    Operator,
    Identifier,
    /// Backtick-quoted literal, e.g. a field name with special characters
    Type,
    Function,
    Number,
    String,
    Variable,
    Comment,
    Regexp,
}

/// Per-dialect mapping from semantic categories to tokenizer tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTypes {
    pub parenthesis: &'static str,
    pub whitespace: &'static str,
    pub keyword: &'static str,
    pub delimiter: &'static str,
    pub operator: &'static str,
    pub identifier: &'static str,
    pub type_literal: &'static str,
    pub function: &'static str,
    pub number: &'static str,
    pub string: &'static str,
    pub variable: &'static str,
    pub comment: &'static str,
    pub regexp: &'static str,
}

impl TokenTypes {
    /// Tag emitted for a category
    pub fn tag(&self, category: TokenCategory) -> &'static str {
        match category {
            TokenCategory::Parenthesis => self.parenthesis,
            TokenCategory::Whitespace => self.whitespace,
            TokenCategory::Keyword => self.keyword,
            TokenCategory::Delimiter => self.delimiter,
            TokenCategory::Operator => self.operator,
            TokenCategory::Identifier => self.identifier,
            TokenCategory::Type => self.type_literal,
            TokenCategory::Function => self.function,
            TokenCategory::Number => self.number,
            TokenCategory::String => self.string,
            TokenCategory::Variable => self.variable,
            TokenCategory::Comment => self.comment,
            TokenCategory::Regexp => self.regexp,
        }
    }

    /// Reverse lookup of a tag
    pub fn category_of(&self, tag: &str) -> Option<TokenCategory> {
        const ALL: [TokenCategory; 13] = [
            TokenCategory::Parenthesis,
            TokenCategory::Whitespace,
            TokenCategory::Keyword,
            TokenCategory::Delimiter,
            TokenCategory::Operator,
            TokenCategory::Identifier,
            TokenCategory::Type,
            TokenCategory::Function,
            TokenCategory::Number,
            TokenCategory::String,
            TokenCategory::Variable,
            TokenCategory::Comment,
            TokenCategory::Regexp,
        ];
        ALL.into_iter().find(|c| self.tag(*c) == tag)
    }
}

/// Build a [`TokenTypes`] table whose tags carry the given dialect suffix
#[macro_export]
macro_rules! token_types {
    ($suffix:literal) => {
        $crate::language::TokenTypes {
            parenthesis: concat!("delimiter.parenthesis.", $suffix),
            whitespace: concat!("white.", $suffix),
            keyword: concat!("keyword.", $suffix),
            delimiter: concat!("delimiter.", $suffix),
            operator: concat!("operator.", $suffix),
            identifier: concat!("identifier.", $suffix),
            type_literal: concat!("type.", $suffix),
            function: concat!("predefined.", $suffix),
            number: concat!("number.", $suffix),
            string: concat!("string.", $suffix),
            variable: concat!("variable.", $suffix),
            comment: concat!("comment.", $suffix),
            regexp: concat!("regexp.", $suffix),
        }
    };
}
