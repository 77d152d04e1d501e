//! Grammar tokenizer for line-oriented, error-tolerant tokenization
//!
//! The completion engine consumes tokens through [`GrammarTokenizer`]: for
//! every physical line of a document, an ordered list of `(type, offset)`
//! pairs. Any tokenizer honoring that contract can be plugged in; the crate
//! ships [`RuleTokenizer`], a simple scanner driven by per-dialect
//! [`LexerRules`].
//!
//! # Design Principles
//!
//! - **Never panic** - always return a valid token list per line
//! - **Never reject input** - unknown characters become operator tokens
//! - **Lines are independent** - an unterminated string ends at the line end
//! - **Offsets count chars**, matching the builder's column convention

use std::collections::HashSet;

use super::token::TokenTypes;

/// A token as emitted by a grammar tokenizer: its type and start offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    /// 0-based char offset within the line
    pub offset: usize,
    pub token_type: String,
}

impl RawToken {
    /// Create a new raw token
    pub fn new(offset: usize, token_type: impl Into<String>) -> Self {
        Self {
            offset,
            token_type: token_type.into(),
        }
    }
}

/// Turns document text into per-line token arrays
pub trait GrammarTokenizer: Send + Sync {
    /// Tokenize `text`; the result holds one entry per `\n`-separated line
    fn tokenize(&self, text: &str) -> Vec<Vec<RawToken>>;
}

/// Lexical rules of one dialect
#[derive(Debug, Clone)]
pub struct LexerRules {
    pub types: &'static TokenTypes,
    /// Words tagged as keywords (matched case-insensitively)
    pub keywords: &'static [&'static str],
    /// Words tagged as functions (matched case-insensitively)
    pub functions: &'static [&'static str],
    /// Words tagged as operators, e.g. `AND`, `LIKE`
    pub word_operators: &'static [&'static str],
    /// Symbolic operators, longest match wins
    pub operators: &'static [&'static str],
    /// Single-char delimiters
    pub delimiters: &'static [char],
    /// Line comment prefix
    pub line_comment: Option<&'static str>,
    /// Chars opening a string literal
    pub string_quotes: &'static [char],
    /// Backtick-quoted names become type literals
    pub backtick_literals: bool,
    /// `/.../` is a regular expression literal
    pub regex_literals: bool,
    /// Extra chars allowed inside identifiers besides alphanumerics and `_`
    pub identifier_chars: &'static [char],
}

/// Rule-driven scanner implementing [`GrammarTokenizer`]
pub struct RuleTokenizer {
    rules: LexerRules,
    keywords: HashSet<String>,
    functions: HashSet<String>,
    word_operators: HashSet<String>,
}

impl RuleTokenizer {
    /// Create a tokenizer from lexical rules
    pub fn new(rules: LexerRules) -> Self {
        let fold = |words: &[&str]| words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            keywords: fold(rules.keywords),
            functions: fold(rules.functions),
            word_operators: fold(rules.word_operators),
            rules,
        }
    }

    /// Also tag these words as keywords
    pub fn with_keywords<'w>(mut self, words: impl IntoIterator<Item = &'w str>) -> Self {
        self.keywords
            .extend(words.into_iter().map(|word| word.to_lowercase()));
        self
    }

    /// Also tag these words as functions
    pub fn with_functions<'w>(mut self, names: impl IntoIterator<Item = &'w str>) -> Self {
        self.functions
            .extend(names.into_iter().map(|name| name.to_lowercase()));
        self
    }

    /// Token type table this tokenizer emits
    pub fn types(&self) -> &'static TokenTypes {
        self.rules.types
    }

    /// Tokenize a single line
    pub fn tokenize_line(&self, line: &str) -> Vec<RawToken> {
        LineScanner {
            rules: self,
            input: line.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
        .run()
    }

    fn classify_word(&self, word: &str) -> &'static str {
        let types = self.rules.types;
        let folded = word.to_lowercase();
        if self.word_operators.contains(&folded) {
            types.operator
        } else if self.keywords.contains(&folded) {
            types.keyword
        } else if self.functions.contains(&folded) {
            types.function
        } else {
            types.identifier
        }
    }
}

impl GrammarTokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Vec<RawToken>> {
        text.split('\n').map(|line| self.tokenize_line(line)).collect()
    }
}

/// Scanner state for one line
struct LineScanner<'r> {
    rules: &'r RuleTokenizer,
    input: Vec<char>,
    pos: usize,
    tokens: Vec<RawToken>,
}

impl<'r> LineScanner<'r> {
    fn run(mut self) -> Vec<RawToken> {
        while !self.is_at_end() {
            self.next_token();
        }
        self.tokens
    }

    fn emit(&mut self, start: usize, token_type: &'static str) {
        self.tokens.push(RawToken::new(start, token_type));
    }

    fn next_token(&mut self) {
        let tokenizer: &'r RuleTokenizer = self.rules;
        let rules = &tokenizer.rules;
        let types = rules.types;
        let start = self.pos;
        let ch = self.current_char();

        if ch.is_whitespace() {
            while !self.is_at_end() && self.current_char().is_whitespace() {
                self.advance();
            }
            return self.emit(start, types.whitespace);
        }

        if let Some(prefix) = rules.line_comment {
            if self.starts_with(prefix) {
                self.pos = self.input.len();
                return self.emit(start, types.comment);
            }
        }

        match ch {
            '(' | ')' => {
                self.advance();
                self.emit(start, types.parenthesis);
            }
            '$' => self.scan_variable(start),
            '`' if rules.backtick_literals => {
                self.scan_quoted('`');
                self.emit(start, types.type_literal);
            }
            '/' if rules.regex_literals && self.regex_allowed() => {
                self.scan_quoted('/');
                self.emit(start, types.regexp);
            }
            c if rules.string_quotes.contains(&c) => {
                self.scan_quoted(c);
                self.emit(start, types.string);
            }
            c if c.is_ascii_digit() => self.scan_number(start),
            c if self.is_identifier_start(c) => self.scan_word(start),
            c if rules.delimiters.contains(&c) => {
                self.advance();
                self.emit(start, types.delimiter);
            }
            _ => self.scan_operator(start),
        }
    }

    /// Scan a quoted literal; an unterminated one runs to the line end
    fn scan_quoted(&mut self, quote: char) {
        self.advance(); // Skip opening quote
        while !self.is_at_end() {
            let ch = self.current_char();
            self.advance();
            if ch == '\\' && !self.is_at_end() {
                self.advance();
            } else if ch == quote {
                break;
            }
        }
    }

    /// `$name` or `${name}`; a lone `$` is still a variable token
    fn scan_variable(&mut self, start: usize) {
        self.advance();
        if self.current_char() == '{' {
            while !self.is_at_end() && self.current_char() != '}' {
                self.advance();
            }
            if self.current_char() == '}' {
                self.advance();
            }
        } else {
            while !self.is_at_end() && self.is_identifier_char(self.current_char()) {
                self.advance();
            }
        }
        self.emit(start, self.rules.rules.types.variable);
    }

    /// Digits, an optional fraction and a unit suffix such as `5m`
    fn scan_number(&mut self, start: usize) {
        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            self.advance();
        }
        if self.current_char() == '.' && self.peek_char().is_ascii_digit() {
            self.advance();
            while !self.is_at_end() && self.current_char().is_ascii_digit() {
                self.advance();
            }
        }
        while !self.is_at_end() && self.current_char().is_ascii_alphabetic() {
            self.advance();
        }
        self.emit(start, self.rules.rules.types.number);
    }

    fn scan_word(&mut self, start: usize) {
        self.advance();
        while !self.is_at_end() && self.is_identifier_char(self.current_char()) {
            self.advance();
        }
        let word: String = self.input[start..self.pos].iter().collect();
        let token_type = self.rules.classify_word(&word);
        self.emit(start, token_type);
    }

    fn scan_operator(&mut self, start: usize) {
        let types = self.rules.rules.types;
        let longest = self
            .rules
            .rules
            .operators
            .iter()
            .filter(|op| self.starts_with(op))
            .map(|op| op.chars().count())
            .max()
            .unwrap_or(1);
        self.pos += longest;
        self.emit(start, types.operator);
    }

    /// A `/` opens a regex unless it follows an operand (then it divides)
    fn regex_allowed(&self) -> bool {
        let types = self.rules.rules.types;
        let last = self
            .tokens
            .iter()
            .rev()
            .find(|t| t.token_type != types.whitespace);
        match last {
            None => true,
            Some(t) => {
                let tag = t.token_type.as_str();
                tag == types.keyword || tag == types.operator || tag == types.delimiter || {
                    tag == types.parenthesis && self.input.get(t.offset) == Some(&'(')
                }
            }
        }
    }

    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || self.rules.rules.identifier_chars.contains(&ch)
    }

    fn is_identifier_char(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || self.rules.rules.identifier_chars.contains(&ch)
    }

    fn starts_with(&self, pattern: &str) -> bool {
        let mut pos = self.pos;
        for expected in pattern.chars() {
            if self.input.get(pos) != Some(&expected) {
                return false;
            }
            pos += 1;
        }
        true
    }

    fn current_char(&self) -> char {
        self.input.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_char(&self) -> char {
        self.input.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}
