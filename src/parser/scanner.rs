// src/parser/scanner.rs
//! Lexical scanner for the rule language
//!
//! Produces one token at a time, on demand. Keywords are matched against an
//! ordered candidate table so that multi-word phrases win over any shorter
//! candidate that is a textual prefix of them. Whitespace and noise words
//! are discarded between tokens.

use crate::SyntaxError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Clause keywords
    If,
    Then,

    // Logical
    Or,
    And,
    Not,

    // Comparison
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Ne,
    In,
    Between,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,

    // Identifiers and literals
    Identifier(String),
    Number(f64),
    Str(String),
    Bool(bool),

    // Special
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(s) => write!(f, "identifier '[{}]'", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Str(s) => write!(f, "string \"{}\"", s),
            Token::Bool(b) => write!(f, "boolean {}", b),
            Token::Eof => write!(f, "end of input"),
            _ => write!(f, "{:?}", self),
        }
    }
}

/// Keyword candidates in match-priority order.
///
/// Invariant: a candidate that is a textual prefix of a longer candidate
/// must appear after it. "IS" would otherwise truncate "IS GREATER THAN"
/// and leave unparsable trailing words, and ">" would truncate ">=".
static KEYWORDS: &[(&str, Token)] = &[
    ("IS GREATER OR EQUAL", Token::Gte),
    ("IS GREATER THAN", Token::Gt),
    ("IS LESS OR EQUAL", Token::Lte),
    ("IS LESS THAN", Token::Lt),
    ("IS NOT EQUAL TO", Token::Ne),
    ("IS EQUAL TO", Token::Eq),
    ("IS", Token::Eq),
    ("GREATER OR EQUAL", Token::Gte),
    ("GREATER THAN", Token::Gt),
    ("GREATER", Token::Gt),
    ("LESS OR EQUAL", Token::Lte),
    ("LESS THAN", Token::Lt),
    ("LESS", Token::Lt),
    ("EQUALS", Token::Eq),
    (">=", Token::Gte),
    ("<=", Token::Lte),
    ("<>", Token::Ne),
    ("!=", Token::Ne),
    (">", Token::Gt),
    ("<", Token::Lt),
    ("=", Token::Eq),
    ("IF", Token::If),
    ("WHEN", Token::If),
    ("THEN", Token::Then),
    ("AND", Token::And),
    ("OR", Token::Or),
    ("NOT", Token::Not),
    ("IN", Token::In),
    ("BETWEEN", Token::Between),
    ("TRUE", Token::Bool(true)),
    ("FALSE", Token::Bool(false)),
    ("+", Token::Plus),
    ("-", Token::Minus),
    ("*", Token::Star),
    ("/", Token::Slash),
    ("%", Token::Percent),
    ("(", Token::LeftParen),
    (")", Token::RightParen),
    (",", Token::Comma),
];

/// Filler words with no grammatical effect, legal between any two tokens.
static NOISE_WORDS: &[&str] = &["THE", "A", "AN", "OF", "VALUE"];

pub struct Scanner {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Start offset (in characters) of the most recently produced token.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_trivia();
        self.token_start = self.position;

        if self.is_at_end() {
            return Ok(Token::Eof);
        }

        let ch = self.current_char();

        if ch == '"' {
            return self.read_string();
        }
        if ch == '[' {
            return self.read_identifier();
        }
        if ch.is_ascii_digit() {
            return self.read_number();
        }

        // Candidates are attempted in table order from the same start
        // position; a failed candidate consumes nothing.
        for (phrase, token) in KEYWORDS {
            if let Some(end) = self.match_phrase(phrase) {
                self.position = end;
                return Ok(token.clone());
            }
        }

        Err(self.error(&format!("unrecognized token starting at '{}'", ch)))
    }

    fn read_identifier(&mut self) -> Result<Token, SyntaxError> {
        self.advance(); // opening '['

        let start = self.position;
        while !self.is_at_end() && self.current_char() != ']' {
            self.advance();
        }

        if self.is_at_end() {
            return Err(self.error("unterminated identifier, expected ']'"));
        }

        // Taken verbatim: qualifying dots are opaque at this layer.
        let name: String = self.input[start..self.position].iter().collect();
        self.advance(); // closing ']'

        Ok(Token::Identifier(name))
    }

    fn read_number(&mut self) -> Result<Token, SyntaxError> {
        let start = self.position;

        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            self.advance();
        }

        if self.current_char_is('.') && self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while !self.is_at_end() && self.current_char().is_ascii_digit() {
                self.advance();
            }
        }

        if !self.is_at_end() && matches!(self.current_char(), 'e' | 'E') {
            let mut ahead = self.position + 1;
            if ahead < self.input.len() && matches!(self.input[ahead], '+' | '-') {
                ahead += 1;
            }
            if ahead < self.input.len() && self.input[ahead].is_ascii_digit() {
                self.position = ahead;
                while !self.is_at_end() && self.current_char().is_ascii_digit() {
                    self.advance();
                }
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error(&format!("invalid number: {}", text)))?;

        // Integer and decimal forms collapse into one double-precision
        // representation.
        Ok(Token::Number(value))
    }

    fn read_string(&mut self) -> Result<Token, SyntaxError> {
        self.advance(); // opening '"'

        let start = self.position;
        while !self.is_at_end() && self.current_char() != '"' {
            self.advance();
        }

        if self.is_at_end() {
            return Err(self.error("unterminated string literal"));
        }

        // No escape processing: the body is everything up to the next quote.
        let value: String = self.input[start..self.position].iter().collect();
        self.advance(); // closing '"'

        Ok(Token::Str(value))
    }

    fn skip_trivia(&mut self) {
        loop {
            while !self.is_at_end() && self.current_char().is_whitespace() {
                self.position += 1;
            }

            let mut skipped_noise = false;
            for word in NOISE_WORDS {
                if let Some(end) = self.match_word(self.position, word) {
                    self.position = end;
                    skipped_noise = true;
                    break;
                }
            }

            if !skipped_noise {
                break;
            }
        }
    }

    /// Attempt one keyword candidate at the current position. Returns the
    /// end position on a full match; the cursor is never moved, so a failed
    /// candidate leaves the next one to try from the same start.
    fn match_phrase(&self, phrase: &str) -> Option<usize> {
        let mut pos = self.position;

        for (i, word) in phrase.split(' ').enumerate() {
            if i > 0 {
                // Words of a multi-word keyword are separated by whitespace.
                let ws_start = pos;
                while pos < self.input.len() && self.input[pos].is_whitespace() {
                    pos += 1;
                }
                if pos == ws_start {
                    return None;
                }
            }

            pos = if word.starts_with(|c: char| c.is_ascii_alphabetic()) {
                self.match_word(pos, word)?
            } else {
                self.match_symbol(pos, word)?
            };
        }

        Some(pos)
    }

    /// Case-insensitive whole-word match. Rejects matches that would split
    /// a longer word, e.g. the noise word "AN" against input "AND".
    fn match_word(&self, start: usize, word: &str) -> Option<usize> {
        let mut pos = start;

        for expected in word.chars() {
            if pos >= self.input.len() || !self.input[pos].eq_ignore_ascii_case(&expected) {
                return None;
            }
            pos += 1;
        }

        if pos < self.input.len() && (self.input[pos].is_alphanumeric() || self.input[pos] == '_') {
            return None;
        }

        Some(pos)
    }

    fn match_symbol(&self, start: usize, symbol: &str) -> Option<usize> {
        let mut pos = start;

        for expected in symbol.chars() {
            if pos >= self.input.len() || self.input[pos] != expected {
                return None;
            }
            pos += 1;
        }

        Some(pos)
    }

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn current_char_is(&self, ch: char) -> bool {
        !self.is_at_end() && self.current_char() == ch
    }

    fn peek(&self) -> Option<char> {
        if self.position + 1 < self.input.len() {
            Some(self.input[self.position + 1])
        } else {
            None
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn error(&self, message: &str) -> SyntaxError {
        SyntaxError {
            message: message.to_string(),
            position: self.position,
        }
    }
}
