use std::fmt;

use log::{debug, trace, warn};

use crate::ast::{Token, TokenKind};
use crate::options::ParseOptions;

/// Errors raised while scanning query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot start any token. `column` is 1-based and
    /// counts characters, not bytes.
    InvalidCharacter { ch: char, column: usize },
    /// A `"` with no closing quote (strict mode only).
    UnterminatedLiteral { column: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::InvalidCharacter { ch, column } => {
                write!(f, "Invalid character '{}' at column {}", ch, column)
            }
            LexError::UnterminatedLiteral { column } => {
                write!(f, "Unterminated literal starting at column {}", column)
            }
        }
    }
}

impl std::error::Error for LexError {}

type Production = fn(&mut Tokenizer) -> Result<Option<Token>, LexError>;

/// Tried in order at every scan position; the first match wins.
const PRODUCTIONS: &[(&str, Production)] = &[
    ("logical operator", Tokenizer::logical_operator),
    ("assign operator", Tokenizer::assign_operator),
    ("IN: operator", Tokenizer::in_operator),
    ("comparison operator", Tokenizer::comparison_operator),
    ("identifier", Tokenizer::identifier),
    ("literal", Tokenizer::literal),
    ("separator", Tokenizer::separator),
];

const COMPARISON_OPERATORS: [&str; 6] = ["gte:", "lte:", "not:", "eq:", "gt:", "lt:"];

const SEPARATORS: [char; 5] = ['(', ')', '[', ']', ','];

/// Scans UQL text into tokens.
///
/// `start` marks the beginning of the token being built and `cursor` the
/// lookahead position; both always sit on the same index between tokens.
/// Reading past the last character yields `None`, which acts as the
/// end-of-stream sentinel.
pub struct Tokenizer {
    input: Vec<char>,
    start: usize,
    cursor: usize,
    options: ParseOptions,
    tokens: Vec<Token>,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Tokenizer::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &str, options: ParseOptions) -> Self {
        Tokenizer {
            input: input.chars().collect(),
            start: 0,
            cursor: 0,
            options,
            tokens: Vec::new(),
        }
    }

    /// Scan the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            self.skip_whitespace();
            if self.is_end_of_stream() {
                break;
            }

            if let Some(token) = self.next_production()? {
                self.tokens.push(token);
                continue;
            }

            self.reject_or_skip()?;
        }

        debug!(
            "tokenized {} characters into {} tokens",
            self.input.len(),
            self.tokens.len()
        );
        Ok(self.tokens)
    }

    fn next_production(&mut self) -> Result<Option<Token>, LexError> {
        for (name, production) in PRODUCTIONS {
            if let Some(token) = production(self)? {
                trace!("{} {} ending at column {}", name, token, self.cursor);
                return Ok(Some(token));
            }
        }
        Ok(None)
    }

    fn reject_or_skip(&mut self) -> Result<(), LexError> {
        // `is_end_of_stream` was checked by the caller
        let Some(ch) = self.current_char() else {
            return Ok(());
        };

        if ch == '@' || ch == ':' || self.options.strict {
            return Err(LexError::InvalidCharacter {
                ch,
                column: self.cursor + 1,
            });
        }

        warn!("skipping unrecognized character '{}' at column {}", ch, self.cursor + 1);
        self.advance(1);
        self.start = self.cursor;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    fn current_char(&self) -> Option<char> {
        self.input.get(self.cursor).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.cursor + offset).copied()
    }

    fn advance(&mut self, count: usize) {
        self.cursor += count;
    }

    fn is_end_of_stream(&self) -> bool {
        self.cursor >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(' ' | '\r' | '\n')) {
            self.advance(1);
        }
        self.start = self.cursor;
    }

    fn lookahead_is(&self, expected: &str) -> bool {
        expected
            .chars()
            .enumerate()
            .all(|(offset, ch)| self.peek_char(offset) == Some(ch))
    }

    /// Emit everything from `start` up to the cursor and open a new window.
    fn emit(&mut self, kind: TokenKind) -> Token {
        let text: String = self.input[self.start..self.cursor].iter().collect();
        self.start = self.cursor;
        Token::new(kind, text)
    }

    fn emit_fixed(&mut self, kind: TokenKind, width: usize) -> Token {
        self.advance(width);
        self.emit(kind)
    }

    // ------------------------------------------------------------------
    // Productions
    // ------------------------------------------------------------------

    fn logical_operator(&mut self) -> Result<Option<Token>, LexError> {
        if self.lookahead_is("&&") || self.lookahead_is("||") {
            return Ok(Some(self.emit_fixed(TokenKind::LogicalOperator, 2)));
        }
        Ok(None)
    }

    fn assign_operator(&mut self) -> Result<Option<Token>, LexError> {
        if self.lookahead_is(":=") {
            return Ok(Some(self.emit_fixed(TokenKind::AssignOperator, 2)));
        }
        Ok(None)
    }

    fn in_operator(&mut self) -> Result<Option<Token>, LexError> {
        if self.lookahead_is("IN:") {
            return Ok(Some(self.emit_fixed(TokenKind::ComparisonOperator, 3)));
        }
        Ok(None)
    }

    fn comparison_operator(&mut self) -> Result<Option<Token>, LexError> {
        let matched = COMPARISON_OPERATORS
            .iter()
            .find(|op| self.lookahead_is(op));

        Ok(matched.map(|op| self.emit_fixed(TokenKind::ComparisonOperator, op.len())))
    }

    fn identifier(&mut self) -> Result<Option<Token>, LexError> {
        match self.current_char() {
            Some(ch) if is_key_char(ch) && !ch.is_ascii_digit() => {}
            _ => return Ok(None),
        }

        while self.current_char().is_some_and(is_key_char) {
            self.advance(1);
        }
        Ok(Some(self.emit(TokenKind::Identifier)))
    }

    fn literal(&mut self) -> Result<Option<Token>, LexError> {
        match self.current_char() {
            Some(ch) if ch.is_ascii_digit() => {
                while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance(1);
                }
                Ok(Some(self.emit(TokenKind::Literal)))
            }
            Some('"') => self.quoted_literal(),
            _ => Ok(None),
        }
    }

    fn quoted_literal(&mut self) -> Result<Option<Token>, LexError> {
        let opening = self.cursor;
        let closing = self.input[opening + 1..]
            .iter()
            .position(|&c| c == '"')
            .map(|offset| opening + 1 + offset);

        match closing {
            Some(closing) => {
                self.cursor = closing + 1;
                Ok(Some(self.emit(TokenKind::Literal)))
            }
            None if self.options.strict => Err(LexError::UnterminatedLiteral {
                column: opening + 1,
            }),
            None => {
                warn!("dropping unterminated literal at column {}", opening + 1);
                self.cursor = self.input.len();
                self.start = self.cursor;
                Ok(None)
            }
        }
    }

    fn separator(&mut self) -> Result<Option<Token>, LexError> {
        match self.current_char() {
            Some(ch) if SEPARATORS.contains(&ch) => {
                Ok(Some(self.emit_fixed(TokenKind::Separator, 1)))
            }
            _ => Ok(None),
        }
    }
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_')
}
