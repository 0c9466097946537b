//! The tokenizer (lexer).
//!
//! It consumes the input `&str` with the scanners from [`crate::lexeme`]
//! and produces a flat stream of `Token`s, or the first `TokenError`.

use crate::error::TokenError;
use crate::lexeme;
use crate::scanner::{match_char, match_space, repeat_any, Scanner};
use crate::token::{Token, TokenType};
use log::trace;
use std::iter::FusedIterator;

/// Single-character punctuation, in the order it is tried.
const PUNCTUATION: [(char, TokenType); 6] = [
    ('[', TokenType::LeftBracket),
    (']', TokenType::RightBracket),
    ('{', TokenType::LeftBrace),
    ('}', TokenType::RightBrace),
    (':', TokenType::Colon),
    (',', TokenType::Comma),
];

/// Splits an input string into `Token`s.
///
/// Each call to [`Tokenizer::next_token`] skips whitespace and then tries,
/// in order: punctuation, a keyword (`true`, `false`, `null`), a number
/// and a string. The tokenizer also works as an `Iterator`, which stops
/// after the first error.
pub struct Tokenizer<'a> {
    /// The input not yet consumed.
    rest: &'a str,
    /// The current line number (1-indexed) for error reporting.
    line: usize,
    /// The current column number (1-indexed), counted in characters.
    column: usize,
    /// Set once an error has been returned by the iterator.
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` from an input string.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            rest: input,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// Tokenizes the whole input.
    ///
    /// # Errors
    /// Returns the first `TokenError`; any tokens read before it are dropped.
    pub fn all(self) -> Result<Vec<Token>, TokenError> {
        self.collect()
    }

    /// Reads the next token.
    ///
    /// Returns `Ok(None)` once only whitespace is left.
    ///
    /// # Errors
    /// Returns a `TokenError` when the next character starts no token. For
    /// a word that is not a keyword the error carries the whole word.
    pub fn next_token(&mut self) -> Result<Option<Token>, TokenError> {
        if let Some(spaces) = repeat_any(match_space()).scan(self.rest) {
            self.advance(spaces);
        }

        let Some(first) = self.rest.chars().next() else {
            return Ok(None);
        };
        let (line, column) = (self.line, self.column);

        for (c, kind) in PUNCTUATION {
            if let Some(matched) = match_char(c).scan(self.rest) {
                self.advance(matched);
                return Ok(Some(Token::new(kind, line, column)));
            }
        }

        if let Some(word) = lexeme::identifier().scan(self.rest) {
            let kind = match word {
                "true" => TokenType::Boolean(true),
                "false" => TokenType::Boolean(false),
                "null" => TokenType::Null,
                _ => return Err(self.error(word)),
            };
            self.advance(word);
            return Ok(Some(Token::new(kind, line, column)));
        }

        if let Some(digits) = lexeme::number().scan(self.rest) {
            // Unreachable for text the number grammar accepts.
            let value: f64 = digits.parse().map_err(|_| self.error(digits))?;
            self.advance(digits);
            return Ok(Some(Token::new(TokenType::Number(value), line, column)));
        }

        if let Some(literal) = lexeme::string().scan(self.rest) {
            let value = lexeme::unescape(literal);
            self.advance(literal);
            return Ok(Some(Token::new(TokenType::String(value), line, column)));
        }

        Err(self.error(&self.rest[..first.len_utf8()]))
    }

    /// Consumes `text`, which must be a prefix of `rest`, updating line/col.
    fn advance(&mut self, text: &'a str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.rest = &self.rest[text.len()..];
    }

    /// Creates a `TokenError` for `found` at the current line and column.
    fn error(&self, found: &str) -> TokenError {
        TokenError {
            found: found.to_string(),
            line: self.line,
            column: self.column,
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, TokenError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => {
                trace!(
                    "token {} at line {}, column {}",
                    token,
                    token.line,
                    token.column
                );
                Some(Ok(token))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}
