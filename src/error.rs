//! Contains the error types produced while decoding.
//!
//! Decoding fails in exactly one of two ways: the tokenizer meets text it
//! cannot classify (`TokenError`), or the parser meets a token the grammar
//! does not allow at that point (`ParseError`). `DecodeError` wraps both.
use crate::token::Token;
use std::fmt;
use thiserror::Error;

/// A lexical error: a fragment of input the tokenizer could not classify.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown token `{found}` at line {line}, column {column}")]
pub struct TokenError {
    /// The offending fragment, usually a single character or a bad keyword.
    pub found: String,
    /// The line number (1-indexed) where the fragment starts.
    pub line: usize,
    /// The column number (1-indexed) where the fragment starts.
    pub column: usize,
}

/// What a `ParseError` complains about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The grammar did not allow the token found (or the end of input).
    UnexpectedToken,
    /// An array or object opened past the parser's nesting limit.
    NestingTooDeep,
}

/// A syntactic error, naming the token at which the grammar broke.
///
/// `found` is `None` when the input ended where a token was expected.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ParseError {
    /// The token encountered, or `None` for end of input.
    pub found: Option<Token>,
    /// The kind of failure.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// An "unexpected token" error at `found`.
    pub fn unexpected(found: Option<Token>) -> Self {
        ParseError {
            found,
            kind: ParseErrorKind::UnexpectedToken,
        }
    }

    /// A "nesting too deep" error at the opening token `found`.
    pub fn too_deep(found: Token) -> Self {
        ParseError {
            found: Some(found),
            kind: ParseErrorKind::NestingTooDeep,
        }
    }

    /// Whether the input ended where a token was expected.
    pub fn is_end_of_input(&self) -> bool {
        self.found.is_none()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.found, self.kind) {
            (None, _) => f.write_str("unexpected end of input"),
            (Some(token), ParseErrorKind::UnexpectedToken) => write!(
                f,
                "unexpected token `{}` at line {}, column {}",
                token, token.line, token.column
            ),
            (Some(token), ParseErrorKind::NestingTooDeep) => write!(
                f,
                "nesting too deep at token `{}` at line {}, column {}",
                token, token.line, token.column
            ),
        }
    }
}

/// Any error returned by `decode`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The input could not be tokenized.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The token stream did not form exactly one JSON value.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
