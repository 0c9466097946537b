//! Defines the `Token` and `TokenType` enums.
//!
//! These are the intermediate representation between the `Tokenizer`
//! (lexer) and the `Parser`.

use std::fmt;

/// The specific type of a `Token`.
///
/// Only `Boolean`, `Number` and `String` carry a decoded payload.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// The `null` literal
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// A number, e.g., `-12.5e3`
    Number(f64),
    /// A string with its escapes already resolved
    String(String),
}

impl TokenType {
    /// A short, payload-free name for the type, e.g. `"number"`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::LeftBracket => "[",
            TokenType::RightBracket => "]",
            TokenType::LeftBrace => "{",
            TokenType::RightBrace => "}",
            TokenType::Colon => ":",
            TokenType::Comma => ",",
            TokenType::Null => "null",
            TokenType::Boolean(_) => "boolean",
            TokenType::Number(_) => "number",
            TokenType::String(_) => "string",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Boolean(b) => write!(f, "{}", b),
            TokenType::Number(n) => write!(f, "{}", n),
            TokenType::String(s) => write!(f, "{:?}", s),
            other => f.write_str(other.name()),
        }
    }
}

/// A single token produced by the `Tokenizer`.
///
/// It contains the `TokenType` and the location (line and column) of its
/// first character, which is what error messages point at.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    /// The type of the token, with its payload.
    pub kind: TokenType,
    /// The 1-indexed line number where the token starts.
    pub line: usize,
    /// The 1-indexed column number where the token starts.
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenType, line: usize, column: usize) -> Self {
        Token { kind, line, column }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}
