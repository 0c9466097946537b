//! Contains the recursive-descent `Parser`.
//!
//! The parser consumes the complete token list produced by the
//! `Tokenizer` and builds exactly one `JsonValue`. The first token that
//! breaks the grammar aborts the parse; there is no recovery.

use crate::error::ParseError;
use crate::token::{Token, TokenType};
use crate::value::JsonValue;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::vec;

/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Builds a `JsonValue` from a token list.
///
/// The grammar is standard JSON:
///
/// ```text
/// value  := null | boolean | number | string | array | object
/// array  := '[' (value (',' value)*)? ']'
/// object := '{' (pair (',' pair)*)? '}'
/// pair   := string ':' value
/// ```
pub struct Parser {
    /// The tokens not yet consumed. The cursor only moves forward.
    tokens: Peekable<vec::IntoIter<Token>>,
    /// The maximum allowed nesting depth.
    max_depth: usize,
    /// The *current* nesting depth of the parser.
    depth: usize,
}

impl Parser {
    /// Creates a new `Parser` over the tokens of one document.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into_iter().peekable(),
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    /// Sets how many arrays/objects may be nested inside each other.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses one value and requires that no tokens are left after it.
    ///
    /// # Errors
    /// Returns a `ParseError` naming the first token the grammar rejects,
    /// with `found: None` when the tokens ran out early (including when
    /// there were none at all).
    pub fn parse(mut self) -> Result<JsonValue, ParseError> {
        let value = self.parse_value()?;
        match self.tokens.next() {
            None => Ok(value),
            trailing => Err(ParseError::unexpected(trailing)),
        }
    }

    fn parse_value(&mut self) -> Result<JsonValue, ParseError> {
        let token = self.tokens.next().ok_or(ParseError::unexpected(None))?;
        match token.kind {
            TokenType::Null => Ok(JsonValue::Null),
            TokenType::Boolean(b) => Ok(JsonValue::Boolean(b)),
            TokenType::Number(n) => Ok(JsonValue::Number(n)),
            TokenType::String(s) => Ok(JsonValue::String(s)),
            TokenType::LeftBracket => self.nested(token, Self::parse_array),
            TokenType::LeftBrace => self.nested(token, Self::parse_object),
            _ => Err(ParseError::unexpected(Some(token))),
        }
    }

    /// Runs `parse` one level deeper, checking the depth limit against the
    /// opening token.
    fn nested(
        &mut self,
        open: Token,
        parse: fn(&mut Self) -> Result<JsonValue, ParseError>,
    ) -> Result<JsonValue, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::too_deep(open));
        }
        self.depth += 1;
        let value = parse(self)?;
        self.depth -= 1;
        Ok(value)
    }

    /// Parses the rest of an array after its `[`.
    fn parse_array(&mut self) -> Result<JsonValue, ParseError> {
        let mut items = Vec::new();
        if self.peek_is_not(&TokenType::RightBracket) {
            items.push(self.parse_value()?);
            while self.eat(&TokenType::Comma) {
                items.push(self.parse_value()?);
            }
        }
        self.expect(&TokenType::RightBracket)?;
        Ok(JsonValue::Array(items))
    }

    /// Parses the rest of an object after its `{`.
    fn parse_object(&mut self) -> Result<JsonValue, ParseError> {
        let mut members = BTreeMap::new();
        if self.peek_is_not(&TokenType::RightBrace) {
            let (key, value) = self.parse_pair()?;
            members.insert(key, value);
            while self.eat(&TokenType::Comma) {
                let (key, value) = self.parse_pair()?;
                // Later duplicates overwrite earlier ones.
                members.insert(key, value);
            }
        }
        self.expect(&TokenType::RightBrace)?;
        Ok(JsonValue::Object(members))
    }

    fn parse_pair(&mut self) -> Result<(String, JsonValue), ParseError> {
        let key = match self.tokens.next() {
            Some(Token {
                kind: TokenType::String(key),
                ..
            }) => key,
            other => return Err(ParseError::unexpected(other)),
        };
        self.expect(&TokenType::Colon)?;
        let value = self.parse_value()?;
        Ok((key, value))
    }

    /// True if a token is left and it is not `kind`.
    fn peek_is_not(&mut self, kind: &TokenType) -> bool {
        self.tokens.peek().is_some_and(|t| t.kind != *kind)
    }

    /// Consumes the next token if it is `kind`.
    fn eat(&mut self, kind: &TokenType) -> bool {
        self.tokens.next_if(|t| t.kind == *kind).is_some()
    }

    /// Consumes the next token, failing unless it is `kind`.
    fn expect(&mut self, kind: &TokenType) -> Result<Token, ParseError> {
        match self.tokens.next() {
            Some(token) if token.kind == *kind => Ok(token),
            other => Err(ParseError::unexpected(other)),
        }
    }
}
