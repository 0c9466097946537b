//! # scanjson
//!
//! `scanjson` decodes a JSON document into a [`JsonValue`] tree in three
//! stages:
//!
//! 1. [`scanner`]: small combinators (`sequence`, `alternative`,
//!    `repeat_any`, ...) that recognize a prefix of a `&str`. The JSON
//!    lexical grammar in [`lexeme`] is written with them.
//! 2. [`Tokenizer`]: turns the input into a flat list of [`Token`]s, or
//!    fails with a [`TokenError`] naming the text it could not classify.
//! 3. [`Parser`]: a recursive-descent parser that builds the value, or
//!    fails with a [`ParseError`] naming the offending token.
//!
//! ## Quick Start
//!
//! ```
//! use scanjson::{decode, JsonValue};
//!
//! let value = decode(r#"{ "name": "Babbage", "ids": [1815, 1871] }"#).unwrap();
//! assert_eq!(value.get("name").and_then(JsonValue::as_str), Some("Babbage"));
//!
//! let err = decode("[12,]").unwrap_err();
//! assert_eq!(err.to_string(), "unexpected token `]` at line 1, column 5");
//! ```
//!
//! Every call is independent: nothing is shared between calls, so
//! `decode` may be used from many threads at once.

/// Contains the error types: `TokenError`, `ParseError` and `DecodeError`.
pub mod error;
/// The JSON lexical grammar, built from scanners.
pub mod lexeme;
/// Contains the recursive-descent `Parser`.
pub mod parser;
/// The scanner combinators.
pub mod scanner;
/// Contains the `Token` and `TokenType` enums.
pub mod token;
/// Contains the `Tokenizer` (lexer).
pub mod tokenizer;
/// Contains the `JsonValue` enum.
pub mod value;

pub use error::{DecodeError, ParseError, ParseErrorKind, TokenError};
pub use parser::{Parser, DEFAULT_MAX_DEPTH};
pub use token::{Token, TokenType};
pub use tokenizer::Tokenizer;
pub use value::JsonValue;

use log::{debug, trace};

/// Decoding options.
///
/// ```
/// use scanjson::Decoder;
///
/// let decoder = Decoder::new().max_depth(2);
/// assert!(decoder.decode("[[1]]").is_ok());
/// assert!(decoder.decode("[[[1]]]").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many arrays/objects may be nested inside each other.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decodes one JSON document. Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    /// Returns `DecodeError::Token` if the input cannot be tokenized, and
    /// `DecodeError::Parse` if the tokens do not form exactly one value.
    pub fn decode(&self, input: &str) -> Result<JsonValue, DecodeError> {
        let result = self.run(input);
        if let Err(e) = &result {
            debug!("decode failed: {}", e);
        }
        result
    }

    fn run(&self, input: &str) -> Result<JsonValue, DecodeError> {
        let tokens = Tokenizer::new(input).all()?;
        trace!("tokenized {} bytes into {} tokens", input.len(), tokens.len());
        let value = Parser::new(tokens).with_max_depth(self.max_depth).parse()?;
        Ok(value)
    }
}

/// Decodes a JSON document with the default options.
///
/// # Examples
/// ```
/// use scanjson::{decode, JsonValue};
///
/// assert_eq!(
///     decode(r#"["foo", "bar"]"#).unwrap(),
///     JsonValue::Array(vec![
///         JsonValue::String("foo".to_string()),
///         JsonValue::String("bar".to_string()),
///     ])
/// );
/// ```
///
/// # Errors
/// See [`Decoder::decode`].
pub fn decode(input: &str) -> Result<JsonValue, DecodeError> {
    Decoder::default().decode(input)
}

// --- Test Module ---
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as SerdeValue;
    use std::collections::BTreeMap;

    const EPSILON: f64 = 1e-6;

    fn string(s: &str) -> JsonValue {
        JsonValue::String(s.to_string())
    }

    fn parse_error(input: &str) -> ParseError {
        match decode(input) {
            Err(DecodeError::Parse(e)) => e,
            other => panic!("expected a parse error for {:?}, got {:?}", input, other),
        }
    }

    fn token_error(input: &str) -> TokenError {
        match decode(input) {
            Err(DecodeError::Token(e)) => e,
            other => panic!("expected a token error for {:?}, got {:?}", input, other),
        }
    }

    /// Converts a `serde_json` value so the two decoders can be compared.
    fn from_serde(value: SerdeValue) -> JsonValue {
        match value {
            SerdeValue::Null => JsonValue::Null,
            SerdeValue::Bool(b) => JsonValue::Boolean(b),
            SerdeValue::Number(n) => JsonValue::Number(n.as_f64().unwrap()),
            SerdeValue::String(s) => JsonValue::String(s),
            SerdeValue::Array(a) => JsonValue::Array(a.into_iter().map(from_serde).collect()),
            SerdeValue::Object(o) => {
                JsonValue::Object(o.into_iter().map(|(k, v)| (k, from_serde(v))).collect())
            }
        }
    }

    #[test]
    fn test_decode_literals() {
        assert_eq!(decode("null").unwrap(), JsonValue::Null);
        assert_eq!(decode("false").unwrap(), JsonValue::Boolean(false));
        assert_eq!(decode("true").unwrap(), JsonValue::Boolean(true));
        assert!(decode("-1.0").unwrap().approx_eq(&JsonValue::Number(-1.0), EPSILON));
        assert_eq!(decode(r#""foo \" bar""#).unwrap(), string("foo \" bar"));
    }

    #[test]
    fn test_decode_array_and_object() {
        assert_eq!(
            decode(r#"["foo", "bar"]"#).unwrap(),
            JsonValue::Array(vec![string("foo"), string("bar")])
        );

        let mut expected = BTreeMap::new();
        expected.insert("foo".to_string(), string("bar"));
        expected.insert("bar".to_string(), string("baz"));
        assert_eq!(
            decode(r#"{"foo": "bar", "bar": "baz"}"#).unwrap(),
            JsonValue::Object(expected)
        );
    }

    #[test]
    fn test_decode_string_escapes() {
        assert_eq!(
            decode(r#""\n\t\r\b\f""#).unwrap(),
            string("\n\t\r\u{0008}\u{000C}")
        );
        assert_eq!(decode(r#""\u0041\u00e9""#).unwrap(), string("A\u{e9}"));
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        assert_eq!(decode("[1,2]").unwrap(), decode("\n[ 1 ,  2 ]\t").unwrap());
    }

    #[test]
    fn test_decode_is_deterministic() {
        let input = r#"{"b": [1.5, {"c": null}], "a": "x"}"#;
        assert_eq!(decode(input).unwrap(), decode(input).unwrap());
    }

    #[test]
    fn test_empty_input_is_end_of_input() {
        assert_eq!(parse_error(""), ParseError::unexpected(None));
        assert_eq!(parse_error(" "), ParseError::unexpected(None));
        assert_eq!(parse_error("\n\t "), ParseError::unexpected(None));
    }

    #[test]
    fn test_malformed_keyword() {
        let err = token_error("nul");
        assert_eq!(err.found, "nul");
        assert_eq!(err.to_string(), "unknown token `nul` at line 1, column 1");
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(token_error("[1, ?]").found, "?");
        assert_eq!(token_error("// comment\n[1]").found, "/");
        assert_eq!(token_error("'single'").found, "'");
    }

    #[test]
    fn test_trailing_value() {
        let err = parse_error("true false");
        assert_eq!(
            err,
            ParseError::unexpected(Some(Token::new(TokenType::Boolean(false), 1, 6)))
        );
        assert_eq!(
            err.to_string(),
            "unexpected token `false` at line 1, column 6"
        );

        let err = parse_error("[1] [2]");
        assert_eq!(err.found.map(|t| t.kind), Some(TokenType::LeftBracket));
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(
            parse_error("[12,]"),
            ParseError::unexpected(Some(Token::new(TokenType::RightBracket, 1, 5)))
        );
        assert_eq!(
            parse_error(r#"{"key": 1,}"#),
            ParseError::unexpected(Some(Token::new(TokenType::RightBrace, 1, 11)))
        );
    }

    #[test]
    fn test_missing_value_after_colon() {
        assert_eq!(
            parse_error(r#"{"key":"value", "foo":}"#),
            ParseError::unexpected(Some(Token::new(TokenType::RightBrace, 1, 23)))
        );
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            parse_error("[,]").found.map(|t| t.kind),
            Some(TokenType::Comma)
        );
        assert!(parse_error("[12,13").is_end_of_input());
        assert!(parse_error("{").is_end_of_input());
        assert_eq!(
            parse_error("{true:3}").found.map(|t| t.kind),
            Some(TokenType::Boolean(true))
        );
        assert_eq!(
            parse_error(r#"{"key":"value", "foo" "value"}"#)
                .found
                .map(|t| t.kind),
            Some(TokenType::String("value".to_string()))
        );
        assert_eq!(
            parse_error(":").found.map(|t| t.kind),
            Some(TokenType::Colon)
        );
    }

    #[test]
    fn test_error_positions_span_lines() {
        let err = parse_error("{\n  \"a\": 1,\n  \"b\" 2\n}");
        assert_eq!(err.found, Some(Token::new(TokenType::Number(2.0), 3, 7)));
    }

    #[test]
    fn test_duplicate_keys() {
        let value = decode(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(value.get("a"), Some(&JsonValue::Number(2.0)));
    }

    #[test]
    fn test_numbers_within_tolerance() {
        for (text, expected) in [
            ("0", 0.0),
            ("-0", 0.0),
            ("3.14159", 3.14159),
            ("-98.71", -98.71),
            ("1e3", 1000.0),
            ("2.5E-3", 0.0025),
            ("123456789012", 123456789012.0),
        ] {
            let value = decode(text).unwrap();
            assert!(
                value.approx_eq(&JsonValue::Number(expected), EPSILON),
                "{} decoded to {:?}",
                text,
                value
            );
        }
    }

    #[test]
    fn test_large_integers_lose_precision() {
        // 2^53 + 1 is not representable as an f64.
        assert_eq!(
            decode("9007199254740993").unwrap(),
            JsonValue::Number(9007199254740992.0)
        );
    }

    #[test]
    fn test_security_limits() {
        let evil_input = "[".repeat(DEFAULT_MAX_DEPTH + 1) + &"]".repeat(DEFAULT_MAX_DEPTH + 1);
        let err = parse_error(&evil_input);
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
        assert_eq!(err.found.map(|t| t.column), Some(DEFAULT_MAX_DEPTH + 1));

        let ok_input = "[".repeat(DEFAULT_MAX_DEPTH) + &"]".repeat(DEFAULT_MAX_DEPTH);
        assert!(decode(&ok_input).is_ok());

        let deeper = "{\"a\":".repeat(150) + "1" + &"}".repeat(150);
        assert!(decode(&deeper).is_err());
        assert!(Decoder::new().max_depth(200).decode(&deeper).is_ok());
    }

    #[test]
    fn test_matches_serde_json() {
        let documents = [
            "null",
            "[]",
            "{}",
            r#"{ "key": [1, null, true, "hello"] }"#,
            r#"[{"a": 1, "b": [null, {"c": {}}]}]"#,
            r#"{"name": "Babbage", "age": 30, "admin": true,
                "friends": ["Ada", "Charles", "Grace"],
                "tasks": [{"id": 1, "title": "Parse JSON", "done": false}],
                "nested": {"key": [null, 1, 1.23e4, -0.5e-2]}}"#,
            r#""esc \" \\ \/ \b \f \n \r \t \u00e9 \ud83d\ude00""#,
        ];

        for doc in documents {
            let ours = decode(doc).unwrap();
            let theirs = from_serde(serde_json::from_str(doc).unwrap());
            assert!(
                ours.approx_eq(&theirs, EPSILON),
                "mismatch on {}: {:?} vs {:?}",
                doc,
                ours,
                theirs
            );
        }
    }

    #[test]
    fn test_rejects_what_serde_json_rejects() {
        for doc in ["", "[1,]", "{\"a\" 1}", "01", "1.", ".5", "[1 2]", "tru", "\"\\x\""] {
            assert!(serde_json::from_str::<SerdeValue>(doc).is_err(), "{}", doc);
            assert!(decode(doc).is_err(), "{}", doc);
        }
    }

    #[test]
    fn test_decode_from_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || decode(&format!("[{}, {{\"i\": {}}}]", i, i))))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let value = handle.join().unwrap().unwrap();
            assert_eq!(
                value.as_array().and_then(|a| a[1].get("i")),
                Some(&JsonValue::Number(i as f64))
            );
        }
    }
}
