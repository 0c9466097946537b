//! The lexical grammar of JSON, written with the scanners from
//! [`crate::scanner`], and the unescaping of matched string literals.

use crate::scanner::{
    alternative, match_char, match_if, optional, repeat_any, repeat_at_least, repeat_exactly,
    sequence, Scanner,
};
use memchr::memchr;

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_digit_1_9(c: char) -> bool {
    matches!(c, '1'..='9')
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// A letter or underscore, then any letters, digits or underscores.
///
/// JSON has no identifiers. The tokenizer uses this to report a whole bad
/// keyword such as `nul` or `True` instead of its first character.
pub fn identifier() -> impl Scanner {
    sequence((
        alternative((match_if(char::is_alphabetic), match_char('_'))),
        repeat_any(alternative((
            match_if(char::is_alphabetic),
            match_char('_'),
            match_if(char::is_numeric),
        ))),
    ))
}

/// A JSON number: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`.
pub fn number() -> impl Scanner {
    sequence((
        optional(match_char('-')),
        alternative((
            match_char('0'),
            sequence((match_if(is_digit_1_9), repeat_any(match_if(is_digit)))),
        )),
        optional(sequence((match_char('.'), repeat_at_least(1, match_if(is_digit))))),
        optional(sequence((
            alternative((match_char('e'), match_char('E'))),
            optional(alternative((match_char('+'), match_char('-')))),
            repeat_at_least(1, match_if(is_digit)),
        ))),
    ))
}

/// A JSON string literal, quotes included.
pub fn string() -> impl Scanner {
    let ordinary = match_if(|c| c != '\\' && c != '"');
    let escape = sequence((
        match_char('\\'),
        alternative((
            match_if(|c| matches!(c, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't')),
            sequence((match_char('u'), repeat_exactly(4, match_if(is_hex_digit)))),
        )),
    ));
    sequence((
        match_char('"'),
        repeat_any(alternative((ordinary, escape))),
        match_char('"'),
    ))
}

/// Strips the quotes from a literal matched by [`string`] and resolves its
/// escape sequences.
///
/// A high surrogate escape directly followed by a low surrogate escape
/// decodes to one supplementary character. Any other surrogate decodes to
/// U+FFFD.
pub fn unescape(literal: &str) -> String {
    let content = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);

    // Most strings have no escapes at all.
    if memchr(b'\\', content.as_bytes()).is_none() {
        return content.to_string();
    }

    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(i) = memchr(b'\\', rest.as_bytes()) {
        out.push_str(&rest[..i]);
        let mut chars = rest[i + 1..].chars();
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let (c, after) = unescape_unicode(chars.as_str());
                out.push(c);
                chars = after.chars();
            }
            Some(other) => out.push(other),
            None => {}
        }
        rest = chars.as_str();
    }
    out.push_str(rest);
    out
}

/// Decodes the code point after a `\u`, pairing surrogates when it can.
/// Returns the character and the input left after it.
fn unescape_unicode(input: &str) -> (char, &str) {
    let Some((high, rest)) = hex4(input) else {
        return (REPLACEMENT, input);
    };
    match high {
        0xD800..=0xDBFF => {
            if let Some((low, after)) = rest.strip_prefix("\\u").and_then(hex4) {
                if (0xDC00..=0xDFFF).contains(&low) {
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return (char::from_u32(code).unwrap_or(REPLACEMENT), after);
                }
            }
            (REPLACEMENT, rest)
        }
        code => (char::from_u32(code).unwrap_or(REPLACEMENT), rest),
    }
}

/// Reads four hex digits, in either case.
fn hex4(input: &str) -> Option<(u32, &str)> {
    let digits = input.get(..4)?;
    let code = u32::from_str_radix(digits, 16).ok()?;
    Some((code, &input[4..]))
}
