//! Composable scanning primitives.
//!
//! A `Scanner` looks at the start of a `&str` and either recognizes a
//! prefix of it or fails. Scanners never copy or mutate their input: a
//! successful scan returns a sub-slice of the input, so a failed
//! `Sequence` has nothing to roll back.
//!
//! Small scanners are combined into larger ones with the structs in this
//! module, usually through the constructor functions:
//!
//! ```
//! use scanjson::scanner::{match_char, match_if, repeat_any, sequence, Scanner};
//!
//! let hex = sequence((
//!     match_char('0'),
//!     match_char('x'),
//!     repeat_any(match_if(|c| c.is_ascii_hexdigit())),
//! ));
//! assert_eq!(hex.scan("0x1fz"), Some("0x1f"));
//! assert_eq!(hex.scan("1f"), None);
//! ```

/// Recognizes a prefix of its input.
///
/// `None` means the scanner failed. `Some("")` means it succeeded without
/// consuming anything, which is different from failing.
pub trait Scanner {
    /// Returns the recognized prefix of `input`, or `None` on failure.
    fn scan<'a>(&self, input: &'a str) -> Option<&'a str>;
}

impl<S: Scanner + ?Sized> Scanner for &S {
    fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
        (**self).scan(input)
    }
}

impl<S: Scanner + ?Sized> Scanner for Box<S> {
    fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
        (**self).scan(input)
    }
}

/// Matches one character satisfying a predicate.
#[derive(Debug, Clone, Copy)]
pub struct MatchIf<F>(F);

impl<F: Fn(char) -> bool> Scanner for MatchIf<F> {
    #[inline]
    fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
        let c = input.chars().next()?;
        if (self.0)(c) {
            Some(&input[..c.len_utf8()])
        } else {
            None
        }
    }
}

/// Matches the scanners of a tuple one after another.
#[derive(Debug, Clone, Copy)]
pub struct Sequence<T>(T);

/// Matches the first scanner of a tuple that succeeds.
#[derive(Debug, Clone, Copy)]
pub struct Alternative<T>(T);

// Each arity gets its own impl so that the members can be different types.
macro_rules! tuple_scanners {
    ($($ty:ident $var:ident),+) => {
        impl<$($ty: Scanner),+> Scanner for Sequence<($($ty,)+)> {
            fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
                let ($($var,)+) = &self.0;
                let mut len = 0;
                $(
                    len += $var.scan(&input[len..])?.len();
                )+
                Some(&input[..len])
            }
        }

        impl<$($ty: Scanner),+> Scanner for Alternative<($($ty,)+)> {
            fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
                let ($($var,)+) = &self.0;
                $(
                    if let Some(matched) = $var.scan(input) {
                        return Some(matched);
                    }
                )+
                None
            }
        }
    };
}

tuple_scanners!(A a);
tuple_scanners!(A a, B b);
tuple_scanners!(A a, B b, C c);
tuple_scanners!(A a, B b, C c, D d);
tuple_scanners!(A a, B b, C c, D d, E e);
tuple_scanners!(A a, B b, C c, D d, E e, F f);
tuple_scanners!(A a, B b, C c, D d, E e, F f, G g);
tuple_scanners!(A a, B b, C c, D d, E e, F f, G g, H h);

/// Matches its scanner zero or more times. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct RepeatAny<S>(S);

impl<S: Scanner> Scanner for RepeatAny<S> {
    fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
        let mut len = 0;
        while let Some(matched) = self.0.scan(&input[len..]) {
            // A zero-width match would repeat forever.
            if matched.is_empty() {
                break;
            }
            len += matched.len();
        }
        Some(&input[..len])
    }
}

/// Matches its scanner exactly `count` times in a row.
#[derive(Debug, Clone, Copy)]
pub struct RepeatExactly<S> {
    count: usize,
    scanner: S,
}

impl<S: Scanner> Scanner for RepeatExactly<S> {
    fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
        let mut len = 0;
        for _ in 0..self.count {
            len += self.scanner.scan(&input[len..])?.len();
        }
        Some(&input[..len])
    }
}

/// Matches its scanner at least `count` times, then as many more as it can.
#[derive(Debug, Clone, Copy)]
pub struct RepeatAtLeast<S> {
    count: usize,
    scanner: S,
}

impl<S: Scanner> Scanner for RepeatAtLeast<S> {
    fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
        let required = RepeatExactly {
            count: self.count,
            scanner: &self.scanner,
        }
        .scan(input)?;
        let rest = RepeatAny(&self.scanner).scan(&input[required.len()..])?;
        Some(&input[..required.len() + rest.len()])
    }
}

/// Matches its scanner once if it can. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct Optional<S>(S);

impl<S: Scanner> Scanner for Optional<S> {
    fn scan<'a>(&self, input: &'a str) -> Option<&'a str> {
        Some(self.0.scan(input).unwrap_or(&input[..0]))
    }
}

/// One character for which `predicate` holds.
pub fn match_if<F: Fn(char) -> bool>(predicate: F) -> MatchIf<F> {
    MatchIf(predicate)
}

/// Exactly the character `expected`.
pub fn match_char(expected: char) -> MatchIf<impl Fn(char) -> bool + Copy> {
    MatchIf(move |c: char| c == expected)
}

/// One Unicode whitespace character.
pub fn match_space() -> MatchIf<fn(char) -> bool> {
    MatchIf(char::is_whitespace as fn(char) -> bool)
}

/// Every scanner of the tuple, in order, each on what the previous left.
pub fn sequence<T>(scanners: T) -> Sequence<T> {
    Sequence(scanners)
}

/// The first scanner of the tuple that matches the input.
pub fn alternative<T>(scanners: T) -> Alternative<T> {
    Alternative(scanners)
}

pub fn repeat_any<S: Scanner>(scanner: S) -> RepeatAny<S> {
    RepeatAny(scanner)
}

pub fn repeat_exactly<S: Scanner>(count: usize, scanner: S) -> RepeatExactly<S> {
    RepeatExactly { count, scanner }
}

pub fn repeat_at_least<S: Scanner>(count: usize, scanner: S) -> RepeatAtLeast<S> {
    RepeatAtLeast { count, scanner }
}

pub fn optional<S: Scanner>(scanner: S) -> Optional<S> {
    Optional(scanner)
}
