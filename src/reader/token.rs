//! Module for extracting Lisp tokens from input text.

use crate::data::Integer;

/// A Lisp token.
///
/// Whitespace is skipped separately, by [`skip_spaces`].
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Token<'s> {
    LParen,
    RParen,
    Quote,
    /// A number or symbol: the characters up to the next delimiter.
    Atom(&'s str),
}

mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    pub(super) fn space() -> &'static Regex {
        static SPACE: OnceLock<Regex> = OnceLock::new();
        SPACE.get_or_init(|| {
            Regex::new(r"\A[ \t\r\n]+").expect("could not compile regex for empty space")
        })
    }

    pub(super) fn atom() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            // Anything up to a delimiter: whitespace, a paren, or a quote.
            // Notably, '.' is part of an atom; there is no dotted-pair syntax.
            Regex::new(r"\A[^ \t\r\n()']+").expect("could not compile regex for atom")
        })
    }

    pub(super) fn integer() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            Regex::new(r"\A[+-]?[0-9]+\z").expect("could not compile regex for integer")
        })
    }
}

/// Drop leading whitespace (space, tab, CR, LF).
pub(super) fn skip_spaces(input: &str) -> &str {
    match regex::space().find(input) {
        Some(space) => &input[space.end()..],
        None => input,
    }
}

/// Get the next token from the input, and return the remainder of the input.
///
/// The input must start at a token, i.e. have had whitespace skipped;
/// returns None at end of input.
pub(super) fn next_token(input: &str) -> Option<(Token<'_>, &str)> {
    let token = match *input.as_bytes().first()? {
        b'(' => Token::LParen,
        b')' => Token::RParen,
        b'\'' => Token::Quote,
        _ => {
            let atom = regex::atom().find(input)?;
            return Some((Token::Atom(atom.as_str()), &input[atom.end()..]));
        }
    };
    Some((token, &input[1..]))
}

/// Classify an atom as an integer, if it is one.
///
/// An integer is an optional sign followed by ASCII digits, in the range of
/// [`Integer`]. Anything else, including out-of-range numerals, is not an integer.
pub(super) fn integer(atom: &str) -> Option<Integer> {
    if !regex::integer().is_match(atom) {
        return None;
    }
    atom.parse().ok()
}
