//! Support for reading Lisp expressions from strings.
//!
//! The syntax is minimal: integers, symbols, parenthesized lists, and `'x` as
//! shorthand for `(quote x)`. There is no string or dotted-pair syntax; a `.`
//! is an ordinary atom character.

use std::io::ErrorKind;

use crate::data::{Ptr, ReversedList, Storage};
use parse::parse;
use token::skip_spaces;

mod parse;
mod token;

#[cfg(test)]
#[path = "./reader_test.rs"]
mod reader_test;

/// Error type if a read does not complete.
///
/// A reader may experience a true parsing error, e.g. ")", that no additional input can fix.
/// This is distinct from a reader that gets an unexpected end-of-input, e.g. "(()":
/// it may be that more input will fix the issue. See [`ReadErr::is_incomplete`].
///
/// The `Display` form is the message carried by the error value that [`read`] produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadErr {
    /// The input was empty or only whitespace.
    EmptyInput,
    /// A close paren appeared where an expression was expected.
    /// Carries the input from that paren onwards.
    UnexpectedClose(String),
    /// The input ended inside a list.
    UnfinishedList,
}

impl ReadErr {
    /// Whether more input could complete the expression.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ReadErr::UnfinishedList)
    }
}

impl std::fmt::Display for ReadErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadErr::EmptyInput => write!(f, "empty input"),
            ReadErr::UnexpectedClose(rest) => write!(f, "invalid syntax: {rest}"),
            ReadErr::UnfinishedList => write!(f, "unfinished parenthesis"),
        }
    }
}

impl std::error::Error for ReadErr {}

/// The main result type for this module:
/// a T (expression, remainder, etc), or an error.
pub type ReadResult<T> = Result<T, ReadErr>;

impl From<ReadErr> for std::io::Error {
    fn from(value: ReadErr) -> Self {
        let kind = if value.is_incomplete() {
            ErrorKind::UnexpectedEof
        } else {
            ErrorKind::InvalidInput
        };
        std::io::Error::new(kind, value)
    }
}

/// The outcome of a read: a value, and the input that follows it.
#[derive(Debug, Clone, Copy)]
pub struct ParseState<'a, 's> {
    pub value: Ptr<'a>,
    pub rest: &'s str,
}

/// Read one expression from the start of the input.
///
/// Failures are reported in-band, as an error object with an empty remainder;
/// no partial structure is returned.
pub fn read<'a, 's>(store: &'a Storage, input: &'s str) -> ParseState<'a, 's> {
    match read_expr(store, input) {
        Ok((value, rest)) => ParseState { value, rest },
        Err(err) => {
            tracing::debug!(%err, "read failed");
            ParseState {
                value: store.make_error(err.to_string()),
                rest: "",
            }
        }
    }
}

/// Read one expression from the start of the input,
/// returning it and the unconsumed remainder.
pub fn read_expr<'a, 's>(store: &'a Storage, input: &'s str) -> ReadResult<(Ptr<'a>, &'s str)> {
    let (value, rest) = parse(store, input)?;
    tracing::trace!(consumed = input.len() - rest.len(), "read expression");
    Ok((value, rest))
}

/// Parse the string as a list of Lisp expressions (i.e. a body).
pub fn read_body<'a>(store: &'a Storage, input: &str) -> ReadResult<Ptr<'a>> {
    let mut body = ReversedList::new(store);
    let mut rest = skip_spaces(input);
    while !rest.is_empty() {
        let (value, next) = parse(store, rest)?;
        body.push(value);
        rest = skip_spaces(next);
    }
    Ok(body.finish())
}
