//! Parsing a single expression from the token stream.
//!
//! Nesting is tracked on an explicit stack of frames rather than the call stack,
//! so deeply nested input cannot overflow it.

use crate::data::{Ptr, ReversedList, Storage};

use super::token::{integer, next_token, skip_spaces, Token};
use super::{ReadErr, ReadResult};

/// An expression that is waiting on the next complete value.
enum Frame<'a> {
    /// Inside parentheses: the elements read so far.
    List(ReversedList<'a>),
    /// After a quote: the next value becomes `(quote value)`.
    Quote,
}

/// Parse one expression from the start of the input.
///
/// Returns the expression and the unconsumed remainder of the input.
pub(super) fn parse<'a, 's>(store: &'a Storage, input: &'s str) -> ReadResult<(Ptr<'a>, &'s str)> {
    let mut stack: Vec<Frame<'a>> = Vec::new();
    let mut text = input;

    loop {
        text = skip_spaces(text);
        let in_list = matches!(stack.last(), Some(Frame::List(_)));

        let mut value = match next_token(text) {
            None if in_list => return Err(ReadErr::UnfinishedList),
            None => return Err(ReadErr::EmptyInput),
            Some((Token::RParen, rest)) if in_list => {
                text = rest;
                let Some(Frame::List(items)) = stack.pop() else {
                    unreachable!("top frame was checked to be a list");
                };
                items.finish()
            }
            Some((Token::RParen, _)) => return Err(ReadErr::UnexpectedClose(text.to_owned())),
            Some((Token::LParen, rest)) => {
                stack.push(Frame::List(ReversedList::new(store)));
                text = rest;
                continue;
            }
            Some((Token::Quote, rest)) => {
                stack.push(Frame::Quote);
                text = rest;
                continue;
            }
            Some((Token::Atom(atom), rest)) => {
                text = rest;
                read_atom(store, atom)
            }
        };

        // Hand the completed value to the frames waiting on it.
        loop {
            match stack.pop() {
                None => return Ok((value, text)),
                Some(Frame::Quote) => value = quote(store, value),
                Some(Frame::List(mut items)) => {
                    items.push(value);
                    stack.push(Frame::List(items));
                    break;
                }
            }
        }
    }
}

/// Classify an atom: an integer if it is one, a symbol otherwise.
fn read_atom<'a>(store: &'a Storage, atom: &str) -> Ptr<'a> {
    match integer(atom) {
        Some(i) => store.make_number(i),
        None => store.make_symbol(atom),
    }
}

/// Build `(quote value)`.
fn quote<'a>(store: &'a Storage, value: Ptr<'a>) -> Ptr<'a> {
    let quote = store.make_symbol("quote");
    store.make_pair(quote, store.make_pair(value, Ptr::nil()))
}
