//! Rendering of objects back into Lisp syntax.
//!
//! Lists render as `(a b c)`; a chain whose final tail is neither nil nor a pair
//! renders in dotted form, `(a b . c)`. The reader accepts no dotted syntax, so
//! only proper lists read back as what they printed from.
//!
//! Rendering walks an explicit stack rather than recursing,
//! so deeply nested lists do not exhaust the call stack.

use std::fmt::{self, Display, Write};

use super::{Object, Pair, Ptr};

enum Pending<'a> {
    /// An object in head position.
    Value(Ptr<'a>),
    /// The rest of a list, after at least one element has been written.
    Tail(Ptr<'a>),
}

fn write_object(f: &mut impl Write, object: Object<'_>) -> fmt::Result {
    let mut stack = Vec::new();
    let mut next = Some(object);
    loop {
        if let Some(object) = next.take() {
            match object {
                Object::Pair(Pair { car, cdr }) => {
                    f.write_char('(')?;
                    stack.push(Pending::Tail(cdr));
                    stack.push(Pending::Value(car));
                }
                atom => write_atom(f, &atom)?,
            }
        }
        match stack.pop() {
            None => return Ok(()),
            Some(Pending::Value(ptr)) => next = Some(ptr.get()),
            Some(Pending::Tail(ptr)) => match ptr.get() {
                Object::Nil => f.write_char(')')?,
                Object::Pair(Pair { car, cdr }) => {
                    f.write_char(' ')?;
                    stack.push(Pending::Tail(cdr));
                    stack.push(Pending::Value(car));
                }
                atom => {
                    f.write_str(" . ")?;
                    write_atom(f, &atom)?;
                    f.write_char(')')?;
                }
            },
        }
    }
}

fn write_atom(f: &mut impl Write, object: &Object) -> fmt::Result {
    match object {
        Object::Nil => f.write_str("nil"),
        Object::Integer(i) => write!(f, "{i}"),
        Object::Symbol(s) => s.with_name(|name| f.write_str(name)),
        Object::Error(message) => write!(f, "<error: {message}>"),
        Object::NativeProc(_) => f.write_str("<subr>"),
        Object::Closure(_) => f.write_str("<expr>"),
        Object::Pair(_) => unreachable!("pairs are expanded by write_object"),
    }
}

impl Display for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_object(f, self.clone())
    }
}

impl Display for Ptr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_object(f, self.get())
    }
}
