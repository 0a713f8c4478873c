//! Tags for Lisp object pointers.
//!
//! This is kept as a separate module so the u8 repr is not exposed.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tag {
    Nil = Self::NIL,
    Integer = Self::INTEGER,
    Symbol = Self::SYMBOL,
    Error = Self::ERROR,
    Pair = Self::PAIR,

    // Reserved for an evaluator.
    NativeProc = Self::NATIVE_PROC,
    Closure = Self::CLOSURE,
}

impl Tag {
    const NIL: u8 = 0;
    const INTEGER: u8 = 1;
    const SYMBOL: u8 = 2;
    const ERROR: u8 = 3;
    const PAIR: u8 = 4;
    const NATIVE_PROC: u8 = 5;
    const CLOSURE: u8 = 6;

    /// Short name used when displaying raw pointers.
    pub(super) fn short_name(self) -> &'static str {
        match self {
            Tag::Nil => "nil",
            Tag::Integer => "int",
            Tag::Symbol => "sym",
            Tag::Error => "err",
            Tag::Pair => "obj",
            Tag::NativeProc => "sys",
            Tag::Closure => "fun",
        }
    }
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        match value {
            Self::NIL => Tag::Nil,
            Self::INTEGER => Tag::Integer,
            Self::SYMBOL => Tag::Symbol,
            Self::ERROR => Tag::Error,
            Self::PAIR => Tag::Pair,
            Self::NATIVE_PROC => Tag::NativeProc,
            Self::CLOSURE => Tag::Closure,
            v => unreachable!("invalid tag value {v}"),
        }
    }
}
