use std::rc::Rc;

use super::{Bind, Storage, StoredClosure, StoredPair, StoredPtr, StoredValue, Tag};

/// Enum for a Lisp object.
#[derive(Debug, Clone)]
pub enum Object<'a> {
    Nil,
    Integer(Integer),
    Symbol(Symbol<'a>),
    Error(Rc<str>),
    Pair(Pair<'a>),
    NativeProc(NativeProc),
    Closure(Closure<'a>),
}

pub type Integer = i32;

/// A function implemented by the host, for use by an evaluator.
pub type Builtin = for<'a> fn(&'a Storage, Ptr<'a>) -> Ptr<'a>;

/// An ID for a stored object: a combination of pointer and type-tag.
///
/// Equality is identity: two pointers are equal when they refer to the same
/// object in the same store.
#[derive(Clone, Copy)]
pub struct Ptr<'a> {
    pub(crate) raw: StoredPtr,
    // Nil pointers can be unassociated with a store;
    // this permits the default constructor.
    store: Option<&'a Storage>,
}

impl PartialEq for Ptr<'_> {
    fn eq(&self, other: &Self) -> bool {
        let raw = self.raw == other.raw;
        raw && match (self.store, other.store) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Ptr<'_> {}

impl std::fmt::Debug for Ptr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Id")
            .field("idx", &self.idx())
            .field("tag", &self.tag())
            .finish()
    }
}

impl Default for Ptr<'_> {
    fn default() -> Self {
        Ptr {
            raw: StoredPtr::default(),
            store: None,
        }
    }
}

impl<'a> Ptr<'a> {
    pub fn nil() -> Ptr<'a> {
        Default::default()
    }

    pub fn get(&self) -> Object<'a> {
        if let Some(store) = self.store {
            store.get(*self)
        } else {
            assert!(self.is_nil());
            Object::Nil
        }
    }

    /// The head of a pair; nil for anything else.
    pub fn safe_head(&self) -> Ptr<'a> {
        self.get().as_pair().map(|p| p.car).unwrap_or_default()
    }

    /// The tail of a pair; nil for anything else.
    pub fn safe_tail(&self) -> Ptr<'a> {
        self.get().as_pair().map(|p| p.cdr).unwrap_or_default()
    }

    /// Iterate over the heads of a pair chain.
    /// A non-nil terminal tail is not yielded.
    pub fn iter(&self) -> ListIter<'a> {
        ListIter { next: *self }
    }

    /// Structural equality: same shape, equal numbers, identical symbols, equal error messages.
    ///
    /// Reserved variants compare by identity.
    pub fn equal(&self, other: Ptr<'_>) -> bool {
        let mut pending = vec![(*self, other)];
        while let Some((a, b)) = pending.pop() {
            let same = match (a.get(), b.get()) {
                (Object::Nil, Object::Nil) => true,
                (Object::Integer(x), Object::Integer(y)) => x == y,
                (Object::Symbol(x), Object::Symbol(y)) => x.with_name(|x| y.with_name(|y| x == y)),
                (Object::Error(x), Object::Error(y)) => x == y,
                (Object::Pair(x), Object::Pair(y)) => {
                    pending.push((x.cdr, y.cdr));
                    pending.push((x.car, y.car));
                    true
                }
                (Object::NativeProc(_), Object::NativeProc(_))
                | (Object::Closure(_), Object::Closure(_)) => a.raw == b.raw,
                _ => false,
            };
            if !same {
                return false;
            }
        }
        true
    }
}

impl Ptr<'_> {
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.tag() == Tag::Nil
    }
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.tag() == Tag::Integer
    }
    #[inline]
    pub fn is_symbol(&self) -> bool {
        self.tag() == Tag::Symbol
    }
    #[inline]
    pub fn is_error(&self) -> bool {
        self.tag() == Tag::Error
    }
    #[inline]
    pub fn is_pair(&self) -> bool {
        self.tag() == Tag::Pair
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.raw.tag()
    }

    #[inline]
    pub(super) fn idx(&self) -> usize {
        self.raw.idx()
    }
}

/// Iterator over the elements of a list.
pub struct ListIter<'a> {
    next: Ptr<'a>,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = Ptr<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let Pair { car, cdr } = self.next.get().as_pair()?;
        self.next = cdr;
        Some(car)
    }
}

/// Destructure a proper list of exactly N elements.
impl<'a, const N: usize> TryFrom<Ptr<'a>> for [Ptr<'a>; N] {
    type Error = Ptr<'a>;

    fn try_from(list: Ptr<'a>) -> Result<Self, Self::Error> {
        let mut result = [Ptr::nil(); N];
        let mut rest = list;
        for slot in result.iter_mut() {
            let Some(Pair { car, cdr }) = rest.get().as_pair() else {
                return Err(list);
            };
            *slot = car;
            rest = cdr;
        }
        if rest.is_nil() {
            Ok(result)
        } else {
            Err(list)
        }
    }
}

impl<'a> Object<'a> {
    fn tag(&self) -> Tag {
        match self {
            Object::Nil => Tag::Nil,
            Object::Integer(_) => Tag::Integer,
            Object::Symbol(_) => Tag::Symbol,
            Object::Error(_) => Tag::Error,
            Object::Pair(_) => Tag::Pair,
            Object::NativeProc(_) => Tag::NativeProc,
            Object::Closure(_) => Tag::Closure,
        }
    }

    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Object::Integer(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol<'a>> {
        match self {
            Object::Symbol(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<Rc<str>> {
        match self {
            Object::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<Pair<'a>> {
        match self {
            Object::Pair(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<Closure<'a>> {
        match self {
            Object::Closure(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<Integer> for Object<'_> {
    fn from(value: Integer) -> Self {
        Object::Integer(value)
    }
}

impl<'a> From<Pair<'a>> for Object<'a> {
    fn from(value: Pair<'a>) -> Self {
        Object::Pair(value)
    }
}

impl<'a> From<Symbol<'a>> for Object<'a> {
    fn from(value: Symbol<'a>) -> Self {
        Object::Symbol(value)
    }
}

impl From<NativeProc> for Object<'_> {
    fn from(value: NativeProc) -> Self {
        Object::NativeProc(value)
    }
}

impl<'a> From<Closure<'a>> for Object<'a> {
    fn from(value: Closure<'a>) -> Self {
        Object::Closure(value)
    }
}

impl From<Object<'_>> for (StoredValue, Tag) {
    fn from(object: Object<'_>) -> Self {
        let tag = object.tag();
        let stored = match object {
            Object::Nil => unreachable!("Do not serialize nil"),
            Object::Symbol(_) => unreachable!("Symbols are interned, not stored"),
            Object::Integer(i) => StoredValue::Integer(i),
            Object::Error(message) => StoredValue::Error(message),
            Object::Pair(p) => StoredValue::Pair(StoredPair {
                car: p.car.raw,
                cdr: p.cdr.raw,
            }),
            Object::NativeProc(f) => StoredValue::NativeProc(f),
            Object::Closure(c) => StoredValue::Closure(StoredClosure {
                params: c.params.raw,
                body: c.body.raw,
                env: c.env.raw,
            }),
        };
        (stored, tag)
    }
}

impl<'a> Bind<'a> for Object<'a> {
    type Free = (StoredPtr, StoredValue);

    fn bind(store: &'a Storage, free: Self::Free) -> Self {
        let (p, v) = free;

        match (p.tag(), v) {
            (Tag::Nil, _) => Object::Nil,
            (Tag::Symbol, _) => Object::Symbol(Symbol::bind(store, p.idx())),
            (Tag::Integer, StoredValue::Integer(i)) => Object::Integer(i),
            (Tag::Error, StoredValue::Error(message)) => Object::Error(message),
            (Tag::Pair, StoredValue::Pair(pair)) => Object::Pair(Pair::bind(store, pair)),
            (Tag::NativeProc, StoredValue::NativeProc(f)) => Object::NativeProc(f),
            (Tag::Closure, StoredValue::Closure(c)) => Object::Closure(Closure {
                params: store.bind(c.params),
                body: store.bind(c.body),
                env: store.bind(c.env),
            }),
            (tag, _) => panic!("tag {tag:?} does not match stored value, possible data corruption"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pair<'a> {
    pub car: Ptr<'a>,
    pub cdr: Ptr<'a>,
}

impl<'a> Pair<'a> {
    pub fn cons(car: Ptr<'a>, cdr: Ptr<'a>) -> Self {
        Self { car, cdr }
    }
}

#[derive(Clone, Copy)]
pub struct Symbol<'a> {
    /// Symbols are represented by their index in the symbol table.
    idx: usize,
    store: &'a Storage,
}

impl<'a> Symbol<'a> {
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub(super) fn store(&self) -> &'a Storage {
        self.store
    }

    pub fn name(&self) -> String {
        self.with_name(str::to_owned)
    }

    /// Apply `f` to the spelling of the symbol, without copying it.
    pub fn with_name<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        self.store.with_symbol_name(self.idx, f)
    }
}

impl std::fmt::Debug for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_name(|name| write!(f, "{}#{}", name, self.idx))
    }
}

impl PartialEq for Symbol<'_> {
    fn eq(&self, other: &Self) -> bool {
        let idx_eq = self.idx == other.idx;
        idx_eq && std::ptr::eq(self.store, other.store)
    }
}

impl Eq for Symbol<'_> {}

/// A host function, reserved for an evaluator.
#[derive(Clone, Copy)]
pub struct NativeProc {
    builtin: Builtin,
}

impl NativeProc {
    pub fn new(builtin: Builtin) -> Self {
        NativeProc { builtin }
    }

    pub fn call<'a>(&self, store: &'a Storage, args: Ptr<'a>) -> Ptr<'a> {
        (self.builtin)(store, args)
    }
}

impl std::fmt::Debug for NativeProc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NativeProc")
    }
}

/// A user-defined procedure, reserved for an evaluator.
#[derive(Debug, Clone, Copy)]
pub struct Closure<'a> {
    pub params: Ptr<'a>,
    pub body: Ptr<'a>,
    pub env: Ptr<'a>,
}

impl<'a> Bind<'a> for Symbol<'a> {
    type Free = usize;

    fn bind(store: &'a Storage, raw: Self::Free) -> Self {
        Self { idx: raw, store }
    }
}

impl<'a> Bind<'a> for Ptr<'a> {
    type Free = StoredPtr;

    fn bind(store: &'a Storage, raw: Self::Free) -> Self {
        Self {
            raw,
            store: if raw.tag() == Tag::Nil { None } else { Some(store) },
        }
    }
}

impl<'a> Bind<'a> for Pair<'a> {
    type Free = StoredPair;

    fn bind(store: &'a Storage, raw: Self::Free) -> Self {
        Self {
            car: Ptr::bind(store, raw.car),
            cdr: Ptr::bind(store, raw.cdr),
        }
    }
}
