//! Lisp data types and their storage.
//!
//! All objects live in a [`Storage`] arena owned by the session that reads them.
//! The store provides:
//! - pointer-tagged storage: `make_*` and `put` methods store objects and return
//!   pointers ([`Ptr`]). Pointers carry the type of the object;
//!   [`Ptr::get`] retrieves the stored object.
//! - A symbol table: a persistent, uniquified set of spellings.
//!
//! The supported objects are:
//! -   Nil: the zero pointer. It is never stored, so there is exactly one.
//! -   Integer: a 32-bit signed integer.
//! -   Symbol: an entry in the interned symbol table. Symbols are not stored in
//!     the arena; the pointer carries the table index, so equal spellings give
//!     equal pointers.
//! -   Error: an inert failure message.
//! -   Pair: a pair of pointers to objects.
//! -   NativeProc, Closure: reserved for an evaluator. The reader never
//!     produces them.
//!
//! Objects are immutable once handed out, with one exception: the list
//! reversal used while reading rewrites the tails of pairs it exclusively owns.
//!
//! `Storage` uses interior mutability and is not `Sync`, so interning
//! (find-or-insert) never races.

mod list;
mod objects;
mod print;
mod symbols;
mod tag;

pub use self::objects::*;
pub use self::tag::Tag;

pub(crate) use self::list::ReversedList;

use self::symbols::SymbolTable;

use std::cell::RefCell;
use std::rc::Rc;

/// The spelling that reads as nil rather than as a symbol.
pub const NIL_SPELLING: &str = "nil";

/// Storage allows representing all Lisp objects of a session.
#[derive(Default)]
pub struct Storage {
    objects: RefCell<Vec<StoredValue>>,
    symbols: RefCell<SymbolTable>,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct StorageStats {
    pub objects: usize,
    pub symbols: usize,
}

impl std::ops::Sub for StorageStats {
    type Output = StorageStats;

    fn sub(self, rhs: Self) -> Self::Output {
        StorageStats {
            objects: self.objects - rhs.objects,
            symbols: self.symbols - rhs.symbols,
        }
    }
}

/// Bind is a trait for binding stored types to the storage that holds them:
/// applying the Storage object lifetime to the underlying object.
trait Bind<'a> {
    type Free;

    fn bind(store: &'a Storage, free: Self::Free) -> Self;
}

impl Storage {
    fn bind<'a, T: Bind<'a>>(&'a self, raw: T::Free) -> T {
        T::bind(self, raw)
    }

    pub fn current_stats(&self) -> StorageStats {
        StorageStats {
            objects: self.objects.borrow().len(),
            symbols: self.symbols.borrow().len(),
        }
    }

    pub fn make_number(&self, value: Integer) -> Ptr<'_> {
        self.put(value)
    }

    /// Add a symbol to the symbol table,
    /// or return the pointer to this symbol if already present.
    ///
    /// The spelling "nil" is reserved: it gives the nil pointer.
    pub fn make_symbol(&self, spelling: &str) -> Ptr<'_> {
        if spelling == NIL_SPELLING {
            return Ptr::nil();
        }
        let idx = self.symbols.borrow_mut().intern(spelling);
        self.bind(StoredPtr::new(idx, Tag::Symbol))
    }

    pub fn make_error(&self, message: impl Into<Rc<str>>) -> Ptr<'_> {
        self.put(Object::Error(message.into()))
    }

    /// Allocate a fresh pair.
    pub fn make_pair<'a>(&'a self, head: Ptr<'a>, tail: Ptr<'a>) -> Ptr<'a> {
        self.put(Pair::cons(head, tail))
    }

    pub fn put_native(&self, builtin: Builtin) -> Ptr<'_> {
        self.put(NativeProc::new(builtin))
    }

    /// Create a closure from an argument list `(params . body)` and a captured environment.
    pub fn make_closure<'a>(&'a self, args: Ptr<'a>, env: Ptr<'a>) -> Ptr<'a> {
        self.put(Closure {
            params: args.safe_head(),
            body: args.safe_tail(),
            env,
        })
    }

    /// Stores the Lisp object in storage.
    pub fn put<'a>(&'a self, value: impl Into<Object<'a>>) -> Ptr<'a> {
        match value.into() {
            Object::Nil => Ptr::nil(),
            Object::Symbol(symbol) => {
                debug_assert!(
                    std::ptr::eq(symbol.store(), self),
                    "symbols are bound to the store that interned them"
                );
                self.bind(StoredPtr::new(symbol.idx(), Tag::Symbol))
            }
            object => {
                let (stored, tag) = object.into();
                let mut objects = self.objects.borrow_mut();
                let slot = objects.len();
                objects.push(stored);
                self.bind(StoredPtr::new(slot, tag))
            }
        }
    }

    pub fn get<'a>(&'a self, ptr: Ptr<'a>) -> Object<'a> {
        match ptr.tag() {
            Tag::Nil => Object::Nil,
            Tag::Symbol => Object::Symbol(self.bind(ptr.idx())),
            _ => {
                let stored = {
                    let objects = self.objects.borrow();
                    let idx = ptr.idx();
                    assert!(idx < objects.len(), "pointer {ptr:?} is not from this store");
                    objects[idx].clone()
                };
                Object::bind(self, (ptr.raw, stored))
            }
        }
    }

    /// Replace the tail of the given pair.
    /// This is the only form of update permitted;
    /// it is reserved for list construction, before the list is published.
    pub(crate) fn set_cdr<'a>(&'a self, pair: Ptr<'a>, cdr: Ptr<'a>) {
        assert!(pair.is_pair(), "cannot set the tail of {pair:?}");
        let mut objects = self.objects.borrow_mut();
        match &mut objects[pair.idx()] {
            StoredValue::Pair(stored) => stored.cdr = cdr.raw,
            _ => unreachable!("pair pointer {pair:?} refers to a non-pair slot"),
        }
    }

    /// Apply `f` to the spelling of the symbol at the given table index.
    fn with_symbol_name<R>(&self, idx: usize, f: impl FnOnce(&str) -> R) -> R {
        let symbols = self.symbols.borrow();
        let name = symbols
            .resolve(idx)
            .expect("All symbol pointers bound to this store should be present in the symbol table");
        f(name)
    }
}

#[derive(Clone)]
enum StoredValue {
    Integer(Integer),
    Error(Rc<str>),
    Pair(StoredPair),
    NativeProc(NativeProc),
    Closure(StoredClosure),
}

#[derive(Clone, Copy)]
struct StoredPair {
    car: StoredPtr,
    cdr: StoredPtr,
}

#[derive(Clone, Copy)]
struct StoredClosure {
    params: StoredPtr,
    body: StoredPtr,
    env: StoredPtr,
}

/// A type tag plus an index: into the arena, or into the symbol table for symbols.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct StoredPtr {
    combined_tag: u32,
}

impl Default for StoredPtr {
    fn default() -> Self {
        Self::new(0, Tag::Nil)
    }
}

impl StoredPtr {
    /// Indices must fit in the bits above the tag.
    const MAX_IDX: usize = (u32::MAX >> 3) as usize;

    fn new(idx: usize, tag: Tag) -> Self {
        assert!(
            idx <= Self::MAX_IDX,
            "index {idx} exceeds the pointer limit of {}",
            Self::MAX_IDX
        );
        StoredPtr {
            combined_tag: ((idx as u32) << 3) | (tag as u32),
        }
    }

    #[inline]
    fn tag(&self) -> Tag {
        ((self.combined_tag & 0b111) as u8).into()
    }

    #[inline]
    fn idx(&self) -> usize {
        (self.combined_tag as usize & !0b111) >> 3
    }
}

impl std::fmt::Display for StoredPtr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.tag().short_name(), self.idx())
    }
}

impl std::fmt::Debug for StoredPtr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredPtr")
            .field("idx", &self.idx())
            .field("tag", &self.tag())
            .finish()
    }
}
