//! List construction by prepend-then-reverse.
//!
//! Elements are consed onto the front of an accumulator, O(1) each,
//! which leaves them in reverse order; the finished chain is then reversed
//! in place, reusing its pairs.

use super::{Object, Pair, Ptr, Storage};

/// A list under construction, held in reverse order.
///
/// The accumulator chain is private to the builder: nothing else can hold its
/// pairs before [`ReversedList::finish`], so reversing in place is safe.
pub(crate) struct ReversedList<'a> {
    store: &'a Storage,
    head: Ptr<'a>,
    len: usize,
}

impl<'a> ReversedList<'a> {
    pub(crate) fn new(store: &'a Storage) -> Self {
        ReversedList {
            store,
            head: Ptr::nil(),
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, value: Ptr<'a>) {
        self.head = self.store.make_pair(value, self.head);
        self.len += 1;
    }

    /// Complete the list, in the order elements were pushed.
    pub(crate) fn finish(self) -> Ptr<'a> {
        tracing::trace!(len = self.len, "completed list");
        reverse_in_place(self.store, self.head)
    }
}

/// Reverse a pair chain by redirecting each tail to the previously visited pair.
///
/// The caller gives up `list`: its pairs are rewritten.
/// Walking stops at the first non-pair; that terminal value is dropped, so a
/// non-pair input gives nil.
pub(crate) fn reverse_in_place<'a>(store: &'a Storage, list: Ptr<'a>) -> Ptr<'a> {
    let mut reversed = Ptr::nil();
    let mut rest = list;
    while let Object::Pair(Pair { cdr, .. }) = rest.get() {
        store.set_cdr(rest, reversed);
        reversed = rest;
        rest = cdr;
    }
    reversed
}
