//! The symbol table: one entry per distinct spelling.
//!
//! Entries are perpetual. A symbol pointer carries its index in this table
//! rather than an arena slot, so two lookups of the same spelling produce
//! identical pointers.

use string_interner::{DefaultStringInterner, DefaultSymbol, Symbol as _};

#[derive(Default)]
pub(super) struct SymbolTable {
    interner: DefaultStringInterner,
}

impl SymbolTable {
    /// Find the index for the spelling, adding it if this is its first use.
    pub(super) fn intern(&mut self, spelling: &str) -> usize {
        let before = self.interner.len();
        let idx = self.interner.get_or_intern(spelling).to_usize();
        if self.interner.len() > before {
            tracing::trace!(spelling, idx, "interned new symbol");
        }
        idx
    }

    pub(super) fn resolve(&self, idx: usize) -> Option<&str> {
        DefaultSymbol::try_from_usize(idx).and_then(|symbol| self.interner.resolve(symbol))
    }

    pub(super) fn len(&self) -> usize {
        self.interner.len()
    }
}
