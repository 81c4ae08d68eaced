//! Per-program-unit symbol table.
//!
//! A `Scope` owns an insertion-ordered mapping from qualified symbol name to
//! its type descriptor. Symbol nodes hold a weak `ScopeRef` back into the
//! table, so a scope's table can store bound member nodes without creating
//! an ownership cycle; upgrading the weak handle is the explicit liveness
//! check a node performs on every type access.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::types::types::SymbolType;

/// Non-owning handle from a symbol node back to its scope's table.
pub type ScopeRef = Weak<RefCell<SymbolTable>>;

/// The ordered name -> type mapping owned by a scope.
///
/// Insertion order is preserved so declarations can be re-emitted
/// deterministically.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, SymbolType>,
    parent: Option<ScopeRef>,
}

/// Owning handle to a symbol table, one per program unit being processed.
///
/// Cloning a `Scope` clones the handle, not the table: all clones observe
/// and mutate the same symbol state. The table is dropped with the last
/// owning handle, at which point outstanding `ScopeRef`s dangle safely.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    table: Rc<RefCell<SymbolTable>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// A scope nested inside `parent`, e.g. a contained subroutine inside a
    /// module. Recursive lookups fall through to the parent's table.
    pub fn with_parent(parent: &Scope) -> Self {
        let scope = Scope::new();
        scope.table.borrow_mut().parent = Some(parent.reference());
        scope
    }

    /// The weak handle stored on symbol nodes.
    pub fn reference(&self) -> ScopeRef {
        Rc::downgrade(&self.table)
    }

    /// Recovers an owning handle from a node's weak reference, if the scope
    /// is still alive.
    pub fn from_ref(reference: &ScopeRef) -> Option<Scope> {
        reference.upgrade().map(|table| Scope { table })
    }

    /// Looks up a name's type descriptor.
    ///
    /// Non-recursive lookup searches only this scope's table; recursive
    /// lookup also walks the enclosing scopes. An undeclared name yields
    /// `None` rather than an error, which is what tolerates forward
    /// references in block-structured source.
    pub fn lookup(&self, name: &str, recursive: bool) -> Option<SymbolType> {
        let table = self.table.borrow();
        if let Some(entry) = table.symbols.get(name) {
            return Some(entry.clone());
        }

        if recursive {
            if let Some(parent) = table.parent.as_ref().and_then(Scope::from_ref) {
                return parent.lookup(name, true);
            }
        }

        None
    }

    /// Inserts a type for `name` only if the table has no entry yet.
    pub fn set_default(&self, name: &str, entry: SymbolType) {
        let mut table = self.table.borrow_mut();
        if !table.symbols.contains_key(name) {
            table.symbols.insert(String::from(name), entry);
        }
    }

    /// Inserts or overwrites the type for `name`.
    ///
    /// Overwriting is deliberate ("last writer wins"): a name may have been
    /// referenced before its declaration was processed, and the latest type
    /// information is treated as the most up to date.
    pub fn assign(&self, name: &str, entry: SymbolType) {
        self.table
            .borrow_mut()
            .symbols
            .insert(String::from(name), entry);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.borrow().symbols.contains_key(name)
    }

    /// Symbol names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.table.borrow().symbols.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.table.borrow().symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().symbols.is_empty()
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
    }
}
