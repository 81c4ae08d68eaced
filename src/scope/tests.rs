//! Unit tests for the scope module.
//!
//! This module contains tests for symbol table lookup, insertion ordering
//! and the weak scope handle held by symbol nodes.

use crate::scope::scope::Scope;
use crate::types::types::{DataType, SymbolType};

#[test]
fn test_lookup_missing_name_returns_none() {
    let scope = Scope::new();

    assert!(scope.lookup("zq", false).is_none());
    assert!(scope.lookup("zq", true).is_none());
}

#[test]
fn test_assign_and_lookup() {
    let scope = Scope::new();
    scope.assign("x", SymbolType::new(DataType::Real));

    let entry = scope.lookup("x", false).unwrap();
    assert_eq!(entry.dtype, DataType::Real);
}

#[test]
fn test_assign_overwrites() {
    let scope = Scope::new();
    scope.assign("x", SymbolType::new(DataType::Deferred));
    scope.assign("x", SymbolType::new(DataType::Integer));

    assert_eq!(scope.lookup("x", false).unwrap().dtype, DataType::Integer);
}

#[test]
fn test_set_default_does_not_overwrite() {
    let scope = Scope::new();
    scope.assign("x", SymbolType::new(DataType::Logical));
    scope.set_default("x", SymbolType::new(DataType::Integer));

    assert_eq!(scope.lookup("x", false).unwrap().dtype, DataType::Logical);
}

#[test]
fn test_set_default_inserts_when_absent() {
    let scope = Scope::new();
    scope.set_default("x", SymbolType::new(DataType::Deferred));

    assert!(scope.lookup("x", false).unwrap().is_deferred());
}

#[test]
fn test_recursive_lookup_searches_parent() {
    let outer = Scope::new();
    outer.assign("jprb", SymbolType::new(DataType::Integer));
    let inner = Scope::with_parent(&outer);

    assert!(inner.lookup("jprb", false).is_none());
    assert_eq!(
        inner.lookup("jprb", true).unwrap().dtype,
        DataType::Integer
    );
}

#[test]
fn test_recursive_lookup_prefers_inner_entry() {
    let outer = Scope::new();
    outer.assign("n", SymbolType::new(DataType::Integer));
    let inner = Scope::with_parent(&outer);
    inner.assign("n", SymbolType::new(DataType::Real));

    assert_eq!(inner.lookup("n", true).unwrap().dtype, DataType::Real);
}

#[test]
fn test_names_preserve_insertion_order() {
    let scope = Scope::new();
    scope.assign("klon", SymbolType::new(DataType::Integer));
    scope.assign("klev", SymbolType::new(DataType::Integer));
    scope.assign("ptemp", SymbolType::new(DataType::Real));
    scope.assign("ldone", SymbolType::new(DataType::Logical));

    assert_eq!(scope.names(), vec!["klon", "klev", "ptemp", "ldone"]);
}

#[test]
fn test_reference_upgrades_while_scope_alive() {
    let scope = Scope::new();
    let reference = scope.reference();

    let recovered = Scope::from_ref(&reference).unwrap();
    assert_eq!(recovered, scope);
}

#[test]
fn test_reference_dangles_after_drop() {
    let reference = {
        let scope = Scope::new();
        scope.reference()
    };

    assert!(Scope::from_ref(&reference).is_none());
}

#[test]
fn test_clones_share_the_table() {
    let scope = Scope::new();
    let alias = scope.clone();
    alias.assign("x", SymbolType::new(DataType::Real));

    assert!(scope.contains("x"));
    assert_eq!(scope.len(), 1);
}

#[test]
fn test_parent_scope_dropped() {
    let inner = {
        let outer = Scope::new();
        outer.assign("n", SymbolType::new(DataType::Integer));
        Scope::with_parent(&outer)
    };

    // The enclosing scope is gone; recursive lookup degrades to local.
    assert!(inner.lookup("n", true).is_none());
}
