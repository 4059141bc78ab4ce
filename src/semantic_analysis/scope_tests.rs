use super::*;
use crate::lexer::Interner;
use pretty_assertions::assert_eq;

fn interner(names: &[&str]) -> Interner {
    let mut interner = Interner::new();
    for name in names {
        interner.intern(name);
    }
    interner
}

#[test]
fn test_redeclaration_in_same_block() {
    let names = interner(&["x"]);
    let mut symbols = SymbolTable::new();
    let mut scopes = ScopeManager::new(&names);

    scopes.declare(&mut symbols, 0).unwrap();
    let err = scopes.declare(&mut symbols, 0).unwrap_err();
    assert_eq!(ScopeError::Redeclaration("x".into()), err);
}

#[test]
fn test_shadowing_in_inner_block() {
    let names = interner(&["x"]);
    let mut symbols = SymbolTable::new();
    let mut scopes = ScopeManager::new(&names);

    let outer = scopes.declare(&mut symbols, 0).unwrap();
    scopes.enter_block();
    let inner = scopes.declare(&mut symbols, 0).unwrap();

    assert_ne!(outer, inner);
    assert_eq!(Some(inner), scopes.lookup(0));
    assert_eq!(Some(inner), scopes.lookup_local(0));

    scopes.exit_block();
    assert_eq!(Some(outer), scopes.lookup(0));
}

#[test]
fn test_lookup_walks_outward() {
    let names = interner(&["g", "p", "l"]);
    let mut symbols = SymbolTable::new();
    let mut scopes = ScopeManager::new(&names);

    let g = scopes.declare(&mut symbols, 0).unwrap();
    scopes.enter_block();
    let p = scopes.declare(&mut symbols, 1).unwrap();
    scopes.enter_block();
    let l = scopes.declare(&mut symbols, 2).unwrap();

    assert_eq!(2, scopes.level());
    assert_eq!(Some(g), scopes.lookup(0));
    assert_eq!(Some(p), scopes.lookup(1));
    assert_eq!(Some(l), scopes.lookup(2));
    assert_eq!(None, scopes.lookup_local(0));
}

#[test]
fn test_exited_block_names_are_gone() {
    let names = interner(&["t"]);
    let mut symbols = SymbolTable::new();
    let mut scopes = ScopeManager::new(&names);

    scopes.enter_block();
    let t = scopes.declare(&mut symbols, 0).unwrap();
    scopes.exit_block();

    assert!(scopes.is_global());
    assert_eq!(
        Err(ScopeError::NotDeclared("t".into())),
        scopes.resolve(0)
    );
    assert_eq!(Some(0), symbols.get(t).name);
}

#[test]
fn test_declared_symbols_start_undefined() {
    let names = interner(&["v"]);
    let mut symbols = SymbolTable::new();
    let mut scopes = ScopeManager::new(&names);

    let v = scopes.declare(&mut symbols, 0).unwrap();
    assert_eq!(&SymbolKind::Undefined, symbols.kind(v));
    assert!(!symbols.is_type(v));
}
