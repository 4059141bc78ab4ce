//! Scope management and the structural type system.
//!
//! Both are services the translator calls while it parses: nothing here walks a
//! tree of its own.

mod scope;
mod semanalysis_error;
mod symbol;
mod typecheck;

#[cfg(test)]
mod scope_tests;

pub use scope::ScopeManager;
pub use semanalysis_error::{ScopeError, TypeError};
pub use symbol::{
    AliasType, ArrayType, Function, Scalar, Slot, Storage, StructType, Symbol, SymbolId,
    SymbolKind, SymbolTable, Variable,
};
pub use typecheck::type_error;
