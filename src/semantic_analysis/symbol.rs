//! Symbols and the arena that owns them.
//!
//! Every declared name becomes a [Symbol] in the [SymbolTable]. Symbols refer to
//! each other (a variable to its type, an array type to its element type, ...)
//! through [SymbolId]s, so the table is the only owner. The built-in scalar types
//! and the Universal wildcard are allocated first, at fixed ids.

use crate::lexer::Name;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// Storage class of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Slot in the global area, addressed with `LOAD_GLOBAL_ADDR`.
    Global,
    /// Slot in the activation frame of the enclosing function, addressed with `LOAD_ADDR`.
    Frame,
}

/// Typed storage slot shared by variables, parameters and struct fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub ty: SymbolId,
    /// Offset within the frame, the global area or the enclosing struct.
    pub index: usize,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    pub slot: Slot,
    pub storage: Storage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub return_type: SymbolId,
    pub params: Vec<SymbolId>,
    /// Storage units taken by the parameters.
    pub params_num: usize,
    /// Running count of frame slots for parameters and locals.
    pub vars_num: usize,
    /// Function ordinal, in source order. Used as the entry label.
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayType {
    pub element_type: SymbolId,
    pub elements_num: usize,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    pub fields: Vec<SymbolId>,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasType {
    pub base_type: SymbolId,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Integer,
    Char,
    Bool,
    String,
}

impl Scalar {
    pub fn spelling(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Char => "char",
            Self::Bool => "boolean",
            Self::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// Declared, but its declaration is not fully parsed yet.
    Undefined,
    Variable(Variable),
    Parameter(Slot),
    Field(Slot),
    Function(Function),
    ArrayType(ArrayType),
    StructType(StructType),
    AliasType(AliasType),
    ScalarType(Scalar),
    /// Matches any type during equivalence checks.
    Universal,
}

impl SymbolKind {
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::ArrayType(_)
                | Self::StructType(_)
                | Self::AliasType(_)
                | Self::ScalarType(_)
                | Self::Universal
        )
    }

    /// Storage slot of a variable, parameter or field.
    pub fn slot(&self) -> Option<&Slot> {
        match self {
            Self::Variable(Variable { slot, .. }) | Self::Parameter(slot) | Self::Field(slot) => {
                Some(slot)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// `None` only for the built-in types.
    pub name: Option<Name>,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub const INTEGER: SymbolId = SymbolId::from_raw(0);
    pub const CHAR: SymbolId = SymbolId::from_raw(1);
    pub const BOOL: SymbolId = SymbolId::from_raw(2);
    pub const STRING: SymbolId = SymbolId::from_raw(3);
    pub const UNIVERSAL: SymbolId = SymbolId::from_raw(4);

    pub fn new() -> Self {
        let builtin = |kind| Symbol { name: None, kind };
        let symbols = vec![
            builtin(SymbolKind::ScalarType(Scalar::Integer)),
            builtin(SymbolKind::ScalarType(Scalar::Char)),
            builtin(SymbolKind::ScalarType(Scalar::Bool)),
            builtin(SymbolKind::ScalarType(Scalar::String)),
            builtin(SymbolKind::Universal),
        ];
        Self { symbols }
    }

    /// Allocates a named symbol whose kind is not fixed yet.
    pub fn alloc(&mut self, name: Name) -> SymbolId {
        let raw = u32::try_from(self.symbols.len()).unwrap_or(u32::MAX);
        self.symbols.push(Symbol {
            name: Some(name),
            kind: SymbolKind::Undefined,
        });
        SymbolId::from_raw(raw)
    }

    /// Fixes the kind of a symbol once its declaration is fully parsed.
    pub fn define(&mut self, id: SymbolId, kind: SymbolKind) {
        let symbol = &mut self.symbols[id.index()];
        debug_assert!(
            symbol.kind == SymbolKind::Undefined,
            "kind of {id:?} set twice"
        );
        symbol.kind = kind;
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn kind(&self, id: SymbolId) -> &SymbolKind {
        &self.get(id).kind
    }

    pub fn function_mut(&mut self, id: SymbolId) -> Option<&mut Function> {
        match &mut self.symbols[id.index()].kind {
            SymbolKind::Function(function) => Some(function),
            _ => None,
        }
    }

    /// All symbols named `name`, in declaration order, regardless of scope.
    pub fn named(&self, name: Name) -> impl Iterator<Item = (SymbolId, &Symbol)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .filter(move |(_, symbol)| symbol.name == Some(name))
            .map(|(i, symbol)| (SymbolId::from_raw(i as u32), symbol))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
