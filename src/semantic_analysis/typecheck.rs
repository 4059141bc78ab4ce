//! Structural type system over the symbol arena.

use super::{ScopeError, SymbolId, SymbolKind, SymbolTable, TypeError};
use crate::lexer::{Interner, Name};

/// Raised when an identifier in type position does not denote a type.
pub fn type_error(name: &str) -> TypeError {
    TypeError::NotAType(name.to_owned())
}

impl SymbolTable {
    pub fn is_type(&self, id: SymbolId) -> bool {
        self.kind(id).is_type()
    }

    /// Storage units taken by a value of type `ty`.
    ///
    /// Sizes are memoized into the type symbols at declaration time, so this never
    /// recurses.
    pub fn size_of(&self, ty: SymbolId) -> usize {
        match self.kind(ty) {
            SymbolKind::ScalarType(_) => 1,
            SymbolKind::ArrayType(array) => array.size,
            SymbolKind::StructType(st) => st.size,
            SymbolKind::AliasType(alias) => alias.size,
            _ => 0,
        }
    }

    /// Follows alias types down to the first non-alias type.
    pub fn strip_aliases(&self, mut ty: SymbolId) -> SymbolId {
        while let SymbolKind::AliasType(alias) = self.kind(ty) {
            ty = alias.base_type;
        }
        ty
    }

    /// Structural equivalence.
    ///
    /// Both sides must be the same kind of type; structs compare their field types
    /// in order and ignore field names. There is no cycle guard: type declarations
    /// can only refer to already complete types, so nesting depth bounds the
    /// recursion.
    pub fn structurally_equal(&self, t1: SymbolId, t2: SymbolId) -> bool {
        if t1 == t2 {
            return true;
        }

        use SymbolKind as K;
        match (self.kind(t1), self.kind(t2)) {
            (K::Universal, _) | (_, K::Universal) => true,
            (K::AliasType(a1), K::AliasType(a2)) => {
                self.structurally_equal(a1.base_type, a2.base_type)
            }
            (K::ArrayType(a1), K::ArrayType(a2)) => {
                a1.elements_num == a2.elements_num
                    && self.structurally_equal(a1.element_type, a2.element_type)
            }
            (K::StructType(s1), K::StructType(s2)) => {
                s1.fields.len() == s2.fields.len()
                    && s1
                        .fields
                        .iter()
                        .zip(&s2.fields)
                        .all(|(&f1, &f2)| self.fields_equal(f1, f2))
            }
            _ => false,
        }
    }

    /// Whether a value of type `value` may be stored where `target` is expected.
    ///
    /// Scalars all share one storage unit and convert freely; arrays and structs
    /// must be structurally equal. Top-level aliases are transparent here, nested
    /// ones are compared structurally.
    pub fn assignable(&self, target: SymbolId, value: SymbolId) -> bool {
        let (target, value) = (self.strip_aliases(target), self.strip_aliases(value));
        (self.is_scalar(target) && self.is_scalar(value)) || self.structurally_equal(target, value)
    }

    fn is_scalar(&self, ty: SymbolId) -> bool {
        matches!(self.kind(ty), SymbolKind::ScalarType(_))
    }

    fn fields_equal(&self, f1: SymbolId, f2: SymbolId) -> bool {
        match (self.kind(f1).slot(), self.kind(f2).slot()) {
            (Some(s1), Some(s2)) => self.structurally_equal(s1.ty, s2.ty),
            _ => false,
        }
    }

    /// Field of struct type `ty` (aliases allowed) called `field`.
    pub fn field_of(
        &self,
        ty: SymbolId,
        field: Name,
        names: &Interner,
    ) -> Result<SymbolId, ScopeError> {
        let SymbolKind::StructType(st) = self.kind(self.strip_aliases(ty)) else {
            return Err(ScopeError::UnknownField {
                field: names.resolve(field).to_owned(),
                ty: self.describe(ty, names),
            });
        };
        st.fields
            .iter()
            .copied()
            .find(|&id| self.get(id).name == Some(field))
            .ok_or_else(|| ScopeError::UnknownField {
                field: names.resolve(field).to_owned(),
                ty: self.describe(ty, names),
            })
    }

    /// Human-readable name of a type for diagnostics.
    pub fn describe(&self, ty: SymbolId, names: &Interner) -> String {
        let symbol = self.get(ty);
        match (&symbol.kind, symbol.name) {
            (SymbolKind::ScalarType(scalar), _) => scalar.spelling().to_owned(),
            (SymbolKind::Universal, _) => String::from("<any>"),
            (_, Some(name)) => names.resolve(name).to_owned(),
            (_, None) => String::from("<anonymous>"),
        }
    }
}
