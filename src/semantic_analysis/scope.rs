use super::{ScopeError, SymbolId, SymbolTable};
use crate::lexer::{Interner, Name};
use tracing::trace;

/// Block-structured symbol table.
///
/// Level 0 is the global level. Each level keeps its symbols in declaration order;
/// a level is pushed on block entry and popped on block exit, while the symbols
/// themselves stay alive in the [SymbolTable].
pub struct ScopeManager<'a> {
    names: &'a Interner,
    levels: Vec<Vec<(Name, SymbolId)>>,
}

impl<'a> ScopeManager<'a> {
    pub fn new(names: &'a Interner) -> Self {
        Self {
            names,
            levels: vec![Vec::new()],
        }
    }

    pub fn level(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn is_global(&self) -> bool {
        self.level() == 0
    }

    pub fn enter_block(&mut self) {
        self.levels.push(Vec::new());
        trace!(level = self.level(), "enter block");
    }

    pub fn exit_block(&mut self) {
        debug_assert!(!self.is_global(), "global level is never exited");
        if !self.is_global() {
            self.levels.pop();
        }
        trace!(level = self.level(), "exit block");
    }

    /// Declares `name` at the current level.
    ///
    /// Only the current level is checked for a collision, so an inner block may
    /// shadow an outer declaration.
    pub fn declare(&mut self, symbols: &mut SymbolTable, name: Name) -> Result<SymbolId, ScopeError> {
        if self.lookup_local(name).is_some() {
            let spelling = self.names.resolve(name).to_owned();
            return Err(ScopeError::Redeclaration(spelling));
        }
        let id = symbols.alloc(name);
        let level = self.levels.len() - 1;
        self.levels[level].push((name, id));
        Ok(id)
    }

    pub fn lookup_local(&self, name: Name) -> Option<SymbolId> {
        self.levels
            .last()
            .and_then(|level| Self::search(level, name))
    }

    /// Searches from the current level outwards to the global level.
    pub fn lookup(&self, name: Name) -> Option<SymbolId> {
        self.levels
            .iter()
            .rev()
            .find_map(|level| Self::search(level, name))
    }

    /// Like [lookup](Self::lookup), failing with `NotDeclared`.
    pub fn resolve(&self, name: Name) -> Result<SymbolId, ScopeError> {
        self.lookup(name).ok_or_else(|| {
            let spelling = self.names.resolve(name).to_owned();
            ScopeError::NotDeclared(spelling)
        })
    }

    fn search(level: &[(Name, SymbolId)], name: Name) -> Option<SymbolId> {
        level
            .iter()
            .find(|(declared, _)| *declared == name)
            .map(|&(_, id)| id)
    }
}
