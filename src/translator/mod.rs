//! Syntax-directed translation.
//!
//! A recursive-descent parser with one procedure per nonterminal. Each procedure
//! parses its production, drives the [ScopeManager] and the type system, and emits
//! stack-machine code straight into a [CodeBuffer]; no tree is built. The grammar
//! is LL(1) and the first error ends the compile.
//!
//! ```text
//! Program     -> Decl+ End
//! Decl        -> 'function' ID '(' Params? ')' ':' Type Block
//!              | 'type' ID '=' TypeDef ';'?
//!              | 'var' IdList ':' Type ';'
//! TypeDef     -> 'array' '[' NUM ']' 'of' Type
//!              | 'struct' '{' IdList ':' Type (';' IdList ':' Type)* ';'? '}'
//!              | Type
//! Params      -> ID ':' Type (',' ID ':' Type)*
//! Block       -> '{' VarDecl* Stmt* '}'
//! Stmt        -> 'if' '(' Expr ')' Stmt ('else' Stmt)?
//!              | 'while' '(' Expr ')' Stmt
//!              | 'do' Stmt 'while' '(' Expr ')' ';'
//!              | 'break' ';' | 'continue' ';' | 'return' ID ';'
//!              | Block
//!              | Lvalue '=' Expr ';'
//! Expr        -> Relation (('&&' | '||') Relation)*
//! Relation    -> Sum (relop Sum)*
//! Sum         -> Term (('+' | '-') Term)*
//! Term        -> Factor (('*' | '/') Factor)*
//! Factor      -> ID '(' Args? ')' | Lvalue ('++' | '--')?
//!              | ('++' | '--') Lvalue | '(' Expr ')' | '-' Factor | '!' Factor
//!              | 'true' | 'false' | CHR | STR | NUM
//! Lvalue      -> ID ('.' ID | '[' Expr ']')*
//! ```

mod cursor;
mod declaration;
mod expression;
mod loops;
mod statement;
mod translate_error;


use crate::codegen::{CodeBuffer, Listing};
use crate::lexer::{Interner, Name, Position, TokenKind, TokenStream};
use crate::semantic_analysis::{
    type_error, Function, ScopeManager, Symbol, SymbolId, SymbolKind, SymbolTable,
};
use cursor::Cursor;
use loops::LoopStack;
use tracing::debug;

pub use loops::LoopContext;
pub use translate_error::{ErrorKind, InnerTranslateError, Result, SyntaxError, TranslateError};
use translate_error::located;

/// Output of a successful compile.
#[derive(Debug)]
pub struct Translation {
    pub listing: Listing,
    pub symbols: SymbolTable,
    pub names: Interner,
}

impl Translation {
    /// Every symbol spelled `spelling`, in declaration order.
    pub fn symbols_named(&self, spelling: &str) -> Vec<&Symbol> {
        self.names
            .get(spelling)
            .map(|name| self.symbols.named(name).map(|(_, symbol)| symbol).collect())
            .unwrap_or_default()
    }

    /// First symbol spelled `spelling`.
    pub fn symbol(&self, spelling: &str) -> Option<&Symbol> {
        self.symbols_named(spelling).into_iter().next()
    }
}

pub struct Translator<'a> {
    cursor: Cursor<'a>,
    stream: &'a TokenStream,
    symbols: SymbolTable,
    scopes: ScopeManager<'a>,
    code: CodeBuffer,
    loops: LoopStack,
    functions_num: usize,
    globals_num: usize,
    current_function: Option<SymbolId>,
}

impl<'a> Translator<'a> {
    pub fn new(stream: &'a TokenStream) -> Self {
        Self {
            cursor: Cursor::new(stream),
            stream,
            symbols: SymbolTable::new(),
            scopes: ScopeManager::new(&stream.names),
            code: CodeBuffer::new(),
            loops: LoopStack::new(),
            functions_num: 0,
            globals_num: 0,
            current_function: None,
        }
    }

    pub fn translate(mut self) -> Result<Translation> {
        self.program()?;
        debug!(
            instructions = self.code.len(),
            symbols = self.symbols.len(),
            "translation finished"
        );
        Ok(Translation {
            listing: self.code.finish(),
            symbols: self.symbols,
            names: self.stream.names.clone(),
        })
    }

    fn program(&mut self) -> Result<()> {
        loop {
            self.declaration()?;
            if !self.cursor.kind().starts_declaration() {
                break;
            }
        }
        self.cursor.expect(TokenKind::End)?;
        Ok(())
    }

    fn spelling(&self, name: Name) -> &str {
        self.stream.names.resolve(name)
    }

    /// Consumes an identifier token and returns its interned id with its position.
    fn identifier(&mut self) -> Result<(Name, Position)> {
        let token = self.cursor.expect(TokenKind::Identifier)?;
        Ok((token.aux, token.pos))
    }

    /// Declares the identifier under the cursor at the current scope level.
    fn declare_identifier(&mut self) -> Result<SymbolId> {
        let (name, pos) = self.identifier()?;
        self.scopes
            .declare(&mut self.symbols, name)
            .map_err(located(pos))
    }

    /// Consumes an identifier and resolves it through every enclosing level.
    fn use_identifier(&mut self) -> Result<(SymbolId, Position)> {
        let (name, pos) = self.identifier()?;
        let id = self.scopes.resolve(name).map_err(located(pos))?;
        Ok((id, pos))
    }

    /// `Type -> integer | char | boolean | string | ID`
    fn type_ref(&mut self) -> Result<SymbolId> {
        let ty = match self.cursor.kind() {
            TokenKind::Integer => SymbolTable::INTEGER,
            TokenKind::Char => SymbolTable::CHAR,
            TokenKind::Boolean => SymbolTable::BOOL,
            TokenKind::KwString => SymbolTable::STRING,
            TokenKind::Identifier => {
                let (id, pos) = self.use_identifier()?;
                if !self.symbols.is_type(id) {
                    let name = self.symbol_spelling(id);
                    return Err(located(pos)(type_error(&name)));
                }
                return Ok(id);
            }
            _ => return Err(self.cursor.unexpected()),
        };
        self.cursor.bump();
        Ok(ty)
    }

    fn symbol_spelling(&self, id: SymbolId) -> String {
        match self.symbols.get(id).name {
            Some(name) => self.spelling(name).to_owned(),
            None => self.describe(id),
        }
    }

    fn describe(&self, ty: SymbolId) -> String {
        self.symbols.describe(ty, &self.stream.names)
    }

    fn current_function(&self) -> Option<&Function> {
        self.current_function
            .and_then(|id| match self.symbols.kind(id) {
                SymbolKind::Function(function) => Some(function),
                _ => None,
            })
    }
}

/// Translates a scanned token stream into a stack-machine listing.
pub fn translate(stream: &TokenStream) -> Result<Translation> {
    Translator::new(stream).translate()
}
