use super::{located, Result, Translator};
use crate::codegen::Instruction;
use crate::lexer::{Position, TokenKind};
use crate::semantic_analysis::{
    AliasType, ArrayType, Function, Slot, Storage, StructType, SymbolId, SymbolKind, SymbolTable,
    TypeError, Variable,
};
use tracing::{debug, trace};

impl<'a> Translator<'a> {
    pub(super) fn declaration(&mut self) -> Result<()> {
        match self.cursor.kind() {
            TokenKind::Function => self.function_declaration(),
            TokenKind::Type => self.type_declaration(),
            TokenKind::Var => self.var_declaration(),
            _ => Err(self.cursor.unexpected()),
        }
    }

    /// `IdList -> ID (',' ID)*`, declaring each identifier at the current level.
    fn declare_list(&mut self) -> Result<Vec<(SymbolId, Position)>> {
        let mut ids = Vec::new();
        loop {
            let pos = self.cursor.pos();
            ids.push((self.declare_identifier()?, pos));
            if !self.cursor.bump_if(TokenKind::Comma) {
                return Ok(ids);
            }
        }
    }

    /// Storage index `size` units past `next`, charged to `owner` on overflow.
    fn advance(
        &self,
        next: usize,
        size: usize,
        owner: SymbolId,
        pos: Position,
    ) -> Result<usize> {
        next.checked_add(size)
            .ok_or_else(|| TypeError::SizeOverflow(self.symbol_spelling(owner)))
            .map_err(located(pos))
    }

    /// `var IdList ':' Type ';'`
    ///
    /// Inside a function the variables take frame slots after the parameters and
    /// the locals declared so far; at program level they take global slots.
    pub(super) fn var_declaration(&mut self) -> Result<()> {
        trace!("var declaration");
        self.cursor.expect(TokenKind::Var)?;
        let ids = self.declare_list()?;
        self.cursor.expect(TokenKind::Colon)?;
        let ty = self.type_ref()?;
        self.cursor.expect(TokenKind::Semicolon)?;

        let size = self.symbols.size_of(ty);
        let (storage, mut next) = match self.current_function() {
            Some(function) => (Storage::Frame, function.vars_num),
            None => (Storage::Global, self.globals_num),
        };

        for (id, pos) in ids {
            let slot = Slot {
                ty,
                index: next,
                size,
            };
            debug!(symbol = ?id, index = next, size, ?storage, "variable declared");
            self.symbols
                .define(id, SymbolKind::Variable(Variable { slot, storage }));
            next = self.advance(next, size, id, pos)?;
        }

        match storage {
            Storage::Frame => {
                if let Some(function) = self
                    .current_function
                    .and_then(|id| self.symbols.function_mut(id))
                {
                    function.vars_num = next;
                }
            }
            Storage::Global => self.globals_num = next,
        }
        Ok(())
    }

    /// `type ID '=' TypeDef ';'?`
    fn type_declaration(&mut self) -> Result<()> {
        trace!("type declaration");
        self.cursor.expect(TokenKind::Type)?;
        let id = self.declare_identifier()?;
        self.cursor.expect(TokenKind::Assign)?;

        let kind = match self.cursor.kind() {
            TokenKind::Array => self.array_type(id)?,
            TokenKind::Struct => self.struct_type(id)?,
            _ => {
                let base_type = self.type_ref()?;
                let size = self.symbols.size_of(base_type);
                SymbolKind::AliasType(AliasType { base_type, size })
            }
        };
        self.cursor.bump_if(TokenKind::Semicolon);

        debug!(symbol = ?id, ?kind, "type declared");
        self.symbols.define(id, kind);
        Ok(())
    }

    /// `array '[' NUM ']' of Type`
    fn array_type(&mut self, id: SymbolId) -> Result<SymbolKind> {
        self.cursor.expect(TokenKind::Array)?;
        self.cursor.expect(TokenKind::OpenSquare)?;
        let numeral = self.cursor.expect(TokenKind::Numeral)?;
        self.cursor.expect(TokenKind::CloseSquare)?;
        self.cursor.expect(TokenKind::Of)?;
        let element_type = self.type_ref()?;

        let overflow = || TypeError::SizeOverflow(self.symbol_spelling(id));
        let elements_num = self
            .stream
            .pools
            .int_at(numeral.aux)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(overflow)
            .map_err(located(numeral.pos))?;
        let size = elements_num
            .checked_mul(self.symbols.size_of(element_type))
            .ok_or_else(overflow)
            .map_err(located(numeral.pos))?;

        Ok(SymbolKind::ArrayType(ArrayType {
            element_type,
            elements_num,
            size,
        }))
    }

    /// `struct '{' Fields '}'`
    ///
    /// Fields live in a scope level of their own, so a field name may repeat a
    /// name declared outside but not another field of the same struct.
    fn struct_type(&mut self, id: SymbolId) -> Result<SymbolKind> {
        self.cursor.expect(TokenKind::Struct)?;
        self.cursor.expect(TokenKind::OpenCurly)?;
        self.scopes.enter_block();

        let mut fields = Vec::new();
        let mut offset = 0;
        loop {
            let ids = self.declare_list()?;
            self.cursor.expect(TokenKind::Colon)?;
            let ty = self.type_ref()?;
            let size = self.symbols.size_of(ty);
            for (field, pos) in ids {
                self.symbols.define(
                    field,
                    SymbolKind::Field(Slot {
                        ty,
                        index: offset,
                        size,
                    }),
                );
                offset = self.advance(offset, size, id, pos)?;
                fields.push(field);
            }

            if !self.cursor.bump_if(TokenKind::Semicolon)
                || self.cursor.kind() == TokenKind::CloseCurly
            {
                break;
            }
        }

        self.cursor.expect(TokenKind::CloseCurly)?;
        self.scopes.exit_block();
        Ok(SymbolKind::StructType(StructType {
            fields,
            size: offset,
        }))
    }

    /// `function ID '(' Params? ')' ':' Type Block`
    ///
    /// The function symbol is complete (apart from its return type and frame
    /// size) before the parameters are parsed, so the body may call it.
    fn function_declaration(&mut self) -> Result<()> {
        trace!("function declaration");
        self.cursor.expect(TokenKind::Function)?;
        let id = self.declare_identifier()?;
        let index = self.functions_num;
        self.functions_num += 1;
        self.symbols.define(
            id,
            SymbolKind::Function(Function {
                return_type: SymbolTable::UNIVERSAL,
                params: Vec::new(),
                params_num: 0,
                vars_num: 0,
                index,
            }),
        );

        self.scopes.enter_block();
        self.cursor.expect(TokenKind::OpenParanth)?;
        let (params, params_num) = if self.cursor.kind() == TokenKind::CloseParanth {
            (Vec::new(), 0)
        } else {
            self.parameters()?
        };
        self.cursor.expect(TokenKind::CloseParanth)?;
        self.cursor.expect(TokenKind::Colon)?;
        let return_type = self.type_ref()?;

        if let Some(function) = self.symbols.function_mut(id) {
            function.return_type = return_type;
            function.params = params;
            function.params_num = params_num;
            function.vars_num = params_num;
        }
        debug!(symbol = ?id, index, params_num, "function frame opened");

        self.current_function = Some(id);
        self.code.emit(Instruction::BeginFunc {
            index,
            params_size: params_num,
        });
        self.block()?;
        self.code.emit(Instruction::EndFunc);

        let vars_num = self.current_function().map_or(0, |f| f.vars_num);
        debug!(symbol = ?id, vars_num, "function frame closed");
        self.current_function = None;
        self.scopes.exit_block();
        Ok(())
    }

    /// `Params -> ID ':' Type (',' ID ':' Type)*`
    ///
    /// Parameters take consecutive frame slots from 0. Returns them with the
    /// storage size they take together.
    fn parameters(&mut self) -> Result<(Vec<SymbolId>, usize)> {
        let mut params = Vec::new();
        let mut next = 0;
        loop {
            let pos = self.cursor.pos();
            let id = self.declare_identifier()?;
            self.cursor.expect(TokenKind::Colon)?;
            let ty = self.type_ref()?;
            let size = self.symbols.size_of(ty);
            self.symbols.define(
                id,
                SymbolKind::Parameter(Slot {
                    ty,
                    index: next,
                    size,
                }),
            );
            next = self.advance(next, size, id, pos)?;
            params.push(id);

            if !self.cursor.bump_if(TokenKind::Comma) {
                break;
            }
        }
        Ok((params, next))
    }

    /// `Block -> '{' VarDecl* Stmt* '}'`, in a scope level of its own.
    pub(super) fn block(&mut self) -> Result<()> {
        trace!("block");
        self.cursor.expect(TokenKind::OpenCurly)?;
        self.scopes.enter_block();
        while self.cursor.kind() == TokenKind::Var {
            self.var_declaration()?;
        }
        while Self::starts_statement(self.cursor.kind()) {
            self.statement()?;
        }
        self.cursor.expect(TokenKind::CloseCurly)?;
        self.scopes.exit_block();
        Ok(())
    }
}
