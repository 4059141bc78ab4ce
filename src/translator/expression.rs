use super::{located, Result, Translator};
use crate::codegen::{BinaryOp, Instruction, Step, UnaryOp};
use crate::lexer::{Position, TokenKind};
use crate::semantic_analysis::{Storage, SymbolId, SymbolKind, SymbolTable, TypeError};
use tracing::trace;

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::LogicalAnd => BinaryOp::And,
        TokenKind::LogicalOr => BinaryOp::Or,
        TokenKind::IsLessThan => BinaryOp::Lt,
        TokenKind::IsGreaterThan => BinaryOp::Gt,
        TokenKind::IsLessThanOrEqual => BinaryOp::Le,
        TokenKind::IsGreaterThanOrEqual => BinaryOp::Ge,
        TokenKind::IsEqual => BinaryOp::Eq,
        TokenKind::IsNotEqual => BinaryOp::Ne,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Hyphen => BinaryOp::Sub,
        TokenKind::Asterisk => BinaryOp::Mul,
        TokenKind::FSlash => BinaryOp::Div,
        _ => return None,
    };
    Some(op)
}

impl<'a> Translator<'a> {
    /// `Expr -> Relation (('&&' | '||') Relation)*`
    ///
    /// Returns the type of the expression.
    pub(super) fn expression(&mut self) -> Result<SymbolId> {
        trace!("expression");
        let mut ty = self.relation()?;
        while let Some(op) =
            self.binary_if(|kind| matches!(kind, TokenKind::LogicalAnd | TokenKind::LogicalOr))
        {
            self.relation()?;
            self.code.emit(Instruction::Binary(op));
            ty = SymbolTable::BOOL;
        }
        Ok(ty)
    }

    /// `Relation -> Sum (relop Sum)*`
    fn relation(&mut self) -> Result<SymbolId> {
        let mut ty = self.sum()?;
        while let Some(op) = self.binary_if(TokenKind::is_relational) {
            self.sum()?;
            self.code.emit(Instruction::Binary(op));
            ty = SymbolTable::BOOL;
        }
        Ok(ty)
    }

    /// `Sum -> Term (('+' | '-') Term)*`
    fn sum(&mut self) -> Result<SymbolId> {
        let mut ty = self.term()?;
        while let Some(op) = self.binary_if(|kind| matches!(kind, TokenKind::Plus | TokenKind::Hyphen)) {
            self.term()?;
            self.code.emit(Instruction::Binary(op));
            ty = SymbolTable::INTEGER;
        }
        Ok(ty)
    }

    /// `Term -> Factor (('*' | '/') Factor)*`
    fn term(&mut self) -> Result<SymbolId> {
        let mut ty = self.factor()?;
        while let Some(op) = self.binary_if(|kind| matches!(kind, TokenKind::Asterisk | TokenKind::FSlash)) {
            self.factor()?;
            self.code.emit(Instruction::Binary(op));
            ty = SymbolTable::INTEGER;
        }
        Ok(ty)
    }

    /// Consumes the current token if `accept` takes it as a binary operator.
    fn binary_if(&mut self, accept: impl Fn(TokenKind) -> bool) -> Option<BinaryOp> {
        let kind = self.cursor.kind();
        if !accept(kind) {
            return None;
        }
        let op = binary_op(kind)?;
        self.cursor.bump();
        Some(op)
    }

    fn factor(&mut self) -> Result<SymbolId> {
        trace!(token = ?self.cursor.kind(), "factor");
        let token = self.cursor.peek();
        match token.kind {
            TokenKind::Identifier => self.named_factor(),
            TokenKind::Increment | TokenKind::Decrement => {
                self.cursor.bump();
                let step = if token.kind == TokenKind::Increment {
                    Step::PreInc
                } else {
                    Step::PreDec
                };
                let ty = self.lvalue()?;
                self.step(step, ty, token.pos)?;
                Ok(SymbolTable::INTEGER)
            }
            TokenKind::OpenParanth => {
                self.cursor.bump();
                let ty = self.expression()?;
                self.cursor.expect(TokenKind::CloseParanth)?;
                Ok(ty)
            }
            TokenKind::Hyphen => {
                self.cursor.bump();
                self.factor()?;
                self.code.emit(Instruction::Unary(UnaryOp::Neg));
                Ok(SymbolTable::INTEGER)
            }
            TokenKind::LogicalNot => {
                self.cursor.bump();
                self.factor()?;
                self.code.emit(Instruction::Unary(UnaryOp::Not));
                Ok(SymbolTable::BOOL)
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.bump();
                let value = i64::from(token.kind == TokenKind::True);
                self.code.emit(Instruction::LoadConst(value));
                Ok(SymbolTable::BOOL)
            }
            TokenKind::Character => {
                self.cursor.bump();
                let c = self.stream.pools.char_at(token.aux).unwrap_or_default();
                self.code.emit(Instruction::LoadConst(i64::from(u32::from(c))));
                Ok(SymbolTable::CHAR)
            }
            TokenKind::StringVal => {
                self.cursor.bump();
                self.code.emit(Instruction::LoadStr(token.aux));
                Ok(SymbolTable::STRING)
            }
            TokenKind::Numeral => {
                self.cursor.bump();
                let value = self.stream.pools.int_at(token.aux).unwrap_or_default();
                self.code.emit(Instruction::LoadConst(value));
                Ok(SymbolTable::INTEGER)
            }
            _ => Err(self.cursor.unexpected()),
        }
    }

    /// `ID '(' Args? ')' | Lvalue ('++' | '--')?`
    fn named_factor(&mut self) -> Result<SymbolId> {
        let (id, pos) = self.use_identifier()?;
        if self.cursor.kind() == TokenKind::OpenParanth {
            return self.call(id, pos);
        }

        let ty = self.variable_address(id, pos)?;
        let ty = self.lvalue_path(ty)?;

        let op_pos = self.cursor.pos();
        if self.cursor.bump_if(TokenKind::Increment) {
            self.step(Step::PostInc, ty, op_pos)?;
            Ok(SymbolTable::INTEGER)
        } else if self.cursor.bump_if(TokenKind::Decrement) {
            self.step(Step::PostDec, ty, op_pos)?;
            Ok(SymbolTable::INTEGER)
        } else {
            let size = self.symbols.size_of(ty);
            self.code.emit(Instruction::LoadRef(size));
            Ok(ty)
        }
    }

    fn step(&mut self, step: Step, ty: SymbolId, pos: Position) -> Result<()> {
        self.check_assignable(SymbolTable::INTEGER, ty, pos)?;
        let size = self.symbols.size_of(ty);
        self.code.emit(Instruction::Step(step, size));
        Ok(())
    }

    /// `ID '(' (Expr (',' Expr)*)? ')'`
    ///
    /// Arguments are pushed left to right and checked against the parameter types.
    fn call(&mut self, id: SymbolId, pos: Position) -> Result<SymbolId> {
        trace!("call");
        let SymbolKind::Function(function) = self.symbols.kind(id) else {
            let name = self.symbol_spelling(id);
            return Err(located(pos)(TypeError::NotAFunction(name)));
        };
        let index = function.index;
        let return_type = function.return_type;
        let param_types: Vec<SymbolId> = function
            .params
            .iter()
            .filter_map(|&param| self.symbols.kind(param).slot().map(|slot| slot.ty))
            .collect();

        self.cursor.expect(TokenKind::OpenParanth)?;
        let mut found = 0;
        if self.cursor.kind() != TokenKind::CloseParanth {
            loop {
                let arg_pos = self.cursor.pos();
                let ty = self.expression()?;
                if let Some(&param_type) = param_types.get(found) {
                    self.check_assignable(param_type, ty, arg_pos)?;
                }
                found += 1;
                if !self.cursor.bump_if(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(TokenKind::CloseParanth)?;

        if found != param_types.len() {
            return Err(located(pos)(TypeError::ArgumentCount {
                function: self.symbol_spelling(id),
                expected: param_types.len(),
                found,
            }));
        }

        self.code.emit(Instruction::Call(index));
        Ok(return_type)
    }

    /// `Lvalue -> ID ('.' ID | '[' Expr ']')*`
    ///
    /// Leaves the address of the designated storage on the stack and returns its type.
    pub(super) fn lvalue(&mut self) -> Result<SymbolId> {
        trace!("lvalue");
        let (id, pos) = self.use_identifier()?;
        let ty = self.variable_address(id, pos)?;
        self.lvalue_path(ty)
    }

    /// Pushes the address of a variable or parameter and returns its type.
    pub(super) fn variable_address(&mut self, id: SymbolId, pos: Position) -> Result<SymbolId> {
        let (slot, storage) = match self.symbols.kind(id) {
            SymbolKind::Variable(variable) => (variable.slot, variable.storage),
            SymbolKind::Parameter(slot) => (*slot, Storage::Frame),
            _ => {
                let name = self.symbol_spelling(id);
                return Err(located(pos)(TypeError::NotAVariable(name)));
            }
        };
        let instruction = match storage {
            Storage::Global => Instruction::LoadGlobalAddr(slot.index),
            Storage::Frame => Instruction::LoadAddr(slot.index),
        };
        self.code.emit(instruction);
        Ok(slot.ty)
    }

    /// `('.' ID | '[' Expr ']')*` applied to an address of type `ty`.
    fn lvalue_path(&mut self, mut ty: SymbolId) -> Result<SymbolId> {
        loop {
            let token = self.cursor.peek();
            match token.kind {
                TokenKind::Dot => {
                    self.cursor.bump();
                    let (name, pos) = self.identifier()?;
                    let base = self.symbols.strip_aliases(ty);
                    if !matches!(self.symbols.kind(base), SymbolKind::StructType(_)) {
                        return Err(located(pos)(TypeError::NotAStruct(self.describe(ty))));
                    }
                    let field = self
                        .symbols
                        .field_of(ty, name, &self.stream.names)
                        .map_err(located(pos))?;
                    if let Some(slot) = self.symbols.kind(field).slot().copied() {
                        self.code.emit(Instruction::AddOffset(slot.index));
                        ty = slot.ty;
                    }
                }
                TokenKind::OpenSquare => {
                    self.cursor.bump();
                    let SymbolKind::ArrayType(array) = self.symbols.kind(self.symbols.strip_aliases(ty))
                    else {
                        return Err(located(token.pos)(TypeError::NotAnArray(self.describe(ty))));
                    };
                    let element_type = array.element_type;
                    let index_pos = self.cursor.pos();
                    let index_type = self.expression()?;
                    self.check_assignable(SymbolTable::INTEGER, index_type, index_pos)?;
                    self.cursor.expect(TokenKind::CloseSquare)?;

                    let size = self.symbols.size_of(element_type);
                    self.code.emit(Instruction::Scale(size));
                    self.code.emit(Instruction::Binary(BinaryOp::Add));
                    ty = element_type;
                }
                _ => return Ok(ty),
            }
        }
    }
}
