use super::loops::LoopContext;
use super::{located, Result, SyntaxError, Translator};
use crate::codegen::{Instruction, JumpKind, UnaryOp};
use crate::lexer::{Position, TokenKind};
use crate::semantic_analysis::{SymbolId, SymbolTable, TypeError};
use tracing::trace;

impl<'a> Translator<'a> {
    pub(super) fn starts_statement(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::If
                | TokenKind::While
                | TokenKind::Do
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Return
                | TokenKind::OpenCurly
                | TokenKind::Identifier
        )
    }

    pub(super) fn statement(&mut self) -> Result<()> {
        trace!(token = ?self.cursor.kind(), "statement");
        match self.cursor.kind() {
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Do => self.do_while_statement(),
            TokenKind::Break => self.break_statement(),
            TokenKind::Continue => self.continue_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::OpenCurly => self.block(),
            TokenKind::Identifier => self.assignment(),
            _ => Err(self.cursor.unexpected()),
        }
    }

    /// `'(' Expr ')'`
    fn condition(&mut self) -> Result<()> {
        self.cursor.expect(TokenKind::OpenParanth)?;
        self.expression()?;
        self.cursor.expect(TokenKind::CloseParanth)?;
        Ok(())
    }

    fn if_statement(&mut self) -> Result<()> {
        self.cursor.expect(TokenKind::If)?;
        self.condition()?;
        let l1 = self.code.make_test();
        self.statement()?;

        if self.cursor.bump_if(TokenKind::Else) {
            let l2 = self.code.make_else(l1);
            self.statement()?;
            self.code.place(l2);
        } else {
            self.code.place(l1);
        }
        Ok(())
    }

    fn while_statement(&mut self) -> Result<()> {
        self.cursor.expect(TokenKind::While)?;
        let top = self.code.make_loop_top();
        self.condition()?;
        let exit = self.code.make_test();

        self.loops.push(LoopContext::While { top, exit });
        let body = self.statement();
        self.loops.pop();
        body?;

        self.code.jump(JumpKind::Backward, top);
        self.code.place(exit);
        Ok(())
    }

    /// `do S while (E);` repeats while `E` holds: the condition is negated and the
    /// backward test jump is taken when its operand is false.
    fn do_while_statement(&mut self) -> Result<()> {
        self.cursor.expect(TokenKind::Do)?;
        let top = self.code.make_loop_top();

        self.loops.push(LoopContext::DoWhile {
            next: None,
            exit: None,
        });
        let body = self.statement();
        let context = self.loops.pop();
        body?;

        let (next, exit) = match context {
            Some(LoopContext::DoWhile { next, exit }) => (next, exit),
            _ => (None, None),
        };
        if let Some(next) = next {
            self.code.place(next);
        }

        self.cursor.expect(TokenKind::While)?;
        self.condition()?;
        self.cursor.expect(TokenKind::Semicolon)?;
        self.code.emit(Instruction::Unary(UnaryOp::Not));
        self.code.jump(JumpKind::BackwardIfFalse, top);

        if let Some(exit) = exit {
            self.code.place(exit);
        }
        Ok(())
    }

    fn break_statement(&mut self) -> Result<()> {
        let token = self.cursor.expect(TokenKind::Break)?;
        let (kind, label) = self
            .loops
            .break_jump(&mut self.code)
            .ok_or(SyntaxError::BreakOutsideLoop)
            .map_err(located(token.pos))?;
        self.cursor.expect(TokenKind::Semicolon)?;
        self.code.jump(kind, label);
        Ok(())
    }

    fn continue_statement(&mut self) -> Result<()> {
        let token = self.cursor.expect(TokenKind::Continue)?;
        let (kind, label) = self
            .loops
            .continue_jump(&mut self.code)
            .ok_or(SyntaxError::ContinueOutsideLoop)
            .map_err(located(token.pos))?;
        self.cursor.expect(TokenKind::Semicolon)?;
        self.code.jump(kind, label);
        Ok(())
    }

    /// `return ID ';'`: pushes the value of a variable or parameter and returns it.
    fn return_statement(&mut self) -> Result<()> {
        self.cursor.expect(TokenKind::Return)?;
        let (id, pos) = self.use_identifier()?;
        let ty = self.variable_address(id, pos)?;
        self.cursor.expect(TokenKind::Semicolon)?;

        let return_type = self
            .current_function()
            .map_or(SymbolTable::UNIVERSAL, |f| f.return_type);
        self.check_assignable(return_type, ty, pos)?;

        let size = self.symbols.size_of(ty);
        self.code.emit(Instruction::LoadRef(size));
        self.code.emit(Instruction::Ret(size));
        Ok(())
    }

    /// `Lvalue '=' Expr ';'`
    fn assignment(&mut self) -> Result<()> {
        trace!("assignment");
        let target = self.lvalue()?;
        self.cursor.expect(TokenKind::Assign)?;
        let pos = self.cursor.pos();
        let value = self.expression()?;
        self.cursor.expect(TokenKind::Semicolon)?;

        self.check_assignable(target, value, pos)?;
        let size = self.symbols.size_of(target);
        self.code.emit(Instruction::StoreRef(size));
        Ok(())
    }

    pub(super) fn check_assignable(
        &self,
        target: SymbolId,
        value: SymbolId,
        pos: Position,
    ) -> Result<()> {
        if self.symbols.assignable(target, value) {
            return Ok(());
        }
        Err(located(pos)(TypeError::Mismatch {
            expected: self.describe(target),
            found: self.describe(value),
        }))
    }
}
