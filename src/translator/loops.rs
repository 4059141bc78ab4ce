use crate::codegen::{CodeBuffer, JumpKind, Label};

/// Jump targets of the innermost enclosing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopContext {
    /// Both targets exist before the body is translated.
    While { top: Label, exit: Label },
    /// Targets are allocated on first use and placed once the body is done.
    DoWhile {
        next: Option<Label>,
        exit: Option<Label>,
    },
}

#[derive(Debug, Default)]
pub struct LoopStack {
    contexts: Vec<LoopContext>,
}

impl LoopStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, context: LoopContext) {
        self.contexts.push(context);
    }

    pub fn pop(&mut self) -> Option<LoopContext> {
        self.contexts.pop()
    }

    pub fn break_jump(&mut self, code: &mut CodeBuffer) -> Option<(JumpKind, Label)> {
        match self.contexts.last_mut()? {
            LoopContext::While { exit, .. } => Some((JumpKind::Forward, *exit)),
            LoopContext::DoWhile { exit, .. } => {
                let label = *exit.get_or_insert_with(|| code.new_label());
                Some((JumpKind::Forward, label))
            }
        }
    }

    pub fn continue_jump(&mut self, code: &mut CodeBuffer) -> Option<(JumpKind, Label)> {
        match self.contexts.last_mut()? {
            LoopContext::While { top, .. } => Some((JumpKind::Backward, *top)),
            LoopContext::DoWhile { next, .. } => {
                let label = *next.get_or_insert_with(|| code.new_label());
                Some((JumpKind::Forward, label))
            }
        }
    }
}
