/// Symbolic jump target, rendered as `L<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// In-place update of the value behind an address.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum JumpKind {
    /// `JMP_FW`
    Forward,
    /// `JMP_BW`
    Backward,
    /// `TJMP_FW`, taken when the popped value is false
    ForwardIfFalse,
    /// `TJMP_BW`, taken when the popped value is false
    BackwardIfFalse,
}

impl JumpKind {
    pub fn is_conditional(self) -> bool {
        matches!(self, Self::ForwardIfFalse | Self::BackwardIfFalse)
    }
}

/// One line of the stack-machine listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Instruction {
    BeginFunc { index: usize, params_size: usize },
    EndFunc,
    LoadConst(i64),
    LoadStr(usize),
    /// Address of a frame slot.
    LoadAddr(usize),
    /// Address of a global slot.
    LoadGlobalAddr(usize),
    LoadRef(usize),
    StoreRef(usize),
    Binary(BinaryOp),
    Unary(UnaryOp),
    /// `ADD n`: field offset added to the address on top of the stack.
    AddOffset(usize),
    /// `MUL n`: index scaled by the element size.
    Scale(usize),
    Step(Step, usize),
    Call(usize),
    Ret(usize),
    Jump(JumpKind, Label),
    Label(Label),
}

impl Instruction {
    /// Label referenced by a jump, if any.
    pub fn target(&self) -> Option<Label> {
        match self {
            Self::Jump(_, label) => Some(*label),
            _ => None,
        }
    }
}
