//! Code emission using [Display]
//!
//! Dummy module containing implementation of [Display] for the [Listing](crate::codegen::Listing) and its
//! parts which allows to use [to_string] method or as a formatting arg in any formatting context(e.g. [format!], [write!], [println!], ..)
//!
//! [Display]: https://doc.rust-lang.org/std/fmt/trait.Display.html
//! [to_string]: https://doc.rust-lang.org/std/string/trait.ToString.html#tymethod.to_string
//! [format!]: https://doc.rust-lang.org/std/macro.format.html
//! [write!]: https://doc.rust-lang.org/std/macro.write.html
//! [println!]: https://doc.rust-lang.org/std/macro.println.html

#[cfg(test)]
mod emission_tests;

use crate::codegen::*;

use std::fmt;

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Sub => write!(f, "SUB"),
            Self::Mul => write!(f, "MUL"),
            Self::Div => write!(f, "DIV"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Lt => write!(f, "LT"),
            Self::Gt => write!(f, "GT"),
            Self::Le => write!(f, "LE"),
            Self::Ge => write!(f, "GE"),
            Self::Eq => write!(f, "EQ"),
            Self::Ne => write!(f, "NE"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Neg => write!(f, "NEG"),
            Self::Not => write!(f, "NOT"),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PreInc => write!(f, "PRE_INC"),
            Self::PreDec => write!(f, "PRE_DEC"),
            Self::PostInc => write!(f, "POST_INC"),
            Self::PostDec => write!(f, "POST_DEC"),
        }
    }
}

impl fmt::Display for JumpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "JMP_FW"),
            Self::Backward => write!(f, "JMP_BW"),
            Self::ForwardIfFalse => write!(f, "TJMP_FW"),
            Self::BackwardIfFalse => write!(f, "TJMP_BW"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BeginFunc { index, params_size } => {
                write!(f, "BEGIN_FUNC {index}, {params_size}, 0")
            }
            Self::EndFunc => write!(f, "END_FUNC"),
            Self::LoadConst(k) => write!(f, "LOAD_CONST {k}"),
            Self::LoadStr(i) => write!(f, "LOAD_STR {i}"),
            Self::LoadAddr(n) => write!(f, "LOAD_ADDR {n}"),
            Self::LoadGlobalAddr(n) => write!(f, "LOAD_GLOBAL_ADDR {n}"),
            Self::LoadRef(n) => write!(f, "LOAD_REF {n}"),
            Self::StoreRef(n) => write!(f, "STORE_REF {n}"),
            Self::Binary(op) => write!(f, "{op}"),
            Self::Unary(op) => write!(f, "{op}"),
            Self::AddOffset(n) => write!(f, "ADD {n}"),
            Self::Scale(n) => write!(f, "MUL {n}"),
            Self::Step(step, n) => write!(f, "{step} {n}"),
            Self::Call(index) => write!(f, "CALL {index}"),
            Self::Ret(n) => write!(f, "RET {n}"),
            Self::Jump(kind, label) => write!(f, "{kind} {label}"),
            Self::Label(label) => write!(f, "{label}:"),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for instruction in self {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}
