use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("redeclaration of identifier {0}")]
    Redeclaration(String),
    #[error("identifier {0} was not declared")]
    NotDeclared(String),
    #[error("struct {ty} has no field {field}")]
    UnknownField { field: String, ty: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("expected a type, but {0} is not one")]
    NotAType(String),
    #[error("{0} is not a function")]
    NotAFunction(String),
    #[error("{0} is not a variable")]
    NotAVariable(String),
    #[error("field access on {0}, which is not a struct")]
    NotAStruct(String),
    #[error("indexing {0}, which is not an array")]
    NotAnArray(String),
    #[error("expected a value of type {expected}, but got {found}")]
    Mismatch { expected: String, found: String },
    #[error("function {function} called with {found} arguments, but expected {expected}")]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("size of type {0} overflows")]
    SizeOverflow(String),
}
