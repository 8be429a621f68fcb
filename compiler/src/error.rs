use thiserror::Error;

use crate::parse_tree::NodeKind;

/// Every way compiling a single class can fail. All of them abort the class.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("line {line}: {message}")]
    Lex { line: usize, message: String },

    #[error("line {line}: syntax error in {construct}: expected {expected}, found {found}")]
    Syntax {
        line: usize,
        construct: NodeKind,
        expected: String,
        found: String,
    },

    #[error("undefined identifier '{name}'")]
    UndefinedIdentifier { name: String },

    #[error("identifier '{name}' is declared twice in the same scope")]
    DuplicateIdentifier { name: String },
}

pub type Result<T, E = CompileError> = std::result::Result<T, E>;
