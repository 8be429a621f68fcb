//! Parse tree for a single Jack class.
//!
//! Each construct of the grammar is its own node type with named fields. The
//! tree is built once by the parser, walked once by the compilation engine and
//! then dropped.
use derive_more::Display;

use crate::tokens::{Keyword, Symbol};

/// The constructs of the grammar. Rendered with the tag names used by the
/// parse tree XML output.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    #[display(fmt = "class")]
    Class,
    #[display(fmt = "classVarDec")]
    ClassVarDec,
    #[display(fmt = "subroutineDec")]
    SubroutineDec,
    #[display(fmt = "subroutineBody")]
    SubroutineBody,
    #[display(fmt = "varDec")]
    VarDec,
    #[display(fmt = "statements")]
    Statements,
    #[display(fmt = "letStatement")]
    LetStatement,
    #[display(fmt = "ifStatement")]
    IfStatement,
    #[display(fmt = "whileStatement")]
    WhileStatement,
    #[display(fmt = "doStatement")]
    DoStatement,
    #[display(fmt = "returnStatement")]
    ReturnStatement,
    #[display(fmt = "expression")]
    Expression,
    #[display(fmt = "term")]
    Term,
    #[display(fmt = "expressionList")]
    ExpressionList,
    #[display(fmt = "parameterList")]
    ParameterList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    pub var_decs: Vec<ClassVarDec>,
    pub subroutines: Vec<SubroutineDec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassVarKind {
    Static,
    Field,
}

impl ClassVarKind {
    pub fn keyword(self) -> Keyword {
        match self {
            ClassVarKind::Static => Keyword::Static,
            ClassVarKind::Field => Keyword::Field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassVarDec {
    pub kind: ClassVarKind,
    pub ty: Type,
    pub names: Vec<String>,
}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Type {
    #[display(fmt = "int")]
    Int,
    #[display(fmt = "char")]
    Char,
    #[display(fmt = "boolean")]
    Boolean,
    #[display(fmt = "{}", _0)]
    Class(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl SubroutineKind {
    pub fn keyword(self) -> Keyword {
        match self {
            SubroutineKind::Constructor => Keyword::Constructor,
            SubroutineKind::Function => Keyword::Function,
            SubroutineKind::Method => Keyword::Method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubroutineDec {
    pub kind: SubroutineKind,
    /// `None` for `void`.
    pub return_type: Option<Type>,
    pub name: String,
    pub parameters: ParameterList,
    pub body: SubroutineBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterList {
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: Type,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubroutineBody {
    pub var_decs: Vec<VarDec>,
    pub statements: Statements,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDec {
    pub ty: Type,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statements {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Let(LetStatement),
    If(IfStatement),
    While(WhileStatement),
    Do(DoStatement),
    Return(ReturnStatement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStatement {
    pub name: String,
    /// Present for `let a[i] = ...`.
    pub index: Option<Expression>,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_body: Statements,
    pub else_body: Option<Statements>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Statements,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoStatement {
    pub call: SubroutineCall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
}

/// `term (op term)*`. Operators have no precedence and apply left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub term: Term,
    pub rest: Vec<(BinaryOp, Term)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    IntegerConstant(u32),
    StringConstant(String),
    KeywordConstant(KeywordConstant),
    Var(String),
    Index {
        name: String,
        index: Box<Expression>,
    },
    Parenthesized(Box<Expression>),
    Unary {
        op: UnaryOp,
        term: Box<Term>,
    },
    Call(SubroutineCall),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordConstant {
    True,
    False,
    Null,
    This,
}

impl KeywordConstant {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::True => Some(KeywordConstant::True),
            Keyword::False => Some(KeywordConstant::False),
            Keyword::Null => Some(KeywordConstant::Null),
            Keyword::This => Some(KeywordConstant::This),
            _ => None,
        }
    }

    pub fn keyword(self) -> Keyword {
        match self {
            KeywordConstant::True => Keyword::True,
            KeywordConstant::False => Keyword::False,
            KeywordConstant::Null => Keyword::Null,
            KeywordConstant::This => Keyword::This,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        match symbol {
            Symbol::Minus => Some(UnaryOp::Neg),
            Symbol::Tilde => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> Symbol {
        match self {
            UnaryOp::Neg => Symbol::Minus,
            UnaryOp::Not => Symbol::Tilde,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Eq,
}

impl BinaryOp {
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        let op = match symbol {
            Symbol::Plus => BinaryOp::Add,
            Symbol::Minus => BinaryOp::Sub,
            Symbol::Asterisk => BinaryOp::Mul,
            Symbol::Slash => BinaryOp::Div,
            Symbol::Ampersand => BinaryOp::And,
            Symbol::Pipe => BinaryOp::Or,
            Symbol::LessThan => BinaryOp::Lt,
            Symbol::GreaterThan => BinaryOp::Gt,
            Symbol::Equals => BinaryOp::Eq,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> Symbol {
        match self {
            BinaryOp::Add => Symbol::Plus,
            BinaryOp::Sub => Symbol::Minus,
            BinaryOp::Mul => Symbol::Asterisk,
            BinaryOp::Div => Symbol::Slash,
            BinaryOp::And => Symbol::Ampersand,
            BinaryOp::Or => Symbol::Pipe,
            BinaryOp::Lt => Symbol::LessThan,
            BinaryOp::Gt => Symbol::GreaterThan,
            BinaryOp::Eq => Symbol::Equals,
        }
    }
}

/// `name(args)` or `receiver.name(args)`. Whether the receiver is a variable
/// or a class name is decided during code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubroutineCall {
    pub receiver: Option<String>,
    pub name: String,
    pub arguments: ExpressionList,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpressionList {
    pub expressions: Vec<Expression>,
}
