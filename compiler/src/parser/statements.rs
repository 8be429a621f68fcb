use super::Grammar;
use crate::{
    error::Result,
    parse_tree::{
        DoStatement, Expression, IfStatement, LetStatement, NodeKind, ReturnStatement, Statement,
        Statements, SubroutineCall, WhileStatement,
    },
    token_reader::TokenReader,
    tokens::{Keyword, Symbol},
};

impl Grammar for Statements {
    /// Statements may be empty, so a closing brace also starts them.
    fn matches(tokens: &TokenReader) -> bool {
        Statement::matches(tokens) || tokens.is_symbol(Symbol::RightBrace)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        let mut statements = Vec::new();
        while Statement::matches(tokens) {
            statements.push(Statement::parse(tokens)?);
        }
        Ok(Statements { statements })
    }
}

impl Grammar for Statement {
    fn matches(tokens: &TokenReader) -> bool {
        LetStatement::matches(tokens)
            || IfStatement::matches(tokens)
            || WhileStatement::matches(tokens)
            || DoStatement::matches(tokens)
            || ReturnStatement::matches(tokens)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        if LetStatement::matches(tokens) {
            Ok(Statement::Let(LetStatement::parse(tokens)?))
        } else if IfStatement::matches(tokens) {
            Ok(Statement::If(IfStatement::parse(tokens)?))
        } else if WhileStatement::matches(tokens) {
            Ok(Statement::While(WhileStatement::parse(tokens)?))
        } else if DoStatement::matches(tokens) {
            Ok(Statement::Do(DoStatement::parse(tokens)?))
        } else if ReturnStatement::matches(tokens) {
            Ok(Statement::Return(ReturnStatement::parse(tokens)?))
        } else {
            tokens.unexpected(NodeKind::Statements, "a statement")
        }
    }
}

impl Grammar for LetStatement {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::Let)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        tokens.expect_keyword(Keyword::Let, NodeKind::LetStatement)?;
        let name = tokens.expect_identifier(NodeKind::LetStatement, "variable name")?;
        let index = if tokens.is_symbol(Symbol::LeftBracket) {
            tokens.advance();
            let index = Expression::parse(tokens)?;
            tokens.expect_symbol(Symbol::RightBracket, NodeKind::LetStatement)?;
            Some(index)
        } else {
            None
        };
        tokens.expect_symbol(Symbol::Equals, NodeKind::LetStatement)?;
        let value = Expression::parse(tokens)?;
        tokens.expect_symbol(Symbol::Semicolon, NodeKind::LetStatement)?;
        Ok(LetStatement { name, index, value })
    }
}

impl Grammar for IfStatement {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::If)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        tokens.expect_keyword(Keyword::If, NodeKind::IfStatement)?;
        let condition = parse_condition(tokens, NodeKind::IfStatement)?;
        let then_body = parse_block(tokens, NodeKind::IfStatement)?;
        let else_body = if tokens.is_keyword(Keyword::Else) {
            tokens.advance();
            Some(parse_block(tokens, NodeKind::IfStatement)?)
        } else {
            None
        };
        Ok(IfStatement {
            condition,
            then_body,
            else_body,
        })
    }
}

impl Grammar for WhileStatement {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::While)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        tokens.expect_keyword(Keyword::While, NodeKind::WhileStatement)?;
        let condition = parse_condition(tokens, NodeKind::WhileStatement)?;
        let body = parse_block(tokens, NodeKind::WhileStatement)?;
        Ok(WhileStatement { condition, body })
    }
}

impl Grammar for DoStatement {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::Do)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        tokens.expect_keyword(Keyword::Do, NodeKind::DoStatement)?;
        let call = SubroutineCall::parse_in(tokens, NodeKind::DoStatement)?;
        tokens.expect_symbol(Symbol::Semicolon, NodeKind::DoStatement)?;
        Ok(DoStatement { call })
    }
}

impl Grammar for ReturnStatement {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::Return)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        tokens.expect_keyword(Keyword::Return, NodeKind::ReturnStatement)?;
        let value = if Expression::matches(tokens) {
            Some(Expression::parse(tokens)?)
        } else {
            None
        };
        tokens.expect_symbol(Symbol::Semicolon, NodeKind::ReturnStatement)?;
        Ok(ReturnStatement { value })
    }
}

/// `'(' expression ')'`
fn parse_condition(tokens: &mut TokenReader, construct: NodeKind) -> Result<Expression> {
    tokens.expect_symbol(Symbol::LeftParen, construct)?;
    let condition = Expression::parse(tokens)?;
    tokens.expect_symbol(Symbol::RightParen, construct)?;
    Ok(condition)
}

/// `'{' statements '}'`
fn parse_block(tokens: &mut TokenReader, construct: NodeKind) -> Result<Statements> {
    tokens.expect_symbol(Symbol::LeftBrace, construct)?;
    let statements = Statements::parse(tokens)?;
    tokens.expect_symbol(Symbol::RightBrace, construct)?;
    Ok(statements)
}
