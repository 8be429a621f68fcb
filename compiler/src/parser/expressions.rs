use super::Grammar;
use crate::{
    error::Result,
    parse_tree::{
        BinaryOp, Expression, ExpressionList, KeywordConstant, NodeKind, SubroutineCall, Term,
        UnaryOp,
    },
    token_reader::TokenReader,
    tokens::{Symbol, Token},
};

impl Grammar for Expression {
    fn matches(tokens: &TokenReader) -> bool {
        Term::matches(tokens)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        let term = Term::parse(tokens)?;
        let mut rest = Vec::new();
        while let Some(op) = current_op(tokens) {
            tokens.advance();
            rest.push((op, Term::parse(tokens)?));
        }
        Ok(Expression { term, rest })
    }
}

fn current_op(tokens: &TokenReader) -> Option<BinaryOp> {
    match tokens.current() {
        Some(Token::Symbol(s)) => BinaryOp::from_symbol(*s),
        _ => None,
    }
}

impl Grammar for Term {
    fn matches(tokens: &TokenReader) -> bool {
        match tokens.current() {
            Some(Token::IntegerConstant(_))
            | Some(Token::StringConstant(_))
            | Some(Token::Identifier(_)) => true,
            Some(Token::Keyword(kw)) => KeywordConstant::from_keyword(*kw).is_some(),
            Some(Token::Symbol(s)) => *s == Symbol::LeftParen || UnaryOp::from_symbol(*s).is_some(),
            None => false,
        }
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        if tokens.is_identifier() {
            return parse_identifier_term(tokens);
        }
        let term = match tokens.current() {
            Some(Token::IntegerConstant(value)) => Term::IntegerConstant(*value),
            Some(Token::StringConstant(value)) => Term::StringConstant(value.clone()),
            Some(Token::Keyword(kw)) => match KeywordConstant::from_keyword(*kw) {
                Some(constant) => Term::KeywordConstant(constant),
                None => return tokens.unexpected(NodeKind::Term, "a term"),
            },
            Some(Token::Symbol(Symbol::LeftParen)) => {
                tokens.advance();
                let inner = Expression::parse(tokens)?;
                tokens.expect_symbol(Symbol::RightParen, NodeKind::Term)?;
                return Ok(Term::Parenthesized(Box::new(inner)));
            }
            Some(Token::Symbol(s)) => match UnaryOp::from_symbol(*s) {
                Some(op) => {
                    tokens.advance();
                    let term = Term::parse(tokens)?;
                    return Ok(Term::Unary {
                        op,
                        term: Box::new(term),
                    });
                }
                None => return tokens.unexpected(NodeKind::Term, "a term"),
            },
            _ => return tokens.unexpected(NodeKind::Term, "a term"),
        };
        tokens.advance();
        Ok(term)
    }
}

/// An identifier starts a variable, an array element or a call; the token
/// after it decides which.
fn parse_identifier_term(tokens: &mut TokenReader) -> Result<Term> {
    if SubroutineCall::matches(tokens) {
        return Ok(Term::Call(SubroutineCall::parse_in(tokens, NodeKind::Term)?));
    }
    let name = tokens.expect_identifier(NodeKind::Term, "variable name")?;
    if tokens.is_symbol(Symbol::LeftBracket) {
        tokens.advance();
        let index = Expression::parse(tokens)?;
        tokens.expect_symbol(Symbol::RightBracket, NodeKind::Term)?;
        return Ok(Term::Index {
            name,
            index: Box::new(index),
        });
    }
    Ok(Term::Var(name))
}

impl SubroutineCall {
    pub fn matches(tokens: &TokenReader) -> bool {
        tokens.is_identifier()
            && (tokens.is_symbol_at(1, Symbol::LeftParen) || tokens.is_symbol_at(1, Symbol::Dot))
    }

    /// A call has no node of its own; its tokens belong to `construct`.
    pub fn parse_in(tokens: &mut TokenReader, construct: NodeKind) -> Result<Self> {
        let first = tokens.expect_identifier(construct, "subroutine, class or variable name")?;
        let (receiver, name) = if tokens.is_symbol(Symbol::Dot) {
            tokens.advance();
            let name = tokens.expect_identifier(construct, "subroutine name")?;
            (Some(first), name)
        } else {
            (None, first)
        };
        tokens.expect_symbol(Symbol::LeftParen, construct)?;
        let arguments = ExpressionList::parse(tokens)?;
        tokens.expect_symbol(Symbol::RightParen, construct)?;
        Ok(SubroutineCall {
            receiver,
            name,
            arguments,
        })
    }
}

impl Grammar for ExpressionList {
    fn matches(tokens: &TokenReader) -> bool {
        Expression::matches(tokens) || tokens.is_symbol(Symbol::RightParen)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        let mut expressions = Vec::new();
        if Expression::matches(tokens) {
            expressions.push(Expression::parse(tokens)?);
            while tokens.is_symbol(Symbol::Comma) {
                tokens.advance();
                expressions.push(Expression::parse(tokens)?);
            }
        }
        Ok(ExpressionList { expressions })
    }
}
