use super::Grammar;
use crate::{
    error::Result,
    parse_tree::{
        Class, ClassVarDec, ClassVarKind, NodeKind, Parameter, ParameterList, Statements,
        SubroutineBody, SubroutineDec, SubroutineKind, Type, VarDec,
    },
    token_reader::TokenReader,
    tokens::{Keyword, Symbol, Token},
};

impl Grammar for Class {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::Class)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        tokens.expect_keyword(Keyword::Class, NodeKind::Class)?;
        let name = tokens.expect_identifier(NodeKind::Class, "class name")?;
        tokens.expect_symbol(Symbol::LeftBrace, NodeKind::Class)?;

        let mut var_decs = Vec::new();
        while ClassVarDec::matches(tokens) {
            var_decs.push(ClassVarDec::parse(tokens)?);
        }
        let mut subroutines = Vec::new();
        while SubroutineDec::matches(tokens) {
            subroutines.push(SubroutineDec::parse(tokens)?);
        }

        tokens.expect_symbol(Symbol::RightBrace, NodeKind::Class)?;
        Ok(Class {
            name,
            var_decs,
            subroutines,
        })
    }
}

impl Grammar for ClassVarDec {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::Static) || tokens.is_keyword(Keyword::Field)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        let kind = match tokens.current() {
            Some(Token::Keyword(Keyword::Static)) => ClassVarKind::Static,
            Some(Token::Keyword(Keyword::Field)) => ClassVarKind::Field,
            _ => return tokens.unexpected(NodeKind::ClassVarDec, "'static' or 'field'"),
        };
        tokens.advance();
        let ty = parse_type(tokens, NodeKind::ClassVarDec)?;
        let names = parse_names(tokens, NodeKind::ClassVarDec)?;
        Ok(ClassVarDec { kind, ty, names })
    }
}

impl Grammar for SubroutineDec {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::Constructor)
            || tokens.is_keyword(Keyword::Function)
            || tokens.is_keyword(Keyword::Method)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        let kind = match tokens.current() {
            Some(Token::Keyword(Keyword::Constructor)) => SubroutineKind::Constructor,
            Some(Token::Keyword(Keyword::Function)) => SubroutineKind::Function,
            Some(Token::Keyword(Keyword::Method)) => SubroutineKind::Method,
            _ => {
                return tokens.unexpected(
                    NodeKind::SubroutineDec,
                    "'constructor', 'function' or 'method'",
                )
            }
        };
        tokens.advance();

        let return_type = if tokens.is_keyword(Keyword::Void) {
            tokens.advance();
            None
        } else {
            Some(parse_type(tokens, NodeKind::SubroutineDec)?)
        };
        let name = tokens.expect_identifier(NodeKind::SubroutineDec, "subroutine name")?;

        tokens.expect_symbol(Symbol::LeftParen, NodeKind::SubroutineDec)?;
        let parameters = ParameterList::parse(tokens)?;
        tokens.expect_symbol(Symbol::RightParen, NodeKind::SubroutineDec)?;

        let body = SubroutineBody::parse(tokens)?;
        Ok(SubroutineDec {
            kind,
            return_type,
            name,
            parameters,
            body,
        })
    }
}

impl Grammar for ParameterList {
    fn matches(tokens: &TokenReader) -> bool {
        is_type(tokens) || tokens.is_symbol(Symbol::RightParen)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        let mut parameters = Vec::new();
        if tokens.is_symbol(Symbol::RightParen) {
            return Ok(ParameterList { parameters });
        }
        loop {
            let ty = parse_type(tokens, NodeKind::ParameterList)?;
            let name = tokens.expect_identifier(NodeKind::ParameterList, "parameter name")?;
            parameters.push(Parameter { ty, name });
            if !tokens.is_symbol(Symbol::Comma) {
                break;
            }
            tokens.advance();
        }
        Ok(ParameterList { parameters })
    }
}

impl Grammar for SubroutineBody {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_symbol(Symbol::LeftBrace)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        tokens.expect_symbol(Symbol::LeftBrace, NodeKind::SubroutineBody)?;
        let mut var_decs = Vec::new();
        while VarDec::matches(tokens) {
            var_decs.push(VarDec::parse(tokens)?);
        }
        let statements = Statements::parse(tokens)?;
        tokens.expect_symbol(Symbol::RightBrace, NodeKind::SubroutineBody)?;
        Ok(SubroutineBody {
            var_decs,
            statements,
        })
    }
}

impl Grammar for VarDec {
    fn matches(tokens: &TokenReader) -> bool {
        tokens.is_keyword(Keyword::Var)
    }

    fn parse(tokens: &mut TokenReader) -> Result<Self> {
        tokens.expect_keyword(Keyword::Var, NodeKind::VarDec)?;
        let ty = parse_type(tokens, NodeKind::VarDec)?;
        let names = parse_names(tokens, NodeKind::VarDec)?;
        Ok(VarDec { ty, names })
    }
}

fn is_type(tokens: &TokenReader) -> bool {
    tokens.is_keyword(Keyword::Int)
        || tokens.is_keyword(Keyword::Char)
        || tokens.is_keyword(Keyword::Boolean)
        || tokens.is_identifier()
}

fn parse_type(tokens: &mut TokenReader, construct: NodeKind) -> Result<Type> {
    let ty = match tokens.current() {
        Some(Token::Keyword(Keyword::Int)) => Type::Int,
        Some(Token::Keyword(Keyword::Char)) => Type::Char,
        Some(Token::Keyword(Keyword::Boolean)) => Type::Boolean,
        Some(Token::Identifier(class_name)) => Type::Class(class_name.clone()),
        _ => return tokens.unexpected(construct, "a type"),
    };
    tokens.advance();
    Ok(ty)
}

/// `varName (',' varName)* ';'`
fn parse_names(tokens: &mut TokenReader, construct: NodeKind) -> Result<Vec<String>> {
    let mut names = vec![tokens.expect_identifier(construct, "variable name")?];
    while tokens.is_symbol(Symbol::Comma) {
        tokens.advance();
        names.push(tokens.expect_identifier(construct, "variable name")?);
    }
    tokens.expect_symbol(Symbol::Semicolon, construct)?;
    Ok(names)
}
