//! Recursive-descent parser.
//!
//! Every construct of the grammar implements [`Grammar`]: `matches` looks at
//! the current token (and for terms one more) without consuming anything, and
//! `parse` consumes exactly the tokens of the construct. The first mismatch
//! aborts the whole file; there is no recovery.
mod expressions;
mod statements;
mod structure;

use crate::{
    error::Result,
    parse_tree::{Class, NodeKind},
    token_reader::TokenReader,
};

pub trait Grammar: Sized {
    fn matches(tokens: &TokenReader) -> bool;

    fn parse(tokens: &mut TokenReader) -> Result<Self>;
}

/// Parses the single class a source file must contain.
pub fn parse_class(tokens: &mut TokenReader) -> Result<Class> {
    let class = Class::parse(tokens)?;
    if tokens.has_more_tokens() {
        return tokens.unexpected(NodeKind::Class, "end of file");
    }
    log::debug!(
        "parsed class {} ({} subroutines)",
        class.name,
        class.subroutines.len()
    );
    return Ok(class);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CompileError, parse_tree::*, tokenizer::Tokenizer};

    fn reader(src: &str) -> TokenReader {
        TokenReader::new(Tokenizer::new().tokenize(src).unwrap())
    }

    fn expression(src: &str) -> Expression {
        let mut tokens = reader(src);
        let expr = Expression::parse(&mut tokens).unwrap();
        assert!(!tokens.has_more_tokens(), "unconsumed tokens after {src}");
        expr
    }

    #[test]
    fn operators_have_no_precedence() {
        let expr = expression("2 + 3 * 4");
        assert_eq!(expr.term, Term::IntegerConstant(2));
        assert_eq!(
            expr.rest,
            vec![
                (BinaryOp::Add, Term::IntegerConstant(3)),
                (BinaryOp::Mul, Term::IntegerConstant(4)),
            ]
        );
    }

    #[test]
    fn term_lookahead() {
        assert_eq!(expression("x").term, Term::Var("x".to_string()));
        assert!(matches!(expression("a[i + 1]").term, Term::Index { ref name, .. } if name == "a"));
        assert_eq!(
            expression("f(1, 2)").term,
            Term::Call(SubroutineCall {
                receiver: None,
                name: "f".to_string(),
                arguments: ExpressionList {
                    expressions: vec![expression("1"), expression("2")]
                },
            })
        );
        assert_eq!(
            expression("Math.abs()").term,
            Term::Call(SubroutineCall {
                receiver: Some("Math".to_string()),
                name: "abs".to_string(),
                arguments: ExpressionList::default(),
            })
        );
    }

    #[test]
    fn unary_and_parenthesized_terms() {
        let expr = expression("-(x) & ~true");
        assert_eq!(
            expr.term,
            Term::Unary {
                op: UnaryOp::Neg,
                term: Box::new(Term::Parenthesized(Box::new(expression("x")))),
            }
        );
        assert_eq!(
            expr.rest,
            vec![(
                BinaryOp::And,
                Term::Unary {
                    op: UnaryOp::Not,
                    term: Box::new(Term::KeywordConstant(KeywordConstant::True)),
                }
            )]
        );
    }

    #[test]
    fn class_structure() {
        let mut tokens = reader(
            "class Point { field int x, y; static Point origin;
               constructor Point new(int ax, int ay) { var int t; let x = ax; return this; }
               method void dispose() { do Memory.deAlloc(this); return; } }",
        );
        let class = parse_class(&mut tokens).unwrap();
        assert_eq!(class.name, "Point");
        assert_eq!(class.var_decs.len(), 2);
        assert_eq!(class.var_decs[0].names, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(class.var_decs[1].ty, Type::Class("Point".to_string()));
        let new = &class.subroutines[0];
        assert_eq!(new.kind, SubroutineKind::Constructor);
        assert_eq!(new.return_type, Some(Type::Class("Point".to_string())));
        assert_eq!(new.parameters.parameters.len(), 2);
        assert_eq!(new.body.var_decs.len(), 1);
        assert_eq!(new.body.statements.statements.len(), 2);
        assert_eq!(class.subroutines[1].return_type, None);
    }

    #[test]
    fn if_else_and_while() {
        let mut tokens = reader("if (x) { let y = 1; } else { } while (y) { }");
        let stmts = Statements::parse(&mut tokens).unwrap();
        match &stmts.statements[..] {
            [Statement::If(i), Statement::While(w)] => {
                assert_eq!(i.then_body.statements.len(), 1);
                assert_eq!(i.else_body, Some(Statements::default()));
                assert!(w.body.statements.is_empty());
            }
            other => panic!("unexpected statements {other:?}"),
        }
    }

    #[test]
    fn first_error_aborts() {
        let mut tokens = reader("class Main {\n function void main() {\n let x = ;\n } }");
        let err = parse_class(&mut tokens).unwrap_err();
        assert_eq!(
            err,
            CompileError::Syntax {
                line: 3,
                construct: NodeKind::Term,
                expected: "a term".to_string(),
                found: "symbol ';'".to_string(),
            }
        );
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let mut tokens = reader("class A { } class B { }");
        assert!(matches!(
            parse_class(&mut tokens),
            Err(CompileError::Syntax { construct: NodeKind::Class, .. })
        ));
    }
}
