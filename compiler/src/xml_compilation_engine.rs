//! Renders parse trees and token lists in the nand2tetris XML comparison
//! format.
use std::io::Write;

use xml::{
    writer::{Result, XmlEvent},
    EmitterConfig, EventWriter,
};

use crate::{
    parse_tree::{
        Class, ClassVarDec, Expression, ExpressionList, NodeKind, ParameterList, Statement,
        Statements, SubroutineBody, SubroutineCall, SubroutineDec, Term, Type, VarDec,
    },
    tokens::{Keyword, LocatedToken, Symbol, Token},
};

struct XmlCompilationEngine<W: Write> {
    writer: EventWriter<W>,
}

/// Writes the parse tree of `class` to `sink`.
pub fn write_class<W: Write>(class: &Class, sink: W) -> Result<()> {
    let mut e = XmlCompilationEngine::new(sink);
    e.compile_class(class)
}

/// Writes the flat token list wrapped in a `<tokens>` element.
pub fn write_tokens<W: Write>(tokens: &[LocatedToken], sink: W) -> Result<()> {
    let mut e = XmlCompilationEngine::new(sink);
    e.writer.write(XmlEvent::start_element("tokens"))?;
    for t in tokens {
        e.write_token(&t.token)?;
    }
    e.writer.write(XmlEvent::end_element())?;
    return Ok(());
}

impl<W: Write> XmlCompilationEngine<W> {
    fn new(sink: W) -> Self {
        let writer = EmitterConfig::new()
            .perform_indent(true)
            .write_document_declaration(false)
            .normalize_empty_elements(false)
            .create_writer(sink);
        XmlCompilationEngine { writer }
    }

    fn start(&mut self, kind: NodeKind) -> Result<()> {
        self.writer
            .write(XmlEvent::start_element(kind.to_string().as_str()))
    }

    fn end(&mut self) -> Result<()> {
        self.writer.write(XmlEvent::end_element())
    }

    fn terminal(&mut self, tag: &str, text: &str) -> Result<()> {
        self.writer.write(XmlEvent::start_element(tag))?;
        self.writer.write(XmlEvent::characters(&format!(" {text} ")))?;
        self.writer.write(XmlEvent::end_element())
    }

    fn write_keyword(&mut self, k: Keyword) -> Result<()> {
        self.terminal("keyword", &k.to_string())
    }

    fn write_sym(&mut self, s: Symbol) -> Result<()> {
        self.terminal("symbol", &s.to_string())
    }

    fn write_identifier(&mut self, name: &str) -> Result<()> {
        self.terminal("identifier", name)
    }

    fn write_token(&mut self, token: &Token) -> Result<()> {
        match token {
            Token::Keyword(k) => self.write_keyword(*k),
            Token::Symbol(s) => self.write_sym(*s),
            Token::IntegerConstant(i) => self.terminal("integerConstant", &i.to_string()),
            Token::StringConstant(s) => self.terminal("stringConstant", s),
            Token::Identifier(name) => self.write_identifier(name),
        }
    }

    fn write_type(&mut self, ty: &Type) -> Result<()> {
        match ty {
            Type::Int => self.write_keyword(Keyword::Int),
            Type::Char => self.write_keyword(Keyword::Char),
            Type::Boolean => self.write_keyword(Keyword::Boolean),
            Type::Class(name) => self.write_identifier(name),
        }
    }

    /// `name (, name)*`
    fn write_names(&mut self, names: &[String]) -> Result<()> {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.write_sym(Symbol::Comma)?;
            }
            self.write_identifier(name)?;
        }
        return Ok(());
    }

    fn compile_class(&mut self, class: &Class) -> Result<()> {
        self.start(NodeKind::Class)?;
        self.write_keyword(Keyword::Class)?;
        self.write_identifier(&class.name)?;
        self.write_sym(Symbol::LeftBrace)?;
        for dec in &class.var_decs {
            self.compile_class_var_dec(dec)?;
        }
        for sub in &class.subroutines {
            self.compile_sub_routine_dec(sub)?;
        }
        self.write_sym(Symbol::RightBrace)?;
        self.end()
    }

    fn compile_class_var_dec(&mut self, dec: &ClassVarDec) -> Result<()> {
        self.start(NodeKind::ClassVarDec)?;
        self.write_keyword(dec.kind.keyword())?;
        self.write_type(&dec.ty)?;
        self.write_names(&dec.names)?;
        self.write_sym(Symbol::Semicolon)?;
        self.end()
    }

    fn compile_sub_routine_dec(&mut self, sub: &SubroutineDec) -> Result<()> {
        self.start(NodeKind::SubroutineDec)?;
        self.write_keyword(sub.kind.keyword())?;
        match &sub.return_type {
            Some(ty) => self.write_type(ty)?,
            None => self.write_keyword(Keyword::Void)?,
        }
        self.write_identifier(&sub.name)?;
        self.write_sym(Symbol::LeftParen)?;
        self.compile_parameter_list(&sub.parameters)?;
        self.write_sym(Symbol::RightParen)?;
        self.compile_sub_routine_body(&sub.body)?;
        self.end()
    }

    fn compile_parameter_list(&mut self, list: &ParameterList) -> Result<()> {
        self.start(NodeKind::ParameterList)?;
        for (i, param) in list.parameters.iter().enumerate() {
            if i > 0 {
                self.write_sym(Symbol::Comma)?;
            }
            self.write_type(&param.ty)?;
            self.write_identifier(&param.name)?;
        }
        self.end()
    }

    fn compile_sub_routine_body(&mut self, body: &SubroutineBody) -> Result<()> {
        self.start(NodeKind::SubroutineBody)?;
        self.write_sym(Symbol::LeftBrace)?;
        for dec in &body.var_decs {
            self.compile_var_dec(dec)?;
        }
        self.compile_statements(&body.statements)?;
        self.write_sym(Symbol::RightBrace)?;
        self.end()
    }

    fn compile_var_dec(&mut self, dec: &VarDec) -> Result<()> {
        self.start(NodeKind::VarDec)?;
        self.write_keyword(Keyword::Var)?;
        self.write_type(&dec.ty)?;
        self.write_names(&dec.names)?;
        self.write_sym(Symbol::Semicolon)?;
        self.end()
    }

    fn compile_statements(&mut self, statements: &Statements) -> Result<()> {
        self.start(NodeKind::Statements)?;
        for statement in &statements.statements {
            self.compile_statement(statement)?;
        }
        self.end()
    }

    /// `{ statements }`
    fn compile_block(&mut self, statements: &Statements) -> Result<()> {
        self.write_sym(Symbol::LeftBrace)?;
        self.compile_statements(statements)?;
        self.write_sym(Symbol::RightBrace)
    }

    /// `( expression )`
    fn compile_condition(&mut self, condition: &Expression) -> Result<()> {
        self.write_sym(Symbol::LeftParen)?;
        self.compile_expression(condition)?;
        self.write_sym(Symbol::RightParen)
    }

    fn compile_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Let(s) => {
                self.start(NodeKind::LetStatement)?;
                self.write_keyword(Keyword::Let)?;
                self.write_identifier(&s.name)?;
                if let Some(index) = &s.index {
                    self.write_sym(Symbol::LeftBracket)?;
                    self.compile_expression(index)?;
                    self.write_sym(Symbol::RightBracket)?;
                }
                self.write_sym(Symbol::Equals)?;
                self.compile_expression(&s.value)?;
                self.write_sym(Symbol::Semicolon)?;
            }
            Statement::If(s) => {
                self.start(NodeKind::IfStatement)?;
                self.write_keyword(Keyword::If)?;
                self.compile_condition(&s.condition)?;
                self.compile_block(&s.then_body)?;
                if let Some(else_body) = &s.else_body {
                    self.write_keyword(Keyword::Else)?;
                    self.compile_block(else_body)?;
                }
            }
            Statement::While(s) => {
                self.start(NodeKind::WhileStatement)?;
                self.write_keyword(Keyword::While)?;
                self.compile_condition(&s.condition)?;
                self.compile_block(&s.body)?;
            }
            Statement::Do(s) => {
                self.start(NodeKind::DoStatement)?;
                self.write_keyword(Keyword::Do)?;
                self.compile_subroutine_call(&s.call)?;
                self.write_sym(Symbol::Semicolon)?;
            }
            Statement::Return(s) => {
                self.start(NodeKind::ReturnStatement)?;
                self.write_keyword(Keyword::Return)?;
                if let Some(value) = &s.value {
                    self.compile_expression(value)?;
                }
                self.write_sym(Symbol::Semicolon)?;
            }
        }
        self.end()
    }

    fn compile_expression(&mut self, expression: &Expression) -> Result<()> {
        self.start(NodeKind::Expression)?;
        self.compile_term(&expression.term)?;
        for (op, term) in &expression.rest {
            self.write_sym(op.symbol())?;
            self.compile_term(term)?;
        }
        self.end()
    }

    fn compile_term(&mut self, term: &Term) -> Result<()> {
        self.start(NodeKind::Term)?;
        match term {
            Term::IntegerConstant(i) => self.terminal("integerConstant", &i.to_string())?,
            Term::StringConstant(s) => self.terminal("stringConstant", s)?,
            Term::KeywordConstant(k) => self.write_keyword(k.keyword())?,
            Term::Var(name) => self.write_identifier(name)?,
            Term::Index { name, index } => {
                self.write_identifier(name)?;
                self.write_sym(Symbol::LeftBracket)?;
                self.compile_expression(index)?;
                self.write_sym(Symbol::RightBracket)?;
            }
            Term::Parenthesized(inner) => self.compile_condition(inner)?,
            Term::Unary { op, term } => {
                self.write_sym(op.symbol())?;
                self.compile_term(term)?;
            }
            Term::Call(call) => self.compile_subroutine_call(call)?,
        }
        self.end()
    }

    /// Calls have no element of their own; their tokens sit directly in the
    /// enclosing `term` or `doStatement`.
    fn compile_subroutine_call(&mut self, call: &SubroutineCall) -> Result<()> {
        if let Some(receiver) = &call.receiver {
            self.write_identifier(receiver)?;
            self.write_sym(Symbol::Dot)?;
        }
        self.write_identifier(&call.name)?;
        self.write_sym(Symbol::LeftParen)?;
        self.compile_expression_list(&call.arguments)?;
        self.write_sym(Symbol::RightParen)
    }

    fn compile_expression_list(&mut self, list: &ExpressionList) -> Result<()> {
        self.start(NodeKind::ExpressionList)?;
        for (i, expression) in list.expressions.iter().enumerate() {
            if i > 0 {
                self.write_sym(Symbol::Comma)?;
            }
            self.compile_expression(expression)?;
        }
        self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::parse_class, token_reader::TokenReader, tokenizer::Tokenizer};

    fn render_class(src: &str) -> String {
        let tokens = Tokenizer::new().tokenize(src).unwrap();
        let class = parse_class(&mut TokenReader::new(tokens)).unwrap();
        let mut out = Vec::new();
        write_class(&class, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn terminals_are_space_padded_and_escaped() {
        let tokens = Tokenizer::new().tokenize("if (x < 1) {}").unwrap();
        let mut out = Vec::new();
        write_tokens(&tokens, &mut out).unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert!(xml.starts_with("<tokens>"));
        assert!(xml.contains("<keyword> if </keyword>"));
        assert!(xml.contains("<identifier> x </identifier>"));
        assert!(xml.contains("<symbol> &lt; </symbol>"));
        assert!(xml.contains("<integerConstant> 1 </integerConstant>"));
        assert!(xml.trim_end().ends_with("</tokens>"));
    }

    #[test]
    fn tree_nests_constructs() {
        let xml = render_class("class M { function void f() { do g(1); return; } }");
        let order = [
            "<class>",
            "<subroutineDec>",
            "<parameterList>",
            "<subroutineBody>",
            "<statements>",
            "<doStatement>",
            "<expressionList>",
            "<expression>",
            "<term>",
            "<returnStatement>",
        ];
        let positions: Vec<_> = order.iter().map(|tag| xml.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!xml.contains("<classVarDec>"));
        assert!(xml.contains("<keyword> void </keyword>"));
        assert!(!xml.contains("<parameterList />"));
    }
}
