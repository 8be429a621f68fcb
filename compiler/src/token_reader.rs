//! One-directional cursor over a tokenized source file.
use std::collections::VecDeque;

use crate::{
    error::{CompileError, Result},
    parse_tree::NodeKind,
    tokens::{Keyword, LocatedToken, Symbol, Token},
};

pub struct TokenReader {
    tokens: VecDeque<LocatedToken>,
    last_line: usize,
}

impl TokenReader {
    pub fn new(tokens: Vec<LocatedToken>) -> Self {
        TokenReader {
            tokens: tokens.into(),
            last_line: 1,
        }
    }

    pub fn current(&self) -> Option<&Token> {
        self.peek(0)
    }

    /// Looks `n` tokens past the current one without consuming anything.
    pub fn peek(&self, n: usize) -> Option<&Token> {
        self.tokens.get(n).map(|t| &t.token)
    }

    pub fn advance(&mut self) -> Option<Token> {
        let next = self.tokens.pop_front()?;
        self.last_line = next.line;
        return Some(next.token);
    }

    pub fn has_more_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Line of the current token, or of the last consumed one at end of input.
    pub fn line(&self) -> usize {
        self.tokens.front().map_or(self.last_line, |t| t.line)
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.is_symbol_at(0, symbol)
    }

    pub fn is_symbol_at(&self, n: usize, symbol: Symbol) -> bool {
        matches!(self.peek(n), Some(Token::Symbol(s)) if *s == symbol)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.current(), Some(Token::Keyword(k)) if *k == keyword)
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.current(), Some(Token::Identifier(_)))
    }

    pub fn expect_symbol(&mut self, symbol: Symbol, construct: NodeKind) -> Result<()> {
        if self.is_symbol(symbol) {
            self.advance();
            return Ok(());
        }
        self.unexpected(construct, format!("'{symbol}'"))
    }

    pub fn expect_keyword(&mut self, keyword: Keyword, construct: NodeKind) -> Result<()> {
        if self.is_keyword(keyword) {
            self.advance();
            return Ok(());
        }
        self.unexpected(construct, format!("'{keyword}'"))
    }

    pub fn expect_identifier(&mut self, construct: NodeKind, what: &str) -> Result<String> {
        if self.is_identifier() {
            if let Some(Token::Identifier(name)) = self.advance() {
                return Ok(name);
            }
        }
        self.unexpected(construct, what)
    }

    /// Builds the syntax error for the current token.
    pub fn unexpected<T>(&self, construct: NodeKind, expected: impl Into<String>) -> Result<T> {
        let found = match self.current() {
            Some(token) => token.to_string(),
            None => "end of file".to_string(),
        };
        Err(CompileError::Syntax {
            line: self.line(),
            construct,
            expected: expected.into(),
            found,
        })
    }
}
