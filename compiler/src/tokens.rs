use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Token {
    #[display(fmt = "keyword '{}'", _0)]
    Keyword(Keyword),
    #[display(fmt = "symbol '{}'", _0)]
    Symbol(Symbol),
    #[display(fmt = "integer constant {}", _0)]
    IntegerConstant(u32),
    #[display(fmt = "string constant \"{}\"", _0)]
    StringConstant(String),
    #[display(fmt = "identifier '{}'", _0)]
    Identifier(String),
}

/// A token together with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedToken {
    pub token: Token,
    pub line: usize,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    #[display(fmt = "class")]
    Class,
    #[display(fmt = "constructor")]
    Constructor,
    #[display(fmt = "function")]
    Function,
    #[display(fmt = "method")]
    Method,
    #[display(fmt = "field")]
    Field,
    #[display(fmt = "static")]
    Static,
    #[display(fmt = "var")]
    Var,
    #[display(fmt = "int")]
    Int,
    #[display(fmt = "char")]
    Char,
    #[display(fmt = "boolean")]
    Boolean,
    #[display(fmt = "void")]
    Void,
    #[display(fmt = "true")]
    True,
    #[display(fmt = "false")]
    False,
    #[display(fmt = "null")]
    Null,
    #[display(fmt = "this")]
    This,
    #[display(fmt = "let")]
    Let,
    #[display(fmt = "do")]
    Do,
    #[display(fmt = "if")]
    If,
    #[display(fmt = "else")]
    Else,
    #[display(fmt = "while")]
    While,
    #[display(fmt = "return")]
    Return,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        let kw = match word {
            "class" => Keyword::Class,
            "constructor" => Keyword::Constructor,
            "function" => Keyword::Function,
            "method" => Keyword::Method,
            "field" => Keyword::Field,
            "static" => Keyword::Static,
            "var" => Keyword::Var,
            "int" => Keyword::Int,
            "char" => Keyword::Char,
            "boolean" => Keyword::Boolean,
            "void" => Keyword::Void,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "this" => Keyword::This,
            "let" => Keyword::Let,
            "do" => Keyword::Do,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "return" => Keyword::Return,
            _ => return None,
        };
        return Some(kw);
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    #[display(fmt = "{{")]
    LeftBrace,
    #[display(fmt = "}}")]
    RightBrace,
    #[display(fmt = "(")]
    LeftParen,
    #[display(fmt = ")")]
    RightParen,
    #[display(fmt = "[")]
    LeftBracket,
    #[display(fmt = "]")]
    RightBracket,
    #[display(fmt = ".")]
    Dot,
    #[display(fmt = ",")]
    Comma,
    #[display(fmt = ";")]
    Semicolon,
    #[display(fmt = "+")]
    Plus,
    #[display(fmt = "-")]
    Minus,
    #[display(fmt = "*")]
    Asterisk,
    #[display(fmt = "/")]
    Slash,
    #[display(fmt = "&")]
    Ampersand,
    #[display(fmt = "|")]
    Pipe,
    #[display(fmt = "<")]
    LessThan,
    #[display(fmt = ">")]
    GreaterThan,
    #[display(fmt = "=")]
    Equals,
    #[display(fmt = "~")]
    Tilde,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        let sym = match c {
            '{' => Symbol::LeftBrace,
            '}' => Symbol::RightBrace,
            '(' => Symbol::LeftParen,
            ')' => Symbol::RightParen,
            '[' => Symbol::LeftBracket,
            ']' => Symbol::RightBracket,
            '.' => Symbol::Dot,
            ',' => Symbol::Comma,
            ';' => Symbol::Semicolon,
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            '*' => Symbol::Asterisk,
            '/' => Symbol::Slash,
            '&' => Symbol::Ampersand,
            '|' => Symbol::Pipe,
            '<' => Symbol::LessThan,
            '>' => Symbol::GreaterThan,
            '=' => Symbol::Equals,
            '~' => Symbol::Tilde,
            _ => return None,
        };
        return Some(sym);
    }
}
