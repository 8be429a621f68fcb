use regex::Regex;

use crate::{
    error::{CompileError, Result},
    tokens::{Keyword, LocatedToken, Symbol, Token},
};

/// Largest integer constant the VM can push.
pub const MAX_INT_CONSTANT: u32 = 32767;

pub struct Tokenizer {
    re: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        let comment = r"//[^\n]*";
        let comments = r"/\*[\s\S]*?\*/";
        let open_comments = r"/\*";
        let symbols = r"[{}()\[\].,;+\-*/&|<>=~]";
        let str_pattern = "\"[^\"\n]*\"";
        let word_pattern = r"[_a-zA-Z][_a-zA-Z0-9]*";
        let whitespace = r"\s+";
        let pattern = format!(
            "({comment})|({comments})|({open_comments})|({symbols})|({str_pattern})|({word_pattern})|([0-9]+)|({whitespace})|(.)"
        );
        return Tokenizer {
            re: Regex::new(&pattern).expect("regex syntax error."),
        };
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<LocatedToken>> {
        let mut tokens = Vec::new();
        let mut line = 1;
        for cap in self.re.captures_iter(text) {
            let whole = cap.get(0).map_or("", |m| m.as_str());
            let token = if cap.get(1).is_some() || cap.get(2).is_some() || cap.get(8).is_some() {
                None
            } else if cap.get(3).is_some() {
                return Err(lex_error(line, "unterminated block comment"));
            } else if let Some(sm) = cap.get(4) {
                let c = sm.as_str().chars().next().and_then(Symbol::from_char);
                c.map(Token::Symbol)
            } else if let Some(s) = cap.get(5) {
                let r = &s.as_str()[1..s.as_str().len() - 1];
                if let Some(c) = r.chars().find(|c| !c.is_ascii()) {
                    return Err(lex_error(
                        line,
                        &format!("character '{c}' in string constant is not ASCII"),
                    ));
                }
                Some(Token::StringConstant(r.to_string()))
            } else if let Some(word) = cap.get(6) {
                let word = word.as_str();
                match Keyword::from_word(word) {
                    Some(kw) => Some(Token::Keyword(kw)),
                    None => Some(Token::Identifier(word.to_string())),
                }
            } else if let Some(digits) = cap.get(7) {
                Some(Token::IntegerConstant(parse_int_constant(digits.as_str(), line)?))
            } else if whole == "\"" {
                return Err(lex_error(line, "unterminated string constant"));
            } else {
                return Err(lex_error(line, &format!("unexpected character '{whole}'")));
            };
            if let Some(token) = token {
                tokens.push(LocatedToken { token, line });
            }
            line += whole.matches('\n').count();
        }
        log::trace!("tokenized {} tokens over {} lines", tokens.len(), line);
        return Ok(tokens);
    }
}

fn parse_int_constant(digits: &str, line: usize) -> Result<u32> {
    match digits.parse::<u32>() {
        Ok(v) if v <= MAX_INT_CONSTANT => Ok(v),
        _ => Err(lex_error(
            line,
            &format!("integer constant {digits} is larger than {MAX_INT_CONSTANT}"),
        )),
    }
}

fn lex_error(line: usize, message: &str) -> CompileError {
    CompileError::Lex {
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        Tokenizer::new()
            .tokenize(src)
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn keywords_need_a_word_boundary() {
        assert_eq!(
            kinds("classy class"),
            vec![
                Token::Identifier("classy".to_string()),
                Token::Keyword(Keyword::Class)
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_dropped() {
        let src = "// line\nlet /* block\n over lines */ x /** doc */ = 1; // tail";
        assert_eq!(
            kinds(src),
            vec![
                Token::Keyword(Keyword::Let),
                Token::Identifier("x".to_string()),
                Token::Symbol(Symbol::Equals),
                Token::IntegerConstant(1),
                Token::Symbol(Symbol::Semicolon),
            ]
        );
    }

    #[test]
    fn slash_alone_is_a_symbol() {
        assert_eq!(
            kinds("a/b"),
            vec![
                Token::Identifier("a".to_string()),
                Token::Symbol(Symbol::Slash),
                Token::Identifier("b".to_string()),
            ]
        );
    }

    #[test]
    fn string_constants_keep_inner_spaces() {
        assert_eq!(
            kinds("\"HOW MANY NUMBERS? \" \"\""),
            vec![
                Token::StringConstant("HOW MANY NUMBERS? ".to_string()),
                Token::StringConstant(String::new()),
            ]
        );
    }

    #[test]
    fn lines_are_tracked() {
        let tokens = Tokenizer::new().tokenize("a\n/* x\n y */\n b").unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 4);
    }

    #[test]
    fn lexical_errors() {
        let t = Tokenizer::new();
        assert_eq!(
            t.tokenize("let x = 1;\nlet y = #;"),
            Err(CompileError::Lex {
                line: 2,
                message: "unexpected character '#'".to_string()
            })
        );
        assert!(matches!(t.tokenize("\"abc\n\""), Err(CompileError::Lex { line: 1, .. })));
        assert!(matches!(t.tokenize("x /* never closed"), Err(CompileError::Lex { .. })));
        assert!(matches!(t.tokenize("32768"), Err(CompileError::Lex { .. })));
        assert_eq!(kinds("32767"), vec![Token::IntegerConstant(32767)]);
    }

    #[test]
    fn string_constants_must_be_ascii() {
        let t = Tokenizer::new();
        assert_eq!(
            t.tokenize("let s = \"ok\";\nlet s = \"caf\u{e9}\";"),
            Err(CompileError::Lex {
                line: 2,
                message: "character '\u{e9}' in string constant is not ASCII".to_string()
            })
        );
        assert!(matches!(
            t.tokenize("\"\u{1F600}\""),
            Err(CompileError::Lex { line: 1, .. })
        ));
        assert_eq!(
            kinds("\"~!@#\""),
            vec![Token::StringConstant("~!@#".to_string())]
        );
    }

    #[test]
    fn only_ascii_digits_form_integers() {
        assert_eq!(
            Tokenizer::new().tokenize("return \u{663};"),
            Err(CompileError::Lex {
                line: 1,
                message: "unexpected character '\u{663}'".to_string()
            })
        );
    }
}
