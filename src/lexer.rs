use std::{fmt, iter::Peekable};

use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Eof,
    Def,
    Extern,
    Ident(String),
    Number(f64),
    Char(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Def => write!(f, "def"),
            Token::Extern => write!(f, "extern"),
            Token::Ident(ident) => write!(f, "{}", ident),
            Token::Number(num) => write!(f, "{}", num),
            Token::Char(c) => write!(f, "'{}'", c),
        }
    }
}

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("invalid numeric literal {0}")]
    InvalidNumber(String),
}

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"^(\d+(\.\d*)?|\.\d+)$").unwrap();
}

// matches C's isspace in the "C" locale, which includes \v and \f
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// pull-based lexer over a character source - only the next character is
/// ever looked at before it is consumed
pub struct Lexer<I: Iterator<Item = char>> {
    chars: Peekable<I>,
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.peekable(),
        }
    }

    fn skip_ignored(&mut self) {
        loop {
            match self.chars.peek() {
                Some(&c) if is_space(c) => {
                    self.chars.next();
                }
                Some('#') => {
                    for c in self.chars.by_ref() {
                        if c == '\n' || c == '\r' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    fn take_while(&mut self, first: char, pred: fn(char) -> bool) -> String {
        let mut buf = first.to_string();
        while let Some(&c) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            buf.push(c);
            self.chars.next();
        }
        buf
    }

    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_ignored();

        let c = match self.chars.next() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        if c.is_ascii_alphabetic() {
            let ident = self.take_while(c, |c| c.is_ascii_alphanumeric());
            return Ok(match ident.as_str() {
                "def" => Token::Def,
                "extern" => Token::Extern,
                _ => Token::Ident(ident),
            });
        }

        if is_number_char(c) {
            let text = self.take_while(c, is_number_char);
            if !NUMBER_RE.is_match(&text) {
                return Err(LexerError::InvalidNumber(text));
            }
            return text
                .parse()
                .map(Token::Number)
                .map_err(|_| LexerError::InvalidNumber(text));
        }

        Ok(Token::Char(c))
    }
}

/// lex the whole input, stopping before the end-of-input token
pub fn lex(input: &str) -> Result<Vec<Token>, LexerError> {
    let mut lexer = Lexer::new(input.chars());
    let mut res = Vec::new();
    loop {
        match lexer.next_token()? {
            Token::Eof => return Ok(res),
            tok => res.push(tok),
        }
    }
}
