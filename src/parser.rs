use std::collections::HashMap;

use lazy_static::lazy_static;

use super::ast::{Expression, Function, Prototype};
use super::lexer::{Lexer, LexerError, Token};

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum ParserError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error("unknown token when expecting an expression, found {found}")]
    ExpectedExpression { found: Token },
    #[error("expected ')', found {found}")]
    ExpectedCloseParen { found: Token },
    #[error("Expected ')' or ',' in argument list, found {found}")]
    ExpectedArgumentSeparator { found: Token },
    #[error("Expected function name in prototype, found {found}")]
    ExpectedFunctionName { found: Token },
    #[error("Expected '(' in prototype, found {found}")]
    ExpectedPrototypeOpenParen { found: Token },
    #[error("Expected ')' in prototype, found {found}")]
    ExpectedPrototypeCloseParen { found: Token },
}

pub type PartialParseResult = Result<Expression, ParserError>;

lazy_static! {
    static ref BINOP_PRECEDENCE: HashMap<char, i32> = {
        let mut operator_precedence = HashMap::new();
        operator_precedence.insert('<', 10);
        operator_precedence.insert('+', 20);
        operator_precedence.insert('-', 20);
        operator_precedence.insert('*', 40);
        operator_precedence.insert('/', 40);
        operator_precedence
    };
}

/// single-token-lookahead parser pulling tokens from a `Lexer` on demand
pub struct Parser<I: Iterator<Item = char>> {
    lexer: Lexer<I>,
    current: Token,
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// the current token is `Eof` until the first `advance`
    pub fn new(lexer: Lexer<I>) -> Self {
        Self {
            lexer,
            current: Token::Eof,
        }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// pull the next token; on a lexer error the current token is left as is
    pub fn advance(&mut self) -> Result<&Token, ParserError> {
        self.current = self.lexer.next_token()?;
        Ok(&self.current)
    }

    fn is_char(&self, c: char) -> bool {
        self.current == Token::Char(c)
    }

    fn found(&self) -> Token {
        self.current.clone()
    }

    fn precedence(&self) -> i32 {
        match self.current {
            Token::Char(c) if c.is_ascii() => BINOP_PRECEDENCE.get(&c).copied().unwrap_or(-1),
            _ => -1,
        }
    }

    fn parse_number(&mut self, num: f64) -> PartialParseResult {
        self.advance()?;
        Ok(Expression::Number(num))
    }

    fn parse_nested(&mut self) -> PartialParseResult {
        self.advance()?;
        let res = self.parse_expression()?;
        if !self.is_char(')') {
            return Err(ParserError::ExpectedCloseParen {
                found: self.found(),
            });
        }
        self.advance()?;
        Ok(res)
    }

    fn parse_identifier(&mut self, ident: String) -> PartialParseResult {
        self.advance()?;

        if !self.is_char('(') {
            return Ok(Expression::Variable(ident));
        }

        self.advance()?;
        let mut args = Vec::new();
        if !self.is_char(')') {
            loop {
                args.push(self.parse_expression()?);

                if self.is_char(')') {
                    break;
                }
                if !self.is_char(',') {
                    return Err(ParserError::ExpectedArgumentSeparator {
                        found: self.found(),
                    });
                }
                self.advance()?;
            }
        }
        self.advance()?;

        Ok(Expression::Call(ident, args))
    }

    fn parse_primary(&mut self) -> PartialParseResult {
        match self.current.clone() {
            Token::Ident(ident) => self.parse_identifier(ident),
            Token::Number(num) => self.parse_number(num),
            Token::Char('(') => self.parse_nested(),
            found => Err(ParserError::ExpectedExpression { found }),
        }
    }

    fn parse_rhs(&mut self, expr_precedence: i32, lhs: Expression) -> PartialParseResult {
        let mut result = lhs;

        loop {
            let operator = match self.current {
                Token::Char(op) => op,
                _ => return Ok(result),
            };
            let precedence = self.precedence();
            if precedence < expr_precedence {
                return Ok(result);
            }
            self.advance()?;

            let mut rhs = self.parse_primary()?;

            // a tighter operator after rhs takes rhs as its own lhs
            if precedence < self.precedence() {
                rhs = self.parse_rhs(precedence + 1, rhs)?;
            }

            result = Expression::Binary(operator, Box::new(result), Box::new(rhs));
        }
    }

    pub fn parse_expression(&mut self) -> PartialParseResult {
        let lhs = self.parse_primary()?;
        self.parse_rhs(0, lhs)
    }

    pub fn parse_prototype(&mut self) -> Result<Prototype, ParserError> {
        let name = match &self.current {
            Token::Ident(name) => name.clone(),
            _ => {
                return Err(ParserError::ExpectedFunctionName {
                    found: self.found(),
                })
            }
        };
        self.advance()?;

        if !self.is_char('(') {
            return Err(ParserError::ExpectedPrototypeOpenParen {
                found: self.found(),
            });
        }

        let mut args = Vec::new();
        while let Token::Ident(arg) = self.advance()? {
            args.push(arg.clone());
        }
        if !self.is_char(')') {
            return Err(ParserError::ExpectedPrototypeCloseParen {
                found: self.found(),
            });
        }
        self.advance()?;

        Ok(Prototype { name, args })
    }

    pub fn parse_definition(&mut self) -> Result<Function, ParserError> {
        self.advance()?;
        let prototype = self.parse_prototype()?;
        let body = self.parse_expression()?;
        Ok(Function { prototype, body })
    }

    pub fn parse_extern(&mut self) -> Result<Prototype, ParserError> {
        self.advance()?;
        self.parse_prototype()
    }

    pub fn parse_top_level_expr(&mut self) -> Result<Function, ParserError> {
        let body = self.parse_expression()?;
        Ok(Function {
            prototype: Prototype::anonymous(),
            body,
        })
    }
}
