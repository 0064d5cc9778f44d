use crate::ast::{CompareOp, Expr};
use crate::lexer::{tokenize, LexError, Token, TokenKind};
use crate::value::ExprValue;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("unexpected token at {pos}: expected {expected}, got {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: usize,
    },
    #[error("invalid number literal at {pos}: {literal}")]
    InvalidNumber { literal: String, pos: usize },
    #[error("empty condition")]
    Empty,
}

pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

pub fn parse_condition(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    Parser::new(tokens).parse()
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    pub fn parse(mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Eof) {
            return Err(ParseError::Empty);
        }
        let expression = self.parse_or()?;
        self.expect(TokenKind::Eof)?;
        Ok(expression)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_and()?;
        while self.match_kind(TokenKind::OrOr) {
            let right = self.parse_and()?;
            node = Expr::Or(Box::new(node), Box::new(right));
        }
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_unary()?;
        while self.match_kind(TokenKind::AndAnd) {
            let right = self.parse_unary()?;
            node = Expr::And(Box::new(node), Box::new(right));
        }
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_kind(TokenKind::Bang) {
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        if self.match_kind(TokenKind::LParen) {
            let inner = self.parse_or()?;
            self.expect(TokenKind::RParen)?;
            return Ok(inner);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let path = self.parse_path()?;
        let op = match self.peek().kind {
            TokenKind::EqEq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::Ne,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Le => CompareOp::Le,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Ge => CompareOp::Ge,
            _ => return Ok(Expr::Truthy(path)),
        };
        self.advance();
        let literal = self.parse_literal()?;
        Ok(Expr::Compare { path, op, literal })
    }

    fn parse_path(&mut self) -> Result<String, ParseError> {
        let mut path = self.expect(TokenKind::Identifier)?.lexeme;
        while self.match_kind(TokenKind::Dot) {
            let segment = self.expect(TokenKind::Identifier)?;
            path.push('.');
            path.push_str(segment.lexeme.as_str());
        }
        Ok(path)
    }

    fn parse_literal(&mut self) -> Result<ExprValue, ParseError> {
        let negative = self.match_kind(TokenKind::Minus);
        let token = self.advance();
        match token.kind {
            TokenKind::Number => {
                let number = token
                    .lexeme
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber {
                        literal: token.lexeme.clone(),
                        pos: token.pos,
                    })?;
                Ok(ExprValue::Number(if negative { -number } else { number }))
            }
            _ if negative => Err(ParseError::UnexpectedToken {
                expected: "number after '-'".to_string(),
                found: format!("{:?}", token.kind),
                pos: token.pos,
            }),
            TokenKind::String | TokenKind::Identifier => Ok(ExprValue::String(token.lexeme)),
            TokenKind::True => Ok(ExprValue::Bool(true)),
            TokenKind::False => Ok(ExprValue::Bool(false)),
            TokenKind::Null => Ok(ExprValue::Null),
            _ => Err(ParseError::UnexpectedToken {
                expected: "literal".to_string(),
                found: format!("{:?}", token.kind),
                pos: token.pos,
            }),
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("{:?}", kind),
                found: format!("{:?}", token.kind),
                pos: token.pos,
            })
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
