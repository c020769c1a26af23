/// S-expression lexer and parser for plotscript
use std::fmt;

use crate::backend::eval::SemanticError;
use crate::backend::models::{Atom, Expression};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    /// Any other lexeme, including string literals with their quotes
    Atom(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Atom(s) => write!(f, "{}", s),
        }
    }
}

/// Hand-written lexer. Never fails: malformed lexemes are rejected later by
/// the parser when they are turned into atoms.
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Read a string literal including both quotes. An unterminated literal
    /// runs to end of input.
    fn read_string(&mut self) -> String {
        let mut text = String::new();
        if let Some(quote) = self.advance() {
            text.push(quote);
        }
        while let Some(ch) = self.advance() {
            text.push(ch);
            if ch == '"' {
                break;
            }
        }
        text
    }

    fn read_symbol(&mut self) -> String {
        let mut text = String::new();
        while let Some(ch) = self.current() {
            if ch.is_ascii_whitespace() || matches!(ch, '(' | ')' | '"' | ';') {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            match self.current()? {
                ';' => self.skip_line_comment(),
                '(' => {
                    self.advance();
                    return Some(Token::LParen);
                }
                ')' => {
                    self.advance();
                    return Some(Token::RParen);
                }
                '"' => return Some(Token::Atom(self.read_string())),
                _ => return Some(Token::Atom(self.read_symbol())),
            }
        }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

/// Recursive-descent parser producing exactly one top-level expression.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn atom(text: &str) -> Result<Atom, SemanticError> {
        Atom::from_token(text).ok_or(SemanticError::Parse)
    }

    /// Parse `( head child* )` starting at an opening paren.
    fn parse_form(&mut self) -> Result<Expression, SemanticError> {
        if self.current() != Some(&Token::LParen) {
            return Err(SemanticError::Parse);
        }
        self.advance();

        let head = match self.current() {
            Some(Token::RParen) => {
                self.advance();
                return Ok(Expression::default());
            }
            Some(Token::Atom(text)) => Self::atom(text)?,
            Some(Token::LParen) | None => return Err(SemanticError::Parse),
        };
        self.advance();

        let mut form = Expression::new(head);
        loop {
            match self.current() {
                Some(Token::RParen) => {
                    self.advance();
                    return Ok(form);
                }
                Some(Token::LParen) => {
                    let child = self.parse_form()?;
                    form.append(child);
                }
                Some(Token::Atom(text)) => {
                    let child = Expression::new(Self::atom(text)?);
                    self.advance();
                    form.append(child);
                }
                None => return Err(SemanticError::Parse),
            }
        }
    }

    /// Parse the whole token stream as a single expression.
    pub fn parse(&mut self) -> Result<Expression, SemanticError> {
        let expression = self.parse_form()?;
        if self.current().is_some() {
            return Err(SemanticError::Parse);
        }
        Ok(expression)
    }
}

/// Tokenize and parse `input` as one program.
pub fn parse(input: &str) -> Result<Expression, SemanticError> {
    let tokens = Lexer::new(input).tokenize();
    Parser::new(tokens).parse()
}
