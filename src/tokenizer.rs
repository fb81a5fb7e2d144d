use std::fmt;

use log::debug;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Op {
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
    Pow,
}

impl Op {
    pub fn from_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Mult),
            '/' => Some(Op::Div),
            '%' => Some(Op::Mod),
            '^' => Some(Op::Pow),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Mult => '*',
            Op::Div => '/',
            Op::Mod => '%',
            Op::Pow => '^',
        }
    }
}

/// A lexical unit. Numbers and identifiers keep their literal text; whether
/// that text means anything is decided by the later stages.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Number(String),
    Ident(String),
    BinaryOp(Op),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(name) => write!(f, "{}", name),
            Token::BinaryOp(op) => write!(f, "{}", op.symbol()),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Writes tokens separated by single spaces.
pub(crate) fn write_spaced(f: &mut fmt::Formatter, tokens: &[Token]) -> fmt::Result {
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", token)?;
    }
    Ok(())
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct TokenizedInput(pub Vec<Token>);

impl std::ops::Deref for TokenizedInput {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for TokenizedInput {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for TokenizedInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_spaced(f, &self.0)
    }
}

/// Splits an expression into tokens one character at a time.
///
/// Digits and `.` accumulate into a pending number, letters into a pending
/// identifier. Switching from one kind to the other, or reaching an operator
/// or parenthesis, flushes whatever is pending. Everything else, whitespace
/// included, is skipped without producing a token.
#[derive(Default)]
pub struct Tokenizer {
    digits: String,
    letters: String,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            digits: String::new(),
            letters: String::new(),
        }
    }

    fn flush_digits(&mut self, tokens: &mut Vec<Token>) {
        if !self.digits.is_empty() {
            tokens.push(Token::Number(std::mem::take(&mut self.digits)));
        }
    }

    fn flush_letters(&mut self, tokens: &mut Vec<Token>) {
        if !self.letters.is_empty() {
            tokens.push(Token::Ident(std::mem::take(&mut self.letters)));
        }
    }

    pub fn tokenize(&mut self, input: &str) -> TokenizedInput {
        use Token::*;

        let mut tokens = Vec::new();

        for c in input.chars() {
            match c {
                c if c.is_ascii_digit() || c == '.' => {
                    self.flush_letters(&mut tokens);
                    self.digits.push(c);
                }
                c if c.is_alphabetic() => {
                    self.flush_digits(&mut tokens);
                    self.letters.push(c);
                }
                '(' | ')' => {
                    self.flush_digits(&mut tokens);
                    self.flush_letters(&mut tokens);
                    tokens.push(if c == '(' { LParen } else { RParen });
                }
                c => {
                    if let Some(op) = Op::from_char(c) {
                        self.flush_digits(&mut tokens);
                        self.flush_letters(&mut tokens);
                        tokens.push(BinaryOp(op));
                    }
                }
            }
        }

        self.flush_digits(&mut tokens);
        self.flush_letters(&mut tokens);

        let tokens = TokenizedInput(tokens);
        debug!("tokens: {}", tokens);
        tokens
    }
}
