use std::fmt;

use log::{debug, warn};

use crate::builtins::{self, Associativity};
use crate::tokenizer::{Token, TokenizedInput};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RPNConverterError {
    #[error("mismatched closing parenthesis")]
    MismatchedClosingParen,
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
}

/// What to do with an identifier that names neither a function nor a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierPolicy {
    /// Fail the conversion.
    #[default]
    Reject,
    /// Drop the identifier and carry on.
    Ignore,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct RPNExpr(pub Vec<Token>);

impl std::ops::Deref for RPNExpr {
    type Target = Vec<Token>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for RPNExpr {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        crate::tokenizer::write_spaced(f, &self.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RpnConverter {
    identifiers: IdentifierPolicy,
}

impl RpnConverter {
    pub fn new(identifiers: IdentifierPolicy) -> Self {
        Self { identifiers }
    }

    /// Returns true if the operator on top of the stack has to be moved to
    /// the output before `incoming` can be pushed.
    fn pops_before(incoming: &Token, top: Option<&Token>) -> bool {
        let (Token::BinaryOp(incoming), Some(Token::BinaryOp(top))) = (incoming, top) else {
            return false;
        };

        let pa1 = builtins::operator(*incoming);
        let pa2 = builtins::operator(*top);
        match pa1.assoc {
            Associativity::Left => pa1.prec <= pa2.prec,
            Associativity::Right => pa1.prec < pa2.prec,
        }
    }

    /// Converts infix notation to Reverse Polish Notation
    /// using the Shunting Yard algorithm.
    ///
    /// Constants go straight to the output like numbers. Function names wait
    /// on the stack until the parenthesis closing their argument is reached.
    /// A `(` left open at the end of input is closed implicitly.
    pub fn convert(&self, tokens: &TokenizedInput) -> Result<RPNExpr, RPNConverterError> {
        use crate::tokenizer::Token::*;
        let mut output = Vec::new();
        let mut stack: Vec<Token> = Vec::new();

        for token in tokens.iter() {
            let token = token.clone();
            match token {
                Number(_) => output.push(token),
                Ident(name) if builtins::is_constant(&name) => output.push(Ident(name)),
                Ident(name) if builtins::is_function(&name) => stack.push(Ident(name)),
                Ident(name) => match self.identifiers {
                    IdentifierPolicy::Reject => {
                        return Err(RPNConverterError::UnknownIdentifier(name));
                    }
                    IdentifierPolicy::Ignore => warn!("dropping unknown identifier '{}'", name),
                },
                BinaryOp(_) => {
                    while RpnConverter::pops_before(&token, stack.last()) {
                        if let Some(top) = stack.pop() {
                            output.push(top);
                        }
                    }

                    stack.push(token);
                }
                LParen => stack.push(token),
                RParen => {
                    let mut found = false;
                    while let Some(tok) = stack.pop() {
                        if tok == LParen {
                            found = true;
                            break;
                        }
                        output.push(tok);
                    }

                    if !found {
                        return Err(RPNConverterError::MismatchedClosingParen);
                    }

                    // The group just closed was the argument of this function.
                    if matches!(stack.last(), Some(Ident(_))) {
                        if let Some(func) = stack.pop() {
                            output.push(func);
                        }
                    }
                }
            }
        }

        while let Some(tok) = stack.pop() {
            match tok {
                LParen => debug!("closing unbalanced '('"),
                _ => output.push(tok),
            }
        }

        let rpn = RPNExpr(output);
        debug!("rpn: {}", rpn);
        Ok(rpn)
    }
}
