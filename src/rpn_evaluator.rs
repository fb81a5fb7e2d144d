use log::trace;

use crate::builtins;
use crate::rpn_converter::RPNExpr;

/// Number of decimal places results are rounded to unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 15;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RpnEvaluatorError {
    #[error("empty expression")]
    EmptyExpression,
    #[error("invalid expression: not enough operands for '{0}'")]
    NotEnoughOperands(String),
    #[error("invalid expression: {0} values left without an operator")]
    TooManyOperands(usize),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("undefined result: division by zero")]
    DivisionByZero,
    #[error("undefined result: modulo by zero")]
    ModuloByZero,
    #[error("undefined result: {0}")]
    UndefinedResult(String),
    #[error("numeric overflow: {0}")]
    Overflow(String),
    #[error("math domain error: {function} is undefined for {args:?}")]
    MathDomain { function: String, args: Vec<f64> },
}

impl RpnEvaluatorError {
    /// Returns true for errors caused by the arithmetic itself rather than
    /// by the shape of the expression.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            RpnEvaluatorError::DivisionByZero
                | RpnEvaluatorError::ModuloByZero
                | RpnEvaluatorError::UndefinedResult(_)
                | RpnEvaluatorError::Overflow(_)
                | RpnEvaluatorError::MathDomain { .. }
        )
    }
}

/// Rounds to `precision` decimal places and turns a negative zero into a
/// positive one.
///
/// Goes through the decimal representation so the rounding is decided on
/// the exact value of the float rather than on a scaled approximation.
pub fn round_result(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let rounded = format!("{:.*}", precision as usize, value)
        .parse::<f64>()
        .unwrap_or(value);

    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub struct RpnEvaluator {}

impl RpnEvaluator {
    fn pop(eval_stack: &mut Vec<f64>, token: &str) -> Result<f64, RpnEvaluatorError> {
        eval_stack
            .pop()
            .ok_or_else(|| RpnEvaluatorError::NotEnoughOperands(token.to_string()))
    }

    /// Evaluates a postfix expression, returning the unrounded result.
    pub fn evaluate_raw(tokens: &RPNExpr) -> Result<f64, RpnEvaluatorError> {
        use crate::tokenizer::Token::*;

        let mut eval_stack: Vec<f64> = vec![];

        for token in tokens.iter() {
            match token {
                Number(literal) => {
                    let num = literal
                        .parse::<f64>()
                        .map_err(|_| RpnEvaluatorError::InvalidNumber(literal.clone()))?;
                    eval_stack.push(num);
                }
                BinaryOp(op) => {
                    let symbol = op.symbol().to_string();
                    let b = Self::pop(&mut eval_stack, &symbol)?;
                    let a = Self::pop(&mut eval_stack, &symbol)?;
                    let result = (builtins::operator(*op).apply)(a, b)?;
                    trace!("{} {} {} = {}", a, symbol, b, result);
                    eval_stack.push(result);
                }
                Ident(name) => {
                    if let Some(value) = builtins::CONSTANTS.get(name.as_str()) {
                        eval_stack.push(*value);
                    } else if let Some(func) = builtins::FUNCTIONS.get(name.as_str()) {
                        if eval_stack.len() < func.arity {
                            return Err(RpnEvaluatorError::NotEnoughOperands(name.clone()));
                        }
                        let args = eval_stack.split_off(eval_stack.len() - func.arity);
                        let result = func.call(name, &args)?;
                        trace!("{}{:?} = {}", name, args, result);
                        eval_stack.push(result);
                    } else {
                        return Err(RpnEvaluatorError::UnknownIdentifier(name.clone()));
                    }
                }
                LParen | RParen => {
                    return Err(RpnEvaluatorError::UnexpectedToken(token.to_string()));
                }
            }
        }

        match eval_stack.len() {
            0 => Err(RpnEvaluatorError::EmptyExpression),
            1 => Ok(eval_stack[0]),
            n => Err(RpnEvaluatorError::TooManyOperands(n)),
        }
    }

    /// Evaluates a postfix expression and rounds the result to `precision`
    /// decimal places.
    pub fn evaluate(tokens: &RPNExpr, precision: u32) -> Result<f64, RpnEvaluatorError> {
        Self::evaluate_raw(tokens).map(|value| round_result(value, precision))
    }
}
