//! Read-only lookup tables for operators, functions and named constants.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::rpn_evaluator::RpnEvaluatorError;
use crate::tokenizer::Op;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone, Copy)]
pub struct Operator {
    pub prec: i32,
    pub assoc: Associativity,
    /// Applied as `apply(left, right)`.
    pub apply: fn(f64, f64) -> Result<f64, RpnEvaluatorError>,
}

/// Returns the table entry for a binary operator.
pub fn operator(op: Op) -> Operator {
    use Associativity::*;

    match op {
        Op::Plus => Operator {
            prec: 1,
            assoc: Left,
            apply: |a, b| Ok(a + b),
        },
        Op::Minus => Operator {
            prec: 1,
            assoc: Left,
            apply: |a, b| Ok(a - b),
        },
        Op::Mult => Operator {
            prec: 2,
            assoc: Left,
            apply: |a, b| Ok(a * b),
        },
        Op::Div => Operator {
            prec: 2,
            assoc: Left,
            apply: div,
        },
        Op::Mod => Operator {
            prec: 2,
            assoc: Left,
            apply: modulo,
        },
        Op::Pow => Operator {
            prec: 3,
            assoc: Right,
            apply: pow,
        },
    }
}

fn div(a: f64, b: f64) -> Result<f64, RpnEvaluatorError> {
    if b == 0.0 {
        return Err(RpnEvaluatorError::DivisionByZero);
    }
    Ok(a / b)
}

/// Floored modulo: a non-zero result carries the sign of the divisor.
fn modulo(a: f64, b: f64) -> Result<f64, RpnEvaluatorError> {
    if b == 0.0 {
        return Err(RpnEvaluatorError::ModuloByZero);
    }

    let r = a % b;
    if r == 0.0 {
        Ok(0.0f64.copysign(b))
    } else if (r < 0.0) != (b < 0.0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn pow(a: f64, b: f64) -> Result<f64, RpnEvaluatorError> {
    if a == 0.0 && b < 0.0 {
        return Err(RpnEvaluatorError::DivisionByZero);
    }

    let result = a.powf(b);
    if result.is_nan() && !a.is_nan() && !b.is_nan() {
        return Err(RpnEvaluatorError::UndefinedResult(format!("{} ^ {}", a, b)));
    }
    if result.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(RpnEvaluatorError::Overflow(format!("{} ^ {}", a, b)));
    }

    Ok(result)
}

#[derive(Clone, Copy)]
pub struct Function {
    pub arity: usize,
    /// Receives exactly `arity` operands, in the order they were pushed.
    pub apply: fn(&[f64]) -> f64,
}

impl Function {
    /// Applies the function, rejecting results that fall outside the real
    /// domain: NaN from non-NaN arguments, or an infinity from finite ones.
    pub fn call(&self, name: &str, args: &[f64]) -> Result<f64, RpnEvaluatorError> {
        let result = (self.apply)(args);

        let nan_from_numbers = result.is_nan() && !args.iter().any(|a| a.is_nan());
        let inf_from_finite = result.is_infinite() && args.iter().all(|a| a.is_finite());
        if nan_from_numbers || inf_from_finite {
            return Err(RpnEvaluatorError::MathDomain {
                function: name.to_string(),
                args: args.to_vec(),
            });
        }

        Ok(result)
    }
}

lazy_static! {
    pub static ref FUNCTIONS: HashMap<&'static str, Function> = {
        let mut m: HashMap<&'static str, Function> = HashMap::new();
        m.insert("sqrt", Function { arity: 1, apply: |a| a[0].sqrt() });
        m.insert("sin", Function { arity: 1, apply: |a| a[0].sin() });
        m.insert("asin", Function { arity: 1, apply: |a| a[0].asin() });
        m.insert("cos", Function { arity: 1, apply: |a| a[0].cos() });
        m.insert("acos", Function { arity: 1, apply: |a| a[0].acos() });
        m.insert("tan", Function { arity: 1, apply: |a| a[0].tan() });
        m.insert("atan", Function { arity: 1, apply: |a| a[0].atan() });
        m.insert("log", Function { arity: 1, apply: |a| a[0].log10() });
        m.insert("ln", Function { arity: 1, apply: |a| a[0].ln() });
        m
    };

    pub static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        m.insert("pi", std::f64::consts::PI);
        m.insert("e", std::f64::consts::E);
        m
    };
}

pub fn is_function(name: &str) -> bool {
    FUNCTIONS.contains_key(name)
}

pub fn is_constant(name: &str) -> bool {
    CONSTANTS.contains_key(name)
}
