//! Evaluates arithmetic expressions such as `2 + 3 * sqrt(16) ^ 2`.
//!
//! Every expression goes through three stages: the [`tokenizer`] splits the
//! raw text, the [`rpn_converter`] reorders the tokens into postfix form with
//! the Shunting Yard algorithm and the [`rpn_evaluator`] folds the postfix form
//! into a single number with an operand stack. The operator, function and
//! constant tables in [`builtins`] are immutable and shared by every call.

pub mod builtins;
pub mod repl;
pub mod rpn_converter;
pub mod rpn_evaluator;
pub mod tokenizer;

use rpn_converter::{IdentifierPolicy, RPNConverterError, RPNExpr, RpnConverter};
use rpn_evaluator::{RpnEvaluator, RpnEvaluatorError, DEFAULT_PRECISION};
use tokenizer::Tokenizer;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Convert(#[from] RPNConverterError),
    #[error(transparent)]
    Evaluate(#[from] RpnEvaluatorError),
}

impl SolveError {
    /// Returns true when the expression itself is malformed, as opposed to
    /// being well formed but mathematically undefined.
    pub fn is_malformed(&self) -> bool {
        match self {
            SolveError::Convert(_) => true,
            SolveError::Evaluate(e) => !e.is_arithmetic(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Decimal places the result is rounded to.
    pub precision: u32,
    pub identifiers: IdentifierPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            identifiers: IdentifierPolicy::Reject,
        }
    }
}

/// Runs the whole pipeline with a fixed configuration. Holds no state
/// between calls, so one solver can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Tokenizes and converts an expression without evaluating it.
    pub fn to_rpn(&self, expression: &str) -> Result<RPNExpr, SolveError> {
        let tokens = Tokenizer::new().tokenize(expression);
        let rpn = RpnConverter::new(self.config.identifiers).convert(&tokens)?;
        Ok(rpn)
    }

    pub fn solve(&self, expression: &str) -> Result<f64, SolveError> {
        let rpn = self.to_rpn(expression)?;
        let result = RpnEvaluator::evaluate(&rpn, self.config.precision)?;
        Ok(result)
    }
}

/// Evaluates an expression with the default configuration.
///
/// ```
/// assert_eq!(expr_solver::solve("2^3^2").unwrap(), 512.0);
/// assert!(expr_solver::solve("5+").is_err());
/// ```
pub fn solve(expression: &str) -> Result<f64, SolveError> {
    Solver::default().solve(expression)
}
