use std::io::Cursor;

use expr_solver::repl::{Repl, ReplOptions};
use expr_solver::rpn_converter::{IdentifierPolicy, RPNConverterError};
use expr_solver::rpn_evaluator::RpnEvaluatorError;
use expr_solver::{solve, SolveError, Solver, SolverConfig};

#[test]
fn test_precedence_and_parentheses() -> Result<(), SolveError> {
    assert_eq!(solve("2+3*4")?, 14.0);
    assert_eq!(solve("(2+3)*4")?, 20.0);
    assert_eq!(solve("(((2+3)))")?, 5.0);
    assert_eq!(solve("2+3")?, 5.0);
    assert_eq!(solve("10-4-3")?, 3.0);
    assert_eq!(solve("100/10/5")?, 2.0);
    assert_eq!(solve("2*(3+4)*5")?, 70.0);
    assert_eq!(solve("7%4*2")?, 6.0);

    Ok(())
}

#[test]
fn test_power_is_right_associative() -> Result<(), SolveError> {
    assert_eq!(solve("2^3^2")?, 512.0);
    assert_eq!(solve("(2^3)^2")?, 64.0);
    assert_eq!(solve("2*3^2")?, 18.0);

    Ok(())
}

#[test]
fn test_functions_and_constants() -> Result<(), SolveError> {
    assert_eq!(solve("sqrt(16)")?, 4.0);
    assert_eq!(solve("sqrt(9)+sqrt(16)")?, 7.0);
    assert_eq!(solve("sqrt(sqrt(16))")?, 2.0);
    assert_eq!(solve("log(1000)")?, 3.0);
    assert_eq!(solve("ln(e)")?, 1.0);
    assert_eq!(solve("cos(0)")?, 1.0);
    assert_eq!(solve("atan(1)*4")?, solve("pi")?);
    assert_eq!(solve("asin(1)*2")?, solve("pi")?);

    assert!((solve("pi")? - std::f64::consts::PI).abs() < 1e-14);
    assert!((solve("e")? - std::f64::consts::E).abs() < 1e-14);

    Ok(())
}

#[test]
fn test_results_are_rounded() -> Result<(), SolveError> {
    assert_eq!(solve("1/3")?, 0.333333333333333);
    assert_eq!(solve("0.1+0.2")?, 0.3);
    assert_eq!(solve("sin(pi)")?, 0.0);

    Ok(())
}

#[test]
fn test_negative_zero_is_normalized() -> Result<(), SolveError> {
    let zero = solve("sin(0)")?;
    assert_eq!(zero, 0.0);
    assert!(zero.is_sign_positive());

    let zero = solve("sin(0-pi)")?;
    assert_eq!(zero, 0.0);
    assert!(zero.is_sign_positive());

    Ok(())
}

#[test]
fn test_whitespace_and_unsupported_characters_are_ignored() -> Result<(), SolveError> {
    assert_eq!(solve("2 + 3")?, solve("2+3")?);
    assert_eq!(solve(" ( 2 + 3 ) * 4 ")?, 20.0);
    assert_eq!(solve("2 + 3;")?, 5.0);

    Ok(())
}

#[test]
fn test_malformed_expressions() {
    for input in ["+5", "5+", "*", "sqrt()", "2*(3+)"] {
        let err = solve(input).unwrap_err();
        assert!(
            matches!(
                err,
                SolveError::Evaluate(RpnEvaluatorError::NotEnoughOperands(_))
            ),
            "{}: {:?}",
            input,
            err
        );
        assert!(err.is_malformed());
    }

    assert_eq!(
        solve("1.2.3"),
        Err(SolveError::Evaluate(RpnEvaluatorError::InvalidNumber(
            "1.2.3".to_string()
        )))
    );
    assert_eq!(
        solve("2(3)"),
        Err(SolveError::Evaluate(RpnEvaluatorError::TooManyOperands(2)))
    );
    assert_eq!(
        solve(""),
        Err(SolveError::Evaluate(RpnEvaluatorError::EmptyExpression))
    );
    assert_eq!(
        solve("(1+2))"),
        Err(SolveError::Convert(RPNConverterError::MismatchedClosingParen))
    );
}

#[test]
fn test_domain_errors() {
    for input in ["sqrt(0-1)", "log(0)", "ln(0-5)", "asin(2)", "acos(0-2)"] {
        let err = solve(input).unwrap_err();
        assert!(
            matches!(err, SolveError::Evaluate(RpnEvaluatorError::MathDomain { .. })),
            "{}: {:?}",
            input,
            err
        );
        assert!(!err.is_malformed());
    }

    assert_eq!(
        solve("1/(2-2)"),
        Err(SolveError::Evaluate(RpnEvaluatorError::DivisionByZero))
    );
    assert_eq!(
        solve("5%0"),
        Err(SolveError::Evaluate(RpnEvaluatorError::ModuloByZero))
    );
    assert!(solve("10^400").is_err());

    // No unary minus: the operand is missing before the domain is checked.
    assert!(solve("sqrt(-1)").is_err());
}

#[test]
fn test_unknown_identifiers() {
    assert_eq!(
        solve("foo"),
        Err(SolveError::Convert(RPNConverterError::UnknownIdentifier(
            "foo".to_string()
        )))
    );

    let lenient = Solver::new(SolverConfig {
        identifiers: IdentifierPolicy::Ignore,
        ..SolverConfig::default()
    });
    assert_eq!(lenient.solve("2*x(4)"), Ok(8.0));
    assert_eq!(
        lenient.solve("foo"),
        Err(SolveError::Evaluate(RpnEvaluatorError::EmptyExpression))
    );
}

#[test]
fn test_solver_is_shared_across_threads() {
    let solver = Solver::default();
    let handles: Vec<_> = (1..=4)
        .map(|n| std::thread::spawn(move || solver.solve(&format!("{}^2", n))))
        .collect();

    let results: Vec<f64> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    assert_eq!(results, vec![1.0, 4.0, 9.0, 16.0]);
}

#[test]
fn test_repl_session() {
    let input = "2+3*4\nsqrt(0-1)\nbar\n2^3^2\nexit\n9\n";
    let mut repl = Repl::new(
        Solver::default(),
        ReplOptions::default(),
        Cursor::new(input),
        Vec::new(),
    );
    repl.run().unwrap();

    let output = String::from_utf8(repl.into_output()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "14.0");
    assert!(lines[1].starts_with("error: math domain error"));
    assert_eq!(lines[2], "error: unknown identifier 'bar'");
    assert_eq!(lines[3], "512.0");
}
