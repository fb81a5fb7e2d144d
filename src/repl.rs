use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::Solver;

/// Line that ends the session.
pub const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Write `> ` before reading each line.
    pub prompt: bool,
    /// Print the postfix form of each expression before its result.
    pub show_rpn: bool,
}

/// Formats a result the way floats are usually echoed back in a calculator
/// session: integral values keep a trailing `.0`, very large and very small
/// magnitudes switch to exponent notation.
pub fn format_result(value: f64) -> String {
    format!("{:?}", value)
}

/// Line-oriented read-eval-print loop.
///
/// A failed expression is reported and the loop moves on to the next line.
/// The session ends on an `exit` line or at the end of input.
pub struct Repl<R, W> {
    solver: Solver,
    options: ReplOptions,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(solver: Solver, options: ReplOptions, input: R, output: W) -> Self {
        Self {
            solver,
            options,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut line = String::new();

        loop {
            if self.options.prompt {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("end of input");
                break;
            }

            let expression = line.trim_end_matches(&['\n', '\r'][..]);
            if expression == EXIT_COMMAND {
                break;
            }
            if expression.trim().is_empty() {
                continue;
            }

            self.eval_line(expression)?;
        }

        info!("session finished");
        Ok(())
    }

    fn eval_line(&mut self, expression: &str) -> io::Result<()> {
        if self.options.show_rpn {
            if let Ok(rpn) = self.solver.to_rpn(expression) {
                writeln!(self.output, "rpn: {}", rpn)?;
            }
        }

        match self.solver.solve(expression) {
            Ok(value) => writeln!(self.output, "{}", format_result(value)),
            Err(e) => {
                debug!("'{}' failed: {:?}", expression, e);
                writeln!(self.output, "error: {}", e)
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
