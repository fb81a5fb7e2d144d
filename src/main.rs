use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Parser;
use log::LevelFilter;

use expr_solver::repl::{format_result, Repl, ReplOptions};
use expr_solver::rpn_converter::IdentifierPolicy;
use expr_solver::{Solver, SolverConfig};

/// Evaluates arithmetic expressions with `+ - * / % ^`, parentheses, the
/// functions sqrt, sin, asin, cos, acos, tan, atan, log, ln and the constants
/// pi and e. Without an expression, starts an interactive session; type
/// `exit` to leave it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate this expression once and exit.
    expression: Option<String>,

    /// Silently drop unknown identifiers instead of reporting them.
    #[arg(long)]
    lenient: bool,

    /// Decimal places results are rounded to.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u32).range(0..=17))]
    precision: u32,

    /// Print the postfix form of each expression.
    #[arg(long)]
    show_rpn: bool,

    /// Never print the prompt, even on a terminal.
    #[arg(long)]
    no_prompt: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn stdin_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let solver = Solver::new(SolverConfig {
        precision: args.precision,
        identifiers: if args.lenient {
            IdentifierPolicy::Ignore
        } else {
            IdentifierPolicy::Reject
        },
    });

    if let Some(expression) = args.expression {
        if args.show_rpn {
            println!("rpn: {}", solver.to_rpn(&expression)?);
        }

        match solver.solve(&expression) {
            Ok(value) => println!("{}", format_result(value)),
            Err(e) => bail!("failed to evaluate '{}': {}", expression, e),
        }
        return Ok(());
    }

    let options = ReplOptions {
        prompt: !args.no_prompt && stdin_is_tty(),
        show_rpn: args.show_rpn,
    };

    let stdin = io::stdin();
    let mut repl = Repl::new(solver, options, stdin.lock(), io::stdout());
    repl.run()?;
    io::stdout().flush()?;

    Ok(())
}
