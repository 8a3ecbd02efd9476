use crate::checker::TypeChecker;
use crate::evaluator::Evaluator;
use crate::parser;
use crate::runner::RunError;
use std::io::{self, Write};

/// Interactive loop. Declarations persist between lines; a line that does not
/// open a block is wrapped in `{ }` before parsing.
pub fn start() -> io::Result<()> {
    println!("imp interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let mut checker = TypeChecker::new();
    let mut evaluator = Evaluator::default();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF (Ctrl+D or piped input ended)
            println!();
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            println!("Goodbye!");
            break;
        }

        let source = if line.starts_with('{') {
            line.to_string()
        } else {
            format!("{{{}}}", line)
        };

        if let Err(error) = run_repl_command(&source, &mut checker, &mut evaluator) {
            error.report(&source, None);
        }
    }

    Ok(())
}

fn run_repl_command<W: Write>(
    source: &str,
    checker: &mut TypeChecker,
    evaluator: &mut Evaluator<W>,
) -> Result<(), RunError> {
    let program = parser::parse(source)?;

    // A rejected line must not leave its declarations behind.
    let snapshot = checker.environment().clone();
    if let Err(error) = checker.check(&program) {
        checker.set_environment(snapshot);
        return Err(error.into());
    }

    evaluator.execute(&program)?;
    Ok(())
}
