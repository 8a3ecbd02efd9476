use crate::checker::{self, TypeError};
use crate::environment::{TypeEnv, ValueEnv};
use crate::error::ImpError;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::parser;
use std::io::{self, Write};
use tracing::{error, info};

/// What to do with a program besides running it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Dump the token stream before parsing.
    pub tokens: bool,
    /// Print the parsed program back as source text.
    pub pretty: bool,
    /// Stop after type checking.
    pub check_only: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Syntax(#[from] ImpError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error("failed to write program output: {0}")]
    Io(#[from] io::Error),
}

impl RunError {
    /// Render the error to stderr, as a source diagnostic where there is one.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let result = match self {
            RunError::Syntax(error) => error.report(source, filename),
            RunError::Type(error) => error.to_diagnostic(source.len()).report(source, filename),
            RunError::Io(error) => {
                eprintln!("Error: {}", error);
                Ok(())
            }
        };
        if let Err(report_error) = result {
            error!("failed to render diagnostic: {}", report_error);
        }
    }
}

/// Push one source string through the pipeline: lex (optionally), parse,
/// check, evaluate. Returns the final variable bindings; with `check_only`
/// nothing is evaluated and the bindings are empty.
pub fn run_source<W: Write>(
    source: &str,
    options: RunOptions,
    output: &mut W,
) -> Result<ValueEnv, RunError> {
    if options.tokens {
        for token in Lexer::new(source).scan_tokens()? {
            writeln!(
                output,
                "{:>4}..{:<4} {}",
                token.span.start, token.span.end, token.token_type
            )?;
        }
    }

    let program = parser::parse(source)?;
    info!("parsed {} bytes", source.len());
    if options.pretty {
        writeln!(output, "{}", program)?;
    }

    let mut types = TypeEnv::new();
    checker::check(&program, &mut types)?;

    let mut values = ValueEnv::new();
    if options.check_only {
        return Ok(values);
    }
    evaluator::eval(&program, &mut values, output)?;
    output.flush()?;
    Ok(values)
}

/// Run a program, writing its output to stdout and any error to stderr.
/// Returns whether the program made it through every stage.
pub fn run(source: &str, filename: Option<&str>, options: RunOptions) -> bool {
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match run_source(source, options, &mut output) {
        Ok(_) => true,
        Err(error) => {
            error.report(source, filename);
            false
        }
    }
}
