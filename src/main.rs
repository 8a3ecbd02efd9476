use clap::{Arg, ArgAction, Command};
use imp::runner::{self, RunOptions};
use imp::{demo, repl};
use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let matches = Command::new("imp")
        .about("Interpreter for a minimal imperative language")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .help("The program file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .conflicts_with("file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Run the built-in sample programs")
                .conflicts_with_all(["file", "interactive"])
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .help("Print the parsed program before running it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Stop after type checking")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Dump the token stream before parsing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Raise log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let result = if matches.get_flag("demo") {
        let stdout = io::stdout();
        demo::run_all(&mut stdout.lock()).map(|()| true)
    } else if let Some(file_path) = matches.get_one::<String>("file") {
        let options = RunOptions {
            tokens: matches.get_flag("tokens"),
            pretty: matches.get_flag("pretty"),
            check_only: matches.get_flag("check"),
        };
        run_file(file_path, options)
    } else {
        repl::start().map(|()| true)
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

// RUST_LOG wins over -v.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_file(path: &str, options: RunOptions) -> io::Result<bool> {
    let path = Path::new(path);
    let source = fs::read_to_string(path).map_err(|e| {
        io::Error::new(e.kind(), format!("reading '{}': {}", path.display(), e))
    })?;
    let filename = path.display().to_string();
    Ok(runner::run(&source, Some(filename.as_str()), options))
}
