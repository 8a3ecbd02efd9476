// imp Language Interpreter Library
//
// Lexer, parser, static type checker and tree-walking evaluator for a
// minimal imperative language with booleans, single-digit integers,
// variables, while loops, if/else and print.

// Public modules
pub mod ast;
pub mod checker;
pub mod demo;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{Block, Expr, Stmt};
pub use checker::{check, infer, Reason, Type, TypeChecker, TypeError};
pub use environment::{Environment, TypeEnv, ValueEnv};
pub use error::{ErrorKind, ImpError, Span};
pub use evaluator::{eval, evaluate, Evaluator};
pub use lexer::{scan, Lexer, Token, TokenType};
pub use parser::{parse, Parser};
pub use pretty::pretty;
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, run_source, RunOptions};
