use crate::ast::{BinaryOp, Block, Expr, LogicalOp, Stmt};
use crate::environment::ValueEnv;
use crate::value::Value;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Evaluate an expression against a snapshot of the environment.
///
/// Operands of the wrong kind produce `Value::Undefined`, which then flows
/// through every enclosing operation. `&&` and `||` evaluate both operands
/// before looking at the left one.
pub fn evaluate(expr: &Expr, env: &ValueEnv) -> Value {
    match expr {
        Expr::Bool { value } => Value::Bool(*value),
        Expr::Int { value } => Value::Int(*value),
        // A name that was never declared reads as zero.
        Expr::Variable { name } => env.get(name).copied().unwrap_or(Value::Int(0)),
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let left_val = evaluate(left, env);
            let right_val = evaluate(right, env);
            evaluate_binary_op(*operator, left_val, right_val)
        }
        Expr::Logical {
            left,
            operator,
            right,
        } => {
            let left_val = evaluate(left, env);
            let right_val = evaluate(right, env);
            match (operator, left_val, right_val) {
                (LogicalOp::And, Value::Bool(false), _) => Value::Bool(false),
                (LogicalOp::Or, Value::Bool(true), _) => Value::Bool(true),
                (LogicalOp::And, Value::Bool(l), Value::Bool(r)) => Value::Bool(l && r),
                (LogicalOp::Or, Value::Bool(l), Value::Bool(r)) => Value::Bool(l || r),
                _ => Value::Undefined,
            }
        }
        Expr::Not { operand } => match evaluate(operand, env) {
            Value::Bool(b) => Value::Bool(!b),
            _ => Value::Undefined,
        },
    }
}

// Integer arithmetic wraps instead of trapping: there is no runtime error
// channel, and a loop may grow a value without bound.
fn evaluate_binary_op(operator: BinaryOp, left: Value, right: Value) -> Value {
    match (operator, left, right) {
        (BinaryOp::Add, Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_add(r)),
        (BinaryOp::Multiply, Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_mul(r)),
        (BinaryOp::Equal, Value::Int(l), Value::Int(r)) => Value::Bool(l == r),
        (BinaryOp::Equal, Value::Bool(l), Value::Bool(r)) => Value::Bool(l == r),
        (BinaryOp::Less, Value::Int(l), Value::Int(r)) => Value::Bool(l < r),
        _ => Value::Undefined,
    }
}

/// Run a program for its effects on `env` and `output`.
///
/// Expects a program that passed the type checker but accepts any tree. The
/// only errors are I/O failures while writing printed values.
pub fn eval<W: Write>(program: &Block, env: &mut ValueEnv, output: &mut W) -> io::Result<()> {
    execute_block(program, env, output)?;
    debug!(bindings = env.len(), "evaluation finished");
    Ok(())
}

fn execute_block<W: Write>(block: &Block, env: &mut ValueEnv, output: &mut W) -> io::Result<()> {
    execute_statement(&block.body, env, output)
}

pub fn execute_statement<W: Write>(
    stmt: &Stmt,
    env: &mut ValueEnv,
    output: &mut W,
) -> io::Result<()> {
    match stmt {
        Stmt::Block(block) => execute_block(block, env, output),
        Stmt::Sequence { .. } => {
            for item in stmt.sequence() {
                execute_statement(item, env, output)?;
            }
            Ok(())
        }
        Stmt::Declare { name, value } => {
            let value = evaluate(value, env);
            trace!(%name, %value, "declare");
            env.declare(name, value);
            Ok(())
        }
        Stmt::Assign { name, value } => {
            let value = evaluate(value, env);
            if !env.assign(name, value) {
                trace!(%name, "assignment to undeclared variable ignored");
            }
            Ok(())
        }
        Stmt::While { condition, body } => {
            while evaluate(condition, env).is_true() {
                execute_block(body, env, output)?;
            }
            Ok(())
        }
        Stmt::IfElse {
            condition,
            then_branch,
            else_branch,
        } => {
            if evaluate(condition, env).is_true() {
                execute_block(then_branch, env, output)
            } else {
                execute_block(else_branch, env, output)
            }
        }
        Stmt::Print { expr } => match evaluate(expr, env) {
            Value::Undefined => {
                trace!(expr = %expr, "print of undefined value skipped");
                Ok(())
            }
            value => writeln!(output, "{}", value),
        },
    }
}

/// Tree-walking evaluator owning its environment and output sink, so state
/// can persist across programs (as in the REPL).
pub struct Evaluator<W: Write = io::Stdout> {
    environment: ValueEnv,
    output: W,
}

impl Evaluator<io::Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Evaluator<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Evaluator<W> {
    pub fn with_output(output: W) -> Self {
        Self {
            environment: ValueEnv::new(),
            output,
        }
    }

    pub fn execute(&mut self, program: &Block) -> io::Result<()> {
        eval(program, &mut self.environment, &mut self.output)?;
        self.output.flush()
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Value {
        evaluate(expr, &self.environment)
    }

    pub fn environment(&self) -> &ValueEnv {
        &self.environment
    }

    pub fn into_parts(self) -> (ValueEnv, W) {
        (self.environment, self.output)
    }
}
