use crate::ast::{BinaryOp, Block, Expr, ExprKind, Stmt, StmtKind};
use crate::environment::TypeEnv;
use crate::error::{ImpError, Span};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    /// Known to be wrong. Recorded for declarations whose value failed to
    /// check so that later uses of the name fail as well.
    IllTyped,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Int => write!(f, "Int"),
            Type::Bool => write!(f, "Bool"),
            Type::IllTyped => write!(f, "IllTyped"),
        }
    }
}

/// Why a statement failed to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The statement's top-level expression did not have the required type.
    Expression(ExprKind),
    /// The guard of a `while` or `if` is not `Bool`.
    Condition,
    /// A statement inside a body failed.
    Block,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reason::Expression(ExprKind::Variable) => write!(f, "Variable not declared"),
            Reason::Expression(kind @ (ExprKind::Integer | ExprKind::Boolean)) => {
                write!(f, "{}", kind)
            }
            Reason::Expression(kind) => write!(f, "IllTyped {}", kind),
            Reason::Condition => write!(f, "Condition IllTyped"),
            Reason::Block => write!(f, "Error in block"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ill-typed {statement} statement: {reason}")]
pub struct TypeError {
    pub statement: StmtKind,
    pub reason: Reason,
    /// Source-like rendering of the construct that failed.
    pub culprit: String,
}

impl TypeError {
    fn new(statement: StmtKind, reason: Reason, culprit: String) -> Self {
        Self {
            statement,
            reason,
            culprit,
        }
    }

    /// Wrap as a front-end diagnostic covering the whole program text.
    pub fn to_diagnostic(&self, source_len: usize) -> ImpError {
        ImpError::type_error_with_help(
            Span::new(0, source_len),
            format!("Ill-typed {} statement: {}", self.statement, self.reason),
            format!("the offending code is `{}`", self.culprit),
        )
    }
}

/// Infer the type of an expression. Unknown names are `IllTyped`.
pub fn infer(expr: &Expr, env: &TypeEnv) -> Type {
    match expr {
        Expr::Bool { .. } => Type::Bool,
        Expr::Int { .. } => Type::Int,
        Expr::Variable { name } => env.get(name).copied().unwrap_or(Type::IllTyped),
        Expr::Binary {
            left,
            operator,
            right,
        } => match (operator, infer(left, env), infer(right, env)) {
            (BinaryOp::Add | BinaryOp::Multiply, Type::Int, Type::Int) => Type::Int,
            (BinaryOp::Equal, Type::Int, Type::Int) | (BinaryOp::Equal, Type::Bool, Type::Bool) => {
                Type::Bool
            }
            (BinaryOp::Less, Type::Int, Type::Int) => Type::Bool,
            _ => Type::IllTyped,
        },
        Expr::Logical { left, right, .. } => match (infer(left, env), infer(right, env)) {
            (Type::Bool, Type::Bool) => Type::Bool,
            _ => Type::IllTyped,
        },
        Expr::Not { operand } => match infer(operand, env) {
            Type::Bool => Type::Bool,
            _ => Type::IllTyped,
        },
    }
}

/// Check a program against `env`, recording declarations as it goes.
pub fn check(program: &Block, env: &mut TypeEnv) -> Result<(), TypeError> {
    let result = check_block(program, env);
    match &result {
        Ok(()) => debug!(bindings = env.len(), "type check succeeded"),
        Err(error) => debug!(culprit = %error.culprit, "type check failed: {}", error),
    }
    result
}

fn check_block(block: &Block, env: &mut TypeEnv) -> Result<(), TypeError> {
    check_statement(&block.body, env)
}

/// Check one statement. Every sub-statement is visited even after a failure,
/// so declarations further on still reach `env`; the first failure in
/// program order is the one reported.
pub fn check_statement(stmt: &Stmt, env: &mut TypeEnv) -> Result<(), TypeError> {
    match stmt {
        Stmt::Block(block) => check_block(block, env),
        Stmt::Sequence { .. } => stmt
            .sequence()
            .into_iter()
            .map(|item| check_statement(item, env))
            .fold(Ok(()), |first, next| first.and(next)),
        Stmt::Declare { name, value } => {
            let ty = infer(value, env);
            env.declare(name, ty);
            if ty == Type::IllTyped {
                return Err(TypeError::new(
                    StmtKind::Declare,
                    Reason::Expression(value.kind()),
                    stmt.to_string(),
                ));
            }
            Ok(())
        }
        Stmt::Assign { name, value } => {
            let ty = infer(value, env);
            match env.get(name) {
                None => Err(TypeError::new(
                    StmtKind::Assign,
                    Reason::Expression(ExprKind::Variable),
                    stmt.to_string(),
                )),
                Some(&declared) if ty != Type::IllTyped && declared == ty => Ok(()),
                Some(_) => Err(TypeError::new(
                    StmtKind::Assign,
                    Reason::Expression(value.kind()),
                    stmt.to_string(),
                )),
            }
        }
        Stmt::While { condition, body } => {
            let guard = infer(condition, env);
            let body = check_block(body, env);
            if guard != Type::Bool {
                return Err(TypeError::new(
                    StmtKind::While,
                    Reason::Condition,
                    condition.to_string(),
                ));
            }
            body.map_err(|inner| TypeError::new(StmtKind::While, Reason::Block, inner.culprit))
        }
        Stmt::IfElse {
            condition,
            then_branch,
            else_branch,
        } => {
            let guard = infer(condition, env);
            let then_result = check_block(then_branch, env);
            let else_result = check_block(else_branch, env);
            if guard != Type::Bool {
                return Err(TypeError::new(
                    StmtKind::IfElse,
                    Reason::Condition,
                    condition.to_string(),
                ));
            }
            then_result
                .and(else_result)
                .map_err(|inner| TypeError::new(inner.statement, Reason::Block, inner.culprit))
        }
        Stmt::Print { expr } => {
            if infer(expr, env) == Type::IllTyped {
                return Err(TypeError::new(
                    StmtKind::Print,
                    Reason::Expression(expr.kind()),
                    stmt.to_string(),
                ));
            }
            Ok(())
        }
    }
}

/// Type checker that keeps its environment between programs.
#[derive(Debug, Default)]
pub struct TypeChecker {
    environment: TypeEnv,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, program: &Block) -> Result<(), TypeError> {
        check(program, &mut self.environment)
    }

    pub fn infer(&self, expr: &Expr) -> Type {
        infer(expr, &self.environment)
    }

    pub fn environment(&self) -> &TypeEnv {
        &self.environment
    }

    pub fn set_environment(&mut self, environment: TypeEnv) {
        self.environment = environment;
    }
}
