//! Rendering of the AST back to surface syntax.
//!
//! Binary expressions are fully parenthesised, so a tree that came out of the
//! parser reparses to an equal tree. Hand-built trees may not survive the
//! trip (a bare `Stmt::Block` has no surface form inside a sequence).

use crate::ast::{Block, Expr, Stmt};
use std::fmt;

pub fn pretty(program: &Block) -> String {
    program.to_string()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Bool { value } => write!(f, "{}", value),
            Expr::Int { value } => write!(f, "{}", value),
            Expr::Variable { name } => write!(f, "{}", name),
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "({}{}{})", left, operator.symbol(), right),
            Expr::Logical {
                left,
                operator,
                right,
            } => write!(f, "({}{}{})", left, operator.symbol(), right),
            Expr::Not { operand } => write!(f, "(!{})", operand),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Block(block) => write!(f, "{}", block),
            Stmt::Sequence { .. } => {
                for (i, item) in self.sequence().into_iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Stmt::Declare { name, value } => write!(f, "{} := {}", name, value),
            Stmt::Assign { name, value } => write!(f, "{} = {}", name, value),
            Stmt::While { condition, body } => write!(f, "while {} {}", condition, body),
            Stmt::IfElse {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "if {} {} else {}", condition, then_branch, else_branch),
            Stmt::Print { expr } => write!(f, "print {}", expr),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ {} }}", self.body)
    }
}
