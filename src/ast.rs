//! AST for the language. Nodes carry no source positions: trees are compared
//! structurally and rendered back to text for diagnostics.

use std::fmt;
use std::mem;

/// A brace-delimited statement sequence. Every program is one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub body: Box<Stmt>,
}

impl Block {
    pub fn new(body: Stmt) -> Self {
        Self {
            body: Box::new(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Block(Block),
    /// Built by the parser as a left fold, so `a; b; c` is `Sequence(Sequence(a, b), c)`.
    Sequence {
        first: Box<Stmt>,
        second: Box<Stmt>,
    },
    Declare {
        name: String,
        value: Expr,
    },
    Assign {
        name: String,
        value: Expr,
    },
    While {
        condition: Expr,
        body: Block,
    },
    IfElse {
        condition: Expr,
        then_branch: Block,
        else_branch: Block,
    },
    Print {
        expr: Expr,
    },
}

impl Stmt {
    pub fn kind(&self) -> StmtKind {
        match self {
            Stmt::Block(_) => StmtKind::Block,
            Stmt::Sequence { .. } => StmtKind::Sequence,
            Stmt::Declare { .. } => StmtKind::Declare,
            Stmt::Assign { .. } => StmtKind::Assign,
            Stmt::While { .. } => StmtKind::While,
            Stmt::IfElse { .. } => StmtKind::IfElse,
            Stmt::Print { .. } => StmtKind::Print,
        }
    }

    /// Statements of a left-folded sequence in program order. Walks the left
    /// spine iteratively; any other statement yields itself.
    pub fn sequence(&self) -> Vec<&Stmt> {
        let mut items = Vec::new();
        let mut current = self;
        while let Stmt::Sequence { first, second } = current {
            items.push(second.as_ref());
            current = first.as_ref();
        }
        items.push(current);
        items.reverse();
        items
    }

    // Allocation-free filler left behind while unlinking a sequence.
    fn empty() -> Self {
        Stmt::Print {
            expr: Expr::Int { value: 0 },
        }
    }
}

// Plain drop glue would recurse once per statement of a left-folded
// sequence. Unlink the left spine in a loop so each node drops shallow.
impl Drop for Stmt {
    fn drop(&mut self) {
        let Stmt::Sequence { first, .. } = self else {
            return;
        };
        let mut spine = mem::replace(first.as_mut(), Stmt::empty());
        while let Stmt::Sequence { first, .. } = &mut spine {
            let next = mem::replace(first.as_mut(), Stmt::empty());
            spine = next;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Bool {
        value: bool,
    },
    /// Always a single digit when produced by the parser.
    Int {
        value: i64,
    },
    Variable {
        name: String,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: LogicalOp,
        right: Box<Expr>,
    },
    Not {
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::Bool { .. } => ExprKind::Boolean,
            Expr::Int { .. } => ExprKind::Integer,
            Expr::Variable { .. } => ExprKind::Variable,
            Expr::Binary { operator, .. } => match operator {
                BinaryOp::Add => ExprKind::Addition,
                BinaryOp::Multiply => ExprKind::Multiplication,
                BinaryOp::Equal => ExprKind::Equality,
                BinaryOp::Less => ExprKind::Less,
            },
            Expr::Logical { operator, .. } => match operator {
                LogicalOp::And => ExprKind::Conjunction,
                LogicalOp::Or => ExprKind::Disjunction,
            },
            Expr::Not { .. } => ExprKind::Negation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Multiply,
    Equal,
    Less,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Multiply => "*",
            BinaryOp::Equal => "==",
            BinaryOp::Less => "<",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

/// Statement tag used in type diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtKind {
    Block,
    Sequence,
    Declare,
    Assign,
    While,
    IfElse,
    Print,
}

/// Expression tag used in type diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Integer,
    Boolean,
    Variable,
    Addition,
    Multiplication,
    Conjunction,
    Disjunction,
    Negation,
    Equality,
    Less,
}

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            StmtKind::Block => "block",
            StmtKind::Sequence => "sequence",
            StmtKind::Declare => "declaration",
            StmtKind::Assign => "assignment",
            StmtKind::While => "while",
            StmtKind::IfElse => "if-else",
            StmtKind::Print => "print",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ExprKind::Integer => "Integer",
            ExprKind::Boolean => "Boolean",
            ExprKind::Variable => "Variable",
            ExprKind::Addition => "Addition",
            ExprKind::Multiplication => "Multiplication",
            ExprKind::Conjunction => "Conjunction",
            ExprKind::Disjunction => "Disjunction",
            ExprKind::Negation => "Negation",
            ExprKind::Equality => "Equality",
            ExprKind::Less => "Less",
        };
        write!(f, "{}", name)
    }
}

// Builders for assembling trees by hand.

pub fn int(value: i64) -> Expr {
    Expr::Int { value }
}

pub fn boolean(value: bool) -> Expr {
    Expr::Bool { value }
}

pub fn var(name: &str) -> Expr {
    Expr::Variable {
        name: name.to_string(),
    }
}

fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

fn logical(left: Expr, operator: LogicalOp, right: Expr) -> Expr {
    Expr::Logical {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

pub fn plus(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Add, right)
}

pub fn mult(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Multiply, right)
}

pub fn equal(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Equal, right)
}

pub fn less(left: Expr, right: Expr) -> Expr {
    binary(left, BinaryOp::Less, right)
}

pub fn and(left: Expr, right: Expr) -> Expr {
    logical(left, LogicalOp::And, right)
}

pub fn or(left: Expr, right: Expr) -> Expr {
    logical(left, LogicalOp::Or, right)
}

pub fn not(operand: Expr) -> Expr {
    Expr::Not {
        operand: Box::new(operand),
    }
}

pub fn seq(first: Stmt, second: Stmt) -> Stmt {
    Stmt::Sequence {
        first: Box::new(first),
        second: Box::new(second),
    }
}

pub fn declare(name: &str, value: Expr) -> Stmt {
    Stmt::Declare {
        name: name.to_string(),
        value,
    }
}

pub fn assign(name: &str, value: Expr) -> Stmt {
    Stmt::Assign {
        name: name.to_string(),
        value,
    }
}

pub fn while_loop(condition: Expr, body: Block) -> Stmt {
    Stmt::While { condition, body }
}

pub fn if_else(condition: Expr, then_branch: Block, else_branch: Block) -> Stmt {
    Stmt::IfElse {
        condition,
        then_branch,
        else_branch,
    }
}

pub fn print(expr: Expr) -> Stmt {
    Stmt::Print { expr }
}

pub fn block(body: Stmt) -> Block {
    Block::new(body)
}
