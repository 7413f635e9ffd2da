//! AST node types for the PVM expression/statement language.
//!
//! Nodes are immutable value trees. A reduction step never edits a node in
//! place; it builds a new one. Children are boxed to keep the enum small.

use crate::value::{Value, ValueKind};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

/// Binary operators. The table is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Less,
    LessEq,
    Greater,
    GreaterEq,
    // Logical (strict, no short-circuit)
    And,
    Or,
}

impl BinOp {
    /// Every binary operator, in table order.
    pub const ALL: [BinOp; 10] = [
        BinOp::Add,
        BinOp::Sub,
        BinOp::Mul,
        BinOp::Div,
        BinOp::Less,
        BinOp::LessEq,
        BinOp::Greater,
        BinOp::GreaterEq,
        BinOp::And,
        BinOp::Or,
    ];

    /// Returns the operator symbol used when printing.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }

    /// Kind of literal this operator collapses to.
    pub fn result_kind(&self) -> ValueKind {
        match self {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => ValueKind::Number,
            BinOp::Less
            | BinOp::LessEq
            | BinOp::Greater
            | BinOp::GreaterEq
            | BinOp::And
            | BinOp::Or => ValueKind::Boolean,
        }
    }

    /// Kind both operands must have.
    pub fn operand_kind(&self) -> ValueKind {
        match self {
            BinOp::And | BinOp::Or => ValueKind::Boolean,
            _ => ValueKind::Number,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `not x`
    Not,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
        }
    }

    pub fn result_kind(&self) -> ValueKind {
        match self {
            UnaryOp::Not => ValueKind::Boolean,
        }
    }

    pub fn operand_kind(&self) -> ValueKind {
        match self {
            UnaryOp::Not => ValueKind::Boolean,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Nodes
// ══════════════════════════════════════════════════════════════════════════════

/// A node of the expression/statement tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    // ── Literals ──
    /// `42`
    NumberLit(i64),
    /// `true` / `false`
    BoolLit(bool),

    // ── Expressions ──
    /// A name resolved against the environment.
    Variable(String),
    /// `not x`
    Unary { op: UnaryOp, operand: Box<Node> },
    /// `a + b`, `a < b`, `a and b`, ...
    Binary {
        left: Box<Node>,
        op: BinOp,
        right: Box<Node>,
    },

    // ── Statements ──
    /// `name = expression`
    Assign { name: String, expression: Box<Node> },
    /// `if condition then consequence else alternative`
    If {
        condition: Box<Node>,
        consequence: Box<Node>,
        alternative: Box<Node>,
    },
    /// The terminal statement marker, printed as `do-nothing`.
    Nop,
}

impl Node {
    // ── Builders ──────────────────────────────────────────────────────────

    pub fn number(n: i64) -> Self {
        Node::NumberLit(n)
    }

    pub fn boolean(b: bool) -> Self {
        Node::BoolLit(b)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Node, op: BinOp, right: Node) -> Self {
        Node::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn add(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::Add, right)
    }

    pub fn sub(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::Sub, right)
    }

    pub fn mul(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::Mul, right)
    }

    pub fn div(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::Div, right)
    }

    pub fn lt(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::Less, right)
    }

    pub fn le(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::LessEq, right)
    }

    pub fn gt(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::Greater, right)
    }

    pub fn ge(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::GreaterEq, right)
    }

    pub fn and(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::And, right)
    }

    pub fn or(left: Node, right: Node) -> Self {
        Self::binary(left, BinOp::Or, right)
    }

    pub fn not(operand: Node) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    pub fn assign(name: impl Into<String>, expression: Node) -> Self {
        Node::Assign {
            name: name.into(),
            expression: Box::new(expression),
        }
    }

    pub fn if_else(condition: Node, consequence: Node, alternative: Node) -> Self {
        Node::If {
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative: Box::new(alternative),
        }
    }

    pub fn nop() -> Self {
        Node::Nop
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Whether another reduction step is defined for this node.
    ///
    /// Literals and `Nop` are fixed points. Every other variant needs at
    /// least one step: a variable must be looked up, an operator must
    /// collapse, an assignment must bind, a conditional must pick a branch.
    /// None of this depends on the environment.
    pub fn is_reducible(&self) -> bool {
        match self {
            Node::NumberLit(_) | Node::BoolLit(_) | Node::Nop => false,
            Node::Variable(_)
            | Node::Unary { .. }
            | Node::Binary { .. }
            | Node::Assign { .. }
            | Node::If { .. } => true,
        }
    }

    pub fn is_normal_form(&self) -> bool {
        !self.is_reducible()
    }

    /// The literal payload, if this node is a literal.
    pub fn as_value(&self) -> Option<Value> {
        match self {
            Node::NumberLit(n) => Some(Value::Number(*n)),
            Node::BoolLit(b) => Some(Value::Bool(*b)),
            _ => None,
        }
    }

    /// Kind of literal an operator node collapses to. `None` for anything
    /// that is not an operator.
    pub fn result_kind(&self) -> Option<ValueKind> {
        match self {
            Node::Unary { op, .. } => Some(op.result_kind()),
            Node::Binary { op, .. } => Some(op.result_kind()),
            _ => None,
        }
    }

    /// Number of nodes in the tree. Every reduction step either shrinks the
    /// tree or replaces a variable by a literal, so a run takes at most this
    /// many steps.
    pub fn size(&self) -> usize {
        match self {
            Node::NumberLit(_) | Node::BoolLit(_) | Node::Variable(_) | Node::Nop => 1,
            Node::Unary { operand, .. } => 1 + operand.size(),
            Node::Binary { left, right, .. } => 1 + left.size() + right.size(),
            Node::Assign { expression, .. } => 1 + expression.size(),
            Node::If {
                condition,
                consequence,
                alternative,
            } => 1 + condition.size() + consequence.size() + alternative.size(),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Node::NumberLit(n),
            Value::Bool(b) => Node::BoolLit(b),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::NumberLit(n) => write!(f, "{n}"),
            Node::BoolLit(b) => write!(f, "{b}"),
            Node::Variable(name) => f.write_str(name),
            Node::Unary { op, operand } => write!(f, "{op} {operand}"),
            Node::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            Node::Assign { name, expression } => write!(f, "{name} = {expression}"),
            Node::If {
                condition,
                consequence,
                alternative,
            } => write!(f, "if {condition} then {consequence} else {alternative}"),
            Node::Nop => f.write_str("do-nothing"),
        }
    }
}
