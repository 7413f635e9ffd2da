//! Single-step reduction.
//!
//! [`reduce`] rewrites a node by exactly one primitive step. The strategy is
//! innermost-leftmost: a compound node first steps its leftmost reducible
//! child, and only collapses itself once every child it needs is a literal.

use crate::config::{DivisionMode, MachineConfig};
use crate::error::{ArithmeticError, EvalError, EvalResult};
use pvm_types::{BinOp, Environment, Node, UnaryOp, Value, ValueKind};

/// Result of one step: the rewritten node, and the new environment if the
/// step produced one.
pub(crate) type Step = (Node, Option<Environment>);

/// Reduce `node` by one step under `env`.
///
/// Returns the rewritten node and the environment that follows the step.
/// Only `Assign` produces a different environment; every other step hands
/// back `env` unchanged. `env` itself is never modified.
pub fn reduce(
    node: &Node,
    env: &Environment,
    config: &MachineConfig,
) -> EvalResult<(Node, Environment)> {
    let (next, new_env) = reduce_step(node, env, config)?;
    Ok((next, new_env.unwrap_or_else(|| env.clone())))
}

pub(crate) fn reduce_step(
    node: &Node,
    env: &Environment,
    config: &MachineConfig,
) -> EvalResult<Step> {
    match node {
        Node::NumberLit(_) | Node::BoolLit(_) | Node::Nop => {
            Err(EvalError::Irreducible(node.to_string()))
        }

        Node::Variable(name) => env
            .get(name)
            .map(|value| (Node::from(*value), None))
            .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),

        Node::Unary { op, operand } => {
            if operand.is_reducible() {
                let (operand, new_env) = reduce_step(operand, env, config)?;
                Ok((Node::unary(*op, operand), new_env))
            } else {
                let value = literal_operand(operand, op.as_str())?;
                Ok((Node::from(apply_unary(*op, value)?), None))
            }
        }

        Node::Binary { left, op, right } => {
            if left.is_reducible() {
                let (left, new_env) = reduce_step(left, env, config)?;
                Ok((Node::binary(left, *op, (**right).clone()), new_env))
            } else if right.is_reducible() {
                let (right, new_env) = reduce_step(right, env, config)?;
                Ok((Node::binary((**left).clone(), *op, right), new_env))
            } else {
                let l = literal_operand(left, op.as_str())?;
                let r = literal_operand(right, op.as_str())?;
                Ok((Node::from(apply_binary(*op, l, r, config.division)?), None))
            }
        }

        Node::Assign { name, expression } => {
            if expression.is_reducible() {
                let (expression, new_env) = reduce_step(expression, env, config)?;
                Ok((Node::assign(name.clone(), expression), new_env))
            } else {
                let value = literal_operand(expression, "=")?;
                Ok((Node::Nop, Some(env.bind(name.clone(), value))))
            }
        }

        Node::If {
            condition,
            consequence,
            alternative,
        } => {
            if condition.is_reducible() {
                let (condition, new_env) = reduce_step(condition, env, config)?;
                Ok((
                    Node::if_else(condition, (**consequence).clone(), (**alternative).clone()),
                    new_env,
                ))
            } else {
                // The chosen branch is not stepped in this tick.
                match literal_operand(condition, "if")? {
                    Value::Bool(true) => Ok(((**consequence).clone(), None)),
                    Value::Bool(false) => Ok(((**alternative).clone(), None)),
                    other => Err(EvalError::TypeMismatch(format!(
                        "if condition must be boolean, got {} `{other}`",
                        other.type_name()
                    ))),
                }
            }
        }
    }
}

/// The literal payload of an irreducible operand. `Nop` is the only
/// irreducible node that is not a literal.
fn literal_operand(node: &Node, context: &str) -> EvalResult<Value> {
    node.as_value().ok_or_else(|| {
        EvalError::TypeMismatch(format!("'{context}' expects a value, got `{node}`"))
    })
}

/// Check a literal operand against the kind its operator accepts.
fn check_operand(op: &str, expected: ValueKind, value: Value) -> EvalResult<Value> {
    if value.kind() == expected {
        Ok(value)
    } else {
        Err(EvalError::TypeMismatch(format!(
            "'{op}' expects {expected} operands, got {} `{value}`",
            value.type_name()
        )))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operator table
// ══════════════════════════════════════════════════════════════════════════════

/// Collapse a unary operator applied to a literal.
pub fn apply_unary(op: UnaryOp, operand: Value) -> EvalResult<Value> {
    let operand = check_operand(op.as_str(), op.operand_kind(), operand)?;
    match (op, operand) {
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => unreachable!("operand kind checked above"),
    }
}

/// Collapse a binary operator applied to two literals.
///
/// `and`/`or` combine two already-reduced booleans; they never see an
/// unreduced operand, so there is nothing to short-circuit.
pub fn apply_binary(
    op: BinOp,
    left: Value,
    right: Value,
    division: DivisionMode,
) -> EvalResult<Value> {
    let sym = op.as_str();
    let left = check_operand(sym, op.operand_kind(), left)?;
    let right = check_operand(sym, op.operand_kind(), right)?;
    let overflow = ArithmeticError::Overflow { op: sym };
    let value = match (op, left, right) {
        (BinOp::Add, Value::Number(a), Value::Number(b)) => {
            Value::Number(a.checked_add(b).ok_or(overflow)?)
        }
        (BinOp::Sub, Value::Number(a), Value::Number(b)) => {
            Value::Number(a.checked_sub(b).ok_or(overflow)?)
        }
        (BinOp::Mul, Value::Number(a), Value::Number(b)) => {
            Value::Number(a.checked_mul(b).ok_or(overflow)?)
        }
        (BinOp::Div, Value::Number(a), Value::Number(b)) => Value::Number(divide(a, b, division)?),
        (BinOp::Less, Value::Number(a), Value::Number(b)) => Value::Bool(a < b),
        (BinOp::LessEq, Value::Number(a), Value::Number(b)) => Value::Bool(a <= b),
        (BinOp::Greater, Value::Number(a), Value::Number(b)) => Value::Bool(a > b),
        (BinOp::GreaterEq, Value::Number(a), Value::Number(b)) => Value::Bool(a >= b),
        (BinOp::And, Value::Bool(a), Value::Bool(b)) => Value::Bool(a & b),
        (BinOp::Or, Value::Bool(a), Value::Bool(b)) => Value::Bool(a | b),
        _ => unreachable!("operand kinds checked above"),
    };
    Ok(value)
}

fn divide(a: i64, b: i64, mode: DivisionMode) -> Result<i64, ArithmeticError> {
    if b == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    let q = a
        .checked_div(b)
        .ok_or(ArithmeticError::Overflow { op: "/" })?;
    match mode {
        DivisionMode::Truncate => Ok(q),
        DivisionMode::Floor if a % b != 0 && ((a < 0) != (b < 0)) => Ok(q - 1),
        DivisionMode::Floor => Ok(q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(divide(7, 2, DivisionMode::Floor), Ok(3));
        assert_eq!(divide(-7, 2, DivisionMode::Floor), Ok(-4));
        assert_eq!(divide(7, -2, DivisionMode::Floor), Ok(-4));
        assert_eq!(divide(-7, -2, DivisionMode::Floor), Ok(3));
        assert_eq!(divide(-8, 2, DivisionMode::Floor), Ok(-4));
    }

    #[test]
    fn truncating_division_rounds_toward_zero() {
        assert_eq!(divide(-7, 2, DivisionMode::Truncate), Ok(-3));
        assert_eq!(divide(7, -2, DivisionMode::Truncate), Ok(-3));
    }

    #[test]
    fn division_edge_cases() {
        assert_eq!(divide(1, 0, DivisionMode::Floor), Err(ArithmeticError::DivisionByZero));
        assert_eq!(
            divide(i64::MIN, -1, DivisionMode::Floor),
            Err(ArithmeticError::Overflow { op: "/" })
        );
    }

    #[test]
    fn operands_are_checked_against_operand_kind() {
        for op in BinOp::ALL {
            let wrong = match op.operand_kind() {
                ValueKind::Number => Value::Bool(true),
                ValueKind::Boolean => Value::Number(1),
            };
            let err = apply_binary(op, wrong, wrong, DivisionMode::Floor).unwrap_err();
            assert!(matches!(err, EvalError::TypeMismatch(_)), "{op}: {err}");
        }
        assert!(matches!(
            apply_unary(UnaryOp::Not, Value::Number(0)),
            Err(EvalError::TypeMismatch(_))
        ));
        assert_eq!(apply_unary(UnaryOp::Not, Value::Bool(false)), Ok(Value::Bool(true)));
    }

    #[test]
    fn strict_and_or() {
        let f = Value::Bool(false);
        let t = Value::Bool(true);
        assert_eq!(apply_binary(BinOp::And, f, t, DivisionMode::Floor), Ok(f));
        assert_eq!(apply_binary(BinOp::Or, t, f, DivisionMode::Floor), Ok(t));
        // Both operands are checked even when the left one decides the result.
        assert!(matches!(
            apply_binary(BinOp::And, f, Value::Number(1), DivisionMode::Floor),
            Err(EvalError::TypeMismatch(_))
        ));
    }
}
