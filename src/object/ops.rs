//! Binary/unary operator dispatch (spec §4.1).
//!
//! `L op R` tries `L.calc2(op, R)` first, then falls back to
//! `R.rcalc2(op, L)`; an operator unhandled by either side is an
//! `InvalidOperator` error carrying both types.

use strum::{Display, EnumIter};

use crate::bits::Bits;
use crate::bytes::BytesValue;
use crate::error::ValueError;
use crate::integer::{DivMode, Int};
use crate::list::ListValue;
use crate::text::StrValue;

use super::{TruthMode, TypeTag, Value};

/// A binary or unary operator as carried in diagnostics and dispatched by
/// [`calc2`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Concat,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LogicalAnd,
    LogicalOr,
    Neg,
    Pos,
    Not,
    Invert,
}

fn invalid(op: Operator, left: &Value, right: &Value) -> ValueError {
    ValueError::InvalidOperator { op, left: left.type_tag(), right: right.type_tag() }
}

/// Evaluates `left op right`, handling short-circuit, `None`/`Error`
/// propagation, left-then-right fallback dispatch, and the numeric
/// coercion lattice (spec §4.1).
pub fn calc2(op: Operator, left: &Value, right: &Value) -> Result<Value, ValueError> {
    if matches!(op, Operator::LogicalAnd | Operator::LogicalOr) {
        let l = left.truth(TruthMode::Default);
        return Ok(Value::Bool(match op {
            Operator::LogicalAnd => l && right.truth(TruthMode::Default),
            Operator::LogicalOr => l || right.truth(TruthMode::Default),
            _ => unreachable!(),
        }));
    }
    if right.is_none() || right.is_error() {
        return Ok(right.clone());
    }
    if left.is_none() || left.is_error() {
        return Ok(left.clone());
    }

    // The coercion lattice (bool -> bits -> int) already normalizes the
    // common mixed-type cases before dispatch, so there is no type pair
    // here that `try_calc2(op, left, right)` handles only when tried in
    // the opposite order; left-then-right fallback collapses to a single
    // attempt followed by the invalid-operator error (spec §4.1 step 4).
    match try_calc2(op, left, right) {
        Some(v) => v,
        None => Err(invalid(op, left, right)),
    }
}

fn try_calc2(op: Operator, left: &Value, right: &Value) -> Option<Result<Value, ValueError>> {
    match (left, right) {
        (Value::List(a), Value::List(b)) => list_ops(op, a, b),
        (Value::Bytes(a), Value::Bytes(b)) => bytes_ops(op, a, b),
        (Value::Str(a), Value::Str(b)) => str_ops(op, a, b),
        (Value::Bits(a), Value::Bits(b)) => bits_ops(op, a, b),
        (Value::Float(_), _) | (_, Value::Float(_)) => float_ops(op, left, right),
        _ => {
            let a = left.coerce_to_int()?;
            let b = right.coerce_to_int()?;
            int_ops(op, &a, &b)
        }
    }
}

fn float_of(v: &Value) -> Option<f64> {
    match v {
        Value::Float(f) => Some(*f),
        other => other.coerce_to_int().map(|i| i.to_string().parse().unwrap_or(f64::NAN)),
    }
}

fn float_ops(op: Operator, left: &Value, right: &Value) -> Option<Result<Value, ValueError>> {
    let (a, b) = (float_of(left)?, float_of(right)?);
    Some(Ok(match op {
        Operator::Add => Value::Float(a + b),
        Operator::Sub => Value::Float(a - b),
        Operator::Mul => Value::Float(a * b),
        Operator::Div => Value::Float(a / b),
        Operator::Pow => Value::Float(crate::float::pow(a, b)),
        Operator::Eq => Value::Bool(a == b),
        Operator::Ne => Value::Bool(a != b),
        Operator::Lt => Value::Bool(a < b),
        Operator::Le => Value::Bool(a <= b),
        Operator::Gt => Value::Bool(a > b),
        Operator::Ge => Value::Bool(a >= b),
        _ => return None,
    }))
}

fn int_ops(op: Operator, a: &Int, b: &Int) -> Option<Result<Value, ValueError>> {
    Some(match op {
        Operator::Add => Ok(Value::Int(a.add(b))),
        Operator::Sub => Ok(Value::Int(a.sub(b))),
        Operator::Mul => Ok(Value::Int(a.mul(b))),
        Operator::Div => a.div_or_rem(b, DivMode::Quotient).map(Value::Int),
        Operator::Mod => a.div_or_rem(b, DivMode::Remainder).map(Value::Int),
        Operator::Pow => {
            if b.signum() < 0 {
                // Negative exponent: promote both sides to f64 and delegate
                // to the float power operator (spec §4.2).
                let af: f64 = a.to_string().parse().unwrap_or(f64::NAN);
                let bf: f64 = b.to_string().parse().unwrap_or(f64::NAN);
                Ok(Value::Float(crate::float::pow(af, bf)))
            } else {
                a.pow(b).map(Value::Int)
            }
        }
        Operator::And => Ok(Value::Int(a.bitand(b))),
        Operator::Or => Ok(Value::Int(a.bitor(b))),
        Operator::Xor => Ok(Value::Int(a.bitxor(b))),
        Operator::Shl => a.left_shift(b).map(|(v, _)| Value::Int(v)),
        Operator::Shr => a.right_shift(b).map(|(v, _)| Value::Int(v)),
        Operator::Eq => Ok(Value::Bool(a == b)),
        Operator::Ne => Ok(Value::Bool(a != b)),
        Operator::Lt => Ok(Value::Bool(a < b)),
        Operator::Le => Ok(Value::Bool(a <= b)),
        Operator::Gt => Ok(Value::Bool(a > b)),
        Operator::Ge => Ok(Value::Bool(a >= b)),
        _ => return None,
    })
}

fn bits_ops(op: Operator, a: &Bits, b: &Bits) -> Option<Result<Value, ValueError>> {
    Some(Ok(match op {
        Operator::And => Value::Bits(a.bitand(b)),
        Operator::Or => Value::Bits(a.bitor(b)),
        Operator::Xor => Value::Bits(a.bitxor(b)),
        Operator::Concat => Value::Bits(a.concat(b)),
        Operator::Eq => Value::Bool(a == b),
        Operator::Ne => Value::Bool(a != b),
        Operator::Lt => Value::Bool(a < b),
        Operator::Le => Value::Bool(a <= b),
        Operator::Gt => Value::Bool(a > b),
        Operator::Ge => Value::Bool(a >= b),
        _ => return None,
    }))
}

fn bytes_ops(op: Operator, a: &BytesValue, b: &BytesValue) -> Option<Result<Value, ValueError>> {
    Some(Ok(match op {
        Operator::Concat | Operator::Add => Value::Bytes(a.concat(b)),
        Operator::Eq => Value::Bool(a == b),
        Operator::Ne => Value::Bool(a != b),
        _ => return None,
    }))
}

fn str_ops(op: Operator, a: &StrValue, b: &StrValue) -> Option<Result<Value, ValueError>> {
    Some(Ok(match op {
        Operator::Concat | Operator::Add => Value::Str(a.concat(b)),
        Operator::Eq => Value::Bool(a == b),
        Operator::Ne => Value::Bool(a != b),
        _ => return None,
    }))
}

fn list_ops(op: Operator, a: &ListValue, b: &ListValue) -> Option<Result<Value, ValueError>> {
    Some(Ok(match op {
        Operator::Concat | Operator::Add => Value::List(a.concat(b)),
        Operator::Eq => Value::Bool(a == b),
        Operator::Ne => Value::Bool(a != b),
        _ => return None,
    }))
}

/// Unary operator dispatch (`calc1`, spec §4.1).
pub fn calc1(op: Operator, v: &Value) -> Result<Value, ValueError> {
    match (op, v) {
        (Operator::Neg, Value::Int(i)) => Ok(Value::Int(i.neg())),
        (Operator::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (Operator::Pos, Value::Int(i)) => Ok(Value::Int(i.clone())),
        (Operator::Pos, Value::Float(f)) => Ok(Value::Float(*f)),
        (Operator::Invert, Value::Int(i)) => Ok(Value::Int(i.not())),
        (Operator::Invert, Value::Bits(b)) => Ok(Value::Bits(b.not())),
        (Operator::Not, other) => Ok(Value::Bool(!other.truth(TruthMode::Default))),
        _ => match v.coerce_to_int() {
            Some(i) => calc1(op, &Value::Int(i)),
            None => Err(ValueError::InvalidOperator { op, left: v.type_tag(), right: TypeTag::None }),
        },
    }
}
