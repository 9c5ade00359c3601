//! Arithmetic and logical folding primitives
//!
//! Pure operator semantics over [`Value`]: binary numeric promotion, wrapping
//! two's-complement integer arithmetic, IEEE floating arithmetic, string
//! concatenation and the comparison matrix. Every primitive reports failure
//! through [`ArithError`] instead of panicking; the evaluator degrades any
//! fault to "not a constant".

use crate::ast::{BinaryOp, UnaryOp};
use crate::eval::value::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArithError {
    #[error("integer division or modulo by zero")]
    DivisionByZero,
    #[error("operand types do not fit the operator")]
    TypeMismatch,
}

pub(crate) type FoldResult = Result<Value, ArithError>;

/// Unary numeric promotion: char, byte and short compute at int width.
pub(crate) fn promote_unary(v: Value) -> Value {
    match v {
        Value::Char(c) => Value::Int(c as i32),
        Value::Byte(b) => Value::Int(b as i32),
        Value::Short(s) => Value::Int(s as i32),
        other => other,
    }
}

// Binary numeric promotion: widen both operands up the ladder
// double > float > long > int.
fn promote_pair(lhs: Value, rhs: Value) -> Result<(Value, Value), ArithError> {
    let lhs = promote_unary(lhs);
    let rhs = promote_unary(rhs);
    if !lhs.is_numeric() || !rhs.is_numeric() {
        return Err(ArithError::TypeMismatch);
    }
    let widen = |v: Value, to_double: bool, to_float: bool, to_long: bool| -> Value {
        if to_double {
            Value::Double(v.as_double().expect("numeric operand"))
        } else if to_float {
            Value::Float(v.as_double().expect("numeric operand") as f32)
        } else if to_long {
            Value::Long(v.as_long().expect("integral operand"))
        } else {
            v
        }
    };
    let to_double = matches!(lhs, Value::Double(_)) || matches!(rhs, Value::Double(_));
    let to_float = !to_double && (matches!(lhs, Value::Float(_)) || matches!(rhs, Value::Float(_)));
    let to_long = !to_double && !to_float && (matches!(lhs, Value::Long(_)) || matches!(rhs, Value::Long(_)));
    Ok((widen(lhs, to_double, to_float, to_long), widen(rhs, to_double, to_float, to_long)))
}

pub(crate) fn fold_unary(op: UnaryOp, operand: Value) -> FoldResult {
    match op {
        UnaryOp::Plus => {
            let v = promote_unary(operand);
            if v.is_numeric() { Ok(v) } else { Err(ArithError::TypeMismatch) }
        }
        UnaryOp::Minus => match promote_unary(operand) {
            Value::Int(v) => Ok(Value::Int(v.wrapping_neg())),
            Value::Long(v) => Ok(Value::Long(v.wrapping_neg())),
            Value::Float(v) => Ok(Value::Float(-v)),
            Value::Double(v) => Ok(Value::Double(-v)),
            _ => Err(ArithError::TypeMismatch),
        },
        UnaryOp::BitNot => match promote_unary(operand) {
            Value::Int(v) => Ok(Value::Int(!v)),
            Value::Long(v) => Ok(Value::Long(!v)),
            _ => Err(ArithError::TypeMismatch),
        },
        UnaryOp::Not => match operand {
            Value::Boolean(v) => Ok(Value::Boolean(!v)),
            _ => Err(ArithError::TypeMismatch),
        },
    }
}

pub(crate) fn fold_binary(op: BinaryOp, lhs: Value, rhs: Value) -> FoldResult {
    // String concatenation wins over arithmetic for `+`.
    if op == BinaryOp::Add && (matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_))) {
        return concat(lhs, rhs);
    }
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            fold_arithmetic(op, lhs, rhs)
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => fold_relational(op, lhs, rhs),
        BinaryOp::Eq | BinaryOp::Ne => fold_equality(op, lhs, rhs),
        BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => fold_bitwise(op, lhs, rhs),
        BinaryOp::AndAnd => match (lhs, rhs) {
            (Value::Boolean(l), Value::Boolean(r)) => Ok(Value::Boolean(l && r)),
            _ => Err(ArithError::TypeMismatch),
        },
        BinaryOp::OrOr => match (lhs, rhs) {
            (Value::Boolean(l), Value::Boolean(r)) => Ok(Value::Boolean(l || r)),
            _ => Err(ArithError::TypeMismatch),
        },
        BinaryOp::LShift | BinaryOp::RShift | BinaryOp::URShift => fold_shift(op, lhs, rhs),
    }
}

fn concat(lhs: Value, rhs: Value) -> FoldResult {
    // A non-null reference of unknown value has no string form.
    if matches!(lhs, Value::NotNull) || matches!(rhs, Value::NotNull) {
        return Err(ArithError::TypeMismatch);
    }
    Ok(Value::Str(format!("{}{}", lhs, rhs)))
}

fn fold_arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> FoldResult {
    match promote_pair(lhs, rhs)? {
        (Value::Int(l), Value::Int(r)) => match op {
            BinaryOp::Add => Ok(Value::Int(l.wrapping_add(r))),
            BinaryOp::Sub => Ok(Value::Int(l.wrapping_sub(r))),
            BinaryOp::Mul => Ok(Value::Int(l.wrapping_mul(r))),
            BinaryOp::Div if r != 0 => Ok(Value::Int(l.wrapping_div(r))),
            BinaryOp::Mod if r != 0 => Ok(Value::Int(l.wrapping_rem(r))),
            _ => Err(ArithError::DivisionByZero),
        },
        (Value::Long(l), Value::Long(r)) => match op {
            BinaryOp::Add => Ok(Value::Long(l.wrapping_add(r))),
            BinaryOp::Sub => Ok(Value::Long(l.wrapping_sub(r))),
            BinaryOp::Mul => Ok(Value::Long(l.wrapping_mul(r))),
            BinaryOp::Div if r != 0 => Ok(Value::Long(l.wrapping_div(r))),
            BinaryOp::Mod if r != 0 => Ok(Value::Long(l.wrapping_rem(r))),
            _ => Err(ArithError::DivisionByZero),
        },
        // Floating division and modulo by zero fold to infinities and NaN,
        // which are valid constants.
        (Value::Float(l), Value::Float(r)) => match op {
            BinaryOp::Add => Ok(Value::Float(l + r)),
            BinaryOp::Sub => Ok(Value::Float(l - r)),
            BinaryOp::Mul => Ok(Value::Float(l * r)),
            BinaryOp::Div => Ok(Value::Float(l / r)),
            BinaryOp::Mod => Ok(Value::Float(l % r)),
            _ => unreachable!("arithmetic operator"),
        },
        (Value::Double(l), Value::Double(r)) => match op {
            BinaryOp::Add => Ok(Value::Double(l + r)),
            BinaryOp::Sub => Ok(Value::Double(l - r)),
            BinaryOp::Mul => Ok(Value::Double(l * r)),
            BinaryOp::Div => Ok(Value::Double(l / r)),
            BinaryOp::Mod => Ok(Value::Double(l % r)),
            _ => unreachable!("arithmetic operator"),
        },
        _ => Err(ArithError::TypeMismatch),
    }
}

fn fold_relational(op: BinaryOp, lhs: Value, rhs: Value) -> FoldResult {
    fn cmp<T: PartialOrd>(op: BinaryOp, l: T, r: T) -> bool {
        match op {
            BinaryOp::Lt => l < r,
            BinaryOp::Le => l <= r,
            BinaryOp::Gt => l > r,
            BinaryOp::Ge => l >= r,
            _ => unreachable!("relational operator"),
        }
    }
    // NaN makes every ordered comparison false, matching fcmp/dcmp semantics.
    match promote_pair(lhs, rhs)? {
        (Value::Int(l), Value::Int(r)) => Ok(Value::Boolean(cmp(op, l, r))),
        (Value::Long(l), Value::Long(r)) => Ok(Value::Boolean(cmp(op, l, r))),
        (Value::Float(l), Value::Float(r)) => Ok(Value::Boolean(cmp(op, l, r))),
        (Value::Double(l), Value::Double(r)) => Ok(Value::Boolean(cmp(op, l, r))),
        _ => Err(ArithError::TypeMismatch),
    }
}

// Numeric and boolean equality. Reference and null comparisons need static
// types and are decided by the evaluator, not here.
fn fold_equality(op: BinaryOp, lhs: Value, rhs: Value) -> FoldResult {
    let eq = match (lhs, rhs) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (lhs, rhs) => match promote_pair(lhs, rhs)? {
            (Value::Int(l), Value::Int(r)) => l == r,
            (Value::Long(l), Value::Long(r)) => l == r,
            (Value::Float(l), Value::Float(r)) => l == r,
            (Value::Double(l), Value::Double(r)) => l == r,
            _ => return Err(ArithError::TypeMismatch),
        },
    };
    Ok(Value::Boolean(if op == BinaryOp::Eq { eq } else { !eq }))
}

fn fold_bitwise(op: BinaryOp, lhs: Value, rhs: Value) -> FoldResult {
    if let (Value::Boolean(l), Value::Boolean(r)) = (&lhs, &rhs) {
        let b = match op {
            BinaryOp::And => *l & *r,
            BinaryOp::Or => *l | *r,
            BinaryOp::Xor => *l ^ *r,
            _ => unreachable!("bitwise operator"),
        };
        return Ok(Value::Boolean(b));
    }
    match promote_pair(lhs, rhs)? {
        (Value::Int(l), Value::Int(r)) => {
            let v = match op {
                BinaryOp::And => l & r,
                BinaryOp::Or => l | r,
                BinaryOp::Xor => l ^ r,
                _ => unreachable!("bitwise operator"),
            };
            Ok(Value::Int(v))
        }
        (Value::Long(l), Value::Long(r)) => {
            let v = match op {
                BinaryOp::And => l & r,
                BinaryOp::Or => l | r,
                BinaryOp::Xor => l ^ r,
                _ => unreachable!("bitwise operator"),
            };
            Ok(Value::Long(v))
        }
        _ => Err(ArithError::TypeMismatch),
    }
}

// Shift operands promote independently; the result takes the left operand's
// width and the distance is masked to 0x1F (int) or 0x3F (long).
fn fold_shift(op: BinaryOp, lhs: Value, rhs: Value) -> FoldResult {
    let lhs = promote_unary(lhs);
    let rhs = promote_unary(rhs);
    let dist = rhs.as_long().ok_or(ArithError::TypeMismatch)?;
    match lhs {
        Value::Int(l) => {
            let sh = (dist & 0x1F) as u32;
            let v = match op {
                BinaryOp::LShift => l.wrapping_shl(sh),
                BinaryOp::RShift => l.wrapping_shr(sh),
                BinaryOp::URShift => ((l as u32) >> sh) as i32,
                _ => unreachable!("shift operator"),
            };
            Ok(Value::Int(v))
        }
        Value::Long(l) => {
            let sh = (dist & 0x3F) as u32;
            let v = match op {
                BinaryOp::LShift => l.wrapping_shl(sh),
                BinaryOp::RShift => l.wrapping_shr(sh),
                BinaryOp::URShift => ((l as u64) >> sh) as i64,
                _ => unreachable!("shift operator"),
            };
            Ok(Value::Long(v))
        }
        _ => Err(ArithError::TypeMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp as B;
    use crate::ast::UnaryOp as U;

    #[test]
    fn char_operands_compute_at_int_width() {
        assert_eq!(fold_binary(B::Add, Value::Char('A'), Value::Int(2)), Ok(Value::Int(67)));
        assert_eq!(fold_unary(U::Minus, Value::Char('A')), Ok(Value::Int(-65)));
    }

    #[test]
    fn widening_ladder_picks_the_widest_operand() {
        assert_eq!(fold_binary(B::Add, Value::Int(1), Value::Long(2)), Ok(Value::Long(3)));
        assert_eq!(fold_binary(B::Mul, Value::Long(2), Value::Float(1.5)), Ok(Value::Float(3.0)));
        assert_eq!(fold_binary(B::Add, Value::Float(1.0), Value::Double(0.5)), Ok(Value::Double(1.5)));
        assert_eq!(fold_binary(B::Add, Value::Byte(1), Value::Short(2)), Ok(Value::Int(3)));
    }

    #[test]
    fn integer_overflow_wraps_like_the_jvm() {
        assert_eq!(
            fold_binary(B::Add, Value::Int(i32::MAX), Value::Int(1)),
            Ok(Value::Int(i32::MIN))
        );
        assert_eq!(
            fold_binary(B::Div, Value::Int(i32::MIN), Value::Int(-1)),
            Ok(Value::Int(i32::MIN))
        );
        assert_eq!(fold_unary(U::Minus, Value::Long(i64::MIN)), Ok(Value::Long(i64::MIN)));
    }

    #[test]
    fn integer_division_by_zero_is_a_fault() {
        assert_eq!(
            fold_binary(B::Div, Value::Int(5), Value::Int(0)),
            Err(ArithError::DivisionByZero)
        );
        assert_eq!(
            fold_binary(B::Mod, Value::Long(5), Value::Long(0)),
            Err(ArithError::DivisionByZero)
        );
    }

    #[test]
    fn floating_division_by_zero_folds_to_infinity() {
        assert_eq!(
            fold_binary(B::Div, Value::Double(5.0), Value::Int(0)),
            Ok(Value::Double(f64::INFINITY))
        );
    }

    #[test]
    fn shift_distance_is_masked_per_width() {
        assert_eq!(fold_binary(B::LShift, Value::Int(1), Value::Int(33)), Ok(Value::Int(2)));
        assert_eq!(fold_binary(B::LShift, Value::Long(1), Value::Int(33)), Ok(Value::Long(1 << 33)));
        assert_eq!(
            fold_binary(B::URShift, Value::Int(-1), Value::Int(28)),
            Ok(Value::Int(0xF))
        );
    }

    #[test]
    fn nan_compares_false_under_every_order() {
        for op in [B::Lt, B::Le, B::Gt, B::Ge] {
            assert_eq!(
                fold_binary(op, Value::Double(f64::NAN), Value::Double(0.0)),
                Ok(Value::Boolean(false))
            );
        }
        assert_eq!(
            fold_binary(B::Eq, Value::Double(f64::NAN), Value::Double(f64::NAN)),
            Ok(Value::Boolean(false))
        );
    }

    #[test]
    fn concat_stringifies_every_folded_operand() {
        let s = |v| Value::Str(String::from(v));
        assert_eq!(fold_binary(B::Add, s("a"), Value::Int(1)), Ok(s("a1")));
        assert_eq!(fold_binary(B::Add, Value::Double(1.0), s("!")), Ok(s("1.0!")));
        assert_eq!(fold_binary(B::Add, s("x = "), Value::Null), Ok(s("x = null")));
        assert_eq!(
            fold_binary(B::Add, s("a"), Value::NotNull),
            Err(ArithError::TypeMismatch)
        );
    }
}
