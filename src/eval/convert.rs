//! Constant conversions
//!
//! [`implicit_conversion`] is the assignment-context check callers use to ask
//! whether a constant literally fits a declared type (JLS 5.2: identity,
//! widening, and implicit narrowing of a constant that fits). Cast conversion
//! for `(T) expr` trees shares the same core but additionally truncates
//! floating sources. In both, an integral target that cannot hold the exact
//! value yields no result rather than a wrapped one.

use crate::eval::value::Value;
use crate::types::{PrimitiveType, Type};

/// Implicit (assignment) conversion of a constant to a target type.
///
/// Pure and uncached. Returns `None` when the conversion does not exist or
/// the value does not fit: `implicit_conversion(&Value::Int(70000),
/// &Type::Primitive(PrimitiveType::Short))` is `None`.
pub fn implicit_conversion(value: &Value, target: &Type) -> Option<Value> {
    match target {
        Type::Primitive(p) => {
            let source = value.primitive_type()?;
            if source == *p {
                return Some(value.clone());
            }
            if widens(source, *p) {
                return widen(value, *p);
            }
            // Constant narrowing is only implicit among the int-like types.
            if source.is_integral()
                && source != PrimitiveType::Long
                && matches!(p, PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char)
            {
                return integral_value(value.as_long()?, *p);
            }
            None
        }
        Type::Reference(name) => {
            if matches!(value, Value::Null) {
                return Some(Value::Null);
            }
            if crate::types::is_string_name(name) {
                return value.as_str().map(|_| value.clone());
            }
            // Boxing to the exact wrapper only.
            let boxed = crate::types::wrapper_primitives().get(name.as_str()).copied()?;
            (value.primitive_type()? == boxed).then(|| value.clone())
        }
        Type::Array(_) => matches!(value, Value::Null).then(|| Value::Null),
        Type::Null | Type::Error => None,
    }
}

/// Cast conversion to a primitive target. Unboxing is implicit in the value
/// domain; boolean casts only to boolean.
pub(crate) fn cast_to_primitive(value: &Value, target: PrimitiveType) -> Option<Value> {
    let source = value.primitive_type()?;
    if source == PrimitiveType::Boolean || target == PrimitiveType::Boolean {
        return (source == target).then(|| value.clone());
    }
    match target {
        PrimitiveType::Float => Some(Value::Float(value.as_double()? as f32)),
        PrimitiveType::Double => Some(Value::Double(value.as_double()?)),
        _ => {
            let v = if source.is_integral() {
                value.as_long()?
            } else {
                // Floating sources truncate toward zero; NaN, infinities and
                // out-of-range results do not fold.
                let f = value.as_double()?.trunc();
                if !f.is_finite() || f < i64::MIN as f64 || f > i64::MAX as f64 {
                    return None;
                }
                f as i64
            };
            integral_value(v, target)
        }
    }
}

// JLS 5.1.2 widening primitive conversions.
fn widens(from: PrimitiveType, to: PrimitiveType) -> bool {
    use PrimitiveType::*;
    match from {
        Byte => matches!(to, Short | Int | Long | Float | Double),
        Short | Char => matches!(to, Int | Long | Float | Double),
        Int => matches!(to, Long | Float | Double),
        Long => matches!(to, Float | Double),
        Float => matches!(to, Double),
        Double | Boolean => false,
    }
}

fn widen(value: &Value, to: PrimitiveType) -> Option<Value> {
    match to {
        PrimitiveType::Short => Some(Value::Short(value.as_long()? as i16)),
        PrimitiveType::Int => Some(Value::Int(value.as_long()? as i32)),
        PrimitiveType::Long => Some(Value::Long(value.as_long()?)),
        PrimitiveType::Float => Some(Value::Float(value.as_double()? as f32)),
        PrimitiveType::Double => Some(Value::Double(value.as_double()?)),
        _ => None,
    }
}

// Exact-fit construction of an integral value; the one place the
// out-of-range rule lives.
fn integral_value(v: i64, target: PrimitiveType) -> Option<Value> {
    match target {
        PrimitiveType::Byte => i8::try_from(v).ok().map(Value::Byte),
        PrimitiveType::Short => i16::try_from(v).ok().map(Value::Short),
        PrimitiveType::Int => i32::try_from(v).ok().map(Value::Int),
        PrimitiveType::Long => Some(Value::Long(v)),
        PrimitiveType::Char => u16::try_from(v)
            .ok()
            .and_then(|c| char::from_u32(c as u32))
            .map(Value::Char),
        _ => None,
    }
}
