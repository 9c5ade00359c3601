//! Constant values
//!
//! The result domain of evaluation. A value is either a concrete typed
//! constant, the known-null reference, or a known-non-null reference of
//! unknown value. "Not a constant" is expressed as the absence of a value
//! (`Option::None`) at the API boundary, so no real value can ever be
//! mistaken for a sentinel, not even a string whose text happens to be
//! `"null"`.

use crate::ast::Literal;
use crate::types::{PrimitiveType, Type};
use std::fmt;

/// A compile-time constant value with its semantic type.
///
/// `Null` and `NotNull` only arise in enhanced mode; strict JLS folding
/// produces concrete variants exclusively.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    /// Statically known to evaluate to the null reference.
    Null,
    /// Known to be a non-null reference of unknown value.
    NotNull,
}

impl Value {
    /// A concrete constant, as opposed to a null-state fact.
    pub fn is_real_value(&self) -> bool {
        !matches!(self, Value::Null | Value::NotNull)
    }

    /// Statically known to be the null reference.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Known not to be the null reference: every concrete constant and the
    /// `NotNull` fact. `is_real_value` and `is_null` are mutually exclusive;
    /// this predicate overlaps the former.
    pub fn is_never_null(&self) -> bool {
        !matches!(self, Value::Null)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integral value widened to long. Char contributes its code point.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(*v as i64),
            Value::Short(v) => Some(*v as i64),
            Value::Int(v) => Some(*v as i64),
            Value::Long(v) => Some(*v),
            Value::Char(c) => Some(*c as i64),
            _ => None,
        }
    }

    /// Numeric value widened to double.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            other => other.as_long().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        Some(match self {
            Value::Boolean(_) => PrimitiveType::Boolean,
            Value::Char(_) => PrimitiveType::Char,
            Value::Byte(_) => PrimitiveType::Byte,
            Value::Short(_) => PrimitiveType::Short,
            Value::Int(_) => PrimitiveType::Int,
            Value::Long(_) => PrimitiveType::Long,
            Value::Float(_) => PrimitiveType::Float,
            Value::Double(_) => PrimitiveType::Double,
            Value::Str(_) | Value::Null | Value::NotNull => return None,
        })
    }

    /// The value's own semantic type, when it has one. `NotNull` carries no
    /// type information.
    pub fn type_of(&self) -> Option<Type> {
        match self {
            Value::Str(_) => Some(Type::string()),
            Value::Null => Some(Type::Null),
            Value::NotNull => None,
            other => other.primitive_type().map(Type::Primitive),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.primitive_type().is_some_and(PrimitiveType::is_numeric)
    }

    pub fn is_integral(&self) -> bool {
        self.primitive_type().is_some_and(PrimitiveType::is_integral)
    }
}

/// Source literal to value. The `null` literal is mode-dependent and handled
/// by the evaluator, not here.
pub(crate) fn value_of_literal(lit: &Literal) -> Option<Value> {
    Some(match lit {
        Literal::Int(v) => Value::Int(*v),
        Literal::Long(v) => Value::Long(*v),
        Literal::Float(v) => Value::Float(*v),
        Literal::Double(v) => Value::Double(*v),
        Literal::Boolean(v) => Value::Boolean(*v),
        Literal::Char(v) => Value::Char(*v),
        Literal::String(v) => Value::Str(v.clone()),
        Literal::Null => return None,
    })
}

// Java prints a trailing ".0" for integral floats and names the
// non-finite values; Rust's shortest form does neither.
fn fmt_java_double(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else if v == v.trunc() && v.abs() < 1.0e7 {
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}

/// Java string conversion, which is also the string-concatenation semantics.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => fmt_java_double(f, *v as f64),
            Value::Double(v) => fmt_java_double(f, *v),
            Value::Str(v) => f.write_str(v),
            Value::Null => f.write_str("null"),
            Value::NotNull => f.write_str("<not-null>"),
        }
    }
}
