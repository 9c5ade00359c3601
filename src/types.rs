//! Semantic type descriptors
//!
//! A trimmed-down type vocabulary: just enough for the evaluator to decide
//! promotions, conversions and reference-cast legality. Full generic types,
//! wildcards and intersections are the semantic collaborator's business and
//! never reach this crate.

use crate::consts::{JAVA_LANG_STRING, WRAPPER_CLASSES};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;

/// Primitive type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Char => "char",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "char" => PrimitiveType::Char,
            _ => return None,
        })
    }

    /// byte, short, int, long and char.
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte
                | PrimitiveType::Short
                | PrimitiveType::Int
                | PrimitiveType::Long
                | PrimitiveType::Char
        )
    }

    pub fn is_numeric(self) -> bool {
        self != PrimitiveType::Boolean
    }

    /// Fully-qualified name of the wrapper class that boxes this primitive.
    pub fn wrapper_class(self) -> &'static str {
        WRAPPER_CLASSES
            .iter()
            .find(|(_, prim)| *prim == self.name())
            .map(|(class, _)| *class)
            .expect("every primitive has a wrapper entry")
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static type of an expression as reported by the semantic collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(PrimitiveType),
    /// Declared type, fully qualified (`java.lang.String`). Simple names are
    /// accepted for the well-known wrapper/String classes.
    Reference(String),
    Array(Box<Type>),
    /// The type of the `null` literal.
    Null,
    /// Unresolved or broken source; never folds.
    Error,
}

impl Type {
    pub fn reference(name: impl Into<String>) -> Self {
        Type::Reference(name.into())
    }

    pub fn string() -> Self {
        Type::Reference(JAVA_LANG_STRING.to_string())
    }

    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Type::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Reference types in the JLS sense: declared types, arrays and the
    /// null type.
    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Reference(_) | Type::Array(_) | Type::Null)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::Reference(name) if is_string_name(name))
    }

    /// The primitive boxed by this type, if it is a wrapper class.
    pub fn unboxed(&self) -> Option<PrimitiveType> {
        match self {
            Type::Reference(name) => wrapper_primitives().get(name.as_str()).copied(),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => p.fmt(f),
            Type::Reference(name) => f.write_str(name),
            Type::Array(elem) => write!(f, "{}[]", elem),
            Type::Null => f.write_str("null"),
            Type::Error => f.write_str("<error>"),
        }
    }
}

pub(crate) fn is_string_name(name: &str) -> bool {
    name == JAVA_LANG_STRING || name == "String"
}

// Wrapper-class lookup, keyed by both qualified and simple names. Built once
// per process.
static WRAPPER_PRIMITIVES: OnceCell<HashMap<&'static str, PrimitiveType>> = OnceCell::new();

pub(crate) fn wrapper_primitives() -> &'static HashMap<&'static str, PrimitiveType> {
    WRAPPER_PRIMITIVES.get_or_init(|| {
        let mut map = HashMap::new();
        for (class, prim) in WRAPPER_CLASSES {
            let prim = PrimitiveType::from_name(prim).expect("wrapper table names a primitive");
            map.insert(*class, prim);
            let simple = class.rsplit('.').next().expect("qualified class name");
            map.insert(simple, prim);
        }
        map
    })
}
