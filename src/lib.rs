//! jconst - constant expression evaluation for Java source analysis
//!
//! A typed, cached, partial interpreter for Java expression trees: walk an
//! expression bottom-up and compute its compile-time value, either under
//! strict JLS constant-folding rules or under a relaxed "enhanced" analysis
//! that also tracks null/non-null facts and resolves effectively-final
//! initializers. Analysis passes ("hints") use it as a best-effort oracle:
//! every input the evaluator cannot fold is simply "not a constant", never an
//! error.
//!
//! ## Architecture
//!
//! - **ast**: arena-backed expression/statement tree with parent links;
//!   node identity doubles as the cache key
//! - **types**: the trimmed semantic type vocabulary (primitives, references,
//!   arrays) the evaluator decides promotions and casts with
//! - **sym**: pass-local symbol identities and declaration facts
//! - **provider**: the [`Semantics`] trait, the seam to whoever owns name
//!   resolution, expression typing and flow analysis
//! - **eval**: the evaluator, its value domain, conversion matrices and the
//!   per-pass memoization cache
//!
//! ## Evaluation flow
//!
//! ```text
//! Expression node -> branch-point cache check -> bottom-up fold -> Value
//!                          |                          |
//!                     EvalCache  <-  symbol resolution (cycle-guarded)
//! ```
//!
//! ```
//! use jconst::{Ast, BinaryOp, EvalCache, Evaluator, Semantics, Value};
//! # struct NoSemantics;
//! # impl Semantics for NoSemantics {
//! #     fn type_of(&self, _: &jconst::Ast, _: jconst::NodeId) -> jconst::Type {
//! #         jconst::Type::Error
//! #     }
//! #     fn symbol_of(&self, _: &jconst::Ast, _: jconst::NodeId) -> Option<jconst::SymbolId> {
//! #         None
//! #     }
//! #     fn symbol_info(&self, _: jconst::SymbolId) -> Option<&jconst::SymbolInfo> {
//! #         None
//! #     }
//! # }
//! let mut ast = Ast::new();
//! let one = ast.int_lit(1);
//! let two = ast.int_lit(2);
//! let sum = ast.binary(BinaryOp::Add, one, two);
//!
//! let semantics = NoSemantics;
//! let evaluator = Evaluator::new(&ast, &semantics);
//! let mut cache = EvalCache::new();
//! assert_eq!(evaluator.evaluate(&mut cache, sum, true), Some(Value::Int(3)));
//! ```

pub mod ast;
pub mod consts;
pub mod eval;
pub mod provider;
pub mod sym;
pub mod types;

pub use ast::{Ast, BinaryOp, ExprPrinter, Literal, Location, NodeId, NodeKind, Span, UnaryOp};
pub use eval::{
    implicit_conversion, is_never_null, is_null, is_real_value, EvalCache, Evaluator, Value,
};
pub use provider::Semantics;
pub use sym::{SymbolId, SymbolInfo, SymbolKind};
pub use types::{PrimitiveType, Type};
