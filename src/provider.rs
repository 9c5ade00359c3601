//! Consumed semantic collaborator
//!
//! The evaluator owns the tree but not the semantics: expression types,
//! reference resolution, class-hierarchy assignability and flow facts come
//! from whoever drives the analysis. [`Semantics`] is that seam. All methods
//! are synchronous, side-effect-free, and report failure through
//! `Option`/[`Type::Error`] markers rather than panicking, so broken or
//! half-resolved source degrades to "not a constant".

use crate::ast::{Ast, NodeId};
use crate::consts::JAVA_LANG_OBJECT;
use crate::sym::{SymbolId, SymbolInfo};
use crate::types::Type;

pub trait Semantics {
    /// Static type of an expression node. [`Type::Error`] when the tree does
    /// not resolve.
    fn type_of(&self, ast: &Ast, node: NodeId) -> Type;

    /// Resolve an identifier or field-access node to the symbol it names.
    fn symbol_of(&self, ast: &Ast, node: NodeId) -> Option<SymbolId>;

    /// Declaration facts for a resolved symbol.
    fn symbol_info(&self, symbol: SymbolId) -> Option<&SymbolInfo>;

    /// Reference assignability, `from` into `to`. The default only knows the
    /// reflexive case and widening to `java.lang.Object`; implementors with a
    /// class hierarchy should override.
    fn is_assignable(&self, from: &Type, to: &Type) -> bool {
        from == to || matches!(to, Type::Reference(name) if name == JAVA_LANG_OBJECT)
    }

    /// Whether exactly one definition of this symbol reaches every use,
    /// i.e. "effectively final" for the enhanced resolution rules. Flow
    /// analysis lives outside this crate; the default falls back to the
    /// declared `final` flag.
    fn has_single_reaching_definition(&self, symbol: SymbolId) -> bool {
        self.symbol_info(symbol).is_some_and(|info| info.is_final())
    }

    /// Source level ordinal (8 for Java 8, and so on). The evaluator itself
    /// does not branch on this; it is exposed for the analysis passes built
    /// on top.
    fn language_level(&self) -> u32 {
        8
    }
}
