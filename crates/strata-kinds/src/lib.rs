//! Node kinds and per-language kind tables.
//!
//! Every node in a strata tree carries a [`SyntaxKind`]. Languages describe how each kind is
//! recognized with a [`KindSpec`] and collect them into a [`KindTable`], which fixes the order
//! the scanner tries candidates in.

mod registry;
mod syntax_kind;
mod syntax_set;

pub use registry::{
    KindSpec, KindTable, MatchContext, MatchFn, Pattern, Shape, compose, is_identifier_char,
};
pub use syntax_kind::SyntaxKind;
pub use syntax_set::SyntaxSet;
