//! Mutable concrete syntax tree.
//!
//! Nodes live in a generational arena owned by the [`Tree`] and are addressed by [`NodeId`].
//! Reads go through [`SyntaxNode`] handles; edits go through `&mut Tree` and bump per-node
//! revision counters so that cached external views can detect staleness.

mod arena;
mod cursor;
mod error;
mod mutation;
mod node;
mod tree;

pub use cursor::{Preorder, WalkEvent};
pub use error::MutationError;
pub use node::SyntaxNode;
pub use tree::{LineRange, NodeId, Tree};
