use strata_kinds::SyntaxKind;

use crate::NodeId;

/// Misuse of the mutation API. The tree is left unchanged when one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MutationError {
    #[error("{0:?} is no longer part of the tree")]
    Stale(NodeId),
    #[error("`{0}` nodes are atomic and cannot have children")]
    Atomic(SyntaxKind),
    #[error("`{0}` nodes are containers and cannot hold text")]
    NotAtomic(SyntaxKind),
    #[error("{0:?} already has a parent")]
    Attached(NodeId),
    #[error("{0:?} has no parent")]
    Detached(NodeId),
    #[error("index {index} is out of bounds for {len} children")]
    OutOfBounds { index: usize, len: usize },
    #[error("inserting {0:?} would make it its own ancestor")]
    Cycle(NodeId),
    #[error("the root node cannot be moved, replaced or removed")]
    Root,
}
