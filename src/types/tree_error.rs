use thiserror::Error;

use crate::tree::{BlockId, NodeId};

/// Structural-integrity violation detected by the tree or the cursor.
///
/// These indicate a bug in the caller or in the engine, never bad user
/// input: every public editing operation keeps the tree consistent, so a
/// correct caller cannot observe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The node has no parent block.
    #[error("node {0} is not attached to a block")]
    NotAttached(NodeId),
    /// The node is already attached and cannot be inserted again.
    #[error("node {0} is already attached to a block")]
    AlreadyAttached(NodeId),
    /// The node id does not refer to a live node of this document.
    #[error("node {0} does not exist in this document")]
    StaleNode(NodeId),
    /// The block id does not refer to a live block of this document.
    #[error("block {0} does not exist in this document")]
    StaleBlock(BlockId),
    /// A sibling reference points outside the block it was used with.
    #[error("node {node} is not a child of block {block}")]
    NotAChild {
        /// The offending sibling
        node: NodeId,
        /// The block it was expected in
        block: BlockId,
    },
    /// The cursor's block is not reachable from the document root.
    #[error("cursor block {0} is detached from the document")]
    CursorDetached(BlockId),
    /// Inserting the node into the block would make it its own ancestor.
    #[error("inserting node {node} into block {block} would create a cycle")]
    CycleDetected {
        /// The node being inserted
        node: NodeId,
        /// The destination block
        block: BlockId,
    },
}
