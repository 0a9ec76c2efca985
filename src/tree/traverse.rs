//! Read-only traversal over a [`Document`]
//!
//! "Children" of a composite are the first-level contents of its blocks, in
//! block order; the blocks themselves are not nodes and are never yielded.
//! Every walk tolerates empty blocks.

use crate::tree::{BlockId, Document, Node, NodeId};

/// Double-ended iterator over the children of one block.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    doc: &'a Document,
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.doc.right_of(current);
        }
        Some(current)
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<NodeId> {
        let current = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.doc.left_of(current);
        }
        Some(current)
    }
}

/// Pre-order iterator over a node and everything below it.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        if let Some(node) = self.doc.node(current) {
            for &block in node.blocks().iter().rev() {
                self.stack.extend(self.doc.children(block).rev());
            }
        }
        Some(current)
    }
}

impl Document {
    /// Children of `block`, left to right; `.rev()` walks right to left.
    #[must_use]
    pub fn children(&self, block: BlockId) -> Children<'_> {
        let (front, back) = self
            .block(block)
            .map_or((None, None), |block| (block.first, block.last));
        Children {
            doc: self,
            front,
            back,
        }
    }

    /// First-level contents of every block of `node`, in reading order.
    pub fn child_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(node)
            .map(Node::blocks)
            .unwrap_or_default()
            .iter()
            .flat_map(move |&block| self.children(block))
    }

    /// `node` followed by all of its descendants, parents before children.
    #[must_use]
    pub fn preorder(&self, node: NodeId) -> Preorder<'_> {
        let stack = if self.node(node).is_some() {
            vec![node]
        } else {
            Vec::new()
        };
        Preorder { doc: self, stack }
    }

    /// All descendants of `node` followed by `node`, children before parents.
    #[must_use]
    pub fn postorder(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(node, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                out.push(current);
                continue;
            }
            let Some(found) = self.node(current) else {
                continue;
            };
            stack.push((current, true));
            for &block in found.blocks().iter().rev() {
                stack.extend(self.children(block).rev().map(|child| (child, false)));
            }
        }
        out
    }

    /// Every node strictly below `node`, in pre-order.
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.preorder(node).skip(1).collect()
    }

    /// First leaf in reading order within `node`'s subtree, `node` itself if
    /// it is a leaf. `None` when every block below is empty.
    #[must_use]
    pub fn leftmost_leaf(&self, node: NodeId) -> Option<NodeId> {
        self.preorder(node)
            .find(|&id| self.node(id).is_some_and(Node::is_leaf))
    }

    /// Last leaf in reading order within `node`'s subtree.
    #[must_use]
    pub fn rightmost_leaf(&self, node: NodeId) -> Option<NodeId> {
        self.postorder(node)
            .into_iter()
            .rev()
            .find(|&id| self.node(id).is_some_and(Node::is_leaf))
    }

    /// The composite whose block `node` sits in.
    #[must_use]
    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).and_then(|block| self.owner(block))
    }

    /// Number of composites above `node`; 0 for nodes in the root block.
    #[must_use]
    pub fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.parent_node(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Outermost ancestor of `node`, `node` itself at the top level.
    #[must_use]
    pub fn root_node(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.parent_node(current) {
            current = parent;
        }
        current
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while let Some(parent) = self.parent_node(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Zero-based position of `node` among its siblings.
    #[must_use]
    pub fn index_in_block(&self, node: NodeId) -> usize {
        let mut index = 0;
        let mut current = self.left_of(node);
        while let Some(left) = current {
            index += 1;
            current = self.left_of(left);
        }
        index
    }

    /// Number of children of `block`.
    #[must_use]
    pub fn block_len(&self, block: BlockId) -> usize {
        self.children(block).count()
    }

    /// The `index`-th child of `block`.
    #[must_use]
    pub fn nth_child(&self, block: BlockId, index: usize) -> Option<NodeId> {
        self.children(block).nth(index)
    }
}
