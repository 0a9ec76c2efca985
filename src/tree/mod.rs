//! Arena-backed formula tree
//!
//! A [`Document`] owns every [`Node`] and [`Block`] of one formula. Links
//! between them (a node's parent block, its left and right siblings, a
//! block's two ends and its owner) are identifiers into the arena rather
//! than pointers, and only the splice operations in this module write them.
//! That keeps the invariants local:
//!
//! - a block's `first` is `None` exactly when its `last` is;
//! - adjacent siblings point at each other;
//! - every child's `parent` is the block it sits in, never the block's owner.
//!
//! Removing a node repairs its neighbours and its block's ends before it
//! returns, so no live node is ever left with a dangling link.

mod matrix;
mod node;
mod traverse;

pub use node::{
    Block, BlockId, Composite, CompositeKind, Leaf, Node, NodeId, NodeKind, ScriptOrder, Symbol,
};
pub use traverse::{Children, Preorder};

use crate::types::{KeyMap, TreeError};

/// One formula: an arena of nodes and blocks plus the root block.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: KeyMap<NodeId, Node>,
    blocks: KeyMap<BlockId, Block>,
    root: BlockId,
    next_node: u32,
    next_block: u32,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding an empty root block.
    #[must_use]
    pub fn new() -> Self {
        let root = BlockId(0);
        let mut blocks = KeyMap::default();
        blocks.insert(
            root,
            Block {
                id: root,
                owner: None,
                slot: 0,
                first: None,
                last: None,
            },
        );
        Self {
            nodes: KeyMap::default(),
            blocks,
            root,
            next_node: 0,
            next_block: 1,
        }
    }

    /// The top-level block.
    #[must_use]
    pub const fn root(&self) -> BlockId {
        self.root
    }

    /// Looks a node up by identifier.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks a block up by identifier.
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Number of live nodes, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root block is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_block_empty(self.root)
    }

    /// Whether `block` has no children. Unknown blocks count as empty.
    #[must_use]
    pub fn is_block_empty(&self, block: BlockId) -> bool {
        self.block(block).is_none_or(Block::is_empty)
    }

    /// The composite owning `block`.
    #[must_use]
    pub fn owner(&self, block: BlockId) -> Option<NodeId> {
        self.block(block).and_then(Block::owner)
    }

    /// The block a node sits in.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<BlockId> {
        self.node(node).and_then(Node::parent)
    }

    /// Left sibling.
    #[must_use]
    pub fn left_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(Node::left)
    }

    /// Right sibling.
    #[must_use]
    pub fn right_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(Node::right)
    }

    /// First child of a block.
    #[must_use]
    pub fn first_child(&self, block: BlockId) -> Option<NodeId> {
        self.block(block).and_then(Block::first)
    }

    /// Last child of a block.
    #[must_use]
    pub fn last_child(&self, block: BlockId) -> Option<NodeId> {
        self.block(block).and_then(Block::last)
    }

    /// The composite payload of a node.
    #[must_use]
    pub fn composite(&self, node: NodeId) -> Option<&Composite> {
        self.node(node).and_then(Node::composite)
    }

    /// Allocates a detached leaf.
    pub fn create_leaf(&mut self, leaf: Leaf) -> NodeId {
        self.alloc_node(NodeKind::Leaf(leaf))
    }

    /// Allocates a detached composite together with its empty blocks.
    pub fn create_composite(&mut self, kind: CompositeKind) -> NodeId {
        let id = self.next_node_id();
        let blocks = (0..kind.block_count())
            .map(|slot| self.alloc_block(Some(id), slot))
            .collect();
        self.nodes.insert(
            id,
            Node {
                id,
                parent: None,
                left: None,
                right: None,
                kind: NodeKind::Composite(Composite { kind, blocks }),
            },
        );
        id
    }

    fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn alloc_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.next_node_id();
        self.nodes.insert(
            id,
            Node {
                id,
                parent: None,
                left: None,
                right: None,
                kind,
            },
        );
        id
    }

    pub(crate) fn alloc_block(&mut self, owner: Option<NodeId>, slot: usize) -> BlockId {
        let id = BlockId(self.next_block);
        self.next_block += 1;
        self.blocks.insert(
            id,
            Block {
                id,
                owner,
                slot,
                first: None,
                last: None,
            },
        );
        id
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::StaleNode(id))
    }

    pub(crate) fn block_mut(&mut self, id: BlockId) -> Result<&mut Block, TreeError> {
        self.blocks.get_mut(&id).ok_or(TreeError::StaleBlock(id))
    }

    /// Splices a detached `node` into `block` immediately before `before`,
    /// or at the end when `before` is `None`.
    ///
    /// # Errors
    ///
    /// Fails when either id is stale, the node is already attached, `before`
    /// is not a child of `block`, or `block` lies inside `node`.
    pub fn insert_child(
        &mut self,
        block: BlockId,
        node: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), TreeError> {
        let target = self.block(block).ok_or(TreeError::StaleBlock(block))?;
        let block_last = target.last;
        let inserted = self.node(node).ok_or(TreeError::StaleNode(node))?;
        if inserted.parent.is_some() {
            return Err(TreeError::AlreadyAttached(node));
        }
        let left = match before {
            Some(sibling) => {
                let sibling_node = self.node(sibling).ok_or(TreeError::StaleNode(sibling))?;
                if sibling_node.parent != Some(block) {
                    return Err(TreeError::NotAChild {
                        node: sibling,
                        block,
                    });
                }
                sibling_node.left
            }
            None => block_last,
        };
        if self.block_is_within(block, node) {
            return Err(TreeError::CycleDetected { node, block });
        }

        {
            let inserted = self.node_mut(node)?;
            inserted.parent = Some(block);
            inserted.left = left;
            inserted.right = before;
        }
        match left {
            Some(left) => self.node_mut(left)?.right = Some(node),
            None => self.block_mut(block)?.first = Some(node),
        }
        match before {
            Some(right) => self.node_mut(right)?.left = Some(node),
            None => self.block_mut(block)?.last = Some(node),
        }
        Ok(())
    }

    /// Unlinks `node` from its block, reconnecting its former siblings. The
    /// node stays in the arena, detached, and can be inserted again.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotAttached`] if the node has no parent.
    pub fn remove(&mut self, node: NodeId) -> Result<(), TreeError> {
        let removed = self.node(node).ok_or(TreeError::StaleNode(node))?;
        let block = removed.parent.ok_or(TreeError::NotAttached(node))?;
        let (left, right) = (removed.left, removed.right);

        match left {
            Some(left) => self.node_mut(left)?.right = right,
            None => self.block_mut(block)?.first = right,
        }
        match right {
            Some(right) => self.node_mut(right)?.left = left,
            None => self.block_mut(block)?.last = left,
        }
        let removed = self.node_mut(node)?;
        removed.parent = None;
        removed.left = None;
        removed.right = None;
        Ok(())
    }

    /// Removes `node` if attached and frees it together with everything it
    /// owns.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if the node does not exist.
    pub fn delete(&mut self, node: NodeId) -> Result<(), TreeError> {
        if self.node(node).ok_or(TreeError::StaleNode(node))?.parent.is_some() {
            self.remove(node)?;
        }
        let doomed: Vec<NodeId> = self.preorder(node).collect();
        for id in doomed {
            if let Some(removed) = self.nodes.remove(&id) {
                for block in removed.blocks() {
                    self.blocks.remove(block);
                }
            }
        }
        Ok(())
    }

    /// Puts the detached `replacement` where `old` is and deletes `old`.
    ///
    /// # Errors
    ///
    /// Fails when `old` is not attached or `replacement` is.
    pub fn replace(&mut self, old: NodeId, replacement: NodeId) -> Result<(), TreeError> {
        let block = self.parent(old).ok_or(TreeError::NotAttached(old))?;
        self.insert_child(block, replacement, Some(old))?;
        self.delete(old)
    }

    /// Deletes every child of `block`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleBlock`] if the block does not exist.
    pub fn clear_block(&mut self, block: BlockId) -> Result<(), TreeError> {
        while let Some(first) = self.block(block).ok_or(TreeError::StaleBlock(block))?.first {
            self.delete(first)?;
        }
        Ok(())
    }

    /// Whether `block` is reachable from the root block.
    #[must_use]
    pub fn is_attached(&self, block: BlockId) -> bool {
        let mut current = block;
        loop {
            if current == self.root {
                return true;
            }
            let Some(owner) = self.owner(current) else {
                return false;
            };
            let Some(parent) = self.parent(owner) else {
                return false;
            };
            current = parent;
        }
    }

    /// Whether `block` is one of `node`'s blocks or nested inside one.
    fn block_is_within(&self, block: BlockId, node: NodeId) -> bool {
        let mut current = block;
        while let Some(owner) = self.owner(current) {
            if owner == node {
                return true;
            }
            match self.parent(owner) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Collects every reachable link inconsistency, for tests and debug
    /// assertions.
    #[must_use]
    pub fn check_links(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for block in self.blocks.values() {
            if block.first.is_none() != block.last.is_none() {
                problems.push(format!("{} has one open end", block.id));
            }
            let mut previous: Option<NodeId> = None;
            let mut cursor = block.first;
            while let Some(id) = cursor {
                let Some(node) = self.node(id) else {
                    problems.push(format!("{} links to missing {id}", block.id));
                    break;
                };
                if node.parent != Some(block.id) {
                    problems.push(format!("{id} in {} has parent {:?}", block.id, node.parent));
                }
                if node.left != previous {
                    problems.push(format!("{id} left link is {:?}, expected {previous:?}", node.left));
                }
                previous = Some(id);
                cursor = node.right;
            }
            if previous != block.last {
                problems.push(format!("{} last is {:?}, walk ended at {previous:?}", block.id, block.last));
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LargeOp, SymbolClass};

    fn letter(doc: &mut Document, ch: char) -> NodeId {
        doc.create_leaf(Leaf::Symbol(Symbol::literal(ch, SymbolClass::Variable)))
    }

    fn keys(doc: &Document, block: BlockId) -> String {
        doc.children(block)
            .filter_map(|id| doc.node(id).and_then(Node::symbol))
            .map(|symbol| symbol.key.as_str())
            .collect()
    }

    #[test]
    fn test_insert_child_links_siblings() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = letter(&mut doc, 'a');
        let c = letter(&mut doc, 'c');
        let b = letter(&mut doc, 'b');
        doc.insert_child(root, a, None).unwrap();
        doc.insert_child(root, c, None).unwrap();
        doc.insert_child(root, b, Some(c)).unwrap();

        assert_eq!(keys(&doc, root), "abc");
        assert_eq!(doc.first_child(root), Some(a));
        assert_eq!(doc.last_child(root), Some(c));
        assert_eq!(doc.right_of(a), Some(b));
        assert_eq!(doc.left_of(c), Some(b));
        assert!(doc.check_links().is_empty());
    }

    #[test]
    fn test_remove_repairs_links() {
        let mut doc = Document::new();
        let root = doc.root();
        let ids: Vec<NodeId> = "abc".chars().map(|ch| letter(&mut doc, ch)).collect();
        for &id in &ids {
            doc.insert_child(root, id, None).unwrap();
        }

        doc.remove(ids[1]).unwrap();
        assert_eq!(keys(&doc, root), "ac");
        assert_eq!(doc.right_of(ids[0]), Some(ids[2]));
        assert_eq!(doc.parent(ids[1]), None);

        doc.remove(ids[0]).unwrap();
        doc.remove(ids[2]).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.last_child(root), None);
        assert!(doc.check_links().is_empty());
    }

    #[test]
    fn test_remove_detached_fails() {
        let mut doc = Document::new();
        let a = letter(&mut doc, 'a');
        assert_eq!(doc.remove(a), Err(TreeError::NotAttached(a)));
    }

    #[test]
    fn test_insert_rejects_foreign_sibling_and_cycles() {
        let mut doc = Document::new();
        let root = doc.root();
        let frac = doc.create_composite(CompositeKind::Fraction);
        doc.insert_child(root, frac, None).unwrap();
        let numerator = doc.composite(frac).unwrap().blocks()[0];

        let a = letter(&mut doc, 'a');
        assert_eq!(
            doc.insert_child(numerator, a, Some(frac)),
            Err(TreeError::NotAChild {
                node: frac,
                block: numerator
            })
        );
        assert_eq!(
            doc.insert_child(root, frac, None),
            Err(TreeError::AlreadyAttached(frac))
        );

        doc.remove(frac).unwrap();
        assert_eq!(
            doc.insert_child(numerator, frac, None),
            Err(TreeError::CycleDetected {
                node: frac,
                block: numerator
            })
        );
    }

    #[test]
    fn test_delete_frees_subtree() {
        let mut doc = Document::new();
        let root = doc.root();
        let sum = doc.create_composite(CompositeKind::LargeOperator {
            op: LargeOp::Sum,
            upper: true,
            order: ScriptOrder::SubFirst,
        });
        doc.insert_child(root, sum, None).unwrap();
        let lower = doc.composite(sum).unwrap().lower().unwrap();
        let i = letter(&mut doc, 'i');
        doc.insert_child(lower, i, None).unwrap();

        doc.delete(sum).unwrap();
        assert!(doc.node(sum).is_none());
        assert!(doc.node(i).is_none());
        assert!(doc.block(lower).is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut doc = Document::new();
        let a = letter(&mut doc, 'a');
        doc.delete(a).unwrap();
        let b = letter(&mut doc, 'b');
        assert_ne!(a, b);
    }

    #[test]
    fn test_attachment() {
        let mut doc = Document::new();
        let frac = doc.create_composite(CompositeKind::Fraction);
        let numerator = doc.composite(frac).unwrap().blocks()[0];
        assert!(!doc.is_attached(numerator));
        doc.insert_child(doc.root(), frac, None).unwrap();
        assert!(doc.is_attached(numerator));
    }
}
