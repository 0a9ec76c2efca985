//! Cursor and selection
//!
//! A [`Cursor`] sits between two siblings of one block. Its [`Position`]
//! records the block and both neighbours; either neighbour is `None` at a
//! block edge. An optional anchor, always in the same block, marks the other
//! end of a selection: the selected nodes are exactly the siblings between
//! anchor and cursor.
//!
//! Navigation is total: at a structural boundary a move is a no-op and
//! reports `false`. Mutations return [`TreeError`] when the cursor's block is
//! no longer reachable from the root, which correct callers never observe.

mod edit;
mod movement;
mod selection;

use crate::tree::{BlockId, Document, NodeId};
use crate::types::TreeError;

/// Horizontal direction of a selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Towards the start of the block.
    Left,
    /// Towards the end of the block.
    Right,
}

/// A place between two siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Block the position is in.
    pub block: BlockId,
    /// Sibling immediately to the left.
    pub left: Option<NodeId>,
    /// Sibling immediately to the right.
    pub right: Option<NodeId>,
}

impl Position {
    /// Start of `block`.
    #[must_use]
    pub fn start(doc: &Document, block: BlockId) -> Self {
        Self {
            block,
            left: None,
            right: doc.first_child(block),
        }
    }

    /// End of `block`.
    #[must_use]
    pub fn end(doc: &Document, block: BlockId) -> Self {
        Self {
            block,
            left: doc.last_child(block),
            right: None,
        }
    }

    /// Just after `node`, or `None` when it is detached.
    #[must_use]
    pub fn after(doc: &Document, node: NodeId) -> Option<Self> {
        Some(Self {
            block: doc.parent(node)?,
            left: Some(node),
            right: doc.right_of(node),
        })
    }

    /// Just before `node`, or `None` when it is detached.
    #[must_use]
    pub fn before(doc: &Document, node: NodeId) -> Option<Self> {
        Some(Self {
            block: doc.parent(node)?,
            left: doc.left_of(node),
            right: Some(node),
        })
    }

    /// The gap after the first `index` children of `block`, clamped to the
    /// end.
    #[must_use]
    pub fn at_index(doc: &Document, block: BlockId, index: usize) -> Self {
        let left = index
            .checked_sub(1)
            .and_then(|last| doc.nth_child(block, last).or_else(|| doc.last_child(block)));
        Self {
            block,
            left,
            right: left.map_or_else(|| doc.first_child(block), |left| doc.right_of(left)),
        }
    }

    /// Number of siblings to the left.
    #[must_use]
    pub fn index(&self, doc: &Document) -> usize {
        self.left.map_or(0, |left| doc.index_in_block(left) + 1)
    }

    /// Whether both neighbours are still adjacent children of the block.
    #[must_use]
    pub fn is_valid(&self, doc: &Document) -> bool {
        if doc.block(self.block).is_none() {
            return false;
        }
        match self.left {
            Some(left) => doc.parent(left) == Some(self.block) && doc.right_of(left) == self.right,
            None => doc.first_child(self.block) == self.right,
        }
    }
}

/// A contiguous run of siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Block holding the run.
    pub block: BlockId,
    /// Leftmost selected node.
    pub first: NodeId,
    /// Rightmost selected node.
    pub last: NodeId,
    /// Side the cursor is on; the anchor is on the other.
    pub direction: Direction,
}

/// Cursor with an optional selection anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    anchor: Option<Position>,
    /// Whether inserting over a selection deletes it first; otherwise the
    /// selection collapses to its right edge.
    pub replace_selection: bool,
}

impl Cursor {
    /// A cursor at the start of `doc`'s root block.
    #[must_use]
    pub fn new(doc: &Document) -> Self {
        Self::at(Position::start(doc, doc.root()))
    }

    /// A cursor at `position`, without selection.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self {
            position,
            anchor: None,
            replace_selection: true,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Moves to a previously captured position and drops the selection.
    pub const fn restore_position(&mut self, position: Position) {
        self.position = position;
        self.anchor = None;
    }

    /// Block the cursor is in.
    #[must_use]
    pub const fn block(&self) -> BlockId {
        self.position.block
    }

    /// Sibling to the left.
    #[must_use]
    pub const fn left(&self) -> Option<NodeId> {
        self.position.left
    }

    /// Sibling to the right.
    #[must_use]
    pub const fn right(&self) -> Option<NodeId> {
        self.position.right
    }

    /// The other end of the selection, if one is being made.
    #[must_use]
    pub const fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    fn ensure_attached(&self, doc: &Document) -> Result<(), TreeError> {
        if doc.is_attached(self.position.block) {
            Ok(())
        } else {
            Err(TreeError::CursorDetached(self.position.block))
        }
    }

    /// Re-derives the neighbours after the tree was edited behind the
    /// cursor's back. Falls back to the end of the root block when the
    /// cursor's block is gone.
    pub fn repair(&mut self, doc: &Document) {
        if self.position.is_valid(doc) && doc.is_attached(self.position.block) {
            if self.anchor.is_some_and(|anchor| !anchor.is_valid(doc)) {
                self.anchor = None;
            }
            return;
        }
        self.anchor = None;
        let block = self.position.block;
        self.position = match self.position.left {
            Some(left) if doc.parent(left) == Some(block) && doc.is_attached(block) => {
                Position::after(doc, left).unwrap_or_else(|| Position::end(doc, block))
            }
            _ if doc.is_attached(block) => Position::start(doc, block),
            _ => Position::end(doc, doc.root()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SymbolClass;
    use crate::tree::{Leaf, Symbol};

    pub(super) fn letter(doc: &mut Document, ch: char) -> NodeId {
        doc.create_leaf(Leaf::Symbol(Symbol::literal(ch, SymbolClass::Variable)))
    }

    #[test]
    fn test_positions() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = letter(&mut doc, 'a');
        let b = letter(&mut doc, 'b');
        doc.insert_child(root, a, None).unwrap();
        doc.insert_child(root, b, None).unwrap();

        let middle = Position::after(&doc, a).unwrap();
        assert_eq!(middle, Position::before(&doc, b).unwrap());
        assert_eq!(middle, Position::at_index(&doc, root, 1));
        assert_eq!(middle.index(&doc), 1);
        assert_eq!(Position::at_index(&doc, root, 9), Position::end(&doc, root));
        assert!(middle.is_valid(&doc));

        doc.delete(b).unwrap();
        assert!(!middle.is_valid(&doc));
    }

    #[test]
    fn test_repair_after_external_edit() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = letter(&mut doc, 'a');
        let b = letter(&mut doc, 'b');
        doc.insert_child(root, a, None).unwrap();
        doc.insert_child(root, b, None).unwrap();
        let mut cursor = Cursor::at(Position::after(&doc, a).unwrap());
        doc.delete(b).unwrap();
        cursor.repair(&doc);
        assert_eq!(cursor.position(), Position::end(&doc, root));
    }
}
