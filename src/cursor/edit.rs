//! Insertion and deletion at the cursor

use crate::catalog::Catalog;
use crate::cursor::{Cursor, Direction, Position};
use crate::tree::{CompositeKind, Document, Leaf, NodeId, NodeKind};
use crate::types::TreeError;

impl Cursor {
    /// Inserts the detached `node` at the cursor and moves past it.
    ///
    /// An active selection is deleted first, or collapsed to its right edge
    /// when [`Cursor::replace_selection`] is off. Inserting a leaf inside an
    /// auto-exit text style moves the cursor out past the style.
    pub fn insert(&mut self, doc: &mut Document, node: NodeId) -> Result<(), TreeError> {
        self.ensure_attached(doc)?;
        if self.replace_selection {
            self.delete_selection(doc)?;
        } else {
            self.collapse_selection(doc, Direction::Right);
        }
        self.place(doc, node)?;

        let is_leaf = doc.node(node).is_some_and(|node| node.is_leaf());
        if let Some(owner) = doc.owner(self.position.block)
            && is_leaf
            && matches!(
                doc.composite(owner).map(|composite| &composite.kind),
                Some(CompositeKind::TextStyle(style)) if style.is_auto_exit()
            )
            && let Some(after) = Position::after(doc, owner)
        {
            self.position = after;
        }
        Ok(())
    }

    /// Inserts the detached `node` at the cursor and moves past it, with no
    /// selection handling and no auto-exit.
    pub fn place(&mut self, doc: &mut Document, node: NodeId) -> Result<(), TreeError> {
        self.ensure_attached(doc)?;
        doc.insert_child(self.position.block, node, self.position.right)?;
        self.position.left = Some(node);
        self.anchor = None;
        Ok(())
    }

    /// Deletes the selected nodes and leaves the cursor where they were.
    /// Returns whether anything was selected.
    pub fn delete_selection(&mut self, doc: &mut Document) -> Result<bool, TreeError> {
        let nodes = self.selected_nodes(doc);
        self.anchor = None;
        let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) else {
            return Ok(false);
        };
        self.ensure_attached(doc)?;
        let block = self.position.block;
        let left = doc.left_of(first);
        let right = doc.right_of(last);
        for node in nodes {
            doc.delete(node)?;
        }
        self.position = Position { block, left, right };
        Ok(true)
    }

    /// Detaches the selected nodes, keeping them alive in the arena, and
    /// returns them in order.
    pub fn take_selection(&mut self, doc: &mut Document) -> Result<Vec<NodeId>, TreeError> {
        let nodes = self.selected_nodes(doc);
        self.anchor = None;
        let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) else {
            return Ok(nodes);
        };
        self.ensure_attached(doc)?;
        let block = self.position.block;
        let left = doc.left_of(first);
        let right = doc.right_of(last);
        for &node in &nodes {
            doc.remove(node)?;
        }
        self.position = Position { block, left, right };
        Ok(nodes)
    }

    /// Deletes backwards.
    ///
    /// - an active selection is deleted;
    /// - a symbol with a degradation target is replaced by that target;
    /// - any other left neighbour is deleted;
    /// - at the start of a block, the owning composite is deleted when all
    ///   its blocks are empty, and otherwise the cursor moves out before it.
    ///
    /// Returns whether anything changed, the cursor included.
    pub fn backspace(&mut self, doc: &mut Document, catalog: &Catalog) -> Result<bool, TreeError> {
        self.ensure_attached(doc)?;
        if self.delete_selection(doc)? {
            return Ok(true);
        }

        if let Some(left) = self.position.left {
            let degraded = match doc.node(left).map(|node| node.kind()) {
                Some(NodeKind::Leaf(Leaf::Symbol(symbol))) => catalog.degraded(symbol),
                _ => None,
            };
            if let Some(degraded) = degraded {
                let replacement = doc.create_leaf(Leaf::Symbol(degraded));
                doc.replace(left, replacement)?;
                self.position.left = Some(replacement);
                return Ok(true);
            }
            let new_left = doc.left_of(left);
            doc.delete(left)?;
            self.position.left = new_left;
            return Ok(true);
        }

        self.escape_owner(doc, false)
    }

    /// Deletes forwards: the mirror of [`Cursor::backspace`], without
    /// degradation.
    pub fn delete_forward(&mut self, doc: &mut Document) -> Result<bool, TreeError> {
        self.ensure_attached(doc)?;
        if self.delete_selection(doc)? {
            return Ok(true);
        }

        if let Some(right) = self.position.right {
            let new_right = doc.right_of(right);
            doc.delete(right)?;
            self.position.right = new_right;
            return Ok(true);
        }

        self.escape_owner(doc, true)
    }

    /// Handles deletion at a block edge: deletes the owner when every one
    /// of its blocks is empty, otherwise steps out of it on the side the
    /// deletion was heading.
    fn escape_owner(&mut self, doc: &mut Document, forward: bool) -> Result<bool, TreeError> {
        let Some(owner) = doc.owner(self.position.block) else {
            return Ok(false);
        };
        let all_empty = doc
            .node(owner)
            .is_some_and(|node| node.blocks().iter().all(|&block| doc.is_block_empty(block)));

        if all_empty {
            let block = doc.parent(owner).ok_or(TreeError::NotAttached(owner))?;
            let left = doc.left_of(owner);
            let right = doc.right_of(owner);
            doc.delete(owner)?;
            self.position = Position { block, left, right };
            return Ok(true);
        }

        let outside = if forward {
            Position::after(doc, owner)
        } else {
            Position::before(doc, owner)
        };
        let outside = outside.ok_or(TreeError::NotAttached(owner))?;
        self.position = outside;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Catalog, TextStyle};
    use crate::cursor::tests::letter;
    use crate::cursor::{Cursor, Direction, Position};
    use crate::tree::{BlockId, CompositeKind, Document, Leaf, NodeKind};
    use crate::types::TreeError;

    fn keys(doc: &Document, block: BlockId) -> String {
        doc.children(block)
            .map(|id| match doc.node(id).map(|node| node.kind()) {
                Some(NodeKind::Leaf(Leaf::Symbol(symbol))) => symbol.key.clone(),
                _ => "#".to_owned(),
            })
            .collect()
    }

    #[test]
    fn test_insert_advances() {
        let mut doc = Document::new();
        let mut cursor = Cursor::new(&doc);
        for ch in ['a', 'b'] {
            let leaf = letter(&mut doc, ch);
            cursor.insert(&mut doc, leaf).unwrap();
        }
        cursor.move_to_start(&doc);
        let c = letter(&mut doc, 'c');
        cursor.insert(&mut doc, c).unwrap();
        assert_eq!(keys(&doc, doc.root()), "cab");
        assert_eq!(cursor.left(), Some(c));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut doc = Document::new();
        let mut cursor = Cursor::new(&doc);
        for ch in ['a', 'b'] {
            let leaf = letter(&mut doc, ch);
            cursor.insert(&mut doc, leaf).unwrap();
        }
        cursor.select(&doc, Direction::Left);
        let c = letter(&mut doc, 'c');
        cursor.insert(&mut doc, c).unwrap();
        assert_eq!(keys(&doc, doc.root()), "ac");

        cursor.replace_selection = false;
        cursor.select(&doc, Direction::Left);
        let d = letter(&mut doc, 'd');
        cursor.insert(&mut doc, d).unwrap();
        assert_eq!(keys(&doc, doc.root()), "acd");
    }

    #[test]
    fn test_auto_exit_style() {
        let mut doc = Document::new();
        let mut cursor = Cursor::new(&doc);
        let span = doc.create_composite(CompositeKind::TextStyle(TextStyle::Blackboard));
        cursor.insert(&mut doc, span).unwrap();
        let inner = doc.node(span).unwrap().blocks()[0];
        cursor.restore_position(Position::start(&doc, inner));
        let r = letter(&mut doc, 'R');
        cursor.insert(&mut doc, r).unwrap();
        assert_eq!(cursor.position(), Position::end(&doc, doc.root()));
    }

    #[test]
    fn test_backspace_degrades_once() {
        let catalog = Catalog::shared();
        let mut doc = Document::new();
        let mut cursor = Cursor::new(&doc);
        let leq = doc.create_leaf(Leaf::Symbol(catalog.make_symbol("\\leq")));
        cursor.insert(&mut doc, leq).unwrap();
        assert!(cursor.backspace(&mut doc, catalog).unwrap());
        assert_eq!(keys(&doc, doc.root()), "<");
        assert!(cursor.backspace(&mut doc, catalog).unwrap());
        assert!(doc.is_empty());
        assert!(!cursor.backspace(&mut doc, catalog).unwrap());
    }

    #[test]
    fn test_backspace_protects_non_empty_composite() {
        let catalog = Catalog::shared();
        let mut doc = Document::new();
        let mut cursor = Cursor::new(&doc);
        let frac = doc.create_composite(CompositeKind::Fraction);
        cursor.insert(&mut doc, frac).unwrap();
        let blocks = doc.node(frac).unwrap().blocks().to_vec();
        let x = letter(&mut doc, 'x');
        doc.insert_child(blocks[1], x, None).unwrap();

        cursor.restore_position(Position::start(&doc, blocks[0]));
        cursor.backspace(&mut doc, catalog).unwrap();
        assert!(doc.node(frac).is_some());
        assert_eq!(cursor.position(), Position::before(&doc, frac).unwrap());

        doc.delete(x).unwrap();
        cursor.restore_position(Position::start(&doc, blocks[1]));
        cursor.backspace(&mut doc, catalog).unwrap();
        assert!(doc.node(frac).is_none());
        assert!(doc.is_empty());
        assert_eq!(cursor.position(), Position::start(&doc, doc.root()));
    }

    #[test]
    fn test_delete_forward_mirrors_backspace() {
        let mut doc = Document::new();
        let mut cursor = Cursor::new(&doc);
        let sqrt = doc.create_composite(CompositeKind::Sqrt);
        cursor.insert(&mut doc, sqrt).unwrap();
        let radicand = doc.node(sqrt).unwrap().blocks()[0];
        let y = letter(&mut doc, 'y');
        doc.insert_child(radicand, y, None).unwrap();

        cursor.restore_position(Position::end(&doc, radicand));
        cursor.delete_forward(&mut doc).unwrap();
        assert_eq!(cursor.position(), Position::after(&doc, sqrt).unwrap());

        cursor.move_to_start(&doc);
        cursor.delete_forward(&mut doc).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_detached_cursor_fails_fast() {
        let mut doc = Document::new();
        let frac = doc.create_composite(CompositeKind::Fraction);
        let numerator = doc.node(frac).unwrap().blocks()[0];
        let mut cursor = Cursor::at(Position::start(&doc, numerator));
        let x = letter(&mut doc, 'x');
        assert_eq!(
            cursor.insert(&mut doc, x),
            Err(TreeError::CursorDetached(numerator))
        );
    }
}
