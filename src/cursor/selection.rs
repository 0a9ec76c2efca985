//! Selection between anchor and cursor

use crate::cursor::{Cursor, Direction, Position, Selection};
use crate::tree::{Document, NodeId};

impl Cursor {
    /// The active selection, if anchor and cursor enclose at least one node.
    #[must_use]
    pub fn selection(&self, doc: &Document) -> Option<Selection> {
        let anchor = self.anchor?;
        if anchor.block != self.position.block {
            return None;
        }
        let (from, to) = (anchor.index(doc), self.position.index(doc));
        if from == to {
            return None;
        }
        let (start, end, direction) = if from < to {
            (from, to, Direction::Right)
        } else {
            (to, from, Direction::Left)
        };
        Some(Selection {
            block: anchor.block,
            first: doc.nth_child(anchor.block, start)?,
            last: doc.nth_child(anchor.block, end - 1)?,
            direction,
        })
    }

    /// Whether any node is selected.
    #[must_use]
    pub fn has_selection(&self, doc: &Document) -> bool {
        self.selection(doc).is_some()
    }

    /// The selected nodes, left to right.
    #[must_use]
    pub fn selected_nodes(&self, doc: &Document) -> Vec<NodeId> {
        let Some(selection) = self.selection(doc) else {
            return Vec::new();
        };
        let mut nodes = vec![selection.first];
        let mut current = selection.first;
        while current != selection.last {
            let Some(next) = doc.right_of(current) else {
                break;
            };
            nodes.push(next);
            current = next;
        }
        nodes
    }

    /// Extends the selection by one sibling in `direction`, starting one at
    /// the cursor if none is active. Stepping back over the anchor shrinks
    /// the selection until it collapses. At a block edge the selection
    /// climbs: it is re-anchored around the owning composite in the parent
    /// block.
    pub fn select(&mut self, doc: &Document, direction: Direction) -> bool {
        if !doc.is_attached(self.position.block) {
            return false;
        }
        let anchor = self.anchor.unwrap_or(self.position);
        let neighbour = match direction {
            Direction::Left => self.position.left,
            Direction::Right => self.position.right,
        };

        let (anchor, position) = if let Some(node) = neighbour {
            let position = match direction {
                Direction::Left => Position::before(doc, node),
                Direction::Right => Position::after(doc, node),
            };
            let Some(position) = position else {
                return false;
            };
            (anchor, position)
        } else {
            let Some(owner) = doc.owner(self.position.block) else {
                return false;
            };
            let (Some(before), Some(after)) =
                (Position::before(doc, owner), Position::after(doc, owner))
            else {
                return false;
            };
            match direction {
                Direction::Left => (after, before),
                Direction::Right => (before, after),
            }
        };

        self.position = position;
        self.anchor = (anchor.index(doc) != position.index(doc)).then_some(anchor);
        true
    }

    /// Selects every sibling of the cursor's block.
    pub fn select_all(&mut self, doc: &Document) {
        let block = self.position.block;
        if doc.is_block_empty(block) {
            self.anchor = None;
            return;
        }
        self.anchor = Some(Position::start(doc, block));
        self.position = Position::end(doc, block);
    }

    /// Drops the selection, leaving the cursor and the tree as they are.
    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Collapses an active selection to its edge on the `direction` side.
    /// Returns whether there was one to collapse.
    pub(crate) fn collapse_selection(&mut self, doc: &Document, direction: Direction) -> bool {
        let selection = self.selection(doc);
        self.anchor = None;
        let Some(selection) = selection else {
            return false;
        };
        let edge = match direction {
            Direction::Left => Position::before(doc, selection.first),
            Direction::Right => Position::after(doc, selection.last),
        };
        if let Some(edge) = edge {
            self.position = edge;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::tests::letter;
    use crate::cursor::{Cursor, Direction, Position};
    use crate::tree::{CompositeKind, Document};
    use crate::types::Settings;

    fn abc() -> Document {
        let mut doc = Document::new();
        for ch in ['a', 'b', 'c'] {
            let leaf = letter(&mut doc, ch);
            doc.insert_child(doc.root(), leaf, None).unwrap();
        }
        doc
    }

    #[test]
    fn test_select_extends_and_shrinks() {
        let doc = abc();
        let mut cursor = Cursor::at(Position::at_index(&doc, doc.root(), 1));
        assert!(cursor.select(&doc, Direction::Right));
        assert!(cursor.select(&doc, Direction::Right));
        assert_eq!(cursor.selected_nodes(&doc).len(), 2);
        assert_eq!(cursor.selection(&doc).unwrap().direction, Direction::Right);

        cursor.select(&doc, Direction::Left);
        assert_eq!(cursor.selected_nodes(&doc).len(), 1);
        cursor.select(&doc, Direction::Left);
        assert!(!cursor.has_selection(&doc));
        assert!(cursor.anchor().is_none());

        cursor.select(&doc, Direction::Left);
        let selection = cursor.selection(&doc).unwrap();
        assert_eq!(selection.direction, Direction::Left);
        assert_eq!(selection.first, selection.last);
    }

    #[test]
    fn test_select_climbs_out_of_blocks() {
        let mut doc = abc();
        let frac = doc.create_composite(CompositeKind::Fraction);
        doc.insert_child(doc.root(), frac, None).unwrap();
        let numerator = doc.node(frac).unwrap().blocks()[0];
        let x = letter(&mut doc, 'x');
        doc.insert_child(numerator, x, None).unwrap();

        let mut cursor = Cursor::at(Position::end(&doc, numerator));
        assert!(cursor.select(&doc, Direction::Right));
        assert_eq!(cursor.selected_nodes(&doc), vec![frac]);
        assert_eq!(cursor.block(), doc.root());
        assert!(!cursor.select(&doc, Direction::Right));
        assert!(cursor.select(&doc, Direction::Left));
        assert!(!cursor.has_selection(&doc));
    }

    #[test]
    fn test_select_all_and_clear() {
        let doc = abc();
        let mut cursor = Cursor::new(&doc);
        cursor.select_all(&doc);
        assert_eq!(cursor.selected_nodes(&doc).len(), 3);
        cursor.clear_selection();
        assert!(!cursor.has_selection(&doc));
        assert_eq!(cursor.position(), Position::end(&doc, doc.root()));
    }

    #[test]
    fn test_moving_collapses_selection() {
        let doc = abc();
        let settings = Settings::default();
        let mut cursor = Cursor::new(&doc);
        cursor.select_all(&doc);
        assert!(cursor.move_left(&doc, &settings));
        assert_eq!(cursor.position(), Position::start(&doc, doc.root()));
        assert!(!cursor.has_selection(&doc));
    }
}
