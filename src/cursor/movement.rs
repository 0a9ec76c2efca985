//! Directional movement
//!
//! Left and Right walk reading order: they cross leaves, enter composites
//! and leave blocks through their owner. Blocks that sit side by side (an
//! nth root's index and radicand, the cells of a matrix) are visited one
//! after another; blocks stacked vertically are left as a whole, and the
//! one entered first is chosen by [`EnterDirection`].
//!
//! Up and Down jump between stacked blocks and matrix rows, keeping the
//! horizontal index where they can.

use crate::cursor::{Cursor, Direction, Position};
use crate::tree::{BlockId, Composite, CompositeKind, Document, NodeId};
use crate::types::{EnterDirection, Settings};

/// Block entered when the cursor crosses into `composite` moving in
/// `direction`.
fn entry_block(composite: &Composite, direction: Direction, settings: &Settings) -> Option<BlockId> {
    if composite.kind.is_vertical() {
        return match settings.enter_direction {
            EnterDirection::Up => composite.upper(),
            EnterDirection::Down => composite.lower(),
        };
    }
    match direction {
        Direction::Right => composite.blocks().first().copied(),
        Direction::Left => composite.blocks().last().copied(),
    }
}

/// The block beside `block` within its owner, in reading order.
fn sibling_block(doc: &Document, block: BlockId, direction: Direction) -> Option<BlockId> {
    let owner = doc.owner(block)?;
    let composite = doc.composite(owner)?;
    if composite.kind.is_vertical() {
        return None;
    }
    let slot = doc.block(block)?.slot();
    let target = match direction {
        Direction::Right => slot.checked_add(1)?,
        Direction::Left => slot.checked_sub(1)?,
    };
    composite.blocks().get(target).copied()
}

/// The block reached from `block` moving up (`up == true`) or down, within
/// its own owner.
fn mirror_block(doc: &Document, block: BlockId, up: bool) -> Option<BlockId> {
    let owner = doc.owner(block)?;
    let composite = doc.composite(owner)?;
    if matches!(composite.kind, CompositeKind::Matrix { .. }) {
        return if up {
            doc.cell_up(block)
        } else {
            doc.cell_down(block)
        };
    }
    if !composite.kind.is_vertical() {
        return None;
    }
    let (from, to) = if up {
        (composite.lower(), composite.upper())
    } else {
        (composite.upper(), composite.lower())
    };
    (from == Some(block)).then_some(to).flatten()
}

impl Cursor {
    /// Moves one step left. With a selection, collapses it to its left edge
    /// instead.
    pub fn move_left(&mut self, doc: &Document, settings: &Settings) -> bool {
        self.step(doc, settings, Direction::Left)
    }

    /// Moves one step right. With a selection, collapses it to its right edge
    /// instead.
    pub fn move_right(&mut self, doc: &Document, settings: &Settings) -> bool {
        self.step(doc, settings, Direction::Right)
    }

    fn step(&mut self, doc: &Document, settings: &Settings, direction: Direction) -> bool {
        if !doc.is_attached(self.position.block) {
            return false;
        }
        if self.collapse_selection(doc, direction) {
            return true;
        }
        let neighbour = match direction {
            Direction::Left => self.position.left,
            Direction::Right => self.position.right,
        };
        let next = match neighbour {
            Some(node) => Self::cross(doc, settings, node, direction),
            None => Self::leave_block(doc, self.position.block, direction),
        };
        match next {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }

    /// Position after crossing or entering `node`.
    fn cross(
        doc: &Document,
        settings: &Settings,
        node: NodeId,
        direction: Direction,
    ) -> Option<Position> {
        if let Some(block) = doc
            .composite(node)
            .and_then(|composite| entry_block(composite, direction, settings))
        {
            return Some(match direction {
                Direction::Right => Position::start(doc, block),
                Direction::Left => Position::end(doc, block),
            });
        }
        match direction {
            Direction::Right => Position::after(doc, node),
            Direction::Left => Position::before(doc, node),
        }
    }

    /// Position after walking off the `direction` edge of `block`.
    fn leave_block(doc: &Document, block: BlockId, direction: Direction) -> Option<Position> {
        if let Some(next) = sibling_block(doc, block, direction) {
            return Some(match direction {
                Direction::Right => Position::start(doc, next),
                Direction::Left => Position::end(doc, next),
            });
        }
        let owner = doc.owner(block)?;
        match direction {
            Direction::Right => Position::after(doc, owner),
            Direction::Left => Position::before(doc, owner),
        }
    }

    /// Moves to the block above, keeping the horizontal index.
    pub fn move_up(&mut self, doc: &Document) -> bool {
        self.vertical(doc, true)
    }

    /// Moves to the block below, keeping the horizontal index.
    pub fn move_down(&mut self, doc: &Document) -> bool {
        self.vertical(doc, false)
    }

    /// Searches the cursor's block and then its ancestors for one with a
    /// mirror in the requested direction. Landing from an ancestor puts the
    /// cursor at the end of the target, since the index no longer relates.
    fn vertical(&mut self, doc: &Document, up: bool) -> bool {
        if !doc.is_attached(self.position.block) {
            return false;
        }
        let index = self.position.index(doc);
        let mut block = self.position.block;
        let mut climbed = false;
        loop {
            if let Some(target) = mirror_block(doc, block, up) {
                self.anchor = None;
                self.position = if climbed {
                    Position::end(doc, target)
                } else {
                    Position::at_index(doc, target, index)
                };
                return true;
            }
            let Some(parent) = doc.owner(block).and_then(|owner| doc.parent(owner)) else {
                return false;
            };
            block = parent;
            climbed = true;
        }
    }

    /// Moves to the start of the root block.
    pub fn move_to_start(&mut self, doc: &Document) {
        self.anchor = None;
        self.position = Position::start(doc, doc.root());
    }

    /// Moves to the end of the root block.
    pub fn move_to_end(&mut self, doc: &Document) {
        self.anchor = None;
        self.position = Position::end(doc, doc.root());
    }

    /// Moves to the start of the current block.
    pub fn move_to_block_start(&mut self, doc: &Document) {
        self.anchor = None;
        self.position = Position::start(doc, self.position.block);
    }

    /// Moves to the end of the current block.
    pub fn move_to_block_end(&mut self, doc: &Document) {
        self.anchor = None;
        self.position = Position::end(doc, self.position.block);
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{LargeOp, MatrixEnv};
    use crate::cursor::tests::letter;
    use crate::cursor::{Cursor, Position};
    use crate::tree::{BlockId, CompositeKind, Document, NodeId, ScriptOrder};
    use crate::types::{EnterDirection, Settings};

    /// `a` followed by a composite of `kind`, every block holding one letter.
    fn doc_with(kind: CompositeKind) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let a = letter(&mut doc, 'a');
        doc.insert_child(root, a, None).unwrap();
        let composite = doc.create_composite(kind);
        doc.insert_child(root, composite, None).unwrap();
        let blocks = doc.node(composite).unwrap().blocks().to_vec();
        for (index, block) in blocks.into_iter().enumerate() {
            let ch = char::from(b'p' + index as u8);
            let leaf = letter(&mut doc, ch);
            doc.insert_child(block, leaf, None).unwrap();
        }
        (doc, composite)
    }

    fn block_of(doc: &Document, composite: NodeId, slot: usize) -> BlockId {
        doc.node(composite).unwrap().blocks()[slot]
    }

    #[test]
    fn test_right_enters_numerator_first() {
        let (doc, frac) = doc_with(CompositeKind::Fraction);
        let settings = Settings::default();
        let mut cursor = Cursor::new(&doc);
        assert!(cursor.move_right(&doc, &settings));
        assert!(cursor.move_right(&doc, &settings));
        assert_eq!(cursor.position(), Position::start(&doc, block_of(&doc, frac, 0)));

        let down = Settings::builder().enter_direction(EnterDirection::Down).build();
        let mut cursor = Cursor::new(&doc);
        cursor.move_right(&doc, &down);
        cursor.move_right(&doc, &down);
        assert_eq!(cursor.block(), block_of(&doc, frac, 1));
    }

    #[test]
    fn test_vertical_blocks_are_left_as_a_whole() {
        let (doc, frac) = doc_with(CompositeKind::Fraction);
        let settings = Settings::default();
        let mut cursor = Cursor::at(Position::end(&doc, block_of(&doc, frac, 0)));
        assert!(cursor.move_right(&doc, &settings));
        assert_eq!(cursor.position(), Position::end(&doc, doc.root()));
        assert!(!cursor.move_right(&doc, &settings));
    }

    #[test]
    fn test_nth_root_visits_index_then_radicand() {
        let (doc, root) = doc_with(CompositeKind::NthRoot);
        let settings = Settings::default();
        let mut cursor = Cursor::at(Position::after(&doc, doc.first_child(doc.root()).unwrap()).unwrap());
        cursor.move_right(&doc, &settings);
        assert_eq!(cursor.block(), block_of(&doc, root, 0));
        cursor.move_right(&doc, &settings);
        cursor.move_right(&doc, &settings);
        assert_eq!(cursor.position(), Position::start(&doc, block_of(&doc, root, 1)));

        let mut cursor = Cursor::at(Position::end(&doc, doc.root()));
        cursor.move_left(&doc, &settings);
        assert_eq!(cursor.position(), Position::end(&doc, block_of(&doc, root, 1)));
    }

    #[test]
    fn test_matrix_cells_in_reading_order() {
        let (doc, matrix) = doc_with(CompositeKind::Matrix {
            env: MatrixEnv::Paren,
            rows: 2,
            cols: 2,
        });
        let settings = Settings::default();
        let mut cursor = Cursor::at(Position::end(&doc, block_of(&doc, matrix, 1)));
        cursor.move_right(&doc, &settings);
        assert_eq!(cursor.position(), Position::start(&doc, block_of(&doc, matrix, 2)));
        assert!(cursor.move_up(&doc));
        assert_eq!(cursor.block(), block_of(&doc, matrix, 0));
        assert!(!cursor.move_up(&doc));
        assert!(cursor.move_down(&doc));
        assert!(!cursor.move_down(&doc));
    }

    #[test]
    fn test_large_operator_limits_mirror() {
        let (doc, op) = doc_with(CompositeKind::LargeOperator {
            op: LargeOp::Sum,
            upper: true,
            order: ScriptOrder::SubFirst,
        });
        let composite = doc.composite(op).unwrap();
        let (upper, lower) = (composite.upper().unwrap(), composite.lower().unwrap());
        let mut cursor = Cursor::at(Position::end(&doc, upper));
        assert!(cursor.move_down(&doc));
        assert_eq!(cursor.position(), Position::end(&doc, lower));
        assert!(cursor.move_up(&doc));
        assert_eq!(cursor.position(), Position::end(&doc, upper));
    }

    #[test]
    fn test_up_climbs_to_ancestor() {
        let mut doc = Document::new();
        let frac = doc.create_composite(CompositeKind::Fraction);
        doc.insert_child(doc.root(), frac, None).unwrap();
        let denominator = block_of(&doc, frac, 1);
        let sqrt = doc.create_composite(CompositeKind::Sqrt);
        doc.insert_child(denominator, sqrt, None).unwrap();
        let x = letter(&mut doc, 'x');
        doc.insert_child(block_of(&doc, frac, 0), x, None).unwrap();

        let mut cursor = Cursor::at(Position::start(&doc, block_of(&doc, sqrt, 0)));
        assert!(cursor.move_up(&doc));
        assert_eq!(cursor.position(), Position::end(&doc, block_of(&doc, frac, 0)));

        let mut top = Cursor::new(&doc);
        assert!(!top.move_up(&doc));
    }

    #[test]
    fn test_block_ends() {
        let (doc, frac) = doc_with(CompositeKind::Fraction);
        let mut cursor = Cursor::at(Position::start(&doc, block_of(&doc, frac, 1)));
        cursor.move_to_block_end(&doc);
        assert_eq!(cursor.position(), Position::end(&doc, block_of(&doc, frac, 1)));
        cursor.move_to_start(&doc);
        assert_eq!(cursor.position(), Position::start(&doc, doc.root()));
        cursor.move_to_end(&doc);
        assert_eq!(cursor.position(), Position::end(&doc, doc.root()));
    }
}
