//! Matrix cell addressing and grid editing
//!
//! A matrix owns `rows * cols` blocks stored row-major, so a cell's slot is
//! `row * cols + col`. Lookups are total: out-of-range coordinates and
//! non-matrix nodes give `None`.

use crate::tree::{BlockId, CompositeKind, Document, NodeId, NodeKind};
use crate::types::TreeError;

impl Document {
    /// `(rows, cols)` of a matrix node.
    #[must_use]
    pub fn matrix_dims(&self, matrix: NodeId) -> Option<(usize, usize)> {
        match self.composite(matrix)?.kind {
            CompositeKind::Matrix { rows, cols, .. } => Some((rows, cols)),
            _ => None,
        }
    }

    /// The cell at `(row, col)`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, matrix: NodeId, row: usize, col: usize) -> Option<BlockId> {
        let (rows, cols) = self.matrix_dims(matrix)?;
        if row >= rows || col >= cols {
            return None;
        }
        self.composite(matrix)?.blocks().get(row * cols + col).copied()
    }

    /// The matrix a cell belongs to and the cell's coordinates.
    #[must_use]
    pub fn cell_position(&self, block: BlockId) -> Option<(NodeId, usize, usize)> {
        let cell = self.block(block)?;
        let matrix = cell.owner()?;
        let (_, cols) = self.matrix_dims(matrix)?;
        Some((matrix, cell.slot() / cols, cell.slot() % cols))
    }

    /// Cell to the right in the same row.
    #[must_use]
    pub fn cell_right(&self, block: BlockId) -> Option<BlockId> {
        let (matrix, row, col) = self.cell_position(block)?;
        self.cell(matrix, row, col + 1)
    }

    /// Cell to the left in the same row.
    #[must_use]
    pub fn cell_left(&self, block: BlockId) -> Option<BlockId> {
        let (matrix, row, col) = self.cell_position(block)?;
        self.cell(matrix, row, col.checked_sub(1)?)
    }

    /// Cell above in the same column.
    #[must_use]
    pub fn cell_up(&self, block: BlockId) -> Option<BlockId> {
        let (matrix, row, col) = self.cell_position(block)?;
        self.cell(matrix, row.checked_sub(1)?, col)
    }

    /// Cell below in the same column.
    #[must_use]
    pub fn cell_down(&self, block: BlockId) -> Option<BlockId> {
        let (matrix, row, col) = self.cell_position(block)?;
        self.cell(matrix, row + 1, col)
    }

    /// Next cell in row-major reading order, wrapping to the next row.
    #[must_use]
    pub fn next_cell(&self, block: BlockId) -> Option<BlockId> {
        let (matrix, ..) = self.cell_position(block)?;
        let slot = self.block(block)?.slot();
        self.composite(matrix)?.blocks().get(slot + 1).copied()
    }

    /// Previous cell in row-major reading order.
    #[must_use]
    pub fn previous_cell(&self, block: BlockId) -> Option<BlockId> {
        let (matrix, ..) = self.cell_position(block)?;
        let slot = self.block(block)?.slot().checked_sub(1)?;
        self.composite(matrix)?.blocks().get(slot).copied()
    }

    /// Inserts an empty row so that it becomes row `at` (clamped to the end).
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `matrix` is not a live matrix.
    pub fn insert_matrix_row(&mut self, matrix: NodeId, at: usize) -> Result<(), TreeError> {
        let (rows, cols) = self.matrix_dims(matrix).ok_or(TreeError::StaleNode(matrix))?;
        let at = at.min(rows);
        let fresh: Vec<BlockId> = (0..cols).map(|_| self.alloc_block(Some(matrix), 0)).collect();
        self.edit_grid(matrix, |blocks, rows, _| {
            blocks.splice(at * cols..at * cols, fresh);
            *rows += 1;
        })
    }

    /// Inserts an empty column so that it becomes column `at`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `matrix` is not a live matrix.
    pub fn insert_matrix_column(&mut self, matrix: NodeId, at: usize) -> Result<(), TreeError> {
        let (rows, cols) = self.matrix_dims(matrix).ok_or(TreeError::StaleNode(matrix))?;
        let at = at.min(cols);
        let fresh: Vec<BlockId> = (0..rows).map(|_| self.alloc_block(Some(matrix), 0)).collect();
        self.edit_grid(matrix, |blocks, _, cols| {
            for (row, block) in fresh.into_iter().enumerate().rev() {
                blocks.insert(row * *cols + at, block);
            }
            *cols += 1;
        })
    }

    /// Deletes row `row` and its contents. Returns `false`, leaving the
    /// matrix untouched, when `row` is out of range or the last row.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `matrix` is not a live matrix.
    pub fn delete_matrix_row(&mut self, matrix: NodeId, row: usize) -> Result<bool, TreeError> {
        let (rows, cols) = self.matrix_dims(matrix).ok_or(TreeError::StaleNode(matrix))?;
        if rows <= 1 || row >= rows {
            return Ok(false);
        }
        let mut doomed = Vec::new();
        self.edit_grid(matrix, |blocks, rows, _| {
            doomed.extend(blocks.drain(row * cols..(row + 1) * cols));
            *rows -= 1;
        })?;
        self.free_blocks(&doomed)?;
        Ok(true)
    }

    /// Deletes column `col` and its contents. Returns `false` when `col` is
    /// out of range or the last column.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `matrix` is not a live matrix.
    pub fn delete_matrix_column(&mut self, matrix: NodeId, col: usize) -> Result<bool, TreeError> {
        let (rows, cols) = self.matrix_dims(matrix).ok_or(TreeError::StaleNode(matrix))?;
        if cols <= 1 || col >= cols {
            return Ok(false);
        }
        let mut doomed = Vec::new();
        self.edit_grid(matrix, |blocks, _, cols| {
            for row in (0..rows).rev() {
                doomed.push(blocks.remove(row * *cols + col));
            }
            *cols -= 1;
        })?;
        self.free_blocks(&doomed)?;
        Ok(true)
    }

    /// Runs `edit` on a matrix's block list and dimensions, then renumbers
    /// the slots.
    fn edit_grid<F>(&mut self, matrix: NodeId, edit: F) -> Result<(), TreeError>
    where
        F: FnOnce(&mut Vec<BlockId>, &mut usize, &mut usize),
    {
        let node = self.node_mut(matrix)?;
        let NodeKind::Composite(composite) = &mut node.kind else {
            return Err(TreeError::StaleNode(matrix));
        };
        let CompositeKind::Matrix { rows, cols, .. } = &mut composite.kind else {
            return Err(TreeError::StaleNode(matrix));
        };
        edit(&mut composite.blocks, rows, cols);
        let blocks = composite.blocks.clone();
        for (slot, block) in blocks.into_iter().enumerate() {
            self.block_mut(block)?.slot = slot;
        }
        Ok(())
    }

    fn free_blocks(&mut self, blocks: &[BlockId]) -> Result<(), TreeError> {
        for &block in blocks {
            self.clear_block(block)?;
            self.blocks.remove(&block);
        }
        Ok(())
    }
}
