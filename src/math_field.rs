//! The per-document controller
//!
//! [`MathField`] owns one [`Document`], its [`Cursor`] and the [`Settings`]
//! they are edited with. It is the surface the rendering, keyboard and
//! clipboard layers talk to: every operation completes synchronously and
//! leaves the tree consistent.
//!
//! ```rust
//! use mathfield::MathField;
//!
//! let mut field = MathField::new();
//! field.set_latex(r"\frac{1}{x}").unwrap();
//! assert!(field.set_latex(r"\frac{1}").is_err());
//! assert_eq!(field.latex(), r"\frac{1}{x}");
//! ```

use thiserror::Error;
use tracing::{debug, error, trace, warn};

use crate::catalog::{
    Accent, BracketKind, Catalog, LargeOp, MatrixEnv, TextStyle, is_reserved_char,
};
use crate::cursor::{Cursor, Direction, Position};
use crate::materialize::materialize;
use crate::parser::parse_with;
use crate::serializer;
use crate::tree::{BlockId, CompositeKind, Document, Leaf, Node, NodeId, ScriptOrder, Symbol};
use crate::types::{ParseError, Settings, TreeError};

/// Errors surfaced by [`MathField`].
#[derive(Debug, Error)]
pub enum MathFieldError {
    /// The markup could not be parsed; the field is unchanged.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A structural-integrity violation.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The key names no symbol and cannot be written as a literal character.
    #[error("unknown symbol '{key}'")]
    UnknownSymbol {
        /// Rejected key
        key: String,
    },
    /// A matrix was requested with zero or too many rows or columns.
    #[error("invalid matrix size {rows}x{cols}: rows and columns must be between 1 and {max}")]
    InvalidMatrixSize {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Logs a structural error before handing it to the caller.
fn logged<T>(result: Result<T, TreeError>) -> Result<T, MathFieldError> {
    result.map_err(|err| {
        error!(%err, "structural integrity violation");
        MathFieldError::Tree(err)
    })
}

/// Tree and cursor captured by [`MathField::snapshot`].
#[derive(Debug, Clone)]
pub struct Snapshot {
    doc: Document,
    cursor: Cursor,
}

/// One editable formula.
#[derive(Debug, Clone)]
pub struct MathField {
    doc: Document,
    cursor: Cursor,
    settings: Settings,
    catalog: &'static Catalog,
}

impl Default for MathField {
    fn default() -> Self {
        Self::new()
    }
}

impl MathField {
    /// An empty field with default settings and the shared catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// An empty field with `settings`.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self::with_catalog(settings, Catalog::shared())
    }

    /// An empty field with `settings` and a custom catalog.
    #[must_use]
    pub fn with_catalog(settings: Settings, catalog: &'static Catalog) -> Self {
        let doc = Document::new();
        let mut cursor = Cursor::new(&doc);
        cursor.replace_selection = settings.replace_selection_on_insert;
        Self {
            doc,
            cursor,
            settings,
            catalog,
        }
    }

    /// The formula tree.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    /// The cursor.
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The settings the field was created with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The catalog commands are resolved against.
    #[must_use]
    pub const fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// The whole formula as markup.
    #[must_use]
    pub fn latex(&self) -> String {
        serializer::latex(&self.doc)
    }

    /// The whole formula as plain text.
    #[must_use]
    pub fn text(&self) -> String {
        serializer::text(&self.doc)
    }

    /// Replaces the whole formula with parsed `latex` and puts the cursor at
    /// the end. On failure the field is left exactly as it was.
    pub fn set_latex(&mut self, latex: &str) -> Result<(), MathFieldError> {
        let ast = match parse_with(latex, &self.settings, self.catalog) {
            Ok(ast) => ast,
            Err(err) => {
                warn!(%err, position = err.position, "rejected markup, keeping the current formula");
                return Err(err.into());
            }
        };
        let mut doc = Document::new();
        let mut cursor = Cursor::new(&doc);
        cursor.replace_selection = self.settings.replace_selection_on_insert;
        logged(materialize(&mut doc, &mut cursor, &ast, self.catalog))?;
        debug!(nodes = doc.len(), "replaced formula");
        self.doc = doc;
        self.cursor = cursor;
        Ok(())
    }

    /// Looks up an attached node by identifier.
    #[must_use]
    pub fn find_node_by_id(&self, id: NodeId) -> Option<&Node> {
        let node = self.doc.node(id)?;
        let block = node.parent()?;
        self.doc.is_attached(block).then_some(node)
    }

    /// Captures the tree and the cursor.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            doc: self.doc.clone(),
            cursor: self.cursor.clone(),
        }
    }

    /// Returns to a captured state.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.doc = snapshot.doc;
        self.cursor = snapshot.cursor;
    }

    // Navigation

    /// Moves one step left in reading order.
    pub fn move_left(&mut self) -> bool {
        self.cursor.move_left(&self.doc, &self.settings)
    }

    /// Moves one step right in reading order.
    pub fn move_right(&mut self) -> bool {
        self.cursor.move_right(&self.doc, &self.settings)
    }

    /// Moves to the block above.
    pub fn move_up(&mut self) -> bool {
        self.cursor.move_up(&self.doc)
    }

    /// Moves to the block below.
    pub fn move_down(&mut self) -> bool {
        self.cursor.move_down(&self.doc)
    }

    /// Moves to the start of the formula.
    pub fn move_to_start(&mut self) {
        self.cursor.move_to_start(&self.doc);
    }

    /// Moves to the end of the formula.
    pub fn move_to_end(&mut self) {
        self.cursor.move_to_end(&self.doc);
    }

    /// Moves to the start of the current block.
    pub fn move_to_block_start(&mut self) {
        self.cursor.move_to_block_start(&self.doc);
    }

    /// Moves to the end of the current block.
    pub fn move_to_block_end(&mut self) {
        self.cursor.move_to_block_end(&self.doc);
    }

    // Selection

    /// Extends the selection by one sibling.
    pub fn select(&mut self, direction: Direction) -> bool {
        self.cursor.select(&self.doc, direction)
    }

    /// Selects the whole current block.
    pub fn select_all(&mut self) {
        self.cursor.select_all(&self.doc);
    }

    /// Drops the selection.
    pub const fn clear_selection(&mut self) {
        self.cursor.clear_selection();
    }

    /// Whether anything is selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.cursor.has_selection(&self.doc)
    }

    /// The selection as markup; empty without a selection.
    #[must_use]
    pub fn selection_latex(&self) -> String {
        serializer::nodes_latex(&self.doc, &self.cursor.selected_nodes(&self.doc))
    }

    /// Deletes the selection. Returns whether there was one.
    pub fn delete_selection(&mut self) -> Result<bool, MathFieldError> {
        logged(self.cursor.delete_selection(&mut self.doc))
    }

    /// Deletes the selection and returns it as markup.
    pub fn cut(&mut self) -> Result<String, MathFieldError> {
        let latex = self.selection_latex();
        self.delete_selection()?;
        Ok(latex)
    }

    // Editing

    /// Inserts a leaf at the cursor.
    pub fn insert(&mut self, leaf: Leaf) -> Result<NodeId, MathFieldError> {
        let node = self.doc.create_leaf(leaf);
        logged(self.cursor.insert(&mut self.doc, node))?;
        trace!(node = %node, "inserted leaf");
        Ok(node)
    }

    /// Inserts the catalog symbol for `key`, a command or a character.
    ///
    /// A character with a markup meaning of its own, such as `{`, becomes its
    /// escaped symbol. Keys that name no symbol and are not a single plain
    /// character are rejected with [`MathFieldError::UnknownSymbol`].
    pub fn insert_symbol(&mut self, key: &str) -> Result<NodeId, MathFieldError> {
        let mut chars = key.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(ch), None) => self.catalog.symbol_for_char(ch),
            _ => self.catalog.make_symbol(key),
        };
        let mut chars = symbol.key.chars();
        let literal = matches!(
            (chars.next(), chars.next()),
            (Some(ch), None) if !is_reserved_char(ch)
        );
        if !literal && self.catalog.symbol(&symbol.key).is_none() {
            warn!(key, "no symbol for key");
            return Err(MathFieldError::UnknownSymbol {
                key: key.to_owned(),
            });
        }
        self.insert(Leaf::Symbol(symbol))
    }

    /// Deletes backwards.
    pub fn backspace(&mut self) -> Result<bool, MathFieldError> {
        logged(self.cursor.backspace(&mut self.doc, self.catalog))
    }

    /// Deletes forwards.
    pub fn delete_forward(&mut self) -> Result<bool, MathFieldError> {
        logged(self.cursor.delete_forward(&mut self.doc))
    }

    /// Parses `latex` and inserts it at the cursor. Text that does not parse
    /// is inserted as literal characters instead.
    pub fn paste(&mut self, text: &str) -> Result<(), MathFieldError> {
        match self.write(text) {
            Err(MathFieldError::Parse(err)) => {
                debug!(%err, "pasted text is not markup, inserting it literally");
                for ch in text.chars().filter(|ch| !ch.is_whitespace()) {
                    self.insert(Leaf::Symbol(self.catalog.symbol_for_char(ch)))?;
                }
                Ok(())
            }
            other => other,
        }
    }

    /// Parses `latex` and inserts it at the cursor, failing without any
    /// change when it does not parse.
    pub fn write(&mut self, latex: &str) -> Result<(), MathFieldError> {
        let ast = parse_with(latex, &self.settings, self.catalog)?;
        self.make_room()?;
        logged(materialize(&mut self.doc, &mut self.cursor, &ast, self.catalog))
    }

    /// Handles one typed character.
    ///
    /// In math mode `^`, `_` and `/` start a superscript, a subscript and a
    /// fraction, opening fences start brackets, and a closing fence typed at
    /// the end of matching brackets steps out of them. Spaces are ignored.
    /// Inside `\text{...}` every character, spaces included, is literal.
    pub fn type_char(&mut self, ch: char) -> Result<(), MathFieldError> {
        if self.in_text_mode() {
            let symbol = if ch == ' ' {
                Symbol::space()
            } else {
                self.catalog.symbol_for_char(ch)
            };
            return self.insert(Leaf::Symbol(symbol)).map(|_| ());
        }

        if ch.is_whitespace() {
            return Ok(());
        }
        if self.leave_brackets(ch) {
            return Ok(());
        }
        match ch {
            '^' => self.insert_superscript().map(|_| ()),
            '_' => self.insert_subscript().map(|_| ()),
            '/' => self.insert_fraction().map(|_| ()),
            _ => match BracketKind::from_opening_char(ch) {
                Some(kind) => self.insert_brackets(kind).map(|_| ()),
                None => self
                    .insert(Leaf::Symbol(self.catalog.symbol_for_char(ch)))
                    .map(|_| ()),
            },
        }
    }

    fn in_text_mode(&self) -> bool {
        let mut block = self.cursor.block();
        while let Some(owner) = self.doc.owner(block) {
            if let Some(CompositeKind::TextStyle(style)) =
                self.doc.composite(owner).map(|composite| &composite.kind)
            {
                return *style == TextStyle::Text;
            }
            let Some(parent) = self.doc.parent(owner) else {
                return false;
            };
            block = parent;
        }
        false
    }

    /// Steps out of the enclosing brackets when `ch` closes them and the
    /// cursor is at their end.
    fn leave_brackets(&mut self, ch: char) -> bool {
        if self.cursor.right().is_some() || self.has_selection() {
            return false;
        }
        let Some(owner) = self.doc.owner(self.cursor.block()) else {
            return false;
        };
        let closes = matches!(
            self.doc.composite(owner).map(|composite| &composite.kind),
            Some(CompositeKind::Brackets { close, .. }) if close.glyph().starts_with(ch)
        );
        let Some(after) = Position::after(&self.doc, owner).filter(|_| closes) else {
            return false;
        };
        self.cursor.restore_position(after);
        true
    }

    /// Deletes or collapses the selection before new content goes in.
    fn make_room(&mut self) -> Result<(), MathFieldError> {
        if self.cursor.replace_selection {
            self.delete_selection()?;
        } else {
            self.cursor.collapse_selection(&self.doc, Direction::Right);
        }
        Ok(())
    }

    // Structural inserts

    /// Inserts a composite of `kind` and moves the cursor into it.
    ///
    /// With [`Settings::wrap_selection`], an active selection moves into the
    /// new composite's primary block and the cursor goes to the block that
    /// is still to be filled: the denominator of a fraction, the index of a
    /// root, or the end of a single-block composite. Scripts, large
    /// operators and matrices never wrap; the selection collapses instead.
    ///
    /// Matrix dimensions must lie in `1..=`[`Settings::max_matrix_size`],
    /// otherwise [`MathFieldError::InvalidMatrixSize`] is returned and the
    /// field is unchanged.
    pub fn insert_composite(&mut self, kind: CompositeKind) -> Result<NodeId, MathFieldError> {
        if let CompositeKind::Matrix { rows, cols, .. } = kind {
            let max = self.settings.max_matrix_size;
            if !(1..=max).contains(&rows) || !(1..=max).contains(&cols) {
                return Err(MathFieldError::InvalidMatrixSize { rows, cols, max });
            }
        }
        let wraps = !matches!(
            kind,
            CompositeKind::Superscript
                | CompositeKind::Subscript
                | CompositeKind::SupSub(_)
                | CompositeKind::LargeOperator { .. }
                | CompositeKind::Matrix { .. }
        );
        let wrapped = if !wraps {
            self.cursor.collapse_selection(&self.doc, Direction::Right);
            Vec::new()
        } else if self.settings.wrap_selection {
            logged(self.cursor.take_selection(&mut self.doc))?
        } else {
            self.make_room()?;
            Vec::new()
        };

        let fill_second = matches!(kind, CompositeKind::Fraction | CompositeKind::Binomial);
        let fill_index = kind == CompositeKind::NthRoot;
        let is_large_op = matches!(kind, CompositeKind::LargeOperator { .. });

        let node = self.doc.create_composite(kind);
        logged(self.cursor.place(&mut self.doc, node))?;
        let composite = self
            .doc
            .composite(node)
            .ok_or(TreeError::StaleNode(node))?;
        let blocks = composite.blocks().to_vec();
        let (primary, lower) = (composite.primary(), composite.lower());

        if let Some(primary) = primary {
            for &child in &wrapped {
                logged(self.doc.insert_child(primary, child, None))?;
            }
        }

        let target = if is_large_op {
            lower
        } else if wrapped.is_empty() || fill_index {
            blocks.first().copied()
        } else if fill_second {
            blocks.get(1).copied()
        } else {
            primary
        };
        if let Some(target) = target {
            let position = if !wrapped.is_empty() && Some(target) == primary {
                Position::end(&self.doc, target)
            } else {
                Position::start(&self.doc, target)
            };
            self.cursor.restore_position(position);
        }
        trace!(node = %node, wrapped = wrapped.len(), "inserted composite");
        Ok(node)
    }

    /// Inserts a fraction.
    pub fn insert_fraction(&mut self) -> Result<NodeId, MathFieldError> {
        self.insert_composite(CompositeKind::Fraction)
    }

    /// Inserts a binomial coefficient.
    pub fn insert_binomial(&mut self) -> Result<NodeId, MathFieldError> {
        self.insert_composite(CompositeKind::Binomial)
    }

    /// Inserts a square root.
    pub fn insert_sqrt(&mut self) -> Result<NodeId, MathFieldError> {
        self.insert_composite(CompositeKind::Sqrt)
    }

    /// Inserts a root with an index.
    pub fn insert_nth_root(&mut self) -> Result<NodeId, MathFieldError> {
        self.insert_composite(CompositeKind::NthRoot)
    }

    /// Inserts a pair of brackets.
    pub fn insert_brackets(&mut self, kind: BracketKind) -> Result<NodeId, MathFieldError> {
        let (open, close) = kind.delimiters();
        self.insert_composite(CompositeKind::Brackets { open, close })
    }

    /// Inserts an accent.
    pub fn insert_accent(&mut self, accent: Accent) -> Result<NodeId, MathFieldError> {
        self.insert_composite(CompositeKind::Accent(accent))
    }

    /// Inserts a text-style span.
    pub fn insert_text_style(&mut self, style: TextStyle) -> Result<NodeId, MathFieldError> {
        self.insert_composite(CompositeKind::TextStyle(style))
    }

    /// Inserts a large operator and moves into its lower limit.
    pub fn insert_large_operator(&mut self, op: LargeOp) -> Result<NodeId, MathFieldError> {
        self.insert_composite(CompositeKind::LargeOperator {
            op,
            upper: op.has_upper_limit(),
            order: ScriptOrder::SubFirst,
        })
    }

    /// Inserts a matrix of `rows` by `cols` empty cells and moves into the
    /// first one.
    pub fn insert_matrix(
        &mut self,
        env: MatrixEnv,
        rows: usize,
        cols: usize,
    ) -> Result<NodeId, MathFieldError> {
        self.insert_composite(CompositeKind::Matrix { env, rows, cols })
    }

    /// Starts a superscript. See [`MathField::insert_script`].
    pub fn insert_superscript(&mut self) -> Result<NodeId, MathFieldError> {
        self.insert_script(true)
    }

    /// Starts a subscript. See [`MathField::insert_script`].
    pub fn insert_subscript(&mut self) -> Result<NodeId, MathFieldError> {
        self.insert_script(false)
    }

    /// Starts a superscript (`upper`) or a subscript after the cursor.
    ///
    /// Right after a large operator the cursor moves into the matching limit
    /// instead, and right after a lone script of the other kind the two are
    /// combined, keeping the written order.
    fn insert_script(&mut self, upper: bool) -> Result<NodeId, MathFieldError> {
        self.cursor.collapse_selection(&self.doc, Direction::Right);
        let Some(left) = self.cursor.left() else {
            return self.insert_script_node(upper);
        };
        let Some(composite) = self.doc.composite(left) else {
            return self.insert_script_node(upper);
        };

        match &composite.kind {
            CompositeKind::LargeOperator { .. } => {
                let limit = if upper {
                    composite.upper()
                } else {
                    composite.lower()
                };
                if let Some(limit) = limit {
                    let position = Position::end(&self.doc, limit);
                    self.cursor.restore_position(position);
                    return Ok(left);
                }
                self.insert_script_node(upper)
            }
            CompositeKind::Subscript if upper => self.combine_scripts(left, ScriptOrder::SubFirst),
            CompositeKind::Superscript if !upper => {
                self.combine_scripts(left, ScriptOrder::SupFirst)
            }
            _ => self.insert_script_node(upper),
        }
    }

    fn insert_script_node(&mut self, upper: bool) -> Result<NodeId, MathFieldError> {
        self.insert_composite(if upper {
            CompositeKind::Superscript
        } else {
            CompositeKind::Subscript
        })
    }

    /// Replaces the lone script `existing` with a combined one whose first
    /// block takes over its content, and moves into the second block.
    fn combine_scripts(
        &mut self,
        existing: NodeId,
        order: ScriptOrder,
    ) -> Result<NodeId, MathFieldError> {
        let old_block = first_block(&self.doc, existing)?;
        let combined = self.doc.create_composite(CompositeKind::SupSub(order));
        let new_blocks = self
            .doc
            .node(combined)
            .map(|node| node.blocks().to_vec())
            .unwrap_or_default();
        let (Some(&first), Some(&second)) = (new_blocks.first(), new_blocks.get(1)) else {
            return Err(TreeError::StaleNode(combined).into());
        };

        let children: Vec<NodeId> = self.doc.children(old_block).collect();
        for child in children {
            logged(self.doc.remove(child))?;
            logged(self.doc.insert_child(first, child, None))?;
        }
        logged(self.doc.replace(existing, combined))?;
        let position = Position::start(&self.doc, second);
        self.cursor.restore_position(position);
        trace!(node = %combined, "combined scripts");
        Ok(combined)
    }

    // Matrix editing

    /// The matrix around the cursor and the cursor's cell coordinates.
    fn current_cell(&self) -> Option<(NodeId, usize, usize)> {
        let mut block = self.cursor.block();
        loop {
            if let Some(cell) = self.doc.cell_position(block) {
                return Some(cell);
            }
            let owner = self.doc.owner(block)?;
            block = self.doc.parent(owner)?;
        }
    }

    fn enter_cell(&mut self, matrix: NodeId, row: usize, col: usize) {
        if let Some(cell) = self.doc.cell(matrix, row, col) {
            let position = Position::start(&self.doc, cell);
            self.cursor.restore_position(position);
        } else {
            self.cursor.repair(&self.doc);
        }
    }

    /// Inserts an empty row below the cursor's row and moves into it.
    /// Returns `false` outside a matrix or at the size limit.
    pub fn insert_matrix_row(&mut self) -> Result<bool, MathFieldError> {
        let Some((matrix, row, col)) = self.current_cell() else {
            return Ok(false);
        };
        let (rows, _) = self.doc.matrix_dims(matrix).unwrap_or_default();
        if rows >= self.settings.max_matrix_size {
            return Ok(false);
        }
        logged(self.doc.insert_matrix_row(matrix, row + 1))?;
        self.enter_cell(matrix, row + 1, col);
        Ok(true)
    }

    /// Inserts an empty column right of the cursor's column and moves into
    /// it. Returns `false` outside a matrix or at the size limit.
    pub fn insert_matrix_column(&mut self) -> Result<bool, MathFieldError> {
        let Some((matrix, row, col)) = self.current_cell() else {
            return Ok(false);
        };
        let (_, cols) = self.doc.matrix_dims(matrix).unwrap_or_default();
        if cols >= self.settings.max_matrix_size {
            return Ok(false);
        }
        logged(self.doc.insert_matrix_column(matrix, col + 1))?;
        self.enter_cell(matrix, row, col + 1);
        Ok(true)
    }

    /// Deletes the cursor's row. The last row is never deleted.
    pub fn delete_matrix_row(&mut self) -> Result<bool, MathFieldError> {
        let Some((matrix, row, col)) = self.current_cell() else {
            return Ok(false);
        };
        if !logged(self.doc.delete_matrix_row(matrix, row))? {
            return Ok(false);
        }
        self.enter_cell(matrix, row.saturating_sub(1), col);
        Ok(true)
    }

    /// Deletes the cursor's column. The last column is never deleted.
    pub fn delete_matrix_column(&mut self) -> Result<bool, MathFieldError> {
        let Some((matrix, row, col)) = self.current_cell() else {
            return Ok(false);
        };
        if !logged(self.doc.delete_matrix_column(matrix, col))? {
            return Ok(false);
        }
        self.enter_cell(matrix, row, col.saturating_sub(1));
        Ok(true)
    }
}

fn first_block(doc: &Document, node: NodeId) -> Result<BlockId, TreeError> {
    doc.node(node)
        .and_then(|node| node.blocks().first().copied())
        .ok_or(TreeError::StaleNode(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnterDirection;

    fn field(latex: &str) -> MathField {
        let mut field = MathField::new();
        field.set_latex(latex).unwrap();
        field
    }

    #[test]
    fn test_set_latex_keeps_state_on_failure() {
        let mut field = field("a+b");
        let before = field.snapshot();
        let err = field.set_latex(r"\frac{a}").unwrap_err();
        assert!(matches!(err, MathFieldError::Parse(_)));
        assert_eq!(field.latex(), "a+b");
        assert_eq!(field.cursor(), &before.cursor);
    }

    #[test]
    fn test_script_braces() {
        assert_eq!(field("x^{2}").latex(), "x^2");
        assert_eq!(field("x^{nm}").latex(), "x^{nm}");
    }

    #[test]
    fn test_degradation_is_single_step() {
        let mut field = field(r"a\leq b");
        field.move_left();
        field.backspace().unwrap();
        assert_eq!(field.latex(), "a<b");
        field.backspace().unwrap();
        assert_eq!(field.latex(), "ab");
    }

    #[test]
    fn test_protective_fraction_deletion() {
        let mut field = MathField::new();
        field.insert_fraction().unwrap();
        field.move_down();
        field.type_char('y').unwrap();
        field.move_up();
        field.backspace().unwrap();
        assert_eq!(field.latex(), r"\frac{}{y}");

        field.move_right();
        field.move_down();
        field.delete_forward().unwrap();
        assert_eq!(field.latex(), r"\frac{}{}");
        field.backspace().unwrap();
        assert_eq!(field.latex(), "");
    }

    #[test]
    fn test_wrap_selection() {
        let mut field = field("ab");
        field.select_all();
        field.insert_fraction().unwrap();
        field.type_char('2').unwrap();
        assert_eq!(field.latex(), r"\frac{ab}{2}");

        let mut field = MathField::with_settings(Settings::builder().wrap_selection(false).build());
        field.set_latex("ab").unwrap();
        field.select_all();
        field.insert_sqrt().unwrap();
        assert_eq!(field.latex(), r"\sqrt{}");
    }

    #[test]
    fn test_wrapped_root_enters_index() {
        let mut field = field("x");
        field.select_all();
        field.insert_nth_root().unwrap();
        field.type_char('3').unwrap();
        assert_eq!(field.latex(), r"\sqrt[3]{x}");
    }

    #[test]
    fn test_typed_scripts_combine() {
        let mut field = MathField::new();
        for ch in "x_i".chars() {
            field.type_char(ch).unwrap();
        }
        field.move_right();
        field.type_char('^').unwrap();
        field.type_char('2').unwrap();
        assert_eq!(field.latex(), "x_i^2");
    }

    #[test]
    fn test_typed_limits() {
        let mut field = MathField::new();
        field.insert_large_operator(LargeOp::Sum).unwrap();
        field.type_char('i').unwrap();
        field.move_up();
        field.type_char('n').unwrap();
        field.move_to_end();
        field.type_char('^').unwrap();
        field.type_char('2').unwrap();
        assert_eq!(field.latex(), r"\sum_{i}^{n2}");
    }

    #[test]
    fn test_brackets_and_text() {
        let mut field = MathField::new();
        for ch in "(a+b)c".chars() {
            field.type_char(ch).unwrap();
        }
        assert_eq!(field.latex(), r"\left(a+b\right)c");

        let mut field = MathField::new();
        field.insert_text_style(TextStyle::Text).unwrap();
        for ch in "if x".chars() {
            field.type_char(ch).unwrap();
        }
        assert_eq!(field.latex(), r"\text{if x}");
    }

    #[test]
    fn test_paste_falls_back_to_literal_text() {
        let mut field = MathField::new();
        field.paste(r"\frac{1}{2}").unwrap();
        assert_eq!(field.latex(), r"\frac{1}{2}");

        let mut field = MathField::new();
        field.paste("a}b").unwrap();
        assert_eq!(field.latex(), r"a\}b");
        assert!(field.write("}").is_err());
        assert_eq!(field.latex(), r"a\}b");
    }

    #[test]
    fn test_cut_and_selection_latex() {
        let mut field = field(r"a+\frac{1}{2}");
        field.select(Direction::Left);
        assert_eq!(field.selection_latex(), r"\frac{1}{2}");
        assert_eq!(field.cut().unwrap(), r"\frac{1}{2}");
        assert_eq!(field.latex(), "a+");
    }

    #[test]
    fn test_snapshot_restore() {
        let mut field = field("a");
        let snapshot = field.snapshot();
        field.type_char('b').unwrap();
        field.restore(snapshot);
        assert_eq!(field.latex(), "a");
    }

    #[test]
    fn test_find_node_by_id() {
        let mut field = field("ab");
        let a = field.document().first_child(field.document().root()).unwrap();
        assert!(field.find_node_by_id(a).is_some());
        field.move_to_start();
        field.delete_forward().unwrap();
        assert!(field.find_node_by_id(a).is_none());
    }

    #[test]
    fn test_matrix_editing() {
        let mut field = MathField::new();
        assert!(matches!(
            field.insert_matrix(MatrixEnv::Bracket, 0, 2),
            Err(MathFieldError::InvalidMatrixSize {
                rows: 0,
                cols: 2,
                max: 64
            })
        ));
        field.insert_matrix(MatrixEnv::Bracket, 1, 1).unwrap();
        field.type_char('a').unwrap();
        assert!(field.insert_matrix_column().unwrap());
        field.type_char('b').unwrap();
        assert!(field.insert_matrix_row().unwrap());
        field.type_char('d').unwrap();
        assert_eq!(field.latex(), r"\begin{bmatrix}a&b\\&d\end{bmatrix}");

        assert!(field.delete_matrix_column().unwrap());
        assert_eq!(field.latex(), r"\begin{bmatrix}a\\{}\end{bmatrix}");
        assert!(field.delete_matrix_row().unwrap());
        assert!(!field.delete_matrix_row().unwrap());
        assert_eq!(field.latex(), r"\begin{bmatrix}a\end{bmatrix}");
    }

    #[test]
    fn test_matrix_composite_respects_size_limit() {
        let mut field = field("x");
        let huge = CompositeKind::Matrix {
            env: MatrixEnv::Plain,
            rows: usize::MAX,
            cols: usize::MAX,
        };
        assert!(matches!(
            field.insert_composite(huge),
            Err(MathFieldError::InvalidMatrixSize { max: 64, .. })
        ));
        assert_eq!(field.latex(), "x");
        assert!(field.document().check_links().is_empty());

        let settings = Settings::builder().max_matrix_size(2).build();
        let mut field = MathField::with_settings(settings);
        let wide = CompositeKind::Matrix {
            env: MatrixEnv::Paren,
            rows: 1,
            cols: 3,
        };
        assert!(field.insert_composite(wide).is_err());
        field
            .insert_composite(CompositeKind::Matrix {
                env: MatrixEnv::Paren,
                rows: 2,
                cols: 2,
            })
            .unwrap();
        assert_eq!(field.latex(), r"\begin{pmatrix}&\\&\end{pmatrix}");
    }

    #[test]
    fn test_insert_symbol_keys() {
        let mut field = MathField::new();
        field.insert_symbol("{").unwrap();
        field.insert_symbol(r"\lt").unwrap();
        field.insert_symbol("a").unwrap();
        field.insert_symbol("_").unwrap();
        assert!(matches!(
            field.insert_symbol("^"),
            Err(MathFieldError::UnknownSymbol { .. })
        ));
        assert!(matches!(
            field.insert_symbol("ab"),
            Err(MathFieldError::UnknownSymbol { .. })
        ));
        assert!(field.insert_symbol("").is_err());
        assert_eq!(field.latex(), r"\{<a\_");
        assert!(parse_with(&field.latex(), &Settings::default(), Catalog::shared()).is_ok());
    }

    #[test]
    fn test_enter_direction_setting() {
        let settings = Settings::builder().enter_direction(EnterDirection::Down).build();
        let mut field = MathField::with_settings(settings);
        field.set_latex(r"\frac{a}{b}").unwrap();
        field.move_to_start();
        field.move_right();
        field.type_char('x').unwrap();
        assert_eq!(field.latex(), r"\frac{a}{xb}");
    }
}
