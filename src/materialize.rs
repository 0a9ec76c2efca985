//! AST to tree
//!
//! Materialization inserts nodes through a [`Cursor`], so a parsed formula
//! lands exactly where the cursor stands. Composite blocks are filled by
//! saving the cursor position, descending into the fresh block and
//! restoring the position afterwards.
//!
//! Two patterns are recognized before the generic cases:
//!
//! - scripts on a large operator become that operator's limit blocks;
//! - an unknown command followed by a braced group becomes a text-style span
//!   tagged with the command; without a group it is an opaque leaf.

use crate::catalog::{Catalog, LargeOp, TextStyle};
use crate::cursor::{Cursor, Position};
use crate::parser::Ast;
use crate::tree::{BlockId, CompositeKind, Document, Leaf, NodeId, ScriptOrder, Symbol};
use crate::types::TreeError;

/// Builds a fresh document holding `ast`.
pub fn build_document(ast: &[Ast], catalog: &Catalog) -> Result<Document, TreeError> {
    let mut doc = Document::new();
    let mut cursor = Cursor::new(&doc);
    materialize(&mut doc, &mut cursor, ast, catalog)?;
    Ok(doc)
}

/// Inserts `ast` at the cursor, leaving the cursor after the last inserted
/// node.
pub fn materialize(
    doc: &mut Document,
    cursor: &mut Cursor,
    ast: &[Ast],
    catalog: &Catalog,
) -> Result<(), TreeError> {
    let mut builder = Builder {
        doc,
        cursor,
        catalog,
    };
    builder.list(ast)
}

struct Builder<'a> {
    doc: &'a mut Document,
    cursor: &'a mut Cursor,
    catalog: &'a Catalog,
}

impl Builder<'_> {
    fn list(&mut self, items: &[Ast]) -> Result<(), TreeError> {
        items.iter().try_for_each(|item| self.item(item))
    }

    fn leaf(&mut self, leaf: Leaf) -> Result<NodeId, TreeError> {
        let node = self.doc.create_leaf(leaf);
        self.cursor.place(self.doc, node)?;
        Ok(node)
    }

    /// Places a composite of `kind` and fills its blocks in reading order
    /// from `contents`; missing contents leave blocks empty.
    fn composite(&mut self, kind: CompositeKind, contents: &[&[Ast]]) -> Result<NodeId, TreeError> {
        let node = self.doc.create_composite(kind);
        self.cursor.place(self.doc, node)?;
        let blocks = self.blocks(node);
        for (block, content) in blocks.into_iter().zip(contents) {
            self.fill(block, content)?;
        }
        Ok(node)
    }

    fn blocks(&self, node: NodeId) -> Vec<BlockId> {
        self.doc
            .node(node)
            .map(|node| node.blocks().to_vec())
            .unwrap_or_default()
    }

    fn fill(&mut self, block: BlockId, content: &[Ast]) -> Result<(), TreeError> {
        if content.is_empty() {
            return Ok(());
        }
        let saved = self.cursor.position();
        self.cursor.restore_position(Position::start(self.doc, block));
        let result = self.list(content);
        self.cursor.restore_position(saved);
        result
    }

    fn item(&mut self, item: &Ast) -> Result<(), TreeError> {
        match item {
            Ast::Symbol(key) => {
                self.leaf(Leaf::Symbol(self.catalog.make_symbol(key)))?;
            }
            Ast::Space => {
                self.leaf(Leaf::Symbol(Symbol::space()))?;
            }
            Ast::OperatorName { name, builtin } => {
                self.leaf(Leaf::OperatorName {
                    name: name.clone(),
                    builtin: *builtin,
                })?;
            }
            Ast::LargeOp(op) => {
                self.large_op(*op, None, None, ScriptOrder::SubFirst)?;
            }
            Ast::Unknown {
                command,
                argument: None,
            } => {
                self.leaf(Leaf::Opaque(command.clone()))?;
            }
            Ast::Unknown {
                command,
                argument: Some(argument),
            } => {
                self.composite(
                    CompositeKind::TextStyle(TextStyle::Other(command.clone())),
                    &[argument.as_slice()],
                )?;
            }
            Ast::Group(body) => self.list(body)?,
            Ast::Superscript(body) => {
                self.composite(CompositeKind::Superscript, &[body.as_slice()])?;
            }
            Ast::Subscript(body) => {
                self.composite(CompositeKind::Subscript, &[body.as_slice()])?;
            }
            Ast::Script {
                base,
                sub,
                sup,
                order,
            } => self.script(base.as_deref(), sub.as_deref(), sup.as_deref(), *order)?,
            Ast::Fraction {
                numerator,
                denominator,
            } => {
                self.composite(CompositeKind::Fraction, &[numerator.as_slice(), denominator.as_slice()])?;
            }
            Ast::Binomial { top, bottom } => {
                self.composite(CompositeKind::Binomial, &[top.as_slice(), bottom.as_slice()])?;
            }
            Ast::Root {
                index: None,
                radicand,
            } => {
                self.composite(CompositeKind::Sqrt, &[radicand.as_slice()])?;
            }
            Ast::Root {
                index: Some(index),
                radicand,
            } => {
                self.composite(CompositeKind::NthRoot, &[index.as_slice(), radicand.as_slice()])?;
            }
            Ast::Brackets { open, close, body } => {
                self.composite(
                    CompositeKind::Brackets {
                        open: *open,
                        close: *close,
                    },
                    &[body.as_slice()],
                )?;
            }
            Ast::Accent { accent, body } => {
                self.composite(CompositeKind::Accent(*accent), &[body.as_slice()])?;
            }
            Ast::TextStyle { style, body } => {
                self.composite(CompositeKind::TextStyle(style.clone()), &[body.as_slice()])?;
            }
            Ast::Matrix { env, rows } => {
                let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
                let kind = CompositeKind::Matrix {
                    env: *env,
                    rows: rows.len(),
                    cols,
                };
                let mut cells: Vec<&[Ast]> = Vec::with_capacity(rows.len() * cols);
                for row in rows {
                    cells.extend(row.iter().map(Vec::as_slice));
                    cells.extend(core::iter::repeat_n(&[][..], cols - row.len()));
                }
                self.composite(kind, &cells)?;
            }
        }
        Ok(())
    }

    fn script(
        &mut self,
        base: Option<&Ast>,
        sub: Option<&[Ast]>,
        sup: Option<&[Ast]>,
        order: ScriptOrder,
    ) -> Result<(), TreeError> {
        if let Some(Ast::LargeOp(op)) = base {
            return self.large_op(*op, sub, sup, order).map(|_| ());
        }
        if let Some(base) = base {
            self.item(base)?;
        }
        let node = match (sub, sup) {
            (Some(sub), Some(sup)) => {
                let node = self.doc.create_composite(CompositeKind::SupSub(order));
                self.cursor.place(self.doc, node)?;
                self.fill_limits(node, sub, sup)?;
                node
            }
            (None, Some(sup)) => self.composite(CompositeKind::Superscript, &[sup])?,
            (Some(sub), None) => self.composite(CompositeKind::Subscript, &[sub])?,
            (None, None) => return Ok(()),
        };
        tracing::trace!(node = %node, "materialized script");
        Ok(())
    }

    /// A large operator; it gets an upper limit block whenever the operator
    /// has one by default or a superscript was written.
    fn large_op(
        &mut self,
        op: LargeOp,
        sub: Option<&[Ast]>,
        sup: Option<&[Ast]>,
        order: ScriptOrder,
    ) -> Result<NodeId, TreeError> {
        let kind = CompositeKind::LargeOperator {
            op,
            upper: op.has_upper_limit() || sup.is_some(),
            order,
        };
        let node = self.doc.create_composite(kind);
        self.cursor.place(self.doc, node)?;
        self.fill_limits(node, sub.unwrap_or_default(), sup.unwrap_or_default())?;
        Ok(node)
    }

    /// Fills the lower block of `node` with `lower` and its upper block, if
    /// it has one, with `upper`.
    fn fill_limits(&mut self, node: NodeId, lower: &[Ast], upper: &[Ast]) -> Result<(), TreeError> {
        let composite = self.doc.composite(node).ok_or(TreeError::StaleNode(node))?;
        let (lower_block, upper_block) = (composite.lower(), composite.upper());
        if let Some(block) = lower_block {
            self.fill(block, lower)?;
        }
        if let Some(block) = upper_block {
            self.fill(block, upper)?;
        }
        Ok(())
    }
}
