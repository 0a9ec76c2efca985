//! Plain-text projection
//!
//! Every node contributes its glyphs in reading order, with a space after
//! operator names. Structure that has no linear glyph form is spelled out:
//!
//! | node | text |
//! |------|------|
//! | fraction | `a/b`, operands of more than one character in parentheses |
//! | binomial | `binom(n, k)` |
//! | roots | `√x`, `3√(x+1)` |
//! | scripts | `x^2`, `x_(ij)` |
//! | accent | body followed by the combining mark |
//! | large operator | glyph with `_` and `^` limits |
//! | matrix | fences around rows joined by `; `, cells by `, ` |

use crate::tree::{BlockId, Composite, CompositeKind, Document, Leaf, NodeId, NodeKind};

/// Plain text of the whole document.
#[must_use]
pub fn text(doc: &Document) -> String {
    block_text(doc, doc.root())
}

/// Plain text of one block.
#[must_use]
pub fn block_text(doc: &Document, block: BlockId) -> String {
    let mut out = String::new();
    let mut after_operator = false;
    for node in doc.children(block) {
        if after_operator {
            out.push(' ');
        }
        node_text(doc, node, &mut out);
        after_operator = matches!(
            doc.node(node).map(|node| node.kind()),
            Some(NodeKind::Leaf(Leaf::OperatorName { .. }))
        );
    }
    out
}

/// Wraps multi-character operands in parentheses.
fn operand(doc: &Document, block: BlockId) -> String {
    let text = block_text(doc, block);
    if text.chars().count() == 1 {
        text
    } else {
        format!("({text})")
    }
}

fn node_text(doc: &Document, id: NodeId, out: &mut String) {
    let Some(node) = doc.node(id) else {
        return;
    };
    match node.kind() {
        NodeKind::Leaf(Leaf::Symbol(symbol)) => out.push_str(&symbol.glyph),
        NodeKind::Leaf(Leaf::OperatorName { name, .. }) => out.push_str(name),
        NodeKind::Leaf(Leaf::Opaque(command)) => out.push_str(command),
        NodeKind::Composite(composite) => composite_text(doc, composite, out),
    }
}

fn composite_text(doc: &Document, composite: &Composite, out: &mut String) {
    let blocks = composite.blocks();
    match &composite.kind {
        CompositeKind::Fraction => {
            if let &[numerator, denominator] = blocks {
                out.push_str(&operand(doc, numerator));
                out.push('/');
                out.push_str(&operand(doc, denominator));
            }
        }
        CompositeKind::Binomial => {
            if let &[top, bottom] = blocks {
                out.push_str("binom(");
                out.push_str(&block_text(doc, top));
                out.push_str(", ");
                out.push_str(&block_text(doc, bottom));
                out.push(')');
            }
        }
        CompositeKind::Sqrt => {
            for &radicand in blocks {
                out.push('\u{221a}');
                out.push_str(&operand(doc, radicand));
            }
        }
        CompositeKind::NthRoot => {
            if let &[index, radicand] = blocks {
                out.push_str(&block_text(doc, index));
                out.push('\u{221a}');
                out.push_str(&operand(doc, radicand));
            }
        }
        CompositeKind::Superscript
        | CompositeKind::Subscript
        | CompositeKind::SupSub(_)
        | CompositeKind::LargeOperator { .. } => {
            if let CompositeKind::LargeOperator { op, .. } = &composite.kind {
                out.push_str(op.glyph());
            }
            for &block in blocks {
                let is_lower = composite.lower() == Some(block)
                    || composite.kind == CompositeKind::Subscript;
                if matches!(composite.kind, CompositeKind::LargeOperator { .. })
                    && doc.is_block_empty(block)
                {
                    continue;
                }
                out.push(if is_lower { '_' } else { '^' });
                out.push_str(&operand(doc, block));
            }
        }
        CompositeKind::Brackets { open, close } => {
            out.push_str(open.glyph());
            blocks
                .iter()
                .for_each(|&block| out.push_str(&block_text(doc, block)));
            out.push_str(close.glyph());
        }
        CompositeKind::Accent(accent) => {
            for &block in blocks {
                out.push_str(&block_text(doc, block));
                out.push(accent.combining_mark());
            }
        }
        CompositeKind::TextStyle(_) => {
            blocks
                .iter()
                .for_each(|&block| out.push_str(&block_text(doc, block)));
        }
        CompositeKind::Matrix { env, cols, .. } => {
            let (open, close) = env.fences();
            let rows: Vec<String> = blocks
                .chunks((*cols).max(1))
                .map(|row| {
                    row.iter()
                        .map(|&cell| block_text(doc, cell))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .collect();
            out.push_str(open);
            out.push_str(&rows.join("; "));
            out.push_str(close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::materialize::build_document;
    use crate::parser::parse;

    fn plain(input: &str) -> String {
        text(&build_document(&parse(input).unwrap(), Catalog::shared()).unwrap())
    }

    #[test]
    fn test_linear_forms() {
        assert_eq!(plain(r"\frac{1}{2}"), "1/2");
        assert_eq!(plain(r"\frac{a+b}{2}"), "(a+b)/2");
        assert_eq!(plain(r"\binom{n}{k}"), "binom(n, k)");
        assert_eq!(plain(r"\sqrt{x}"), "\u{221a}x");
        assert_eq!(plain(r"\sqrt[3]{x+1}"), "3\u{221a}(x+1)");
        assert_eq!(plain("x^2_i"), "x^2_i");
        assert_eq!(plain("x_{ij}"), "x_(ij)");
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(plain(r"\alpha\leq\beta"), "\u{3b1}\u{2264}\u{3b2}");
        assert_eq!(plain(r"\hat{x}"), "x\u{302}");
        assert_eq!(plain(r"\left\langle v\right\rangle"), "\u{27e8}v\u{27e9}");
        assert_eq!(plain(r"\text{a b}"), "a b");
        assert_eq!(plain(r"\sin x"), "sin x");
        assert_eq!(plain(r"\sin"), "sin");
    }

    #[test]
    fn test_large_operators() {
        assert_eq!(plain(r"\sum_{i=1}^{n}i"), "\u{2211}_(i=1)^ni");
        assert_eq!(plain(r"\int"), "\u{222b}");
    }

    #[test]
    fn test_matrix() {
        assert_eq!(
            plain(r"\begin{pmatrix}1&2\\3&4\end{pmatrix}"),
            "(1, 2; 3, 4)"
        );
        assert_eq!(plain(r"\begin{matrix}a\end{matrix}"), "a");
    }
}
