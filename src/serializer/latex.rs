//! Markup writer

use crate::catalog::{UNICODE_SUBSCRIPTS, UNICODE_SUPERSCRIPTS, is_reserved_char};
use crate::tree::{BlockId, Composite, CompositeKind, Document, Leaf, NodeId, NodeKind};

/// Serializes the whole document.
///
/// ```rust
/// use mathfield::materialize::build_document;
/// use mathfield::{Catalog, parse, serializer};
///
/// let doc = build_document(&parse(r"\frac{a}{b}").unwrap(), Catalog::shared()).unwrap();
/// assert_eq!(serializer::latex(&doc), r"\frac{a}{b}");
/// ```
#[must_use]
pub fn latex(doc: &Document) -> String {
    block_latex(doc, doc.root())
}

/// Serializes the children of one block.
#[must_use]
pub fn block_latex(doc: &Document, block: BlockId) -> String {
    let mut writer = LatexWriter::new(doc);
    writer.block(block);
    writer.finish()
}

/// Serializes a run of sibling nodes, such as a selection.
#[must_use]
pub fn nodes_latex(doc: &Document, nodes: &[NodeId]) -> String {
    let mut writer = LatexWriter::new(doc);
    let mut prev = None;
    for &node in nodes {
        writer.node(prev, node);
        prev = Some(node);
    }
    writer.finish()
}

/// Whether `out` ends in a control word such as `\alpha`, which would
/// swallow a letter or whitespace written right after it.
fn ends_in_control_word(out: &str) -> bool {
    let letters = out
        .bytes()
        .rev()
        .take_while(u8::is_ascii_alphabetic)
        .count();
    if letters == 0 {
        return false;
    }
    let backslashes = out[..out.len() - letters]
        .bytes()
        .rev()
        .take_while(|&byte| byte == b'\\')
        .count();
    backslashes % 2 == 1
}

/// Whether a script written as `text` may go without braces: one character
/// that reads back as a single symbol token.
fn is_bare_script(text: &str) -> bool {
    let mut chars = text.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return false;
    };
    !ch.is_whitespace()
        && !is_reserved_char(ch)
        && !matches!(ch, '[' | ']' | '~')
        && !UNICODE_SUPERSCRIPTS.contains_key(&ch)
        && !UNICODE_SUBSCRIPTS.contains_key(&ch)
}

fn is_script(kind: &CompositeKind) -> bool {
    matches!(
        kind,
        CompositeKind::Superscript | CompositeKind::Subscript | CompositeKind::SupSub(_)
    )
}

struct LatexWriter<'a> {
    doc: &'a Document,
    out: String,
}

impl<'a> LatexWriter<'a> {
    const fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            out: String::new(),
        }
    }

    fn finish(self) -> String {
        self.out
    }

    /// Appends `text`, separating it from a preceding control word when the
    /// two would otherwise read as one token.
    fn push(&mut self, text: &str) {
        if ends_in_control_word(&self.out) {
            if text.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
                self.out.push(' ');
            } else if text.starts_with(char::is_whitespace) {
                self.out.push_str("{}");
            }
        }
        self.out.push_str(text);
    }

    fn block(&mut self, block: BlockId) {
        let mut prev = None;
        for node in self.doc.children(block) {
            self.node(prev, node);
            prev = Some(node);
        }
    }

    fn group(&mut self, block: BlockId) {
        self.push("{");
        self.block(block);
        self.push("}");
    }

    fn script(&mut self, marker: &str, block: BlockId) {
        self.push(marker);
        let body = block_latex(self.doc, block);
        if is_bare_script(&body) {
            self.push(&body);
        } else {
            self.push("{");
            self.out.push_str(&body);
            self.push("}");
        }
    }

    fn node(&mut self, prev: Option<NodeId>, id: NodeId) {
        let Some(node) = self.doc.node(id) else {
            return;
        };
        match node.kind() {
            NodeKind::Leaf(Leaf::Symbol(symbol)) => self.push(&symbol.key),
            NodeKind::Leaf(Leaf::OperatorName {
                name,
                builtin: true,
            }) => {
                self.push("\\");
                self.out.push_str(name);
            }
            NodeKind::Leaf(Leaf::OperatorName { name, .. }) => {
                self.push("\\operatorname{");
                self.out.push_str(name);
                self.push("}");
            }
            NodeKind::Leaf(Leaf::Opaque(command)) => self.push(command),
            NodeKind::Composite(composite) => {
                let after_script = prev
                    .and_then(|prev| self.doc.composite(prev))
                    .is_some_and(|prev| {
                        is_script(&prev.kind)
                            || matches!(prev.kind, CompositeKind::LargeOperator { .. })
                    });
                if after_script && is_script(&composite.kind) {
                    self.push("{}");
                }
                self.composite(composite);
            }
        }
    }

    fn composite(&mut self, composite: &Composite) {
        let blocks = composite.blocks();
        match &composite.kind {
            CompositeKind::Fraction | CompositeKind::Binomial => {
                let command = if composite.kind == CompositeKind::Fraction {
                    "\\frac"
                } else {
                    "\\binom"
                };
                self.push(command);
                for &block in blocks {
                    self.group(block);
                }
            }
            CompositeKind::Sqrt => {
                self.push("\\sqrt");
                blocks.iter().for_each(|&block| self.group(block));
            }
            CompositeKind::NthRoot => {
                self.push("\\sqrt");
                if let &[index, radicand] = blocks {
                    let index = block_latex(self.doc, index);
                    if index.contains(']') {
                        self.push("[{");
                        self.out.push_str(&index);
                        self.push("}]");
                    } else if !index.is_empty() {
                        self.push("[");
                        self.out.push_str(&index);
                        self.push("]");
                    }
                    self.group(radicand);
                }
            }
            CompositeKind::Superscript => {
                blocks.iter().for_each(|&block| self.script("^", block));
            }
            CompositeKind::Subscript => {
                blocks.iter().for_each(|&block| self.script("_", block));
            }
            CompositeKind::SupSub(_) => {
                for &block in blocks {
                    let marker = if composite.lower() == Some(block) { "_" } else { "^" };
                    self.script(marker, block);
                }
            }
            CompositeKind::Brackets { open, close } => {
                self.push("\\left");
                self.push(open.latex());
                blocks.iter().for_each(|&block| self.block(block));
                self.push("\\right");
                self.push(close.latex());
            }
            CompositeKind::Accent(accent) => {
                self.push(accent.command());
                blocks.iter().for_each(|&block| self.group(block));
            }
            CompositeKind::TextStyle(style) => {
                self.push(style.command());
                blocks.iter().for_each(|&block| self.group(block));
            }
            CompositeKind::LargeOperator { op, .. } => {
                self.push(op.command());
                for &block in blocks {
                    if self.doc.is_block_empty(block) {
                        continue;
                    }
                    let marker = if composite.lower() == Some(block) { "_" } else { "^" };
                    self.push(marker);
                    self.group(block);
                }
            }
            CompositeKind::Matrix { env, rows, cols } => {
                self.push("\\begin{");
                self.out.push_str(env.name());
                self.push("}");
                for (index, &block) in blocks.iter().enumerate() {
                    let (row, col) = (index / cols, index % cols);
                    if col == 0 && row > 0 {
                        self.push("\\\\");
                    } else if col > 0 {
                        self.push("&");
                    }
                    // A trailing row of one empty cell would read as a
                    // dangling row break.
                    if *cols == 1 && row > 0 && row + 1 == *rows && self.doc.is_block_empty(block)
                    {
                        self.push("{}");
                    }
                    self.block(block);
                }
                self.push("\\end{");
                self.out.push_str(env.name());
                self.push("}");
            }
        }
    }
}
