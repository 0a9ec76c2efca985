//! Nodes, blocks and the closed set of node kinds

use core::fmt;

use crate::catalog::{Accent, Delimiter, LargeOp, MatrixEnv, SymbolClass, SymbolDef, TextStyle};

/// Identifier of a node within one [`Document`](crate::tree::Document).
///
/// Identifiers come from a per-document counter, are stable for the lifetime
/// of the node and are never reused. They carry no ordering meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Rebuilds an identifier from the value returned by [`NodeId::raw`].
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The numeric value, for hosts that store identifiers outside the tree.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Identifier of a block within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) u32);

impl BlockId {
    /// The numeric value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// One element of the formula tree.
///
/// `parent`, `left` and `right` are non-owning links maintained by the
/// [`Document`](crate::tree::Document); they are only ever changed through
/// its splice operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<BlockId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    /// The node's identifier.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Block the node sits in, `None` while detached.
    #[must_use]
    pub const fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    /// Sibling immediately to the left.
    #[must_use]
    pub const fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Sibling immediately to the right.
    #[must_use]
    pub const fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// What the node is.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether the node owns no blocks.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Owned blocks in reading order; empty for leaves.
    #[must_use]
    pub fn blocks(&self) -> &[BlockId] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::Composite(composite) => &composite.blocks,
        }
    }

    /// The composite payload, if any.
    #[must_use]
    pub const fn composite(&self) -> Option<&Composite> {
        match &self.kind {
            NodeKind::Composite(composite) => Some(composite),
            NodeKind::Leaf(_) => None,
        }
    }

    /// The symbol payload, if the node is a symbol leaf.
    #[must_use]
    pub const fn symbol(&self) -> Option<&Symbol> {
        match &self.kind {
            NodeKind::Leaf(Leaf::Symbol(symbol)) => Some(symbol),
            _ => None,
        }
    }
}

/// An ordered, possibly empty sequence of sibling nodes.
///
/// Only the two ends are stored; `first` is `None` exactly when `last` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub(crate) id: BlockId,
    pub(crate) owner: Option<NodeId>,
    pub(crate) slot: usize,
    pub(crate) first: Option<NodeId>,
    pub(crate) last: Option<NodeId>,
}

impl Block {
    /// The block's identifier.
    #[must_use]
    pub const fn id(&self) -> BlockId {
        self.id
    }

    /// Composite owning the block; `None` for the document root.
    #[must_use]
    pub const fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Position of the block among its owner's blocks.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// First child.
    #[must_use]
    pub const fn first(&self) -> Option<NodeId> {
        self.first
    }

    /// Last child.
    #[must_use]
    pub const fn last(&self) -> Option<NodeId> {
        self.last
    }

    /// Whether the block has no children.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// Leaf or composite.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Owns no blocks.
    Leaf(Leaf),
    /// Owns one or more blocks.
    Composite(Composite),
}

/// Leaf payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// A glyph, possibly with a command spelling and a degradation target.
    Symbol(Symbol),
    /// An operator name such as `sin`. `builtin` names are written as a bare
    /// command, the rest through `\operatorname{...}`.
    OperatorName {
        /// Name without backslash.
        name: String,
        /// Whether the catalog knows `\name`.
        builtin: bool,
    },
    /// An unknown command kept verbatim, backslash included.
    Opaque(String),
}

/// Immutable symbol leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Markup the symbol serializes to: a command or the bare character.
    pub key: String,
    /// Glyph used for plain text.
    pub glyph: String,
    /// Role of the symbol.
    pub class: SymbolClass,
    /// Key of the symbol one backspace degrades this one into.
    pub degrade: Option<&'static str>,
}

impl Symbol {
    /// Builds a symbol leaf from a catalog entry.
    #[must_use]
    pub fn from_def(key: &str, def: &SymbolDef) -> Self {
        Self {
            key: key.to_owned(),
            glyph: def.glyph.to_owned(),
            class: def.class,
            degrade: def.degrade,
        }
    }

    /// A character unknown to the catalog, written as itself.
    #[must_use]
    pub fn literal(ch: char, class: SymbolClass) -> Self {
        Self {
            key: ch.to_string(),
            glyph: ch.to_string(),
            class,
            degrade: None,
        }
    }

    /// A significant space inside a text-mode span.
    #[must_use]
    pub fn space() -> Self {
        Self::literal(' ', SymbolClass::Space)
    }

    /// Whether the key is a command rather than a bare character.
    #[must_use]
    pub fn is_command(&self) -> bool {
        self.key.starts_with('\\')
    }
}

/// Order in which a combined sub/superscript was written.
///
/// The first-written script is also the first block in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScriptOrder {
    /// `_{..}^{..}`
    #[default]
    SubFirst,
    /// `^{..}_{..}`
    SupFirst,
}

/// Composite payload: a kind plus the blocks it owns, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    /// What the composite is.
    pub kind: CompositeKind,
    pub(crate) blocks: Vec<BlockId>,
}

impl Composite {
    /// Owned blocks in reading order.
    #[must_use]
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Block shown above the other, reached by moving up.
    #[must_use]
    pub fn upper(&self) -> Option<BlockId> {
        self.kind.upper_slot().and_then(|slot| self.blocks.get(slot).copied())
    }

    /// Block shown below the other, reached by moving down.
    #[must_use]
    pub fn lower(&self) -> Option<BlockId> {
        self.kind.lower_slot().and_then(|slot| self.blocks.get(slot).copied())
    }

    /// The block structural inserts fill with a wrapped selection.
    #[must_use]
    pub fn primary(&self) -> Option<BlockId> {
        self.blocks.get(self.kind.primary_slot()).copied()
    }
}

/// The closed set of composite node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositeKind {
    /// Numerator over denominator.
    Fraction,
    /// Top over bottom, in parentheses, without a bar.
    Binomial,
    /// Radicand only.
    Sqrt,
    /// Index then radicand, side by side.
    NthRoot,
    /// A lone superscript attached to the preceding sibling.
    Superscript,
    /// A lone subscript attached to the preceding sibling.
    Subscript,
    /// Subscript and superscript together.
    SupSub(ScriptOrder),
    /// Content between a pair of stretchy delimiters.
    Brackets {
        /// `\left` delimiter.
        open: Delimiter,
        /// `\right` delimiter.
        close: Delimiter,
    },
    /// Content under a combining accent.
    Accent(Accent),
    /// Content in a font or text style.
    TextStyle(TextStyle),
    /// Large operator with a lower limit and, usually, an upper limit.
    LargeOperator {
        /// Which operator.
        op: LargeOp,
        /// Whether an upper limit block exists.
        upper: bool,
        /// Order the limits are written in.
        order: ScriptOrder,
    },
    /// Grid of cells, stored row-major.
    Matrix {
        /// Environment it was written in.
        env: MatrixEnv,
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },
}

impl CompositeKind {
    /// Number of blocks a composite of this kind owns.
    #[must_use]
    pub const fn block_count(&self) -> usize {
        match self {
            Self::Sqrt
            | Self::Superscript
            | Self::Subscript
            | Self::Brackets { .. }
            | Self::Accent(_)
            | Self::TextStyle(_) => 1,
            Self::Fraction | Self::Binomial | Self::NthRoot | Self::SupSub(_) => 2,
            Self::LargeOperator { upper, .. } => {
                if *upper {
                    2
                } else {
                    1
                }
            }
            Self::Matrix { rows, cols, .. } => *rows * *cols,
        }
    }

    /// Slot of the block above its twin.
    #[must_use]
    pub const fn upper_slot(&self) -> Option<usize> {
        match self {
            Self::Fraction | Self::Binomial => Some(0),
            Self::SupSub(ScriptOrder::SubFirst) => Some(1),
            Self::SupSub(ScriptOrder::SupFirst) => Some(0),
            Self::LargeOperator {
                upper: true,
                order: ScriptOrder::SubFirst,
                ..
            } => Some(1),
            Self::LargeOperator {
                upper: true,
                order: ScriptOrder::SupFirst,
                ..
            } => Some(0),
            _ => None,
        }
    }

    /// Slot of the block below its twin.
    #[must_use]
    pub const fn lower_slot(&self) -> Option<usize> {
        match self {
            Self::Fraction | Self::Binomial => Some(1),
            Self::SupSub(ScriptOrder::SubFirst) => Some(0),
            Self::SupSub(ScriptOrder::SupFirst) => Some(1),
            Self::LargeOperator {
                upper: true,
                order: ScriptOrder::SupFirst,
                ..
            } => Some(1),
            Self::LargeOperator { .. } => Some(0),
            _ => None,
        }
    }

    /// Slot filled when a selection is wrapped.
    #[must_use]
    pub const fn primary_slot(&self) -> usize {
        match self {
            Self::NthRoot => 1,
            Self::LargeOperator { .. } => match self.lower_slot() {
                Some(slot) => slot,
                None => 0,
            },
            _ => 0,
        }
    }

    /// Whether the kind has two blocks stacked vertically.
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        self.upper_slot().is_some() && self.lower_slot().is_some()
    }
}
