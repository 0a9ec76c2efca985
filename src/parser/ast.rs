//! Intermediate parse result
//!
//! The parser produces a raw [`Ast`] list that still contains braced groups,
//! whitespace markers and bare script markers. [`normalize`] folds those
//! away; after it, two inputs parse equal exactly when they describe the same
//! tree.
//!
//! [`normalize`]: crate::parser::normalize

use crate::catalog::{Accent, Delimiter, LargeOp, MatrixEnv, TextStyle};
use crate::tree::ScriptOrder;

/// One parsed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// A catalog symbol or a plain character, by canonical key.
    Symbol(String),
    /// Collapsed whitespace. Kept only in text mode after normalization.
    Space,
    /// `\sin` (`builtin`) or `\operatorname{name}`.
    OperatorName {
        /// Name without backslash.
        name: String,
        /// Written as a bare command.
        builtin: bool,
    },
    /// A large operator without limits; with limits it is the base of a
    /// [`Ast::Script`].
    LargeOp(LargeOp),
    /// A command missing from the catalog, with the braced group that
    /// immediately followed it, if any.
    Unknown {
        /// The command, backslash included.
        command: String,
        /// Contents of the following braced group.
        argument: Option<Vec<Ast>>,
    },
    /// `{...}` in sequence position. Removed by normalization.
    Group(Vec<Ast>),
    /// `^` with its argument. Removed by normalization.
    Superscript(Vec<Ast>),
    /// `_` with its argument. Removed by normalization.
    Subscript(Vec<Ast>),
    /// A subscript, a superscript or both. Scripts are attached to whatever
    /// precedes them in the list, except on a large operator, which becomes
    /// the base so that the scripts turn into its limits.
    Script {
        /// The large operator taking the scripts as limits.
        base: Option<Box<Ast>>,
        /// Subscript contents.
        sub: Option<Vec<Ast>>,
        /// Superscript contents.
        sup: Option<Vec<Ast>>,
        /// Which marker came first.
        order: ScriptOrder,
    },
    /// `\frac{..}{..}`
    Fraction {
        /// Top.
        numerator: Vec<Ast>,
        /// Bottom.
        denominator: Vec<Ast>,
    },
    /// `\binom{..}{..}`
    Binomial {
        /// Top.
        top: Vec<Ast>,
        /// Bottom.
        bottom: Vec<Ast>,
    },
    /// `\sqrt[..]{..}`
    Root {
        /// Optional index.
        index: Option<Vec<Ast>>,
        /// Radicand.
        radicand: Vec<Ast>,
    },
    /// `\left.. \right..`
    Brackets {
        /// Opening delimiter.
        open: Delimiter,
        /// Closing delimiter.
        close: Delimiter,
        /// Contents.
        body: Vec<Ast>,
    },
    /// `\hat{..}` and friends.
    Accent {
        /// Which accent.
        accent: Accent,
        /// Accented contents.
        body: Vec<Ast>,
    },
    /// `\mathbb{..}`, `\text{..}` and friends.
    TextStyle {
        /// Which style.
        style: TextStyle,
        /// Styled contents.
        body: Vec<Ast>,
    },
    /// A matrix environment; every row has the same number of cells.
    Matrix {
        /// Which environment.
        env: MatrixEnv,
        /// Cells, row by row.
        rows: Vec<Vec<Vec<Ast>>>,
    },
}

impl Ast {
    /// Whether the element can take scripts directly as a limit-bearing
    /// operator.
    #[must_use]
    pub const fn is_large_op(&self) -> bool {
        matches!(self, Self::LargeOp(_))
    }
}
