//! Closed vocabularies of the command catalog

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::types::Mode;

/// Role of a symbol leaf, used for plain-text rendering and typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SymbolClass {
    /// Latin letter used as a variable.
    Variable,
    /// Decimal digit or decimal point.
    Digit,
    /// Binary operator such as `+` or `\times`.
    BinaryOperator,
    /// Relation such as `=` or `\leq`.
    Relation,
    /// Comma, semicolon and friends.
    Punctuation,
    /// Opening fence glyph typed inline, e.g. a bare `(`.
    Open,
    /// Closing fence glyph typed inline.
    Close,
    /// Greek letter.
    Greek,
    /// Explicit math spacing command such as `\,` or `\quad`.
    Spacing,
    /// A literal space inside a text-mode span.
    Space,
    /// Anything else: arrows, dots, set symbols, foreign characters.
    Misc,
}

/// Static description of a symbol known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolDef {
    /// Glyph shown on screen and used by `text()`.
    pub glyph: &'static str,
    /// Role of the symbol.
    pub class: SymbolClass,
    /// Key of the simpler symbol one backspace turns this one into.
    pub degrade: Option<&'static str>,
}

impl SymbolDef {
    /// A symbol without a degradation target.
    #[must_use]
    pub const fn new(glyph: &'static str, class: SymbolClass) -> Self {
        Self {
            glyph,
            class,
            degrade: None,
        }
    }

    /// A symbol that degrades into `target` on backspace.
    #[must_use]
    pub const fn degrading(glyph: &'static str, class: SymbolClass, target: &'static str) -> Self {
        Self {
            glyph,
            class,
            degrade: Some(target),
        }
    }
}

/// Large operators that carry limit blocks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Display, EnumIter,
)]
pub enum LargeOp {
    /// `\sum`
    #[strum(serialize = "\\sum")]
    Sum,
    /// `\prod`
    #[strum(serialize = "\\prod")]
    Prod,
    /// `\coprod`
    #[strum(serialize = "\\coprod")]
    Coprod,
    /// `\int`
    #[strum(serialize = "\\int")]
    Int,
    /// `\iint`
    #[strum(serialize = "\\iint")]
    Iint,
    /// `\iiint`
    #[strum(serialize = "\\iiint")]
    Iiint,
    /// `\oint`
    #[strum(serialize = "\\oint")]
    Oint,
    /// `\bigcup`
    #[strum(serialize = "\\bigcup")]
    Bigcup,
    /// `\bigcap`
    #[strum(serialize = "\\bigcap")]
    Bigcap,
    /// `\bigvee`
    #[strum(serialize = "\\bigvee")]
    Bigvee,
    /// `\bigwedge`
    #[strum(serialize = "\\bigwedge")]
    Bigwedge,
    /// `\bigoplus`
    #[strum(serialize = "\\bigoplus")]
    Bigoplus,
    /// `\bigotimes`
    #[strum(serialize = "\\bigotimes")]
    Bigotimes,
    /// `\lim`, whose only default limit is the lower one.
    #[strum(serialize = "\\lim")]
    Lim,
}

impl LargeOp {
    /// The command, backslash included.
    #[must_use]
    pub fn command(self) -> &'static str {
        self.into()
    }

    /// Plain-text glyph.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Sum => "\u{2211}",
            Self::Prod => "\u{220f}",
            Self::Coprod => "\u{2210}",
            Self::Int => "\u{222b}",
            Self::Iint => "\u{222c}",
            Self::Iiint => "\u{222d}",
            Self::Oint => "\u{222e}",
            Self::Bigcup => "\u{22c3}",
            Self::Bigcap => "\u{22c2}",
            Self::Bigvee => "\u{22c1}",
            Self::Bigwedge => "\u{22c0}",
            Self::Bigoplus => "\u{2a01}",
            Self::Bigotimes => "\u{2a02}",
            Self::Lim => "lim",
        }
    }

    /// Whether a freshly inserted operator gets an upper limit block.
    #[must_use]
    pub const fn has_upper_limit(self) -> bool {
        !matches!(self, Self::Lim)
    }
}

/// Accents, each rendered as a combining mark over its content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Display, EnumIter,
)]
pub enum Accent {
    /// `\hat`
    #[strum(serialize = "\\hat")]
    Hat,
    /// `\bar`
    #[strum(serialize = "\\bar")]
    Bar,
    /// `\vec`
    #[strum(serialize = "\\vec")]
    Vec,
    /// `\dot`
    #[strum(serialize = "\\dot")]
    Dot,
    /// `\ddot`
    #[strum(serialize = "\\ddot")]
    Ddot,
    /// `\tilde`
    #[strum(serialize = "\\tilde")]
    Tilde,
    /// `\check`
    #[strum(serialize = "\\check")]
    Check,
    /// `\breve`
    #[strum(serialize = "\\breve")]
    Breve,
    /// `\acute`
    #[strum(serialize = "\\acute")]
    Acute,
    /// `\grave`
    #[strum(serialize = "\\grave")]
    Grave,
    /// `\overline`
    #[strum(serialize = "\\overline")]
    Overline,
}

impl Accent {
    /// The command, backslash included.
    #[must_use]
    pub fn command(self) -> &'static str {
        self.into()
    }

    /// The Unicode combining mark drawn over the content.
    #[must_use]
    pub const fn combining_mark(self) -> char {
        match self {
            Self::Hat => '\u{302}',
            Self::Bar => '\u{304}',
            Self::Vec => '\u{20d7}',
            Self::Dot => '\u{307}',
            Self::Ddot => '\u{308}',
            Self::Tilde => '\u{303}',
            Self::Check => '\u{30c}',
            Self::Breve => '\u{306}',
            Self::Acute => '\u{301}',
            Self::Grave => '\u{300}',
            Self::Overline => '\u{305}',
        }
    }
}

/// Style tag of a text-style span.
///
/// Unknown commands applied to a braced group parse into
/// [`TextStyle::Other`], which keeps the command so it can be written back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
pub enum TextStyle {
    /// `\text`, the only style whose content is in text mode.
    #[strum(serialize = "\\text")]
    Text,
    /// `\mathrm`
    #[strum(serialize = "\\mathrm")]
    Roman,
    /// `\mathbf`
    #[strum(serialize = "\\mathbf")]
    Bold,
    /// `\mathit`
    #[strum(serialize = "\\mathit")]
    Italic,
    /// `\mathsf`
    #[strum(serialize = "\\mathsf")]
    SansSerif,
    /// `\mathtt`
    #[strum(serialize = "\\mathtt")]
    Monospace,
    /// `\mathcal`
    #[strum(serialize = "\\mathcal")]
    Calligraphic,
    /// `\mathbb`
    #[strum(serialize = "\\mathbb")]
    Blackboard,
    /// `\mathfrak`
    #[strum(serialize = "\\mathfrak")]
    Fraktur,
    /// Any other command, backslash included.
    #[strum(default)]
    Other(String),
}

impl TextStyle {
    /// The command, backslash included.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Text => "\\text",
            Self::Roman => "\\mathrm",
            Self::Bold => "\\mathbf",
            Self::Italic => "\\mathit",
            Self::SansSerif => "\\mathsf",
            Self::Monospace => "\\mathtt",
            Self::Calligraphic => "\\mathcal",
            Self::Blackboard => "\\mathbb",
            Self::Fraktur => "\\mathfrak",
            Self::Other(command) => command,
        }
    }

    /// Whether the cursor leaves the span after a single leaf is typed.
    #[must_use]
    pub const fn is_auto_exit(&self) -> bool {
        matches!(self, Self::Calligraphic | Self::Blackboard | Self::Fraktur)
    }

    /// Mode the span's content is parsed and edited in.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Text => Mode::Text,
            _ => Mode::Math,
        }
    }
}

/// Tabular environments that produce a matrix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Display, EnumIter,
)]
pub enum MatrixEnv {
    /// `matrix`: no fences.
    #[strum(serialize = "matrix")]
    Plain,
    /// `pmatrix`: parentheses.
    #[strum(serialize = "pmatrix")]
    Paren,
    /// `bmatrix`: square brackets.
    #[strum(serialize = "bmatrix")]
    Bracket,
    /// `Bmatrix`: curly braces.
    #[strum(serialize = "Bmatrix")]
    Brace,
    /// `vmatrix`: single bars (determinant).
    #[strum(serialize = "vmatrix")]
    Vert,
    /// `Vmatrix`: double bars (norm).
    #[strum(serialize = "Vmatrix")]
    DoubleVert,
}

impl MatrixEnv {
    /// Environment name as written inside `\begin{...}`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Fence glyphs for plain-text rendering.
    #[must_use]
    pub const fn fences(self) -> (&'static str, &'static str) {
        match self {
            Self::Plain => ("", ""),
            Self::Paren => ("(", ")"),
            Self::Bracket => ("[", "]"),
            Self::Brace => ("{", "}"),
            Self::Vert => ("|", "|"),
            Self::DoubleVert => ("\u{2016}", "\u{2016}"),
        }
    }
}

/// Delimiters accepted after `\left` and `\right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
pub enum Delimiter {
    /// `(`
    #[strum(serialize = "(")]
    LeftParen,
    /// `)`
    #[strum(serialize = ")")]
    RightParen,
    /// `[`
    #[strum(to_string = "[", serialize = "\\lbrack")]
    LeftBracket,
    /// `]`
    #[strum(to_string = "]", serialize = "\\rbrack")]
    RightBracket,
    /// `\{`
    #[strum(to_string = "\\{", serialize = "\\lbrace")]
    LeftBrace,
    /// `\}`
    #[strum(to_string = "\\}", serialize = "\\rbrace")]
    RightBrace,
    /// `|`
    #[strum(
        to_string = "|",
        serialize = "\\vert",
        serialize = "\\lvert",
        serialize = "\\rvert"
    )]
    Vert,
    /// `\|`
    #[strum(
        to_string = "\\|",
        serialize = "\\Vert",
        serialize = "\\lVert",
        serialize = "\\rVert"
    )]
    DoubleVert,
    /// `\langle`
    #[strum(serialize = "\\langle")]
    LeftAngle,
    /// `\rangle`
    #[strum(serialize = "\\rangle")]
    RightAngle,
    /// `.`, the invisible delimiter.
    #[strum(serialize = ".")]
    Blank,
}

impl Delimiter {
    /// Canonical markup for the delimiter.
    #[must_use]
    pub fn latex(self) -> &'static str {
        self.into()
    }

    /// Plain-text glyph; empty for [`Delimiter::Blank`].
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Vert => "|",
            Self::DoubleVert => "\u{2016}",
            Self::LeftAngle => "\u{27e8}",
            Self::RightAngle => "\u{27e9}",
            Self::Blank => "",
        }
    }
}

/// The bracket pairs offered by the structural insert helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BracketKind {
    /// `( )`
    Paren,
    /// `[ ]`
    Square,
    /// `\{ \}`
    Curly,
    /// `| |`
    Abs,
    /// `\| \|`
    Norm,
    /// `\langle \rangle`
    Angle,
}

impl BracketKind {
    /// Opening and closing delimiter of the pair.
    #[must_use]
    pub const fn delimiters(self) -> (Delimiter, Delimiter) {
        match self {
            Self::Paren => (Delimiter::LeftParen, Delimiter::RightParen),
            Self::Square => (Delimiter::LeftBracket, Delimiter::RightBracket),
            Self::Curly => (Delimiter::LeftBrace, Delimiter::RightBrace),
            Self::Abs => (Delimiter::Vert, Delimiter::Vert),
            Self::Norm => (Delimiter::DoubleVert, Delimiter::DoubleVert),
            Self::Angle => (Delimiter::LeftAngle, Delimiter::RightAngle),
        }
    }

    /// The pair a typed character opens, if any.
    #[must_use]
    pub const fn from_opening_char(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(Self::Paren),
            '[' => Some(Self::Square),
            '{' => Some(Self::Curly),
            '|' => Some(Self::Abs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr as _;

    #[test]
    fn test_commands_parse_from_markup() {
        assert_eq!(LargeOp::from_str("\\sum"), Ok(LargeOp::Sum));
        assert_eq!(LargeOp::Lim.command(), "\\lim");
        assert!(!LargeOp::Lim.has_upper_limit());
        assert_eq!(Accent::from_str("\\vec"), Ok(Accent::Vec));
        assert_eq!(MatrixEnv::from_str("Bmatrix"), Ok(MatrixEnv::Brace));
        assert!(MatrixEnv::from_str("array").is_err());
    }

    #[test]
    fn test_delimiter_aliases_normalize() {
        assert_eq!(Delimiter::from_str("\\lbrace"), Ok(Delimiter::LeftBrace));
        assert_eq!(Delimiter::LeftBrace.latex(), "\\{");
        assert_eq!(Delimiter::from_str("\\rvert"), Ok(Delimiter::Vert));
        assert_eq!(Delimiter::Vert.latex(), "|");
    }

    #[test]
    fn test_unknown_style_is_kept() {
        let style = TextStyle::from_str("\\textcolor").unwrap_or(TextStyle::Text);
        assert_eq!(style, TextStyle::Other("\\textcolor".to_owned()));
        assert_eq!(style.command(), "\\textcolor");
        assert!(!style.is_auto_exit());
        assert!(TextStyle::Blackboard.is_auto_exit());
        assert_eq!(TextStyle::Text.mode(), Mode::Text);
    }
}
