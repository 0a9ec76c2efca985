use alloc::string::String;

use crate::types::{ErrorLocationProvider, SourceLocation};

/// Category of a scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of whitespace, collapsed to one marker.
    Space,
    /// `\` followed by one or more ASCII letters, without the backslash.
    ControlWord(String),
    /// `\` followed by a single non-letter character.
    ControlSymbol(char),
    /// Any other single character.
    Char(char),
    /// End of the scanned range.
    Eof,
}

/// A single token of markup text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was scanned.
    pub kind: TokenKind,
    /// Where it was scanned. For control words this covers the trailing
    /// whitespace swallowed after the name.
    pub loc: SourceLocation,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, loc: SourceLocation) -> Self {
        Self { kind, loc }
    }

    /// Whether the token ends the scanned range.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Whether the token is the given plain character.
    #[must_use]
    pub fn is_char(&self, ch: char) -> bool {
        self.kind == TokenKind::Char(ch)
    }

    /// Whether the token is the control word `\name`.
    #[must_use]
    pub fn is_control_word(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::ControlWord(word) if word == name)
    }

    /// The token as it would be written back, used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Space => " ".to_owned(),
            TokenKind::ControlWord(word) => format!("\\{word}"),
            TokenKind::ControlSymbol(ch) => format!("\\{ch}"),
            TokenKind::Char(ch) => ch.to_string(),
            TokenKind::Eof => "EOF".to_owned(),
        }
    }
}

impl ErrorLocationProvider for Token {
    fn loc(&self) -> Option<&SourceLocation> {
        Some(&self.loc)
    }
}
