//! Tokenizer over a range of markup text
//!
//! The scanner produces one [`Token`] at a time and can be started over any
//! byte range of the input, which is how matrix cells are parsed: every cell
//! gets its own scanner over the same shared buffer, so offsets in tokens and
//! errors stay relative to the whole input.
//!
//! `%` starts a comment running to the end of the line; comments produce no
//! tokens. A control word swallows the whitespace that follows it.

use alloc::sync::Arc;

use crate::types::{ParseError, ParseErrorKind, SourceLocation, Token, TokenKind};

fn match_space(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|c| matches!(c, ' ' | '\r' | '\n' | '\t'))
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(len)
}

fn match_comment(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('%')?;
    let body = rest.find('\n').map_or(rest.len(), |newline| newline + 1);
    Some(1 + body)
}

fn match_control_word(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let len = rest.chars().take_while(char::is_ascii_alphabetic).count();
    (len > 0).then_some(1 + len)
}

/// Splits markup into tokens.
#[derive(Debug, Clone)]
pub struct Scanner {
    input: Arc<str>,
    pos: usize,
    end: usize,
}

impl Scanner {
    /// Scans all of `input`.
    #[must_use]
    pub fn new(input: Arc<str>) -> Self {
        let end = input.len();
        Self { input, pos: 0, end }
    }

    /// Scans `input[start..end]`.
    #[must_use]
    pub fn with_range(input: Arc<str>, start: usize, end: usize) -> Self {
        let end = end.min(input.len());
        Self {
            input,
            pos: start.min(end),
            end,
        }
    }

    /// The shared input buffer.
    #[must_use]
    pub fn input(&self) -> &Arc<str> {
        &self.input
    }

    /// Byte offset of the next unscanned character.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    fn loc(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(Arc::clone(&self.input), start, end)
    }

    /// Scans the next token. Returns [`TokenKind::Eof`] forever once the end
    /// of the range is reached.
    pub fn lex(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.pos;
            let rest = &self.input[start..self.end];
            if rest.is_empty() {
                return Ok(Token::new(TokenKind::Eof, self.loc(start, start)));
            }
            if let Some(len) = match_comment(rest) {
                self.pos += len;
                continue;
            }
            if let Some(len) = match_space(rest) {
                self.pos += len;
                return Ok(Token::new(TokenKind::Space, self.loc(start, self.pos)));
            }
            if let Some(len) = match_control_word(rest) {
                let word = rest[1..len].to_owned();
                let trailing = match_space(&rest[len..]).unwrap_or(0);
                self.pos += len + trailing;
                return Ok(Token::new(
                    TokenKind::ControlWord(word),
                    self.loc(start, self.pos),
                ));
            }

            let mut chars = rest.chars();
            let first = chars.next().unwrap_or_default();
            if first == '\\' {
                let Some(symbol) = chars.next() else {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnexpectedEnd {
                            expected: "a command name after '\\'".to_owned(),
                        },
                        &self.loc(start, start + 1),
                    ));
                };
                self.pos += 1 + symbol.len_utf8();
                return Ok(Token::new(
                    TokenKind::ControlSymbol(symbol),
                    self.loc(start, self.pos),
                ));
            }
            self.pos += first.len_utf8();
            return Ok(Token::new(TokenKind::Char(first), self.loc(start, self.pos)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(Arc::from(input));
        let mut out = Vec::new();
        loop {
            let token = scanner.lex().unwrap();
            if token.is_eof() {
                return out;
            }
            out.push(token.kind);
        }
    }

    #[test]
    fn test_control_words_swallow_spaces() {
        assert_eq!(
            kinds(r"\alpha  x"),
            vec![
                TokenKind::ControlWord("alpha".to_owned()),
                TokenKind::Char('x')
            ]
        );
        assert_eq!(
            kinds(r"\,\{a"),
            vec![
                TokenKind::ControlSymbol(','),
                TokenKind::ControlSymbol('{'),
                TokenKind::Char('a')
            ]
        );
    }

    #[test]
    fn test_spaces_collapse_and_comments_vanish() {
        assert_eq!(
            kinds("a \n\t b % note\nc%"),
            vec![
                TokenKind::Char('a'),
                TokenKind::Space,
                TokenKind::Char('b'),
                TokenKind::Space,
                TokenKind::Char('c')
            ]
        );
    }

    #[test]
    fn test_trailing_backslash_is_an_error() {
        let mut scanner = Scanner::new(Arc::from("x\\"));
        assert!(scanner.lex().is_ok());
        let err = scanner.lex().unwrap_err();
        assert_eq!(err.position, Some(1));
    }

    #[test]
    fn test_range_keeps_global_offsets() {
        let input: Arc<str> = Arc::from("ab&cd");
        let mut scanner = Scanner::with_range(Arc::clone(&input), 3, 5);
        let token = scanner.lex().unwrap();
        assert_eq!(token.kind, TokenKind::Char('c'));
        assert_eq!(token.loc.start(), 3);
        assert!(scanner.lex().is_ok());
        let eof = scanner.lex().unwrap();
        assert!(eof.is_eof());
        assert_eq!(eof.loc.start(), 5);
    }
}
