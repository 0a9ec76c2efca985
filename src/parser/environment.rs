//! `\begin{..} ... \end{..}` matrix environments
//!
//! The body is first split into cells by scanning tokens: `&` ends a cell and
//! `\\` ends a row, but only outside braces and outside nested environments.
//! Each cell is then parsed by its own [`Parser`] over the byte range of that
//! cell, so error positions stay relative to the whole input.

use alloc::sync::Arc;

use super::{Ast, Parser, Scanner, Stop};
use crate::types::{ParseError, ParseErrorKind, Token, TokenKind};

type CellRange = (usize, usize);

impl Parser<'_> {
    /// Parses an environment whose `\begin` token was just consumed.
    pub(super) fn parse_environment(&mut self, begin: &Token) -> Result<Ast, ParseError> {
        let (name, body_start) = self.parse_environment_name()?;
        let Some(env) = self.catalog.environment(&name) else {
            return Err(ParseError::with_token(
                ParseErrorKind::UnknownEnvironment { name },
                begin,
            ));
        };

        let mut ranges = self.split_cells(&name, body_start, begin)?;
        if ranges.len() > 1 && ranges.last().is_some_and(|row| self.is_blank_row(row)) {
            ranges.pop();
        }

        let row_count = ranges.len();
        let col_count = ranges.iter().map(Vec::len).max().unwrap_or(1);
        let max = self.settings.max_matrix_size;
        if row_count > max || col_count > max {
            return Err(ParseError::with_token(
                ParseErrorKind::MatrixTooLarge {
                    rows: row_count,
                    cols: col_count,
                    max,
                },
                begin,
            ));
        }

        let mut rows = Vec::with_capacity(row_count);
        for row in ranges {
            let mut cells = Vec::with_capacity(col_count);
            for (start, end) in row {
                cells.push(self.parse_cell(start, end)?);
            }
            cells.resize_with(col_count, Vec::new);
            rows.push(cells);
        }
        Ok(Ast::Matrix { env, rows })
    }

    /// Reads `{name}` and returns the name with the byte offset just past the
    /// closing brace.
    fn parse_environment_name(&mut self) -> Result<(String, usize), ParseError> {
        self.consume_spaces()?;
        self.expect('{')?;
        let mut name = String::new();
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Char('}') if !name.is_empty() => return Ok((name, token.loc.end())),
                TokenKind::Char(ch) if ch.is_ascii_alphabetic() || ch == '*' => name.push(ch),
                TokenKind::Eof => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnexpectedEnd {
                            expected: "an environment name".to_owned(),
                        },
                        &token,
                    ));
                }
                _ => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::ExpectedToken {
                            expected: "an environment name".to_owned(),
                            found: token.describe(),
                        },
                        &token,
                    ));
                }
            }
        }
    }

    /// Scans up to the matching `\end{name}` and returns the byte ranges of
    /// the cells, row by row.
    fn split_cells(
        &mut self,
        name: &str,
        body_start: usize,
        begin: &Token,
    ) -> Result<Vec<Vec<CellRange>>, ParseError> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut cell_start = body_start;
        let mut braces = 0usize;
        let mut nested = 0usize;

        loop {
            let token = self.next()?;
            let top_level = braces == 0 && nested == 0;
            match &token.kind {
                TokenKind::Eof => {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnterminatedEnvironment {
                            name: name.to_owned(),
                        },
                        begin,
                    ));
                }
                TokenKind::Char('{') => braces += 1,
                TokenKind::Char('}') => braces = braces.saturating_sub(1),
                TokenKind::ControlWord(word) if word == "begin" => nested += 1,
                TokenKind::ControlWord(word) if word == "end" && nested > 0 => nested -= 1,
                TokenKind::ControlWord(word) if word == "end" => {
                    row.push((cell_start, token.loc.start()));
                    rows.push(row);
                    let (end_name, _) = self.parse_environment_name()?;
                    if end_name != name {
                        return Err(ParseError::with_token(
                            ParseErrorKind::MismatchedEnvironmentEnd {
                                begin: name.to_owned(),
                                end: end_name,
                            },
                            &token,
                        ));
                    }
                    return Ok(rows);
                }
                TokenKind::Char('&') if top_level => {
                    row.push((cell_start, token.loc.start()));
                    cell_start = token.loc.end();
                }
                TokenKind::ControlSymbol('\\') if top_level => {
                    row.push((cell_start, token.loc.start()));
                    rows.push(core::mem::take(&mut row));
                    cell_start = token.loc.end();
                }
                _ => {}
            }
        }
    }

    /// Whether a row is one cell holding nothing but whitespace, as left by a
    /// trailing `\\`.
    fn is_blank_row(&self, row: &[CellRange]) -> bool {
        let [(start, end)] = row else {
            return false;
        };
        let mut scanner = Scanner::with_range(Arc::clone(self.scanner.input()), *start, *end);
        loop {
            match scanner.lex() {
                Ok(token) if token.is_eof() => return true,
                Ok(token) if token.kind == TokenKind::Space => {}
                _ => return false,
            }
        }
    }

    /// Parses one cell with a fresh parser over its byte range. The result
    /// is left raw; the caller normalizes the whole tree.
    fn parse_cell(&self, start: usize, end: usize) -> Result<Vec<Ast>, ParseError> {
        let scanner = Scanner::with_range(Arc::clone(self.scanner.input()), start, end);
        let mut cell = Parser::with_scanner(scanner, self.mode, self.depth, self.settings, self.catalog);
        cell.parse_expression_until(Stop::Eof)
    }
}
