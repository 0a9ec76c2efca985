//! Markup parser
//!
//! Turns LaTeX-like markup into a list of [`Ast`] elements. Parsing is all or
//! nothing: a call either returns the complete, normalized AST or a
//! [`ParseError`] pointing at the offending input.
//!
//! The pipeline is:
//!
//! 1. [`Scanner`] splits the input into tokens;
//! 2. [`Parser`] consumes them by recursive descent with one token of
//!    lookahead, consulting the [`Catalog`] for every command;
//! 3. [`normalize`] folds groups, whitespace and script markers into their
//!    final shape.

mod ast;
mod environment;
mod postprocess;
mod scanner;

use alloc::sync::Arc;
use core::str::FromStr as _;

pub use ast::Ast;
pub use postprocess::normalize;
pub use scanner::Scanner;

use crate::catalog::{
    Catalog, CommandContext, CommandSpec, Delimiter, UNICODE_SUBSCRIPTS, UNICODE_SUPERSCRIPTS,
};
use crate::types::{Mode, ParseError, ParseErrorKind, Settings, Token, TokenKind};

/// Parses `input` with the default [`Settings`] and the shared catalog.
///
/// ```rust
/// use mathfield::parse;
/// use mathfield::parser::Ast;
///
/// let ast = parse(r"\frac{1}{2}").unwrap();
/// assert!(matches!(ast.as_slice(), [Ast::Fraction { .. }]));
/// ```
pub fn parse(input: &str) -> Result<Vec<Ast>, ParseError> {
    parse_with(input, &Settings::default(), Catalog::shared())
}

/// Parses `input` with explicit settings and catalog.
pub fn parse_with(
    input: &str,
    settings: &Settings,
    catalog: &Catalog,
) -> Result<Vec<Ast>, ParseError> {
    Parser::new(input, settings, catalog).parse()
}

/// What ends the expression being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Eof,
    Brace,
    Bracket,
    Right,
}

impl Stop {
    const fn expected(self) -> &'static str {
        match self {
            Self::Eof => "end of input",
            Self::Brace => "'}'",
            Self::Bracket => "']'",
            Self::Right => "\\right",
        }
    }
}

/// Recursive-descent parser over one [`Scanner`].
///
/// The parser keeps a single lookahead token. Commands are resolved in this
/// order: symbols (aliases included), built-in operator names, commands
/// with handlers, and finally unknown commands, which are kept as opaque
/// tokens subject to [`Settings::strict`].
pub struct Parser<'a> {
    /// Current mode; [`Mode::Text`] keeps whitespace.
    pub mode: Mode,
    /// Configuration.
    pub settings: &'a Settings,
    /// Command registry.
    pub catalog: &'a Catalog,
    scanner: Scanner,
    next_token: Option<Token>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the whole of `input`, starting in math mode.
    #[must_use]
    pub fn new(input: &str, settings: &'a Settings, catalog: &'a Catalog) -> Self {
        Self::with_scanner(Scanner::new(Arc::from(input)), Mode::Math, 0, settings, catalog)
    }

    fn with_scanner(
        scanner: Scanner,
        mode: Mode,
        depth: usize,
        settings: &'a Settings,
        catalog: &'a Catalog,
    ) -> Self {
        Self {
            mode,
            settings,
            catalog,
            scanner,
            next_token: None,
            depth,
        }
    }

    /// Parses the entire input and normalizes the result.
    pub fn parse(&mut self) -> Result<Vec<Ast>, ParseError> {
        let body = self.parse_expression_until(Stop::Eof)?;
        Ok(normalize(body, self.mode))
    }

    /// The lookahead token, scanning it if needed.
    pub fn fetch(&mut self) -> Result<&Token, ParseError> {
        match &mut self.next_token {
            Some(next_token) => Ok(next_token),
            next_token => {
                let token = self.scanner.lex()?;
                Ok(next_token.get_or_insert(token))
            }
        }
    }

    /// Discards the lookahead token.
    pub fn consume(&mut self) {
        self.next_token = None;
    }

    /// Takes the lookahead token.
    fn next(&mut self) -> Result<Token, ParseError> {
        match self.next_token.take() {
            Some(token) => Ok(token),
            None => self.scanner.lex(),
        }
    }

    /// Consumes the character `ch` or fails with
    /// [`ParseErrorKind::ExpectedToken`].
    pub fn expect(&mut self, ch: char) -> Result<Token, ParseError> {
        let token = self.next()?;
        if token.is_char(ch) {
            return Ok(token);
        }
        if token.is_eof() {
            return Err(ParseError::with_token(
                ParseErrorKind::UnexpectedEnd {
                    expected: format!("'{ch}'"),
                },
                &token,
            ));
        }
        Err(ParseError::with_token(
            ParseErrorKind::ExpectedToken {
                expected: ch.to_string(),
                found: token.describe(),
            },
            &token,
        ))
    }

    /// Changes the mode subsequent atoms are parsed in.
    pub const fn switch_mode(&mut self, new_mode: Mode) {
        self.mode = new_mode;
    }

    /// Skips whitespace tokens.
    pub fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.fetch()?.kind == TokenKind::Space {
            self.consume();
        }
        Ok(())
    }

    /// Runs `f` one nesting level deeper, failing once
    /// [`Settings::max_nesting_depth`] is exceeded.
    fn nested<T, F>(&mut self, token: &Token, f: F) -> Result<T, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<T, ParseError>,
    {
        if self.depth >= self.settings.max_nesting_depth {
            return Err(ParseError::with_token(
                ParseErrorKind::NestingTooDeep {
                    max: self.settings.max_nesting_depth,
                },
                token,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parses atoms until the end of input.
    pub fn parse_expression(&mut self) -> Result<Vec<Ast>, ParseError> {
        self.parse_expression_until(Stop::Eof)
    }

    fn parse_expression_until(&mut self, stop: Stop) -> Result<Vec<Ast>, ParseError> {
        let mut body = Vec::new();
        loop {
            if self.mode == Mode::Math {
                self.consume_spaces()?;
            }
            if self.at_stop(stop)? {
                return Ok(body);
            }
            body.push(self.parse_atom()?);
        }
    }

    /// Whether the lookahead ends an expression that should stop at `stop`.
    /// Fails on terminators that belong to a different construct.
    fn at_stop(&mut self, stop: Stop) -> Result<bool, ParseError> {
        let token = self.fetch()?;
        let unexpected = |token: &Token| {
            ParseError::with_token(
                ParseErrorKind::UnexpectedCharacter {
                    character: token.describe(),
                },
                token,
            )
        };
        match &token.kind {
            TokenKind::Eof if stop == Stop::Eof => Ok(true),
            TokenKind::Eof => Err(ParseError::with_token(
                ParseErrorKind::UnexpectedEnd {
                    expected: stop.expected().to_owned(),
                },
                token,
            )),
            TokenKind::Char('}') if stop == Stop::Brace => Ok(true),
            TokenKind::Char('}') => Err(unexpected(token)),
            TokenKind::Char(']') => Ok(stop == Stop::Bracket),
            TokenKind::ControlWord(word) if word == "right" => {
                if stop == Stop::Right {
                    Ok(true)
                } else {
                    Err(ParseError::with_token(
                        ParseErrorKind::ExpectedToken {
                            expected: stop.expected().to_owned(),
                            found: "\\right".to_owned(),
                        },
                        token,
                    ))
                }
            }
            TokenKind::ControlWord(word) if word == "end" => Err(unexpected(token)),
            _ => Ok(false),
        }
    }

    fn parse_atom(&mut self) -> Result<Ast, ParseError> {
        let token = self.next()?;
        match &token.kind {
            TokenKind::Space => Ok(Ast::Space),
            TokenKind::Char('{') => self.nested(&token, Self::parse_group_body).map(Ast::Group),
            TokenKind::Char('^') => self.parse_argument("^", true).map(Ast::Superscript),
            TokenKind::Char('_') => self.parse_argument("_", true).map(Ast::Subscript),
            TokenKind::Char('&' | '#' | '$') | TokenKind::ControlSymbol('\\') => {
                Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedCharacter {
                        character: token.describe(),
                    },
                    &token,
                ))
            }
            TokenKind::Char(ch) => self.parse_char(*ch),
            TokenKind::ControlSymbol(ch) => self.parse_command(format!("\\{ch}"), &token),
            TokenKind::ControlWord(word) => match word.as_str() {
                "left" => self.nested(&token, Self::parse_left_right),
                "begin" => self.nested(&token, |parser| parser.parse_environment(&token)),
                _ => self.parse_command(format!("\\{word}"), &token),
            },
            TokenKind::Eof => Err(ParseError::with_token(
                ParseErrorKind::UnexpectedEnd {
                    expected: "an atom".to_owned(),
                },
                &token,
            )),
        }
    }

    /// The contents of a braced group whose `{` was just consumed.
    fn parse_group_body(&mut self) -> Result<Vec<Ast>, ParseError> {
        let body = self.parse_expression_until(Stop::Brace)?;
        self.expect('}')?;
        Ok(body)
    }

    /// A plain character, or a run of Unicode super/subscript characters.
    fn parse_char(&mut self, ch: char) -> Result<Ast, ParseError> {
        if let Some(text) = UNICODE_SUPERSCRIPTS.get(&ch) {
            return self
                .unicode_script_run(text, &UNICODE_SUPERSCRIPTS)
                .map(Ast::Superscript);
        }
        if let Some(text) = UNICODE_SUBSCRIPTS.get(&ch) {
            return self
                .unicode_script_run(text, &UNICODE_SUBSCRIPTS)
                .map(Ast::Subscript);
        }
        Ok(Ast::Symbol(self.catalog.key_for_char(ch)))
    }

    fn unicode_script_run(
        &mut self,
        first: &str,
        table: &phf::Map<char, &'static str>,
    ) -> Result<Vec<Ast>, ParseError> {
        let mut text = first.to_owned();
        loop {
            let next = match &self.fetch()?.kind {
                TokenKind::Char(ch) => table.get(ch).copied(),
                _ => None,
            };
            let Some(more) = next else {
                break;
            };
            self.consume();
            text.push_str(more);
        }
        Ok(text
            .chars()
            .map(|ch| Ast::Symbol(self.catalog.key_for_char(ch)))
            .collect())
    }

    /// Resolves a command name, backslash included.
    fn parse_command(&mut self, name: String, token: &Token) -> Result<Ast, ParseError> {
        if let Some((key, _)) = self.catalog.symbol(&name) {
            return Ok(Ast::Symbol(key.to_owned()));
        }
        if self.catalog.is_operator_name(&name) {
            return Ok(Ast::OperatorName {
                name: name[1..].to_owned(),
                builtin: true,
            });
        }
        if let Some(spec) = self.catalog.command(&name).copied() {
            return self.nested(token, |parser| parser.call_command(&name, &spec, token));
        }
        self.settings.report_unknown_command(&name, token)?;
        Ok(Ast::Unknown {
            command: name,
            argument: None,
        })
    }

    fn call_command(
        &mut self,
        name: &str,
        spec: &CommandSpec,
        token: &Token,
    ) -> Result<Ast, ParseError> {
        let outer_mode = self.mode;
        if let Some(mode) = spec.arg_mode {
            self.switch_mode(mode);
        }
        let parsed = self.parse_arguments(name, spec);
        self.switch_mode(outer_mode);
        let (args, opt_args) = parsed?;

        let context = CommandContext {
            name,
            loc: token.loc.clone(),
        };
        (spec.handler)(context, args, opt_args)
    }

    /// Parses the optional arguments of a command, then its required ones.
    pub fn parse_arguments(
        &mut self,
        name: &str,
        spec: &CommandSpec,
    ) -> Result<(Vec<Vec<Ast>>, Vec<Option<Vec<Ast>>>), ParseError> {
        let mut opt_args = Vec::with_capacity(spec.num_optional_args);
        for _ in 0..spec.num_optional_args {
            self.consume_spaces()?;
            if self.fetch()?.is_char('[') {
                let open = self.next()?;
                let body = self.nested(&open, |parser| {
                    let body = parser.parse_expression_until(Stop::Bracket)?;
                    parser.expect(']')?;
                    Ok(body)
                })?;
                opt_args.push(Some(body));
            } else {
                opt_args.push(None);
            }
        }

        let mut args = Vec::with_capacity(spec.num_args);
        for _ in 0..spec.num_args {
            args.push(self.parse_argument(name, false)?);
        }
        Ok((args, opt_args))
    }

    /// One required argument of `owner`: a braced group or a single token.
    ///
    /// Script markers report a missing argument as
    /// [`ParseErrorKind::ExpectedGroupAfterSymbol`], commands as
    /// [`ParseErrorKind::MissingArgument`].
    fn parse_argument(&mut self, owner: &str, script: bool) -> Result<Vec<Ast>, ParseError> {
        self.consume_spaces()?;
        let token = self.next()?;
        let missing = |token: &Token| {
            let kind = if script {
                ParseErrorKind::ExpectedGroupAfterSymbol {
                    symbol: owner.to_owned(),
                }
            } else {
                ParseErrorKind::MissingArgument {
                    command: owner.to_owned(),
                }
            };
            ParseError::with_token(kind, token)
        };

        match &token.kind {
            TokenKind::Char('{') => self.nested(&token, Self::parse_group_body),
            TokenKind::Eof
            | TokenKind::Space
            | TokenKind::ControlSymbol('\\')
            | TokenKind::Char('}' | ']' | '^' | '_' | '&' | '#' | '$') => Err(missing(&token)),
            TokenKind::Char(ch) => Ok(vec![self.parse_char(*ch)?]),
            TokenKind::ControlSymbol(ch) => Ok(vec![self.parse_command(format!("\\{ch}"), &token)?]),
            TokenKind::ControlWord(word) => {
                let name = format!("\\{word}");
                let structural = matches!(word.as_str(), "left" | "right" | "begin" | "end");
                if structural
                    || self
                        .catalog
                        .command(&name)
                        .is_some_and(CommandSpec::takes_arguments)
                {
                    return Err(ParseError::with_token(
                        ParseErrorKind::FunctionMissingArguments { func: name },
                        &token,
                    ));
                }
                Ok(vec![self.parse_command(name, &token)?])
            }
        }
    }

    /// `\left<delim> ... \right<delim>`, after `\left` was consumed.
    fn parse_left_right(&mut self) -> Result<Ast, ParseError> {
        let open = self.parse_delimiter("\\left")?;
        let body = self.parse_expression_until(Stop::Right)?;
        self.consume();
        let close = self.parse_delimiter("\\right")?;
        Ok(Ast::Brackets { open, close, body })
    }

    fn parse_delimiter(&mut self, function: &str) -> Result<Delimiter, ParseError> {
        self.consume_spaces()?;
        let token = self.next()?;
        let text = match &token.kind {
            TokenKind::Char(ch) => ch.to_string(),
            TokenKind::ControlSymbol(ch) => format!("\\{ch}"),
            TokenKind::ControlWord(word) => format!("\\{word}"),
            TokenKind::Space | TokenKind::Eof => {
                return Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedEnd {
                        expected: format!("a delimiter after {function}"),
                    },
                    &token,
                ));
            }
        };
        Delimiter::from_str(&text).map_err(|_| {
            ParseError::with_token(
                ParseErrorKind::InvalidDelimiter {
                    delimiter: text,
                    function: function.to_owned(),
                },
                &token,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LargeOp, MatrixEnv, TextStyle};
    use crate::tree::ScriptOrder;
    use crate::types::StrictMode;

    fn sym(key: &str) -> Ast {
        Ast::Symbol(key.to_owned())
    }

    #[test]
    fn test_symbols_and_aliases() {
        assert_eq!(
            parse(r"a \le b").unwrap(),
            vec![sym("a"), sym("\\leq"), sym("b")]
        );
        assert_eq!(parse(r"\{").unwrap(), vec![sym("\\{")]);
        assert_eq!(
            parse("\u{3b1}+1").unwrap(),
            vec![sym("\\alpha"), sym("+"), sym("1")]
        );
    }

    #[test]
    fn test_fraction_arguments() {
        let expected = vec![Ast::Fraction {
            numerator: vec![sym("1")],
            denominator: vec![sym("2")],
        }];
        assert_eq!(parse(r"\frac{1}{2}").unwrap(), expected);
        assert_eq!(parse(r"\frac12").unwrap(), expected);
        assert_eq!(parse(r"\frac 1 2").unwrap(), expected);
    }

    #[test]
    fn test_missing_argument_position() {
        let err = parse(r"\frac{a}").unwrap_err();
        assert_eq!(err.position, Some(8));
        assert!(matches!(
            err.kind(),
            ParseErrorKind::MissingArgument { command } if command == "\\frac"
        ));
        assert!(err.to_string().contains("at end of input"));
    }

    #[test]
    fn test_function_as_unbraced_argument() {
        let err = parse(r"\frac\sqrt{2}{3}").unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::FunctionMissingArguments { func } if func == "\\sqrt"
        ));
        assert!(parse(r"\frac\alpha2").is_ok());
    }

    #[test]
    fn test_optional_argument_before_required() {
        assert_eq!(
            parse(r"\sqrt[3]{x}").unwrap(),
            vec![Ast::Root {
                index: Some(vec![sym("3")]),
                radicand: vec![sym("x")],
            }]
        );
        assert_eq!(
            parse(r"\sqrt{x}[3]").unwrap(),
            vec![
                Ast::Root {
                    index: None,
                    radicand: vec![sym("x")],
                },
                sym("["),
                sym("3"),
                sym("]"),
            ]
        );
    }

    #[test]
    fn test_scripts_merge_in_written_order() {
        let parsed = parse("x^2_i").unwrap();
        assert_eq!(
            parsed,
            vec![
                sym("x"),
                Ast::Script {
                    base: None,
                    sub: Some(vec![sym("i")]),
                    sup: Some(vec![sym("2")]),
                    order: ScriptOrder::SupFirst,
                }
            ]
        );
        let Ast::Script { order, .. } = &parse("x_i^2").unwrap()[1] else {
            panic!("expected a script");
        };
        assert_eq!(*order, ScriptOrder::SubFirst);
    }

    #[test]
    fn test_script_errors() {
        let err = parse("x^").unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::ExpectedGroupAfterSymbol { symbol } if symbol == "^"
        ));
        assert!(parse("x^}").is_err());
    }

    #[test]
    fn test_unicode_scripts() {
        assert_eq!(parse("x\u{b2}").unwrap(), parse("x^2").unwrap());
        assert_eq!(parse("a\u{2081}\u{2082}").unwrap(), parse("a_{12}").unwrap());
    }

    #[test]
    fn test_large_operator_keeps_its_scripts() {
        let parsed = parse(r"\sum_{i=0}^{n} i").unwrap();
        assert!(matches!(
            &parsed[0],
            Ast::Script { base: Some(base), .. } if **base == Ast::LargeOp(LargeOp::Sum)
        ));
        assert_eq!(parse(r"\lim").unwrap(), vec![Ast::LargeOp(LargeOp::Lim)]);
    }

    #[test]
    fn test_left_right() {
        assert_eq!(
            parse(r"\left( x \right]").unwrap(),
            vec![Ast::Brackets {
                open: Delimiter::LeftParen,
                close: Delimiter::RightBracket,
                body: vec![sym("x")],
            }]
        );
        assert!(matches!(
            parse(r"\left< x \right>").unwrap_err().kind(),
            ParseErrorKind::InvalidDelimiter { .. }
        ));
        assert!(parse(r"\left( x").is_err());
        assert!(parse(r"x \right)").is_err());
    }

    #[test]
    fn test_text_mode_keeps_spaces() {
        assert_eq!(
            parse(r"\text{a b}").unwrap(),
            vec![Ast::TextStyle {
                style: TextStyle::Text,
                body: vec![sym("a"), Ast::Space, sym("b")],
            }]
        );
        assert_eq!(parse("a b").unwrap(), vec![sym("a"), sym("b")]);
    }

    #[test]
    fn test_operator_names() {
        assert_eq!(
            parse(r"\sin x").unwrap(),
            vec![
                Ast::OperatorName {
                    name: "sin".to_owned(),
                    builtin: true,
                },
                sym("x")
            ]
        );
        assert_eq!(
            parse(r"\operatorname{sgn}").unwrap(),
            vec![Ast::OperatorName {
                name: "sgn".to_owned(),
                builtin: false,
            }]
        );
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(
            parse(r"\foo").unwrap(),
            vec![Ast::Unknown {
                command: "\\foo".to_owned(),
                argument: None,
            }]
        );
        assert_eq!(
            parse(r"\foo{x}").unwrap(),
            vec![Ast::Unknown {
                command: "\\foo".to_owned(),
                argument: Some(vec![sym("x")]),
            }]
        );

        let strict = Settings::builder().strict(StrictMode::Error).build();
        let err = parse_with(r"a\foo", &strict, Catalog::shared()).unwrap_err();
        assert_eq!(err.position, Some(1));
    }

    #[test]
    fn test_matrix() {
        let parsed = parse(r"\begin{pmatrix}a&b\\c\end{pmatrix}").unwrap();
        assert_eq!(
            parsed,
            vec![Ast::Matrix {
                env: MatrixEnv::Paren,
                rows: vec![vec![vec![sym("a")], vec![sym("b")]], vec![vec![sym("c")], vec![]]],
            }]
        );
    }

    #[test]
    fn test_nesting_guard() {
        let settings = Settings::builder().max_nesting_depth(4).build();
        let deep = "{".repeat(10) + &"}".repeat(10);
        let err = parse_with(&deep, &settings, Catalog::shared()).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::NestingTooDeep { max: 4 }));
        assert!(parse_with("{{a}}", &settings, Catalog::shared()).is_ok());
    }

    #[test]
    fn test_stray_characters() {
        assert!(parse("a & b").is_err());
        assert!(parse(r"a \\ b").is_err());
        assert!(parse("$x$").is_err());
        assert!(parse("a}").is_err());
    }
}
