//! Parse error handling
//!
//! [`ParseError`] carries the byte position of the offending input together
//! with a rendered excerpt that underlines it, so that the layer presenting
//! errors to users does not have to re-derive context from offsets.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use thiserror::Error;

use crate::types::SourceLocation;

/// Error produced when markup text cannot be turned into an AST.
///
/// A parse either succeeds completely or fails with one of these; there is no
/// partial result. `set_latex` relies on that to leave the document untouched
/// on failure.
///
/// # Examples
///
/// ```rust
/// use mathfield::parse;
///
/// let err = parse(r"\frac{a}").unwrap_err();
/// assert_eq!(err.position, Some(8));
/// assert!(err.to_string().contains("at end of input"));
/// ```
#[derive(Debug, Error)]
#[error("LaTeX parse error: {kind}{context}")]
pub struct ParseError {
    /// Categorised reason for the failure.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// Byte offset of the offending input, when known.
    pub position: Option<usize>,
    /// Byte length of the offending input, when known.
    pub length: Option<usize>,
    context: ParseErrorContext,
}

impl ParseError {
    /// Create a new ParseError with the given kind and no location.
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self {
            kind: Box::new(kind.into()),
            position: None,
            length: None,
            context: ParseErrorContext::None,
        }
    }

    /// Create a ParseError located at whatever `token` points to.
    pub fn with_token<T: Into<ParseErrorKind>>(kind: T, token: &dyn ErrorLocationProvider) -> Self {
        let mut error = Self::new(kind);
        if let Some(loc) = token.loc().filter(|loc| loc.start() <= loc.end()) {
            error.position = Some(loc.start());
            error.length = Some(loc.end() - loc.start());
            error.context = ParseErrorContext::Location(loc.clone());
        }
        error
    }

    /// The categorised reason for the failure.
    #[must_use]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// Describes the specific reason for a [`ParseError`].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },
    #[error("Expected '{expected}', got '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("Unexpected character: '{character}'")]
    UnexpectedCharacter { character: String },
    #[error("Expected group after '{symbol}'")]
    ExpectedGroupAfterSymbol { symbol: String },
    #[error("Missing argument for {command}")]
    MissingArgument { command: String },
    #[error("Got function '{func}' with no arguments as argument")]
    FunctionMissingArguments { func: String },
    #[error("No such environment: {name}")]
    UnknownEnvironment { name: String },
    #[error(r"Mismatched: \begin{{{begin}}} matched by \end{{{end}}}")]
    MismatchedEnvironmentEnd { begin: String, end: String },
    #[error(r"Missing \end{{{name}}}")]
    UnterminatedEnvironment { name: String },
    #[error("Invalid delimiter '{delimiter}' after '{function}'")]
    InvalidDelimiter { delimiter: String, function: String },
    #[error("Undefined control sequence: {name}")]
    UndefinedControlSequence { name: String },
    #[error("Matrix of {rows}x{cols} exceeds the maximum size of {max}")]
    MatrixTooLarge { rows: usize, cols: usize, max: usize },
    #[error("Expression nested deeper than {max} levels")]
    NestingTooDeep { max: usize },
}

#[derive(Debug)]
enum ParseErrorContext {
    None,
    Location(SourceLocation),
}

impl fmt::Display for ParseErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Location(SourceLocation { input, start, end }) => {
                let input_len = input.len();
                if *start == input_len {
                    write!(f, " at end of input: ")?;
                } else {
                    write!(f, " at position {}: ", start + 1)?;
                }

                let prefix_start = adjust_char_boundary(input, start.saturating_sub(15), false);
                if prefix_start > 0 {
                    write!(f, "\u{2026}")?;
                }
                write!(f, "{}", &input[prefix_start..*start])?;
                if end > start {
                    for c in input[*start..*end].chars() {
                        write!(f, "{c}\u{0332}")?;
                    }
                }
                let suffix_end = adjust_char_boundary(input, (*end + 15).min(input_len), true);
                if suffix_end < input_len {
                    write!(f, "{}\u{2026}", &input[*end..suffix_end])?;
                } else {
                    write!(f, "{}", &input[*end..])?;
                }
                Ok(())
            }
        }
    }
}

const fn adjust_char_boundary(input: &str, mut index: usize, forward: bool) -> usize {
    if forward {
        while index < input.len() && !input.is_char_boundary(index) {
            index += 1;
        }
    } else {
        while index > 0 && !input.is_char_boundary(index) {
            index -= 1;
        }
    }
    index
}

/// Trait for values that can point a [`ParseError`] at the input.
pub trait ErrorLocationProvider {
    /// Get the source location if available
    fn loc(&self) -> Option<&SourceLocation>;
}

impl ErrorLocationProvider for Option<SourceLocation> {
    fn loc(&self) -> Option<&SourceLocation> {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;

    #[test]
    fn test_error_without_location() {
        let error = ParseError::new(ParseErrorKind::NestingTooDeep { max: 8 });
        assert!(matches!(error.kind(), ParseErrorKind::NestingTooDeep { max: 8 }));
        assert_eq!(error.position, None);
        assert_eq!(
            error.to_string(),
            "LaTeX parse error: Expression nested deeper than 8 levels"
        );
    }

    #[test]
    fn test_error_underlines_location() {
        let input: Arc<str> = Arc::from(r"a + \frac{b}}");
        let loc = SourceLocation::new(Arc::clone(&input), 12, 13);

        let error = ParseError::with_token(
            ParseErrorKind::UnexpectedCharacter {
                character: "}".to_owned(),
            },
            &loc,
        );
        let rendered = error.to_string();
        assert!(rendered.contains("Unexpected character: '}'"));
        assert!(rendered.contains("at position 13"));
        assert!(rendered.contains("}\u{0332}"));
        assert_eq!(error.position, Some(12));
        assert_eq!(error.length, Some(1));
    }

    #[test]
    fn test_error_at_end_of_input() {
        let input: Arc<str> = Arc::from("x^");
        let loc = SourceLocation::at(Arc::clone(&input), 2);
        let error = ParseError::with_token(
            ParseErrorKind::ExpectedGroupAfterSymbol {
                symbol: "^".to_owned(),
            },
            &loc,
        );
        assert!(error.to_string().contains("at end of input: x^"));
    }

    #[test]
    fn test_long_context_is_elided() {
        let input: Arc<str> = Arc::from("abcdefghijklmnopqrstuvwxyz & abcdefghijklmnopqrstuvwxyz");
        let loc = SourceLocation::new(Arc::clone(&input), 27, 28);
        let rendered = ParseError::with_token(
            ParseErrorKind::UnexpectedCharacter {
                character: "&".to_owned(),
            },
            &loc,
        )
        .to_string();
        assert!(rendered.starts_with("LaTeX parse error: Unexpected character: '&' at position 28: \u{2026}"));
        assert!(rendered.ends_with('\u{2026}'));
    }
}
