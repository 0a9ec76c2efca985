use bon::bon;

use crate::types::{ErrorLocationProvider, ParseError, ParseErrorKind};

/// Which of two vertically stacked blocks a horizontal move enters first.
///
/// Applies to fractions, binomials, combined scripts and large operators
/// with both limits. Composites whose blocks sit side by side (an nth root's
/// index and radicand, matrix cells) ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnterDirection {
    /// Enter the numerator, superscript or upper limit.
    #[default]
    Up,
    /// Enter the denominator, subscript or lower limit.
    Down,
}

/// How the parser reacts to commands missing from the catalog.
///
/// Unknown commands never fail a parse by default: they degrade into an
/// opaque token so that foreign markup survives a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrictMode {
    /// Accept silently.
    #[default]
    Ignore,
    /// Accept and emit a `tracing` warning.
    Warn,
    /// Reject with [`ParseErrorKind::UndefinedControlSequence`].
    Error,
}

/// Per-document configuration of the editing engine.
///
/// All fields are resolved; use [`Settings::builder`] to override only the
/// ones you care about.
///
/// ```rust
/// use mathfield::{EnterDirection, Settings};
///
/// let settings = Settings::builder()
///     .enter_direction(EnterDirection::Down)
///     .max_matrix_size(8)
///     .build();
/// assert_eq!(settings.max_matrix_size, 8);
/// assert!(settings.wrap_selection);
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    /// Block entered first when moving horizontally into a vertical composite.
    pub enter_direction: EnterDirection,
    /// Upper bound on the rows and on the columns of any matrix.
    pub max_matrix_size: usize,
    /// Maximum depth of nested groups, arguments and environments the parser
    /// accepts.
    pub max_nesting_depth: usize,
    /// Whether structural insert helpers move an active selection into the
    /// new composite's primary block instead of deleting it.
    pub wrap_selection: bool,
    /// Whether inserting a leaf over an active selection deletes the
    /// selection first.
    pub replace_selection_on_insert: bool,
    /// Reaction to unknown commands.
    pub strict: StrictMode,
}

#[bon]
impl Settings {
    /// Creates a new [`Settings`] instance from optional configuration values.
    ///
    /// # Default Values
    /// - `enter_direction`: [`EnterDirection::Up`]
    /// - `max_matrix_size`: `64`
    /// - `max_nesting_depth`: `256`
    /// - `wrap_selection`: `true`
    /// - `replace_selection_on_insert`: `true`
    /// - `strict`: [`StrictMode::Ignore`]
    #[must_use]
    #[builder]
    pub fn new(
        /// Block entered first in vertical composites.
        enter_direction: Option<EnterDirection>,
        /// Maximum rows and maximum columns of a matrix.
        max_matrix_size: Option<usize>,
        /// Parser recursion guard.
        max_nesting_depth: Option<usize>,
        /// Wrap the selection in structural inserts.
        wrap_selection: Option<bool>,
        /// Replace the selection on leaf inserts.
        replace_selection_on_insert: Option<bool>,
        /// Unknown-command policy.
        strict: Option<StrictMode>,
    ) -> Self {
        Self {
            enter_direction: enter_direction.unwrap_or_default(),
            max_matrix_size: max_matrix_size.unwrap_or(64),
            max_nesting_depth: max_nesting_depth.unwrap_or(256),
            wrap_selection: wrap_selection.unwrap_or(true),
            replace_selection_on_insert: replace_selection_on_insert.unwrap_or(true),
            strict: strict.unwrap_or_default(),
        }
    }

    /// Applies the [`StrictMode`] policy to an unknown command.
    pub fn report_unknown_command(
        &self,
        name: &str,
        token: &dyn ErrorLocationProvider,
    ) -> Result<(), ParseError> {
        match self.strict {
            StrictMode::Ignore => Ok(()),
            StrictMode::Warn => {
                tracing::warn!(
                    command = name,
                    position = token.loc().map(|loc| loc.start()),
                    "unknown command kept as opaque token"
                );
                Ok(())
            }
            StrictMode::Error => Err(ParseError::with_token(
                ParseErrorKind::UndefinedControlSequence {
                    name: name.to_owned(),
                },
                token,
            )),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}
