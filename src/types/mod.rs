//! Core type definitions shared by the parser, the tree and the cursor

use rapidhash::{RapidHashMap, RapidHashSet};
use strum::{AsRefStr, Display, EnumString};

mod source_location;
pub use source_location::SourceLocation;

mod parse_error;
pub use parse_error::{ErrorLocationProvider, ParseError, ParseErrorKind};

mod tree_error;
pub use tree_error::TreeError;

mod tokens;
pub use tokens::{Token, TokenKind};

mod settings;
pub use settings::{EnterDirection, Settings, StrictMode};

/// Make it easier to switch between different hash backends.
pub type KeyMap<K, V> = RapidHashMap<K, V>;
/// Alias for the default hash set.
pub type KeySet<K> = RapidHashSet<K>;

/// Lexical mode of a run of markup.
///
/// Whitespace is insignificant in math mode and preserved in text mode
/// (inside `\text{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Math mode.
    #[default]
    Math,
    /// Text mode.
    Text,
}
