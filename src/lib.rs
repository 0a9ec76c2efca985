//! Structured editing engine for math formulas
//!
//! A formula is held as a tree of nodes and blocks rather than as a string.
//! [`MathField`] owns one such [`Document`] together with a [`Cursor`] and
//! exposes the editing surface: navigation, selection, typing, structured
//! inserts and deletion. Markup enters through the parser and leaves through
//! the serializer, so `set_latex` followed by `latex` gives back equivalent
//! markup.
//!
//! ```rust
//! use mathfield::MathField;
//!
//! let mut field = MathField::new();
//! field.set_latex(r"x^{2}+\frac12").unwrap();
//! assert_eq!(field.latex(), r"x^2+\frac{1}{2}");
//! ```
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::non_ascii_literal)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::absolute_paths)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::impl_trait_in_params)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::map_with_unused_argument_over_ranges)]
#![warn(clippy::missing_asserts_for_indexing)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
// Not sure
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::single_call_fn)]

extern crate alloc;

pub mod catalog;
pub mod commands;
pub mod cursor;
pub mod materialize;
pub mod math_field;
pub mod parser;
pub mod serializer;
pub mod tree;
pub mod types;

/// Markup to AST, with default or explicit [`Settings`].
pub use crate::parser::{parse, parse_with};

/// The editing controller. See [`math_field`] for the full surface.
pub use crate::math_field::{MathField, MathFieldError, Snapshot};

pub use crate::catalog::Catalog;
pub use crate::cursor::{Cursor, Direction, Position};
pub use crate::tree::Document;
pub use crate::types::{
    EnterDirection, Mode, ParseError, ParseErrorKind, Settings, StrictMode, TreeError,
};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
