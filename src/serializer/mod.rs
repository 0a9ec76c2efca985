//! Output of a [`Document`](crate::tree::Document)
//!
//! Two projections are provided:
//!
//! - [`latex`] writes markup that the parser reads back into an equivalent
//!   tree;
//! - [`text`] writes a plain-text rendering for accessibility and
//!   clipboard use. It is not meant to be parsed again.

mod latex;
mod text;

pub use latex::{block_latex, latex, nodes_latex};
pub use text::{block_text, text};
