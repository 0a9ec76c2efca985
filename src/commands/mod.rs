//! Command families of the catalog
//!
//! Each submodule registers one family of commands through
//! [`Catalog::define_command`], pairing the argument shape of every name
//! with the handler that turns its parsed arguments into an [`Ast`]
//! element. Symbols, operator names and environments carry no handler and
//! are registered straight from the static tables.
//!
//! [`Ast`]: crate::parser::Ast

mod accent;
mod font;
mod frac;
mod op;
mod operatorname;
mod sqrt;

use strum::IntoEnumIterator as _;

use crate::catalog::{Catalog, MatrixEnv, OPERATOR_NAMES, SYMBOL_ALIASES, SYMBOLS};

/// Registers every built-in command, symbol and environment.
pub fn define_all(catalog: &mut Catalog) {
    define_symbols(catalog);
    define_environments(catalog);
    frac::define_frac(catalog);
    sqrt::define_sqrt(catalog);
    accent::define_accent(catalog);
    font::define_font(catalog);
    operatorname::define_operatorname(catalog);
    op::define_op(catalog);
}

fn define_symbols(catalog: &mut Catalog) {
    // phf iteration order is arbitrary; register ASCII keys first so that a
    // plain character always owns its glyph over a command spelling it.
    let (plain, commands): (Vec<_>, Vec<_>) =
        SYMBOLS.entries().partition(|(key, _)| !key.starts_with('\\'));
    for (key, def) in plain.into_iter().chain(commands) {
        catalog.define_symbol(key, *def);
    }
    for (alias, target) in &SYMBOL_ALIASES {
        catalog.define_alias(alias, target);
    }
    for name in &OPERATOR_NAMES {
        catalog.define_operator_name(name);
    }
}

fn define_environments(catalog: &mut Catalog) {
    for env in MatrixEnv::iter() {
        catalog.define_environment(env);
    }
}
