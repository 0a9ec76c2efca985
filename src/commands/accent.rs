//! Accents drawn over their argument

use core::str::FromStr as _;

use strum::IntoEnumIterator as _;

use crate::catalog::{
    Accent, Catalog, CommandContext, CommandDefSpec, CommandKind, CommandPropSpec,
};
use crate::parser::Ast;

const NAMES: &[&str] = &[
    "\\hat",
    "\\bar",
    "\\vec",
    "\\dot",
    "\\ddot",
    "\\tilde",
    "\\check",
    "\\breve",
    "\\acute",
    "\\grave",
    "\\overline",
];

/// Registers every [`Accent`] command.
pub fn define_accent(catalog: &mut Catalog) {
    debug_assert_eq!(NAMES.len(), Accent::iter().count());
    catalog.define_command(CommandDefSpec {
        kind: CommandKind::Accent,
        names: NAMES,
        props: CommandPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: CommandContext, args, _opt_args| {
            let accent = Accent::from_str(context.name)?;
            Ok(Ast::Accent {
                accent,
                body: args.into_iter().next().unwrap_or_default(),
            })
        },
    });
}
