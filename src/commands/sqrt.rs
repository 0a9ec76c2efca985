//! `\sqrt` with its optional index

use crate::catalog::{Catalog, CommandContext, CommandDefSpec, CommandKind, CommandPropSpec};
use crate::parser::Ast;

/// Registers the `\sqrt` command.
pub fn define_sqrt(catalog: &mut Catalog) {
    catalog.define_command(CommandDefSpec {
        kind: CommandKind::Root,
        names: &["\\sqrt"],
        props: CommandPropSpec {
            num_args: 1,
            num_optional_args: 1,
            ..Default::default()
        },
        handler: |_context: CommandContext, args, opt_args| {
            let radicand = args.into_iter().next().unwrap_or_default();
            // `\sqrt[]{x}` is a square root.
            let index = opt_args.into_iter().next().flatten().filter(|index| !index.is_empty());
            Ok(Ast::Root { index, radicand })
        },
    });
}
