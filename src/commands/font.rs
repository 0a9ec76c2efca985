//! Font and text-style spans

use core::str::FromStr as _;

use crate::catalog::{
    Catalog, CommandContext, CommandDefSpec, CommandKind, CommandPropSpec, TextStyle,
};
use crate::parser::Ast;
use crate::types::Mode;

/// Registers `\text` and the math font commands.
pub fn define_font(catalog: &mut Catalog) {
    catalog.define_command(CommandDefSpec {
        kind: CommandKind::TextStyle,
        names: &["\\text", "\\textrm", "\\mbox"],
        props: CommandPropSpec {
            num_args: 1,
            arg_mode: Some(Mode::Text),
            ..Default::default()
        },
        handler: |_context: CommandContext, args, _opt_args| {
            Ok(Ast::TextStyle {
                style: TextStyle::Text,
                body: args.into_iter().next().unwrap_or_default(),
            })
        },
    });

    catalog.define_command(CommandDefSpec {
        kind: CommandKind::TextStyle,
        names: &[
            "\\mathrm",
            "\\mathbf",
            "\\mathit",
            "\\mathsf",
            "\\mathtt",
            "\\mathcal",
            "\\mathbb",
            "\\mathfrak",
        ],
        props: CommandPropSpec {
            num_args: 1,
            arg_mode: Some(Mode::Math),
            ..Default::default()
        },
        handler: |context: CommandContext, args, _opt_args| {
            Ok(Ast::TextStyle {
                style: TextStyle::from_str(context.name)?,
                body: args.into_iter().next().unwrap_or_default(),
            })
        },
    });
}
