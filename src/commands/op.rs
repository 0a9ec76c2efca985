//! Large operators
//!
//! The commands take no arguments; limits are ordinary scripts that the
//! post-processing pass attaches to the operator.

use core::str::FromStr as _;

use crate::catalog::{
    Catalog, CommandContext, CommandDefSpec, CommandKind, CommandPropSpec, LargeOp,
};
use crate::parser::Ast;

/// Registers every [`LargeOp`].
pub fn define_op(catalog: &mut Catalog) {
    catalog.define_command(CommandDefSpec {
        kind: CommandKind::LargeOperator,
        names: &[
            "\\sum",
            "\\prod",
            "\\coprod",
            "\\int",
            "\\iint",
            "\\iiint",
            "\\oint",
            "\\bigcup",
            "\\bigcap",
            "\\bigvee",
            "\\bigwedge",
            "\\bigoplus",
            "\\bigotimes",
            "\\lim",
        ],
        props: CommandPropSpec::default(),
        handler: |context: CommandContext, _args, _opt_args| {
            Ok(Ast::LargeOp(LargeOp::from_str(context.name)?))
        },
    });
}
