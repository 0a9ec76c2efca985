//! `\frac` and `\binom`

use crate::catalog::{Catalog, CommandContext, CommandDefSpec, CommandKind, CommandPropSpec};
use crate::parser::Ast;

/// Registers `\frac`, `\dfrac`, `\tfrac` and `\binom`.
pub fn define_frac(catalog: &mut Catalog) {
    catalog.define_command(CommandDefSpec {
        kind: CommandKind::Fraction,
        names: &["\\frac", "\\dfrac", "\\tfrac"],
        props: CommandPropSpec {
            num_args: 2,
            ..Default::default()
        },
        handler: |_context: CommandContext, args, _opt_args| {
            let mut args = args.into_iter();
            Ok(Ast::Fraction {
                numerator: args.next().unwrap_or_default(),
                denominator: args.next().unwrap_or_default(),
            })
        },
    });

    catalog.define_command(CommandDefSpec {
        kind: CommandKind::Binomial,
        names: &["\\binom", "\\dbinom", "\\tbinom"],
        props: CommandPropSpec {
            num_args: 2,
            ..Default::default()
        },
        handler: |_context: CommandContext, args, _opt_args| {
            let mut args = args.into_iter();
            Ok(Ast::Binomial {
                top: args.next().unwrap_or_default(),
                bottom: args.next().unwrap_or_default(),
            })
        },
    });
}
