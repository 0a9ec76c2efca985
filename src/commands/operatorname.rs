//! `\operatorname{...}`

use crate::catalog::{Catalog, CommandContext, CommandDefSpec, CommandKind, CommandPropSpec};
use crate::parser::Ast;
use crate::types::{Mode, ParseError, ParseErrorKind};

/// Registers `\operatorname`.
///
/// The argument is read in text mode and must consist of plain characters;
/// the result is a single operator-name leaf.
pub fn define_operatorname(catalog: &mut Catalog) {
    catalog.define_command(CommandDefSpec {
        kind: CommandKind::OperatorName,
        names: &["\\operatorname"],
        props: CommandPropSpec {
            num_args: 1,
            arg_mode: Some(Mode::Text),
            ..Default::default()
        },
        handler: |context: CommandContext, args, _opt_args| {
            let mut name = String::new();
            for item in args.into_iter().flatten() {
                match item {
                    Ast::Symbol(key) if !key.starts_with('\\') => name.push_str(&key),
                    Ast::Space => {}
                    _ => {
                        return Err(ParseError::with_token(
                            ParseErrorKind::ExpectedToken {
                                expected: "plain characters".to_owned(),
                                found: "a command".to_owned(),
                            },
                            &context.loc,
                        ));
                    }
                }
            }
            if name.is_empty() {
                return Err(ParseError::with_token(
                    ParseErrorKind::MissingArgument {
                        command: context.name.to_owned(),
                    },
                    &context.loc,
                ));
            }
            Ok(Ast::OperatorName {
                name,
                builtin: false,
            })
        },
    });
}
