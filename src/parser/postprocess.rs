//! Normalization of raw parser output
//!
//! - whitespace disappears in math mode and collapses to one space in text
//!   mode;
//! - a non-empty braced group directly after an unknown command becomes its
//!   argument, any other group is spliced into the surrounding list;
//! - `^` and `_` markers become one [`Ast::Script`]; a subscript and a
//!   superscript written back to back share one script, and a script
//!   directly after a large operator takes the operator as its base;
//! - empty limits of large operators are dropped.
//!
//! An empty group is not kept, but it still separates what surrounds it: in
//! `\sum{}^2` the superscript is not a limit, and in `x^2{}_3` the two
//! scripts stay apart.

use crate::parser::Ast;
use crate::tree::ScriptOrder;
use crate::types::Mode;

/// Normalizes a raw list parsed in `mode`, recursing into every child list.
#[must_use]
pub fn normalize(list: Vec<Ast>, mode: Mode) -> Vec<Ast> {
    let mut out: Vec<Ast> = Vec::with_capacity(list.len());
    let mut barrier = false;

    for item in list {
        match item {
            Ast::Space => {
                if mode == Mode::Math || matches!(out.last(), Some(Ast::Space)) {
                    continue;
                }
                out.push(Ast::Space);
            }
            Ast::Group(body) => {
                let body = normalize(body, mode);
                if body.is_empty() {
                    barrier = true;
                    continue;
                }
                if !barrier
                    && let Some(Ast::Unknown { argument, .. }) = out.last_mut()
                    && argument.is_none()
                {
                    *argument = Some(body);
                    continue;
                }
                for element in body {
                    if element == Ast::Space && matches!(out.last(), Some(Ast::Space)) {
                        continue;
                    }
                    out.push(element);
                }
            }
            Ast::Superscript(body) => {
                merge_script(&mut out, barrier, None, Some(normalize(body, mode)));
            }
            Ast::Subscript(body) => {
                merge_script(&mut out, barrier, Some(normalize(body, mode)), None);
            }
            other => out.push(normalize_children(other, mode)),
        }
        barrier = false;
    }

    out.into_iter().map(finish_large_op).collect()
}

/// Attaches a script to the end of `out`.
fn merge_script(
    out: &mut Vec<Ast>,
    barrier: bool,
    sub: Option<Vec<Ast>>,
    sup: Option<Vec<Ast>>,
) {
    if !barrier
        && let Some(Ast::Script {
            sub: prev_sub,
            sup: prev_sup,
            ..
        }) = out.last_mut()
    {
        if sub.is_some() && prev_sub.is_none() && prev_sup.is_some() {
            *prev_sub = sub;
            return;
        }
        if sup.is_some() && prev_sup.is_none() && prev_sub.is_some() {
            *prev_sup = sup;
            return;
        }
    }

    let base = match out.last() {
        Some(Ast::LargeOp(_)) if !barrier => out.pop().map(Box::new),
        _ => None,
    };
    let order = if sup.is_some() {
        ScriptOrder::SupFirst
    } else {
        ScriptOrder::SubFirst
    };
    out.push(Ast::Script {
        base,
        sub,
        sup,
        order,
    });
}

fn normalize_children(item: Ast, mode: Mode) -> Ast {
    match item {
        Ast::Unknown { command, argument } => Ast::Unknown {
            command,
            argument: argument.map(|body| normalize(body, mode)),
        },
        Ast::Fraction {
            numerator,
            denominator,
        } => Ast::Fraction {
            numerator: normalize(numerator, mode),
            denominator: normalize(denominator, mode),
        },
        Ast::Binomial { top, bottom } => Ast::Binomial {
            top: normalize(top, mode),
            bottom: normalize(bottom, mode),
        },
        Ast::Root { index, radicand } => Ast::Root {
            index: index
                .map(|index| normalize(index, mode))
                .filter(|index| !index.is_empty()),
            radicand: normalize(radicand, mode),
        },
        Ast::Brackets { open, close, body } => Ast::Brackets {
            open,
            close,
            body: normalize(body, mode),
        },
        Ast::Accent { accent, body } => Ast::Accent {
            accent,
            body: normalize(body, mode),
        },
        Ast::TextStyle { style, body } => {
            let inner = style.mode();
            Ast::TextStyle {
                style,
                body: normalize(body, inner),
            }
        }
        Ast::Matrix { env, rows } => Ast::Matrix {
            env,
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| normalize(cell, mode)).collect())
                .collect(),
        },
        other => other,
    }
}

/// Drops empty limits of a large operator; an operator left without limits
/// is the bare operator again.
fn finish_large_op(item: Ast) -> Ast {
    let Ast::Script {
        base: Some(base),
        sub,
        sup,
        order,
    } = item
    else {
        return item;
    };
    if !base.is_large_op() {
        return Ast::Script {
            base: Some(base),
            sub,
            sup,
            order,
        };
    }

    let sub = sub.filter(|limit| !limit.is_empty());
    let sup = sup.filter(|limit| !limit.is_empty());
    let order = match (&sub, &sup) {
        (None, None) => return *base,
        (None, Some(_)) => ScriptOrder::SupFirst,
        (Some(_), None) => ScriptOrder::SubFirst,
        (Some(_), Some(_)) => order,
    };
    Ast::Script {
        base: Some(base),
        sub,
        sup,
        order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LargeOp;
    use crate::parser::parse;

    fn sym(key: &str) -> Ast {
        Ast::Symbol(key.to_owned())
    }

    #[test]
    fn test_groups_are_spliced() {
        assert_eq!(parse("{a{b}}c").unwrap(), vec![sym("a"), sym("b"), sym("c")]);
        assert_eq!(parse("{}").unwrap(), vec![]);
    }

    #[test]
    fn test_empty_group_separates_scripts() {
        let script = |sub: Option<&str>, sup: Option<&str>| Ast::Script {
            base: None,
            sub: sub.map(|key| vec![sym(key)]),
            sup: sup.map(|key| vec![sym(key)]),
            order: if sup.is_some() {
                ScriptOrder::SupFirst
            } else {
                ScriptOrder::SubFirst
            },
        };
        assert_eq!(parse("x{}^2").unwrap(), parse("x^2").unwrap());
        assert_eq!(
            parse(r"\sum{}^2").unwrap(),
            vec![Ast::LargeOp(LargeOp::Sum), script(None, Some("2"))]
        );
        assert_eq!(
            parse("x^2{}_3").unwrap(),
            vec![sym("x"), script(None, Some("2")), script(Some("3"), None)]
        );
    }

    #[test]
    fn test_empty_group_is_not_an_argument() {
        let opaque = Ast::Unknown {
            command: "\\foo".to_owned(),
            argument: None,
        };
        assert_eq!(parse(r"\foo{}").unwrap(), vec![opaque.clone()]);
        assert_eq!(parse(r"\foo{}x").unwrap(), vec![opaque.clone(), sym("x")]);
        assert_eq!(parse(r"\foo{}{x}").unwrap(), vec![opaque, sym("x")]);
    }

    #[test]
    fn test_script_without_base() {
        let parsed = parse("^2").unwrap();
        assert!(matches!(&parsed[0], Ast::Script { base: None, .. }));
        let parsed = parse("x^2^3").unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(matches!(&parsed[1], Ast::Script { base: None, .. }));
    }

    #[test]
    fn test_text_spaces_collapse() {
        let raw = vec![Ast::Space, Ast::Group(vec![Ast::Space, sym("a")]), Ast::Space];
        assert_eq!(
            normalize(raw.clone(), Mode::Text),
            vec![Ast::Space, sym("a"), Ast::Space]
        );
        assert_eq!(normalize(raw, Mode::Math), vec![sym("a")]);
    }

    #[test]
    fn test_empty_large_op_limits_are_dropped() {
        assert_eq!(parse(r"\sum_{}^{}").unwrap(), vec![Ast::LargeOp(LargeOp::Sum)]);
        assert_eq!(
            parse(r"\sum_{}^{n}").unwrap(),
            vec![Ast::Script {
                base: Some(Box::new(Ast::LargeOp(LargeOp::Sum))),
                sub: None,
                sup: Some(vec![sym("n")]),
                order: ScriptOrder::SupFirst,
            }]
        );
    }

    #[test]
    fn test_empty_root_index_is_dropped() {
        assert_eq!(parse(r"\sqrt[{}]{x}").unwrap(), parse(r"\sqrt{x}").unwrap());
    }
}
