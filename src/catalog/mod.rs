//! The command catalog
//!
//! [`Catalog`] is the registry the parser consults for every backslash
//! command: which names are symbols (and what they degrade into), which are
//! operator names, which take arguments and how many, and which environments
//! produce matrices. It is filled by the `define_*` functions in
//! [`crate::commands`], one per command family.
//!
//! The set of names, arities, optional-argument counts and degradation
//! targets is the persisted schema of the markup; bump
//! [`COMMAND_TABLE_VERSION`] whenever it changes.

mod symbols;
mod types;

use std::sync::OnceLock;

pub use symbols::{
    OPERATOR_NAMES, SYMBOL_ALIASES, SYMBOLS, UNICODE_SUBSCRIPTS, UNICODE_SUPERSCRIPTS,
};
pub use types::{
    Accent, BracketKind, Delimiter, LargeOp, MatrixEnv, SymbolClass, SymbolDef, TextStyle,
};

use crate::commands;
use crate::parser::Ast;
use crate::tree::Symbol;
use crate::types::{KeyMap, KeySet, Mode, ParseError, SourceLocation};

/// Characters with a structural meaning in markup. A symbol keyed by one of
/// these bare would not read back as that symbol.
#[must_use]
pub const fn is_reserved_char(ch: char) -> bool {
    matches!(ch, '{' | '}' | '^' | '_' | '&' | '#' | '$' | '%' | '\\')
}

/// Version of the command table.
pub const COMMAND_TABLE_VERSION: u32 = 1;

/// Family a registered command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CommandKind {
    /// `\sum`, `\lim`, ...
    LargeOperator,
    /// `\frac`
    Fraction,
    /// `\binom`
    Binomial,
    /// `\sqrt`
    Root,
    /// `\hat`, ...
    Accent,
    /// `\mathbb`, `\text`, ...
    TextStyle,
    /// `\operatorname`
    OperatorName,
}

/// What a handler gets to know about the command being parsed.
#[derive(Debug, Clone)]
pub struct CommandContext<'a> {
    /// The command, backslash included.
    pub name: &'a str,
    /// Where it was written.
    pub loc: SourceLocation,
}

/// Builds the AST of a command from its parsed arguments.
pub type CommandHandler = fn(
    context: CommandContext<'_>,
    args: Vec<Vec<Ast>>,
    opt_args: Vec<Option<Vec<Ast>>>,
) -> Result<Ast, ParseError>;

/// Argument shape of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandPropSpec {
    /// Required arguments, each a braced group or a single token.
    pub num_args: usize,
    /// Optional bracketed arguments, parsed before the required ones.
    pub num_optional_args: usize,
    /// Mode the arguments are parsed in; `None` inherits the caller's.
    pub arg_mode: Option<Mode>,
}

/// Input to [`Catalog::define_command`].
#[derive(Debug, Clone, Copy)]
pub struct CommandDefSpec {
    /// Family.
    pub kind: CommandKind,
    /// Every name the definition registers, backslash included.
    pub names: &'static [&'static str],
    /// Argument shape.
    pub props: CommandPropSpec,
    /// AST builder.
    pub handler: CommandHandler,
}

/// A registered command.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Family.
    pub kind: CommandKind,
    /// Required arguments.
    pub num_args: usize,
    /// Optional arguments.
    pub num_optional_args: usize,
    /// Argument mode override.
    pub arg_mode: Option<Mode>,
    /// AST builder.
    pub handler: CommandHandler,
}

impl CommandSpec {
    /// Whether the command consumes anything after its name.
    #[must_use]
    pub const fn takes_arguments(&self) -> bool {
        self.num_args > 0 || self.num_optional_args > 0
    }
}

/// Registry of commands, symbols and environments.
///
/// Build one with [`Catalog::default`], or share the process-wide instance
/// from [`Catalog::shared`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Commands taking arguments or producing composites.
    pub commands: KeyMap<&'static str, CommandSpec>,
    /// Symbols by canonical key.
    pub symbols: KeyMap<&'static str, SymbolDef>,
    /// Alternative spellings of symbols.
    pub aliases: KeyMap<&'static str, &'static str>,
    /// Built-in operator names, backslash included.
    pub operator_names: KeySet<&'static str>,
    /// Matrix environments by name.
    pub environments: KeyMap<&'static str, MatrixEnv>,
    glyphs: KeyMap<&'static str, &'static str>,
}

static SHARED: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The full built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        commands::define_all(&mut catalog);
        catalog
    }

    /// Process-wide built-in catalog, built on first use. It is never
    /// mutated afterwards.
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::builtin)
    }

    /// Registers a command under each of its names.
    pub fn define_command(&mut self, spec: CommandDefSpec) {
        let data = CommandSpec {
            kind: spec.kind,
            num_args: spec.props.num_args,
            num_optional_args: spec.props.num_optional_args,
            arg_mode: spec.props.arg_mode,
            handler: spec.handler,
        };
        for name in spec.names {
            self.commands.insert(name, data);
        }
    }

    /// Registers a symbol. The first symbol registered for a glyph owns the
    /// reverse mapping used for typed and pasted characters; spacing symbols
    /// never do.
    pub fn define_symbol(&mut self, key: &'static str, def: SymbolDef) {
        if def.class != SymbolClass::Spacing && !def.glyph.is_empty() {
            self.glyphs.entry(def.glyph).or_insert(key);
        }
        self.symbols.insert(key, def);
    }

    /// Registers an alternative spelling of an existing symbol.
    pub fn define_alias(&mut self, alias: &'static str, target: &'static str) {
        self.aliases.insert(alias, target);
    }

    /// Registers a built-in operator name.
    pub fn define_operator_name(&mut self, name: &'static str) {
        self.operator_names.insert(name);
    }

    /// Registers a matrix environment.
    pub fn define_environment(&mut self, env: MatrixEnv) {
        self.environments.insert(env.name(), env);
    }

    /// Looks a command up.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Looks a symbol up by key or alias, returning the canonical key.
    #[must_use]
    pub fn symbol(&self, name: &str) -> Option<(&'static str, &SymbolDef)> {
        let key = self.aliases.get(name).copied().or_else(|| {
            self.symbols
                .get_key_value(name)
                .map(|(key, _)| *key)
        })?;
        self.symbols.get(key).map(|def| (key, def))
    }

    /// Whether `name` is a built-in operator name such as `\sin`.
    #[must_use]
    pub fn is_operator_name(&self, name: &str) -> bool {
        self.operator_names.contains(name)
    }

    /// Looks a matrix environment up.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<MatrixEnv> {
        self.environments.get(name).copied()
    }

    /// The symbol key a character of input or typing stands for.
    ///
    /// Letters and digits are themselves; other characters resolve first as
    /// a key (`+`), then by glyph (`≤` becomes `\leq`, `{` becomes `\{`), and
    /// are otherwise kept as they are.
    #[must_use]
    pub fn key_for_char(&self, ch: char) -> String {
        if ch.is_ascii_alphanumeric() {
            return ch.to_string();
        }
        let mut buf = [0; 4];
        let text: &str = ch.encode_utf8(&mut buf);
        if let Some((key, _)) = self.symbol(text) {
            return key.to_owned();
        }
        self.glyphs
            .get(text)
            .map_or_else(|| text.to_owned(), |key| (*key).to_owned())
    }

    /// Builds the symbol leaf for a key produced by the parser or by
    /// [`Catalog::key_for_char`].
    #[must_use]
    pub fn make_symbol(&self, key: &str) -> Symbol {
        if let Some((canonical, def)) = self.symbol(key) {
            return Symbol::from_def(canonical, def);
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_digit() => Symbol::literal(ch, SymbolClass::Digit),
            (Some(ch), None) if ch.is_alphabetic() => Symbol::literal(ch, SymbolClass::Variable),
            (Some(' '), None) => Symbol::space(),
            _ => Symbol {
                key: key.to_owned(),
                glyph: key.to_owned(),
                class: SymbolClass::Misc,
                degrade: None,
            },
        }
    }

    /// The symbol leaf typed or pasted as `ch`.
    #[must_use]
    pub fn symbol_for_char(&self, ch: char) -> Symbol {
        self.make_symbol(&self.key_for_char(ch))
    }

    /// The leaf a symbol degrades into on backspace, if any.
    #[must_use]
    pub fn degraded(&self, symbol: &Symbol) -> Option<Symbol> {
        symbol.degrade.map(|target| self.make_symbol(target))
    }
}
