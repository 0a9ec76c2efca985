//! Static symbol tables
//!
//! Keys are the markup a symbol serializes to: the command with its
//! backslash, or the bare character for plain input. Glyphs are written as
//! escapes so that the tables stay ASCII.

use phf::{phf_map, phf_set};

use crate::catalog::types::{SymbolClass, SymbolDef};

use SymbolClass::{
    BinaryOperator as Bin, Close, Greek, Misc, Open, Punctuation as Punct, Relation as Rel,
    Spacing,
};

/// Every symbol the parser recognizes, keyed by canonical markup.
pub static SYMBOLS: phf::Map<&'static str, SymbolDef> = phf_map! {
    // Plain characters with a fixed role
    "+" => SymbolDef::new("+", Bin),
    "-" => SymbolDef::new("\u{2212}", Bin),
    "*" => SymbolDef::new("\u{2217}", Bin),
    "/" => SymbolDef::new("/", Bin),
    "=" => SymbolDef::new("=", Rel),
    "<" => SymbolDef::new("<", Rel),
    ">" => SymbolDef::new(">", Rel),
    "!" => SymbolDef::new("!", Punct),
    "," => SymbolDef::new(",", Punct),
    ";" => SymbolDef::new(";", Punct),
    ":" => SymbolDef::new(":", Punct),
    "." => SymbolDef::new(".", Punct),
    "?" => SymbolDef::new("?", Punct),
    "'" => SymbolDef::new("\u{2032}", Punct),
    "(" => SymbolDef::new("(", Open),
    ")" => SymbolDef::new(")", Close),
    "[" => SymbolDef::new("[", Open),
    "]" => SymbolDef::new("]", Close),
    "|" => SymbolDef::new("|", Misc),

    // Escaped specials
    "\\{" => SymbolDef::new("{", Open),
    "\\}" => SymbolDef::new("}", Close),
    "\\#" => SymbolDef::new("#", Misc),
    "\\%" => SymbolDef::new("%", Misc),
    "\\&" => SymbolDef::new("&", Misc),
    "\\$" => SymbolDef::new("$", Misc),
    "\\_" => SymbolDef::new("_", Misc),
    "\\|" => SymbolDef::new("\u{2016}", Misc),
    "\\backslash" => SymbolDef::new("\\", Misc),
    "\\textasciicircum" => SymbolDef::new("^", Misc),
    "\\textasciitilde" => SymbolDef::new("~", Misc),

    // Spacing
    "\\," => SymbolDef::new("\u{2009}", Spacing),
    "\\:" => SymbolDef::new("\u{205f}", Spacing),
    "\\;" => SymbolDef::new("\u{2004}", Spacing),
    "\\!" => SymbolDef::new("", Spacing),
    "\\ " => SymbolDef::new(" ", Spacing),
    "~" => SymbolDef::new("\u{a0}", Spacing),
    "\\quad" => SymbolDef::new("\u{2003}", Spacing),
    "\\qquad" => SymbolDef::new("\u{2003}\u{2003}", Spacing),

    // Greek
    "\\alpha" => SymbolDef::new("\u{3b1}", Greek),
    "\\beta" => SymbolDef::new("\u{3b2}", Greek),
    "\\gamma" => SymbolDef::new("\u{3b3}", Greek),
    "\\delta" => SymbolDef::new("\u{3b4}", Greek),
    "\\epsilon" => SymbolDef::new("\u{3f5}", Greek),
    "\\varepsilon" => SymbolDef::new("\u{3b5}", Greek),
    "\\zeta" => SymbolDef::new("\u{3b6}", Greek),
    "\\eta" => SymbolDef::new("\u{3b7}", Greek),
    "\\theta" => SymbolDef::new("\u{3b8}", Greek),
    "\\vartheta" => SymbolDef::new("\u{3d1}", Greek),
    "\\iota" => SymbolDef::new("\u{3b9}", Greek),
    "\\kappa" => SymbolDef::new("\u{3ba}", Greek),
    "\\lambda" => SymbolDef::new("\u{3bb}", Greek),
    "\\mu" => SymbolDef::new("\u{3bc}", Greek),
    "\\nu" => SymbolDef::new("\u{3bd}", Greek),
    "\\xi" => SymbolDef::new("\u{3be}", Greek),
    "\\pi" => SymbolDef::new("\u{3c0}", Greek),
    "\\varpi" => SymbolDef::new("\u{3d6}", Greek),
    "\\rho" => SymbolDef::new("\u{3c1}", Greek),
    "\\varrho" => SymbolDef::new("\u{3f1}", Greek),
    "\\sigma" => SymbolDef::new("\u{3c3}", Greek),
    "\\varsigma" => SymbolDef::new("\u{3c2}", Greek),
    "\\tau" => SymbolDef::new("\u{3c4}", Greek),
    "\\upsilon" => SymbolDef::new("\u{3c5}", Greek),
    "\\phi" => SymbolDef::new("\u{3d5}", Greek),
    "\\varphi" => SymbolDef::new("\u{3c6}", Greek),
    "\\chi" => SymbolDef::new("\u{3c7}", Greek),
    "\\psi" => SymbolDef::new("\u{3c8}", Greek),
    "\\omega" => SymbolDef::new("\u{3c9}", Greek),
    "\\Gamma" => SymbolDef::new("\u{393}", Greek),
    "\\Delta" => SymbolDef::new("\u{394}", Greek),
    "\\Theta" => SymbolDef::new("\u{398}", Greek),
    "\\Lambda" => SymbolDef::new("\u{39b}", Greek),
    "\\Xi" => SymbolDef::new("\u{39e}", Greek),
    "\\Pi" => SymbolDef::new("\u{3a0}", Greek),
    "\\Sigma" => SymbolDef::new("\u{3a3}", Greek),
    "\\Upsilon" => SymbolDef::new("\u{3a5}", Greek),
    "\\Phi" => SymbolDef::new("\u{3a6}", Greek),
    "\\Psi" => SymbolDef::new("\u{3a8}", Greek),
    "\\Omega" => SymbolDef::new("\u{3a9}", Greek),

    // Relations
    "\\leq" => SymbolDef::degrading("\u{2264}", Rel, "<"),
    "\\geq" => SymbolDef::degrading("\u{2265}", Rel, ">"),
    "\\neq" => SymbolDef::degrading("\u{2260}", Rel, "="),
    "\\nleq" => SymbolDef::degrading("\u{2270}", Rel, "\\leq"),
    "\\ngeq" => SymbolDef::degrading("\u{2271}", Rel, "\\geq"),
    "\\approx" => SymbolDef::degrading("\u{2248}", Rel, "\\sim"),
    "\\equiv" => SymbolDef::degrading("\u{2261}", Rel, "="),
    "\\cong" => SymbolDef::degrading("\u{2245}", Rel, "\\sim"),
    "\\sim" => SymbolDef::new("\u{223c}", Rel),
    "\\simeq" => SymbolDef::new("\u{2243}", Rel),
    "\\propto" => SymbolDef::new("\u{221d}", Rel),
    "\\subset" => SymbolDef::new("\u{2282}", Rel),
    "\\supset" => SymbolDef::new("\u{2283}", Rel),
    "\\subseteq" => SymbolDef::degrading("\u{2286}", Rel, "\\subset"),
    "\\supseteq" => SymbolDef::degrading("\u{2287}", Rel, "\\supset"),
    "\\in" => SymbolDef::new("\u{2208}", Rel),
    "\\notin" => SymbolDef::new("\u{2209}", Rel),
    "\\ni" => SymbolDef::new("\u{220b}", Rel),
    "\\ll" => SymbolDef::new("\u{226a}", Rel),
    "\\gg" => SymbolDef::new("\u{226b}", Rel),
    "\\perp" => SymbolDef::new("\u{22a5}", Rel),
    "\\parallel" => SymbolDef::new("\u{2225}", Rel),
    "\\mid" => SymbolDef::new("\u{2223}", Rel),
    "\\rightarrow" => SymbolDef::new("\u{2192}", Rel),
    "\\leftarrow" => SymbolDef::new("\u{2190}", Rel),
    "\\leftrightarrow" => SymbolDef::degrading("\u{2194}", Rel, "\\rightarrow"),
    "\\Rightarrow" => SymbolDef::new("\u{21d2}", Rel),
    "\\Leftarrow" => SymbolDef::new("\u{21d0}", Rel),
    "\\Leftrightarrow" => SymbolDef::degrading("\u{21d4}", Rel, "\\Rightarrow"),
    "\\uparrow" => SymbolDef::new("\u{2191}", Rel),
    "\\downarrow" => SymbolDef::new("\u{2193}", Rel),
    "\\mapsto" => SymbolDef::new("\u{21a6}", Rel),
    "\\implies" => SymbolDef::new("\u{27f9}", Rel),
    "\\iff" => SymbolDef::new("\u{27fa}", Rel),

    // Binary operators
    "\\pm" => SymbolDef::degrading("\u{b1}", Bin, "+"),
    "\\mp" => SymbolDef::degrading("\u{2213}", Bin, "-"),
    "\\times" => SymbolDef::new("\u{d7}", Bin),
    "\\div" => SymbolDef::new("\u{f7}", Bin),
    "\\cdot" => SymbolDef::new("\u{22c5}", Bin),
    "\\circ" => SymbolDef::new("\u{2218}", Bin),
    "\\bullet" => SymbolDef::new("\u{2219}", Bin),
    "\\cup" => SymbolDef::new("\u{222a}", Bin),
    "\\cap" => SymbolDef::new("\u{2229}", Bin),
    "\\setminus" => SymbolDef::new("\u{2216}", Bin),
    "\\oplus" => SymbolDef::new("\u{2295}", Bin),
    "\\otimes" => SymbolDef::new("\u{2297}", Bin),
    "\\wedge" => SymbolDef::new("\u{2227}", Bin),
    "\\vee" => SymbolDef::new("\u{2228}", Bin),

    // Fences usable outside \left ... \right
    "\\langle" => SymbolDef::new("\u{27e8}", Open),
    "\\rangle" => SymbolDef::new("\u{27e9}", Close),
    "\\lfloor" => SymbolDef::new("\u{230a}", Open),
    "\\rfloor" => SymbolDef::new("\u{230b}", Close),
    "\\lceil" => SymbolDef::new("\u{2308}", Open),
    "\\rceil" => SymbolDef::new("\u{2309}", Close),

    // Everything else
    "\\infty" => SymbolDef::new("\u{221e}", Misc),
    "\\partial" => SymbolDef::new("\u{2202}", Misc),
    "\\nabla" => SymbolDef::new("\u{2207}", Misc),
    "\\forall" => SymbolDef::new("\u{2200}", Misc),
    "\\exists" => SymbolDef::new("\u{2203}", Misc),
    "\\nexists" => SymbolDef::degrading("\u{2204}", Misc, "\\exists"),
    "\\emptyset" => SymbolDef::new("\u{2205}", Misc),
    "\\varnothing" => SymbolDef::new("\u{2300}", Misc),
    "\\ldots" => SymbolDef::new("\u{2026}", Misc),
    "\\cdots" => SymbolDef::new("\u{22ef}", Misc),
    "\\vdots" => SymbolDef::new("\u{22ee}", Misc),
    "\\ddots" => SymbolDef::new("\u{22f1}", Misc),
    "\\hbar" => SymbolDef::new("\u{210f}", Misc),
    "\\ell" => SymbolDef::new("\u{2113}", Misc),
    "\\Re" => SymbolDef::new("\u{211c}", Misc),
    "\\Im" => SymbolDef::new("\u{2111}", Misc),
    "\\aleph" => SymbolDef::new("\u{2135}", Misc),
    "\\neg" => SymbolDef::new("\u{ac}", Misc),
    "\\angle" => SymbolDef::new("\u{2220}", Misc),
    "\\triangle" => SymbolDef::new("\u{25b3}", Misc),
};

/// Alternative spellings, resolved to a key of [`SYMBOLS`] at parse time.
pub static SYMBOL_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "\\le" => "\\leq",
    "\\ge" => "\\geq",
    "\\ne" => "\\neq",
    "\\lt" => "<",
    "\\gt" => ">",
    "\\to" => "\\rightarrow",
    "\\gets" => "\\leftarrow",
    "\\ast" => "*",
    "\\prime" => "'",
    "\\dots" => "\\ldots",
    "\\land" => "\\wedge",
    "\\lor" => "\\vee",
    "\\lnot" => "\\neg",
    "\\lbrace" => "\\{",
    "\\rbrace" => "\\}",
    "\\vert" => "|",
    "\\Vert" => "\\|",
    "\\lbrack" => "[",
    "\\rbrack" => "]",
    "\\colon" => ":",
};

/// Built-in operator names written as a bare command (`\sin`), not through
/// `\operatorname`.
pub static OPERATOR_NAMES: phf::Set<&'static str> = phf_set! {
    "\\sin", "\\cos", "\\tan", "\\sec", "\\csc", "\\cot",
    "\\arcsin", "\\arccos", "\\arctan", "\\sinh", "\\cosh", "\\tanh",
    "\\log", "\\ln", "\\exp", "\\det", "\\dim", "\\gcd",
    "\\max", "\\min", "\\sup", "\\inf", "\\deg", "\\arg", "\\ker", "\\Pr",
};

/// Unicode subscript characters and the plain text they stand for.
pub static UNICODE_SUBSCRIPTS: phf::Map<char, &'static str> = phf_map! {
    '\u{208a}' => "+",
    '\u{208b}' => "-",
    '\u{208c}' => "=",
    '\u{208d}' => "(",
    '\u{208e}' => ")",
    '\u{2080}' => "0",
    '\u{2081}' => "1",
    '\u{2082}' => "2",
    '\u{2083}' => "3",
    '\u{2084}' => "4",
    '\u{2085}' => "5",
    '\u{2086}' => "6",
    '\u{2087}' => "7",
    '\u{2088}' => "8",
    '\u{2089}' => "9",
    '\u{2090}' => "a",
    '\u{2091}' => "e",
    '\u{2095}' => "h",
    '\u{1d62}' => "i",
    '\u{2c7c}' => "j",
    '\u{2096}' => "k",
    '\u{2097}' => "l",
    '\u{2098}' => "m",
    '\u{2099}' => "n",
    '\u{2092}' => "o",
    '\u{209a}' => "p",
    '\u{1d63}' => "r",
    '\u{209b}' => "s",
    '\u{209c}' => "t",
    '\u{1d64}' => "u",
    '\u{1d65}' => "v",
    '\u{2093}' => "x",
};

/// Unicode superscript characters and the plain text they stand for.
pub static UNICODE_SUPERSCRIPTS: phf::Map<char, &'static str> = phf_map! {
    '\u{207a}' => "+",
    '\u{207b}' => "-",
    '\u{207c}' => "=",
    '\u{207d}' => "(",
    '\u{207e}' => ")",
    '\u{2070}' => "0",
    '\u{b9}' => "1",
    '\u{b2}' => "2",
    '\u{b3}' => "3",
    '\u{2074}' => "4",
    '\u{2075}' => "5",
    '\u{2076}' => "6",
    '\u{2077}' => "7",
    '\u{2078}' => "8",
    '\u{2079}' => "9",
    '\u{1d43}' => "a",
    '\u{1d47}' => "b",
    '\u{1d9c}' => "c",
    '\u{1d48}' => "d",
    '\u{1d49}' => "e",
    '\u{1da0}' => "f",
    '\u{1d4d}' => "g",
    '\u{2b0}' => "h",
    '\u{2071}' => "i",
    '\u{2b2}' => "j",
    '\u{1d4f}' => "k",
    '\u{2e1}' => "l",
    '\u{1d50}' => "m",
    '\u{207f}' => "n",
    '\u{1d52}' => "o",
    '\u{1d56}' => "p",
    '\u{2b3}' => "r",
    '\u{2e2}' => "s",
    '\u{1d57}' => "t",
    '\u{1d58}' => "u",
    '\u{1d5b}' => "v",
    '\u{2b7}' => "w",
    '\u{2e3}' => "x",
    '\u{2b8}' => "y",
    '\u{1dbb}' => "z",
};
