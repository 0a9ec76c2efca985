use std::fs;

use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;
use clap::Args;
use mathfield::materialize::build_document;
use mathfield::{Catalog, Settings, StrictMode, parse_with, serializer};

#[derive(Args)]
pub struct RoundtripArgs {
    /// Corpus file with one formula per line. Blank lines and lines starting
    /// with `#` are skipped.
    corpus: Utf8PathBuf,
    /// Reject commands missing from the catalog instead of keeping them
    /// opaque.
    #[arg(long)]
    strict: bool,
    /// Keep going after the first failure.
    #[arg(long)]
    keep_going: bool,
    /// Print every formula with its canonical form.
    #[arg(long, short)]
    verbose: bool,
}

enum Outcome {
    Stable,
    Rejected(String),
    Drifted { written: String },
}

pub fn run(args: RoundtripArgs) -> Result<()> {
    let corpus = fs::read_to_string(&args.corpus)
        .with_context(|| format!("failed to read corpus {}", args.corpus))?;
    let settings = Settings::builder()
        .strict(if args.strict {
            StrictMode::Error
        } else {
            StrictMode::Ignore
        })
        .build();

    let mut checked = 0usize;
    let mut failures = 0usize;
    for (index, line) in corpus.lines().enumerate() {
        let formula = line.trim();
        if formula.is_empty() || formula.starts_with('#') {
            continue;
        }
        checked += 1;
        let line_no = index + 1;
        match check(formula, &settings)? {
            Outcome::Stable => {
                if args.verbose {
                    println!("ok   {line_no}: {formula}");
                }
            }
            Outcome::Rejected(err) => {
                failures += 1;
                println!("skip {line_no}: {formula}\n     {err}");
            }
            Outcome::Drifted { written } => {
                failures += 1;
                println!("FAIL {line_no}: {formula}\n     written as {written}");
                if !args.keep_going {
                    break;
                }
            }
        }
    }

    println!("{checked} formulas checked, {failures} failed");
    if failures > 0 {
        bail!("{failures} of {checked} formulas did not round-trip");
    }
    Ok(())
}

fn check(formula: &str, settings: &Settings) -> Result<Outcome> {
    let catalog = Catalog::shared();
    let ast = match parse_with(formula, settings, catalog) {
        Ok(ast) => ast,
        Err(err) => return Ok(Outcome::Rejected(err.to_string())),
    };
    let doc = build_document(&ast, catalog).context("building the tree failed")?;
    let written = serializer::latex(&doc);
    let reparsed = parse_with(&written, settings, catalog)
        .with_context(|| format!("serializer output `{written}` does not parse"))?;
    Ok(if reparsed == ast {
        Outcome::Stable
    } else {
        Outcome::Drifted { written }
    })
}
