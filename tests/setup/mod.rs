#![allow(dead_code)]

use std::panic::{UnwindSafe, catch_unwind};

use mathfield::materialize::build_document;
use mathfield::parser::Ast;
use mathfield::{
    Catalog, Document, MathField, MathFieldError, Settings, StrictMode, parse_with, serializer,
};

pub struct TestExpr {
    pub expr: String,
    pub file: &'static str,
    pub line: u32,
    pub code: &'static str,
}

impl TestExpr {
    pub fn to_parse(self, settings: &Settings) -> Result<(), MathFieldError> {
        get_parsed(&self.expr, settings).map(|_| ())
    }

    pub fn not_to_parse(self, settings: &Settings) -> Result<(), MathFieldError> {
        assert!(
            get_parsed(&self.expr, settings).is_err(),
            "'{}' parsed but was expected to fail ({}:{})",
            self.expr, self.file, self.line
        );
        Ok(())
    }

    pub fn to_parse_like(self, other: &str, settings: &Settings) -> Result<(), MathFieldError> {
        let tree1 = get_parsed(&self.expr, settings)?;
        let tree2 = get_parsed(other, settings)?;
        assert_eq!(
            tree1, tree2,
            "Parse trees do not match between '{}' and '{}' ({}:{})",
            self.expr, other, self.file, self.line
        );
        Ok(())
    }

    /// Serializing the built tree and parsing the output again gives the
    /// same AST.
    pub fn to_roundtrip(self) -> Result<(), MathFieldError> {
        let settings = Settings::default();
        let first = get_parsed(&self.expr, &settings)?;
        let written = serializer::latex(&get_built(&self.expr)?);
        let second = get_parsed(&written, &settings)?;
        assert_eq!(
            first, second,
            "'{}' was written as '{}' which parses differently ({}:{}: {})",
            self.expr, written, self.file, self.line, self.code
        );
        Ok(())
    }

    pub fn to_serialize_as(self, expected: &str) -> Result<(), MathFieldError> {
        let written = serializer::latex(&get_built(&self.expr)?);
        assert_eq!(
            written, expected,
            "'{}' serialized unexpectedly ({}:{})",
            self.expr, self.file, self.line
        );
        Ok(())
    }

    pub fn to_read_as(self, expected: &str) -> Result<(), MathFieldError> {
        let text = serializer::text(&get_built(&self.expr)?);
        assert_eq!(
            text, expected,
            "'{}' has unexpected plain text ({}:{})",
            self.expr, self.file, self.line
        );
        Ok(())
    }
}

pub fn expect_impl(
    expr: &str,
    file: &'static str,
    line: u32,
    code: &'static str,
) -> TestExpr {
    TestExpr {
        expr: expr.to_owned(),
        file,
        line,
        code,
    }
}

#[macro_export]
macro_rules! expect {
    ($e:expr) => {
        $crate::expect_impl($e, file!(), line!(), stringify!($e))
    };
}

pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), MathFieldError> + UnwindSafe,
{
    match catch_unwind(test_fn) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            let position = match &e {
                MathFieldError::Parse(err) => err
                    .position
                    .map_or_else(|| "unknown".to_owned(), |pos| pos.to_string()),
                _ => "n/a".to_owned(),
            };
            panic!(
                "Test '{}' failed with Result::Err: {}\nPosition: {}\nDetails: {:?}",
                desc, e, position, e
            );
        }
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_owned()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_owned()
            };
            panic!("Test '{}' panicked: {}", desc, msg);
        }
    }
}

pub fn strict_settings() -> Settings {
    Settings::builder().strict(StrictMode::Error).build()
}

pub fn get_parsed(expr: &str, settings: &Settings) -> Result<Vec<Ast>, MathFieldError> {
    Ok(parse_with(expr, settings, Catalog::shared())?)
}

pub fn get_parsed_strict(expr: &str) -> Result<Vec<Ast>, MathFieldError> {
    get_parsed(expr, &strict_settings())
}

pub fn get_built(expr: &str) -> Result<Document, MathFieldError> {
    let ast = get_parsed(expr, &Settings::default())?;
    let doc = build_document(&ast, Catalog::shared())?;
    let problems = doc.check_links();
    assert!(problems.is_empty(), "broken links after building '{expr}': {problems:?}");
    Ok(doc)
}

pub fn field_with(latex: &str) -> Result<MathField, MathFieldError> {
    let mut field = MathField::new();
    field.set_latex(latex)?;
    Ok(field)
}

pub fn field_with_settings(latex: &str, settings: Settings) -> Result<MathField, MathFieldError> {
    let mut field = MathField::with_settings(settings);
    field.set_latex(latex)?;
    Ok(field)
}

pub fn assert_links(field: &MathField) {
    let problems = field.document().check_links();
    assert!(problems.is_empty(), "broken links in '{}': {problems:?}", field.latex());
}

#[macro_export]
macro_rules! assert_let {
    ($pat:pat = $expr:expr, $($arg:tt)+) => {
        let $pat = $expr else {
            panic!($($arg)+);
        };
    };
    ($pat:pat = $expr:expr) => {
        let $pat = $expr else {
            panic!(
                "assert_let failed: pattern `{}` did not match {} at {}:{} \n{:#?}",
                stringify!($pat), stringify!($expr),
                file!(), line!(),
                $expr
            );
        };
    };
}
