use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mathfield::materialize::build_document;
use mathfield::{Catalog, MathField, parse, serializer};

const CASES: [(&str, &str); 6] = [
    ("Fraction", r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}"),
    ("Series", r"\sum_{k=0}^{\infty} \frac{x^k}{k!} = e^x"),
    ("Integral", r"\int_0^1 \left( \sqrt[3]{x} + \hat{y} \right)\,dx"),
    (
        "Matrix",
        r"\begin{pmatrix}a_{11}&a_{12}&a_{13}\\a_{21}&a_{22}&a_{23}\\a_{31}&a_{32}&a_{33}\end{pmatrix}",
    ),
    ("TextStyles", r"\text{for all } x \in \mathbb{R},\ \mathbf{v} \cdot \vec{w} \leq 1"),
    ("Limits", r"\lim_{n \to \infty} \left( 1 + \frac{1}{n} \right)^n"),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, tex) in CASES {
        group.bench_function(name, |b| {
            b.iter(|| {
                let ast = parse(black_box(tex)).expect("benchmark input parses");
                black_box(ast.len());
            });
        });
    }
    group.finish();
}

fn bench_materialize(c: &mut Criterion) {
    let catalog = Catalog::shared();
    let mut group = c.benchmark_group("materialize");
    for (name, tex) in CASES {
        let ast = parse(tex).expect("benchmark input parses");
        group.bench_function(name, |b| {
            b.iter(|| {
                let doc = build_document(black_box(&ast), catalog).expect("tree builds");
                black_box(doc.len());
            });
        });
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let catalog = Catalog::shared();
    let mut group = c.benchmark_group("serialize");
    for (name, tex) in CASES {
        let ast = parse(tex).expect("benchmark input parses");
        let doc = build_document(&ast, catalog).expect("tree builds");
        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(serializer::latex(black_box(&doc)));
                black_box(serializer::text(black_box(&doc)));
            });
        });
    }
    group.finish();
}

fn bench_typing(c: &mut Criterion) {
    c.bench_function("type_characters", |b| {
        b.iter(|| {
            let mut field = MathField::new();
            for ch in black_box("(a+b)^2/c_i+x").chars() {
                field.type_char(ch).expect("typing succeeds");
            }
            black_box(field.latex());
        });
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_materialize,
    bench_serialize,
    bench_typing
);
criterion_main!(benches);
