use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use display_id::{generate_display_id, parse_display_id, validate_display_id};

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_display_id", |b| {
        b.iter(|| black_box(generate_display_id()))
    });
}

fn bench_validate(c: &mut Criterion) {
    let id = generate_display_id();
    c.bench_function("validate_display_id", |b| {
        b.iter(|| validate_display_id(black_box(&id)))
    });
}

fn bench_parse(c: &mut Criterion) {
    let id = generate_display_id();
    c.bench_function("parse_display_id", |b| {
        b.iter(|| parse_display_id(black_box(&id)).unwrap())
    });
}

criterion_group!(benches, bench_generate, bench_validate, bench_parse);
criterion_main!(benches);
