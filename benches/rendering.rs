//! Benchmarks for note rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use memodown::document::{RenderOptions, Renderer};

fn bench_render(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/notes.md");
    let renderer = Renderer::default();
    let plain = Renderer::new(RenderOptions {
        highlight: false,
        ..RenderOptions::default()
    });

    c.bench_function("render_notes", |b| b.iter(|| renderer.render(black_box(md))));
    c.bench_function("render_notes_no_highlight", |b| {
        b.iter(|| plain.render(black_box(md)));
    });
}

fn bench_tokens(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/notes.md").repeat(50);
    let renderer = Renderer::default();

    c.bench_function("tokens_large", |b| b.iter(|| renderer.tokens(black_box(&md))));
}

criterion_group!(benches, bench_render, bench_tokens);
criterion_main!(benches);
