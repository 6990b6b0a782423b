//! Benchmarks for fragment rendering performance.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use weave_renderer::{Component, Html5Host, HtmlComponentRenderer};

/// Generate a fragment with `items` custom elements and links.
fn generate_fragment(items: usize) -> String {
    let mut html = String::with_capacity(items * 80);
    html.push_str("<ul>");
    for i in 0..items {
        html.push_str(&format!(
            r#"<li><x-card data-id="{i}">placeholder</x-card><a href="/item/{i}">Item {i}</a></li>"#
        ));
    }
    html.push_str("</ul>");
    html
}

fn components() -> HtmlComponentRenderer {
    HtmlComponentRenderer::new(Html5Host)
        .with_component(
            "x-card",
            Component::new().with_template("<div class=\"card\"><span>card</span></div>"),
        )
        .with_component(
            "a[href]",
            Component::new()
                .on_init(|_| Ok(()))
                .on_destroy(|_| Ok(())),
        )
}

fn bench_render_without_components(c: &mut Criterion) {
    let renderer = HtmlComponentRenderer::new(Html5Host);
    let html = generate_fragment(10);

    c.bench_function("render_no_components", |b| {
        b.iter(|| renderer.render(&html));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let renderer = components();

    let mut group = c.benchmark_group("render_by_size");

    for items in [10, 100, 1000] {
        let html = generate_fragment(items);

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("items", items), &html, |b, html| {
            b.iter(|| renderer.render(html));
        });
    }

    group.finish();
}

fn bench_render_and_dispose(c: &mut Criterion) {
    let renderer = components();
    let html = generate_fragment(100);

    c.bench_function("render_and_dispose_100", |b| {
        b.iter(|| renderer.render(&html).and_then(weave_renderer::RenderedHtml::dispose));
    });
}

criterion_group!(
    benches,
    bench_render_without_components,
    bench_render_varying_sizes,
    bench_render_and_dispose
);
criterion_main!(benches);
