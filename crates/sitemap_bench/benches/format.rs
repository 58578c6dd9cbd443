//! Node formatting benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sitemap_bench::generate_urls;
use sitemap_core::{format_url_node, ChangeFreq, Url};

/// Benchmark serialization of bare and fully populated nodes.
fn bench_format_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_url_node");

    for loc_len in [32, 128, 512].iter() {
        let url = generate_urls(1, *loc_len).remove(0);
        group.throughput(Throughput::Bytes(format_url_node(&url).len() as u64));
        group.bench_with_input(BenchmarkId::new("bare", loc_len), &url, |b, url| {
            b.iter(|| black_box(format_url_node(black_box(url))));
        });
    }

    let full = Url::new("https://example.com/products/widget")
        .with_last_mod("2024-03-01T12:00:00+00:00")
        .with_change_freq(ChangeFreq::Daily)
        .with_priority(0.8);
    group.bench_function("all_fields", |b| {
        b.iter(|| black_box(format_url_node(black_box(&full))));
    });

    group.finish();
}

criterion_group!(benches, bench_format_node);
criterion_main!(benches);
