//! Performance benchmarks for docfront-search

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docfront_search::{escape, query, schema, Command, SearchOptions};

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape");

    for size in [16usize, 256, 4096] {
        let plain: String = "a".repeat(size);
        let dense: String = "a-b.c@".repeat(size / 6 + 1);

        group.bench_with_input(BenchmarkId::new("plain", size), &plain, |b, term| {
            b.iter(|| escape(black_box(term)))
        });
        group.bench_with_input(BenchmarkId::new("dense", size), &dense, |b, term| {
            b.iter(|| escape(black_box(term)))
        });
    }

    group.finish();
}

fn bench_commands(c: &mut Criterion) {
    let mut group = c.benchmark_group("commands");

    group.bench_function("ft_create_users", |b| {
        let def = schema::users_index();
        b.iter(|| Command::ft_create(black_box(&def)))
    });

    group.bench_function("ft_search_tag_contains", |b| {
        let opts = SearchOptions::find_defaults();
        b.iter(|| {
            let q = query::tag_contains("id", black_box("0000-000000000001"));
            Command::ft_search("users_index", &q, &opts)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_escape, bench_commands);
criterion_main!(benches);
