//! Benchmarks for tree construction and suffix merging.
//!
//! Inputs model a realistic batch: completions share a common prefix,
//! diverge in the middle, and a fraction reconverge on a shared ending,
//! so the merge pass has real work to do.

use canopy::tree::CompletionTree;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate `count` completions with a shared prefix, a per-completion
/// divergent middle, and one of two shared suffixes.
fn synthetic_completions(count: usize, len: usize) -> Vec<Vec<u32>> {
    let prefix_len = len / 4;
    let suffix_len = len / 4;
    let middle_len = len - prefix_len - suffix_len;

    (0..count)
        .map(|i| {
            let mut tokens: Vec<u32> = (0..prefix_len as u32).collect();
            tokens.extend((0..middle_len as u32).map(|j| 1_000 + (i as u32 * 31 + j) % 97));
            let suffix_base = if i % 2 == 0 { 5_000 } else { 6_000 };
            tokens.extend((0..suffix_len as u32).map(|j| suffix_base + j));
            tokens
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &count in &[8usize, 32, 128] {
        let completions = synthetic_completions(count, 200);
        let total_tokens: usize = completions.iter().map(Vec::len).sum();
        group.throughput(Throughput::Elements(total_tokens as u64));

        group.bench_with_input(
            BenchmarkId::new("trie_only", count),
            &completions,
            |b, completions| {
                b.iter(|| {
                    CompletionTree::builder()
                        .completions(completions.clone())
                        .merge_suffixes(false)
                        .build()
                        .unwrap()
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("with_merge", count),
            &completions,
            |b, completions| {
                b.iter(|| {
                    CompletionTree::builder()
                        .completions(completions.clone())
                        .build()
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
