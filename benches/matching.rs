//! Benchmarks for automaton construction and scanning.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use multiscan::{Automaton, Match, Pattern};

fn dictionary(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("term{:04}", i)).collect()
}

/// Filler text with every third dictionary word embedded.
fn sample_text(words: &[String]) -> Vec<u8> {
    let mut text = Vec::new();
    for (i, word) in words.iter().enumerate() {
        text.extend_from_slice(b"some filler prose ");
        if i % 3 == 0 {
            text.extend_from_slice(word.as_bytes());
        }
    }
    text
}

fn build(words: &[String]) -> Automaton<String> {
    let mut automaton = Automaton::new();
    for (i, word) in words.iter().enumerate() {
        automaton.add(Pattern::new(format!("p{}", i), word.as_str())).unwrap();
    }
    automaton.finalize();
    automaton
}

fn count_hits(_hit: &Match<'_, String>, _text: &[u8], count: &mut usize) -> bool {
    *count += 1;
    false
}

fn bench_build(c: &mut Criterion) {
    let words = dictionary(1000);

    c.bench_function("build_1000_patterns", |b| {
        b.iter(|| build(black_box(&words)))
    });
}

fn bench_scan_hits(c: &mut Criterion) {
    let words = dictionary(1000);
    let automaton = build(&words);
    let text = sample_text(&words);

    c.bench_function("scan_1000_patterns_dense", |b| {
        b.iter(|| {
            let mut count = 0usize;
            automaton
                .scan_from(black_box(&text), 0, count_hits, &mut count)
                .unwrap();
            count
        })
    });
}

fn bench_scan_no_match(c: &mut Criterion) {
    let words = dictionary(1000);
    let automaton = build(&words);
    let text = vec![b'z'; 64 * 1024];

    c.bench_function("scan_1000_patterns_no_match", |b| {
        b.iter(|| {
            let mut count = 0usize;
            automaton
                .scan_from(black_box(&text), 0, count_hits, &mut count)
                .unwrap();
            count
        })
    });
}

fn bench_scan_chunked(c: &mut Criterion) {
    let words = dictionary(1000);
    let mut automaton = build(&words);
    let text = sample_text(&words);
    let mid = text.len() / 2;

    c.bench_function("scan_1000_patterns_chunked", |b| {
        b.iter(|| {
            let mut count = 0usize;
            automaton
                .scan(black_box(&text[..mid]), false, count_hits, &mut count)
                .unwrap();
            automaton
                .scan(black_box(&text[mid..]), true, count_hits, &mut count)
                .unwrap();
            count
        })
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_scan_hits,
    bench_scan_no_match,
    bench_scan_chunked
);
criterion_main!(benches);
