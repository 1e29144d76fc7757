use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bale::codec::Algorithm;

/// Mixed text-like corpus with enough repetition for every codec to work on.
fn corpus(len: usize) -> Vec<u8> {
    let phrase = b"the quick brown fox jumps over the lazy dog 0123456789 ";
    phrase.iter().copied().cycle().take(len).collect()
}

fn bench_encode(c: &mut Criterion) {
    let input = corpus(64 * 1024);
    let mut group = c.benchmark_group("encode");
    for algorithm in Algorithm::ALL {
        group.bench_function(algorithm.to_string(), |b| {
            b.iter(|| algorithm.encode(black_box(&input)).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let input = corpus(64 * 1024);
    let mut group = c.benchmark_group("decode");
    for algorithm in Algorithm::ALL {
        let block = algorithm.encode(&input).unwrap();
        group.bench_function(algorithm.to_string(), |b| {
            b.iter(|| algorithm.decode(black_box(&block)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
