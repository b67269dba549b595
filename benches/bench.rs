use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fastss::distance::{edit_distance, edit_distance_threshold};
use fastss::index::{FastSsIndex, IndexConfig};
use fastss::storage::memory::MemoryStore;
use fastss::variant::variants;

fn generate_words(count: usize) -> Vec<String> {
    let alphabet: Vec<char> = "etaoinshrdlu".chars().collect();
    (0..count)
        .map(|i| {
            let len = 4 + i % 5;
            (0..len)
                .map(|j| alphabet[(i * 7 + j * 13 + i / 3) % alphabet.len()])
                .collect()
        })
        .collect()
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_distance");

    group.bench_function("full", |b| {
        b.iter(|| edit_distance(black_box("approximate"), black_box("appropriate")))
    });
    group.bench_function("threshold", |b| {
        b.iter(|| edit_distance_threshold(black_box("approximate"), black_box("appropriate"), 2))
    });

    group.finish();
}

fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("variants");

    for max_distance in [1, 2, 3] {
        group.bench_function(format!("d{max_distance}"), |b| {
            b.iter(|| variants(black_box("approximate"), max_distance))
        });
    }

    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let words = generate_words(1000);

    let mut index = FastSsIndex::open(MemoryStore::new_default(), IndexConfig::new(2)).unwrap();
    index.add_all(&words).unwrap();

    let mut group = c.benchmark_group("index");

    group.bench_function("add_1000", |b| {
        b.iter(|| {
            let mut index =
                FastSsIndex::open(MemoryStore::new_default(), IndexConfig::new(2)).unwrap();
            index.add_all(black_box(&words)).unwrap();
        })
    });
    group.bench_function("query", |b| {
        b.iter(|| {
            for word in words.iter().take(50) {
                let _ = black_box(index.query(black_box(word)).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_distance, bench_variants, bench_index);
criterion_main!(benches);
