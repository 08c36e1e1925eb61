//! Benchmarks for candidate generation
//!
//! Run with: cargo bench --package sources
//!
//! Covers the offline paths: synthetic fallback and enrichment of bare
//! provider records.

use catalog::{Coordinate, LodgingRecord};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sources::{CandidateSource, enrich, synthesize};

const POKHARA: Coordinate = Coordinate {
    latitude: 28.2096,
    longitude: 83.9856,
};

fn bare_records(n: u64) -> Vec<LodgingRecord> {
    (0..n)
        .map(|i| LodgingRecord {
            id: i,
            name: format!("Lakeside Lodge {}", i),
            locality: "Pokhara".to_string(),
            latitude: POKHARA.latitude + (i % 50) as f64 * 0.0005,
            longitude: POKHARA.longitude + (i / 50) as f64 * 0.0005,
            price_per_night: None,
            rating: None,
            review_count: None,
            amenities: Vec::new(),
            thumbnail: None,
        })
        .collect()
}

fn bench_synthesize(c: &mut Criterion) {
    c.bench_function("synthesize", |b| {
        b.iter(|| {
            let candidates = synthesize(black_box(POKHARA));
            black_box(candidates)
        })
    });
}

fn bench_enrich(c: &mut Criterion) {
    let records = bare_records(500);

    c.bench_function("enrich_500", |b| {
        b.iter(|| {
            let candidates: Vec<_> = black_box(&records).iter().cloned().map(enrich).collect();
            black_box(candidates)
        })
    });
}

fn bench_offline_fetch(c: &mut Criterion) {
    let source = CandidateSource::offline();

    c.bench_function("fetch_near_offline", |b| {
        b.iter(|| {
            let outcome = source.fetch_near(black_box(POKHARA), black_box(5000));
            black_box(outcome)
        })
    });
}

criterion_group!(benches, bench_synthesize, bench_enrich, bench_offline_fetch);
criterion_main!(benches);
