use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stripscan::{analyze_strip, reference, Catalog, MemorySource, PixelRegion, Rgb};

fn full_strip_fixture() -> (Catalog, stripscan::ReferenceTable, Vec<PixelRegion>) {
    let catalog = Catalog::urine_10();

    let mut source = MemorySource::new();
    for (i, pad) in catalog.pads().iter().enumerate() {
        let rows = (0..6)
            .map(|level| {
                Rgb::new(
                    240.0 - level as f64 * 35.0,
                    220.0 - level as f64 * 30.0 - i as f64,
                    200.0 - level as f64 * 25.0,
                )
            })
            .collect();
        source.insert(pad.code.clone(), rows);
    }
    let table = reference::build(&catalog, &source)
        .expect("fixture catalog is valid")
        .table;

    let regions = (0..10u8)
        .map(|i| PixelRegion::uniform(64, 64, [180 - i * 10, 160, 150]))
        .collect();

    (catalog, table, regions)
}

fn benchmark_strip_classification(c: &mut Criterion) {
    let (catalog, table, regions) = full_strip_fixture();

    c.bench_function("analyze_strip_10_pads", |b| {
        b.iter(|| {
            let report = analyze_strip(black_box(&catalog), black_box(&regions), black_box(&table));
            black_box(report)
        })
    });
}

criterion_group!(benches, benchmark_strip_classification);
criterion_main!(benches);
