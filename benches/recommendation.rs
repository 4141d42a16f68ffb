use agrisight::{derive_recommendation, derive_recommendation_at, DemoScenario};
use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_recommendation");

    for scenario in DemoScenario::ALL {
        let s = scenario.snapshot();
        group.bench_function(scenario.as_str(), |b| {
            b.iter(|| {
                derive_recommendation(
                    black_box(s.ndvi),
                    black_box(s.rainfall_deficit_mm),
                    black_box(s.balance),
                )
            })
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    // 0.01 NDVI steps across a fixed deficit/balance grid
    let at = Utc::now();
    c.bench_function("ndvi_sweep_100", |b| {
        b.iter(|| {
            (0..100)
                .map(|i| derive_recommendation_at(i as f64 / 100.0, -12.5, 1250.5, at))
                .filter(|r| r.confidence > 0.7)
                .count()
        })
    });
}

criterion_group!(benches, bench_scenarios, bench_sweep);
criterion_main!(benches);
