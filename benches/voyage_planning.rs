//! Benchmarks for itinerary planning and path interpolation.
//!
//! Run with: `cargo bench --bench voyage_planning`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use voyageline::{GeoPoint, RawEvent, RouteConfig, VoyageEngine, linear_interpolate, plan_voyages};

fn southampton_round_trip() -> Vec<RawEvent> {
    vec![
        RawEvent::new(1, "Southampton")
            .with_type("embark")
            .with_coordinates(50.90, -1.40),
        RawEvent::new(2, "At Sea"),
        RawEvent::new(3, "La Coruña").with_coordinates(43.36, -8.41),
        RawEvent::new(4, "Lisbon").with_coordinates(38.72, -9.14),
        RawEvent::new(5, "Cadiz").with_coordinates(36.53, -6.29),
        RawEvent::new(6, "At Sea"),
        RawEvent::new(7, "Southampton")
            .with_type("disembark")
            .with_coordinates(50.90, -1.40),
    ]
}

fn mediterranean_grand_tour() -> Vec<RawEvent> {
    let ports = [
        ("Barcelona", 41.38, 2.17),
        ("Palma", 39.57, 2.65),
        ("Marseille", 43.30, 5.37),
        ("Genoa", 44.41, 8.93),
        ("Livorno", 43.55, 10.30),
        ("Civitavecchia", 42.09, 11.79),
        ("Naples", 40.85, 14.27),
        ("Messina", 38.19, 15.55),
        ("Bari", 41.13, 16.87),
        ("Dubrovnik", 42.65, 18.09),
        ("Kotor", 42.42, 18.77),
        ("Corfu", 39.62, 19.92),
        ("Piraeus", 37.94, 23.64),
        ("Mykonos", 37.45, 25.33),
        ("Valletta", 35.90, 14.51),
        ("Malaga", 36.72, -4.42),
        ("Lisbon", 38.72, -9.14),
        ("Southampton", 50.90, -1.40),
    ];

    let mut events = Vec::new();
    for (i, (name, lat, lon)) in ports.iter().enumerate() {
        let day = (i * 2 + 1) as u32;
        events.push(RawEvent::new(day, name).with_coordinates(*lat, *lon));
        events.push(RawEvent::new(day + 1, "At Sea"));
    }
    events
}

fn bench_plan(c: &mut Criterion) {
    let engine = VoyageEngine::new();
    let mut group = c.benchmark_group("plan");

    for (name, events) in [
        ("round_trip", southampton_round_trip()),
        ("grand_tour", mediterranean_grand_tour()),
    ] {
        group.bench_with_input(BenchmarkId::new("default", name), &events, |b, events| {
            b.iter(|| engine.plan(black_box(events)));
        });
    }

    let dense = VoyageEngine::new().with_config(RouteConfig {
        interpolation_spacing_meters: 5_000.0,
        ..RouteConfig::default()
    });
    let tour = mediterranean_grand_tour();
    group.bench_function("dense_grand_tour", |b| {
        b.iter(|| dense.plan(black_box(&tour)));
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let engine = VoyageEngine::new();
    let itineraries: Vec<Vec<RawEvent>> = (0..64)
        .map(|i| {
            if i % 2 == 0 {
                southampton_round_trip()
            } else {
                mediterranean_grand_tour()
            }
        })
        .collect();

    c.bench_function("plan_voyages_64", |b| {
        b.iter(|| plan_voyages(&engine, black_box(&itineraries)));
    });
}

fn bench_linear_interpolate(c: &mut Criterion) {
    let a = GeoPoint::new(50.90, -1.40);
    let b = GeoPoint::new(35.95, -5.6);
    let mut group = c.benchmark_group("linear_interpolate");

    for spacing in [100_000.0, 10_000.0, 1_000.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(spacing as u64),
            &spacing,
            |bench, &spacing| {
                bench.iter(|| linear_interpolate(black_box(&a), black_box(&b), spacing, 2));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_plan, bench_batch, bench_linear_interpolate);
criterion_main!(benches);
