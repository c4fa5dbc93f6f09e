use criterion::criterion_main;
use geo::{LineString, Point, line_string, point};
use trellis::config::{MatchPreferences, MatcherConfig};
use trellis::{InMemoryNetwork, MapMatcherFactory, NetworkBuilder};
use trellis_fixtures::{BLOCK_GRID, BLOCK_GRID_TRACE};
use wkt::TryFromWkt;

const SPACING: f64 = 0.002;

struct MatchScenario {
    name: &'static str,
    network: fn() -> InMemoryNetwork,
    trace: fn() -> Vec<Point>,
}

/// A square grid of two-way streets, `blocks` intersections along each side.
fn synthetic_grid(blocks: usize) -> InMemoryNetwork {
    let mut builder = NetworkBuilder::default();

    for row in 0..blocks {
        for column in 0..blocks - 1 {
            let (x, y) = (column as f64 * SPACING, row as f64 * SPACING);

            builder.add_two_way(line_string![(x: x, y: y), (x: x + SPACING, y: y)]);
            builder.add_two_way(line_string![(x: y, y: x), (x: y, y: x + SPACING)]);
        }
    }

    builder.build()
}

/// A staircase across the synthetic grid, alternating east and north
/// each block, with a measurement roughly every 44m.
fn staircase() -> Vec<Point> {
    let step = SPACING / 5.0;

    (0..40)
        .flat_map(|leg: usize| {
            let corner = (leg / 2) as f64 * SPACING;

            (0..5).map(move |k| {
                let offset = k as f64 * step;
                let noise = if k % 2 == 0 { 0.00003 } else { -0.00003 };

                if leg % 2 == 0 {
                    point! { x: corner + offset, y: corner + noise }
                } else {
                    point! { x: corner + SPACING + noise, y: corner + offset }
                }
            })
        })
        .collect()
}

const MATCH_CASES: [MatchScenario; 2] = [
    MatchScenario {
        name: "BLOCK_GRID",
        network: || NetworkBuilder::default().with_wkt(BLOCK_GRID).build(),
        trace: || {
            LineString::try_from_wkt_str(BLOCK_GRID_TRACE)
                .expect("Linestring must parse successfully.")
                .points()
                .collect()
        },
    },
    MatchScenario {
        name: "SYNTHETIC_STAIRCASE",
        network: || synthetic_grid(24),
        trace: staircase,
    },
];

fn target_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("offline_match");
    group.significance_level(0.1).sample_size(30);

    MATCH_CASES.into_iter().for_each(|sc| {
        let network = (sc.network)();
        let trace = (sc.trace)();

        let mut factory = MapMatcherFactory::new(&network, MatcherConfig::default())
            .expect("Factory must be created");

        group.bench_function(format!("match: {}", sc.name), |b| {
            b.iter(|| {
                let mut matcher = factory
                    .create(&MatchPreferences::default())
                    .expect("Matcher must be created");

                let measurements = matcher.measure(trace.iter().copied());
                let results = matcher
                    .offline_match(&measurements)
                    .expect("Match must complete successfully");

                assert_eq!(results.len(), measurements.len());
            })
        });

        factory.clear_cache();
    });

    group.finish();
}

criterion::criterion_group!(targeted_benches, target_benchmark);
criterion_main!(targeted_benches);
