use criterion::{BatchSize, criterion_main};
use geo::LineString;
use radnetz::attribute::{EdgeAttributes, SourceSystem, SpeedLimit};
use radnetz::linear::LinearAttribute;
use radnetz::{GapCloser, GapConfig, Network, NetworkBuilder, NetworkConfig};
use radnetz_fixtures::LINEAR_GAP;
use wkt::TryFromWkt;

struct GridScenario {
    name: &'static str,
    rows: usize,
    blocks: usize,
}

const GRID_CASES: [GridScenario; 2] = [
    GridScenario {
        name: "10x10",
        rows: 10,
        blocks: 10,
    },
    GridScenario {
        name: "50x50",
        rows: 50,
        blocks: 50,
    },
];

/// Rows of blocks, each an attributed edge, three attribute-less edges and
/// another attributed edge, repeating the linear gap fixture with offsets.
fn grid(rows: usize, blocks: usize) -> Network {
    let mut builder = NetworkBuilder::new(&NetworkConfig::default());
    let attributed = EdgeAttributes {
        speed: LinearAttribute::uniform(SpeedLimit::UpTo30),
        ..EdgeAttributes::default()
    };

    for row in 0..rows {
        let y = row as f64 * 200.0;

        for block in 0..blocks {
            let x = block as f64 * 500.0;

            for (index, (from, to)) in [0.0, 100.0, 200.0, 300.0, 400.0, 500.0]
                .windows(2)
                .map(|pair| (pair[0], pair[1]))
                .enumerate()
            {
                let geometry = LineString::from(vec![(x + from, y), (x + to, y)]);
                let attributes = if index == 0 || index == 4 {
                    attributed.clone()
                } else {
                    EdgeAttributes::default()
                };

                builder
                    .add_with_attributes(geometry, SourceSystem::Dlm, attributes)
                    .expect("Grid edge must be accepted");
            }
        }
    }

    builder.build()
}

fn fixture() -> Network {
    let mut builder = NetworkBuilder::new(&NetworkConfig::default());
    for edge in LINEAR_GAP {
        let geometry = LineString::try_from_wkt_str(edge.geometry)
            .expect("Linestring must parse successfully.");
        let attributes = if edge.attributed {
            EdgeAttributes {
                speed: LinearAttribute::uniform(SpeedLimit::UpTo30),
                ..EdgeAttributes::default()
            }
        } else {
            EdgeAttributes::default()
        };

        builder
            .add_with_attributes(geometry, SourceSystem::Dlm, attributes)
            .expect("Fixture edge must be accepted");
    }

    builder.build()
}

fn target_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("gap_closing");
    group.significance_level(0.1).sample_size(30);

    let closer = GapCloser::new(&GapConfig::default());

    group.bench_function("close: linear fixture", |b| {
        b.iter_batched(
            fixture,
            |mut network| {
                let statistics = closer
                    .run(&mut network, &mut Vec::new())
                    .expect("Run must complete successfully");
                assert_eq!(statistics.gaps_closed, 1);
            },
            BatchSize::SmallInput,
        )
    });

    GRID_CASES.into_iter().for_each(|sc| {
        group.bench_function(format!("build: {}", sc.name), |b| {
            b.iter(|| grid(sc.rows, sc.blocks))
        });

        let network = grid(sc.rows, sc.blocks);
        group.bench_function(format!("close: {}", sc.name), |b| {
            b.iter_batched(
                || network.clone(),
                |mut network| {
                    let statistics = closer
                        .run(&mut network, &mut Vec::new())
                        .expect("Run must complete successfully");
                    assert_eq!(statistics.gaps_closed, sc.rows * sc.blocks);
                },
                BatchSize::LargeInput,
            )
        });
    });

    group.finish();
}

criterion::criterion_group!(targeted_benches, target_benchmark);
criterion_main!(targeted_benches);
