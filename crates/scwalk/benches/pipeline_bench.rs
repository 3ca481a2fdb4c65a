//! Criterion microbenches for the generation pipeline.
//!
//! - complex construction (sampling + Delaunay + filtering) at 200/400/800 nodes,
//! - incidence matrices,
//! - walk routing and encoding of 300 walks.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use scwalk::api::{
    default_holes, generate_walks, DelaunayTriangulator, RegionPartition, SimplicialComplex,
    TrainingEncoder,
};

fn complex(n: usize, seed: u64) -> SimplicialComplex {
    let mut rng = StdRng::seed_from_u64(seed);
    SimplicialComplex::build(n, &default_holes(), &DelaunayTriangulator, &mut rng)
        .expect("bench complex")
}

fn bench_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("complex");
    for n in [200usize, 400, 800] {
        group.bench_function(BenchmarkId::new("build", n), |b| {
            b.iter_batched(
                || StdRng::seed_from_u64(n as u64),
                |mut rng| {
                    let _ = SimplicialComplex::build(n, &default_holes(), &DelaunayTriangulator, &mut rng);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let sc = complex(400, 1);
    group.bench_function(BenchmarkId::new("incidence_matrices", 400), |b| {
        b.iter(|| sc.incidence_matrices())
    });
    group.finish();
}

fn bench_walks(c: &mut Criterion) {
    let mut group = c.benchmark_group("walks");
    let sc = complex(400, 1);
    let regions = RegionPartition::from_complex(&sc);
    let b1 = sc.b1();
    let hops = [1usize, 2, 3];
    group.bench_function(BenchmarkId::new("generate_walks", 300), |b| {
        b.iter_batched(
            || StdRng::seed_from_u64(9),
            |mut rng| {
                let _ = generate_walks(&sc.graph, &regions, 300, &mut rng);
            },
            BatchSize::SmallInput,
        )
    });
    let mut rng = StdRng::seed_from_u64(9);
    if let Ok(walks) = generate_walks(&sc.graph, &regions, 300, &mut rng) {
        let enc = TrainingEncoder::for_complex(&sc, &b1, &hops).expect("bench encoder");
        group.bench_function(BenchmarkId::new("encode", 300), |b| {
            b.iter_batched(
                || StdRng::seed_from_u64(3),
                |mut rng| {
                    let _ = enc.encode(&walks, &mut rng);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_complex, bench_walks);
criterion_main!(benches);
