use collision_astar::{DynamicBlocks, Pathfinder, Point};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_pathfinder(n: usize, rng: &mut StdRng) -> Pathfinder {
    let map = (0..n * n)
        .map(|_| if rng.gen_bool(0.25) { '1' } else { '0' })
        .collect::<String>();
    Pathfinder::new(&map, n, n).unwrap()
}

fn random_point(n: usize, rng: &mut StdRng) -> Point {
    Point::new(rng.gen_range(0..n) as i32, rng.gen_range(0..n) as i32)
}

fn random_scenarios(n: usize, count: usize, rng: &mut StdRng) -> Vec<(Point, Point)> {
    (0..count)
        .map(|_| (random_point(n, rng), random_point(n, rng)))
        .collect()
}

fn random_grid_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in [32, 128] {
        let mut pathfinder = random_pathfinder(n, &mut rng);
        let scenarios = random_scenarios(n, 100, &mut rng);
        let blocks: DynamicBlocks = (0..n as i32 / 2)
            .map(|i| Point::new(i * 2, n as i32 / 2))
            .collect();
        for prefilter in [true, false] {
            pathfinder.prefilter_components = prefilter;
            let prefilter_str = if prefilter { " (components)" } else { "" };
            c.bench_function(format!("random {n}x{n}{prefilter_str}").as_str(), |b| {
                b.iter(|| {
                    for (start, end) in &scenarios {
                        let _ = black_box(pathfinder.get_path_single_goal(*start, *end, &blocks));
                    }
                })
            });
        }
    }
}

criterion_group!(benches, random_grid_bench);
criterion_main!(benches);
