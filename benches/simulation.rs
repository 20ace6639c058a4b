//! Performance benchmarks for savanna

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use savanna::grid::Grid;
use savanna::herd::Herd;
use savanna::pride::Pride;
use savanna::{advance_tick, terrain, Carviz, Config, Erbast, World};

fn benchmark_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    for grid_size in [25, 50, 100].iter() {
        let mut config = Config::default();
        config.world.grid_size = *grid_size;
        config.erbast.initial_count = grid_size * grid_size / 10;
        config.carviz.initial_count = grid_size * grid_size / 25;

        let mut world = World::new_with_seed(config, 42);

        // Warm up
        world.run(10);

        group.bench_with_input(BenchmarkId::new("grid", grid_size), grid_size, |b, _| {
            b.iter(|| {
                world.step();
            });
        });
    }

    group.finish();
}

fn benchmark_generation(c: &mut Criterion) {
    let config = Config::default();

    c.bench_function("terrain_build_50", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| terrain::build(black_box(&config), &mut rng));
    });
}

fn benchmark_crowded_tick(c: &mut Criterion) {
    let mut grid = Grid::uniform(20, 50);
    for at in grid.coords().collect::<Vec<_>>() {
        for energy in [30, 60, 90] {
            grid.cell_mut(at).herd.push(Erbast::new(at, 10, energy));
        }
        if (at.0 + at.1) % 3 == 0 {
            grid.cell_mut(at).pride.push(Carviz::new(at, 10, 70));
        }
    }

    c.bench_function("advance_tick_crowded_20", |b| {
        b.iter_batched(
            || (grid.clone(), ChaCha8Rng::seed_from_u64(3)),
            |(mut grid, mut rng)| advance_tick(&mut grid, &mut rng),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn benchmark_grazing(c: &mut Criterion) {
    let mut herd = Herd::new((0, 0));
    for energy in 0..60 {
        herd.push(Erbast::new((0, 0), 10, energy));
    }

    c.bench_function("herd_graze_60", |b| {
        b.iter_batched(
            || (herd.clone(), savanna::grid::Vegetob::new(80)),
            |(mut herd, mut vegetob)| herd.graze(&mut vegetob),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn benchmark_fight(c: &mut Criterion) {
    let mut pride = Pride::new((5, 5));
    for idx in 0..30 {
        let mut carviz = Carviz::new((5, 5), 10, 40 + idx);
        carviz.previously_visited = Some((4 + (idx as usize % 3), 4));
        pride.push(carviz);
    }

    c.bench_function("pride_fight_30", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        b.iter_batched(
            || pride.clone(),
            |mut pride| pride.resolve_fight(&mut rng),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_world_step,
    benchmark_generation,
    benchmark_crowded_tick,
    benchmark_grazing,
    benchmark_fight,
);

criterion_main!(benches);
