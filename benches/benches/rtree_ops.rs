// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bulwark_spatial::{BoundsPolicy, ChooseStrategy, RTree, RTreeConfig, Rect, Vec2};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

const MAX_ID: usize = 65_535;

type Tree8 = RTree<u32, MAX_ID, 8, 8>;
type Tree16 = RTree<u32, MAX_ID, 16, 16>;
type Tree32 = RTree<u32, MAX_ID, 32, 32>;

fn gen_random_rects(count: usize, extent: f32, size: f32, seed: u64) -> Vec<Rect> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|_| {
            let x = rng.f32() * (extent - size);
            let y = rng.f32() * (extent - size);
            Rect::new(x, y, x + size, y + size)
        })
        .collect()
}

fn gen_clustered_rects(clusters: usize, per_cluster: usize, spread: f32, seed: u64) -> Vec<Rect> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut out = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let c = Vec2::new(rng.f32() * 2000.0, rng.f32() * 2000.0);
        for _ in 0..per_cluster {
            let p = c + Vec2::new(rng.f32() * spread, rng.f32() * spread);
            out.push(Rect::from_center_size(p, Vec2::new(4.0, 4.0)));
        }
    }
    out
}

fn build<const L: usize, const M: usize>(
    config: RTreeConfig,
    rects: &[Rect],
) -> RTree<u32, MAX_ID, L, M> {
    let mut tree = RTree::with_config(config);
    for (i, r) in rects.iter().enumerate() {
        tree.insert(i as u32, *r);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_build");
    let scalar = RTreeConfig::default().with_choose(ChooseStrategy::Scalar);
    let columnar = RTreeConfig::default().with_choose(ChooseStrategy::Columnar);
    for &n in &[1_000usize, 10_000] {
        let rects = gen_random_rects(n, 2000.0, 8.0, 0xCAFE);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("fanout8_scalar_n{n}"), |b| {
            b.iter(|| black_box(build::<8, 8>(scalar, &rects).height()));
        });
        group.bench_function(format!("fanout16_scalar_n{n}"), |b| {
            b.iter(|| black_box(build::<16, 16>(scalar, &rects).height()));
        });
        group.bench_function(format!("fanout16_columnar_n{n}"), |b| {
            b.iter(|| black_box(build::<16, 16>(columnar, &rects).height()));
        });
        group.bench_function(format!("fanout32_scalar_n{n}"), |b| {
            b.iter(|| black_box(build::<32, 32>(scalar, &rects).height()));
        });
        group.bench_function(format!("fanout32_columnar_n{n}"), |b| {
            b.iter(|| black_box(build::<32, 32>(columnar, &rects).height()));
        });
    }
    group.finish();
}

/// One simulation tick: every entity drifts a little.
fn bench_update_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_update_tick");
    let n = 10_000_usize;
    let rects = gen_clustered_rects(50, n / 50, 200.0, 0xF00D);
    let mut rng = fastrand::Rng::with_seed(0xBEEF);
    let moves: Vec<Vec2> = (0..n)
        .map(|_| Vec2::new(rng.f32() * 2.0 - 1.0, rng.f32() * 2.0 - 1.0))
        .collect();
    group.throughput(Throughput::Elements(n as u64));

    for (name, bounds) in [("tight", BoundsPolicy::Tight), ("loose", BoundsPolicy::Loose)] {
        let config = RTreeConfig::default().with_bounds(bounds);
        group.bench_function(format!("{name}_small_moves"), |b| {
            b.iter_batched(
                || build::<16, 16>(config, &rects),
                |mut tree: Tree16| {
                    for (i, (r, d)) in rects.iter().zip(&moves).enumerate() {
                        let _ = tree.update(i as u32, r.translate(*d));
                    }
                    black_box(tree.len());
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("{name}_teleports"), |b| {
            b.iter_batched(
                || build::<16, 16>(config, &rects),
                |mut tree: Tree16| {
                    for (i, r) in rects.iter().enumerate().rev() {
                        let _ = tree.update(i as u32, r.translate(Vec2::new(500.0, 500.0)));
                    }
                    black_box(tree.len());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_query");
    let n = 20_000_usize;
    let rects = gen_random_rects(n, 2000.0, 8.0, 0xABCD);
    let config = RTreeConfig::default();
    let t8: Tree8 = build(config, &rects);
    let t16: Tree16 = build(config, &rects);
    let t32: Tree32 = build(config, &rects);
    let queries = gen_random_rects(256, 2000.0, 100.0, 0x1234);
    let points: Vec<Vec2> = queries.iter().map(Rect::center).collect();

    group.bench_function("rect_fanout8", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for q in &queries {
                t8.find_intersect(q, |_, _| hits += 1);
            }
            black_box(hits);
        });
    });
    group.bench_function("rect_fanout16", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for q in &queries {
                t16.find_intersect(q, |_, _| hits += 1);
            }
            black_box(hits);
        });
    });
    group.bench_function("rect_fanout32", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for q in &queries {
                t32.find_intersect(q, |_, _| hits += 1);
            }
            black_box(hits);
        });
    });
    group.bench_function("point_fanout16", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for p in &points {
                t16.find_point(*p, |_, _| hits += 1);
            }
            black_box(hits);
        });
    });
    group.bench_function("rect_brute_force", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for q in &queries {
                hits += rects.iter().filter(|r| r.intersects(q)).count();
            }
            black_box(hits);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_update_tick, bench_query);
criterion_main!(benches);
