// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use bulwark_spatial::{RTree, Rect};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree as RStarTree};

const MAX_ID: usize = 65_535;

type Tree = RTree<u32, MAX_ID, 16, 16>;
type RStarEntry = GeomWithData<Rectangle<[f32; 2]>, u32>;

fn gen_grid_rects(n: usize, cell: f32) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f32 * cell;
            let y0 = y as f32 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

fn to_rstar(rects: &[Rect]) -> Vec<RStarEntry> {
    rects
        .iter()
        .enumerate()
        .map(|(i, r)| {
            GeomWithData::new(
                Rectangle::from_corners([r.a.x, r.a.y], [r.b.x, r.b.y]),
                i as u32,
            )
        })
        .collect()
}

fn bench_build_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    for &n in &[64_usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let query = Rect::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("bulwark_build_query_n{n}"), |b| {
            b.iter(|| {
                let mut tree = Tree::new();
                for (i, r) in rects.iter().enumerate() {
                    tree.insert(i as u32, *r);
                }
                black_box(tree.query_rect(query).count());
            });
        });

        group.bench_function(format!("rstar_build_query_n{n}"), |b| {
            b.iter_batched(
                || to_rstar(&rects),
                |entries| {
                    let mut tree = RStarTree::new();
                    for e in entries {
                        tree.insert(e);
                    }
                    let aabb = AABB::from_corners([query.a.x, query.a.y], [query.b.x, query.b.y]);
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Move every entry once. rstar has no id-addressed update, so it removes the
/// old geometry and inserts the new.
fn bench_move_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_move");
    let rects = gen_grid_rects(96, 10.0);
    let moved: Vec<Rect> = rects
        .iter()
        .map(|r| r.translate(bulwark_spatial::Vec2::new(3.0, -2.0)))
        .collect();
    group.throughput(Throughput::Elements(rects.len() as u64));

    group.bench_function("bulwark_update", |b| {
        b.iter_batched(
            || {
                let mut tree = Tree::new();
                for (i, r) in rects.iter().enumerate() {
                    tree.insert(i as u32, *r);
                }
                tree
            },
            |mut tree| {
                for (i, r) in moved.iter().enumerate() {
                    let _ = tree.update(i as u32, *r);
                }
                black_box(tree.len());
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("rstar_remove_insert", |b| {
        b.iter_batched(
            || RStarTree::bulk_load(to_rstar(&rects)),
            |mut tree| {
                let old = to_rstar(&rects);
                for (e, n) in old.iter().zip(to_rstar(&moved)) {
                    tree.remove(e);
                    tree.insert(n);
                }
                black_box(tree.size());
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build_query, bench_move_all);
criterion_main!(benches);
