// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;

use bulwark_table::{IdSet, SparseSet};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

const MAX_ID: usize = 65_535;

fn shuffled_ids(n: usize, seed: u64) -> Vec<u32> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut ids: Vec<u32> = (0..n as u32).collect();
    rng.shuffle(&mut ids);
    ids
}

fn bench_set_find_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_churn");
    for &n in &[1_000usize, 10_000, 50_000] {
        let ids = shuffled_ids(n, 0x5EED);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("set_n{n}"), |b| {
            b.iter_batched(
                SparseSet::<u32, [f32; 4], MAX_ID>::new,
                |mut set| {
                    for &id in &ids {
                        set.set(id, [id as f32; 4]);
                    }
                    black_box(set.len());
                },
                BatchSize::LargeInput,
            );
        });

        let mut full = SparseSet::<u32, [f32; 4], MAX_ID>::new();
        for &id in &ids {
            full.set(id, [id as f32; 4]);
        }
        group.bench_function(format!("find_n{n}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for &id in &ids {
                    hits += usize::from(full.find(id).is_some());
                }
                black_box(hits);
            });
        });

        group.bench_function(format!("iter_n{n}"), |b| {
            b.iter(|| {
                let sum: f32 = full.values().map(|v| v[0]).sum();
                black_box(sum);
            });
        });

        group.bench_function(format!("delete_n{n}"), |b| {
            b.iter_batched(
                || full.iter().map(|(id, v)| (id, *v)).collect::<Vec<_>>(),
                |rows| {
                    let mut set = SparseSet::<u32, [f32; 4], MAX_ID>::new();
                    for (id, v) in rows {
                        set.set(id, v);
                    }
                    for &id in &ids {
                        set.delete(id);
                    }
                    black_box(set.is_empty());
                },
                BatchSize::LargeInput,
            );
        });

        // Baseline: the same churn through a hash map.
        group.bench_function(format!("hashmap_set_find_n{n}"), |b| {
            b.iter(|| {
                let mut map = HashMap::with_capacity(n);
                for &id in &ids {
                    map.insert(id, [id as f32; 4]);
                }
                let mut hits = 0_usize;
                for &id in &ids {
                    hits += usize::from(map.contains_key(&id));
                }
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_two_phase_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_phase_delete");
    let n = 20_000_usize;
    let ids = shuffled_ids(n, 0xDEAD);
    group.throughput(Throughput::Elements(n as u64));

    group.bench_function("scratch_id_set", |b| {
        let mut scratch = IdSet::<u32, MAX_ID>::new();
        b.iter_batched(
            || {
                let mut set = SparseSet::<u32, i32, MAX_ID>::new();
                for &id in &ids {
                    set.set(id, (id % 4) as i32);
                }
                set
            },
            |mut set| {
                scratch.clear();
                for (id, hp) in set.iter() {
                    if *hp <= 0 {
                        scratch.set(id, ());
                    }
                }
                for id in scratch.ids() {
                    set.delete(id);
                }
                black_box(set.len());
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("retain", |b| {
        b.iter_batched(
            || {
                let mut set = SparseSet::<u32, i32, MAX_ID>::new();
                for &id in &ids {
                    set.set(id, (id % 4) as i32);
                }
                set
            },
            |mut set| {
                set.retain(|_, hp| *hp > 0);
                black_box(set.len());
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_set_find_delete, bench_two_phase_delete);
criterion_main!(benches);
