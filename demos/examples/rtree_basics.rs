// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree basics.
//!
//! Builds the small staircase tree, prints its queries, then moves and deletes
//! entries. Splits and unlinks are logged at `debug`.
//!
//! Run:
//! - `RUST_LOG=bulwark_spatial=debug cargo run -p bulwark_demos --example rtree_basics`

use bulwark_spatial::{BoundsPolicy, RTree, RTreeConfig, Rect, Vec2};
use tracing_subscriber::EnvFilter;

type Tree = RTree<u32, 255, 4, 3>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut tree = Tree::new();
    for i in 0..=10_u32 {
        let o = 8.0 - i as f32;
        tree.insert(i, Rect::new(o, o, o + 2.0, o + 2.0));
    }
    println!("== Staircase ==");
    println!("{tree:?}");
    println!("bounds: {:?}", tree.bounds());

    println!("== Intersecting (0,0)-(2,2), traversal order ==");
    tree.find_intersect(&Rect::new(0.0, 0.0, 2.0, 2.0), |id, r| {
        println!("  {id}: {r:?}");
    });

    println!("== Containing (3.5, 3.5) ==");
    for (id, _) in tree.query_point(Vec2::new(3.5, 3.5)) {
        println!("  {id}");
    }

    // Small move stays in its leaf; a big one reinserts.
    tree.update(6, Rect::new(1.5, 1.5, 3.5, 3.5)).unwrap();
    tree.update(0, Rect::new(-40.0, -40.0, -38.0, -38.0)).unwrap();
    println!("== After updates ==");
    println!("bounds: {:?}", tree.bounds());

    // Kurbo interop for renderers.
    let k: kurbo::Rect = tree.get(0).unwrap().into();
    println!("id 0 as kurbo: {k:?}");

    for id in [7, 8, 9, 10] {
        tree.delete(id).unwrap();
    }
    println!("== After deletes ==");
    println!("{tree:?}");
    println!("delete(7) again: {:?}", tree.delete(7));

    let mut loose: Tree = RTree::with_config(RTreeConfig::default().with_bounds(BoundsPolicy::Loose));
    for (id, r) in tree.iter() {
        loose.insert(id, r);
    }
    loose.delete(0).unwrap();
    tree.delete(0).unwrap();
    println!("== Tight vs loose bounds after deleting the outlier ==");
    println!("tight: {:?}", tree.bounds());
    println!("loose: {:?}", loose.bounds());
}
