// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulwark Spatial: a dynamic R-tree for moving game entities.
//!
//! - [`Vec2`] and [`Rect`]: `f32` geometry with boundary-inclusive tests.
//! - [`RTree`]: Guttman R-tree keyed by entity id, with a reverse index so that
//!   updates and deletes reach their entry in O(1).
//! - [`RectColumns`]: a structure-of-arrays rectangle store with lane-wise
//!   scans, used by the tree to choose subtrees at large fan-outs.
//! - [`RTreeConfig`]: bounds maintenance and subtree selection knobs.
//!
//! # Example
//!
//! ```rust
//! use bulwark_spatial::{RTree, Rect, Vec2};
//!
//! // Ids up to 1023, at most 8 entries per leaf and 8 children per middle node.
//! let mut tree: RTree<u32, 1023, 8, 8> = RTree::new();
//! tree.insert(1, Rect::new(0.0, 0.0, 10.0, 10.0));
//! tree.insert(2, Rect::new(20.0, 0.0, 30.0, 10.0));
//!
//! // Touching edges count as intersecting.
//! let hits: Vec<u32> = tree
//!     .query_rect(Rect::new(10.0, 0.0, 20.0, 1.0))
//!     .map(|(id, _)| id)
//!     .collect();
//! assert_eq!(hits.len(), 2);
//!
//! // Move an entity and look it up by point.
//! tree.update(1, Rect::new(40.0, 40.0, 50.0, 50.0)).unwrap();
//! let hits: Vec<_> = tree.query_point(Vec2::new(45.0, 45.0)).collect();
//! assert_eq!(hits, [(1, Rect::new(40.0, 40.0, 50.0, 50.0))]);
//!
//! tree.delete(2).unwrap();
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): float math from the standard library.
//! - `libm`: float math from `libm` for `no_std` targets. One of `std` or
//!   `libm` must be enabled.
//! - `kurbo`: `From` conversions between this crate's geometry and Kurbo's.
//!
//! ### Float semantics
//!
//! Coordinates are assumed finite. Nothing is compared with an epsilon, so the
//! same inputs always build the same tree.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("bulwark_spatial requires either the `std` or `libm` feature");

pub mod columns;
pub mod config;
pub mod geom;
#[cfg(feature = "kurbo")]
pub mod interop;
pub mod rtree;

pub use bulwark_table::Error;
pub use columns::{LANES, RectColumns};
pub use config::{BoundsPolicy, ChooseStrategy, RTreeConfig};
pub use geom::{Rect, Vec2};
pub use rtree::RTree;
