// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structure-of-arrays rectangle store with lane-wise scans.
//!
//! [`RectColumns`] keeps each coordinate in its own array so that area and
//! containment tests over many rectangles run as fixed-width blocks the
//! compiler can vectorize. The R-tree gathers a middle node's child rectangles
//! into one of these when choosing a subtree at large fan-outs.

use alloc::vec::Vec;

use bulwark_table::Error;

use crate::geom::Rect;

/// Default block width for lane-wise scans.
pub const LANES: usize = 8;

/// Fixed-capacity rectangle store laid out as four coordinate columns.
#[derive(Clone, Debug, Default)]
pub struct RectColumns {
    min_x: Vec<f32>,
    min_y: Vec<f32>,
    max_x: Vec<f32>,
    max_y: Vec<f32>,
    capacity: usize,
}

impl RectColumns {
    /// Create an empty store holding at most `capacity` rectangles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            min_x: Vec::with_capacity(capacity),
            min_y: Vec::with_capacity(capacity),
            max_x: Vec::with_capacity(capacity),
            max_y: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of rectangles.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored rectangles.
    pub fn len(&self) -> usize {
        self.min_x.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.min_x.is_empty()
    }

    /// Remove all rectangles, keeping storage.
    pub fn clear(&mut self) {
        self.min_x.clear();
        self.min_y.clear();
        self.max_x.clear();
        self.max_y.clear();
    }

    /// Append a rectangle, or fail with [`Error::CapacityExceeded`] when full.
    pub fn push(&mut self, rect: Rect) -> Result<(), Error> {
        if self.len() == self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.min_x.push(rect.a.x);
        self.min_y.push(rect.a.y);
        self.max_x.push(rect.b.x);
        self.max_y.push(rect.b.y);
        Ok(())
    }

    /// The rectangle at `i`.
    pub fn get(&self, i: usize) -> Option<Rect> {
        Some(Rect::new(
            *self.min_x.get(i)?,
            self.min_y[i],
            self.max_x[i],
            self.max_y[i],
        ))
    }

    /// Overwrite the rectangle at `i`. Returns false if `i` is out of range.
    pub fn set(&mut self, i: usize, rect: Rect) -> bool {
        if i >= self.len() {
            return false;
        }
        self.min_x[i] = rect.a.x;
        self.min_y[i] = rect.a.y;
        self.max_x[i] = rect.b.x;
        self.max_y[i] = rect.b.y;
        true
    }

    /// Index of the first stored rectangle that contains `rect`.
    ///
    /// Scans blocks of `W` lanes; each block is tested in full before its mask
    /// is searched.
    pub fn find_contains_rect<const W: usize>(&self, rect: &Rect) -> Option<usize> {
        assert!(W > 0, "block width must be positive");
        let blocks = self
            .min_x
            .chunks(W)
            .zip(self.min_y.chunks(W))
            .zip(self.max_x.chunks(W).zip(self.max_y.chunks(W)));
        for (block, ((x0, y0), (x1, y1))) in blocks.enumerate() {
            let mut mask = [false; W];
            for l in 0..x0.len() {
                mask[l] = x0[l] <= rect.a.x
                    && y0[l] <= rect.a.y
                    && rect.b.x <= x1[l]
                    && rect.b.y <= y1[l];
            }
            if let Some(l) = mask[..x0.len()].iter().position(|&m| m) {
                return Some(block * W + l);
            }
        }
        None
    }

    /// Index of the rectangle that grows least by absorbing `rect`.
    ///
    /// Ties go to the lowest index. A rectangle that already contains `rect`
    /// is returned without computing areas. Returns `None` when empty.
    pub fn choose_best<const W: usize>(&self, rect: &Rect) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        if let Some(i) = self.find_contains_rect::<W>(rect) {
            return Some(i);
        }
        let mut best_idx = 0;
        let mut best_cost: Option<f32> = None;
        let blocks = self
            .min_x
            .chunks(W)
            .zip(self.min_y.chunks(W))
            .zip(self.max_x.chunks(W).zip(self.max_y.chunks(W)));
        for (block, ((x0, y0), (x1, y1))) in blocks.enumerate() {
            let mut cost = [0.0_f32; W];
            for l in 0..x0.len() {
                let ux0 = x0[l].min(rect.a.x);
                let uy0 = y0[l].min(rect.a.y);
                let ux1 = x1[l].max(rect.b.x);
                let uy1 = y1[l].max(rect.b.y);
                let grown = (ux1 - ux0) * (uy1 - uy0);
                let own = (x1[l] - x0[l]) * (y1[l] - y0[l]);
                cost[l] = grown - own;
            }
            for (l, &c) in cost[..x0.len()].iter().enumerate() {
                if best_cost.map(|bc| c < bc).unwrap_or(true) {
                    best_cost = Some(c);
                    best_idx = block * W + l;
                }
            }
        }
        Some(best_idx)
    }
}
