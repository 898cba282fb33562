// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions to and from Kurbo geometry.
//!
//! Kurbo is `f64`; going from Kurbo to this crate rounds to the nearest `f32`.
//! Kurbo rectangles are normalized with [`kurbo::Rect::abs`] first, so corners
//! given in either order map to a valid [`Rect`].

use crate::geom::{Rect, Vec2};

impl From<Vec2> for kurbo::Vec2 {
    fn from(v: Vec2) -> Self {
        Self::new(f64::from(v.x), f64::from(v.y))
    }
}

impl From<Vec2> for kurbo::Point {
    fn from(v: Vec2) -> Self {
        Self::new(f64::from(v.x), f64::from(v.y))
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Game coordinates fit in f32; rounding is intended."
)]
impl From<kurbo::Vec2> for Vec2 {
    fn from(v: kurbo::Vec2) -> Self {
        Self::new(v.x as f32, v.y as f32)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Game coordinates fit in f32; rounding is intended."
)]
impl From<kurbo::Point> for Vec2 {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(
            f64::from(r.a.x),
            f64::from(r.a.y),
            f64::from(r.b.x),
            f64::from(r.b.y),
        )
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Game coordinates fit in f32; rounding is intended."
)]
impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32)
    }
}
