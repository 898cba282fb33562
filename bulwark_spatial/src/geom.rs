// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vectors and axis-aligned rectangles.
//!
//! Everything here is plain `f32` arithmetic with no epsilon. The R-tree's
//! choose and split heuristics are built from [`Rect::union`] and
//! [`Rect::area`], so their results are reproducible bit for bit.

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "std")]
#[inline]
fn sqrt(v: f32) -> f32 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
fn sqrt(v: f32) -> f32 {
    libm::sqrtf(v)
}

#[cfg(feature = "std")]
#[inline]
fn atan2(y: f32, x: f32) -> f32 {
    y.atan2(x)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
fn atan2(y: f32, x: f32) -> f32 {
    libm::atan2f(y, x)
}

/// A 2D vector or point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a vector.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> f32 {
        sqrt(self.norm_sq())
    }

    /// Squared Euclidean length.
    #[inline]
    pub fn norm_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Angle from the positive x axis, in radians.
    #[inline]
    pub fn angle(self) -> f32 {
        atan2(self.y, self.x)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).norm()
    }

    /// Per-axis minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Per-axis maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle with min corner `a` and max corner `b`.
///
/// Zero-area rectangles are valid. All tests are boundary-inclusive: rectangles
/// that share only an edge or a corner intersect, and a point on the boundary
/// is contained.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    /// Minimum corner.
    pub a: Vec2,
    /// Maximum corner.
    pub b: Vec2,
}

impl Rect {
    /// The degenerate rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a rectangle from min and max coordinates.
    ///
    /// The caller guarantees `ax <= bx` and `ay <= by`.
    pub const fn new(ax: f32, ay: f32, bx: f32, by: f32) -> Self {
        Self {
            a: Vec2::new(ax, ay),
            b: Vec2::new(bx, by),
        }
    }

    /// The smallest rectangle with both points as corners, in any order.
    pub fn from_corners(p: Vec2, q: Vec2) -> Self {
        Self {
            a: p.min(q),
            b: p.max(q),
        }
    }

    /// A rectangle of `size` centered on `center`.
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            a: center - half,
            b: center + half,
        }
    }

    /// Width along x.
    #[inline]
    pub fn width(&self) -> f32 {
        self.b.x - self.a.x
    }

    /// Height along y.
    #[inline]
    pub fn height(&self) -> f32 {
        self.b.y - self.a.y
    }

    /// Width and height as a vector.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.b - self.a
    }

    /// Area.
    #[inline]
    pub fn area(&self) -> f32 {
        (self.b.x - self.a.x) * (self.b.y - self.a.y)
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Whether the two rectangles overlap or touch.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.a.x <= other.b.x
            && other.a.x <= self.b.x
            && self.a.y <= other.b.y
            && other.a.y <= self.b.y
    }

    /// Whether the point lies inside or on the boundary.
    #[inline]
    pub fn contains_vec(&self, p: Vec2) -> bool {
        self.a.x <= p.x && p.x <= self.b.x && self.a.y <= p.y && p.y <= self.b.y
    }

    /// Whether `other` lies entirely inside this rectangle (boundary included).
    #[inline]
    pub fn contains_rect(&self, other: &Self) -> bool {
        self.a.x <= other.a.x
            && self.a.y <= other.a.y
            && other.b.x <= self.b.x
            && other.b.y <= self.b.y
    }

    /// Smallest rectangle containing both.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            a: self.a.min(other.a),
            b: self.b.max(other.b),
        }
    }

    /// Area added to this rectangle by absorbing `other`.
    #[inline]
    pub fn enlargement(&self, other: &Self) -> f32 {
        self.union(other).area() - self.area()
    }

    /// The rectangle moved by `offset`.
    #[inline]
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            a: self.a + offset,
            b: self.b + offset,
        }
    }
}

impl Add for Rect {
    type Output = Self;

    /// Bounding union.
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.union(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_arithmetic() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.norm_sq(), 25.0);
        assert_eq!(v + Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert_eq!(v - Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0));
        assert_eq!(v * 2.0, Vec2::new(6.0, 8.0));
        assert_eq!(-v, Vec2::new(-3.0, -4.0));
        assert_eq!(v.min(Vec2::new(5.0, 0.0)), Vec2::new(3.0, 0.0));
        assert_eq!(v.max(Vec2::new(5.0, 0.0)), Vec2::new(5.0, 4.0));
        assert!((Vec2::new(0.0, 2.0).angle() - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(Vec2::ZERO.distance(v), 5.0);
    }

    #[test]
    fn closed_interval_intersection() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        // Shared edge and shared corner both count.
        assert!(r.intersects(&Rect::new(2.0, 0.0, 4.0, 2.0)));
        assert!(r.intersects(&Rect::new(2.0, 2.0, 3.0, 3.0)));
        assert!(!r.intersects(&Rect::new(2.5, 0.0, 4.0, 2.0)));
        assert!(r.contains_vec(Vec2::new(2.0, 1.0)));
        assert!(r.contains_vec(Vec2::new(0.0, 0.0)));
        assert!(!r.contains_vec(Vec2::new(2.1, 1.0)));
    }

    #[test]
    fn containment_union_area() {
        let r = Rect::new(0.0, 0.0, 4.0, 2.0);
        assert!(r.contains_rect(&r));
        assert!(r.contains_rect(&Rect::new(1.0, 0.0, 4.0, 1.0)));
        assert!(!r.contains_rect(&Rect::new(1.0, 0.0, 5.0, 1.0)));
        assert_eq!(r.area(), 8.0);
        assert_eq!(r.center(), Vec2::new(2.0, 1.0));
        assert_eq!(r.size(), Vec2::new(4.0, 2.0));
        let u = r.union(&Rect::new(-1.0, 1.0, 1.0, 3.0));
        assert_eq!(u, Rect::new(-1.0, 0.0, 4.0, 3.0));
        assert_eq!(r + Rect::new(-1.0, 1.0, 1.0, 3.0), u);
        assert_eq!(r.enlargement(&Rect::new(1.0, 1.0, 2.0, 2.0)), 0.0);
        assert_eq!(r.enlargement(&Rect::new(0.0, 0.0, 4.0, 3.0)), 4.0);
    }

    #[test]
    fn constructors_and_translate() {
        let r = Rect::from_corners(Vec2::new(3.0, -1.0), Vec2::new(1.0, 2.0));
        assert_eq!(r, Rect::new(1.0, -1.0, 3.0, 2.0));
        let c = Rect::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0));
        assert_eq!(c, Rect::new(-1.0, -2.0, 1.0, 2.0));
        assert_eq!(
            c.translate(Vec2::new(1.0, 2.0)),
            Rect::new(0.0, 0.0, 2.0, 4.0)
        );
        assert_eq!(Rect::ZERO.area(), 0.0);
    }
}
