// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guttman's linear-cost node split.
//!
//! Seeds are the two entries that lie furthest apart along whichever axis has
//! the larger normalized separation. Every other entry then joins the group
//! whose bounding rectangle would have the smaller area after absorbing it.

use alloc::vec;
use alloc::vec::Vec;

use crate::geom::Rect;

/// Two groups of positions into the split node's contents, with their bounds.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Split {
    pub(crate) first: Vec<usize>,
    pub(crate) first_rect: Rect,
    pub(crate) second: Vec<usize>,
    pub(crate) second_rect: Rect,
}

/// Separation and seeds along one axis.
///
/// The first seed has the highest low side. The second has the lowest high
/// side among the rest, so the seeds are always distinct.
fn axis_seeds(
    rects: &[Rect],
    low: impl Fn(&Rect) -> f32,
    high: impl Fn(&Rect) -> f32,
) -> (f32, usize, usize) {
    let mut highest_low = 0;
    let mut min_low = low(&rects[0]);
    let mut max_high = high(&rects[0]);
    for (i, r) in rects.iter().enumerate().skip(1) {
        if low(r) > low(&rects[highest_low]) {
            highest_low = i;
        }
        min_low = min_low.min(low(r));
        max_high = max_high.max(high(r));
    }
    let mut lowest_high = usize::from(highest_low == 0);
    for (i, r) in rects.iter().enumerate() {
        if i != highest_low && high(r) < high(&rects[lowest_high]) {
            lowest_high = i;
        }
    }
    let separation = low(&rects[highest_low]) - high(&rects[lowest_high]);
    let width = max_high - min_low;
    let normalized = if width > 0.0 { separation / width } else { 0.0 };
    (normalized, highest_low, lowest_high)
}

/// Divide `rects` (at least two) into two non-empty groups.
///
/// Groups list positions seeds first, then the remaining positions in their
/// original order. Ties in the seed axis go to x; ties in distribution go to
/// the first group.
pub(crate) fn linear(rects: &[Rect]) -> Split {
    debug_assert!(rects.len() >= 2, "split needs at least two entries");
    let (sep_x, hx, lx) = axis_seeds(rects, |r| r.a.x, |r| r.b.x);
    let (sep_y, hy, ly) = axis_seeds(rects, |r| r.a.y, |r| r.b.y);
    let (s1, s2) = if sep_y > sep_x { (hy, ly) } else { (hx, lx) };

    let mut split = Split {
        first: vec![s1],
        first_rect: rects[s1],
        second: vec![s2],
        second_rect: rects[s2],
    };
    for (i, r) in rects.iter().enumerate() {
        if i == s1 || i == s2 {
            continue;
        }
        let grown_first = split.first_rect.union(r);
        let grown_second = split.second_rect.union(r);
        if grown_second.area() < grown_first.area() {
            split.second.push(i);
            split.second_rect = grown_second;
        } else {
            split.first.push(i);
            split.first_rect = grown_first;
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stair(i: u8) -> Rect {
        let o = 8.0 - f32::from(i);
        Rect::new(o, o, o + 2.0, o + 2.0)
    }

    #[test]
    fn staircase_split_groups() {
        let rects: Vec<_> = (0..5).map(stair).collect();
        let s = linear(&rects);
        assert_eq!(s.first, [0, 1, 2]);
        assert_eq!(s.second, [4, 3]);
        assert_eq!(s.first_rect, Rect::new(6.0, 6.0, 10.0, 10.0));
        assert_eq!(s.second_rect, Rect::new(4.0, 4.0, 7.0, 7.0));
    }

    #[test]
    fn picks_the_more_separated_axis() {
        // Spread out along y, stacked along x.
        let rects = [
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(0.0, 50.0, 1.0, 51.0),
            Rect::new(0.0, 100.0, 1.0, 101.0),
        ];
        let s = linear(&rects);
        assert_eq!(s.first, [2, 1]);
        assert_eq!(s.second, [0]);
    }

    #[test]
    fn identical_rects_still_split() {
        let rects = [Rect::new(1.0, 1.0, 2.0, 2.0); 5];
        let s = linear(&rects);
        assert_eq!(s.first.len() + s.second.len(), 5);
        assert_eq!(s.first[0], 0);
        assert_eq!(s.second, [1]);
        assert_eq!(s.first, [0, 2, 3, 4]);
    }

    #[test]
    fn zero_width_axis_does_not_divide_by_zero() {
        let rects = [Rect::ZERO, Rect::ZERO];
        let s = linear(&rects);
        assert_eq!(s.first, [0]);
        assert_eq!(s.second, [1]);
    }
}
