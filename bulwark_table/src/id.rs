// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entity id abstraction.

use core::fmt::Debug;
use core::hash::Hash;

/// A dense, bounded unsigned integer naming an entity.
///
/// An id carries no data of its own. Its components are the rows stored for it
/// in zero or more [`Table`](crate::Table)s. Ids are handed out by the caller
/// (typically a monotonic counter) and are never reused within a run.
pub trait Id: Copy + Eq + Ord + Hash + Debug {
    /// Position of this id in a sparse index array.
    fn index(self) -> usize;

    /// Build an id from a sparse index. Panics if `index` does not fit.
    fn from_index(index: usize) -> Self;
}

macro_rules! impl_id {
    ($($t:ty),*) => {
        $(
            impl Id for $t {
                #[inline]
                fn index(self) -> usize {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "Ids beyond usize::MAX cannot address an index array anyway."
                    )]
                    let i = self as usize;
                    i
                }

                #[inline]
                fn from_index(index: usize) -> Self {
                    <$t>::try_from(index).expect("index does not fit in the id type")
                }
            }
        )*
    };
}

impl_id!(u8, u16, u32, u64);

impl Id for usize {
    #[inline]
    fn index(self) -> usize {
        self
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_small_ids() {
        assert_eq!(u16::from_index(42).index(), 42);
        assert_eq!(u8::from_index(255), 255_u8);
    }

    #[test]
    fn usize_ids_are_their_own_index() {
        assert_eq!(usize::MAX.index(), usize::MAX);
        assert_eq!(usize::from_index(1 << 20), 1 << 20);
        assert_eq!(u64::from_index(7).index(), 7);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn from_index_rejects_overflow() {
        let _ = u8::from_index(256);
    }
}
