// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded-domain sparse set: an index array plus a dense packed array.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;

use crate::error::Error;
use crate::id::Id;

#[derive(Clone)]
struct Row<I, T> {
    id: I,
    value: T,
}

/// Map from ids in `0..=MAX_ID` to values of `T`.
///
/// Lookups go through a preallocated index array (`sparse[id]` is a position in
/// the dense array) and are confirmed by comparing the id stored in the dense
/// row, so stale index slots are never trusted. Inserts push onto the dense
/// array, deletes swap-remove from it and patch the index entry of the row that
/// moved. Iteration walks the dense array in storage order, which is not stable
/// across deletes.
///
/// The index array is sized once to `MAX_ID + 1` and never grows. Setting an id
/// above `MAX_ID` panics: running out of id space is not recoverable.
///
/// Iterators borrow the set, so it cannot be modified while one is live. To
/// delete rows based on their contents, use [`SparseSet::retain`] or collect the
/// ids first.
#[derive(Clone)]
pub struct SparseSet<I: Id, T, const MAX_ID: usize> {
    sparse: Box<[usize]>,
    dense: Vec<Row<I, T>>,
}

impl<I: Id, T, const MAX_ID: usize> SparseSet<I, T, MAX_ID> {
    /// Create an empty set with its index array preallocated.
    pub fn new() -> Self {
        Self {
            sparse: vec![0; MAX_ID + 1].into_boxed_slice(),
            dense: Vec::new(),
        }
    }

    /// Like [`SparseSet::new`], but reports allocation failure instead of aborting.
    pub fn try_new() -> Result<Self, Error> {
        let mut sparse = Vec::new();
        sparse
            .try_reserve_exact(MAX_ID + 1)
            .map_err(|_| Error::OutOfMemory)?;
        sparse.resize(MAX_ID + 1, 0);
        Ok(Self {
            sparse: sparse.into_boxed_slice(),
            dense: Vec::new(),
        })
    }

    /// Reserve dense storage for at least `additional` more rows.
    pub fn reserve(&mut self, additional: usize) {
        self.dense.reserve(additional);
    }

    /// The largest id this set accepts.
    pub const fn max_id(&self) -> usize {
        MAX_ID
    }

    /// Number of live rows.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// True if the set holds no rows.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    #[inline]
    fn slot(&self, id: I) -> Option<usize> {
        let pos = *self.sparse.get(id.index())?;
        match self.dense.get(pos) {
            Some(row) if row.id == id => Some(pos),
            _ => None,
        }
    }

    /// Whether `id` has a row.
    #[inline]
    pub fn contains(&self, id: I) -> bool {
        self.slot(id).is_some()
    }

    /// The value for `id`, if present.
    #[inline]
    pub fn find(&self, id: I) -> Option<&T> {
        self.slot(id).map(|pos| &self.dense[pos].value)
    }

    /// The value for `id` mutably, if present.
    #[inline]
    pub fn find_mut(&mut self, id: I) -> Option<&mut T> {
        let pos = self.slot(id)?;
        Some(&mut self.dense[pos].value)
    }

    /// The value for `id`, or [`Error::RowNotFound`].
    pub fn get(&self, id: I) -> Result<&T, Error> {
        self.find(id).ok_or(Error::RowNotFound { id: id.index() })
    }

    /// The value for `id` mutably, or [`Error::RowNotFound`].
    pub fn get_mut(&mut self, id: I) -> Result<&mut T, Error> {
        self.find_mut(id).ok_or(Error::RowNotFound { id: id.index() })
    }

    /// Insert or overwrite the value for `id`. Returns the previous value.
    ///
    /// # Panics
    ///
    /// Panics if `id` is above `MAX_ID`.
    pub fn set(&mut self, id: I, value: T) -> Option<T> {
        let index = id.index();
        assert!(
            index <= MAX_ID,
            "id {index} exceeds the capacity ceiling of {MAX_ID}"
        );
        if let Some(pos) = self.slot(id) {
            return Some(core::mem::replace(&mut self.dense[pos].value, value));
        }
        self.sparse[index] = self.dense.len();
        self.dense.push(Row { id, value });
        None
    }

    /// Remove the row for `id`, returning its value. Absent ids are a no-op.
    ///
    /// The last dense row is moved into the freed position.
    pub fn delete(&mut self, id: I) -> Option<T> {
        let pos = self.slot(id)?;
        let row = self.dense.swap_remove(pos);
        if let Some(moved) = self.dense.get(pos) {
            self.sparse[moved.id.index()] = pos;
        }
        Some(row.value)
    }

    /// Drop every row, keeping the allocated storage for reuse.
    pub fn clear(&mut self) {
        self.dense.clear();
    }

    /// Keep only the rows for which `keep` returns true.
    ///
    /// Every row is visited exactly once, in unspecified order.
    pub fn retain(&mut self, mut keep: impl FnMut(I, &mut T) -> bool) {
        let mut pos = 0;
        while pos < self.dense.len() {
            let row = &mut self.dense[pos];
            if keep(row.id, &mut row.value) {
                pos += 1;
            } else {
                let id = row.id;
                // The row swapped into `pos` has not been visited yet.
                self.delete(id);
            }
        }
    }

    /// Iterate `(id, &value)` in dense storage order.
    pub fn iter(&self) -> Iter<'_, I, T> {
        Iter {
            inner: self.dense.iter(),
        }
    }

    /// Iterate `(id, &mut value)` in dense storage order.
    pub fn iter_mut(&mut self) -> IterMut<'_, I, T> {
        IterMut {
            inner: self.dense.iter_mut(),
        }
    }

    /// Iterate live ids in dense storage order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        self.dense.iter().map(|row| row.id)
    }

    /// Iterate values in dense storage order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.dense.iter().map(|row| &row.value)
    }
}

impl<I: Id, T, const MAX_ID: usize> Default for SparseSet<I, T, MAX_ID> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Id, T: Debug, const MAX_ID: usize> Debug for SparseSet<I, T, MAX_ID> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.dense.iter().map(|row| (row.id, &row.value)))
            .finish()
    }
}

impl<'a, I: Id, T, const MAX_ID: usize> IntoIterator for &'a SparseSet<I, T, MAX_ID> {
    type Item = (I, &'a T);
    type IntoIter = Iter<'a, I, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, I: Id, T, const MAX_ID: usize> IntoIterator for &'a mut SparseSet<I, T, MAX_ID> {
    type Item = (I, &'a mut T);
    type IntoIter = IterMut<'a, I, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Iterator over `(id, &value)` pairs of a [`SparseSet`].
#[derive(Clone)]
pub struct Iter<'a, I, T> {
    inner: core::slice::Iter<'a, Row<I, T>>,
}

impl<'a, I: Copy, T> Iterator for Iter<'a, I, T> {
    type Item = (I, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|row| (row.id, &row.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: Copy, T> DoubleEndedIterator for Iter<'_, I, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|row| (row.id, &row.value))
    }
}

impl<I: Copy, T> ExactSizeIterator for Iter<'_, I, T> {}
impl<I: Copy, T> FusedIterator for Iter<'_, I, T> {}

impl<I, T> Debug for Iter<'_, I, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// Iterator over `(id, &mut value)` pairs of a [`SparseSet`].
pub struct IterMut<'a, I, T> {
    inner: core::slice::IterMut<'a, Row<I, T>>,
}

impl<'a, I: Copy, T> Iterator for IterMut<'a, I, T> {
    type Item = (I, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|row| (row.id, &mut row.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: Copy, T> ExactSizeIterator for IterMut<'_, I, T> {}
impl<I: Copy, T> FusedIterator for IterMut<'_, I, T> {}

impl<I, T> Debug for IterMut<'_, I, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// A sparse set with no payload, used as a scratch set of ids.
pub type IdSet<I, const MAX_ID: usize> = SparseSet<I, (), MAX_ID>;
