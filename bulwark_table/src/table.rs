// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named attribute tables.

use core::fmt::Debug;

use crate::error::Error;
use crate::id::Id;
use crate::sparse_set::{Iter, IterMut, SparseSet};

/// One attribute kind's rows, keyed by entity id.
///
/// A `Table` is a [`SparseSet`] with a name. An entity "has" the attribute when
/// [`Table::find`] returns `Some`. Tables know nothing about each other: keeping
/// sibling tables consistent (for example, every monster also having a health
/// row) is up to the caller.
#[derive(Clone)]
pub struct Table<I: Id, T, const MAX_ID: usize> {
    name: &'static str,
    rows: SparseSet<I, T, MAX_ID>,
}

impl<I: Id, T, const MAX_ID: usize> Table<I, T, MAX_ID> {
    /// Create an empty table called `name`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: SparseSet::new(),
        }
    }

    /// Like [`Table::new`], but reports allocation failure.
    pub fn try_new(name: &'static str) -> Result<Self, Error> {
        Ok(Self {
            name,
            rows: SparseSet::try_new()?,
        })
    }

    /// The attribute kind this table stores.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `id` has a row.
    pub fn contains(&self, id: I) -> bool {
        self.rows.contains(id)
    }

    /// The row for `id`, if present.
    pub fn find(&self, id: I) -> Option<&T> {
        self.rows.find(id)
    }

    /// The row for `id` mutably, if present.
    pub fn find_mut(&mut self, id: I) -> Option<&mut T> {
        self.rows.find_mut(id)
    }

    /// The row for `id`, or [`Error::RowNotFound`].
    pub fn get(&self, id: I) -> Result<&T, Error> {
        self.rows.get(id).inspect_err(|_| {
            tracing::trace!(table = self.name, id = id.index(), "row not found");
        })
    }

    /// The row for `id` mutably, or [`Error::RowNotFound`].
    pub fn get_mut(&mut self, id: I) -> Result<&mut T, Error> {
        let name = self.name;
        self.rows.get_mut(id).inspect_err(|_| {
            tracing::trace!(table = name, id = id.index(), "row not found");
        })
    }

    /// Insert or overwrite the row for `id`. Returns the previous row.
    pub fn set(&mut self, id: I, value: T) -> Option<T> {
        self.rows.set(id, value)
    }

    /// Remove the row for `id`. Absent ids are a no-op.
    pub fn delete(&mut self, id: I) -> Option<T> {
        self.rows.delete(id)
    }

    /// Drop every row, keeping storage.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Keep only the rows for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(I, &mut T) -> bool) {
        self.rows.retain(keep);
    }

    /// Iterate rows in storage order.
    pub fn iter(&self) -> Iter<'_, I, T> {
        self.rows.iter()
    }

    /// Iterate rows mutably in storage order.
    pub fn iter_mut(&mut self) -> IterMut<'_, I, T> {
        self.rows.iter_mut()
    }

    /// Iterate ids that have a row.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = I> + '_ {
        self.rows.ids()
    }

    /// The underlying set.
    pub fn as_set(&self) -> &SparseSet<I, T, MAX_ID> {
        &self.rows
    }
}

impl<I: Id, T: Debug, const MAX_ID: usize> Debug for Table<I, T, MAX_ID> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("len", &self.rows.len())
            .finish_non_exhaustive()
    }
}

impl<'a, I: Id, T, const MAX_ID: usize> IntoIterator for &'a Table<I, T, MAX_ID> {
    type Item = (I, &'a T);
    type IntoIter = Iter<'a, I, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Copy, Clone, Debug, PartialEq)]
    struct Health(i32);

    #[test]
    fn behaves_like_its_set() {
        let mut t: Table<u32, Health, 15> = Table::new("health");
        assert_eq!(t.name(), "health");
        t.set(2, Health(10));
        t.set(2, Health(7));
        assert_eq!(t.get(2), Ok(&Health(7)));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(3), Err(Error::RowNotFound { id: 3 }));
        assert_eq!(t.delete(3), None);
        assert_eq!(t.delete(2), Some(Health(7)));
        assert!(t.is_empty());
    }

    #[test]
    fn get_mut_and_iteration() {
        let mut t: Table<u16, Health, 15> = Table::new("health");
        for id in 0..4 {
            t.set(id, Health(i32::from(id)));
        }
        t.get_mut(1).unwrap().0 = 100;
        for (_, h) in t.iter_mut() {
            h.0 += 1;
        }
        let rows: Vec<_> = t.iter().map(|(id, h)| (id, h.0)).collect();
        assert_eq!(rows, [(0, 1), (1, 101), (2, 3), (3, 4)]);
    }

    #[test]
    fn membership_is_per_table() {
        let mut health: Table<u32, Health, 15> = Table::new("health");
        let mut names: Table<u32, &str, 15> = Table::new("name");
        health.set(1, Health(5));
        names.set(2, "tower");
        assert!(health.contains(1) && !names.contains(1));
        assert!(names.contains(2) && !health.contains(2));
    }
}
