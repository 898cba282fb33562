// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulwark Table: bounded-domain sparse sets and named attribute tables.
//!
//! Entities are bare integer ids. What an entity *is* comes from the tables that
//! hold a row for it: a tower has a row in the tower table, a monster has rows in
//! the monster, health and attacker tables, and so on.
//!
//! - [`SparseSet`]: O(1) lookup through a preallocated index array, O(1)
//!   amortized insert, O(1) swap-remove delete, packed iteration.
//! - [`Table`]: a named [`SparseSet`] for one attribute kind.
//! - [`Id`]: the integer types usable as entity ids.
//! - [`Error`]: missing rows and allocation failures.
//!
//! Capacity is fixed by the `MAX_ID` const parameter. The index array is sized
//! to `MAX_ID + 1` up front and never grows; setting a larger id panics.
//!
//! # Example
//!
//! ```rust
//! use bulwark_table::{Error, Table};
//!
//! let mut health: Table<u32, i32, 1023> = Table::new("health");
//! health.set(7, 100);
//! health.set(7, 80);
//! assert_eq!(health.get(7), Ok(&80));
//! assert_eq!(health.len(), 1);
//!
//! // Absent rows are `None` from `find` and an error from `get`.
//! assert!(health.find(8).is_none());
//! assert_eq!(health.get(8), Err(Error::RowNotFound { id: 8 }));
//!
//! // Deleting is idempotent.
//! health.delete(7);
//! health.delete(7);
//! assert!(health.is_empty());
//! ```
//!
//! ## Iterating while deleting
//!
//! Iterators borrow their set, so the borrow checker rejects deleting from a set
//! while walking it. Use [`SparseSet::retain`], or collect ids into a scratch
//! [`IdSet`] during a read-only pass and delete in a second pass. Scratch sets
//! can be [`cleared`](SparseSet::clear) and reused every tick without
//! reallocating.

#![no_std]

extern crate alloc;

pub mod error;
pub mod id;
pub mod sparse_set;
pub mod table;

pub use error::Error;
pub use id::Id;
pub use sparse_set::{IdSet, SparseSet};
pub use table::Table;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn two_phase_delete_with_scratch_set() {
        let mut health: Table<u32, i32, 255> = Table::new("health");
        for id in 0..10 {
            health.set(id, id as i32 - 5);
        }
        let mut dead: IdSet<u32, 255> = IdSet::new();
        for (id, hp) in health.iter() {
            if *hp <= 0 {
                dead.set(id, ());
            }
        }
        for id in dead.ids() {
            health.delete(id);
        }
        let mut left: Vec<_> = health.ids().collect();
        left.sort_unstable();
        assert_eq!(left, [6, 7, 8, 9]);

        dead.clear();
        assert!(dead.is_empty());
    }
}
