// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by tables, sparse sets and the spatial index.

/// Errors reported by fallible row accessors and allocations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The id has no row in the set or table that was asked.
    #[error("no row for id {id}")]
    RowNotFound {
        /// Sparse index of the missing id.
        id: usize,
    },
    /// Backing storage could not be allocated.
    #[error("out of memory")]
    OutOfMemory,
    /// A fixed-capacity store is full.
    #[error("capacity of {capacity} exceeded")]
    CapacityExceeded {
        /// The store's capacity.
        capacity: usize,
    },
}
