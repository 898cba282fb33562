// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small shared types.

use bitflags::bitflags;

/// Entity id used by the [`World`](crate::World).
pub type EntityId = u32;

bitflags! {
    /// Attribute kinds an entity has, and the filter spatial queries apply.
    ///
    /// A query matches an entity when the entity's kinds contain every flag in
    /// the filter; the empty filter matches everything.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KindFilter: u8 {
        /// Has a monster row.
        const MONSTER    = 0b0000_0001;
        /// Has a tower row.
        const TOWER      = 0b0000_0010;
        /// Has a projectile row.
        const PROJECTILE = 0b0000_0100;
        /// Has a health row with positive hit points.
        const ALIVE      = 0b0000_1000;
    }
}

impl KindFilter {
    /// Live monsters, the usual tower target.
    pub const LIVE_MONSTER: Self = Self::MONSTER.union(Self::ALIVE);
}
