// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute tables plus the spatial index that mirrors entity bounds.

use bulwark_spatial::{RTree, RTreeConfig, Rect, Vec2};
use bulwark_table::{IdSet, Table};

use crate::components::{Animation, Attacker, Health, Monster, Projectile, Sprite, Tower};
use crate::types::{EntityId, KindFilter};

/// Most entries per R-tree leaf.
pub const LEAF: usize = 16;
/// Most children per R-tree middle node.
pub const MIDDLE: usize = 16;

/// The R-tree a [`World`] keeps its bounds in.
pub type SpatialIndex<const MAX_ID: usize> = RTree<EntityId, MAX_ID, LEAF, MIDDLE>;

/// One table per attribute kind plus an R-tree over entity bounds.
///
/// Bounds are only written through [`World::set_bounds`] and
/// [`World::remove_bounds`], which keep the R-tree in step. Every other table
/// is a public field and can be used directly; the world enforces nothing
/// about which tables an entity has rows in.
pub struct World<const MAX_ID: usize> {
    bounds: Table<EntityId, Rect, MAX_ID>,
    tree: SpatialIndex<MAX_ID>,
    /// Hit points.
    pub health: Table<EntityId, Health, MAX_ID>,
    /// Tower stats.
    pub towers: Table<EntityId, Tower, MAX_ID>,
    /// Monster stats.
    pub monsters: Table<EntityId, Monster, MAX_ID>,
    /// Attack state.
    pub attackers: Table<EntityId, Attacker, MAX_ID>,
    /// Projectiles in flight.
    pub projectiles: Table<EntityId, Projectile, MAX_ID>,
    /// Animation state.
    pub animations: Table<EntityId, Animation, MAX_ID>,
    /// Render handles.
    pub sprites: Table<EntityId, Sprite, MAX_ID>,
    dead: IdSet<EntityId, MAX_ID>,
}

impl<const MAX_ID: usize> Default for World<MAX_ID> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_ID: usize> core::fmt::Debug for World<MAX_ID> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("bounds", &self.bounds.len())
            .field("health", &self.health.len())
            .field("towers", &self.towers.len())
            .field("monsters", &self.monsters.len())
            .field("attackers", &self.attackers.len())
            .field("projectiles", &self.projectiles.len())
            .field("animations", &self.animations.len())
            .field("sprites", &self.sprites.len())
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

impl<const MAX_ID: usize> World<MAX_ID> {
    /// Create an empty world with the default R-tree configuration.
    pub fn new() -> Self {
        Self::with_config(RTreeConfig::default())
    }

    /// Create an empty world.
    pub fn with_config(config: RTreeConfig) -> Self {
        Self {
            bounds: Table::new("bounds"),
            tree: RTree::with_config(config),
            health: Table::new("health"),
            towers: Table::new("towers"),
            monsters: Table::new("monsters"),
            attackers: Table::new("attackers"),
            projectiles: Table::new("projectiles"),
            animations: Table::new("animations"),
            sprites: Table::new("sprites"),
            dead: IdSet::new(),
        }
    }

    /// The bounds table. Read-only; write through [`World::set_bounds`].
    pub fn bounds(&self) -> &Table<EntityId, Rect, MAX_ID> {
        &self.bounds
    }

    /// The spatial index over bounds.
    pub fn tree(&self) -> &SpatialIndex<MAX_ID> {
        &self.tree
    }

    /// Write `id`'s bounds and mirror them into the R-tree.
    ///
    /// The first write inserts into the tree; later writes move the entry.
    /// Returns the previous bounds.
    ///
    /// # Panics
    ///
    /// Panics if `id` is above `MAX_ID`.
    pub fn set_bounds(&mut self, id: EntityId, rect: Rect) -> Option<Rect> {
        let prev = self.bounds.set(id, rect);
        // Insert moves an entry that is already present.
        self.tree.insert(id, rect);
        prev
    }

    /// Drop `id`'s bounds from the table and the tree.
    pub fn remove_bounds(&mut self, id: EntityId) -> Option<Rect> {
        let prev = self.bounds.delete(id)?;
        // A bounds row always has a tree entry.
        let removed = self.tree.delete(id);
        debug_assert!(removed.is_ok(), "bounds row {id} had no tree entry");
        if let Err(err) = removed {
            tracing::warn!(id, %err, "bounds row had no tree entry");
        }
        Some(prev)
    }

    /// Move `id`'s bounds by `offset`. Returns the new bounds, or `None` if
    /// `id` has none.
    pub fn translate(&mut self, id: EntityId, offset: Vec2) -> Option<Rect> {
        let rect = self.bounds.find(id)?.translate(offset);
        self.set_bounds(id, rect);
        Some(rect)
    }

    /// Which kinds `id` currently has.
    pub fn kinds(&self, id: EntityId) -> KindFilter {
        let mut kinds = KindFilter::empty();
        kinds.set(KindFilter::MONSTER, self.monsters.contains(id));
        kinds.set(KindFilter::TOWER, self.towers.contains(id));
        kinds.set(KindFilter::PROJECTILE, self.projectiles.contains(id));
        kinds.set(
            KindFilter::ALIVE,
            self.health.find(id).is_some_and(Health::is_alive),
        );
        kinds
    }

    /// Whether `id` has a row in any table.
    pub fn exists(&self, id: EntityId) -> bool {
        self.bounds.contains(id)
            || self.health.contains(id)
            || self.towers.contains(id)
            || self.monsters.contains(id)
            || self.attackers.contains(id)
            || self.projectiles.contains(id)
            || self.animations.contains(id)
            || self.sprites.contains(id)
    }

    /// Remove `id` from every table and the tree. Returns whether it had any
    /// rows.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let mut found = self.remove_bounds(id).is_some();
        found |= self.health.delete(id).is_some();
        found |= self.towers.delete(id).is_some();
        found |= self.monsters.delete(id).is_some();
        found |= self.attackers.delete(id).is_some();
        found |= self.projectiles.delete(id).is_some();
        found |= self.animations.delete(id).is_some();
        found |= self.sprites.delete(id).is_some();
        found
    }

    /// Despawn every entity whose health is zero or less. Returns how many.
    ///
    /// Dead ids are gathered in a scratch set first and removed afterwards, so
    /// the health table is never mutated while it is being walked.
    pub fn despawn_dead(&mut self) -> usize {
        self.dead.clear();
        for (id, health) in self.health.iter() {
            if !health.is_alive() {
                self.dead.set(id, ());
            }
        }
        let count = self.dead.len();
        loop {
            let next = self.dead.ids().next();
            let Some(id) = next else { break };
            self.dead.delete(id);
            self.despawn(id);
        }
        if count > 0 {
            tracing::debug!(count, "despawned dead entities");
        }
        count
    }

    /// Visit entities whose bounds intersect `rect` and whose kinds contain
    /// `filter`.
    pub fn query_rect(
        &self,
        rect: Rect,
        filter: KindFilter,
        mut visitor: impl FnMut(EntityId, &Rect),
    ) {
        self.tree.find_intersect(&rect, |id, r| {
            if self.kinds(id).contains(filter) {
                visitor(id, r);
            }
        });
    }

    /// Visit entities whose bounds contain `point` and whose kinds contain
    /// `filter`.
    pub fn query_point(
        &self,
        point: Vec2,
        filter: KindFilter,
        mut visitor: impl FnMut(EntityId, &Rect),
    ) {
        self.tree.find_point(point, |id, r| {
            if self.kinds(id).contains(filter) {
                visitor(id, r);
            }
        });
    }

    /// The entity matching `filter` whose bounds center is nearest `point`,
    /// among those intersecting the square of half-size `radius` around it.
    ///
    /// Ties go to the lower id.
    pub fn nearest(&self, point: Vec2, radius: f32, filter: KindFilter) -> Option<EntityId> {
        let area = Rect::from_center_size(point, Vec2::new(radius * 2.0, radius * 2.0));
        let mut best: Option<(f32, EntityId)> = None;
        self.query_rect(area, filter, |id, r| {
            let d = r.center().distance(point);
            if d > radius {
                return;
            }
            let better = match best {
                None => true,
                Some((bd, bid)) => d < bd || (d == bd && id < bid),
            };
            if better {
                best = Some((d, id));
            }
        });
        best.map(|(_, id)| id)
    }
}
