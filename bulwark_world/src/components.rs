// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute kinds stored per entity.
//!
//! Each kind lives in its own [`Table`](bulwark_table::Table) on the
//! [`World`](crate::World). Positions are not a kind of their own: an entity's
//! [`Rect`](bulwark_spatial::Rect) in the bounds table is its position.

use bulwark_spatial::Vec2;

use crate::EntityId;

/// Hit points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Health {
    /// Current hit points. Zero or less means dead.
    pub hp: i32,
    /// Hit points when fully healed.
    pub max: i32,
}

impl Health {
    /// Full health.
    pub const fn full(max: i32) -> Self {
        Self { hp: max, max }
    }

    /// Whether hit points are above zero.
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract `amount`, saturating.
    pub fn damage(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Add `amount`, capped at `max`.
    pub fn heal(&mut self, amount: i32) {
        self.hp = self.hp.saturating_add(amount).min(self.max);
    }
}

/// Static tower stats.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tower {
    /// Targeting radius around the tower's center.
    pub range: f32,
    /// Damage per projectile.
    pub damage: i32,
    /// Seconds between shots.
    pub reload: f32,
}

/// Static monster stats.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Monster {
    /// Units per second.
    pub speed: f32,
    /// Paid out when the monster dies.
    pub reward: u32,
}

/// Per-entity attack state, for anything that fires.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Attacker {
    /// Current target, if any.
    pub target: Option<EntityId>,
    /// Seconds until the next shot is allowed.
    pub cooldown: f32,
}

impl Attacker {
    /// Count the cooldown down by `dt`. Returns true once ready to fire.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.cooldown = (self.cooldown - dt).max(0.0);
        self.cooldown == 0.0
    }
}

/// A projectile in flight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Units per second.
    pub velocity: Vec2,
    /// Damage dealt on hit.
    pub damage: i32,
    /// The entity that fired it.
    pub source: EntityId,
}

/// Frame-based animation state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Animation {
    /// Current frame.
    pub frame: u16,
    /// Number of frames in the loop.
    pub frames: u16,
    /// Seconds per frame.
    pub frame_time: f32,
    /// Seconds spent on the current frame.
    pub elapsed: f32,
}

impl Animation {
    /// Start at frame zero.
    pub const fn new(frames: u16, frame_time: f32) -> Self {
        Self {
            frame: 0,
            frames,
            frame_time,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds, wrapping around the loop.
    pub fn advance(&mut self, dt: f32) {
        if self.frames == 0 || self.frame_time <= 0.0 {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.frame_time {
            self.elapsed -= self.frame_time;
            self.frame = (self.frame + 1) % self.frames;
        }
    }
}

/// What to draw. The renderer owns the atlas; this is only a handle into it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    /// Region index in the renderer's atlas.
    pub region: u32,
    /// RGBA tint.
    pub tint: [u8; 4],
}
