// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulwark World: attribute tables and a spatial index kept in step.
//!
//! A [`World`] owns one [`Table`](bulwark_table::Table) per attribute kind and an
//! [`RTree`](bulwark_spatial::RTree) over entity bounds. Gameplay code writes
//! bounds through [`World::set_bounds`], which mirrors every write into the
//! tree, then asks spatial questions filtered by what the candidates are.
//!
//! - Tables: bounds (read through [`World::bounds`]), health, towers, monsters,
//!   attackers, projectiles, animations, sprites.
//! - Queries: [`World::query_rect`], [`World::query_point`] and
//!   [`World::nearest`], each narrowed by a [`KindFilter`].
//! - Removal: [`World::despawn`] for one id, [`World::despawn_dead`] for every
//!   entity out of hit points.
//!
//! # Example
//!
//! ```rust
//! use bulwark_spatial::{Rect, Vec2};
//! use bulwark_world::{Health, KindFilter, Monster, World};
//!
//! let mut world: World<1023> = World::new();
//! world.set_bounds(1, Rect::new(0.0, 0.0, 1.0, 1.0));
//! world.health.set(1, Health::full(10));
//! world.monsters.set(1, Monster { speed: 2.0, reward: 5 });
//!
//! // Monsters move every tick; the tree follows.
//! world.translate(1, Vec2::new(3.0, 0.0));
//!
//! let mut hits = Vec::new();
//! world.query_point(Vec2::new(3.5, 0.5), KindFilter::LIVE_MONSTER, |id, _| hits.push(id));
//! assert_eq!(hits, [1]);
//!
//! // Out of hit points: gone from every table and from the tree.
//! world.health.get_mut(1).unwrap().damage(10);
//! assert_eq!(world.despawn_dead(), 1);
//! assert!(!world.exists(1));
//! assert!(world.tree().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod components;
pub mod types;
pub mod world;

pub use components::{Animation, Attacker, Health, Monster, Projectile, Sprite, Tower};
pub use types::{EntityId, KindFilter};
pub use world::{LEAF, MIDDLE, SpatialIndex, World};
