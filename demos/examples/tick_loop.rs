// Copyright 2026 the Bulwark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless tower-defense tick loop.
//!
//! Monsters walk right; towers pick the nearest live monster in range and
//! damage it; the dead are despawned at the end of every tick. Everything
//! spatial goes through the world's R-tree.
//!
//! Run:
//! - `cargo run -p bulwark_demos --example tick_loop`
//! - `RUST_LOG=debug cargo run -p bulwark_demos --example tick_loop`

use bulwark_spatial::{Rect, Vec2};
use bulwark_world::{
    Animation, Attacker, EntityId, Health, KindFilter, Monster, Sprite, Tower, World,
};
use tracing_subscriber::EnvFilter;

const MAX_ID: usize = 4095;
const DT: f32 = 1.0 / 30.0;

fn spawn_towers(world: &mut World<MAX_ID>, next_id: &mut EntityId) {
    for i in 0..8 {
        let id = *next_id;
        *next_id += 1;
        let center = Vec2::new(60.0 + i as f32 * 110.0, 50.0);
        world.set_bounds(id, Rect::from_center_size(center, Vec2::new(10.0, 10.0)));
        world.towers.set(
            id,
            Tower {
                range: 80.0,
                damage: 3,
                reload: 0.5,
            },
        );
        world.attackers.set(id, Attacker::default());
        world.sprites.set(
            id,
            Sprite {
                region: 1,
                tint: [255; 4],
            },
        );
    }
}

fn spawn_wave(world: &mut World<MAX_ID>, rng: &mut fastrand::Rng, next_id: &mut EntityId, n: u32) {
    for _ in 0..n {
        let id = *next_id;
        *next_id += 1;
        let at = Vec2::new(rng.f32() * -50.0, rng.f32() * 100.0);
        world.set_bounds(id, Rect::from_center_size(at, Vec2::new(4.0, 4.0)));
        world.health.set(id, Health::full(10));
        world.monsters.set(
            id,
            Monster {
                speed: 20.0 + rng.f32() * 20.0,
                reward: 1,
            },
        );
        world.animations.set(id, Animation::new(4, 0.1));
        world.sprites.set(
            id,
            Sprite {
                region: 2,
                tint: [200, 64, 64, 255],
            },
        );
    }
}

fn tick(world: &mut World<MAX_ID>, escaped: &mut u32) -> u32 {
    // Move monsters. Ids are collected first since moving writes the tree.
    let walkers: Vec<(EntityId, f32)> = world.monsters.iter().map(|(id, m)| (id, m.speed)).collect();
    for (id, speed) in walkers {
        if let Some(r) = world.translate(id, Vec2::new(speed * DT, 0.0)) {
            if r.a.x > 900.0 {
                world.despawn(id);
                *escaped += 1;
            }
        }
    }
    for (_, anim) in world.animations.iter_mut() {
        anim.advance(DT);
    }

    // Towers choose targets.
    let towers: Vec<(EntityId, Vec2, Tower)> = world
        .towers
        .iter()
        .filter_map(|(id, t)| Some((id, world.bounds().find(id)?.center(), *t)))
        .collect();
    let mut shots = Vec::new();
    for (id, center, tower) in towers {
        let Some(attacker) = world.attackers.find_mut(id) else {
            continue;
        };
        if !attacker.tick(DT) {
            continue;
        }
        let target = world.nearest(center, tower.range, KindFilter::LIVE_MONSTER);
        if let Some(attacker) = world.attackers.find_mut(id) {
            attacker.target = target;
            if target.is_some() {
                attacker.cooldown = tower.reload;
            }
        }
        if let Some(target) = target {
            shots.push((target, tower.damage));
        }
    }

    // Resolve hits, then sweep the dead.
    for (target, damage) in shots {
        if let Some(h) = world.health.find_mut(target) {
            h.damage(damage);
        }
    }
    world.despawn_dead() as u32
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut world: World<MAX_ID> = World::new();
    let mut rng = fastrand::Rng::with_seed(42);
    let mut next_id: EntityId = 0;
    spawn_towers(&mut world, &mut next_id);

    let mut killed = 0;
    let mut escaped = 0;
    for frame in 0..1_200 {
        if frame % 150 == 0 && (next_id as usize) + 200 <= MAX_ID {
            spawn_wave(&mut world, &mut rng, &mut next_id, 200);
            tracing::info!(frame, monsters = world.monsters.len(), "wave spawned");
        }
        killed += tick(&mut world, &mut escaped);
        if frame % 300 == 299 {
            tracing::info!(
                frame,
                monsters = world.monsters.len(),
                killed,
                escaped,
                tree = ?world.tree(),
                "status"
            );
        }
    }
    println!("killed {killed}, escaped {escaped}, {world:?}");
}
