//! The environment: scenery, collectibles, hostiles, and platforms
//!
//! The environment owns every non-player entity. Its per-frame update ticks
//! hostile AI and falling coins, then replaces cut trees and defeated
//! hostiles with freshly spawned coins.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use super::body::Body;
use super::monster::{Dragon, Hostile, HostileContext, Monster};
use super::projectile::Projectile;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Static, solid from above and below
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub aabb: Aabb,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            aabb: Aabb::new(pos, size),
        }
    }
}

/// Destructible scenery that drops coins when cut down
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub aabb: Aabb,
    pub health: i32,
    pub coins_on_cut: u32,
    pub cut: bool,
}

impl Tree {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            aabb: Aabb::new(pos, tuning.scenery.tree_size),
            health: tuning.scenery.tree_health,
            coins_on_cut: tuning.scenery.coins_per_tree,
            cut: false,
        }
    }

    /// Returns the coin yield on the cutting hit, 0 otherwise
    pub fn take_hit(&mut self, damage: i32) -> u32 {
        if self.cut || damage <= 0 {
            return 0;
        }
        self.health = (self.health - damage).max(0);
        if self.health == 0 {
            self.cut = true;
            log::debug!("Tree cut at {:?}", self.aabb.pos);
            return self.coins_on_cut;
        }
        0
    }
}

/// A collectible that falls until it rests on the ground or a platform
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub body: Body,
    pub value: u32,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(
                Aabb::new(pos, tuning.scenery.coin_size),
                tuning.scenery.coin_gravity,
            ),
            value: tuning.scenery.coin_value,
            collected: false,
        }
    }

    pub fn aabb(&self) -> &Aabb {
        &self.body.aabb
    }
}

#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub trees: Vec<Tree>,
    pub coins: Vec<Coin>,
    pub hostiles: Vec<Hostile>,
    pub platforms: Vec<Platform>,
    /// Fireballs whose dragon has been removed; still in flight
    pub stray_projectiles: Vec<Projectile>,
}

impl Environment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The starting layout: three trees, two monsters, one dragon, three platforms
    pub fn generate(tuning: &Tuning, rng: &mut Pcg32, now_ms: u64) -> Self {
        let width = tuning.world.screen_width;
        let ground = tuning.world.ground_y();
        let mut env = Self::empty();

        let tree_h = tuning.scenery.tree_size.y;
        for _ in 0..3 {
            let x = random_x(rng, 100.0, width - 200.0);
            env.trees.push(Tree::new(Vec2::new(x, ground - tree_h), tuning));
        }

        let monster_h = tuning.monster.size.y;
        for _ in 0..2 {
            let x = random_x(rng, 150.0, width - 150.0);
            env.hostiles.push(Hostile::Monster(Monster::new(
                Vec2::new(x, ground - monster_h),
                &tuning.monster,
            )));
        }

        env.hostiles.push(Hostile::Dragon(Dragon::new(
            Vec2::new(width / 4.0, 150.0),
            tuning,
            now_ms,
        )));

        env.platforms = vec![
            Platform::new(Vec2::new(width / 4.0 - 100.0, ground - 150.0), Vec2::new(150.0, 30.0)),
            Platform::new(Vec2::new(width / 2.0 - 75.0, ground - 250.0), Vec2::new(150.0, 30.0)),
            Platform::new(Vec2::new(width * 3.0 / 4.0 - 50.0, ground - 350.0), Vec2::new(100.0, 30.0)),
        ];

        log::debug!(
            "Generated {} trees, {} hostiles, {} platforms",
            env.trees.len(),
            env.hostiles.len(),
            env.platforms.len()
        );
        env
    }

    /// Hostile AI, coin physics, stray fireballs, then removals
    pub fn update(
        &mut self,
        tuning: &Tuning,
        player_center: Vec2,
        now_ms: u64,
        rng: &mut Pcg32,
        events: &mut Vec<GameEvent>,
    ) {
        let ground_y = tuning.world.ground_y();
        let playfield = Aabb::new(Vec2::ZERO, tuning.world.size());

        let ctx = HostileContext {
            player_center,
            now_ms,
            ground_y,
            playfield,
            platforms: &self.platforms,
        };
        for hostile in &mut self.hostiles {
            if hostile.update(&ctx) {
                events.push(GameEvent::FireballLaunched);
            }
        }

        for coin in &mut self.coins {
            coin.body.apply_gravity_and_move(ground_y, &self.platforms);
        }

        for projectile in &mut self.stray_projectiles {
            projectile.tick(&playfield);
        }
        self.stray_projectiles.retain(|p| p.active);

        self.remove_defeated(tuning, rng, events);
    }

    /// Replace cut trees and dead hostiles with coins
    fn remove_defeated(&mut self, tuning: &Tuning, rng: &mut Pcg32, events: &mut Vec<GameEvent>) {
        let mut drops: Vec<(Aabb, u32)> = Vec::new();

        self.trees.retain(|tree| {
            if tree.cut {
                drops.push((tree.aabb, tree.coins_on_cut));
                false
            } else {
                true
            }
        });

        let mut orphaned = Vec::new();
        self.hostiles.retain_mut(|hostile| {
            if hostile.is_alive() {
                return true;
            }
            drops.push((*hostile.aabb(), hostile.coin_yield()));
            if let Some(projectiles) = hostile.projectiles_mut() {
                orphaned.append(projectiles);
            }
            false
        });
        self.stray_projectiles.append(&mut orphaned);

        for (aabb, count) in drops {
            self.spawn_coins(&aabb, count, tuning, rng);
            if count > 0 {
                events.push(GameEvent::CoinsSpawned { count });
            }
        }
    }

    /// Drop `count` coins across the top quarter of `source`
    pub fn spawn_coins(&mut self, source: &Aabb, count: u32, tuning: &Tuning, rng: &mut Pcg32) {
        let spread = (source.width() - tuning.scenery.coin_spawn_margin).max(0.0);
        let y = source.top() + source.height() / 4.0;
        for _ in 0..count {
            let x = source.left() + random_x(rng, 0.0, spread);
            self.coins.push(Coin::new(Vec2::new(x, y), tuning));
        }
    }

    pub fn living_hostiles(&self) -> impl Iterator<Item = &Hostile> {
        self.hostiles.iter().filter(|h| h.is_alive())
    }
}

/// Whole-pixel x in `[min, max]`
fn random_x(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    let lo = min.floor() as i32;
    let hi = (max.floor() as i32).max(lo);
    rng.random_range(lo..=hi) as f32
}
