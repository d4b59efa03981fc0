//! Hostiles: walking monsters and flying, fire-breathing dragons
//!
//! Both variants sit behind [`Hostile`], which is the capability set the
//! environment and the orchestrator use: update, take damage, liveness,
//! collision box, contact damage, coin yield, and (for dragons) projectiles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::body::Body;
use super::projectile::Projectile;
use super::state::Facing;
use super::timer::Cooldown;
use super::world::Platform;
use crate::tuning::{DragonTuning, MonsterTuning, Tuning};

/// Persisted type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileKind {
    Monster,
    Dragon,
}

/// Read-only view of the world a hostile needs for one update
#[derive(Debug, Clone, Copy)]
pub struct HostileContext<'a> {
    pub player_center: Vec2,
    pub now_ms: u64,
    pub ground_y: f32,
    pub playfield: Aabb,
    pub platforms: &'a [Platform],
}

/// Reduce `health` and report whether this hit was the killing one
fn apply_damage(health: &mut i32, alive: &mut bool, amount: i32) -> bool {
    if !*alive || amount <= 0 {
        return false;
    }
    *health = (*health - amount).max(0);
    if *health == 0 {
        *alive = false;
        return true;
    }
    false
}

/// Walks back and forth around its spawn point
#[derive(Debug, Clone)]
pub struct Monster {
    pub body: Body,
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
    pub coins_on_defeat: u32,
    pub alive: bool,
    /// +1 walking right, -1 walking left
    pub direction: i32,
    pub patrol_start_x: f32,
    patrol_range: f32,
}

impl Monster {
    pub fn new(pos: Vec2, params: &MonsterTuning) -> Self {
        Self {
            body: Body::new(Aabb::new(pos, params.size), params.gravity),
            speed: params.speed,
            health: params.health,
            damage: params.damage,
            coins_on_defeat: params.coins_on_defeat,
            alive: true,
            direction: 1,
            patrol_start_x: pos.x,
            patrol_range: params.patrol_range,
        }
    }

    /// Derived from `patrol_start_x`, never stored
    pub fn patrol_bounds(&self) -> (f32, f32) {
        (
            self.patrol_start_x - self.patrol_range,
            self.patrol_start_x + self.patrol_range,
        )
    }

    pub fn update(&mut self, ctx: &HostileContext) {
        if !self.alive {
            return;
        }
        self.body.aabb.pos.x += self.speed * self.direction as f32;

        let (left, right) = self.patrol_bounds();
        let x = self.body.aabb.pos.x;
        if self.direction == 1 && x >= right {
            self.direction = -1;
        } else if self.direction == -1 && x <= left {
            self.direction = 1;
        }

        self.body.apply_gravity_and_move(ctx.ground_y, ctx.platforms);
    }

    /// Returns the coin yield on the killing hit, 0 otherwise
    pub fn take_damage(&mut self, amount: i32) -> u32 {
        if apply_damage(&mut self.health, &mut self.alive, amount) {
            log::info!("Monster defeated");
            self.coins_on_defeat
        } else {
            0
        }
    }
}

/// Flies, chases the player horizontally, and shoots fireballs
#[derive(Debug, Clone)]
pub struct Dragon {
    pub body: Body,
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
    pub coins_on_defeat: u32,
    pub alive: bool,
    pub direction: i32,
    pub facing: Facing,
    pub patrol_start_x: f32,
    pub fireball_cooldown: Cooldown,
    /// In-flight fireballs; keep flying after the dragon dies
    pub projectiles: Vec<Projectile>,
    params: DragonTuning,
    projectile_size: Vec2,
}

impl Dragon {
    /// Spawn at `pos`; the first fireball waits a full cooldown after `now_ms`
    pub fn new(pos: Vec2, tuning: &Tuning, now_ms: u64) -> Self {
        let params = tuning.dragon;
        Self {
            body: Body::flying(Aabb::new(pos, params.size)),
            speed: params.speed,
            health: params.health,
            damage: params.damage,
            coins_on_defeat: params.coins_on_defeat,
            alive: true,
            direction: 1,
            facing: Facing::Right,
            patrol_start_x: pos.x,
            fireball_cooldown: Cooldown::started_at(params.fireball_cooldown_ms, now_ms),
            projectiles: Vec::new(),
            params,
            projectile_size: tuning.scenery.projectile_size,
        }
    }

    pub fn patrol_bounds(&self) -> (f32, f32) {
        (
            self.patrol_start_x - self.params.patrol_range,
            self.patrol_start_x + self.params.patrol_range,
        )
    }

    /// Where fireballs leave the dragon: toward its facing, near the top
    pub fn muzzle(&self) -> Vec2 {
        let aabb = &self.body.aabb;
        Vec2::new(
            aabb.center().x + self.facing.sign() * aabb.width() / 3.0,
            aabb.top() + aabb.height() / 4.0,
        )
    }

    /// Returns true if a fireball was launched this frame
    pub fn update(&mut self, ctx: &HostileContext) -> bool {
        let mut fired = false;
        if self.alive {
            fired = self.think(ctx);
        }
        for projectile in &mut self.projectiles {
            projectile.tick(&ctx.playfield);
        }
        self.projectiles.retain(|p| p.active);
        fired
    }

    fn think(&mut self, ctx: &HostileContext) -> bool {
        let center = self.body.aabb.center();
        let dx = ctx.player_center.x - center.x;
        let distance = (ctx.player_center - center).length();

        if dx > 0.0 {
            self.facing = Facing::Right;
        } else if dx < 0.0 {
            self.facing = Facing::Left;
        }

        let mut fired = false;
        if distance <= self.params.detection_range {
            // Chase horizontally only; altitude is fixed
            if dx > 0.0 {
                self.body.aabb.pos.x += self.speed;
            } else if dx < 0.0 {
                self.body.aabb.pos.x -= self.speed;
            }

            if distance <= self.params.attack_range && self.fireball_cooldown.try_fire(ctx.now_ms) {
                self.shoot(ctx.player_center);
                fired = true;
            }
        } else {
            self.body.aabb.pos.x += self.speed * self.direction as f32;
            let (left, right) = self.patrol_bounds();
            let x = self.body.aabb.pos.x;
            if x <= left {
                self.direction = 1;
            } else if x >= right {
                self.direction = -1;
            }
        }

        self.body.aabb.clamp_x(ctx.playfield.width());
        fired
    }

    fn shoot(&mut self, target: Vec2) {
        let fireball = Projectile::new(
            self.muzzle(),
            target,
            self.params.fireball_speed,
            self.damage,
            self.projectile_size,
        );
        log::debug!("Dragon fired toward {:?}", target);
        self.projectiles.push(fireball);
    }

    pub fn take_damage(&mut self, amount: i32) -> u32 {
        if apply_damage(&mut self.health, &mut self.alive, amount) {
            log::info!("Dragon defeated");
            self.coins_on_defeat
        } else {
            0
        }
    }
}

/// A hostile of either kind
#[derive(Debug, Clone)]
pub enum Hostile {
    Monster(Monster),
    Dragon(Dragon),
}

impl Hostile {
    pub fn kind(&self) -> HostileKind {
        match self {
            Hostile::Monster(_) => HostileKind::Monster,
            Hostile::Dragon(_) => HostileKind::Dragon,
        }
    }

    /// Returns true if a projectile was launched
    pub fn update(&mut self, ctx: &HostileContext) -> bool {
        match self {
            Hostile::Monster(m) => {
                m.update(ctx);
                false
            }
            Hostile::Dragon(d) => d.update(ctx),
        }
    }

    pub fn take_damage(&mut self, amount: i32) -> u32 {
        match self {
            Hostile::Monster(m) => m.take_damage(amount),
            Hostile::Dragon(d) => d.take_damage(amount),
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Hostile::Monster(m) => m.alive,
            Hostile::Dragon(d) => d.alive,
        }
    }

    pub fn aabb(&self) -> &Aabb {
        match self {
            Hostile::Monster(m) => &m.body.aabb,
            Hostile::Dragon(d) => &d.body.aabb,
        }
    }

    pub fn health(&self) -> i32 {
        match self {
            Hostile::Monster(m) => m.health,
            Hostile::Dragon(d) => d.health,
        }
    }

    /// Damage dealt to the player on contact
    pub fn contact_damage(&self) -> i32 {
        match self {
            Hostile::Monster(m) => m.damage,
            Hostile::Dragon(d) => d.damage,
        }
    }

    pub fn coin_yield(&self) -> u32 {
        match self {
            Hostile::Monster(m) => m.coins_on_defeat,
            Hostile::Dragon(d) => d.coins_on_defeat,
        }
    }

    /// Facing used for drawing
    pub fn facing(&self) -> Facing {
        match self {
            Hostile::Monster(m) if m.direction < 0 => Facing::Left,
            Hostile::Monster(_) => Facing::Right,
            Hostile::Dragon(d) => d.facing,
        }
    }

    pub fn projectiles(&self) -> &[Projectile] {
        match self {
            Hostile::Monster(_) => &[],
            Hostile::Dragon(d) => &d.projectiles,
        }
    }

    pub fn projectiles_mut(&mut self) -> Option<&mut Vec<Projectile>> {
        match self {
            Hostile::Monster(_) => None,
            Hostile::Dragon(d) => Some(&mut d.projectiles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 670.0;

    fn ctx(player_center: Vec2, now_ms: u64) -> HostileContext<'static> {
        HostileContext {
            player_center,
            now_ms,
            ground_y: GROUND,
            playfield: Aabb::new(Vec2::ZERO, Vec2::new(1280.0, 720.0)),
            platforms: &[],
        }
    }

    fn monster_at(x: f32) -> Monster {
        Monster::new(Vec2::new(x, GROUND - 90.0), &MonsterTuning::default())
    }

    #[test]
    fn test_two_hits_defeat_monster() {
        let mut m = monster_at(300.0);
        assert_eq!(m.take_damage(12), 0);
        assert_eq!(m.health, 8);
        assert!(m.alive);

        assert_eq!(m.take_damage(12), 3);
        assert!(m.health <= 0);
        assert!(!m.alive);

        // Dead stays dead and yields nothing more
        assert_eq!(m.take_damage(12), 0);
    }

    #[test]
    fn test_non_positive_damage_is_ignored() {
        let mut m = monster_at(300.0);
        assert_eq!(m.take_damage(-50), 0);
        assert_eq!(m.take_damage(0), 0);
        assert_eq!(m.health, 20);
        assert!(m.alive);
    }

    #[test]
    fn test_patrol_turns_at_bounds() {
        let mut m = monster_at(300.0);
        let c = ctx(Vec2::new(0.0, 0.0), 0);
        // 100 px at 2 px/frame reaches the right bound on frame 50
        for _ in 0..50 {
            m.update(&c);
        }
        assert_eq!(m.body.aabb.pos.x, 400.0);
        assert_eq!(m.direction, -1);
        for _ in 0..100 {
            m.update(&c);
        }
        assert_eq!(m.body.aabb.pos.x, 200.0);
        assert_eq!(m.direction, 1);
        assert_eq!(m.body.aabb.bottom(), GROUND);
    }

    #[test]
    fn test_dead_monster_does_not_move() {
        let mut m = monster_at(300.0);
        m.take_damage(100);
        m.update(&ctx(Vec2::ZERO, 0));
        assert_eq!(m.body.aabb.pos.x, 300.0);
    }

    fn dragon_at(x: f32, y: f32) -> Dragon {
        Dragon::new(Vec2::new(x, y), &Tuning::default(), 0)
    }

    #[test]
    fn test_dragon_chases_and_fires_after_cooldown() {
        let mut d = dragon_at(300.0, 150.0);
        // Player within detection range, to the right
        let player = d.body.aabb.center() + Vec2::new(200.0, 100.0);
        assert!(!d.update(&ctx(player, 16)));
        assert_eq!(d.body.aabb.pos.x, 303.0);
        assert_eq!(d.facing, Facing::Right);
        assert!(d.projectiles.is_empty());

        assert!(d.update(&ctx(player, 1501)));
        assert_eq!(d.projectiles.len(), 1);
        assert!(!d.update(&ctx(player, 1600)));
        assert_eq!(d.projectiles.len(), 1);
    }

    #[test]
    fn test_dragon_fireball_aims_at_player() {
        let mut d = dragon_at(300.0, 150.0);
        let player = d.body.aabb.center() + Vec2::new(-150.0, 200.0);
        d.update(&ctx(player, 2000));
        let fireball = &d.projectiles[0];
        assert_eq!(d.facing, Facing::Left);
        assert!(fireball.direction.x < 0.0);
        assert!(fireball.direction.y > 0.0);
        assert_eq!(fireball.damage, 15);
    }

    #[test]
    fn test_dragon_patrols_when_player_far() {
        let mut d = dragon_at(300.0, 150.0);
        let far = Vec2::new(1200.0, 650.0);
        let c = ctx(far, 5000);
        d.update(&c);
        assert_eq!(d.body.aabb.pos.x, 303.0);
        assert!(d.projectiles.is_empty());
        for _ in 0..200 {
            d.update(&c);
        }
        let (left, right) = d.patrol_bounds();
        assert!(d.body.aabb.pos.x >= left - 3.0 && d.body.aabb.pos.x <= right + 3.0);
        // Flying: altitude unchanged
        assert_eq!(d.body.aabb.pos.y, 150.0);
    }

    #[test]
    fn test_dead_dragon_keeps_ticking_projectiles() {
        let mut d = dragon_at(300.0, 150.0);
        let player = d.body.aabb.center() + Vec2::new(100.0, 100.0);
        d.update(&ctx(player, 2000));
        let start = d.projectiles[0].aabb.pos;
        d.take_damage(1000);
        assert!(!d.alive);
        d.update(&ctx(player, 2016));
        assert_ne!(d.projectiles[0].aabb.pos, start);
    }

    #[test]
    fn test_hostile_capabilities() {
        let mut h = Hostile::Dragon(dragon_at(300.0, 150.0));
        assert_eq!(h.kind(), HostileKind::Dragon);
        assert_eq!(h.coin_yield(), 10);
        assert_eq!(h.contact_damage(), 15);
        assert!(h.projectiles_mut().is_some());

        let mut m = Hostile::Monster(monster_at(100.0));
        assert!(m.projectiles().is_empty());
        assert!(m.projectiles_mut().is_none());
        assert_eq!(m.take_damage(25), 3);
        assert!(!m.is_alive());
    }
}
