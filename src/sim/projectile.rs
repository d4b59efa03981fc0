//! Directed projectiles (dragon fireballs)

use glam::Vec2;

use super::aabb::Aabb;
use crate::consts::REFLECT_SPEED_MULTIPLIER;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub aabb: Aabb,
    /// Unit direction, or zero when spawned on its own target
    pub direction: Vec2,
    pub speed: f32,
    /// Damage dealt to the player while unreflected
    pub damage: i32,
    /// Cleared when the projectile leaves the playfield
    pub active: bool,
    pub reflected: bool,
    /// Damage dealt to hostiles after a reflection
    pub reflected_damage: i32,
}

impl Projectile {
    /// Spawn centered on `origin`, aimed at `target`
    pub fn new(origin: Vec2, target: Vec2, speed: f32, damage: i32, size: Vec2) -> Self {
        Self {
            aabb: Aabb::from_center(origin, size),
            direction: (target - origin).normalize_or_zero(),
            speed,
            damage,
            active: true,
            reflected: false,
            reflected_damage: 0,
        }
    }

    /// Move one frame; deactivate once fully outside `playfield`
    pub fn tick(&mut self, playfield: &Aabb) {
        if !self.active {
            return;
        }
        self.aabb.translate(self.direction * self.speed);
        if !self.aabb.intersects(playfield) {
            self.active = false;
            log::debug!("Projectile left the playfield at {:?}", self.aabb.center());
        }
    }

    /// Send it back where it came from, faster, carrying `new_damage`
    pub fn reflect(&mut self, new_damage: i32) {
        self.direction = -self.direction;
        self.speed *= REFLECT_SPEED_MULTIPLIER;
        self.reflected = true;
        self.reflected_damage = new_damage;
    }

    /// Damage applied on the next hit, depending on who it is aimed at now
    pub fn hit_damage(&self) -> i32 {
        if self.reflected {
            self.reflected_damage
        } else {
            self.damage
        }
    }
}
