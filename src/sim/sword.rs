//! The player's sword
//!
//! Grows with collected coins and swings around a shoulder pivot. The
//! collidable region is the bounding box of the rotated blade, so the pivot
//! math below is gameplay, not decoration.

use glam::Vec2;

use super::aabb::Aabb;
use super::projectile::Projectile;
use super::state::Facing;
use super::timer::AnimationTicks;
use crate::rotate_screen_ccw;
use crate::shortest_turn_degrees;
use crate::tuning::SwordTuning;

/// Overhead swing arcs in degrees: (start, end)
const SWING_RIGHT: (f32, f32) = (225.0, 45.0);
const SWING_LEFT: (f32, f32) = (315.0, 135.0);

/// Rest angle for each facing
fn rest_angle(facing: Facing) -> f32 {
    match facing {
        Facing::Right => 0.0,
        Facing::Left => 180.0,
    }
}

/// Swing state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwingState {
    Idle,
    Swinging {
        elapsed: AnimationTicks,
        start_angle: f32,
        end_angle: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Sword {
    params: SwordTuning,
    state: SwingState,
    /// Current rotation in degrees (CCW on screen)
    angle: f32,
    level: u32,
    damage: i32,
    /// Blade size after growth (width, length)
    blade: Vec2,
    aabb: Aabb,
}

impl Sword {
    pub fn new(params: SwordTuning) -> Self {
        Self {
            params,
            state: SwingState::Idle,
            angle: 0.0,
            level: 0,
            damage: params.damage_for(0),
            blade: Vec2::new(params.base_size.x, params.length_for(0)),
            aabb: Aabb::new(Vec2::ZERO, params.base_size),
        }
    }

    pub fn state(&self) -> SwingState {
        self.state
    }

    pub fn is_swinging(&self) -> bool {
        matches!(self.state, SwingState::Swinging { .. })
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Damage dealt by a hit; live for the whole swing
    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn blade_size(&self) -> Vec2 {
        self.blade
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Start a swing toward `facing`; no-op while already swinging
    pub fn start_swing(&mut self, facing: Facing) -> bool {
        if self.is_swinging() {
            return false;
        }
        let (start_angle, end_angle) = match facing {
            Facing::Right => SWING_RIGHT,
            Facing::Left => SWING_LEFT,
        };
        self.state = SwingState::Swinging {
            elapsed: AnimationTicks::default(),
            start_angle,
            end_angle,
        };
        self.angle = start_angle;
        true
    }

    /// Advance one animation frame, then re-anchor to the wielder
    pub fn tick(&mut self, wielder_center: Vec2, facing: Facing) {
        match &mut self.state {
            SwingState::Swinging {
                elapsed,
                start_angle,
                end_angle,
            } => {
                elapsed.advance();
                let progress = elapsed.progress(self.params.swing_duration_frames);
                self.angle = *start_angle + (*end_angle - *start_angle) * progress;
                if progress >= 1.0 {
                    self.angle = *end_angle;
                    self.state = SwingState::Idle;
                }
            }
            SwingState::Idle => {
                let target = rest_angle(facing);
                self.angle = self.angle.rem_euclid(360.0);
                let diff = shortest_turn_degrees(self.angle, target);
                let step = self.params.return_speed;
                if diff.abs() > step {
                    self.angle += step.copysign(diff);
                } else {
                    self.angle = target;
                }
            }
        }
        self.place(wielder_center, facing);
    }

    /// Recompute the blade's collision box for the current angle
    pub fn place(&mut self, wielder_center: Vec2, facing: Facing) {
        let offset = self.params.anchor_offset;
        let anchor = match facing {
            Facing::Right => wielder_center + offset,
            Facing::Left => wielder_center + Vec2::new(-offset.x, offset.y),
        };

        let pivot = Vec2::new(self.blade.x / 2.0, self.blade.y * self.params.pivot_fraction);
        let rotated_pivot = rotate_screen_ccw(pivot, self.angle);

        let (sin, cos) = self.angle.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let bounds = Vec2::new(
            self.blade.x * cos + self.blade.y * sin,
            self.blade.x * sin + self.blade.y * cos,
        );

        self.aabb = Aabb::new(anchor - rotated_pivot, bounds);
    }

    /// Recompute the growth level from the coin total; returns true if it grew
    pub fn try_grow(&mut self, total_coins: u32) -> bool {
        let new_level = self.params.level_for(total_coins);
        if new_level <= self.level {
            return false;
        }
        self.set_level(new_level);
        log::info!(
            "Sword grew: level {}, length {:.1}px, damage {}",
            self.level,
            self.blade.y,
            self.damage
        );
        true
    }

    /// Rebuild level, blade length and damage for a restored coin total
    pub fn restore_from_coins(&mut self, total_coins: u32) {
        self.set_level(self.params.level_for(total_coins));
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
        self.blade = Vec2::new(self.params.base_size.x, self.params.length_for(level));
        self.damage = self.params.damage_for(level);
    }

    /// Bounce an incoming projectile back with this sword's damage
    pub fn reflect(&self, projectile: &mut Projectile) {
        projectile.reflect(self.damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sword() -> Sword {
        Sword::new(SwordTuning::default())
    }

    const CENTER: Vec2 = Vec2::new(640.0, 600.0);

    #[test]
    fn test_swing_right_ends_at_45_after_20_ticks() {
        let mut s = sword();
        assert!(s.start_swing(Facing::Right));
        assert_eq!(s.angle(), 225.0);
        for i in 0..20 {
            assert!(s.is_swinging(), "idle too early at tick {i}");
            s.tick(CENTER, Facing::Right);
        }
        assert!(!s.is_swinging());
        assert_eq!(s.angle(), 45.0);
    }

    #[test]
    fn test_swing_left_ends_at_135() {
        let mut s = sword();
        s.start_swing(Facing::Left);
        assert_eq!(s.angle(), 315.0);
        for _ in 0..20 {
            s.tick(CENTER, Facing::Left);
        }
        assert_eq!(s.state(), SwingState::Idle);
        assert_eq!(s.angle(), 135.0);
    }

    #[test]
    fn test_start_swing_is_noop_while_swinging() {
        let mut s = sword();
        s.start_swing(Facing::Right);
        s.tick(CENTER, Facing::Right);
        let angle = s.angle();
        assert!(!s.start_swing(Facing::Left));
        assert_eq!(s.angle(), angle);
    }

    #[test]
    fn test_swing_midpoint_interpolates() {
        let mut s = sword();
        s.start_swing(Facing::Right);
        for _ in 0..10 {
            s.tick(CENTER, Facing::Right);
        }
        assert!((s.angle() - 135.0).abs() < 1e-4);
    }

    #[test]
    fn test_idle_eases_back_to_rest_along_short_path() {
        let mut s = sword();
        s.start_swing(Facing::Right);
        for _ in 0..20 {
            s.tick(CENTER, Facing::Right);
        }
        // 45 -> 0 at 7 deg/frame: 38, 31, 24, 17, 10, 3, 0
        s.tick(CENTER, Facing::Right);
        assert_eq!(s.angle(), 38.0);
        for _ in 0..6 {
            s.tick(CENTER, Facing::Right);
        }
        assert_eq!(s.angle(), 0.0);
    }

    #[test]
    fn test_idle_turns_toward_left_rest() {
        let mut s = sword();
        // From 0 the left rest (180) is exactly opposite; turn goes positive
        s.tick(CENTER, Facing::Left);
        assert_eq!(s.angle(), 7.0);
    }

    #[test]
    fn test_grow_rescales_once_per_level() {
        let mut s = sword();
        assert!(!s.try_grow(4));
        assert_eq!(s.level(), 0);
        assert_eq!(s.damage(), 5);

        assert!(s.try_grow(15));
        assert_eq!(s.level(), 3);
        assert_eq!(s.damage(), 11);
        assert_eq!(s.blade_size().y, 165.0);

        // Same level again is a no-op
        assert!(!s.try_grow(16));
        // Growth never goes backwards
        assert!(!s.try_grow(0));
        assert_eq!(s.level(), 3);
    }

    #[test]
    fn test_rest_geometry_hangs_from_shoulder() {
        let mut s = sword();
        s.place(CENTER, Facing::Right);
        // Unrotated: top-left = anchor - pivot
        let anchor = CENTER + Vec2::new(0.0, -40.0);
        let expected = anchor - Vec2::new(22.5, 135.0);
        assert!((s.aabb().pos - expected).length() < 1e-3);
        assert!((s.aabb().size - Vec2::new(45.0, 150.0)).length() < 1e-3);
    }

    #[test]
    fn test_quarter_turn_swaps_bounds() {
        let mut s = sword();
        s.angle = 90.0;
        s.place(CENTER, Facing::Right);
        assert!((s.aabb().size - Vec2::new(150.0, 45.0)).length() < 1e-3);
        // Pivot (22.5, 135) rotated CCW by 90 on screen -> (135, -22.5)
        let anchor = CENTER + Vec2::new(0.0, -40.0);
        let expected = anchor - Vec2::new(135.0, -22.5);
        assert!((s.aabb().pos - expected).length() < 1e-3);
    }

    #[test]
    fn test_reflect_uses_current_damage() {
        let mut s = sword();
        s.try_grow(10);
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 7.0, 15, Vec2::splat(30.0));
        s.reflect(&mut p);
        assert!(p.reflected);
        assert_eq!(p.hit_damage(), 9);
    }

    proptest! {
        #[test]
        fn prop_growth_level_is_floor_of_coins(coins in 0u32..10_000) {
            let mut s = sword();
            s.try_grow(coins);
            prop_assert_eq!(s.level(), coins / 5);
            prop_assert_eq!(s.damage(), 5 + 2 * (coins / 5) as i32);
        }

        #[test]
        fn prop_growth_is_monotonic(a in 0u32..1000, b in 0u32..1000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let mut s = sword();
            s.try_grow(lo);
            let first = s.level();
            s.try_grow(hi);
            prop_assert!(s.level() >= first);
        }

        #[test]
        fn prop_swing_always_lasts_exactly_twenty_ticks(
            right in any::<bool>(),
            settle in 0usize..40,
        ) {
            let facing = if right { Facing::Right } else { Facing::Left };
            let mut s = sword();
            // Arbitrary idle angle before the swing
            for _ in 0..settle {
                s.tick(CENTER, facing.flipped());
            }
            s.start_swing(facing);
            for _ in 0..19 {
                s.tick(CENTER, facing);
                prop_assert!(s.is_swinging());
            }
            s.tick(CENTER, facing);
            prop_assert!(!s.is_swinging());
            let expected = if right { 45.0 } else { 135.0 };
            prop_assert_eq!(s.angle(), expected);
        }
    }
}
