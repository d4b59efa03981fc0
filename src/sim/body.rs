//! Kinematic body shared by the player and ground monsters
//!
//! Gravity, vertical integration, and ground/platform resolution.

use super::aabb::Aabb;
use super::world::Platform;

/// Vertical kinematic state attached to a collision box
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub aabb: Aabb,
    pub velocity_y: f32,
    pub airborne: bool,
    pub gravity: f32,
}

impl Body {
    pub fn new(aabb: Aabb, gravity: f32) -> Self {
        Self {
            aabb,
            velocity_y: 0.0,
            airborne: false,
            gravity,
        }
    }

    /// A body that never falls (dragons)
    pub fn flying(aabb: Aabb) -> Self {
        Self::new(aabb, 0.0)
    }

    pub fn is_grounded(&self) -> bool {
        !self.airborne
    }

    /// Launch upward if standing on something
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.airborne {
            return false;
        }
        self.velocity_y = impulse;
        self.airborne = true;
        true
    }

    /// One frame of gravity, integration, and ground/platform resolution
    pub fn apply_gravity_and_move(&mut self, ground_y: f32, platforms: &[Platform]) {
        let previous_top = self.aabb.top();
        let previous_bottom = self.aabb.bottom();
        self.velocity_y += self.gravity;
        self.aabb.pos.y += self.velocity_y;
        self.airborne = true;

        if self.aabb.bottom() >= ground_y {
            self.aabb.set_bottom(ground_y);
            self.velocity_y = 0.0;
            self.airborne = false;
        }

        if self.velocity_y > 0.0 {
            // Falling: land on a platform we crossed this frame
            let landing = platforms.iter().find(|p| {
                self.aabb.intersects(&p.aabb)
                    && previous_bottom <= p.aabb.top()
                    && self.aabb.bottom() >= p.aabb.top()
            });
            if let Some(platform) = landing {
                self.aabb.set_bottom(platform.aabb.top());
                self.velocity_y = 0.0;
                self.airborne = false;
            }
        } else if self.velocity_y < 0.0 {
            // Rising: bump the underside of a platform
            let ceiling = platforms.iter().find(|p| {
                self.aabb.intersects(&p.aabb)
                    && previous_top >= p.aabb.bottom()
                    && self.aabb.top() <= p.aabb.bottom()
            });
            if let Some(platform) = ceiling {
                self.aabb.set_top(platform.aabb.bottom());
                self.velocity_y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    const GROUND: f32 = 670.0;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Aabb::new(Vec2::new(x, y), Vec2::new(80.0, 110.0)), 0.8)
    }

    fn platform(x: f32, y: f32, w: f32, h: f32) -> Platform {
        Platform::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_resting_on_ground_stays_put() {
        let mut body = body_at(100.0, GROUND - 110.0);
        for _ in 0..10 {
            body.apply_gravity_and_move(GROUND, &[]);
        }
        assert_eq!(body.aabb.bottom(), GROUND);
        assert_eq!(body.velocity_y, 0.0);
        assert!(body.is_grounded());
    }

    #[test]
    fn test_lands_on_platform_when_falling() {
        let plat = platform(50.0, 400.0, 150.0, 30.0);
        // Bottom just above the platform top, already falling
        let mut body = body_at(100.0, 400.0 - 110.0 - 2.0);
        body.velocity_y = 3.0;
        body.apply_gravity_and_move(GROUND, std::slice::from_ref(&plat));
        assert_eq!(body.aabb.bottom(), 400.0);
        assert_eq!(body.velocity_y, 0.0);
        assert!(!body.airborne);

        // And stays there
        for _ in 0..5 {
            body.apply_gravity_and_move(GROUND, std::slice::from_ref(&plat));
        }
        assert_eq!(body.aabb.bottom(), 400.0);
    }

    #[test]
    fn test_falls_past_platform_without_horizontal_overlap() {
        let plat = platform(500.0, 400.0, 150.0, 30.0);
        let mut body = body_at(100.0, 400.0 - 110.0 - 2.0);
        body.velocity_y = 3.0;
        body.apply_gravity_and_move(GROUND, std::slice::from_ref(&plat));
        assert!(body.aabb.bottom() > 400.0);
        assert!(body.airborne);
    }

    #[test]
    fn test_head_bump_stops_rise() {
        let plat = platform(50.0, 300.0, 150.0, 30.0);
        // Top just below the platform underside, rising fast
        let mut body = body_at(100.0, 335.0);
        body.velocity_y = -10.0;
        body.apply_gravity_and_move(GROUND, std::slice::from_ref(&plat));
        assert_eq!(body.aabb.top(), 330.0);
        assert_eq!(body.velocity_y, 0.0);
        assert!(body.airborne);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut body = body_at(100.0, GROUND - 110.0);
        body.apply_gravity_and_move(GROUND, &[]);
        assert!(body.jump(-15.0));
        assert!(!body.jump(-15.0));
        body.apply_gravity_and_move(GROUND, &[]);
        assert!(body.aabb.bottom() < GROUND);
    }

    proptest! {
        #[test]
        fn prop_dropped_body_settles_on_ground(height in 0.0f32..600.0) {
            let mut body = body_at(100.0, GROUND - 110.0 - height);
            // Free fall covers h in about sqrt(2h/g) frames
            let bound = (2.0 * height / 0.8).sqrt().ceil() as usize + 2;
            for _ in 0..bound {
                body.apply_gravity_and_move(GROUND, &[]);
            }
            prop_assert_eq!(body.aabb.bottom(), GROUND);
            prop_assert_eq!(body.velocity_y, 0.0);
            prop_assert!(!body.airborne);
        }
    }
}
