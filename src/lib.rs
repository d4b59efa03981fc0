//! Growing Sword - simulation core of a 2D side-scrolling action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, AI, game state)
//! - `persistence`: Save/load of the mutable world state
//! - `platform`: Input events and clocks supplied by the host
//! - `render`: Read-only snapshot handed to the draw collaborator
//! - `audio`: Sound effect / music requests derived from game events
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;
    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Nominal frame rate the animation timers are authored for
    pub const TARGET_FPS: u32 = 60;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 110.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_HEALTH: i32 = 100;
    pub const PLAYER_GRAVITY: f32 = 0.8;
    pub const PLAYER_JUMP_IMPULSE: f32 = -15.0;

    /// Sword defaults
    pub const SWORD_BASE_WIDTH: f32 = 45.0;
    pub const SWORD_BASE_HEIGHT: f32 = 150.0;
    pub const SWORD_BASE_DAMAGE: i32 = 5;
    pub const SWORD_DAMAGE_PER_LEVEL: i32 = 2;
    /// Coins needed per growth level
    pub const LEVEL_UP_THRESHOLD: u32 = 5;
    /// Blade growth per level, multiplied by 10 px
    pub const SWORD_GROWTH_PER_LEVEL: f32 = 0.5;
    pub const SWING_DURATION_FRAMES: u32 = 20;
    /// Degrees per frame while easing back to rest
    pub const SWING_RETURN_SPEED: f32 = 7.0;
    /// Pivot sits this far down the blade (near the hilt)
    pub const SWORD_PIVOT_FRACTION: f32 = 0.9;
    /// Shoulder anchor relative to the wielder's center
    pub const SWORD_ANCHOR_OFFSET_X: f32 = 0.0;
    pub const SWORD_ANCHOR_OFFSET_Y: f32 = -40.0;

    /// Ground monster defaults
    pub const MONSTER_WIDTH: f32 = 90.0;
    pub const MONSTER_HEIGHT: f32 = 90.0;
    pub const MONSTER_SPEED: f32 = 2.0;
    pub const MONSTER_HEALTH: i32 = 20;
    pub const MONSTER_DAMAGE: i32 = 5;
    pub const MONSTER_GRAVITY: f32 = 0.8;
    pub const MONSTER_PATROL_RANGE: f32 = 100.0;
    pub const COINS_PER_MONSTER_KILL: u32 = 3;

    /// Dragon defaults
    pub const DRAGON_WIDTH: f32 = 250.0;
    pub const DRAGON_HEIGHT: f32 = 200.0;
    pub const DRAGON_SPEED: f32 = 3.0;
    pub const DRAGON_HEALTH: i32 = 100;
    pub const DRAGON_DAMAGE: i32 = 15;
    pub const DRAGON_PATROL_RANGE: f32 = 200.0;
    pub const DRAGON_DETECTION_RANGE: f32 = 400.0;
    pub const DRAGON_ATTACK_RANGE: f32 = 500.0;
    pub const DRAGON_FIREBALL_COOLDOWN_MS: u64 = 1500;
    pub const COINS_PER_DRAGON_KILL: u32 = 10;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 30.0;
    pub const FIREBALL_SPEED: f32 = 7.0;
    pub const REFLECT_SPEED_MULTIPLIER: f32 = 1.5;

    /// Tree defaults
    pub const TREE_WIDTH: f32 = 120.0;
    pub const TREE_HEIGHT: f32 = 180.0;
    pub const TREE_HEALTH: i32 = 3;
    pub const COINS_PER_TREE_CUT: u32 = 1;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 40.0;
    pub const COIN_VALUE: u32 = 1;
    pub const COIN_GRAVITY: f32 = 0.5;
    /// Horizontal jitter window is the source width minus this
    pub const COIN_SPAWN_MARGIN: f32 = 30.0;

    /// Minimum time between two contact hits on the player
    pub const CONTACT_DAMAGE_COOLDOWN_MS: u64 = 1000;
}

/// Shortest signed turn in degrees from `from` to `to`, in [-180, 180]
#[inline]
pub fn shortest_turn_degrees(from: f32, to: f32) -> f32 {
    let mut diff = to.rem_euclid(360.0) - from.rem_euclid(360.0);
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    diff
}

/// Rotate `v` by `degrees`, counter-clockwise on a y-down screen
#[inline]
pub fn rotate_screen_ccw(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(-degrees.to_radians()).rotate(v)
}
