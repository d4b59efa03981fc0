//! Data-driven game balance
//!
//! One immutable [`Tuning`] is built at startup and passed by reference into
//! every system that needs a constant. Defaults come from [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Playfield layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_height: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,
        }
    }
}

impl WorldTuning {
    /// Y coordinate of the top of the ground strip
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub gravity: f32,
    pub jump_impulse: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            health: PLAYER_HEALTH,
            gravity: PLAYER_GRAVITY,
            jump_impulse: PLAYER_JUMP_IMPULSE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwordTuning {
    /// Unscaled blade size (width, length)
    pub base_size: Vec2,
    pub base_damage: i32,
    pub damage_per_level: i32,
    pub level_up_threshold: u32,
    pub growth_per_level: f32,
    pub swing_duration_frames: u32,
    pub return_speed: f32,
    pub pivot_fraction: f32,
    pub anchor_offset: Vec2,
}

impl Default for SwordTuning {
    fn default() -> Self {
        Self {
            base_size: Vec2::new(SWORD_BASE_WIDTH, SWORD_BASE_HEIGHT),
            base_damage: SWORD_BASE_DAMAGE,
            damage_per_level: SWORD_DAMAGE_PER_LEVEL,
            level_up_threshold: LEVEL_UP_THRESHOLD,
            growth_per_level: SWORD_GROWTH_PER_LEVEL,
            swing_duration_frames: SWING_DURATION_FRAMES,
            return_speed: SWING_RETURN_SPEED,
            pivot_fraction: SWORD_PIVOT_FRACTION,
            anchor_offset: Vec2::new(SWORD_ANCHOR_OFFSET_X, SWORD_ANCHOR_OFFSET_Y),
        }
    }
}

impl SwordTuning {
    /// Growth level reached with `total_coins` collected
    pub fn level_for(&self, total_coins: u32) -> u32 {
        total_coins / self.level_up_threshold.max(1)
    }

    /// Saturates instead of overflowing for absurd levels
    pub fn damage_for(&self, level: u32) -> i32 {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        self.base_damage
            .saturating_add(level.saturating_mul(self.damage_per_level))
    }

    /// Blade length at `level` (growth is scaled by 10 px)
    pub fn length_for(&self, level: u32) -> f32 {
        self.base_size.y + level as f32 * self.growth_per_level * 10.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterTuning {
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
    pub gravity: f32,
    pub patrol_range: f32,
    pub coins_on_defeat: u32,
}

impl Default for MonsterTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(MONSTER_WIDTH, MONSTER_HEIGHT),
            speed: MONSTER_SPEED,
            health: MONSTER_HEALTH,
            damage: MONSTER_DAMAGE,
            gravity: MONSTER_GRAVITY,
            patrol_range: MONSTER_PATROL_RANGE,
            coins_on_defeat: COINS_PER_MONSTER_KILL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragonTuning {
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
    pub patrol_range: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub fireball_cooldown_ms: u64,
    pub fireball_speed: f32,
    pub coins_on_defeat: u32,
}

impl Default for DragonTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(DRAGON_WIDTH, DRAGON_HEIGHT),
            speed: DRAGON_SPEED,
            health: DRAGON_HEALTH,
            damage: DRAGON_DAMAGE,
            patrol_range: DRAGON_PATROL_RANGE,
            detection_range: DRAGON_DETECTION_RANGE,
            attack_range: DRAGON_ATTACK_RANGE,
            fireball_cooldown_ms: DRAGON_FIREBALL_COOLDOWN_MS,
            fireball_speed: FIREBALL_SPEED,
            coins_on_defeat: COINS_PER_DRAGON_KILL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenerySizes {
    pub tree_size: Vec2,
    pub tree_health: i32,
    pub coins_per_tree: u32,
    pub coin_size: Vec2,
    pub coin_value: u32,
    pub coin_gravity: f32,
    pub coin_spawn_margin: f32,
    pub projectile_size: Vec2,
}

impl Default for ScenerySizes {
    fn default() -> Self {
        Self {
            tree_size: Vec2::new(TREE_WIDTH, TREE_HEIGHT),
            tree_health: TREE_HEALTH,
            coins_per_tree: COINS_PER_TREE_CUT,
            coin_size: Vec2::splat(COIN_SIZE),
            coin_value: COIN_VALUE,
            coin_gravity: COIN_GRAVITY,
            coin_spawn_margin: COIN_SPAWN_MARGIN,
            projectile_size: Vec2::splat(PROJECTILE_SIZE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Shared across all monsters touching the player
    pub contact_cooldown_ms: u64,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            contact_cooldown_ms: CONTACT_DAMAGE_COOLDOWN_MS,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub player: PlayerTuning,
    pub sword: SwordTuning,
    pub monster: MonsterTuning,
    pub dragon: DragonTuning,
    pub scenery: ScenerySizes,
    pub combat: CombatTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning table; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
