//! The save record and its conversion to and from live game state
//!
//! Field names follow the on-disk JSON layout. Only mutable world state is
//! stored; anything derivable (patrol bounds, sword blade geometry, sizes)
//! is rebuilt from [`Tuning`] on restore.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::PersistenceError;
use crate::settings::Settings;
use crate::sim::{
    Coin, Cooldown, Dragon, Environment, Facing, GameState, Hostile, HostileKind, Monster,
    Platform, Player, Scene, Tree,
};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub coins: u32,
    pub facing_right: bool,
    pub sword_growth_level: u32,
    pub sword_current_damage: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeRecord {
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub is_cut: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub is_alive: bool,
    pub speed: f32,
    pub damage: i32,
    pub direction: i32,
    pub patrol_start_x: f32,
    #[serde(rename = "type")]
    pub kind: HostileKind,
    /// Dragons only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fireball_time: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub x: f32,
    pub y: f32,
    pub value: u32,
    pub collected: bool,
    pub velocity_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    pub trees: Vec<TreeRecord>,
    pub monsters: Vec<MonsterRecord>,
    pub coins: Vec<CoinRecord>,
    pub platforms: Vec<PlatformRecord>,
}

/// Everything written to the save file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub player: PlayerRecord,
    pub environment: EnvironmentRecord,
    pub current_scene: Scene,
    pub music_volume: f32,
    pub sfx_volume: f32,
    /// Simulation clock at save time, so cooldowns resume where they were
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
}

impl SaveRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Snapshot the mutable world state
pub fn capture(state: &GameState, settings: &Settings) -> SaveRecord {
    let player = &state.player;
    let env = &state.environment;

    SaveRecord {
        player: PlayerRecord {
            x: player.aabb().left(),
            y: player.aabb().top(),
            health: player.health,
            coins: player.coins,
            facing_right: player.facing.is_right(),
            sword_growth_level: player.sword.level(),
            sword_current_damage: player.sword.damage(),
        },
        environment: EnvironmentRecord {
            trees: env
                .trees
                .iter()
                .map(|t| TreeRecord {
                    x: t.aabb.left(),
                    y: t.aabb.top(),
                    health: t.health,
                    is_cut: t.cut,
                })
                .collect(),
            monsters: env.hostiles.iter().map(capture_hostile).collect(),
            coins: env
                .coins
                .iter()
                .map(|c| CoinRecord {
                    x: c.aabb().left(),
                    y: c.aabb().top(),
                    value: c.value,
                    collected: c.collected,
                    velocity_y: c.body.velocity_y,
                })
                .collect(),
            platforms: env
                .platforms
                .iter()
                .map(|p| PlatformRecord {
                    x: p.aabb.left(),
                    y: p.aabb.top(),
                    width: p.aabb.width(),
                    height: p.aabb.height(),
                })
                .collect(),
        },
        current_scene: state.scene,
        music_volume: settings.music_volume,
        sfx_volume: settings.sfx_volume,
        elapsed_ms: Some(state.time_ms),
    }
}

fn capture_hostile(hostile: &Hostile) -> MonsterRecord {
    match hostile {
        Hostile::Monster(m) => MonsterRecord {
            x: m.body.aabb.left(),
            y: m.body.aabb.top(),
            health: m.health,
            is_alive: m.alive,
            speed: m.speed,
            damage: m.damage,
            direction: m.direction,
            patrol_start_x: m.patrol_start_x,
            kind: HostileKind::Monster,
            last_fireball_time: None,
        },
        Hostile::Dragon(d) => MonsterRecord {
            x: d.body.aabb.left(),
            y: d.body.aabb.top(),
            health: d.health,
            is_alive: d.alive,
            speed: d.speed,
            damage: d.damage,
            direction: d.direction,
            patrol_start_x: d.patrol_start_x,
            kind: HostileKind::Dragon,
            last_fireball_time: d.fireball_cooldown.last_fired_ms,
        },
    }
}

/// Rebuild a playable state from a record
///
/// Validation runs on the record alone; nothing is built until it passes,
/// so a bad record never leaves a half-restored world behind.
pub fn restore(
    record: &SaveRecord,
    tuning: &Tuning,
    seed: u64,
) -> Result<(GameState, Settings), PersistenceError> {
    validate(record, tuning)?;

    let now_ms = record.elapsed_ms.unwrap_or(0);

    let p = &record.player;
    let mut player = Player::new(Vec2::new(p.x, p.y), tuning);
    player.restore(p.health, p.coins, Facing::from_right(p.facing_right));

    let env = &record.environment;
    let mut environment = Environment::empty();

    environment.trees = env
        .trees
        .iter()
        .map(|t| {
            let mut tree = Tree::new(Vec2::new(t.x, t.y), tuning);
            tree.health = t.health.max(0);
            tree.cut = t.is_cut;
            tree
        })
        .collect();

    environment.hostiles = env
        .monsters
        .iter()
        .map(|m| restore_hostile(m, tuning, now_ms))
        .collect();

    environment.coins = env
        .coins
        .iter()
        .map(|c| {
            let mut coin = Coin::new(Vec2::new(c.x, c.y), tuning);
            coin.value = c.value;
            coin.collected = c.collected;
            coin.body.velocity_y = c.velocity_y;
            coin.body.airborne = c.velocity_y != 0.0;
            coin
        })
        .collect();

    environment.platforms = env
        .platforms
        .iter()
        .map(|p| Platform::new(Vec2::new(p.x, p.y), Vec2::new(p.width, p.height)))
        .collect();

    let mut settings = Settings::default();
    settings.set_music_volume(record.music_volume);
    settings.set_sfx_volume(record.sfx_volume);

    let state = GameState::from_parts(
        seed,
        tuning,
        record.current_scene,
        player,
        environment,
        now_ms,
    );
    log::info!(
        "Restored world: {} trees, {} hostiles, {} coins",
        state.environment.trees.len(),
        state.environment.hostiles.len(),
        state.environment.coins.len()
    );
    Ok((state, settings))
}

fn restore_hostile(m: &MonsterRecord, tuning: &Tuning, now_ms: u64) -> Hostile {
    let pos = Vec2::new(m.x, m.y);
    match m.kind {
        HostileKind::Monster => {
            let mut monster = Monster::new(pos, &tuning.monster);
            monster.health = m.health.max(0);
            monster.alive = m.is_alive;
            monster.speed = m.speed;
            monster.damage = m.damage;
            monster.direction = m.direction;
            monster.patrol_start_x = m.patrol_start_x;
            Hostile::Monster(monster)
        }
        HostileKind::Dragon => {
            let mut dragon = Dragon::new(pos, tuning, now_ms);
            dragon.health = m.health.max(0);
            dragon.alive = m.is_alive;
            dragon.speed = m.speed;
            dragon.damage = m.damage;
            dragon.direction = m.direction;
            dragon.patrol_start_x = m.patrol_start_x;
            let last = m.last_fireball_time.unwrap_or(now_ms).min(now_ms);
            dragon.fireball_cooldown = Cooldown::started_at(tuning.dragon.fireball_cooldown_ms, last);
            Hostile::Dragon(dragon)
        }
    }
}

fn validate(record: &SaveRecord, tuning: &Tuning) -> Result<(), PersistenceError> {
    let env = &record.environment;
    let mut coords = vec![record.player.x, record.player.y];
    coords.extend(env.trees.iter().flat_map(|t| [t.x, t.y]));
    coords.extend(env.monsters.iter().flat_map(|m| [m.x, m.y, m.patrol_start_x, m.speed]));
    coords.extend(env.coins.iter().flat_map(|c| [c.x, c.y, c.velocity_y]));
    coords.extend(env.platforms.iter().flat_map(|p| [p.x, p.y, p.width, p.height]));
    if coords.iter().any(|v| !v.is_finite()) {
        return Err(PersistenceError::Invalid("non-finite coordinate".into()));
    }

    let player = &record.player;
    check_health("player", player.health, tuning.player.health)?;
    let expected_level = tuning.sword.level_for(player.coins);
    if player.sword_growth_level != expected_level {
        return Err(PersistenceError::Invalid(format!(
            "sword level {} does not match {} coins (expected {})",
            player.sword_growth_level, player.coins, expected_level
        )));
    }

    for tree in &env.trees {
        check_health("tree", tree.health, tuning.scenery.tree_health)?;
    }

    for m in &env.monsters {
        let max_health = match m.kind {
            HostileKind::Monster => tuning.monster.health,
            HostileKind::Dragon => tuning.dragon.health,
        };
        check_health("hostile", m.health, max_health)?;
        if m.damage < 0 {
            return Err(PersistenceError::Invalid(format!(
                "hostile damage must not be negative, got {}",
                m.damage
            )));
        }
        if m.speed < 0.0 {
            return Err(PersistenceError::Invalid(format!(
                "hostile speed must not be negative, got {}",
                m.speed
            )));
        }
        if m.direction != 1 && m.direction != -1 {
            return Err(PersistenceError::Invalid(format!(
                "monster direction must be 1 or -1, got {}",
                m.direction
            )));
        }
    }

    if env.platforms.iter().any(|p| p.width <= 0.0 || p.height <= 0.0) {
        return Err(PersistenceError::Invalid("platform with empty size".into()));
    }

    Ok(())
}

fn check_health(what: &str, health: i32, max: i32) -> Result<(), PersistenceError> {
    if (0..=max).contains(&health) {
        Ok(())
    } else {
        Err(PersistenceError::Invalid(format!(
            "{what} health {health} outside 0..={max}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    /// Player at (100, 200) with 80 health and 12 coins, one wounded dragon
    fn scenario() -> GameState {
        let tuning = tuning();
        let mut player = Player::new(Vec2::new(100.0, 200.0), &tuning);
        player.health = 80;
        player.collect_coin(12);

        let mut dragon = Dragon::new(Vec2::new(300.0, 150.0), &tuning, 0);
        dragon.health = 40;

        let mut environment = Environment::empty();
        environment.hostiles.push(Hostile::Dragon(dragon));
        GameState::from_parts(5, &tuning, Scene::Playing, player, environment, 2500)
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let tuning = tuning();
        let settings = Settings::default();
        let record = capture(&scenario(), &settings);
        let json = record.to_json().unwrap();

        let parsed = SaveRecord::from_json(&json).unwrap();
        let (state, restored_settings) = restore(&parsed, &tuning, 5).unwrap();

        assert_eq!(state.player.aabb().pos, Vec2::new(100.0, 200.0));
        assert_eq!(state.player.health, 80);
        assert_eq!(state.player.coins, 12);
        assert_eq!(state.player.sword.level(), 2);
        assert_eq!(state.player.sword.damage(), 9);
        assert_eq!(state.time_ms, 2500);

        let Hostile::Dragon(dragon) = &state.environment.hostiles[0] else {
            panic!("expected a dragon");
        };
        assert_eq!(dragon.health, 40);
        assert!(dragon.alive);
        assert_eq!(dragon.body.aabb.pos, Vec2::new(300.0, 150.0));

        // A second capture is identical to the first
        let again = capture(&state, &restored_settings);
        assert_eq!(again, record);
        assert_eq!(again.to_json().unwrap(), json);
    }

    #[test]
    fn test_json_uses_documented_field_names() {
        let record = capture(&scenario(), &Settings::default());
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(value["player"]["facing_right"], true);
        assert_eq!(value["player"]["sword_growth_level"], 2);
        assert_eq!(value["environment"]["monsters"][0]["type"], "Dragon");
        assert_eq!(value["environment"]["monsters"][0]["health"], 40);
        assert_eq!(value["current_scene"], "Playing");
        assert!(value["music_volume"].is_number());
    }

    #[test]
    fn test_type_tag_rebuilds_variants() {
        let json = r#"{
            "player": {"x": 10, "y": 560, "health": 100, "coins": 0, "facing_right": false,
                       "sword_growth_level": 0, "sword_current_damage": 5},
            "environment": {
                "trees": [{"x": 300, "y": 490, "health": 2, "is_cut": false}],
                "monsters": [
                    {"x": 500, "y": 580, "health": 20, "is_alive": true, "speed": 2,
                     "damage": 5, "direction": -1, "patrol_start_x": 450, "type": "Monster"},
                    {"x": 320, "y": 150, "health": 100, "is_alive": true, "speed": 3,
                     "damage": 15, "direction": 1, "patrol_start_x": 320, "type": "Dragon"}
                ],
                "coins": [{"x": 50, "y": 630, "value": 1, "collected": false, "velocity_y": 0}],
                "platforms": [{"x": 220, "y": 520, "width": 150, "height": 30}]
            },
            "current_scene": "Playing",
            "music_volume": 0.5,
            "sfx_volume": 0.75
        }"#;
        let record = SaveRecord::from_json(json).unwrap();
        let (state, settings) = restore(&record, &tuning(), 1).unwrap();

        let env = &state.environment;
        assert_eq!(env.hostiles[0].kind(), HostileKind::Monster);
        assert_eq!(env.hostiles[1].kind(), HostileKind::Dragon);
        let Hostile::Monster(monster) = &env.hostiles[0] else {
            panic!("expected a monster");
        };
        assert_eq!(monster.patrol_bounds(), (350.0, 550.0));
        assert_eq!(env.trees[0].health, 2);
        assert_eq!(env.platforms[0].aabb.size, Vec2::new(150.0, 30.0));
        assert_eq!(state.player.facing, Facing::Left);
        assert_eq!(settings.sfx_volume, 0.75);
        assert_eq!(state.time_ms, 0);
    }

    #[test]
    fn test_sword_damage_is_recomputed_not_trusted() {
        let mut record = capture(&scenario(), &Settings::default());
        record.player.sword_current_damage = 999;
        let (state, _) = restore(&record, &tuning(), 5).unwrap();
        assert_eq!(state.player.sword.damage(), 9);
    }

    #[test]
    fn test_sword_level_must_match_coins() {
        let mut record = capture(&scenario(), &Settings::default());
        record.player.coins = 0;
        record.player.sword_growth_level = 7;
        let err = restore(&record, &tuning(), 5).unwrap_err();
        assert!(matches!(err, PersistenceError::Invalid(_)));
    }

    #[test]
    fn test_huge_sword_level_is_rejected_without_panicking() {
        let mut record = capture(&scenario(), &Settings::default());
        record.player.sword_growth_level = 2_000_000_000;
        assert!(matches!(
            restore(&record, &tuning(), 5),
            Err(PersistenceError::Invalid(_))
        ));

        // A coin total that large is consistent, and damage saturates
        record.player.coins = u32::MAX;
        record.player.sword_growth_level = tuning().sword.level_for(u32::MAX);
        let (state, _) = restore(&record, &tuning(), 5).unwrap();
        assert_eq!(state.player.sword.damage(), i32::MAX);
    }

    #[test]
    fn test_negative_hostile_damage_is_rejected() {
        let mut record = capture(&scenario(), &Settings::default());
        record.environment.monsters[0].damage = -50;
        assert!(matches!(
            restore(&record, &tuning(), 5),
            Err(PersistenceError::Invalid(_))
        ));
    }

    #[test]
    fn test_negative_hostile_speed_is_rejected() {
        let mut record = capture(&scenario(), &Settings::default());
        record.environment.monsters[0].speed = -3.0;
        assert!(matches!(
            restore(&record, &tuning(), 5),
            Err(PersistenceError::Invalid(_))
        ));
    }

    #[test]
    fn test_health_above_maximum_is_rejected() {
        let mut record = capture(&scenario(), &Settings::default());
        record.player.health = 150;
        assert!(restore(&record, &tuning(), 5).is_err());

        let mut record = capture(&scenario(), &Settings::default());
        record.environment.monsters[0].health = 101;
        assert!(restore(&record, &tuning(), 5).is_err());

        let mut record = capture(&scenario(), &Settings::default());
        record.player.health = -1;
        assert!(restore(&record, &tuning(), 5).is_err());
    }

    #[test]
    fn test_out_of_range_volume_is_clamped() {
        let mut record = capture(&scenario(), &Settings::default());
        record.music_volume = 3.0;
        record.sfx_volume = -1.0;
        let (_, settings) = restore(&record, &tuning(), 5).unwrap();
        assert_eq!(settings.music_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_invalid_direction_is_rejected() {
        let mut record = capture(&scenario(), &Settings::default());
        record.environment.monsters[0].direction = 0;
        let err = restore(&record, &tuning(), 5).unwrap_err();
        assert!(matches!(err, PersistenceError::Invalid(_)));
    }

    #[test]
    fn test_dragon_cooldown_resumes() {
        let tuning = tuning();
        let mut state = scenario();
        if let Hostile::Dragon(d) = &mut state.environment.hostiles[0] {
            d.fireball_cooldown.fire(2000);
        }
        let record = capture(&state, &Settings::default());
        assert_eq!(record.environment.monsters[0].last_fireball_time, Some(2000));

        let (restored, _) = restore(&record, &tuning, 5).unwrap();
        let Hostile::Dragon(d) = &restored.environment.hostiles[0] else {
            panic!("expected a dragon");
        };
        assert!(!d.fireball_cooldown.is_ready(3400));
        assert!(d.fireball_cooldown.is_ready(3501));
    }
}
